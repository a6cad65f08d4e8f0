pub mod balance_calculator;
pub mod reduction_stats;
pub mod settlement_minimizer;
pub mod settlement_recorder;

pub use balance_calculator::BalanceCalculator;
pub use reduction_stats::ReductionStats;
pub use settlement_minimizer::SettlementMinimizer;
pub use settlement_recorder::SettlementRecorder;
