#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod services;

pub use error::DomainError;
pub use model::{
    Balances, Expense, Money, PaidSettlement, ParticipantName, Roster, Transfer,
    DEFAULT_ROSTER_CAPACITY,
};
pub use services::{BalanceCalculator, ReductionStats, SettlementMinimizer, SettlementRecorder};
