use crate::model::{Expense, Transfer};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// How much the minimizer saved compared to paying every payer directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReductionStats {
    /// Split size minus one, summed over every expense.
    pub naive: usize,
    pub optimized: usize,
    /// Rounded half up; negative when more transfers remain than the
    /// baseline would need.
    pub reduction_percent: i64,
}

impl ReductionStats {
    pub fn compute(expenses: &[Expense], transfers: &[Transfer]) -> Self {
        let naive: usize = expenses
            .iter()
            .map(|expense| expense.split_among.len().saturating_sub(1))
            .sum();
        let optimized = transfers.len();

        let reduction_percent = if naive == 0 {
            0
        } else {
            let saved = Decimal::from(naive) - Decimal::from(optimized);
            let percent = saved * Decimal::ONE_HUNDRED / Decimal::from(naive);
            // Halves round toward positive infinity on both sides of zero.
            let strategy = if percent.is_sign_negative() {
                RoundingStrategy::MidpointTowardZero
            } else {
                RoundingStrategy::MidpointAwayFromZero
            };
            percent
                .round_dp_with_strategy(0, strategy)
                .to_i64()
                .unwrap_or_default()
        };

        Self {
            naive,
            optimized,
            reduction_percent,
        }
    }
}
