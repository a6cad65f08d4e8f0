use crate::{
    error::DomainError,
    model::{Balances, Expense, Money, PaidSettlement, Roster},
};

/// Derives net balances from the expense ledger and the paid-settlement log.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Calculate the net balance of every participant on the roster
    ///
    /// Every roster member appears in the result, at zero if no record
    /// mentions them. Records naming someone outside the roster are rejected
    /// rather than silently registered.
    ///
    /// # Arguments
    /// * `roster` - Known participants, in display order
    /// * `expenses` - Expense ledger (order does not matter)
    /// * `paid` - Settlements already paid, in chronological order
    pub fn calculate(
        &self,
        roster: &Roster,
        expenses: &[Expense],
        paid: &[PaidSettlement],
    ) -> Result<Balances, DomainError> {
        let mut balances = Balances::zeroed(roster);

        for expense in expenses {
            expense.validate()?;
            let share = expense.share();
            balances.credit(&expense.paid_by, expense.amount)?;
            for member in &expense.split_among {
                balances.debit(member, share)?;
            }
        }

        // A paid settlement cancels the debt it covers: the payer's balance
        // moves up and the receiver's moves down by the same amount.
        for settlement in paid {
            settlement.validate()?;
            balances.credit(&settlement.from, settlement.amount)?;
            balances.debit(&settlement.to, settlement.amount)?;
        }

        let total = balances.total()?;
        if !total.is_settled() {
            tracing::warn!(
                total = %total,
                tolerance = %Money::TOLERANCE,
                participant_count = balances.len(),
                "Balances do not sum to zero within tolerance"
            );
        }
        tracing::debug!(
            participant_count = balances.len(),
            expense_count = expenses.len(),
            paid_count = paid.len(),
            "Computed balances"
        );

        Ok(balances)
    }
}
