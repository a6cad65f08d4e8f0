use divvy_domain::{
    Balances, Expense, Money, PaidSettlement, ReductionStats, Roster, Transfer,
};

/// Expense as entered by a user, before names are checked against the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub paid_by: String,
    pub split_among: Vec<String>,
}

/// The three ledger collections read at one point in time.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    pub roster: Roster,
    pub expenses: Vec<Expense>,
    pub paid: Vec<PaidSettlement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseEntry {
    /// Position in the chronological ledger; what delete and edit take.
    pub index: usize,
    pub expense: Expense,
}

#[derive(Debug, Clone)]
pub struct SettlementSummary {
    pub balances: Balances,
    pub transfers: Vec<Transfer>,
    pub stats: ReductionStats,
    pub total_spent: Money,
}
