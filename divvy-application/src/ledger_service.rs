use crate::{
    error::LedgerError,
    model::{ExpenseEntry, LedgerSnapshot, NewExpense, SettlementSummary},
    ports::{Clock, LedgerStore},
};
use divvy_domain::{
    BalanceCalculator, Balances, DomainError, Expense, Money, PaidSettlement, ParticipantName,
    ReductionStats, Roster, SettlementMinimizer, SettlementRecorder, Transfer,
};
use fxhash::FxHashSet;

/// Session-scoped entry point to the ledger.
///
/// Holds no ledger state of its own: every call reads a fresh snapshot from
/// the store, so two services over the same store see each other's writes.
#[derive(Clone, Copy)]
pub struct LedgerService<'a> {
    store: &'a dyn LedgerStore,
    clock: &'a dyn Clock,
    roster_capacity: Option<usize>,
}

impl<'a> LedgerService<'a> {
    pub fn new(store: &'a dyn LedgerStore, clock: &'a dyn Clock) -> Self {
        Self {
            store,
            clock,
            roster_capacity: None,
        }
    }

    pub fn with_roster_capacity(mut self, capacity: usize) -> Self {
        self.roster_capacity = Some(capacity);
        self
    }

    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        Ok(LedgerSnapshot {
            roster: self.load_roster()?,
            expenses: self.load_expenses()?,
            paid: self.store.load_paid_settlements()?,
        })
    }

    pub fn participants(&self) -> Result<Vec<ParticipantName>, LedgerError> {
        Ok(self.store.load_participants()?)
    }

    pub fn add_participant(&self, name: &str) -> Result<ParticipantName, LedgerError> {
        let name = ParticipantName::new(name)?;
        let mut roster = self.load_roster()?;
        roster.try_add(name.clone())?;
        self.store.save_participants(&roster.to_vec())?;

        tracing::info!(participant = %name, size = roster.len(), "Added participant");
        Ok(name)
    }

    /// Removes a participant who no expense or settlement mentions.
    pub fn remove_participant(&self, name: &str) -> Result<(), LedgerError> {
        let name = ParticipantName::new(name)?;
        let mut snapshot = self.snapshot()?;
        snapshot.roster.require(name.as_str())?;

        if referenced_names(&snapshot).contains(name.as_str()) {
            return Err(LedgerError::ParticipantInUse {
                name: name.as_str().to_owned(),
            });
        }

        snapshot.roster.remove(name.as_str());
        self.store.save_participants(&snapshot.roster.to_vec())?;

        tracing::info!(participant = %name, "Removed participant");
        Ok(())
    }

    /// Empties the roster. Refused while any participant is still referenced.
    pub fn clear_participants(&self) -> Result<usize, LedgerError> {
        let snapshot = self.snapshot()?;
        let referenced = referenced_names(&snapshot);

        if let Some(name) = snapshot
            .roster
            .iter()
            .find(|name| referenced.contains(name.as_str()))
        {
            return Err(LedgerError::ParticipantInUse {
                name: name.as_str().to_owned(),
            });
        }

        self.store.save_participants(&[])?;

        tracing::info!(removed = snapshot.roster.len(), "Cleared participants");
        Ok(snapshot.roster.len())
    }

    pub fn add_expense(&self, input: NewExpense) -> Result<Expense, LedgerError> {
        let mut snapshot = self.snapshot()?;
        let expense = self.build_expense(&snapshot.roster, input)?;

        snapshot.expenses.push(expense.clone());
        Self::ensure_totals_fit(&snapshot)?;
        self.store.save_expenses(&snapshot.expenses)?;

        tracing::info!(
            description = %expense.description,
            amount = %expense.amount,
            paid_by = %expense.paid_by,
            split_count = expense.split_among.len(),
            "Added expense"
        );
        Ok(expense)
    }

    pub fn delete_expense(&self, index: usize) -> Result<Expense, LedgerError> {
        let mut expenses = self.load_expenses()?;
        if index >= expenses.len() {
            return Err(LedgerError::ExpenseNotFound { index });
        }

        let removed = expenses.remove(index);
        self.store.save_expenses(&expenses)?;

        tracing::info!(index, description = %removed.description, "Deleted expense");
        Ok(removed)
    }

    /// Replaces an expense by deleting it and recording `input` as a new one.
    ///
    /// The replacement is validated before anything is removed, so a rejected
    /// edit leaves the ledger unchanged.
    pub fn edit_expense(&self, index: usize, input: NewExpense) -> Result<Expense, LedgerError> {
        let mut snapshot = self.snapshot()?;
        if index >= snapshot.expenses.len() {
            return Err(LedgerError::ExpenseNotFound { index });
        }

        let replacement = self.build_expense(&snapshot.roster, input)?;
        let previous = snapshot.expenses.remove(index);
        snapshot.expenses.push(replacement.clone());
        Self::ensure_totals_fit(&snapshot)?;
        self.store.save_expenses(&snapshot.expenses)?;

        tracing::info!(
            index,
            previous = %previous.description,
            description = %replacement.description,
            "Edited expense"
        );
        Ok(replacement)
    }

    pub fn expenses(&self) -> Result<Vec<Expense>, LedgerError> {
        self.load_expenses()
    }

    /// Newest expenses first, each tagged with its ledger position.
    pub fn recent_expenses(&self, limit: usize) -> Result<Vec<ExpenseEntry>, LedgerError> {
        let expenses = self.load_expenses()?;
        Ok(expenses
            .into_iter()
            .enumerate()
            .rev()
            .take(limit)
            .map(|(index, expense)| ExpenseEntry { index, expense })
            .collect())
    }

    pub fn total_spent(&self) -> Result<Money, LedgerError> {
        Ok(total_spent(&self.load_expenses()?)?)
    }

    pub fn paid_settlements(&self) -> Result<Vec<PaidSettlement>, LedgerError> {
        Ok(self.store.load_paid_settlements()?)
    }

    /// Appends a paid settlement to the log.
    ///
    /// Both names must be on the roster so the log never poisons later
    /// balance calculations. The amount is not compared against outstanding
    /// transfers.
    pub fn record_paid(
        &self,
        from: &str,
        to: &str,
        amount: Money,
    ) -> Result<PaidSettlement, LedgerError> {
        let mut snapshot = self.snapshot()?;
        let settlement = SettlementRecorder.record(from, to, amount, self.clock.now())?;
        snapshot.roster.require(settlement.from.as_str())?;
        snapshot.roster.require(settlement.to.as_str())?;

        snapshot.paid.push(settlement.clone());
        Self::ensure_totals_fit(&snapshot)?;
        self.store.append_paid_settlement(&settlement)?;
        Ok(settlement)
    }

    pub fn balances(&self) -> Result<Balances, LedgerError> {
        let snapshot = self.snapshot()?;
        Self::balances_for(&snapshot)
    }

    pub fn settlements(&self) -> Result<Vec<Transfer>, LedgerError> {
        let balances = self.balances()?;
        Ok(SettlementMinimizer.minimize(&balances))
    }

    pub fn summary(&self) -> Result<SettlementSummary, LedgerError> {
        let snapshot = self.snapshot()?;
        Self::summarize(&snapshot)
    }

    /// Balances, transfers and statistics for an already loaded snapshot.
    pub fn summarize(snapshot: &LedgerSnapshot) -> Result<SettlementSummary, LedgerError> {
        let balances = Self::balances_for(snapshot)?;
        let transfers = SettlementMinimizer.minimize(&balances);
        let stats = ReductionStats::compute(&snapshot.expenses, &transfers);

        Ok(SettlementSummary {
            balances,
            transfers,
            stats,
            total_spent: total_spent(&snapshot.expenses)?,
        })
    }

    fn balances_for(snapshot: &LedgerSnapshot) -> Result<Balances, LedgerError> {
        Ok(BalanceCalculator.calculate(&snapshot.roster, &snapshot.expenses, &snapshot.paid)?)
    }

    /// Rejects a pending change that would leave balances or the total
    /// outside the representable range.
    fn ensure_totals_fit(snapshot: &LedgerSnapshot) -> Result<(), LedgerError> {
        Self::balances_for(snapshot)?;
        total_spent(&snapshot.expenses)?;
        Ok(())
    }

    /// Expenses oldest first. The browser app stores the newest first, so
    /// every read is put back into timestamp order; ties keep stored order.
    fn load_expenses(&self) -> Result<Vec<Expense>, LedgerError> {
        let mut expenses = self.store.load_expenses()?;
        expenses.sort_by_key(|expense| expense.timestamp);
        Ok(expenses)
    }

    fn load_roster(&self) -> Result<Roster, LedgerError> {
        let roster = Roster::from_names(self.store.load_participants()?)?;
        Ok(match self.roster_capacity {
            Some(capacity) => roster.with_capacity_limit(capacity),
            None => roster,
        })
    }

    fn build_expense(&self, roster: &Roster, input: NewExpense) -> Result<Expense, LedgerError> {
        let paid_by = ParticipantName::new(&input.paid_by)?;
        let split_among = input
            .split_among
            .iter()
            .map(ParticipantName::new)
            .collect::<Result<Vec<_>, _>>()?;

        let expense = Expense::new(
            input.description,
            input.amount,
            paid_by,
            split_among,
            self.clock.now(),
        )?;

        roster.require(expense.paid_by.as_str())?;
        for member in &expense.split_among {
            roster.require(member.as_str())?;
        }

        Ok(expense)
    }
}

fn referenced_names(snapshot: &LedgerSnapshot) -> FxHashSet<&str> {
    let mut names = FxHashSet::default();
    for expense in &snapshot.expenses {
        names.insert(expense.paid_by.as_str());
        names.extend(expense.split_among.iter().map(ParticipantName::as_str));
    }
    for settlement in &snapshot.paid {
        names.insert(settlement.from.as_str());
        names.insert(settlement.to.as_str());
    }
    names
}

fn total_spent(expenses: &[Expense]) -> Result<Money, DomainError> {
    Money::checked_sum(expenses.iter().map(|expense| expense.amount))
}
