use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use divvy_application::{LedgerStore, StoreError};
use divvy_domain::{Expense, PaidSettlement, ParticipantName};

#[derive(Default)]
struct Collections {
    participants: Vec<ParticipantName>,
    expenses: Vec<Expense>,
    paid: Vec<PaidSettlement>,
}

/// Process-local ledger, lost when dropped.
#[derive(Default)]
pub struct InMemoryLedgerStore {
    inner: RwLock<Collections>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("in-memory ledger lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("in-memory ledger lock poisoned".to_string()))
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn load_participants(&self) -> Result<Vec<ParticipantName>, StoreError> {
        Ok(self.read()?.participants.clone())
    }

    fn save_participants(&self, participants: &[ParticipantName]) -> Result<(), StoreError> {
        self.write()?.participants = participants.to_vec();
        Ok(())
    }

    fn load_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        Ok(self.read()?.expenses.clone())
    }

    fn save_expenses(&self, expenses: &[Expense]) -> Result<(), StoreError> {
        self.write()?.expenses = expenses.to_vec();
        Ok(())
    }

    fn load_paid_settlements(&self) -> Result<Vec<PaidSettlement>, StoreError> {
        Ok(self.read()?.paid.clone())
    }

    fn append_paid_settlement(&self, settlement: &PaidSettlement) -> Result<(), StoreError> {
        self.write()?.paid.push(settlement.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_participants_are_returned_in_order() {
        let store = InMemoryLedgerStore::new();
        let names: Vec<ParticipantName> = ["C", "A", "B"]
            .into_iter()
            .map(|n| ParticipantName::new(n).expect("valid name"))
            .collect();

        store.save_participants(&names).expect("save");
        assert_eq!(store.load_participants().expect("load"), names);
    }
}
