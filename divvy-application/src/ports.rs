use crate::error::StoreError;
use chrono::{DateTime, Utc};
use divvy_domain::{Expense, PaidSettlement, ParticipantName};

/// Persistence for the three independent ledger collections.
///
/// Each collection is read as a whole snapshot. No locking is implied
/// between collections or across processes; the last write wins.
pub trait LedgerStore: Send + Sync {
    fn load_participants(&self) -> Result<Vec<ParticipantName>, StoreError>;

    fn save_participants(&self, participants: &[ParticipantName]) -> Result<(), StoreError>;

    fn load_expenses(&self) -> Result<Vec<Expense>, StoreError>;

    fn save_expenses(&self, expenses: &[Expense]) -> Result<(), StoreError>;

    fn load_paid_settlements(&self) -> Result<Vec<PaidSettlement>, StoreError>;

    fn append_paid_settlement(&self, settlement: &PaidSettlement) -> Result<(), StoreError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
