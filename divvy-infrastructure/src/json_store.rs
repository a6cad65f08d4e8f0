use std::{
    fs, io,
    path::{Path, PathBuf},
};

use divvy_application::{LedgerStore, StoreError};
use divvy_domain::{Expense, PaidSettlement, ParticipantName};
use serde::{Serialize, de::DeserializeOwned};

pub const PARTICIPANTS_KEY: &str = "split_participants";
pub const EXPENSES_KEY: &str = "split_expenses";
pub const PAID_SETTLEMENTS_KEY: &str = "split_paid_settlements";

/// Ledger kept as three JSON documents in one directory, one per collection.
///
/// Each document is a flat array of records. A missing document, an empty
/// file, or a literal `null` all read as an empty collection. Writes replace
/// the whole document via a temporary file and a rename.
#[derive(Debug, Clone)]
pub struct JsonFileLedgerStore {
    dir: PathBuf,
}

impl JsonFileLedgerStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "Opened ledger directory");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn document_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn read<T: DeserializeOwned>(&self, key: &'static str) -> Result<Vec<T>, StoreError> {
        let path = self.document_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let items: Option<Vec<T>> =
            serde_json::from_str(&content).map_err(|err| StoreError::Serialization {
                key,
                detail: err.to_string(),
            })?;
        Ok(items.unwrap_or_default())
    }

    fn write<T: Serialize>(&self, key: &'static str, items: &[T]) -> Result<(), StoreError> {
        let json =
            serde_json::to_string_pretty(items).map_err(|err| StoreError::Serialization {
                key,
                detail: err.to_string(),
            })?;

        let path = self.document_path(key);
        let tmp_path = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &path)?;

        tracing::debug!(key, count = items.len(), "Wrote ledger document");
        Ok(())
    }
}

impl LedgerStore for JsonFileLedgerStore {
    fn load_participants(&self) -> Result<Vec<ParticipantName>, StoreError> {
        self.read(PARTICIPANTS_KEY)
    }

    fn save_participants(&self, participants: &[ParticipantName]) -> Result<(), StoreError> {
        self.write(PARTICIPANTS_KEY, participants)
    }

    fn load_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        self.read(EXPENSES_KEY)
    }

    fn save_expenses(&self, expenses: &[Expense]) -> Result<(), StoreError> {
        self.write(EXPENSES_KEY, expenses)
    }

    fn load_paid_settlements(&self) -> Result<Vec<PaidSettlement>, StoreError> {
        self.read(PAID_SETTLEMENTS_KEY)
    }

    fn append_paid_settlement(&self, settlement: &PaidSettlement) -> Result<(), StoreError> {
        let mut paid: Vec<PaidSettlement> = self.read(PAID_SETTLEMENTS_KEY)?;
        paid.push(settlement.clone());
        self.write(PAID_SETTLEMENTS_KEY, &paid)
    }
}
