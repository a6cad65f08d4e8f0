#![warn(clippy::uninlined_format_args)]

pub mod clock;
pub mod json_store;
pub mod memory_store;

pub use clock::SystemClock;
pub use json_store::JsonFileLedgerStore;
pub use memory_store::InMemoryLedgerStore;
