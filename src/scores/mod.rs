//! High-score persistence: the key-value store adapter and the top-3
//! ledger with its daily reset policy.

pub mod ledger;
pub mod store;

pub use ledger::{ScoreLedger, LEDGER_LEN, RESET_HOUR};
pub use store::{FileStore, KvStore, MemoryStore, StoreError};
