pub mod error;
pub mod event_logs;
pub mod ingest;
pub mod merger;
pub mod minting;
pub mod pending;
pub mod settings;
pub mod stores;
pub mod transaction_set;
pub mod types;

pub use error::{DecodeError, IngestError};
pub use merger::{merge, Merger, CONFIRMATION_DEPTH};
pub use minting::{is_minting_transaction, MintingClassifier};
pub use pending::{AmbiguityReason, PendingMatch, PendingTransactionIndex};
pub use transaction_set::TransactionSet;
