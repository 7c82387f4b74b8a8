mod domain;
mod hex_string;
mod operation;
mod transaction;

pub use domain::{DomainItem, NamingService};
pub use hex_string::HexString;
pub use operation::{StatusGroup, TransactionType, TxOperation};
pub use transaction::TransactionRecord;
