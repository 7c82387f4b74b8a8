//! Turning collaborator responses into [`TransactionRecord`]s.
//!
//! A batch never fails as a whole: every element is decoded on its own and
//! bad elements are reported next to the good records.

mod backend;
mod rpc;

pub use backend::BackendTransaction;
pub use rpc::{records_from_logs, RpcLog};

use crate::{error::IngestError, types::TransactionRecord};

#[derive(Debug)]
pub struct IngestFailure {
    /// Position of the element in the input batch.
    pub index: usize,
    pub error: IngestError,
}

#[derive(Debug, Default)]
pub struct IngestReport {
    pub records: Vec<TransactionRecord>,
    pub failures: Vec<IngestFailure>,
}

impl IngestReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn decode_backend_transaction(
    value: serde_json::Value,
) -> Result<TransactionRecord, IngestError> {
    let tx: BackendTransaction = serde_json::from_value(value)?;
    Ok(TransactionRecord::try_from(tx)?)
}

/// Blank strings are sent for fields that are not known yet.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Decodes a backend transaction list.
pub fn ingest_backend_batch(values: Vec<serde_json::Value>) -> IngestReport {
    let mut report = IngestReport::default();
    for (index, value) in values.into_iter().enumerate() {
        match decode_backend_transaction(value) {
            Ok(record) => report.records.push(record),
            Err(error) => {
                tracing::warn!(index, error = %error, "failed to decode backend transaction");
                report.failures.push(IngestFailure { index, error });
            }
        }
    }
    if !report.is_complete() {
        tracing::info!(
            decoded = report.records.len(),
            failed = report.failures.len(),
            "backend batch decoded partially"
        );
    }
    report
}
