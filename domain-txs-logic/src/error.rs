use thiserror::Error;

/// Backend or chain data that cannot be mapped onto the record model.
///
/// Every variant is surfaced to the caller. Unknown enum values are never
/// coerced into a default, since that would misreport pending, confirmed or
/// minting state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown transaction operation '{0}'")]
    UnknownOperation(String),
    #[error("unknown status group '{0}'")]
    UnknownStatusGroup(String),
    #[error("unknown transaction type '{0}'")]
    UnknownTransactionType(String),
    #[error("unknown event signature {0}")]
    UnknownEventSignature(String),
    #[error("event log has no topics")]
    MissingEventSignature,
    #[error("invalid hex string '{0}'")]
    InvalidHex(String),
    #[error("transaction has neither id nor hash")]
    MissingIdentity,
    #[error("another log of transaction {0} failed to decode")]
    IncompleteTransactionLogs(String),
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
