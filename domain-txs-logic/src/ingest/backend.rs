use super::non_empty;
use crate::{
    error::DecodeError,
    types::{HexString, StatusGroup, TransactionRecord, TransactionType, TxOperation},
};
use serde::Deserialize;

/// Transaction as listed by the backend API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendTransaction {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub domain_name: Option<String>,
    pub status_group: String,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub nonce: Option<u64>,
    #[serde(default)]
    pub gas_price: Option<u64>,
}

impl TryFrom<BackendTransaction> for TransactionRecord {
    type Error = DecodeError;

    fn try_from(tx: BackendTransaction) -> Result<Self, Self::Error> {
        let identified = TransactionRecord {
            id: tx.id,
            transaction_hash: parse_optional(tx.hash.as_deref(), str::parse::<HexString>)?,
            ..Default::default()
        };
        if !identified.has_identity() {
            return Err(DecodeError::MissingIdentity);
        }
        let status = StatusGroup::parse(&tx.status_group)?;

        Ok(TransactionRecord {
            domain_name: non_empty(tx.domain_name.as_deref()).map(str::to_string),
            transaction_type: parse_optional(
                tx.transaction_type.as_deref(),
                TransactionType::parse,
            )?,
            operation: parse_optional(tx.operation.as_deref(), TxOperation::parse)?,
            block_hash: parse_optional(tx.block_hash.as_deref(), str::parse::<HexString>)?,
            block_number: parse_optional(tx.block_number.as_deref(), str::parse::<HexString>)?,
            nonce: tx.nonce,
            gas_price: tx.gas_price,
            is_pending: status.is_pending(),
            ..identified
        })
    }
}

fn parse_optional<T>(
    value: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, DecodeError>,
) -> Result<Option<T>, DecodeError> {
    non_empty(value).map(parse).transpose()
}
