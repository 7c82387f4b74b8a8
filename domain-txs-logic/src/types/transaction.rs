use super::{HexString, TransactionType, TxOperation};
use crate::event_logs::EventLogEntry;
use serde::Serialize;

/// One on-chain transaction as currently known. Fields are filled in as more
/// sources report on it; see [`crate::merger::merge`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: Option<u64>,
    pub transaction_hash: Option<HexString>,
    pub domain_name: Option<String>,
    pub domain_token_id: Option<HexString>,
    pub is_pending: bool,
    pub transaction_type: Option<TransactionType>,
    pub operation: Option<TxOperation>,
    pub block_hash: Option<HexString>,
    pub block_number: Option<HexString>,
    pub event_logs: Option<Vec<EventLogEntry>>,
    pub nonce: Option<u64>,
    pub gas_price: Option<u64>,
}

impl TransactionRecord {
    /// Creates a record known by backend id and/or hash.
    ///
    /// A record without either is unusable; debug builds panic, release
    /// builds log and keep going.
    pub fn new(id: Option<u64>, transaction_hash: Option<HexString>, is_pending: bool) -> Self {
        let record = Self {
            id,
            transaction_hash,
            is_pending,
            ..Default::default()
        };
        if !record.has_identity() {
            tracing::error!("transaction record created with neither id nor hash");
            debug_assert!(false, "transaction record created with neither id nor hash");
        }
        record
    }

    /// Optimistic record for a transaction the user has just submitted.
    pub fn pending_local(
        id: Option<u64>,
        transaction_hash: Option<HexString>,
        domain_name: Option<String>,
        operation: Option<TxOperation>,
    ) -> Self {
        Self {
            domain_name,
            operation,
            ..Self::new(id, transaction_hash, true)
        }
    }

    /// Copy of this record with replaced gas settings, used when a stuck
    /// transaction is resubmitted.
    pub fn with_gas_settings(&self, nonce: Option<u64>, gas_price: Option<u64>) -> Self {
        Self {
            nonce,
            gas_price,
            ..self.clone()
        }
    }

    pub fn has_identity(&self) -> bool {
        self.id.is_some() || self.transaction_hash.is_some()
    }

    /// Whether both records describe the same transaction.
    ///
    /// Returns `None` when the records share neither a hash nor an id, in
    /// which case nothing can be said.
    pub fn same_transaction(&self, other: &Self) -> Option<bool> {
        let by_hash = match (&self.transaction_hash, &other.transaction_hash) {
            (Some(this), Some(that)) => Some(this == that),
            _ => None,
        };
        let by_id = match (self.id, other.id) {
            (Some(this), Some(that)) => Some(this == that),
            _ => None,
        };
        match (by_hash, by_id) {
            (Some(true), _) | (_, Some(true)) => Some(true),
            (None, None) => None,
            _ => Some(false),
        }
    }

    pub fn is_for_domain(&self, name: &str) -> bool {
        self.domain_name.as_deref() == Some(name)
    }
}

/// Equal only when proven equal by hash or id; indeterminate pairs are unequal.
impl PartialEq for TransactionRecord {
    fn eq(&self, other: &Self) -> bool {
        self.same_transaction(other) == Some(true)
    }
}
