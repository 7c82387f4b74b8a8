use crate::{event_logs::fold_domain_identity, types::TransactionRecord};
use alloy_primitives::U256;

/// Blocks on top of a transaction's block before it counts as confirmed.
pub const CONFIRMATION_DEPTH: u64 = 12;

/// Merges a newly arrived record into a known one.
///
/// Known fields win over incoming ones; only gaps are filled. The pending
/// flag is recomputed from block depth when `latest_block_number` is given and
/// taken from `incoming` otherwise.
pub fn merge(
    original: &TransactionRecord,
    incoming: &TransactionRecord,
    latest_block_number: Option<U256>,
) -> TransactionRecord {
    Merger::default().merge(original, incoming, latest_block_number)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merger {
    confirmation_depth: u64,
}

impl Default for Merger {
    fn default() -> Self {
        Self::new(CONFIRMATION_DEPTH)
    }
}

impl Merger {
    pub fn new(confirmation_depth: u64) -> Self {
        Self { confirmation_depth }
    }

    pub fn merge(
        &self,
        original: &TransactionRecord,
        incoming: &TransactionRecord,
        latest_block_number: Option<U256>,
    ) -> TransactionRecord {
        let mut merged = TransactionRecord {
            id: original.id.or(incoming.id),
            transaction_hash: fill(&original.transaction_hash, &incoming.transaction_hash),
            domain_name: fill(&original.domain_name, &incoming.domain_name),
            domain_token_id: fill(&original.domain_token_id, &incoming.domain_token_id),
            is_pending: self.is_pending(incoming, latest_block_number),
            transaction_type: original.transaction_type.or(incoming.transaction_type),
            operation: original.operation.or(incoming.operation),
            block_hash: fill(&original.block_hash, &incoming.block_hash),
            block_number: fill(&original.block_number, &incoming.block_number),
            event_logs: original.event_logs.clone(),
            nonce: original.nonce.or(incoming.nonce),
            gas_price: original.gas_price.or(incoming.gas_price),
        };

        if let Some(logs) = &incoming.event_logs {
            // a later fetch of the same transaction's logs is a superset
            merged.event_logs = Some(logs.clone());
            if merged.domain_name.is_none() || merged.domain_token_id.is_none() {
                let identity = fold_domain_identity(logs);
                if merged.domain_name.is_none() {
                    merged.domain_name = identity.domain_name;
                }
                if merged.domain_token_id.is_none() {
                    merged.domain_token_id = identity.domain_token_id;
                }
            }
        }

        merged
    }

    /// `block + depth >= latest`, i.e. the transaction still counts as pending.
    pub fn is_within_confirmation_depth(
        &self,
        block_number: U256,
        latest_block_number: U256,
    ) -> bool {
        block_number.saturating_add(U256::from(self.confirmation_depth)) >= latest_block_number
    }

    fn is_pending(&self, incoming: &TransactionRecord, latest_block_number: Option<U256>) -> bool {
        let Some(latest) = latest_block_number else {
            return incoming.is_pending;
        };
        match incoming.block_number.as_ref().and_then(|block| block.to_u256()) {
            Some(block) => self.is_within_confirmation_depth(block, latest),
            None => {
                tracing::debug!(
                    id = ?incoming.id,
                    hash = ?incoming.transaction_hash,
                    "incoming transaction has no block number, keeping reported pending state"
                );
                incoming.is_pending
            }
        }
    }
}

fn fill<T: Clone>(known: &Option<T>, incoming: &Option<T>) -> Option<T> {
    known.as_ref().or(incoming.as_ref()).cloned()
}
