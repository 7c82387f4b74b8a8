use crate::{
    stores::MintingStore,
    types::{TransactionRecord, TxOperation},
};
use std::{collections::HashSet, sync::Arc};

/// A mint is often reported as `TransferDomain` until the backend reclassifies
/// it, so transfers the app itself started as mints count too.
pub fn is_minting_transaction(
    record: &TransactionRecord,
    minting_transaction_ids: &HashSet<u64>,
) -> bool {
    match record.operation {
        Some(TxOperation::MintDomain) => true,
        Some(TxOperation::TransferDomain) => record
            .id
            .is_some_and(|id| minting_transaction_ids.contains(&id)),
        _ => false,
    }
}

#[derive(Clone)]
pub struct MintingClassifier {
    store: Arc<dyn MintingStore>,
}

impl std::fmt::Debug for MintingClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MintingClassifier").finish_non_exhaustive()
    }
}

impl MintingClassifier {
    pub fn new(store: Arc<dyn MintingStore>) -> Self {
        Self { store }
    }

    pub fn is_minting(&self, record: &TransactionRecord) -> bool {
        is_minting_transaction(record, &self.store.minting_transaction_ids())
    }

    /// Same as [`Self::is_minting`] for many records, reading the store once.
    pub fn minting<'a>(
        &self,
        records: impl IntoIterator<Item = &'a TransactionRecord>,
    ) -> Vec<&'a TransactionRecord> {
        let ids = self.store.minting_transaction_ids();
        records
            .into_iter()
            .filter(|record| is_minting_transaction(record, &ids))
            .collect()
    }
}
