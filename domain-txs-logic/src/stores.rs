//! Read-only views of app state the reconciliation queries depend on.
//!
//! Implementations hand out snapshots; keeping them fresh is up to whoever
//! owns the underlying storage.

use crate::types::DomainItem;
use std::collections::HashSet;

pub trait DomainStore: Send + Sync {
    /// Every domain known to the app, across all wallets.
    fn domains(&self) -> Vec<DomainItem>;

    fn domains_named(&self, name: &str) -> Vec<DomainItem> {
        self.domains()
            .into_iter()
            .filter(|domain| domain.name == name)
            .collect()
    }
}

pub trait MintingStore: Send + Sync {
    /// Backend ids of transactions the app started as mints and still tracks.
    fn minting_transaction_ids(&self) -> HashSet<u64>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDomainStore {
    domains: Vec<DomainItem>,
}

impl InMemoryDomainStore {
    pub fn new(domains: Vec<DomainItem>) -> Self {
        Self { domains }
    }
}

impl DomainStore for InMemoryDomainStore {
    fn domains(&self) -> Vec<DomainItem> {
        self.domains.clone()
    }

    fn domains_named(&self, name: &str) -> Vec<DomainItem> {
        self.domains
            .iter()
            .filter(|domain| domain.name == name)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryMintingStore {
    transaction_ids: HashSet<u64>,
}

impl InMemoryMintingStore {
    pub fn new(transaction_ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            transaction_ids: transaction_ids.into_iter().collect(),
        }
    }
}

impl MintingStore for InMemoryMintingStore {
    fn minting_transaction_ids(&self) -> HashSet<u64> {
        self.transaction_ids.clone()
    }
}
