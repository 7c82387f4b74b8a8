use crate::{
    minting::MintingClassifier,
    stores::{DomainStore, MintingStore},
    types::{DomainItem, NamingService, TransactionRecord},
};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of matching a domain against pending transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "reason")]
pub enum PendingMatch {
    NotPending,
    Matched,
    /// ZNS state could not be resolved and is reported as pending so the UI
    /// doesn't allow a conflicting action.
    Assumed(AmbiguityReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityReason {
    DomainHasNoOwner,
    TransactionHasNoDomainName,
}

impl PendingMatch {
    pub fn is_pending(&self) -> bool {
        !matches!(self, PendingMatch::NotPending)
    }

    /// A real match outranks an assumed one, which outranks none.
    fn strongest(self, other: Self) -> Self {
        match (self, other) {
            (PendingMatch::Matched, _) | (_, PendingMatch::Matched) => PendingMatch::Matched,
            (PendingMatch::Assumed(reason), _) | (_, PendingMatch::Assumed(reason)) => {
                PendingMatch::Assumed(reason)
            }
            _ => PendingMatch::NotPending,
        }
    }
}

/// Answers whether a domain is affected by an in-flight transaction.
#[derive(Clone)]
pub struct PendingTransactionIndex {
    records: Vec<TransactionRecord>,
    domains: Arc<dyn DomainStore>,
    minting: MintingClassifier,
}

impl std::fmt::Debug for PendingTransactionIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTransactionIndex")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl PendingTransactionIndex {
    pub fn new(
        records: impl IntoIterator<Item = TransactionRecord>,
        domains: Arc<dyn DomainStore>,
        minting: Arc<dyn MintingStore>,
    ) -> Self {
        Self {
            records: records.into_iter().collect(),
            domains,
            minting: MintingClassifier::new(minting),
        }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn pending_records(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter().filter(|record| record.is_pending)
    }

    pub fn is_pending_for(&self, domain: &DomainItem) -> bool {
        self.pending_match_for(domain).is_pending()
    }

    pub fn pending_match_for(&self, domain: &DomainItem) -> PendingMatch {
        let matcher = self.matcher_for(domain);
        self.pending_records()
            .map(|record| matcher.check(record))
            .fold(PendingMatch::NotPending, PendingMatch::strongest)
    }

    pub fn pending_transactions_for(&self, domain: &DomainItem) -> Vec<&TransactionRecord> {
        let matcher = self.matcher_for(domain);
        self.pending_records()
            .filter(|record| matcher.check(record).is_pending())
            .collect()
    }

    pub fn has_minting_in_progress(&self, domain: &DomainItem) -> bool {
        let affecting = self.pending_transactions_for(domain);
        !self.minting.minting(affecting).is_empty()
    }

    fn matcher_for<'a>(&'a self, domain: &'a DomainItem) -> Matcher<'a> {
        match domain.naming_service {
            NamingService::Uns => Matcher::Uns { domain },
            NamingService::Zns => Matcher::Zns {
                domain,
                store: self.domains.as_ref(),
            },
        }
    }
}

enum Matcher<'a> {
    Uns {
        domain: &'a DomainItem,
    },
    Zns {
        domain: &'a DomainItem,
        store: &'a dyn DomainStore,
    },
}

impl Matcher<'_> {
    fn check(&self, record: &TransactionRecord) -> PendingMatch {
        match self {
            Matcher::Uns { domain } => {
                if record.is_for_domain(&domain.name) {
                    PendingMatch::Matched
                } else {
                    PendingMatch::NotPending
                }
            }
            Matcher::Zns { domain, store } => check_zns(domain, *store, record),
        }
    }
}

/// ZNS transactions don't reliably name the domain they touch, so a domain is
/// matched through the owners of the domain the transaction reports.
fn check_zns(
    domain: &DomainItem,
    store: &dyn DomainStore,
    record: &TransactionRecord,
) -> PendingMatch {
    let Some(owner) = domain.owner() else {
        tracing::debug!(domain = domain.name, "zns domain has no owner, assuming pending");
        return PendingMatch::Assumed(AmbiguityReason::DomainHasNoOwner);
    };
    let Some(name) = record.domain_name.as_deref() else {
        tracing::debug!(
            domain = domain.name,
            id = ?record.id,
            hash = ?record.transaction_hash,
            "pending zns transaction has no domain name, assuming pending"
        );
        return PendingMatch::Assumed(AmbiguityReason::TransactionHasNoDomainName);
    };
    if store
        .domains_named(name)
        .iter()
        .any(|named| named.is_owned_by(owner))
    {
        PendingMatch::Matched
    } else {
        PendingMatch::NotPending
    }
}
