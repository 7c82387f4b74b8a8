use crate::{merger::Merger, types::TransactionRecord};
use alloy_primitives::U256;

/// The authoritative list of known transactions.
///
/// Records are keyed by [`TransactionRecord::same_transaction`]; an incoming
/// record is merged into the first record proven to be the same transaction
/// and appended otherwise. Operations consume the set and return the updated
/// one. Concurrent writers must be serialized by the caller.
#[derive(Debug, Clone, Default)]
pub struct TransactionSet {
    records: Vec<TransactionRecord>,
    merger: Merger,
}

impl TransactionSet {
    pub fn new(merger: Merger) -> Self {
        Self {
            records: Vec::new(),
            merger,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<TransactionRecord> {
        self.records
    }

    pub fn pending(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter().filter(|record| record.is_pending)
    }

    pub fn merge_record(
        mut self,
        incoming: TransactionRecord,
        latest_block_number: Option<U256>,
    ) -> Self {
        match self
            .records
            .iter()
            .position(|known| known.same_transaction(&incoming) == Some(true))
        {
            Some(position) => {
                let merged =
                    self.merger
                        .merge(&self.records[position], &incoming, latest_block_number);
                self.records[position] = merged;
            }
            None => {
                let record = match latest_block_number {
                    // a record seen for the first time still gets its depth checked
                    Some(_) => self.merger.merge(&incoming, &incoming, latest_block_number),
                    None => incoming,
                };
                self.records.push(record);
            }
        }
        self
    }

    pub fn merge_batch(
        self,
        incoming: impl IntoIterator<Item = TransactionRecord>,
        latest_block_number: Option<U256>,
    ) -> Self {
        incoming.into_iter().fold(self, |set, record| {
            set.merge_record(record, latest_block_number)
        })
    }

    /// Drops records that are no longer pending.
    pub fn without_confirmed(self) -> Self {
        let before = self.records.len();
        let records: Vec<_> = self
            .records
            .into_iter()
            .filter(|record| record.is_pending)
            .collect();
        tracing::debug!(evicted = before - records.len(), "evicted confirmed transactions");
        Self {
            records,
            merger: self.merger,
        }
    }
}

impl FromIterator<TransactionRecord> for TransactionSet {
    fn from_iter<I: IntoIterator<Item = TransactionRecord>>(iter: I) -> Self {
        TransactionSet::default().merge_batch(iter, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HexString;

    fn hash(value: &str) -> Option<HexString> {
        Some(value.parse().unwrap())
    }

    #[test]
    fn same_transaction_is_merged_not_duplicated() {
        let set = TransactionSet::default()
            .merge_record(TransactionRecord::new(Some(7), None, true), None)
            .merge_record(TransactionRecord::new(Some(7), hash("0xdead"), true), None)
            .merge_record(TransactionRecord::new(None, hash("0xdead"), false), None);
        assert_eq!(set.len(), 1);
        let record = &set.records()[0];
        assert_eq!(record.id, Some(7));
        assert_eq!(record.transaction_hash, hash("0xdead"));
        assert!(!record.is_pending);
    }

    #[test]
    fn unrelated_transactions_are_kept_apart() {
        let set: TransactionSet = [
            TransactionRecord::new(Some(1), None, true),
            TransactionRecord::new(None, hash("0x02"), true),
            TransactionRecord::new(Some(3), hash("0x03"), false),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.pending().count(), 2);
        assert_eq!(set.without_confirmed().len(), 2);
    }

    #[test]
    fn new_records_are_checked_against_latest_block() {
        let record = TransactionRecord {
            block_number: Some(HexString::from_u256(U256::from(10))),
            ..TransactionRecord::new(None, hash("0x01"), true)
        };
        let set = TransactionSet::default().merge_record(record, Some(U256::from(100)));
        assert!(!set.records()[0].is_pending);
    }
}
