use super::{non_empty, IngestFailure, IngestReport};
use crate::{
    error::{DecodeError, IngestError},
    event_logs::{fold_domain_identity, EventLogEntry},
    types::{HexString, TransactionRecord},
};
use itertools::Itertools;
use serde::Deserialize;
use std::collections::HashSet;

/// Log entry in the shape returned by `eth_getLogs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcLog {
    #[serde(default)]
    pub address: Option<String>,
    pub topics: Vec<String>,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub log_index: Option<String>,
}

struct ParsedLog {
    position: usize,
    transaction_hash: HexString,
    block_hash: Option<HexString>,
    block_number: Option<HexString>,
    entry: EventLogEntry,
}

impl ParsedLog {
    fn parse(
        position: usize,
        transaction_hash: HexString,
        log: RpcLog,
    ) -> Result<Self, DecodeError> {
        let topics = log
            .topics
            .iter()
            .map(|topic| topic.parse())
            .collect::<Result<Vec<HexString>, _>>()?;
        Ok(Self {
            position,
            transaction_hash,
            block_hash: parse_optional(log.block_hash.as_deref())?,
            block_number: parse_optional(log.block_number.as_deref())?,
            entry: EventLogEntry::new(topics, &log.data),
        })
    }
}

fn parse_optional(value: Option<&str>) -> Result<Option<HexString>, DecodeError> {
    non_empty(value).map(str::parse).transpose()
}

/// Groups raw logs into one record per transaction hash, in first-seen order.
///
/// Records start out pending; merging them with the latest block number
/// settles their state. Logs of not yet mined transactions have no hash and
/// are skipped. A transaction with any malformed log yields no record, since
/// its log list would replace a complete one on merge.
pub fn records_from_logs(logs: Vec<RpcLog>) -> IngestReport {
    let mut failures = Vec::new();
    let mut broken = HashSet::new();
    let mut parsed = Vec::with_capacity(logs.len());
    for (index, log) in logs.into_iter().enumerate() {
        let raw_hash = non_empty(log.transaction_hash.as_deref()).map(str::to_string);
        let Some(raw_hash) = raw_hash else {
            tracing::warn!(
                index,
                address = ?log.address,
                "rpc log has no transaction hash, skipping"
            );
            continue;
        };
        let result = raw_hash.parse::<HexString>().and_then(|transaction_hash| {
            ParsedLog::parse(index, transaction_hash.clone(), log).inspect_err(|_| {
                broken.insert(transaction_hash);
            })
        });
        match result {
            Ok(log) => parsed.push(log),
            Err(err) => {
                tracing::warn!(index, error = %err, "failed to parse rpc log");
                failures.push(IngestFailure {
                    index,
                    error: IngestError::Decode(err),
                });
            }
        }
    }

    let (complete, incomplete): (Vec<_>, Vec<_>) = parsed
        .into_iter()
        .into_group_map_by(|log| log.transaction_hash.clone())
        .into_iter()
        .sorted_by_key(|(_, logs)| logs.first().map(|log| log.position))
        .partition(|(hash, _)| !broken.contains(hash));

    for (hash, logs) in incomplete {
        tracing::warn!(
            transaction_hash = %hash,
            dropped_logs = logs.len(),
            "dropping transaction with malformed logs"
        );
        failures.extend(logs.into_iter().map(|log| IngestFailure {
            index: log.position,
            error: IngestError::Decode(DecodeError::IncompleteTransactionLogs(
                hash.to_string(),
            )),
        }));
    }
    failures.sort_by_key(|failure| failure.index);

    let records = complete
        .into_iter()
        .map(|(hash, logs)| record_from_group(hash, logs))
        .collect();

    IngestReport { records, failures }
}

fn record_from_group(hash: HexString, logs: Vec<ParsedLog>) -> TransactionRecord {
    let block_hash = logs.iter().find_map(|log| log.block_hash.clone());
    let block_number = logs.iter().find_map(|log| log.block_number.clone());
    let entries: Vec<EventLogEntry> = logs.into_iter().map(|log| log.entry).collect();
    let identity = fold_domain_identity(&entries);
    TransactionRecord {
        domain_name: identity.domain_name,
        domain_token_id: identity.domain_token_id,
        block_hash,
        block_number,
        event_logs: Some(entries),
        ..TransactionRecord::new(None, Some(hash), true)
    }
}
