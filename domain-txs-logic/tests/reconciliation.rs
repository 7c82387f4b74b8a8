use alloy_primitives::{hex, U256};
use domain_txs_logic::{
    event_logs::{fold_domain_identity, EventLogEntry, EventType},
    ingest::{ingest_backend_batch, records_from_logs, RpcLog},
    is_minting_transaction, merge,
    stores::{InMemoryDomainStore, InMemoryMintingStore},
    types::{DomainItem, HexString, NamingService, TransactionRecord, TxOperation},
    AmbiguityReason, DecodeError, IngestError, PendingMatch, PendingTransactionIndex,
    TransactionSet,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::{collections::HashSet, sync::Arc};

fn hex_str(value: &str) -> HexString {
    value.parse().expect("valid hex")
}

fn record(id: Option<u64>, hash: Option<&str>, is_pending: bool) -> TransactionRecord {
    TransactionRecord::new(id, hash.map(hex_str), is_pending)
}

fn full_record() -> TransactionRecord {
    TransactionRecord {
        domain_name: Some("alice.crypto".to_string()),
        domain_token_id: Some(hex_str("0x05")),
        operation: Some(TxOperation::SetRecords),
        block_hash: Some(hex_str("0xb10c")),
        block_number: Some(hex_str("0x64")),
        event_logs: Some(vec![new_uri_log("0x05", "alice.crypto")]),
        nonce: Some(3),
        gas_price: Some(30),
        ..record(Some(1), Some("0xabc"), false)
    }
}

fn new_uri_log(token_id: &str, name: &str) -> EventLogEntry {
    EventLogEntry::new(
        vec![EventType::NewUri.signature().clone(), hex_str(token_id)],
        &hex::encode_prefixed(name.as_bytes()),
    )
}

fn new_key_log(token_id: &str, key: &str) -> EventLogEntry {
    EventLogEntry::new(
        vec![
            EventType::NewKey.signature().clone(),
            hex_str(token_id),
            hex_str("0x6b"),
        ],
        &hex::encode_prefixed(key.as_bytes()),
    )
}

fn assert_same_fields(left: &TransactionRecord, right: &TransactionRecord) {
    assert_eq!(
        serde_json::to_value(left).unwrap(),
        serde_json::to_value(right).unwrap()
    );
}

#[test]
fn merging_a_record_with_itself_changes_nothing() {
    let original = full_record();
    assert_same_fields(&merge(&original, &original, None), &original);

    let sparse = record(Some(9), None, true);
    assert_same_fields(&merge(&sparse, &sparse, None), &sparse);
}

#[test]
fn known_fields_are_never_overwritten() {
    let original = full_record();
    let incoming = TransactionRecord {
        domain_name: Some("mallory.crypto".to_string()),
        domain_token_id: Some(hex_str("0x99")),
        operation: Some(TxOperation::BurnDomain),
        block_hash: Some(hex_str("0xffff")),
        block_number: Some(hex_str("0x01")),
        nonce: Some(100),
        gas_price: Some(1),
        ..record(Some(1), Some("0xabc"), true)
    };
    let merged = merge(&original, &incoming, Some(U256::from(1_000)));
    assert_eq!(merged.domain_name, original.domain_name);
    assert_eq!(merged.domain_token_id, original.domain_token_id);
    assert_eq!(merged.operation, original.operation);
    assert_eq!(merged.block_hash, original.block_hash);
    assert_eq!(merged.block_number, original.block_number);
    assert_eq!(merged.nonce, original.nonce);
    assert_eq!(merged.gas_price, original.gas_price);
}

#[rstest]
#[case(100, 110, true)]
#[case(100, 112, true)]
#[case(100, 113, false)]
#[case(0, 12, true)]
#[case(0, 13, false)]
#[case(500, 20, true)]
fn pending_follows_confirmation_depth(
    #[case] block: u64,
    #[case] latest: u64,
    #[case] expected: bool,
) {
    let original = record(Some(1), None, true);
    let incoming = TransactionRecord {
        block_number: Some(HexString::from_u256(U256::from(block))),
        ..record(Some(1), None, !expected)
    };
    let merged = merge(&original, &incoming, Some(U256::from(latest)));
    assert_eq!(merged.is_pending, expected, "block {block}, latest {latest}");
}

#[test]
fn new_key_logs_carry_no_domain_identity() {
    let only_new_key = vec![new_key_log("0x05", "crypto.ETH.address")];
    assert!(fold_domain_identity(&only_new_key).is_empty());

    let mixed = vec![
        new_uri_log("0x05", "alice.crypto"),
        new_key_log("0x07", "crypto.BTC.address"),
    ];
    let identity = fold_domain_identity(&mixed);
    assert_eq!(identity.domain_name.as_deref(), Some("alice.crypto"));
    assert_eq!(identity.domain_token_id, Some(hex_str("0x05")));
}

#[test]
fn records_without_shared_identity_are_never_equal() {
    let by_id = TransactionRecord {
        domain_name: Some("alice.crypto".to_string()),
        ..record(Some(7), None, true)
    };
    let by_hash = TransactionRecord {
        domain_name: Some("alice.crypto".to_string()),
        ..record(None, Some("0xdead"), true)
    };
    assert_eq!(by_id.same_transaction(&by_hash), None);
    assert_ne!(by_id, by_hash);

    assert_eq!(
        by_id.same_transaction(&record(Some(8), None, true)),
        Some(false)
    );
    assert_eq!(
        by_id.same_transaction(&record(Some(7), Some("0xbeef"), false)),
        Some(true)
    );
}

#[test]
fn backend_record_is_completed_by_chain_record() {
    let a = record(Some(7), None, true);
    let b = TransactionRecord {
        block_number: Some(hex_str("0x64")),
        ..record(None, Some("0xdead"), false)
    };
    let merged = merge(&a, &b, Some(U256::from(110)));
    assert_eq!(merged.id, Some(7));
    assert_eq!(merged.transaction_hash, Some(hex_str("0xdead")));
    assert!(merged.is_pending);
}

#[test]
fn zns_domain_matches_through_owner_of_reported_domain() {
    let alice = DomainItem::new("alice.zil", NamingService::Zns, Some("0xA"));
    let bob = DomainItem::new("bob.zil", NamingService::Zns, Some("0xa"));
    let carol = DomainItem::new("carol.zil", NamingService::Zns, Some("0xC"));
    let orphan = DomainItem::new("orphan.zil", NamingService::Zns, None);
    let index = PendingTransactionIndex::new(
        vec![TransactionRecord {
            domain_name: Some("bob.zil".to_string()),
            ..record(Some(1), None, true)
        }],
        Arc::new(InMemoryDomainStore::new(vec![
            alice.clone(),
            bob,
            carol.clone(),
            orphan.clone(),
        ])),
        Arc::new(InMemoryMintingStore::default()),
    );

    assert!(index.is_pending_for(&alice));
    assert_eq!(index.pending_match_for(&alice), PendingMatch::Matched);
    assert!(!index.is_pending_for(&carol));
    assert_eq!(
        index.pending_match_for(&orphan),
        PendingMatch::Assumed(AmbiguityReason::DomainHasNoOwner)
    );
}

#[test]
fn unknown_operation_fails_only_its_own_record() {
    let report = ingest_backend_batch(vec![
        serde_json::json!({"id": 1, "statusGroup": "Pending", "operation": "SomeFutureOp"}),
        serde_json::json!({"id": 2, "hash": "0xdead", "statusGroup": "Pending", "operation": "MintDomain"}),
    ]);
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].id, Some(2));
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        &report.failures[0].error,
        IngestError::Decode(DecodeError::UnknownOperation(op)) if op == "SomeFutureOp"
    ));
}

#[test]
fn tracked_transfer_counts_as_minting() {
    let tracked: HashSet<u64> = [42, 99].into_iter().collect();
    let transfer = TransactionRecord {
        operation: Some(TxOperation::TransferDomain),
        ..record(Some(42), None, true)
    };
    assert!(is_minting_transaction(&transfer, &tracked));

    let untracked = TransactionRecord {
        id: Some(7),
        ..transfer.clone()
    };
    assert!(!is_minting_transaction(&untracked, &tracked));
}

#[test]
fn backend_and_chain_views_reconcile_into_one_pending_mint() {
    let backend = ingest_backend_batch(vec![serde_json::json!({
        "id": 42,
        "hash": "0xdead",
        "statusGroup": "Pending",
        "type": "MaticTx",
        "operation": "MintDomain",
    })]);
    let log = new_uri_log("0x05", "alice.crypto");
    let chain = records_from_logs(vec![RpcLog {
        address: None,
        topics: log.topics.iter().map(ToString::to_string).collect(),
        data: log.data.clone(),
        block_hash: Some("0xb10c".to_string()),
        block_number: Some("0x64".to_string()),
        transaction_hash: Some("0xDEAD".to_string()),
        log_index: Some("0x0".to_string()),
    }]);
    assert!(backend.is_complete() && chain.is_complete());

    let set = TransactionSet::default()
        .merge_batch(backend.records, None)
        .merge_batch(chain.records, Some(U256::from(0x64 + 5)));
    assert_eq!(set.len(), 1);
    let merged = &set.records()[0];
    assert_eq!(merged.domain_name.as_deref(), Some("alice.crypto"));
    assert_eq!(merged.domain_token_id, Some(hex_str("0x05")));
    assert!(merged.is_pending);

    let alice = DomainItem::new("alice.crypto", NamingService::Uns, Some("0xa"));
    let index = PendingTransactionIndex::new(
        set.into_records(),
        Arc::new(InMemoryDomainStore::new(vec![alice.clone()])),
        Arc::new(InMemoryMintingStore::new([42])),
    );
    assert!(index.is_pending_for(&alice));
    assert!(index.has_minting_in_progress(&alice));

    let confirmed = TransactionSet::from_iter(index.records().to_vec())
        .merge_batch(
            vec![TransactionRecord {
                block_number: Some(hex_str("0x64")),
                ..record(None, Some("0xdead"), true)
            }],
            Some(U256::from(0x64 + 13)),
        )
        .without_confirmed();
    assert!(confirmed.is_empty());
}
