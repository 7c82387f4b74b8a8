use clap::Parser;
use domain_txs_logic::{
    ingest::{ingest_backend_batch, records_from_logs, IngestReport, RpcLog},
    settings::{Settings, TracingFormat, TracingSettings},
    stores::{InMemoryDomainStore, InMemoryMintingStore},
    types::{DomainItem, HexString, NamingService},
    PendingMatch, PendingTransactionIndex, TransactionSet,
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};

/// Replays a captured wallet snapshot through transaction reconciliation and
/// prints the pending state of every domain as JSON lines.
#[derive(Debug, Parser)]
#[command(name = "domain-txs", version)]
struct Args {
    /// JSON snapshot with transactions, logs, domains and minting ids.
    snapshot: PathBuf,

    /// Overrides `reconciliation.confirmation_depth` from settings.
    #[arg(long)]
    confirmation_depth: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Snapshot {
    latest_block_number: Option<HexString>,
    transactions: Vec<serde_json::Value>,
    logs: Vec<RpcLog>,
    domains: Vec<DomainItem>,
    minting_transaction_ids: Vec<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DomainStatus<'a> {
    name: &'a str,
    naming_service: NamingService,
    pending: bool,
    pending_match: PendingMatch,
    minting_in_progress: bool,
}

fn init_logs(settings: &TracingSettings) -> anyhow::Result<()> {
    if !settings.enabled {
        return Ok(());
    }
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let layer = match settings.format {
        TracingFormat::Default => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
        TracingFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };
    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()?;
    Ok(())
}

fn report_failures(source: &str, report: &IngestReport) {
    for failure in &report.failures {
        tracing::warn!(
            source,
            index = failure.index,
            error = %failure.error,
            "snapshot element skipped"
        );
    }
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    let mut settings = Settings::build()?;
    if let Some(depth) = args.confirmation_depth {
        settings.reconciliation.confirmation_depth = depth;
        settings.validate()?;
    }
    init_logs(&settings.tracing)?;

    let raw = std::fs::read_to_string(&args.snapshot)?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    let latest_block_number = snapshot
        .latest_block_number
        .as_ref()
        .and_then(HexString::to_u256);

    let backend = ingest_backend_batch(snapshot.transactions);
    report_failures("transactions", &backend);
    let chain = records_from_logs(snapshot.logs);
    report_failures("logs", &chain);

    let mut set = TransactionSet::new(settings.reconciliation.merger())
        .merge_batch(backend.records, None)
        .merge_batch(chain.records, latest_block_number);
    if settings.reconciliation.evict_confirmed {
        set = set.without_confirmed();
    }
    tracing::info!(
        transactions = set.len(),
        pending = set.pending().count(),
        latest_block_number = ?latest_block_number,
        "snapshot reconciled"
    );

    let index = PendingTransactionIndex::new(
        set.into_records(),
        Arc::new(InMemoryDomainStore::new(snapshot.domains.clone())),
        Arc::new(InMemoryMintingStore::new(snapshot.minting_transaction_ids)),
    );
    for domain in &snapshot.domains {
        let pending_match = index.pending_match_for(domain);
        let status = DomainStatus {
            name: &domain.name,
            naming_service: domain.naming_service,
            pending: pending_match.is_pending(),
            pending_match,
            minting_in_progress: index.has_minting_in_progress(domain),
        };
        println!("{}", serde_json::to_string(&status)?);
    }
    Ok(())
}
