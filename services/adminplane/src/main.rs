//! Quill admin service entry point.
//!
//! # Purpose
//! Wires configuration, storage, and the ledger, seeds first-run data,
//! runs one matrix sync pass, and reports status.
//!
//! # Notes
//! Scheduling is external: cron or a systemd timer invokes this binary
//! for periodic syncs.
mod app;
mod auth;
mod config;
mod error;
mod model;
mod observability;
mod seed;
mod store;
mod workflows;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let _metrics = observability::init_observability();
    let config = config::AdminPlaneConfig::from_env()?;
    run_once(&config).await
}

async fn run_once(config: &config::AdminPlaneConfig) -> Result<()> {
    let state = app::build_state();
    tracing::info!(
        directory = state.store.backend_name(),
        ledger = state.ledger.store().backend_name(),
        "admin plane state ready"
    );

    let admin = seed::ensure_seed_data(&state, config).await?;
    tracing::info!(admin = %admin.email, "seed data ensured");

    let outcome = workflows::matrix::run_matrix_sync(&state, config.sync_dry_run).await?;
    tracing::info!(dry_run = outcome.dry_run, "{}", outcome.message);

    let status = workflows::matrix::matrix_sync_status(&state).await?;
    tracing::info!(
        total_syncs = status.total_syncs,
        last_synced_at = ?status.last_synced_at,
        "matrix sync status"
    );
    Ok(())
}
