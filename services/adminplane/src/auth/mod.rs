//! Authentication context and permission wiring.
//!
//! # Purpose
//! Holds the per-request principal context, loads grant graphs from the
//! directory, and guards operations behind role checks.
mod context;
mod graph;
mod impersonation;

pub use context::AuthContext;
pub use graph::load_principal_graph;
pub use impersonation::{start_impersonation, stop_impersonation};

use quill_authz::require_any;

use crate::error::WorkflowResult;
use crate::store::DirectoryStore;

/// Denies unless the context's effective user holds `admin` or one of
/// the `allowed` role labels.
pub async fn authorize(
    store: &dyn DirectoryStore,
    ctx: &AuthContext,
    allowed: &[&str],
) -> WorkflowResult<()> {
    let graph = load_principal_graph(store, &ctx.user).await?;
    require_any(&graph, allowed)?;
    Ok(())
}
