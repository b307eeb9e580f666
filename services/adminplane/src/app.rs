//! Application state wiring.
//!
//! # Purpose
//! Defines the shared state handed to every workflow and the builder
//! that assembles it, so `main` and tests wire identically.
use std::sync::Arc;

use quill_ledger::{InMemoryLedger, Ledger};

use crate::store::DirectoryStore;
use crate::store::memory::InMemoryDirectory;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DirectoryStore>,
    pub ledger: Ledger,
}

pub fn build_state() -> AppState {
    AppState {
        store: Arc::new(InMemoryDirectory::new()),
        ledger: Ledger::new(Arc::new(InMemoryLedger::new())),
    }
}
