//! Append-only change ledger for the Quill admin backend.
//!
//! # Purpose
//! Every mutation the backend performs on directory objects is recorded
//! here as a [`ChangeRecord`]: who changed what, on which object, from
//! which value to which value, and why. The ledger is append-only; the
//! rest of the system reads it but never rewrites it.
//!
//! # How it fits
//! Workflows in the admin service call [`Ledger::record_scalar`] and
//! [`Ledger::record_list_diff`] after each mutation. Storage sits behind
//! the [`LedgerStore`] trait; [`InMemoryLedger`] is the bundled backend.
//! A failed write is surfaced to the caller as a [`LedgerError`] so the
//! surrounding operation fails with it, never silently losing history.
//!
//! # Key invariants
//! - Absent and empty values are stored as the `∅` placeholder, so a
//!   record never carries an empty string.
//! - A list change writes one record per element, additions before
//!   removals, each in lexicographic order, and every one of those
//!   records carries the full before and after membership renders.
//! - Equal before and after sets write nothing.
//! - Records attribute to a principal id or to the system actor, which
//!   views render as `SYSTEM`.
//!
//! # Examples
//! ```
//! use std::collections::BTreeSet;
//! use std::sync::Arc;
//!
//! use quill_ledger::{Actor, InMemoryLedger, Ledger};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! runtime.block_on(async {
//!     let ledger = Ledger::new(Arc::new(InMemoryLedger::new()));
//!     let before = BTreeSet::new();
//!     let after: BTreeSet<String> = ["basic".to_string()].into_iter().collect();
//!     let records = ledger
//!         .record_list_diff(&Actor::System, "User", 1, "Groups", &before, &after, None)
//!         .await
//!         .unwrap();
//!     assert_eq!(records.len(), 1);
//!     assert_eq!(records[0].action.to_string(), "Added item \"basic\"");
//!     assert_eq!(records[0].old_value, "∅");
//! });
//! ```
//!
//! # Common pitfalls
//! - [`ChangeAction`]'s `Display` output is the stored presentation
//!   wording; filter records by the enum value, not by its string.
//! - View helpers return newest-first; do not re-sort.

mod action;
mod actor;
mod ledger;
mod memory;
mod record;
mod render;
mod store;

pub use action::ChangeAction;
pub use actor::Actor;
pub use ledger::Ledger;
pub use memory::InMemoryLedger;
pub use record::{ChangeRecord, RecordDraft};
pub use render::{EMPTY_SENTINEL, display_scalar, display_set};
pub use store::{LedgerError, LedgerResult, LedgerStore};
