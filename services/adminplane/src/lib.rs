//! Admin service library crate.
//!
//! # Purpose
//! Exposes the directory model, storage, auth context, workflows, and
//! configuration for use by the binary and tests.
//!
//! # Notes
//! Module boundaries mirror the operation surface and storage backends.
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod model;
pub mod observability;
pub mod seed;
pub mod store;
pub mod workflows;
