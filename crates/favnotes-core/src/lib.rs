//! # favnotes-core
//!
//! Core types and shared definitions for favnotes.
//!
//! This crate provides the data model for collected notes and their
//! AI-derived enrichment, the crate-wide error type, and the constants other
//! favnotes crates share.
//!
//! ## Log Level Contract
//!
//! All favnotes crates log through `tracing` with snake_case structured
//! fields (`dataset`, `note_id`, `record_count`, `skipped_count`, `op`).
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Request could not be served |
//! | WARN  | Recoverable issue, dataset or record skipped |
//! | INFO  | Lifecycle events (startup, configuration) |
//! | DEBUG | Decision points (path resolution, index sizes, totals) |
//! | TRACE | Per-record iteration |

pub mod defaults;
pub mod error;
pub mod models;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
