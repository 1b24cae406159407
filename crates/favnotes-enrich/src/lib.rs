//! # favnotes-enrich
//!
//! Record join and aggregation engine for favnotes.
//!
//! This crate provides:
//! - Dataset loading with primary/fallback directory resolution
//! - Identifier indexes over loosely-typed annotation and normalization records
//! - Field resolution through ordered fallback chains of JSON paths
//! - Note enrichment (AI summary, topics, author link)
//! - Ranked topic frequency tables across all notes
//!
//! ## Example
//!
//! ```no_run
//! use favnotes_enrich::{FsDatasetStore, NoteCatalog};
//!
//! let store = FsDatasetStore::new("data", "../data");
//! let catalog = NoteCatalog::load(&store);
//!
//! let note = catalog.fetch_one("66a0c1f2000000000503a1b2")?;
//! let topics = catalog.aggregate_topics();
//! # Ok::<(), favnotes_enrich::Error>(())
//! ```

pub mod catalog;
pub mod enrich;
pub mod index;
pub mod path;
pub mod resolve;
pub mod store;
pub mod topics;

// Re-export core types
pub use favnotes_core::*;

pub use catalog::{aggregate_topics, fetch_one, CatalogStats, NoteCatalog};
pub use enrich::{enrich_note, find_note};
pub use index::{AnnotationIndex, KeyIndex, NormalizationIndex};
pub use path::{FallbackChain, FieldPath};
pub use resolve::{resolve_summary, resolve_topics};
pub use store::{records, DatasetSource, FsDatasetStore, MemoryDatasetSource};
pub use topics::{aggregate, FrequencyCounter};
