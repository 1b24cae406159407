//! Dataset loading.
//!
//! Each dataset is a JSON document shaped `{ "data": [...] }`. A document is
//! looked up in the primary data directory first, then in the fallback
//! directory. A missing or unparseable document is a miss, never an error:
//! the caller treats it as an empty dataset.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use tracing::{debug, trace, warn};

use favnotes_core::defaults::{DATA_DIR, DATA_FALLBACK_DIR, DATA_KEY};
use favnotes_core::{DatasetKind, Result};

/// Source of the named dataset documents.
pub trait DatasetSource: Send + Sync {
    /// Load a dataset document, or `None` when it is missing or malformed.
    fn load(&self, kind: DatasetKind) -> Option<JsonValue>;
}

/// Reads dataset documents from a primary directory with a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsDatasetStore {
    primary_dir: PathBuf,
    fallback_dir: PathBuf,
}

impl Default for FsDatasetStore {
    fn default() -> Self {
        Self::new(DATA_DIR, DATA_FALLBACK_DIR)
    }
}

impl FsDatasetStore {
    pub fn new(primary_dir: impl Into<PathBuf>, fallback_dir: impl Into<PathBuf>) -> Self {
        Self {
            primary_dir: primary_dir.into(),
            fallback_dir: fallback_dir.into(),
        }
    }

    pub fn primary_dir(&self) -> &Path {
        &self.primary_dir
    }

    pub fn fallback_dir(&self) -> &Path {
        &self.fallback_dir
    }

    /// Path of the first existing copy of the dataset, primary before fallback.
    pub fn resolve_path(&self, kind: DatasetKind) -> Option<PathBuf> {
        [&self.primary_dir, &self.fallback_dir]
            .into_iter()
            .map(|dir| dir.join(kind.file_name()))
            .find(|path| path.is_file())
    }
}

fn read_document(path: &Path) -> Result<JsonValue> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

impl DatasetSource for FsDatasetStore {
    fn load(&self, kind: DatasetKind) -> Option<JsonValue> {
        let Some(path) = self.resolve_path(kind) else {
            debug!(
                dataset = %kind,
                primary_dir = %self.primary_dir.display(),
                fallback_dir = %self.fallback_dir.display(),
                "Dataset not found, treating as empty"
            );
            return None;
        };

        match read_document(&path) {
            Ok(doc) => {
                debug!(dataset = %kind, path = %path.display(), "Dataset loaded");
                Some(doc)
            }
            Err(e) => {
                warn!(
                    dataset = %kind,
                    path = %path.display(),
                    error = %e,
                    "Dataset unreadable, treating as empty"
                );
                None
            }
        }
    }
}

/// In-memory dataset documents, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatasetSource {
    documents: HashMap<DatasetKind, JsonValue>,
}

impl MemoryDatasetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a whole document.
    pub fn with_document(mut self, kind: DatasetKind, document: JsonValue) -> Self {
        self.documents.insert(kind, document);
        self
    }

    /// Builder-style insert of a `{ "data": records }` document.
    pub fn with_records(self, kind: DatasetKind, records: Vec<JsonValue>) -> Self {
        let mut document = serde_json::Map::new();
        document.insert(DATA_KEY.to_string(), JsonValue::Array(records));
        self.with_document(kind, JsonValue::Object(document))
    }
}

impl DatasetSource for MemoryDatasetSource {
    fn load(&self, kind: DatasetKind) -> Option<JsonValue> {
        self.documents.get(&kind).cloned()
    }
}

/// The `data` array of a dataset, or empty when the dataset is missing or
/// not shaped `{ "data": [...] }`.
pub fn records(source: &dyn DatasetSource, kind: DatasetKind) -> Vec<JsonValue> {
    let Some(document) = source.load(kind) else {
        return Vec::new();
    };

    match document {
        JsonValue::Object(mut map) => match map.remove(DATA_KEY) {
            Some(JsonValue::Array(items)) => {
                trace!(dataset = %kind, record_count = items.len(), "Dataset records");
                items
            }
            _ => {
                warn!(dataset = %kind, "Dataset has no data array, treating as empty");
                Vec::new()
            }
        },
        _ => {
            warn!(dataset = %kind, "Dataset is not an object, treating as empty");
            Vec::new()
        }
    }
}
