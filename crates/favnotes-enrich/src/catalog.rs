//! Per-request view over the three datasets.
//!
//! A [`NoteCatalog`] is built fresh for every request from a
//! [`DatasetSource`] and dropped afterwards. Nothing is cached between
//! requests, so concurrent requests never share mutable state.

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use favnotes_core::{DatasetKind, EnrichedNote, Error, Note, Result, TopicSummary};

use crate::enrich::{enrich_note, find_note};
use crate::index::{AnnotationIndex, NormalizationIndex};
use crate::store::{records, DatasetSource};
use crate::topics::aggregate;

/// Record counts of a loaded catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub notes: usize,
    pub annotations: usize,
    /// Notes with a normalized author link.
    pub author_links: usize,
}

/// Primary notes with their annotation and normalization indexes.
#[derive(Debug, Clone, Default)]
pub struct NoteCatalog {
    notes: Vec<Note>,
    annotations: AnnotationIndex,
    normalization: NormalizationIndex,
}

impl NoteCatalog {
    /// Load all three datasets. Missing or malformed datasets are empty.
    pub fn load(source: &dyn DatasetSource) -> Self {
        let notes = parse_notes(records(source, DatasetKind::Details));
        let annotations = AnnotationIndex::build(records(source, DatasetKind::AiProcessed));
        let normalization = NormalizationIndex::build(records(source, DatasetKind::Normalized));

        let catalog = Self::from_parts(notes, annotations, normalization);
        let stats = catalog.stats();
        debug!(
            notes = stats.notes,
            annotations = stats.annotations,
            author_links = stats.author_links,
            "Note catalog loaded"
        );
        catalog
    }

    pub fn from_parts(
        notes: Vec<Note>,
        annotations: AnnotationIndex,
        normalization: NormalizationIndex,
    ) -> Self {
        Self {
            notes,
            annotations,
            normalization,
        }
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            notes: self.notes.len(),
            annotations: self.annotations.len(),
            author_links: self.normalization.len(),
        }
    }

    /// Enriched view of one note.
    ///
    /// Fails with [`Error::NoteNotFound`] when the primary dataset has no note
    /// with exactly this identifier, whatever the other datasets contain.
    pub fn fetch_one(&self, id: &str) -> Result<EnrichedNote> {
        let note =
            find_note(&self.notes, id).ok_or_else(|| Error::NoteNotFound(id.to_string()))?;
        Ok(enrich_note(note, &self.annotations, &self.normalization))
    }

    /// Every primary note enriched, in dataset order.
    pub fn list_enriched(&self) -> Vec<EnrichedNote> {
        self.notes
            .iter()
            .map(|note| enrich_note(note, &self.annotations, &self.normalization))
            .collect()
    }

    /// Ranked topic frequency tables over all primary notes.
    pub fn aggregate_topics(&self) -> TopicSummary {
        aggregate(&self.notes, &self.annotations)
    }
}

/// Wrap primary entries, skipping the ones without a string `id`.
///
/// Such an entry can never be fetched or matched to an annotation. Every
/// other field is kept as written, whatever its shape.
fn parse_notes(entries: Vec<JsonValue>) -> Vec<Note> {
    let total = entries.len();
    let notes: Vec<Note> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match Note::from_value(entry) {
            Ok(note) => Some(note),
            Err(e) => {
                warn!(position, error = %e, "Skipping malformed note");
                None
            }
        })
        .collect();

    if notes.len() < total {
        warn!(
            record_count = total,
            skipped_count = total - notes.len(),
            "Primary dataset contained malformed notes"
        );
    }
    notes
}

/// Fetch one enriched note from a fresh catalog.
pub fn fetch_one(source: &dyn DatasetSource, id: &str) -> Result<EnrichedNote> {
    NoteCatalog::load(source).fetch_one(id)
}

/// Topic frequency tables from a fresh catalog.
pub fn aggregate_topics(source: &dyn DatasetSource) -> TopicSummary {
    NoteCatalog::load(source).aggregate_topics()
}
