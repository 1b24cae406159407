//! Note enrichment.

use tracing::trace;

use favnotes_core::{EnrichedNote, Note};

use crate::index::{AnnotationIndex, NormalizationIndex};
use crate::resolve::{resolve_summary, resolve_topics};

/// First note with the given identifier, in dataset order.
///
/// Identifiers are compared exactly.
pub fn find_note<'a>(notes: &'a [Note], id: &str) -> Option<&'a Note> {
    notes.iter().find(|note| note.id() == id)
}

/// Merge a note with its annotation and normalization records.
///
/// Attaches `ai_summary` and `ai_topics` when the annotation yields them and
/// the author link when normalization provides one. The two lookups are
/// independent. The source note itself is carried unchanged.
pub fn enrich_note(
    note: &Note,
    annotations: &AnnotationIndex,
    normalization: &NormalizationIndex,
) -> EnrichedNote {
    let mut enriched = EnrichedNote::from(note.clone());

    if let Some(record) = annotations.get(note.id()) {
        enriched.ai_summary = resolve_summary(record);
        enriched.ai_topics = resolve_topics(record);
        trace!(
            note_id = %note.id(),
            has_summary = enriched.ai_summary.is_some(),
            has_topics = enriched.ai_topics.is_some(),
            "Annotation attached"
        );
    }

    if let Some(link) = normalization.author_link(note.id()) {
        enriched.author_link = Some(link.to_string());
        trace!(note_id = %note.id(), "Author link attached");
    }

    enriched
}
