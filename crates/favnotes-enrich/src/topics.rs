//! Topic frequency aggregation.

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::Value as JsonValue;
use tracing::debug;

use favnotes_core::{FrequencyEntry, Note, TopicSummary};

use crate::index::AnnotationIndex;
use crate::resolve::resolve_topics;

/// Occurrence counts per category label.
#[derive(Debug, Clone, Default)]
pub struct FrequencyCounter {
    counts: HashMap<String, u64>,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `label`.
    pub fn add(&mut self, label: &str) {
        *self.counts.entry(label.to_string()).or_insert(0) += 1;
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Ranked table: count descending, then label ascending by code point.
    pub fn into_table(self) -> Vec<FrequencyEntry> {
        let mut table: Vec<FrequencyEntry> = self
            .counts
            .into_iter()
            .map(|(name, count)| FrequencyEntry { name, count })
            .collect();
        table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        table
    }
}

/// Label text of a subtopic element. Non-string elements count under their
/// JSON text.
fn subtopic_label(value: &JsonValue) -> Cow<'_, str> {
    match value {
        JsonValue::String(label) => Cow::Borrowed(label),
        other => Cow::Owned(other.to_string()),
    }
}

fn non_empty(label: &Option<String>) -> Option<&str> {
    label.as_deref().filter(|label| !label.is_empty())
}

/// Count primary topics, subtopics, intents and content types across notes.
///
/// Notes without an annotation record or without a topic classification are
/// skipped. Empty primary, intent and type labels are not counted. Every
/// element of a note's subtopic list counts once toward its own bucket.
pub fn aggregate(notes: &[Note], annotations: &AnnotationIndex) -> TopicSummary {
    let mut primary = FrequencyCounter::new();
    let mut subtopics = FrequencyCounter::new();
    let mut intents = FrequencyCounter::new();
    let mut types = FrequencyCounter::new();
    let mut classified = 0usize;

    for note in notes {
        let Some(topics) = annotations.get(note.id()).and_then(resolve_topics) else {
            continue;
        };
        classified += 1;

        if let Some(label) = non_empty(&topics.primary_topic) {
            primary.add(label);
        }
        for element in &topics.subtopics {
            subtopics.add(&subtopic_label(element));
        }
        if let Some(label) = non_empty(&topics.content_intent) {
            intents.add(label);
        }
        if let Some(label) = non_empty(&topics.content_type) {
            types.add(label);
        }
    }

    debug!(
        note_count = notes.len(),
        classified_count = classified,
        primary_labels = primary.len(),
        subtopic_labels = subtopics.len(),
        "Topic aggregation complete"
    );

    TopicSummary {
        primary: primary.into_table(),
        subtopics: subtopics.into_table(),
        intents: intents.into_table(),
        types: types.into_table(),
    }
}
