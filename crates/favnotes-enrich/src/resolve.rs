//! Field resolution for annotation records.
//!
//! Every task result may live under a direct field or nested under
//! `tasks.<task>.result`. The direct field wins when both are usable.

use serde_json::{Map, Value as JsonValue};

use favnotes_core::{AiSummary, TopicClassification};

use crate::path::{FallbackChain, FieldPath};

const SUMMARY_DIRECT: FieldPath = FieldPath::new(&["summary", "summary_200"]);
const SUMMARY_NESTED: FieldPath = FieldPath::new(&["tasks", "summary", "result", "summary_200"]);
const KEYWORDS_DIRECT: FieldPath = FieldPath::new(&["keywords", "keywords"]);
const KEYWORDS_NESTED: FieldPath = FieldPath::new(&["tasks", "keywords", "result", "keywords"]);
const TOPICS_DIRECT: FieldPath = FieldPath::new(&["topics"]);
const TOPICS_NESTED: FieldPath = FieldPath::new(&["tasks", "topics", "result"]);

/// Summary text (at most 200 characters as produced upstream).
pub const SUMMARY_CHAIN: FallbackChain = FallbackChain::new(&[SUMMARY_DIRECT, SUMMARY_NESTED]);

/// Extracted keyword list.
pub const KEYWORDS_CHAIN: FallbackChain = FallbackChain::new(&[KEYWORDS_DIRECT, KEYWORDS_NESTED]);

/// Topic classification object.
pub const TOPICS_CHAIN: FallbackChain = FallbackChain::new(&[TOPICS_DIRECT, TOPICS_NESTED]);

fn is_non_empty_string(value: &JsonValue) -> bool {
    value.as_str().is_some_and(|s| !s.is_empty())
}

fn string_list(value: &JsonValue) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(JsonValue::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn label(object: &Map<String, JsonValue>, key: &str) -> Option<String> {
    object.get(key).and_then(JsonValue::as_str).map(str::to_owned)
}

/// Summary and keywords of an annotation record.
///
/// Returns `None` unless there is a non-empty summary or at least one
/// keyword; an annotation with neither never produces an empty placeholder.
pub fn resolve_summary(record: &JsonValue) -> Option<AiSummary> {
    let summary = SUMMARY_CHAIN
        .first_match(record, is_non_empty_string)
        .and_then(JsonValue::as_str)
        .unwrap_or_default();
    let keywords = KEYWORDS_CHAIN
        .first_match(record, JsonValue::is_array)
        .map(string_list)
        .unwrap_or_default();

    if summary.is_empty() && keywords.is_empty() {
        return None;
    }

    Some(AiSummary {
        summary: summary.to_string(),
        keywords,
    })
}

/// Topic classification of an annotation record.
///
/// Only the five classification fields are copied; anything else on the
/// source object is dropped. `subtopics` is copied element for element and
/// defaults to an empty list when missing or not a list.
pub fn resolve_topics(record: &JsonValue) -> Option<TopicClassification> {
    let topics = TOPICS_CHAIN
        .first_match(record, JsonValue::is_object)?
        .as_object()?;

    Some(TopicClassification {
        primary_topic: label(topics, "primary_topic"),
        subtopics: topics
            .get("subtopics")
            .and_then(JsonValue::as_array)
            .cloned()
            .unwrap_or_default(),
        content_intent: label(topics, "content_intent"),
        content_type: label(topics, "content_type"),
        confidence: topics.get("confidence").and_then(JsonValue::as_f64),
    })
}
