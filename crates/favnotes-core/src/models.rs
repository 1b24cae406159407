//! Data model for collected notes and their enrichment.
//!
//! Notes are produced by an external collection process and are loosely
//! shaped: counts may be strings or numbers, media fields may be `null`,
//! platforms add fields of their own. A [`Note`] therefore keeps its source
//! object verbatim and only requires a string `id`. Enrichment is an overlay
//! applied when an [`EnrichedNote`] is serialized; the source fields are
//! never rewritten.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};

/// Identifier key of a primary note.
pub const NOTE_ID_KEY: &str = "id";

/// Note key holding the author object.
pub const AUTHOR_INFO_KEY: &str = "author_info";

/// Author key holding the profile link.
pub const AUTHOR_LINK_KEY: &str = "author_link";

/// Note key of the attached summary.
pub const AI_SUMMARY_KEY: &str = "ai_summary";

/// Note key of the attached topic classification.
pub const AI_TOPICS_KEY: &str = "ai_topics";

// =============================================================================
// NOTE
// =============================================================================

/// A collected social-media note from the primary dataset.
///
/// Serializes back to exactly the source object.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    id: String,
    fields: Map<String, JsonValue>,
}

impl Note {
    /// Wrap a primary dataset entry.
    ///
    /// Fails with [`Error::InvalidInput`] unless the entry is an object with
    /// a string `id`. No other field is inspected.
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let JsonValue::Object(fields) = value else {
            return Err(Error::InvalidInput("note entry is not an object".to_string()));
        };
        let Some(id) = fields
            .get(NOTE_ID_KEY)
            .and_then(JsonValue::as_str)
            .map(str::to_owned)
        else {
            return Err(Error::InvalidInput("note entry has no string id".to_string()));
        };
        Ok(Self { id, fields })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Source value of a top-level field, `null` included.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }
}

impl Serialize for Note {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.fields.serialize(serializer)
    }
}

// =============================================================================
// AI ENRICHMENT
// =============================================================================

/// AI-generated summary and keywords for a note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiSummary {
    pub summary: String,
    pub keywords: Vec<String>,
}

/// AI topic classification for a note. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicClassification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_topic: Option<String>,
    /// Subtopic labels as the annotator wrote them.
    #[serde(default)]
    pub subtopics: Vec<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Model confidence in 0..=1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A note merged with its AI annotation and normalized author link.
///
/// Serializes as the source note with `ai_summary`, `ai_topics` and
/// `author_info.author_link` overlaid when present. A source key of the same
/// name is replaced, never duplicated; when an overlay is absent the source
/// key passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedNote {
    pub note: Note,
    pub ai_summary: Option<AiSummary>,
    pub ai_topics: Option<TopicClassification>,
    pub author_link: Option<String>,
}

impl From<Note> for EnrichedNote {
    fn from(note: Note) -> Self {
        Self {
            note,
            ai_summary: None,
            ai_topics: None,
            author_link: None,
        }
    }
}

impl EnrichedNote {
    /// Source author object with the link set. A missing or non-object
    /// author becomes an object holding only the link.
    fn linked_author(&self, link: &str) -> Map<String, JsonValue> {
        let mut author = match self.note.get(AUTHOR_INFO_KEY) {
            Some(JsonValue::Object(author)) => author.clone(),
            _ => Map::new(),
        };
        author.insert(
            AUTHOR_LINK_KEY.to_string(),
            JsonValue::String(link.to_string()),
        );
        author
    }
}

impl Serialize for EnrichedNote {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.note.fields {
            let overlaid = match key.as_str() {
                AI_SUMMARY_KEY => self.ai_summary.is_some(),
                AI_TOPICS_KEY => self.ai_topics.is_some(),
                AUTHOR_INFO_KEY => self.author_link.is_some(),
                _ => false,
            };
            if !overlaid {
                map.serialize_entry(key, value)?;
            }
        }
        if let Some(summary) = &self.ai_summary {
            map.serialize_entry(AI_SUMMARY_KEY, summary)?;
        }
        if let Some(topics) = &self.ai_topics {
            map.serialize_entry(AI_TOPICS_KEY, topics)?;
        }
        if let Some(link) = &self.author_link {
            map.serialize_entry(AUTHOR_INFO_KEY, &self.linked_author(link))?;
        }
        map.end()
    }
}

// =============================================================================
// AGGREGATION
// =============================================================================

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub name: String,
    pub count: u64,
}

impl FrequencyEntry {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Ranked frequency tables over the four topic dimensions.
///
/// Each table is sorted by descending count, ties broken by ascending label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub primary: Vec<FrequencyEntry>,
    pub subtopics: Vec<FrequencyEntry>,
    pub intents: Vec<FrequencyEntry>,
    pub types: Vec<FrequencyEntry>,
}

impl TopicSummary {
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
            && self.subtopics.is_empty()
            && self.intents.is_empty()
            && self.types.is_empty()
    }
}

// =============================================================================
// DATASETS
// =============================================================================

/// The three named JSON documents favnotes reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Collected note details (primary dataset).
    Details,
    /// AI annotation results.
    AiProcessed,
    /// Normalization results.
    Normalized,
}

impl DatasetKind {
    /// File name of the document on disk.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Details => crate::defaults::DETAILS_FILE,
            Self::AiProcessed => crate::defaults::AI_PROCESSED_FILE,
            Self::Normalized => crate::defaults::NORMALIZED_FILE,
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Details => write!(f, "details"),
            Self::AiProcessed => write!(f, "ai_processed"),
            Self::Normalized => write!(f, "normalized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_note_json() -> JsonValue {
        json!({
            "id": "66a0c1f2000000000503a1b2",
            "title": "周末露营清单",
            "desc": "带上这些就够了",
            "author_info": {
                "user_id": "5f1e",
                "username": "山野",
                "avatar": "https://sns-avatar/1.jpg",
                "xsec_token": "ABxyz"
            },
            "tags": ["露营", "户外"],
            "date": 1721800000000u64,
            "ip_zh": "浙江",
            "comment_num": "12",
            "statistic": { "like_num": "1.2万", "collect_num": "3456", "chat_num": "12" },
            "images": ["https://img/1.webp"],
            "video": null,
            "timestamp": "2024-07-24T05:46:40Z",
            "xsec_token": "note-token"
        })
    }

    #[test]
    fn test_note_keeps_source_object() {
        let note = Note::from_value(sample_note_json()).unwrap();
        assert_eq!(note.id(), "66a0c1f2000000000503a1b2");
        assert_eq!(note.get("video"), Some(&JsonValue::Null));
        assert_eq!(note.get("xsec_token"), Some(&json!("note-token")));
        assert_eq!(serde_json::to_value(&note).unwrap(), sample_note_json());
    }

    #[test]
    fn test_note_accepts_loosely_typed_fields() {
        let entry = json!({
            "id": "n1",
            "author_info": { "user_id": 12345 },
            "tags": "露营",
            "date": "2024-07-24",
            "comment_num": 7,
            "statistic": { "like_num": 120, "collect_num": true }
        });
        let note = Note::from_value(entry.clone()).unwrap();
        assert_eq!(serde_json::to_value(&note).unwrap(), entry);
    }

    #[test]
    fn test_note_requires_string_id() {
        for entry in [
            json!({ "title": "no id" }),
            json!({ "id": 42 }),
            json!({ "id": null }),
            json!("n1"),
            json!(null),
        ] {
            let err = Note::from_value(entry).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
        }
    }

    #[test]
    fn test_enriched_note_without_overlays_is_source() {
        let note = Note::from_value(sample_note_json()).unwrap();
        let out = serde_json::to_value(EnrichedNote::from(note)).unwrap();
        assert_eq!(out, sample_note_json());
        assert!(out.get("ai_summary").is_none());
        assert!(out.get("note").is_none());
    }

    #[test]
    fn test_overlay_replaces_existing_keys_once() {
        let note = Note::from_value(json!({
            "id": "n1",
            "ai_summary": "stale",
            "ai_topics": { "primary_topic": "stale" }
        }))
        .unwrap();
        let enriched = EnrichedNote {
            ai_summary: Some(AiSummary {
                summary: "fresh".to_string(),
                keywords: vec![],
            }),
            ..EnrichedNote::from(note)
        };

        let text = serde_json::to_string(&enriched).unwrap();
        assert_eq!(text.matches("\"ai_summary\"").count(), 1);
        let out: JsonValue = serde_json::from_str(&text).unwrap();
        assert_eq!(out["ai_summary"], json!({ "summary": "fresh", "keywords": [] }));
        // no topics resolved, so the source key passes through
        assert_eq!(out["ai_topics"], json!({ "primary_topic": "stale" }));
    }

    #[test]
    fn test_author_link_overlay_keeps_author_fields() {
        let note = Note::from_value(sample_note_json()).unwrap();
        let enriched = EnrichedNote {
            author_link: Some("https://profile/5f1e".to_string()),
            ..EnrichedNote::from(note)
        };
        let out = serde_json::to_value(&enriched).unwrap();

        let mut expected = sample_note_json();
        expected["author_info"]["author_link"] = json!("https://profile/5f1e");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_author_link_overlay_replaces_non_object_author() {
        for author in [json!(null), json!("山野")] {
            let note = Note::from_value(json!({ "id": "n1", "author_info": author })).unwrap();
            let enriched = EnrichedNote {
                author_link: Some("https://x".to_string()),
                ..EnrichedNote::from(note)
            };
            let out = serde_json::to_value(&enriched).unwrap();
            assert_eq!(out["author_info"], json!({ "author_link": "https://x" }));
        }
    }

    #[test]
    fn test_topic_classification_serialization() {
        let topics = TopicClassification {
            primary_topic: Some("旅行".to_string()),
            subtopics: vec![],
            content_intent: None,
            content_type: Some("清单".to_string()),
            confidence: None,
        };
        let out = serde_json::to_value(&topics).unwrap();
        assert_eq!(
            out,
            json!({ "primary_topic": "旅行", "subtopics": [], "content_type": "清单" })
        );
    }

    #[test]
    fn test_topic_summary_is_empty() {
        let mut summary = TopicSummary::default();
        assert!(summary.is_empty());
        summary.types.push(FrequencyEntry::new("教程", 1));
        assert!(!summary.is_empty());
    }

    #[test]
    fn test_dataset_kind_file_names() {
        assert_eq!(
            DatasetKind::Details.file_name(),
            "favorite_notes_details.json"
        );
        assert_eq!(
            DatasetKind::AiProcessed.file_name(),
            "favorite_notes_ai_processed.json"
        );
        assert_eq!(
            DatasetKind::Normalized.file_name(),
            "favorite_notes_normalized.json"
        );
        assert_eq!(DatasetKind::AiProcessed.to_string(), "ai_processed");
    }
}
