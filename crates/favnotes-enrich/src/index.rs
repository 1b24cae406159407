//! Identifier indexes over loosely-typed dataset records.

use std::collections::HashMap;

use serde_json::Value as JsonValue;
use tracing::{debug, trace};

use crate::path::FieldPath;

/// Key of an annotation record.
pub const ANNOTATION_KEY: FieldPath = FieldPath::new(&["note_id"]);

/// Key of a normalization record, nested under its `normalized` wrapper.
pub const NORMALIZATION_KEY: FieldPath = FieldPath::new(&["normalized", "note_id"]);

/// Author link inside a normalization record.
pub const AUTHOR_LINK: FieldPath = FieldPath::new(&["normalized", "author", "author_link"]);

/// Maps a note identifier to its record.
///
/// Records without a non-empty string key are dropped. A later record with
/// the same key replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyIndex {
    entries: HashMap<String, JsonValue>,
}

impl KeyIndex {
    pub fn build(records: Vec<JsonValue>, key: FieldPath) -> Self {
        let total = records.len();
        let mut entries = HashMap::with_capacity(total);
        let mut skipped = 0usize;

        for record in records {
            let Some(id) = key.lookup_str(&record).map(str::to_owned) else {
                skipped += 1;
                continue;
            };
            trace!(note_id = %id, key = %key, "Indexed record");
            entries.insert(id, record);
        }

        debug!(
            key = %key,
            record_count = total,
            indexed_count = entries.len(),
            skipped_count = skipped,
            "Key index built"
        );

        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&JsonValue> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// AI annotation records keyed by `note_id`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationIndex(KeyIndex);

impl AnnotationIndex {
    pub fn build(records: Vec<JsonValue>) -> Self {
        Self(KeyIndex::build(records, ANNOTATION_KEY))
    }

    pub fn get(&self, id: &str) -> Option<&JsonValue> {
        self.0.get(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Author links from normalization records, keyed by `normalized.note_id`.
///
/// Only records carrying a non-empty string link are indexed, so a later
/// record for the same note without a link does not hide an earlier one.
/// Among linked records the last one wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizationIndex {
    links: HashMap<String, String>,
}

impl NormalizationIndex {
    pub fn build(records: Vec<JsonValue>) -> Self {
        let total = records.len();
        let mut links = HashMap::new();
        let mut skipped = 0usize;

        for record in &records {
            let (Some(id), Some(link)) = (
                NORMALIZATION_KEY.lookup_str(record),
                AUTHOR_LINK.lookup_str(record),
            ) else {
                skipped += 1;
                continue;
            };
            trace!(note_id = %id, "Indexed author link");
            links.insert(id.to_string(), link.to_string());
        }

        debug!(
            key = %NORMALIZATION_KEY,
            record_count = total,
            indexed_count = links.len(),
            skipped_count = skipped,
            "Author link index built"
        );

        Self { links }
    }

    /// Derived author link for a note.
    pub fn author_link(&self, id: &str) -> Option<&str> {
        self.links.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_skips_unusable_keys() {
        let index = KeyIndex::build(
            vec![
                json!({ "note_id": "a", "v": 1 }),
                json!({ "note_id": "" }),
                json!({ "note_id": 42 }),
                json!({ "note_id": null }),
                json!({ "other": "x" }),
                json!("not an object"),
                json!(null),
            ],
            ANNOTATION_KEY,
        );
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("a").unwrap()["v"], 1);
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let index = AnnotationIndex::build(vec![
            json!({ "note_id": "a", "v": 1 }),
            json!({ "note_id": "b", "v": 2 }),
            json!({ "note_id": "a", "v": 3 }),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("a").unwrap()["v"], 3);
    }

    #[test]
    fn test_empty_index() {
        let index = AnnotationIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.get("a").is_none());
    }

    #[test]
    fn test_normalization_keyed_by_nested_id() {
        let index = NormalizationIndex::build(vec![
            json!({ "normalized": { "note_id": "a", "author": { "author_link": "https://x/a" } } }),
            json!({ "note_id": "b" }),
            json!({ "error": "boom", "raw_id": "c" }),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.author_link("a"), Some("https://x/a"));
        assert_eq!(index.author_link("b"), None);
    }

    #[test]
    fn test_author_link_must_be_non_empty_string() {
        let index = NormalizationIndex::build(vec![
            json!({ "normalized": { "note_id": "a", "author": { "author_link": null } } }),
            json!({ "normalized": { "note_id": "b", "author": { "author_link": "" } } }),
            json!({ "normalized": { "note_id": "c", "author": { "author_link": 7 } } }),
            json!({ "normalized": { "note_id": "d" } }),
        ]);
        assert!(index.is_empty());
        for id in ["a", "b", "c", "d"] {
            assert_eq!(index.author_link(id), None, "note {}", id);
        }
    }

    #[test]
    fn test_later_record_without_link_keeps_earlier_link() {
        let index = NormalizationIndex::build(vec![
            json!({ "normalized": { "note_id": "a", "author": { "author_link": "https://x/a" } } }),
            json!({ "normalized": { "note_id": "a", "author": { "user_id": "u1" } } }),
            json!({ "normalized": { "note_id": "a", "author": { "author_link": "" } } }),
        ]);
        assert_eq!(index.author_link("a"), Some("https://x/a"));
    }

    #[test]
    fn test_later_linked_record_wins() {
        let index = NormalizationIndex::build(vec![
            json!({ "normalized": { "note_id": "a", "author": { "author_link": "https://old" } } }),
            json!({ "normalized": { "note_id": "a", "author": { "author_link": "https://new" } } }),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.author_link("a"), Some("https://new"));
    }
}
