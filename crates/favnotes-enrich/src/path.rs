//! JSON field paths and fallback chains.
//!
//! Annotation records come in two layouts: task results copied to a direct
//! field (`summary.summary_200`) or left nested under the task
//! (`tasks.summary.result.summary_200`). A [`FallbackChain`] lists the
//! candidate paths in priority order and returns the first one that yields an
//! acceptable value.

use std::fmt;

use serde_json::Value as JsonValue;

/// A path of object keys into a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath {
    segments: &'static [&'static str],
}

impl FieldPath {
    pub const fn new(segments: &'static [&'static str]) -> Self {
        Self { segments }
    }

    /// Walk the path. Missing keys, non-object intermediates and JSON `null`
    /// all resolve to `None`.
    pub fn lookup<'a>(&self, value: &'a JsonValue) -> Option<&'a JsonValue> {
        let found = self
            .segments
            .iter()
            .try_fold(value, |current, key| current.as_object()?.get(*key))?;
        (!found.is_null()).then_some(found)
    }

    /// Walk the path and return a non-empty string.
    pub fn lookup_str<'a>(&self, value: &'a JsonValue) -> Option<&'a str> {
        self.lookup(value)
            .and_then(JsonValue::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Ordered candidate paths tried until one yields an accepted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackChain {
    paths: &'static [FieldPath],
}

impl FallbackChain {
    pub const fn new(paths: &'static [FieldPath]) -> Self {
        Self { paths }
    }

    /// First value along the chain that `accept` approves.
    ///
    /// A path whose value is present but rejected does not stop the search;
    /// the next path is tried.
    pub fn first_match<'a, F>(&self, value: &'a JsonValue, accept: F) -> Option<&'a JsonValue>
    where
        F: Fn(&JsonValue) -> bool,
    {
        self.paths
            .iter()
            .filter_map(|path| path.lookup(value))
            .find(|candidate| accept(*candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DIRECT: FieldPath = FieldPath::new(&["summary", "summary_200"]);
    const NESTED: FieldPath = FieldPath::new(&["tasks", "summary", "result", "summary_200"]);
    const CHAIN: FallbackChain = FallbackChain::new(&[DIRECT, NESTED]);

    #[test]
    fn test_lookup_nested_value() {
        let doc = json!({ "tasks": { "summary": { "result": { "summary_200": "hi" } } } });
        assert_eq!(NESTED.lookup(&doc), Some(&json!("hi")));
        assert_eq!(DIRECT.lookup(&doc), None);
    }

    #[test]
    fn test_lookup_through_non_object_is_none() {
        let doc = json!({ "summary": "flat string" });
        assert_eq!(DIRECT.lookup(&doc), None);

        let doc = json!({ "summary": [1, 2] });
        assert_eq!(DIRECT.lookup(&doc), None);
    }

    #[test]
    fn test_lookup_null_is_none() {
        let doc = json!({ "summary": { "summary_200": null } });
        assert_eq!(DIRECT.lookup(&doc), None);
    }

    #[test]
    fn test_lookup_str_rejects_empty() {
        let doc = json!({ "summary": { "summary_200": "" } });
        assert_eq!(DIRECT.lookup_str(&doc), None);
        assert!(DIRECT.lookup(&doc).is_some());
    }

    #[test]
    fn test_chain_prefers_first_path() {
        let doc = json!({
            "summary": { "summary_200": "direct" },
            "tasks": { "summary": { "result": { "summary_200": "nested" } } }
        });
        assert_eq!(CHAIN.first_match(&doc, |_| true), Some(&json!("direct")));
    }

    #[test]
    fn test_chain_skips_rejected_candidate() {
        let doc = json!({
            "summary": { "summary_200": 42 },
            "tasks": { "summary": { "result": { "summary_200": "nested" } } }
        });
        assert_eq!(
            CHAIN.first_match(&doc, JsonValue::is_string),
            Some(&json!("nested"))
        );
    }

    #[test]
    fn test_chain_no_match() {
        assert_eq!(CHAIN.first_match(&json!({}), |_| true), None);
        assert_eq!(CHAIN.first_match(&json!(null), |_| true), None);
    }

    #[test]
    fn test_display_joins_segments() {
        assert_eq!(NESTED.to_string(), "tasks.summary.result.summary_200");
    }
}
