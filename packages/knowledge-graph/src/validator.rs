//! Parsing and validation of model output.
//!
//! The collaborator is instructed to return bare JSON but routinely wraps
//! it in commentary or code fences, omits fields, or returns nothing
//! usable. Everything it sends is treated as untrusted input: locate the
//! JSON, parse it, keep what validates, count and drop the rest.

use crate::error::{GraphError, Result};
use crate::types::triple::Triple;
use serde_json::{Map, Value};

/// Hard cap on predicate length, in whitespace-separated tokens.
pub const MAX_PREDICATE_WORDS: usize = 3;

/// Truncate a predicate to its first [`MAX_PREDICATE_WORDS`] tokens.
///
/// Applied to every triple regardless of phase; over-long predicates are
/// shortened, never rejected.
pub fn limit_predicate_length(predicate: &str) -> String {
    predicate
        .split_whitespace()
        .take(MAX_PREDICATE_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Locate and parse the first well-formed JSON array in free-form text.
///
/// Scans for a balanced `[...]` region (string literals respected) and
/// parses it; falls back to the first-`[`-to-last-`]` span, then to the
/// whole input. Fails with [`GraphError::MalformedResponse`] when nothing
/// parses as an array; the caller treats the whole response as failed.
pub fn extract_json_array(raw: &str) -> Result<Vec<Value>> {
    if let Some(values) = parse_as_array(raw.trim()) {
        return Ok(values);
    }
    for span in balanced_spans(raw, '[', ']') {
        if let Some(values) = parse_as_array(span) {
            return Ok(values);
        }
    }
    if let (Some(start), Some(end)) = (raw.find('['), raw.rfind(']')) {
        if start < end {
            if let Some(values) = parse_as_array(&raw[start..=end]) {
                return Ok(values);
            }
        }
    }
    Err(GraphError::MalformedResponse { expected: "array" })
}

/// Locate and parse the first well-formed JSON object in free-form text.
///
/// Same strategy as [`extract_json_array`], for `{...}` payloads (the
/// entity-resolution response shape).
pub fn extract_json_object(raw: &str) -> Result<Map<String, Value>> {
    if let Some(map) = parse_as_object(raw.trim()) {
        return Ok(map);
    }
    for span in balanced_spans(raw, '{', '}') {
        if let Some(map) = parse_as_object(span) {
            return Ok(map);
        }
    }
    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            if let Some(map) = parse_as_object(&raw[start..=end]) {
                return Ok(map);
            }
        }
    }
    Err(GraphError::MalformedResponse { expected: "object" })
}

fn parse_as_array(candidate: &str) -> Option<Vec<Value>> {
    match serde_json::from_str(candidate) {
        Ok(Value::Array(values)) => Some(values),
        _ => None,
    }
}

fn parse_as_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Balanced `open...close` regions, one per occurrence of `open`, in
/// order of appearance. String literals are respected within each scan;
/// candidates that start inside a literal simply fail to parse and the
/// caller moves on to the next one.
fn balanced_spans<'a>(
    raw: &'a str,
    open: char,
    close: char,
) -> impl Iterator<Item = &'a str> + 'a {
    raw.char_indices()
        .filter(move |(_, c)| *c == open)
        .filter_map(move |(start, _)| balanced_span_from(raw, start, open, close))
}

fn balanced_span_from(raw: &str, start: usize, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(&raw[start..start + i + c.len_utf8()]);
            }
        }
    }
    None
}

/// Outcome of validating parsed triple candidates.
#[derive(Debug, Clone, Default)]
pub struct ValidatedTriples {
    /// Triples that passed validation, predicate already capped
    pub triples: Vec<Triple>,

    /// Items dropped for not being a mapping with non-empty
    /// subject/predicate/object strings
    pub discarded: usize,
}

/// Filter parsed items down to well-formed triples.
///
/// An item survives only if it is a mapping whose `subject`, `predicate`
/// and `object` are non-empty strings. Subject and object are trimmed
/// and case-folded (entity identity is the folded string); the predicate
/// is trimmed and capped at [`MAX_PREDICATE_WORDS`]. Any extra keys the
/// collaborator attached are dropped, not propagated.
pub fn validate_triples(items: Vec<Value>) -> ValidatedTriples {
    let mut result = ValidatedTriples::default();

    for item in items {
        let Some(map) = item.as_object() else {
            result.discarded += 1;
            continue;
        };
        let (Some(subject), Some(predicate), Some(object)) = (
            non_empty_str(map, "subject"),
            non_empty_str(map, "predicate"),
            non_empty_str(map, "object"),
        ) else {
            result.discarded += 1;
            continue;
        };

        result.triples.push(Triple::new(
            subject.to_lowercase(),
            limit_predicate_length(predicate),
            object.to_lowercase(),
        ));
    }

    result
}

fn non_empty_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predicate_cap_truncates_to_three_tokens() {
        assert_eq!(
            limit_predicate_length("relates to quite strongly indeed"),
            "relates to quite"
        );
        assert_eq!(limit_predicate_length("uses"), "uses");
        assert_eq!(limit_predicate_length("  is   part of  "), "is part of");
    }

    #[test]
    fn test_extracts_array_from_commentary() {
        let raw = r#"Sure! Here are the triples you asked for:
[{"subject": "a", "predicate": "uses", "object": "b"}]
Let me know if you need anything else."#;
        let values = extract_json_array(raw).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0]["subject"], "a");
    }

    #[test]
    fn test_extracts_array_from_code_fence() {
        let raw = "```json\n[{\"subject\": \"a\", \"predicate\": \"p\", \"object\": \"b\"}]\n```";
        let values = extract_json_array(raw).unwrap();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_brackets_inside_strings_do_not_confuse_scan() {
        let raw = r#"note [not json] then [{"subject": "a [x]", "predicate": "p", "object": "b"}]"#;
        let values = extract_json_array(raw).unwrap();
        assert_eq!(values[0]["subject"], "a [x]");
    }

    #[test]
    fn test_non_json_fails_with_format_error() {
        let err = extract_json_array("not json at all").unwrap_err();
        assert!(matches!(
            err,
            GraphError::MalformedResponse { expected: "array" }
        ));
    }

    #[test]
    fn test_extracts_object_from_commentary() {
        let raw = r#"The groups are: {"ai": ["ai", "artificial intelligence"]} as requested."#;
        let map = extract_json_object(raw).unwrap();
        assert!(map.contains_key("ai"));
    }

    #[test]
    fn test_validate_keeps_only_complete_triples() {
        let items = vec![
            json!({"subject": "a", "predicate": "uses", "object": "b"}),
            json!({"subject": "a", "predicate": "uses"}),       // missing object
            json!({"subject": "", "predicate": "p", "object": "b"}), // empty subject
            json!({"subject": "a", "predicate": "p", "object": 7}),  // non-string object
            json!("not a mapping"),
        ];
        let validated = validate_triples(items);
        assert_eq!(validated.triples.len(), 1);
        assert_eq!(validated.discarded, 4);
    }

    #[test]
    fn test_validate_folds_case_and_caps_predicate() {
        let items = vec![json!({
            "subject": "Marie Curie",
            "predicate": "relates to quite strongly indeed",
            "object": "RADIUM",
            "confidence": 0.9
        })];
        let validated = validate_triples(items);
        let triple = &validated.triples[0];
        assert_eq!(triple.subject, "marie curie");
        assert_eq!(triple.predicate, "relates to quite");
        assert_eq!(triple.object, "radium");
        assert_eq!(validated.discarded, 0);
    }
}
