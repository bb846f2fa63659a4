//! The triple record, the atomic unit of the knowledge graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A subject–predicate–object assertion.
///
/// `chunk` records which 1-based input chunk the triple was extracted
/// from; inferred triples carry no chunk. Collaborator-supplied extra
/// keys are dropped at validation time, so this shape is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,

    /// 1-based index of the origin chunk; absent for inferred triples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk: Option<usize>,

    /// True when proposed by relationship inference rather than extracted.
    #[serde(default, skip_serializing_if = "is_false")]
    pub inferred: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Triple {
    /// Create an extracted (non-inferred) triple.
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            chunk: None,
            inferred: false,
        }
    }

    /// Tag with the 1-based origin chunk index.
    pub fn with_chunk(mut self, chunk: usize) -> Self {
        self.chunk = Some(chunk);
        self
    }

    /// Create an inferred triple (no origin chunk).
    pub fn inferred(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            chunk: None,
            inferred: true,
        }
    }
}

/// The distinct entities named by a triple set, sorted.
///
/// Entities are derived, not stored: an entity exists exactly when some
/// triple names it as subject or object.
pub fn unique_entities(triples: &[Triple]) -> BTreeSet<String> {
    let mut entities = BTreeSet::new();
    for triple in triples {
        entities.insert(triple.subject.clone());
        entities.insert(triple.object.clone());
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_omits_absent_fields() {
        let extracted = Triple::new("a", "uses", "b").with_chunk(3);
        let json = serde_json::to_value(&extracted).unwrap();
        assert_eq!(json["chunk"], 3);
        assert!(json.get("inferred").is_none());

        let inferred = Triple::inferred("a", "relates to", "c");
        let json = serde_json::to_value(&inferred).unwrap();
        assert!(json.get("chunk").is_none());
        assert_eq!(json["inferred"], true);
    }

    #[test]
    fn test_deserialization_defaults() {
        let triple: Triple =
            serde_json::from_str(r#"{"subject":"a","predicate":"uses","object":"b"}"#).unwrap();
        assert_eq!(triple.chunk, None);
        assert!(!triple.inferred);
    }

    #[test]
    fn test_unique_entities() {
        let triples = vec![
            Triple::new("a", "uses", "b"),
            Triple::new("b", "contains", "c"),
            Triple::new("a", "knows", "c"),
        ];
        let entities = unique_entities(&triples);
        assert_eq!(
            entities.into_iter().collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
    }
}
