//! Bundled sample graph for `--test` runs.

use knowledge_graph::Triple;

/// A small self-contained graph, used to exercise the renderer without
/// calling the extraction service.
pub fn sample_triples() -> Vec<Triple> {
    vec![
        Triple::new("marie curie", "discovered", "radium").with_chunk(1),
        Triple::new("marie curie", "discovered", "polonium").with_chunk(1),
        Triple::new("marie curie", "born in", "warsaw").with_chunk(1),
        Triple::new("marie curie", "won", "nobel prize").with_chunk(1),
        Triple::new("marie curie", "married", "pierre curie").with_chunk(2),
        Triple::new("pierre curie", "studied", "magnetism").with_chunk(2),
        Triple::new("pierre curie", "won", "nobel prize").with_chunk(2),
        Triple::new("radium", "used in", "cancer treatment").with_chunk(2),
        Triple::new("ernest rutherford", "pioneered", "nuclear physics").with_chunk(3),
        Triple::new("ernest rutherford", "born in", "new zealand").with_chunk(3),
        Triple::new("nuclear physics", "studies", "radioactivity").with_chunk(3),
        Triple::inferred("marie curie", "contributed to", "radioactivity"),
        Triple::inferred("ernest rutherford", "corresponded with", "marie curie"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use knowledge_graph::{compute_stats, MAX_PREDICATE_WORDS};

    #[test]
    fn test_sample_is_well_formed() {
        let triples = sample_triples();
        for triple in &triples {
            assert!(triple.predicate.split_whitespace().count() <= MAX_PREDICATE_WORDS);
            assert!(!triple.inferred || triple.subject != triple.object);
        }
        // the inferred links tie the sample into one community
        assert_eq!(compute_stats(&triples).communities, 1);
    }
}
