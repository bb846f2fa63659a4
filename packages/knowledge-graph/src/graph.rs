//! Entity co-occurrence graph and graph statistics.
//!
//! Vertices are entities, edges are triples with predicate direction
//! ignored. "Communities" are plain connected components: that is the
//! granularity the inference prompts reason about ("disconnected
//! communities"), so no modularity-based clustering is used.

use crate::types::triple::Triple;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use serde::Serialize;
use std::collections::HashMap;

/// Undirected multigraph over the entities of a triple set.
pub struct EntityGraph {
    graph: UnGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl EntityGraph {
    /// Build the graph from the current triple set.
    ///
    /// One vertex per distinct entity, one edge per triple (duplicates
    /// included; this is a multigraph).
    pub fn from_triples(triples: &[Triple]) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut indices: HashMap<String, NodeIndex> = HashMap::new();

        for triple in triples {
            let subject = Self::intern(&mut graph, &mut indices, &triple.subject);
            let object = Self::intern(&mut graph, &mut indices, &triple.object);
            graph.add_edge(subject, object, ());
        }

        Self { graph, indices }
    }

    fn intern(
        graph: &mut UnGraph<String, ()>,
        indices: &mut HashMap<String, NodeIndex>,
        entity: &str,
    ) -> NodeIndex {
        *indices
            .entry(entity.to_string())
            .or_insert_with(|| graph.add_node(entity.to_string()))
    }

    /// Number of distinct entities.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges (total triples, duplicates included).
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether two entities share a direct edge.
    pub fn directly_connected(&self, a: &str, b: &str) -> bool {
        match (self.indices.get(a), self.indices.get(b)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Connected components, largest first.
    ///
    /// Each component lists its member entities sorted alphabetically;
    /// components of equal size are ordered by their first member, so
    /// the result is deterministic for a given triple set.
    pub fn communities(&self) -> Vec<Vec<String>> {
        let mut union_find = UnionFind::new(self.graph.node_count());
        for edge in self.graph.edge_indices() {
            if let Some((a, b)) = self.graph.edge_endpoints(edge) {
                union_find.union(a.index(), b.index());
            }
        }

        let mut components: HashMap<usize, Vec<String>> = HashMap::new();
        for node in self.graph.node_indices() {
            components
                .entry(union_find.find(node.index()))
                .or_default()
                .push(self.graph[node].clone());
        }

        let mut communities: Vec<Vec<String>> = components.into_values().collect();
        for community in &mut communities {
            community.sort();
        }
        communities.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));
        communities
    }
}

/// The externally reported summary triad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Distinct standardized entities
    pub nodes: usize,

    /// Total triples, extracted and inferred, duplicates included
    pub edges: usize,

    /// Connected components of the final graph
    pub communities: usize,
}

/// Compute final statistics for a triple set.
pub fn compute_stats(triples: &[Triple]) -> GraphStats {
    let graph = EntityGraph::from_triples(triples);
    GraphStats {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        communities: graph.communities().len(),
    }
}
