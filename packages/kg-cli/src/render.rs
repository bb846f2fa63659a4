//! Graph rendering: interactive HTML plus a raw-data JSON sidecar.
//!
//! The HTML file embeds the graph into a vis-network page; the sidecar
//! holds the final triple list under the same base name so a graph can
//! be reused without re-running extraction.

use anyhow::{Context, Result};
use knowledge_graph::{compute_stats, EntityGraph, GraphStats, Triple};
use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

const HTML_TEMPLATE: &str = include_str!("template.html");

/// Render the triple list as an interactive HTML page.
///
/// Nodes are colored by community; inferred edges are dashed. Returns
/// the final statistics triad for the run summary.
pub fn render_html(triples: &[Triple], output: &Path) -> Result<GraphStats> {
    let stats = compute_stats(triples);

    // entity -> community index, for node coloring
    let communities = EntityGraph::from_triples(triples).communities();
    let mut community_of: HashMap<&str, usize> = HashMap::new();
    for (index, community) in communities.iter().enumerate() {
        for entity in community {
            community_of.insert(entity.as_str(), index);
        }
    }

    let mut entities: Vec<&str> = community_of.keys().copied().collect();
    entities.sort();

    let nodes: Vec<serde_json::Value> = entities
        .iter()
        .map(|entity| {
            json!({
                "id": entity,
                "label": entity,
                "group": community_of[entity],
            })
        })
        .collect();

    let edges: Vec<serde_json::Value> = triples
        .iter()
        .map(|t| {
            json!({
                "from": t.subject,
                "to": t.object,
                "label": t.predicate,
                "dashes": t.inferred,
                "arrows": "to",
            })
        })
        .collect();

    let page = HTML_TEMPLATE
        .replace("__NODES__", &serde_json::to_string(&nodes)?)
        .replace("__EDGES__", &serde_json::to_string(&edges)?)
        .replace("__NODE_COUNT__", &stats.nodes.to_string())
        .replace("__EDGE_COUNT__", &stats.edges.to_string())
        .replace("__COMMUNITY_COUNT__", &stats.communities.to_string());

    std::fs::write(output, page)
        .with_context(|| format!("failed to write visualization to {}", output.display()))?;
    info!(path = %output.display(), "wrote HTML visualization");

    Ok(stats)
}

/// Sidecar path: same base name as the HTML output, `.json` extension.
pub fn json_sidecar_path(html_path: &Path) -> PathBuf {
    html_path.with_extension("json")
}

/// Write the raw final triple list next to the HTML output.
pub fn write_json_sidecar(triples: &[Triple], html_path: &Path) -> Result<PathBuf> {
    let path = json_sidecar_path(html_path);
    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, triples)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "saved raw knowledge graph data");
    Ok(path)
}
