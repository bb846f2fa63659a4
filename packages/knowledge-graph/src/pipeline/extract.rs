//! Chunk extraction - drive the segmenter, LLM and validator per chunk.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::llm::Llm;
use crate::prompts;
use crate::segmenter::chunk_text;
use crate::types::config::ChunkingConfig;
use crate::types::report::ExtractionReport;
use crate::types::triple::{unique_entities, Triple};
use crate::validator::{extract_json_array, validate_triples};

/// Extract triples from the full text, chunk by chunk.
///
/// Chunks are processed strictly in order and one at a time. A chunk
/// whose call fails, whose response contains no parseable JSON array, or
/// whose array validates to zero triples is skipped with a warning; one
/// chunk's failure never aborts the run. Every surviving triple is
/// stamped with its 1-based chunk index, so chunk *i*'s triples precede
/// chunk *i+1*'s in the aggregate.
///
/// Only a chunking configuration error is fatal here.
pub async fn extract_from_text<L: Llm>(
    llm: &L,
    config: &ChunkingConfig,
    text: &str,
) -> Result<(Vec<Triple>, ExtractionReport)> {
    let chunks = chunk_text(text, config.chunk_size, config.overlap)?;

    info!(
        chunks = chunks.len(),
        chunk_size = config.chunk_size,
        overlap = config.overlap,
        "processing text in chunks"
    );

    let mut triples: Vec<Triple> = Vec::new();
    let mut report = ExtractionReport {
        chunks: chunks.len(),
        ..Default::default()
    };

    for (i, chunk) in chunks.iter().enumerate() {
        let chunk_index = i + 1;
        info!(
            chunk = chunk_index,
            total = chunks.len(),
            words = chunk.split_whitespace().count(),
            "processing chunk"
        );

        let raw = match llm
            .chat(
                prompts::EXTRACTION_SYSTEM_PROMPT,
                &prompts::format_extraction_prompt(chunk),
            )
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(chunk = chunk_index, error = %e, "extraction call failed, skipping chunk");
                report.failed_chunks += 1;
                continue;
            }
        };

        debug!(chunk = chunk_index, response = %raw, "raw extraction response");

        let items = match extract_json_array(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    chunk = chunk_index,
                    error = %e,
                    "expected a JSON array of triples, skipping chunk"
                );
                report.failed_chunks += 1;
                continue;
            }
        };

        let validated = validate_triples(items);
        report.discarded += validated.discarded;

        if validated.triples.is_empty() {
            warn!(chunk = chunk_index, "no valid triples in chunk response");
            report.failed_chunks += 1;
            continue;
        }

        triples.extend(
            validated
                .triples
                .into_iter()
                .map(|t| t.with_chunk(chunk_index)),
        );
    }

    if report.discarded > 0 {
        warn!(
            discarded = report.discarded,
            "filtered invalid triples missing required fields"
        );
    }

    report.triples = triples.len();
    report.entities = unique_entities(&triples).len();
    info!(
        triples = report.triples,
        entities = report.entities,
        "extracted triples from all chunks"
    );

    Ok((triples, report))
}
