//! Word-window text segmentation with overlap.
//!
//! Relations spanning a chunk boundary get a second chance to be captured
//! by the overlapping window; duplicates across overlapping chunks are
//! accepted downstream rather than deduplicated.

use crate::error::{GraphError, Result};

/// Split text into overlapping word-count-bounded chunks.
///
/// Chunk *i+1* starts `chunk_size - overlap` words after chunk *i*; the
/// last chunk may be shorter than `chunk_size`. Words are
/// whitespace-delimited; each chunk is the words re-joined with single
/// spaces. Empty input yields no chunks.
///
/// Requires `overlap < chunk_size` (and a nonzero `chunk_size`);
/// violating that would never advance, so it is rejected as a
/// configuration error instead.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
    if chunk_size == 0 || overlap >= chunk_size {
        return Err(GraphError::InvalidChunking {
            chunk_size,
            overlap,
        });
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let step = chunk_size - overlap;
    let chunks = (0..words.len())
        .step_by(step)
        .map(|start| {
            let end = (start + chunk_size).min(words.len());
            words[start..end].join(" ")
        })
        .collect();

    Ok(chunks)
}
