//! Brute-force nearest-neighbor search over the restricted vocabulary.
//!
//! Every query scans the full vocabulary: O(|vocabulary| * D). This is the
//! dominant cost of a simplification run and the reason the processor batches
//! tokens across threads. No index is built.

use crate::embeddings::store::WordVectors;
use crate::embeddings::vocabulary::RestrictedVocabulary;

/// Errors from the similarity scan.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Cosine similarity between two equal-length vectors.
///
/// Returns 0.0 when either vector has zero norm, so degenerate vectors
/// produce a fixed value instead of NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a < f32::EPSILON || norm_b < f32::EPSILON {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot / (norm_a * norm_b)
}

/// Find the vocabulary word whose vector is most similar to `query`.
///
/// Candidates are scanned in vocabulary (word-list) order with a
/// strictly-greater comparison, so ties keep the earliest listed word.
/// Zero-norm candidates are skipped and can never win; a zero-norm query
/// returns `None`. An empty vocabulary returns `None`.
pub fn find_nearest<'v>(
    query: &[f32],
    vocabulary: &'v RestrictedVocabulary,
) -> Result<Option<&'v str>, SearchError> {
    if query.len() != vocabulary.dimensions() {
        return Err(SearchError::DimensionMismatch {
            expected: vocabulary.dimensions(),
            got: query.len(),
        });
    }

    if l2_norm(query) < f32::EPSILON {
        return Ok(None);
    }

    let mut best: Option<&str> = None;
    let mut best_score = f32::NEG_INFINITY;

    for (word, vector) in vocabulary.iter() {
        if l2_norm(vector) < f32::EPSILON {
            continue;
        }

        let score = cosine_similarity(query, vector);
        if score > best_score {
            best_score = score;
            best = Some(word);
        }
    }

    Ok(best)
}

fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}
