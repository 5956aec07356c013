//! Per-word substitution policy.

use crate::embeddings::{find_nearest, RestrictedVocabulary, SearchError, WordVectors};

/// Decide the output word for a single input word.
///
/// The step order is significant:
///
/// 1. A word already in the restricted vocabulary is returned unchanged,
///    before any similarity work.
/// 2. A word with no embedding in the source store is returned unchanged;
///    unknown words are passed through, never fabricated.
/// 3. Otherwise the nearest vocabulary word wins; an empty scan result
///    falls back to the input word.
pub fn substitute<'a>(
    word: &'a str,
    source: &impl WordVectors,
    vocabulary: &'a RestrictedVocabulary,
) -> Result<&'a str, SearchError> {
    if vocabulary.contains(word) {
        return Ok(word);
    }

    let Some(query) = source.embedding(word) else {
        return Ok(word);
    };

    Ok(find_nearest(query, vocabulary)?.unwrap_or(word))
}
