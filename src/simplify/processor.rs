//! Concurrent batch text processor.
//!
//! Tokenizes input on whitespace, partitions the tokens into fixed-size
//! batches and fans the batches out over a rayon pool, one task per batch.
//! The stores are read-only after load, so tasks share them without locking.
//! The fallible collect preserves batch order, so output token `i` always
//! corresponds to input token `i` no matter which batch finishes first.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;

use crate::embeddings::{EmbeddingStore, RestrictedVocabulary, SearchError};
use crate::simplify::substitute;

/// Errors that abort a processing run. No partial output survives one.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Split text into whitespace-delimited tokens, preserving order.
///
/// Runs of whitespace collapse and empty tokens never materialize.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

/// Batch processor applying [`substitute`] to every token of an input.
pub struct TextSimplifier {
    source: Arc<EmbeddingStore>,
    vocabulary: Arc<RestrictedVocabulary>,
    batch_size: usize,
    pool: rayon::ThreadPool,
}

impl TextSimplifier {
    /// Create a processor over shared, already-loaded stores.
    ///
    /// `max_threads` caps concurrent workers; 0 lets the runtime pick.
    pub fn new(
        source: Arc<EmbeddingStore>,
        vocabulary: Arc<RestrictedVocabulary>,
        batch_size: usize,
        max_threads: usize,
    ) -> Result<Self, ProcessingError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads)
            .build()?;

        Ok(Self {
            source,
            vocabulary,
            batch_size: batch_size.max(1),
            pool,
        })
    }

    /// Substitute every token, preserving input order and length.
    ///
    /// Batches run concurrently with no dependency between them; any batch
    /// error aborts the whole call.
    pub fn process_tokens(&self, tokens: &[String]) -> Result<Vec<String>, ProcessingError> {
        let batches: Vec<&[String]> = tokens.chunks(self.batch_size).collect();
        log::debug!(
            "processing {} tokens in {} batches",
            tokens.len(),
            batches.len()
        );

        let results: Result<Vec<Vec<String>>, ProcessingError> = self.pool.install(|| {
            batches
                .par_iter()
                .map(|batch| self.process_batch(batch))
                .collect()
        });

        let mut output = Vec::with_capacity(tokens.len());
        for batch in results? {
            output.extend(batch);
        }
        Ok(output)
    }

    /// Tokenize `input`, substitute, and write the space-joined result to
    /// `output`.
    ///
    /// The output file is written via a temp file and renamed into place, so
    /// a failed run leaves any existing output untouched.
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<(), ProcessingError> {
        let text = fs::read_to_string(input)?;
        let tokens = tokenize(&text);
        let processed = self.process_tokens(&tokens)?;

        let temp_path = output.with_extension("tmp");
        fs::write(&temp_path, processed.join(" "))?;
        fs::rename(&temp_path, output)?;

        log::info!(
            "wrote {} tokens to {}",
            processed.len(),
            output.display()
        );
        Ok(())
    }

    fn process_batch(&self, batch: &[String]) -> Result<Vec<String>, ProcessingError> {
        batch
            .iter()
            .map(|word| {
                substitute(word, &*self.source, &self.vocabulary)
                    .map(str::to_owned)
                    .map_err(ProcessingError::from)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn stores() -> (Arc<EmbeddingStore>, Arc<RestrictedVocabulary>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();

        let vectors: HashMap<String, Vec<f32>> = [
            ("dog", vec![1.0, 0.0]),
            ("puppy", vec![0.95, 0.05]),
            ("xyz", vec![0.0, 1.0]),
            ("fish", vec![-0.1, 0.9]),
        ]
        .into_iter()
        .map(|(w, v)| (w.to_string(), v))
        .collect();
        let source = Arc::new(EmbeddingStore::from_entries(vectors, 2));

        let list_path = dir.path().join("words.txt");
        let mut list = std::fs::File::create(&list_path).unwrap();
        list.write_all(b"dog\nfish\n").unwrap();
        drop(list);
        let vocab = Arc::new(RestrictedVocabulary::load(&list_path, &*source).unwrap());

        (source, vocab, dir)
    }

    fn simplifier(batch_size: usize) -> (TextSimplifier, tempfile::TempDir) {
        let (source, vocab, dir) = stores();
        (
            TextSimplifier::new(source, vocab, batch_size, 0).unwrap(),
            dir,
        )
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(
            tokenize("  one\ttwo \n three  "),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn test_output_length_equals_input_length() {
        let (simplifier, _dir) = simplifier(3);
        let tokens = tokenize("puppy xyz unknownword dog fish puppy extra");

        let output = simplifier.process_tokens(&tokens).unwrap();
        assert_eq!(output.len(), tokens.len());
    }

    #[test]
    fn test_order_preserved_across_batch_sizes() {
        // sequential reference: batch size >= input length
        let tokens = tokenize("puppy xyz unknownword dog fish puppy another");
        let (reference, _dir) = simplifier(tokens.len());
        let expected = reference.process_tokens(&tokens).unwrap();

        // batch size 1, exactly the size, and size+1 must all agree
        for batch_size in [1, tokens.len(), tokens.len() + 1] {
            let (simplifier, _dir) = simplifier(batch_size);
            let output = simplifier.process_tokens(&tokens).unwrap();
            assert_eq!(output, expected, "batch_size={batch_size}");
        }
    }

    #[test]
    fn test_puppy_maps_to_dog_end_to_end() {
        let dir = tempfile::tempdir().unwrap();

        let vectors: HashMap<String, Vec<f32>> = [
            ("dog", vec![1.0, 0.0]),
            ("puppy", vec![0.95, 0.05]),
            ("xyz", vec![0.0, 1.0]),
        ]
        .into_iter()
        .map(|(w, v)| (w.to_string(), v))
        .collect();
        let source = Arc::new(EmbeddingStore::from_entries(vectors, 2));

        let list_path = dir.path().join("words.txt");
        std::fs::write(&list_path, "dog\n").unwrap();
        let vocab = Arc::new(RestrictedVocabulary::load(&list_path, &*source).unwrap());

        let simplifier = TextSimplifier::new(source, vocab, 1000, 0).unwrap();
        let tokens = tokenize("puppy xyz unknownword");
        let output = simplifier.process_tokens(&tokens).unwrap();

        // puppy -> nearest restricted word; xyz has an embedding so it is
        // also compared against {dog}; unknownword passes through
        assert_eq!(output, vec!["dog", "dog", "unknownword"]);
    }

    #[test]
    fn test_empty_token_sequence() {
        let (simplifier, _dir) = simplifier(10);
        assert!(simplifier.process_tokens(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_process_file_writes_joined_output() {
        let (simplifier, dir) = simplifier(2);

        let input = dir.path().join("input.txt");
        let output = dir.path().join("output.txt");
        std::fs::write(&input, "puppy  likes\n\nfish").unwrap();

        simplifier.process_file(&input, &output).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, "dog likes fish");
    }

    #[test]
    fn test_failed_run_keeps_existing_output() {
        let (simplifier, dir) = simplifier(2);

        let input = dir.path().join("missing.txt");
        let output = dir.path().join("output.txt");
        std::fs::write(&output, "previous contents").unwrap();

        assert!(simplifier.process_file(&input, &output).is_err());
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "previous contents"
        );
    }

    #[test]
    fn test_large_input_many_batches() {
        let (simplifier, _dir) = simplifier(7);

        let tokens: Vec<String> = (0..500)
            .map(|i| match i % 3 {
                0 => "puppy".to_string(),
                1 => "unknownword".to_string(),
                _ => "fish".to_string(),
            })
            .collect();

        let output = simplifier.process_tokens(&tokens).unwrap();
        assert_eq!(output.len(), tokens.len());
        for (i, word) in output.iter().enumerate() {
            match i % 3 {
                0 => assert_eq!(word, "dog"),
                1 => assert_eq!(word, "unknownword"),
                _ => assert_eq!(word, "fish"),
            }
        }
    }
}
