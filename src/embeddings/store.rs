//! Source embedding store loaded from flat CSV records.
//!
//! Each record is `word,v1,v2,...,vD` (no header row). A record with the
//! wrong field count or an unparsable component fails the entire load; a
//! partially built store is never handed out.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Errors that can occur while loading a store from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected {expected} fields, got {got}")]
    WrongFieldCount {
        line: u64,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: invalid vector component {value:?}")]
    InvalidNumber { line: u64, value: String },
}

/// Read-only lookup capability shared by the source store and the
/// restricted vocabulary.
///
/// Lookups are O(1) expected time; an absent word is a normal `None`,
/// never an error.
pub trait WordVectors {
    /// Vector for `word`, or `None` if the word is unknown.
    fn embedding(&self, word: &str) -> Option<&[f32]>;

    /// Membership test.
    fn contains(&self, word: &str) -> bool;

    /// Number of stored words.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension every stored vector has.
    fn dimensions(&self) -> usize;
}

/// Source store mapping words to fixed-dimension embedding vectors.
///
/// Built once by [`EmbeddingStore::load`]; immutable afterward.
#[derive(Debug)]
pub struct EmbeddingStore {
    vectors: HashMap<String, Vec<f32>>,
    dimensions: usize,
}

impl EmbeddingStore {
    /// Load a store from a CSV file of `word,v1..vD` records.
    pub fn load(path: impl AsRef<Path>, dimensions: usize) -> Result<Self, LoadError> {
        Self::load_with_progress(path, dimensions, |_, _| {})
    }

    /// Load a store, reporting `(records_done, records_total)` after each
    /// parsed record.
    ///
    /// The callback is advisory: it exists for progress display and has no
    /// effect on load semantics. The total comes from a counting pre-pass
    /// over the file.
    pub fn load_with_progress(
        path: impl AsRef<Path>,
        dimensions: usize,
        mut progress: impl FnMut(usize, usize),
    ) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let total = count_lines(path)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut vectors = HashMap::with_capacity(total);
        for (done, record) in reader.records().enumerate() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() != dimensions + 1 {
                return Err(LoadError::WrongFieldCount {
                    line,
                    expected: dimensions + 1,
                    got: record.len(),
                });
            }

            let word = record[0].to_string();
            let mut vector = Vec::with_capacity(dimensions);
            for value in record.iter().skip(1) {
                let component =
                    value
                        .trim()
                        .parse::<f32>()
                        .map_err(|_| LoadError::InvalidNumber {
                            line,
                            value: value.to_string(),
                        })?;
                vector.push(component);
            }

            vectors.insert(word, vector);
            progress(done + 1, total);
        }

        log::info!("loaded {} embeddings from {}", vectors.len(), path.display());

        Ok(Self {
            vectors,
            dimensions,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_entries(vectors: HashMap<String, Vec<f32>>, dimensions: usize) -> Self {
        Self {
            vectors,
            dimensions,
        }
    }
}

impl WordVectors for EmbeddingStore {
    fn embedding(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn count_lines(path: &Path) -> Result<usize, LoadError> {
    let reader = BufReader::new(File::open(path)?);
    let mut count = 0;
    for line in reader.lines() {
        line?;
        count += 1;
    }
    Ok(count)
}
