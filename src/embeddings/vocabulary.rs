//! Restricted target vocabulary.
//!
//! Loaded from a one-word-per-line list, keeping only words that exist in a
//! source store. Entries preserve word-list order, which fixes the iteration
//! order (and therefore the nearest-neighbor tie-break) across runs.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::embeddings::store::{LoadError, WordVectors};

/// The set of words substitutions are allowed to resolve to, with their
/// vectors copied out of the source store.
///
/// Implements [`WordVectors`] like the source store, plus ordered iteration
/// over `(word, vector)` pairs for the search scan.
pub struct RestrictedVocabulary {
    entries: Vec<(String, Vec<f32>)>,
    index: HashMap<String, usize>,
    dimensions: usize,
}

impl RestrictedVocabulary {
    /// Load the vocabulary from a word list, filtering against `source`.
    ///
    /// Words absent from `source` are skipped without error; duplicate list
    /// entries keep their first occurrence. Blank lines are ignored.
    pub fn load(
        path: impl AsRef<Path>,
        source: &impl WordVectors,
    ) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let mut entries: Vec<(String, Vec<f32>)> = vec![];
        let mut index = HashMap::new();
        let mut listed = 0usize;

        for line in reader.lines() {
            let word = line?.trim().to_string();
            if word.is_empty() {
                continue;
            }
            listed += 1;

            if index.contains_key(&word) {
                continue;
            }

            match source.embedding(&word) {
                Some(vector) => {
                    index.insert(word.clone(), entries.len());
                    entries.push((word, vector.to_vec()));
                }
                None => log::debug!("vocabulary word {word:?} has no embedding, skipping"),
            }
        }

        log::info!(
            "loaded {} of {} vocabulary words from {}",
            entries.len(),
            listed,
            path.display()
        );

        Ok(Self {
            entries,
            index,
            dimensions: source.dimensions(),
        })
    }

    /// Iterate over `(word, vector)` pairs in word-list order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.entries
            .iter()
            .map(|(word, vector)| (word.as_str(), vector.as_slice()))
    }
}

impl WordVectors for RestrictedVocabulary {
    fn embedding(&self, word: &str) -> Option<&[f32]> {
        self.index
            .get(word)
            .map(|&i| self.entries[i].1.as_slice())
    }

    fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
