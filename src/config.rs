use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Tokens per concurrent batch.
const DEFAULT_BATCH_SIZE: usize = 1000;
/// Worker-thread cap; 0 lets the runtime pick.
const DEFAULT_MAX_THREADS: usize = 0;

pub const CONFIG_FILE: &str = "plainify.yaml";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Tokens per batch during concurrent processing
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Maximum concurrent worker threads (0 = automatic)
    #[serde(default = "default_max_threads")]
    pub max_threads: usize,

    /// Components per embedding vector
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_threads: DEFAULT_MAX_THREADS,
            dimensions: crate::embeddings::DEFAULT_DIMENSIONS,
        }
    }
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_max_threads() -> usize {
    DEFAULT_MAX_THREADS
}

fn default_dimensions() -> usize {
    crate::embeddings::DEFAULT_DIMENSIONS
}

impl Config {
    /// Load `plainify.yaml` from the current directory, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = serde_yml::from_str(&config_str)
            .with_context(|| format!("{} is malformed", path.display()))?;

        config.validate()?;

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.batch_size == 0 {
            anyhow::bail!("batch_size must be greater than 0");
        }
        if self.dimensions == 0 {
            anyhow::bail!("dimensions must be greater than 0");
        }
        Ok(())
    }
}
