use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod embeddings;
mod progress;
mod simplify;

use cli::StoreArgs;
use config::Config;
use embeddings::{EmbeddingStore, RestrictedVocabulary, WordVectors};
use simplify::TextSimplifier;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = cli::Args::parse();
    let config = Config::load()?;

    match args.command {
        cli::Command::Simplify {
            embeddings,
            vocab,
            input,
            output,
            batch_size,
            threads,
        } => {
            let source = load_embeddings(&embeddings, config.dimensions)?;
            let vocabulary = Arc::new(RestrictedVocabulary::load(&vocab, &*source)?);

            let simplifier = TextSimplifier::new(
                source,
                vocabulary,
                batch_size.unwrap_or(config.batch_size),
                threads.unwrap_or(config.max_threads),
            )?;
            simplifier.process_file(&input, &output)?;

            println!("Simplified text written to {}", output.display());
            Ok(())
        }

        cli::Command::Lookup {
            stores: StoreArgs { embeddings, vocab },
            word,
        } => {
            let source = load_embeddings(&embeddings, config.dimensions)?;
            let vocabulary = vocab
                .map(|path| RestrictedVocabulary::load(&path, &*source))
                .transpose()?;

            let result = serde_json::json!({
                "word": word,
                "in_embeddings": source.contains(&word),
                "in_vocabulary": vocabulary.map(|v| v.contains(&word)),
            });
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
            Ok(())
        }

        cli::Command::Stats {
            stores: StoreArgs { embeddings, vocab },
        } => {
            let source = load_embeddings(&embeddings, config.dimensions)?;
            let vocabulary = vocab
                .map(|path| RestrictedVocabulary::load(&path, &*source))
                .transpose()?;

            let result = serde_json::json!({
                "embeddings": source.len(),
                "vocabulary": vocabulary.map(|v| v.len()),
                "dimensions": source.dimensions(),
            });
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
            Ok(())
        }
    }
}

fn load_embeddings(path: &Path, dimensions: usize) -> anyhow::Result<Arc<EmbeddingStore>> {
    let bar = progress::load_bar("loading embeddings");
    let store = EmbeddingStore::load_with_progress(path, dimensions, progress::as_callback(&bar))?;
    bar.finish();
    Ok(Arc::new(store))
}
