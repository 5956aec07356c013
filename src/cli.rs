use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct StoreArgs {
    /// Path to the embeddings file (word,v1,...,vD per line)
    #[clap(short, long)]
    pub embeddings: PathBuf,

    /// Path to the restricted vocabulary word list (one word per line)
    #[clap(short, long)]
    pub vocab: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replace out-of-vocabulary words in a text file with the closest
    /// restricted-vocabulary word.
    Simplify {
        /// Path to the embeddings file (word,v1,...,vD per line)
        #[clap(short, long)]
        embeddings: PathBuf,

        /// Path to the restricted vocabulary word list (one word per line)
        #[clap(short, long)]
        vocab: PathBuf,

        /// Text file to simplify
        #[clap(short, long)]
        input: PathBuf,

        /// Destination for the simplified text
        #[clap(short, long)]
        output: PathBuf,

        /// Tokens per concurrent batch (overrides config)
        #[clap(long)]
        batch_size: Option<usize>,

        /// Worker thread cap, 0 = automatic (overrides config)
        #[clap(long)]
        threads: Option<usize>,
    },

    /// Check whether a word is present in the stores.
    Lookup {
        #[clap(flatten)]
        stores: StoreArgs,

        /// Word to search for
        word: String,
    },

    /// Print entry counts for the loaded stores.
    Stats {
        #[clap(flatten)]
        stores: StoreArgs,
    },
}
