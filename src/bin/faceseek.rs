//! CLI entry point for the `faceseek` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use faceseek::cli::commands;
use faceseek::matcher::DEFAULT_MATCH_THRESHOLD;
use faceseek::types::DEFAULT_DIMENSION;

#[derive(Parser)]
#[command(
    name = "faceseek",
    about = "faceseek CLI — face enrollment and recognition store"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enroll an embedding under an identity name
    Enroll {
        /// Path to the embeddings store directory
        store: PathBuf,
        /// Identity name (case-sensitive, used as the storage key)
        name: String,
        /// Path to a JSON file holding the embedding as an array of floats
        #[arg(long)]
        embedding: PathBuf,
        /// Embedding dimension
        #[arg(long, default_value_t = DEFAULT_DIMENSION)]
        dimension: usize,
    },
    /// List enrolled identities
    List {
        /// Path to the embeddings store directory
        store: PathBuf,
        /// Embedding dimension
        #[arg(long, default_value_t = DEFAULT_DIMENSION)]
        dimension: usize,
    },
    /// Classify a query embedding against the store
    Classify {
        /// Path to the embeddings store directory
        store: PathBuf,
        /// Path to a JSON file holding the query embedding
        #[arg(long)]
        embedding: PathBuf,
        /// Acceptance threshold (Euclidean distance)
        #[arg(long, default_value_t = DEFAULT_MATCH_THRESHOLD)]
        threshold: f32,
        /// Embedding dimension
        #[arg(long, default_value_t = DEFAULT_DIMENSION)]
        dimension: usize,
    },
    /// Display information about a store directory
    Info {
        /// Path to the embeddings store directory
        store: PathBuf,
        /// Embedding dimension
        #[arg(long, default_value_t = DEFAULT_DIMENSION)]
        dimension: usize,
    },
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    if cli.verbose {
        // env_logger is only available in dev/test builds
        eprintln!("Verbose mode enabled");
    }

    let result = match cli.command {
        Commands::Enroll {
            store,
            name,
            embedding,
            dimension,
        } => commands::cmd_enroll(&store, &name, &embedding, dimension, json),
        Commands::List { store, dimension } => commands::cmd_list(&store, dimension, json),
        Commands::Classify {
            store,
            embedding,
            threshold,
            dimension,
        } => commands::cmd_classify(&store, &embedding, dimension, threshold, json),
        Commands::Info { store, dimension } => commands::cmd_info(&store, dimension, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            faceseek::FaceError::Io(_) => 1,
            faceseek::FaceError::InvalidMagic
            | faceseek::FaceError::UnsupportedVersion(_)
            | faceseek::FaceError::Truncated
            | faceseek::FaceError::Corrupt(_)
            | faceseek::FaceError::Compression(_) => 2,
            faceseek::FaceError::DimensionMismatch { .. }
            | faceseek::FaceError::EmptyEmbedding
            | faceseek::FaceError::InvalidName(_)
            | faceseek::FaceError::Config(_) => 3,
            _ => 5,
        };
        process::exit(code);
    }
}
