//! `sentiment_app`: serve, query or train the bag-of-words sentiment classifier.
mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use engine_logging::engine_error;

use crate::config::ServiceConfig;

#[derive(Parser)]
#[command(name = "sentiment_app")]
#[command(version)]
#[command(about = "Binary sentiment classification over HTTP", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level override (off, error, warn, info, debug, trace)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Configuration file (RON); ./sentiment.ron is used when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP endpoint
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Model file (JSON)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Classify a single text and print the reply
    Classify {
        /// Model file (JSON)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// The text to classify
        text: String,
    },

    /// Train a model from a directory of labeled documents
    Train {
        /// Corpus root; each subdirectory name is a label
        #[arg(long)]
        corpus: PathBuf,

        /// Where to write the model (defaults to the configured model path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of most informative features to log
        #[arg(long, default_value_t = 10)]
        show_features: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ServiceConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }
    engine_logging::initialize(
        config.log.destination.into(),
        config.log.level_filter()?,
        &config.log.file,
    );

    let result = run(cli.command, config).await;
    if let Err(err) = &result {
        engine_error!("{:#}", err);
    }
    result
}

async fn run(command: Commands, mut config: ServiceConfig) -> Result<()> {
    match command {
        Commands::Serve { host, port, model } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(model) = model {
                config.model_path = model;
            }
            commands::serve(&config).await
        }
        Commands::Classify { model, text } => {
            if let Some(model) = model {
                config.model_path = model;
            }
            println!("{}", commands::classify(&config, &text)?);
            Ok(())
        }
        Commands::Train {
            corpus,
            output,
            show_features,
        } => {
            let output = output.unwrap_or_else(|| config.model_path.clone());
            let written = commands::train(&config, &corpus, &output, show_features)?;
            println!("Model written to {}", written.display());
            Ok(())
        }
    }
}
