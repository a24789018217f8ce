//! # inkpress CLI
//!
//! Command-line interface for exporting vault notes to a blog repository.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "inkpress.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default inkpress.yml
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Convert notes to blog markdown and publish them
    Export {
        /// Notes to export (paths under the configured posts directory)
        paths: Vec<PathBuf>,

        /// Export every note under the posts directory
        #[arg(long)]
        all: bool,
    },

    /// Delete published posts from the remote repository
    Delete {
        /// Source notes whose published counterparts should be deleted
        paths: Vec<PathBuf>,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path, force } => commands::init_config(path.as_deref(), force),
        Commands::Export { paths, all } => commands::export_posts(&cli.config, &paths, all).await,
        Commands::Delete { paths, yes } => commands::delete_posts(&cli.config, &paths, yes).await,
    }
}
