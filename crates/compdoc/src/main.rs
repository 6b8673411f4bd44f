//! compdoc CLI - compiles bilingual component docs for a docs site.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "compdoc")]
#[command(about = "Compiles bilingual component docs into JSON artifacts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to compdoc.toml config file
    #[arg(short, long, default_value = "compdoc.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the docs tree
    Build {
        /// Docs directory (defaults to config or "docs")
        #[arg(short, long)]
        docs: Option<PathBuf>,

        /// Output directory (defaults to config or "compiled_docs")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove the output and staging directories
    Clean {
        /// Output directory (defaults to config or "compiled_docs")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Build { docs, output } => {
            commands::build::run(&cli.config, docs, output).await?;
        }
        Commands::Clean { output } => {
            commands::clean::run(&cli.config, output).await?;
        }
    }

    Ok(())
}
