//! Docs build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use compdoc_build::DocsBuilder;

use super::config::load_config;

/// Run the build command.
pub async fn run(config_path: &Path, docs: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building component docs...");

    let config = load_config(config_path)?.into_build_config(docs, output)?;

    let result = DocsBuilder::new(config)
        .build()
        .await
        .context("Docs build failed")?;

    tracing::info!(
        "Built {} components with {} demos ({} English) in {}ms",
        result.components,
        result.demos,
        result.english_demos,
        result.duration_ms
    );

    if !result.warnings.is_empty() {
        tracing::info!("{} warnings", result.warnings.len());
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
