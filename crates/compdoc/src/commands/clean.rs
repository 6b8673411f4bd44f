//! Remove build output and the staging directory.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::config::load_config;

/// Run the clean command.
pub async fn run(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?.into_build_config(None, output)?;

    remove_dir(&config.output_dir).await?;
    remove_dir(&config.staging_dir).await?;

    Ok(())
}

async fn remove_dir(path: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => {
            tracing::info!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("{} does not exist", path.display());
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn removes_existing_and_tolerates_missing() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("compiled_docs");
        fs::create_dir_all(out.join("button/demo")).unwrap();
        fs::write(out.join("components.json"), "[]").unwrap();

        remove_dir(&out).await.unwrap();
        assert!(!out.exists());

        remove_dir(&out).await.unwrap();
    }
}
