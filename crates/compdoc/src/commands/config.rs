//! Configuration file (compdoc.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use compdoc_build::BuildConfig;
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_docs_dir")]
    pub dir: String,
    #[serde(default = "default_staging")]
    pub staging: String,
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            staging: default_staging(),
            output: default_output(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
    #[serde(default = "default_api_anchor")]
    pub api_anchor: String,
    #[serde(default = "default_demo_extension")]
    pub demo_extension: String,
    #[serde(default)]
    pub split_english_api: bool,
    /// Path to a script appended to the global control script
    pub global_control: Option<String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
            api_anchor: default_api_anchor(),
            demo_extension: default_demo_extension(),
            split_english_api: false,
            global_control: None,
        }
    }
}

fn default_docs_dir() -> String {
    "docs".to_string()
}
fn default_staging() -> String {
    "docs-lang".to_string()
}
fn default_output() -> String {
    "compiled_docs".to_string()
}
fn default_ignore() -> Vec<String> {
    vec!["core".to_string()]
}
fn default_api_anchor() -> String {
    "API".to_string()
}
fn default_demo_extension() -> String {
    ".md".to_string()
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

impl ConfigFile {
    /// Resolve into a [`BuildConfig`], reading the global control snippet
    /// file when one is configured.
    pub fn into_build_config(
        self,
        docs: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> Result<BuildConfig> {
        let global_control = match &self.build.global_control {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read global control script {}", path))?,
            ),
            None => None,
        };

        Ok(BuildConfig {
            docs_dir: docs.unwrap_or_else(|| PathBuf::from(&self.docs.dir)),
            staging_dir: PathBuf::from(&self.docs.staging),
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.docs.output)),
            ignore: self.build.ignore,
            api_anchor: self.build.api_anchor,
            demo_extension: self.build.demo_extension,
            split_english_api: self.build.split_english_api,
            global_control,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("compdoc.toml"))
            .unwrap()
            .into_build_config(None, None)
            .unwrap();

        assert_eq!(config.docs_dir, PathBuf::from("docs"));
        assert_eq!(config.staging_dir, PathBuf::from("docs-lang"));
        assert_eq!(config.output_dir, PathBuf::from("compiled_docs"));
        assert_eq!(config.ignore, vec!["core".to_string()]);
        assert_eq!(config.api_anchor, "API");
        assert_eq!(config.demo_extension, ".md");
        assert!(!config.split_english_api);
        assert_eq!(config.global_control, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("compdoc.toml");
        fs::write(&path, "[docs]\noutput = \"public/docs\"\n\n[build]\nignore = []\n").unwrap();

        let config = load_config(&path).unwrap().into_build_config(None, None).unwrap();

        assert_eq!(config.docs_dir, PathBuf::from("docs"));
        assert_eq!(config.output_dir, PathBuf::from("public/docs"));
        assert!(config.ignore.is_empty());
        assert_eq!(config.api_anchor, "API");
    }

    #[test]
    fn flags_override_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("compdoc.toml");
        fs::write(&path, "[docs]\ndir = \"site-docs\"\noutput = \"out\"\n").unwrap();

        let config = load_config(&path)
            .unwrap()
            .into_build_config(Some(PathBuf::from("other")), Some(PathBuf::from("dist")))
            .unwrap();

        assert_eq!(config.docs_dir, PathBuf::from("other"));
        assert_eq!(config.output_dir, PathBuf::from("dist"));
    }

    #[test]
    fn reads_global_control_snippet() {
        let temp = tempdir().unwrap();
        let snippet = temp.path().join("global.jsx");
        fs::write(&snippet, "window.theme = 'dark';").unwrap();
        let path = temp.path().join("compdoc.toml");
        fs::write(
            &path,
            format!("[build]\nglobal_control = {:?}\n", snippet.display().to_string()),
        )
        .unwrap();

        let config = load_config(&path).unwrap().into_build_config(None, None).unwrap();

        assert_eq!(config.global_control.as_deref(), Some("window.theme = 'dark';"));
    }

    #[test]
    fn rejects_malformed_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("compdoc.toml");
        fs::write(&path, "[docs\ndir = ").unwrap();

        assert!(load_config(&path).is_err());
    }
}
