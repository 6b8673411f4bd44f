//! Documentation build driver.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use compdoc_mdx::{camel_case, split_bilingual};
use compdoc_script::{global_control_source, ScriptEmbedder, DEFAULT_GLOBAL_CONTROL};

use crate::api::render_api;
use crate::demo::compile_demo;
use crate::manifest::{collect_mapping, render_mapping, sorted_names, ComponentEntry};
use crate::stage::{StageError, StagedSource};

/// Configuration for a documentation build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source docs directory
    pub docs_dir: PathBuf,

    /// Working copy of the docs directory, removed after the build
    pub staging_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Component directories to skip
    pub ignore: Vec<String>,

    /// Id of the element that starts the API section of an API page
    pub api_anchor: String,

    /// Extension of demo and readme documents
    pub demo_extension: String,

    /// Split the English API page like the localized one instead of
    /// writing it as a single HTML blob
    pub split_english_api: bool,

    /// Extra snippet appended to the global control script
    pub global_control: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            staging_dir: PathBuf::from("docs-lang"),
            output_dir: PathBuf::from("compiled_docs"),
            ignore: vec!["core".to_string()],
            api_anchor: "API".to_string(),
            demo_extension: ".md".to_string(),
            split_english_api: false,
            global_control: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug, Default)]
pub struct BuildResult {
    /// Number of components with an API page
    pub components: usize,

    /// Number of demo artifacts written (all languages)
    pub demos: usize,

    /// Number of English demo artifacts among `demos`
    pub english_demos: usize,

    /// Warnings about missing optional inputs
    pub warnings: Vec<String>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

impl BuildResult {
    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Stage(#[from] StageError),

    #[error("Failed to read {0}")]
    ReadError(String),

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to compile script in {path}: {message}")]
    ScriptError { path: String, message: String },

    #[error("Failed to rewrite HTML: {0}")]
    HtmlError(String),

    #[error("Failed to serialize {path}: {message}")]
    SerializeError { path: String, message: String },

    #[error("Failed to write {0}")]
    WriteError(String),
}

impl BuildError {
    fn read(path: &Path, err: io::Error) -> Self {
        Self::ReadError(format!("{}: {}", path.display(), err))
    }

    fn write(path: &Path, err: io::Error) -> Self {
        Self::WriteError(format!("{}: {}", path.display(), err))
    }
}

/// Compiles a docs tree into JSON artifacts and manifests.
pub struct DocsBuilder {
    config: BuildConfig,
    embedder: ScriptEmbedder,
}

impl DocsBuilder {
    /// Create a builder using the default script embedder.
    pub fn new(config: BuildConfig) -> Self {
        Self::with_embedder(config, ScriptEmbedder::new())
    }

    /// Create a builder using a specific script embedder.
    pub fn with_embedder(config: BuildConfig, embedder: ScriptEmbedder) -> Self {
        Self { config, embedder }
    }

    /// Stage the docs tree, compile it, and remove the staging copy.
    ///
    /// The staging copy is removed whether or not compilation succeeds.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let staged = StagedSource::stage(&self.config.docs_dir, &self.config.staging_dir)?;
        let compiled = self.compile(staged.path()).await;
        staged.cleanup();

        let mut result = compiled?;
        result.duration_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }

    /// Compile an already staged docs tree into the output directory.
    ///
    /// Demo sources with an English block are rewritten in `from`.
    pub async fn compile(&self, from: &Path) -> Result<BuildResult, BuildError> {
        let to = &self.config.output_dir;
        let mut result = BuildResult {
            output_dir: to.clone(),
            ..Default::default()
        };

        match tokio::fs::remove_dir_all(to).await {
            Ok(()) => tracing::debug!("Cleared {}", to.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(BuildError::write(to, e)),
        }
        create_dir_all(to).await?;

        let render_html = self.global_control_script()?;
        let mut components = Vec::new();

        for folder in sorted_names(from).await.map_err(|e| BuildError::read(from, e))? {
            let folder_from = from.join(&folder);
            if !is_dir(&folder_from).await || self.config.ignore.contains(&folder) {
                continue;
            }
            tracing::debug!("Compiling component {}", folder);

            let folder_to = to.join(&folder);
            create_dir_all(&folder_to.join("demo")).await?;

            if let Some(entry) = self
                .compile_api(&folder, &folder_from, &folder_to, &render_html, &mut result)
                .await?
            {
                components.push(entry);
            }

            self.compile_demos(&folder, &folder_from, &folder_to, &mut result)
                .await?;
        }

        result.components = components.len();

        let components_path = to.join("components.json");
        write_json(&components_path, &components).await?;

        let ext = &self.config.demo_extension;
        let mapping = collect_mapping(to, ext)
            .await
            .map_err(|e| BuildError::read(to, e))?;
        let mapping_path = to.join("mapping.js");
        write_text(&mapping_path, &render_mapping(&mapping)).await?;

        tracing::info!(
            "Compiled {} components and {} demos ({} English) into {}",
            result.components,
            result.demos,
            result.english_demos,
            to.display()
        );

        Ok(result)
    }

    fn global_control_script(&self) -> Result<String, BuildError> {
        let source =
            global_control_source(DEFAULT_GLOBAL_CONTROL, self.config.global_control.as_deref());
        self.embedder
            .embed(&source, true)
            .map_err(|e| BuildError::ScriptError {
                path: "global control".to_string(),
                message: e.to_string(),
            })
    }

    /// Compile `index.md` and `index.en-us.md` of one component.
    ///
    /// Returns the component list entry when `index.md` exists.
    async fn compile_api(
        &self,
        folder: &str,
        from: &Path,
        to: &Path,
        render_html: &str,
        result: &mut BuildResult,
    ) -> Result<Option<ComponentEntry>, BuildError> {
        let anchor = &self.config.api_anchor;
        let mut entry = None;

        let api_from = from.join("index.md");
        if path_exists(&api_from, result).await {
            let source = read_text(&api_from).await?;
            let rendered = render_api(&source, &api_from.display().to_string())?;
            entry = Some(ComponentEntry::from_meta(&rendered.doc.meta));

            let mut record = rendered.split(anchor)?;
            record.render_html = Some(render_html.to_string());
            write_json(&to.join("index.md"), &record).await?;
        } else {
            result.warn(format!("{} does not have index.md", folder));
        }

        let en_api_from = from.join("index.en-us.md");
        if path_exists(&en_api_from, result).await {
            let source = read_text(&en_api_from).await?;
            let rendered = render_api(&source, &en_api_from.display().to_string())?;
            let en_api_to = to.join("index.en-us.md");
            if self.config.split_english_api {
                write_json(&en_api_to, &rendered.split(anchor)?).await?;
            } else {
                write_json(&en_api_to, &rendered.whole()).await?;
            }
        } else {
            result.warn(format!("{} does not have index.en-us.md", folder));
        }

        Ok(entry)
    }

    /// Compile every demo of one component.
    ///
    /// A demo with an English block is written twice, and its staged source is
    /// replaced by the localized text next to a new `<stem>.en-us.md` source.
    async fn compile_demos(
        &self,
        folder: &str,
        from: &Path,
        to: &Path,
        result: &mut BuildResult,
    ) -> Result<(), BuildError> {
        let demo_from = from.join("demo");
        let demo_to = to.join("demo");
        let ext = self.config.demo_extension.as_str();

        if !path_exists(&demo_from, result).await {
            result.warn(format!("{} does not have a demo folder", folder));
            return Ok(());
        }

        let files = sorted_names(&demo_from)
            .await
            .map_err(|e| BuildError::read(&demo_from, e))?;

        for file in files {
            let Some(stem) = file.strip_suffix(ext) else {
                continue;
            };
            let source_path = demo_from.join(&file);
            if is_dir(&source_path).await {
                continue;
            }

            let name = camel_case(stem);
            let text = read_text(&source_path).await?;
            let variants = split_bilingual(&text);

            let record = compile_demo(
                &variants.localized,
                &name,
                &source_path.display().to_string(),
                &self.embedder,
            )?;
            write_json(&demo_to.join(&file), &record).await?;
            result.demos += 1;

            let Some(english) = variants.english else {
                continue;
            };

            write_text(&source_path, &variants.localized).await?;

            let en_file = format!("{}.en-us{}", stem, ext);
            let en_source_path = demo_from.join(&en_file);
            write_text(&en_source_path, &english).await?;

            let record = compile_demo(
                &english,
                &name,
                &en_source_path.display().to_string(),
                &self.embedder,
            )?;
            write_json(&demo_to.join(&en_file), &record).await?;
            result.demos += 1;
            result.english_demos += 1;
        }

        Ok(())
    }
}

/// Whether `path` exists. Stat failures other than "not found" are recorded
/// as warnings and treated as absent.
async fn path_exists(path: &Path, result: &mut BuildResult) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(_) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            result.warn(format!("Failed to stat {}: {}", path.display(), e));
            false
        }
    }
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

async fn create_dir_all(path: &Path) -> Result<(), BuildError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| BuildError::write(path, e))
}

async fn read_text(path: &Path) -> Result<String, BuildError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| BuildError::read(path, e))
}

async fn write_text(path: &Path, content: &str) -> Result<(), BuildError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| BuildError::write(path, e))
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), BuildError> {
    let json = serde_json::to_string(value).map_err(|e| BuildError::SerializeError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    write_text(path, &json).await
}
