//! Demo document compilation.

use serde::{Deserialize, Serialize};

use compdoc_mdx::{parse_doc, render_markdown, ParsedDoc};
use compdoc_script::{demo_render_source, ScriptEmbedder};

use crate::builder::BuildError;

/// Compiled demo, written as `{meta, body, name, html, renderScript}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoRecord {
    /// Parsed metadata and markdown body
    #[serde(flatten)]
    pub doc: ParsedDoc,

    /// Camel-cased file stem
    pub name: String,

    /// Rendered body HTML
    pub html: String,

    /// Script tag registering the demo's render function
    #[serde(rename = "renderScript")]
    pub render_script: String,
}

/// Compile one language variant of a demo document.
///
/// `path` is only used in error messages.
pub fn compile_demo(
    text: &str,
    name: &str,
    path: &str,
    embedder: &ScriptEmbedder,
) -> Result<DemoRecord, BuildError> {
    let doc = parse_doc(text).map_err(|e| BuildError::ParseError {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    let html = render_markdown(&doc.body);

    let render_script = match doc.script_block() {
        Some(block) => {
            let script_error = |e: compdoc_script::TranspileError| BuildError::ScriptError {
                path: path.to_string(),
                message: e.to_string(),
            };
            let source = demo_render_source(name, &block.source).map_err(script_error)?;
            embedder.embed(&source, true).map_err(script_error)?
        }
        None => {
            tracing::debug!("{} has no script block to render", path);
            String::new()
        }
    };

    Ok(DemoRecord {
        doc,
        name: name.to_string(),
        html,
        render_script,
    })
}
