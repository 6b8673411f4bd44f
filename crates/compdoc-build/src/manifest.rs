//! Component list and demo mapping.

use std::path::Path;

use serde::{Deserialize, Serialize};

use compdoc_mdx::{component_name, DocMeta};

/// One entry of `components.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chinese: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

impl ComponentEntry {
    /// Build an entry from API page metadata (`title`, `chinese`, `family`).
    pub fn from_meta(meta: &DocMeta) -> Self {
        Self {
            english: meta.get("title").map(str::to_string),
            chinese: meta.get("chinese").map(str::to_string),
            family: meta.get("family").map(str::to_string),
        }
    }
}

/// Demo and readme artifacts of one compiled component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Router key, e.g. `DatePicker`
    pub name: String,

    /// Public paths of compiled demos
    pub demos: Vec<String>,

    /// Public paths of compiled component-level documents
    pub readme: Vec<String>,
}

/// Scan the output tree and collect one entry per component directory.
///
/// Public paths are rooted at the output directory's own name, e.g.
/// `/compiled_docs/button/demo/basic.md`.
pub async fn collect_mapping(
    output_dir: &Path,
    extension: &str,
) -> std::io::Result<Vec<MappingEntry>> {
    let public_root = output_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut entries = Vec::new();
    for folder in sorted_names(output_dir).await? {
        let folder_path = output_dir.join(&folder);
        if !tokio::fs::metadata(&folder_path).await?.is_dir() {
            continue;
        }

        let demo_dir = folder_path.join("demo");
        let demos = if tokio::fs::try_exists(&demo_dir).await? {
            sorted_names(&demo_dir)
                .await?
                .into_iter()
                .filter(|f| f.ends_with(extension))
                .map(|f| format!("/{}/{}/demo/{}", public_root, folder, f))
                .collect()
        } else {
            Vec::new()
        };

        let readme = sorted_names(&folder_path)
            .await?
            .into_iter()
            .filter(|f| f.ends_with(extension))
            .map(|f| format!("/{}/{}/{}", public_root, folder, f))
            .collect();

        entries.push(MappingEntry {
            name: component_name(&folder),
            demos,
            readme,
        });
    }

    Ok(entries)
}

/// Render the mapping as a CommonJS module the docs router can `require`.
pub fn render_mapping(entries: &[MappingEntry]) -> String {
    let mut content = String::from("module.exports = {\n");

    for entry in entries {
        content.push_str(&format!("  {}: {{\n", js_quote(&entry.name)));
        push_list(&mut content, "demos", &entry.demos);
        push_list(&mut content, "readme", &entry.readme);
        content.push_str("  },\n");
    }

    content.push_str("};\n");
    content
}

fn push_list(content: &mut String, key: &str, paths: &[String]) {
    content.push_str(&format!("    {}: [\n", key));
    for path in paths {
        content.push_str(&format!("      {},\n", js_quote(path)));
    }
    content.push_str("    ],\n");
}

/// Single-quoted JavaScript string literal.
fn js_quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Entry names of a directory in sorted order. Names that are not valid
/// UTF-8 are skipped with a warning.
pub(crate) async fn sorted_names(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::warn!(
                "Skipping {}: name is not valid UTF-8",
                dir.join(raw).display()
            ),
        }
    }
    names.sort();
    Ok(names)
}
