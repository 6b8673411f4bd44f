//! Document metadata extraction.
//!
//! Two layouts are recognised. YAML front matter:
//!
//! ```text
//! ---
//! title: Button
//! chinese: 按钮
//! ---
//! ```
//!
//! and the heading-and-list layout used by component docs:
//!
//! ```text
//! # Button
//!
//! - chinese: 按钮
//! - family: General
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Metadata of a documentation file.
///
/// Serialized flat, so `{"title": "Button", "chinese": "按钮"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocMeta {
    /// Document title
    #[serde(default)]
    pub title: String,

    /// Every other key, in key order
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl DocMeta {
    /// Look up a metadata value. `title` resolves to the title field.
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == "title" {
            return Some(self.title.as_str()).filter(|t| !t.is_empty());
        }
        self.fields.get(key).map(String::as_str)
    }
}

/// Errors that can occur when parsing metadata.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}

static META_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[-*]\s+([\w-]+)\s*:\s*(.*?)\s*$").expect("Invalid meta item regex")
});

/// Extract metadata from a document.
///
/// Returns the metadata and the remaining body. A document with neither layout
/// yields empty metadata and the untouched source.
pub fn extract_meta(source: &str) -> Result<(DocMeta, &str), FrontmatterError> {
    if source.trim_start().starts_with("---") {
        return extract_yaml(source);
    }
    Ok(extract_heading_list(source))
}

fn extract_yaml(source: &str) -> Result<(DocMeta, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let values: BTreeMap<String, serde_yaml::Value> = if yaml_content.is_empty() {
        BTreeMap::new()
    } else {
        serde_yaml::from_str(yaml_content)
            .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
    };

    let mut meta = DocMeta::default();
    for (key, value) in values {
        let Some(value) = yaml_scalar(value) else {
            continue;
        };
        if key == "title" {
            meta.title = value;
        } else {
            meta.fields.insert(key, value);
        }
    }

    Ok((meta, remaining.trim_start()))
}

fn yaml_scalar(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        other => serde_yaml::to_string(&other)
            .ok()
            .map(|s| s.trim().to_string()),
    }
}

fn extract_heading_list(source: &str) -> (DocMeta, &str) {
    let mut meta = DocMeta::default();
    let mut offset = 0;
    let mut lines = source.split_inclusive('\n').peekable();

    // Leading blank lines
    while let Some(line) = lines.peek() {
        if !line.trim().is_empty() {
            break;
        }
        offset += line.len();
        lines.next();
    }

    let Some(title) = lines
        .peek()
        .copied()
        .and_then(|line| line.trim_end().strip_prefix("# "))
    else {
        return (meta, source);
    };
    meta.title = title.trim().to_string();
    offset += lines.next().map_or(0, str::len);

    let mut seen_item = false;
    for line in lines {
        if line.trim().is_empty() {
            if seen_item {
                break;
            }
            offset += line.len();
            continue;
        }

        let Some(caps) = META_ITEM_RE.captures(line) else {
            break;
        };
        let key = caps[1].to_string();
        let value = caps[2].to_string();
        if key == "title" {
            meta.title = value;
        } else {
            meta.fields.insert(key, value);
        }
        seen_item = true;
        offset += line.len();
    }

    (meta, source[offset..].trim_start_matches(['\r', '\n']))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_yaml_frontmatter() {
        let source = r#"---
title: Button
chinese: 按钮
order: 1
---

# Button Component
"#;

        let (meta, content) = extract_meta(source).unwrap();

        assert_eq!(meta.title, "Button");
        assert_eq!(meta.get("chinese"), Some("按钮"));
        assert_eq!(meta.get("order"), Some("1"));
        assert!(content.starts_with("# Button Component"));
    }

    #[test]
    fn extracts_heading_list() {
        let source = "# Button\n\n- chinese: 按钮\n- family: General\n\n## 开发指南\n";

        let (meta, content) = extract_meta(source).unwrap();

        assert_eq!(meta.title, "Button");
        assert_eq!(meta.get("chinese"), Some("按钮"));
        assert_eq!(meta.get("family"), Some("General"));
        assert_eq!(content, "## 开发指南\n");
    }

    #[test]
    fn heading_without_list_keeps_following_text() {
        let source = "# 基本\n\n按钮的基本用法。\n";

        let (meta, content) = extract_meta(source).unwrap();

        assert_eq!(meta.title, "基本");
        assert!(meta.fields.is_empty());
        assert_eq!(content, "按钮的基本用法。\n");
    }

    #[test]
    fn handles_no_metadata() {
        let source = "Just text.\n\n# Later heading";

        let (meta, content) = extract_meta(source).unwrap();

        assert_eq!(meta, DocMeta::default());
        assert_eq!(content, source);
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let source = "---\ntitle: Test\n# No closing";

        assert!(matches!(
            extract_meta(source),
            Err(FrontmatterError::Unclosed)
        ));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let source = "---\ntitle: [invalid yaml\n---\n";

        assert!(matches!(
            extract_meta(source),
            Err(FrontmatterError::InvalidYaml(_))
        ));
    }

    #[test]
    fn title_lookup_ignores_empty() {
        let meta = DocMeta::default();
        assert_eq!(meta.get("title"), None);
    }
}
