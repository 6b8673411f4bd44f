//! Fenced code blocks found in demo documents.

/// Programming language of a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    Tsx,
    Jsx,
    TypeScript,
    JavaScript,
    Html,
    Css,
    Json,
    Bash,
    #[default]
    Unknown,
}

impl Language {
    /// Parse language from code fence info string.
    pub fn from_info(info: &str) -> Self {
        let lang = info.split_whitespace().next().unwrap_or("");
        match lang.to_lowercase().as_str() {
            "tsx" => Self::Tsx,
            "jsx" => Self::Jsx,
            "ts" | "typescript" => Self::TypeScript,
            "js" | "javascript" => Self::JavaScript,
            "html" => Self::Html,
            "css" => Self::Css,
            "json" => Self::Json,
            "bash" | "sh" | "shell" => Self::Bash,
            _ => Self::Unknown,
        }
    }

    /// Whether a block in this language can be turned into a demo render script.
    pub fn is_script(&self) -> bool {
        matches!(self, Self::Jsx | Self::JavaScript)
    }
}

/// A fenced code block from a markdown document.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// Programming language
    pub language: Language,

    /// Raw info string after the opening fence
    pub info: String,

    /// Source code content
    pub source: String,
}

impl CodeBlock {
    /// Create a new code block from its fence info string and content.
    pub fn new(info: impl Into<String>, source: impl Into<String>) -> Self {
        let info = info.into();
        Self {
            language: Language::from_info(&info),
            info,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language() {
        assert_eq!(Language::from_info("jsx"), Language::Jsx);
        assert_eq!(Language::from_info("tsx live"), Language::Tsx);
        assert_eq!(Language::from_info("typescript"), Language::TypeScript);
        assert_eq!(Language::from_info("js"), Language::JavaScript);
        assert_eq!(Language::from_info(""), Language::Unknown);
    }

    #[test]
    fn only_plain_scripts_render() {
        assert!(CodeBlock::new("jsx", "").language.is_script());
        assert!(CodeBlock::new("javascript", "").language.is_script());
        assert!(!CodeBlock::new("css", "").language.is_script());
        assert!(!CodeBlock::new("tsx", "").language.is_script());
    }
}
