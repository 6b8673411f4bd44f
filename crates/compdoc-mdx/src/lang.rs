//! Bilingual demo splitting.
//!
//! A demo document is written in the localized language and may embed its
//! English translation in a `:::lang=en-us ... :::` block. The demo code is
//! shared, so it is moved out of the localized text and appended to both
//! variants.

use std::sync::LazyLock;

use regex::Regex;

/// The two language variants of a demo document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BilingualDoc {
    /// Localized text with the demo code moved to the end
    pub localized: String,

    /// English text followed by the demo code, if a lang block was present
    pub english: Option<String>,
}

/// Separator placed between the English text and the demo code.
pub const ENGLISH_CODE_SEPARATOR: &str = "\n\n---\n\n";

static LANG_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s):{3}lang.*:{3}").expect("Invalid lang block regex"));

static LANG_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":{3}(?:lang[=\w-]*)?").expect("Invalid lang token regex"));

static FENCED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)`{3,}.*`{3,}").expect("Invalid fenced block regex"));

static SIDE_EFFECT_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s*(?:'[^'"]+?'|"[^'"]+?");?\n?"#).expect("Invalid import regex")
});

/// Split a demo document into its localized and English variants.
///
/// Side-effect imports (`import './index.scss';`) are dropped from the demo
/// code. Without a lang block no English variant is produced.
pub fn split_bilingual(source: &str) -> BilingualDoc {
    let lang_block = LANG_BLOCK_RE
        .find(source)
        .map(|m| LANG_TOKEN_RE.replace_all(m.as_str(), "").into_owned());

    let code = FENCED_RE
        .find(source)
        .map(|m| SIDE_EFFECT_IMPORT_RE.replace_all(m.as_str(), "").into_owned())
        .unwrap_or_default();

    let without_lang = LANG_BLOCK_RE.replace_all(source, "");
    let without_code = FENCED_RE.replace_all(&without_lang, "");

    BilingualDoc {
        localized: format!("{}{}", without_code, code),
        english: lang_block
            .filter(|text| !text.is_empty())
            .map(|text| format!("{}{}{}", text, ENGLISH_CODE_SEPARATOR, code)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BILINGUAL: &str = r#"# 基本

- order: 0

最简单的用法。

:::lang=en-us
# Basic

- order: 0

The simplest usage.
:::

````jsx
import { Button } from '@alifd/next';
import './demo.scss';

ReactDOM.render(<Button>Hello</Button>, mountNode);
````
"#;

    #[test]
    fn splits_localized_and_english() {
        let doc = split_bilingual(BILINGUAL);

        assert!(doc.localized.contains("最简单的用法。"));
        assert!(!doc.localized.contains(":::"));
        assert!(!doc.localized.contains("The simplest usage."));
        assert!(doc.localized.trim_end().ends_with("````"));

        let english = doc.english.unwrap();
        assert!(english.starts_with("\n# Basic"));
        assert!(english.contains("The simplest usage."));
        assert!(english.contains(ENGLISH_CODE_SEPARATOR));
        assert!(!english.contains("最简单的用法。"));
        assert!(!english.contains("lang=en-us"));
    }

    #[test]
    fn both_variants_carry_the_same_code() {
        let doc = split_bilingual(BILINGUAL);
        let english = doc.english.unwrap();

        let code = "````jsx\nimport { Button } from '@alifd/next';\n\nReactDOM.render(<Button>Hello</Button>, mountNode);\n````";
        assert!(doc.localized.ends_with(code));
        assert!(english.ends_with(code));
    }

    #[test]
    fn strips_side_effect_imports_only() {
        let doc = split_bilingual(BILINGUAL);

        assert!(!doc.localized.contains("demo.scss"));
        assert!(doc.localized.contains("import { Button } from '@alifd/next';"));
    }

    #[test]
    fn without_lang_block_relocates_code() {
        let source = "# 基本\n\n```jsx\nrender();\n```\n\n尾部说明。\n";

        let doc = split_bilingual(source);

        assert_eq!(doc.english, None);
        assert_eq!(doc.localized, "# 基本\n\n\n\n尾部说明。\n```jsx\nrender();\n```");
    }

    #[test]
    fn plain_text_is_untouched() {
        let source = "Nothing to split here.\n";

        let doc = split_bilingual(source);

        assert_eq!(doc.localized, source);
        assert_eq!(doc.english, None);
    }
}
