//! Documentation file parser.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

use crate::codeblock::CodeBlock;
use crate::frontmatter::{extract_meta, DocMeta, FrontmatterError};

/// A parsed documentation file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedDoc {
    /// Parsed metadata
    pub meta: DocMeta,

    /// Markdown body (without metadata)
    pub body: String,

    /// Fenced code blocks of the body, in document order
    #[serde(skip)]
    pub code_blocks: Vec<CodeBlock>,
}

impl ParsedDoc {
    /// First code block that can drive a live demo.
    pub fn script_block(&self) -> Option<&CodeBlock> {
        self.code_blocks.iter().find(|b| b.language.is_script())
    }
}

/// Errors that can occur when parsing a documentation file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Markdown extensions enabled for both parsing and rendering.
pub(crate) fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Parse a documentation file into metadata, body and code blocks.
pub fn parse_doc(source: &str) -> Result<ParsedDoc, ParseError> {
    let (meta, body) = extract_meta(source)?;

    let mut code_blocks = Vec::new();
    let mut current: Option<(String, String)> = None; // (info, source)

    for event in Parser::new_ext(body, markdown_options()) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                current = Some((info, String::new()));
            }
            Event::Text(text) => {
                if let Some((_, ref mut source)) = current {
                    source.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, source)) = current.take() {
                    code_blocks.push(CodeBlock::new(info, source));
                }
            }
            _ => {}
        }
    }

    Ok(ParsedDoc {
        meta,
        body: body.to_string(),
        code_blocks,
    })
}
