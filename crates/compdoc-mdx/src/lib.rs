//! Component documentation parser.
//!
//! Splits bilingual demo markdown, extracts document metadata (YAML front matter
//! or a `# Title` heading followed by a `- key: value` list), collects fenced
//! code blocks and renders bodies to HTML with stable heading anchors.

pub mod codeblock;
pub mod frontmatter;
pub mod lang;
pub mod naming;
pub mod parser;
pub mod render;

pub use codeblock::{CodeBlock, Language};
pub use frontmatter::{DocMeta, FrontmatterError};
pub use lang::{split_bilingual, BilingualDoc};
pub use naming::{camel_case, component_name};
pub use parser::{parse_doc, ParseError, ParsedDoc};
pub use render::render_markdown;
