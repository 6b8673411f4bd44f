//! Component API page compilation.

use lol_html::html_content::ContentType;
use lol_html::{element, rewrite_str, RewriteStrSettings, Selector};
use serde::{Deserialize, Serialize};

use compdoc_mdx::{parse_doc, render_markdown, ParsedDoc};

use crate::builder::BuildError;

/// Marker inserted before the anchor element and split on afterwards.
const SPLIT_MARKER: &str = "<split></split>";

/// Compiled API page, written as `{meta, api, renderHtml}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRecord {
    /// HTML before the anchor element (overview, usage guide)
    pub meta: String,

    /// HTML from the anchor element on (API tables); absent without an anchor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,

    /// Global control script tag
    #[serde(
        rename = "renderHtml",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub render_html: Option<String>,
}

/// Compiled API page kept as a single HTML blob, written as `{html}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlRecord {
    pub html: String,
}

/// A parsed and rendered API page.
#[derive(Debug)]
pub struct RenderedApi {
    /// Parsed metadata and markdown body
    pub doc: ParsedDoc,

    /// Rendered body HTML
    pub html: String,
}

impl RenderedApi {
    /// Split the rendered HTML at the element whose id is `anchor`.
    pub fn split(&self, anchor: &str) -> Result<ApiRecord, BuildError> {
        let (meta, api) = split_at_anchor(&self.html, anchor)?;
        Ok(ApiRecord {
            meta,
            api,
            render_html: None,
        })
    }

    /// Keep the rendered HTML whole.
    pub fn whole(&self) -> HtmlRecord {
        HtmlRecord {
            html: self.html.clone(),
        }
    }
}

/// Parse an API page and render its body.
pub fn render_api(source: &str, path: &str) -> Result<RenderedApi, BuildError> {
    let doc = parse_doc(source).map_err(|e| BuildError::ParseError {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    let html = render_markdown(&doc.body);
    Ok(RenderedApi { doc, html })
}

/// Split HTML into the part before the element with id `anchor` and the part
/// starting at it. Without such an element the whole HTML is the first part.
pub fn split_at_anchor(html: &str, anchor: &str) -> Result<(String, Option<String>), BuildError> {
    let selector = format!("#{}", anchor);
    selector
        .parse::<Selector>()
        .map_err(|e| BuildError::HtmlError(format!("invalid anchor '{}': {}", anchor, e)))?;

    let mut marked = false;
    let rewritten = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!(selector, |el| {
                if !marked {
                    el.before(SPLIT_MARKER, ContentType::Html);
                    marked = true;
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| BuildError::HtmlError(e.to_string()))?;

    Ok(match rewritten.split_once(SPLIT_MARKER) {
        Some((meta, api)) => (meta.to_string(), Some(api.to_string())),
        None => (rewritten, None),
    })
}
