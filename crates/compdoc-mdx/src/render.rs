//! Markdown to HTML rendering.

use std::collections::HashMap;

use pulldown_cmark::{html, CowStr, Event, Parser, Tag, TagEnd};

use crate::parser::markdown_options;

/// Render a markdown body to HTML.
///
/// Headings without an explicit id get one derived from their text with case
/// preserved, so `## API` renders as `<h2 id="API">`. Repeated ids are suffixed
/// with `-1`, `-2`, ...
pub fn render_markdown(markdown: &str) -> String {
    let mut events: Vec<Event> = Parser::new_ext(markdown, markdown_options()).collect();
    let mut used: HashMap<String, usize> = HashMap::new();

    for i in 0..events.len() {
        let Event::Start(Tag::Heading {
            level,
            id: None,
            classes,
            attrs,
        }) = &events[i]
        else {
            continue;
        };

        let text = heading_text(&events[i + 1..]);
        let base = heading_id(&text);
        if base.is_empty() {
            continue;
        }

        let id = match used.get_mut(&base) {
            Some(count) => {
                *count += 1;
                format!("{}-{}", base, count)
            }
            None => {
                used.insert(base.clone(), 0);
                base
            }
        };

        let anchored = Event::Start(Tag::Heading {
            level: *level,
            id: Some(CowStr::from(id)),
            classes: classes.clone(),
            attrs: attrs.clone(),
        });
        events[i] = anchored;
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

/// Collect the plain text of a heading from the events that follow its start tag.
fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// Convert heading text to an anchor id, keeping letter case.
fn heading_id(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else if c.is_whitespace() || c == '-' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_heading_anchors() {
        let html = render_markdown("## API\n\n### Button Props\n");

        assert!(html.contains(r#"<h2 id="API">API</h2>"#));
        assert!(html.contains(r#"<h3 id="Button-Props">Button Props</h3>"#));
    }

    #[test]
    fn deduplicates_anchor_ids() {
        let html = render_markdown("## Usage\n\n## Usage\n");

        assert!(html.contains(r#"id="Usage""#));
        assert!(html.contains(r#"id="Usage-1""#));
    }

    #[test]
    fn renders_tables() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");

        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn heading_id_keeps_case_and_cjk() {
        assert_eq!(heading_id("API"), "API");
        assert_eq!(heading_id("API 说明"), "API-说明");
        assert_eq!(heading_id("  Multiple   Spaces  "), "Multiple-Spaces");
        assert_eq!(heading_id("Button (Primary)"), "Button-Primary");
    }
}
