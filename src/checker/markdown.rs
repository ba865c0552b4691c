// src/checker/markdown.rs
// =============================================================================
// Extracts external links from chapter markdown.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into a stream of events (heading, paragraph, link, ...)
// - Follows the CommonMark specification
//
// Two kinds of events carry links:
// - Start(Tag::Link(..)): [text](url), <autolinks> and reference links
// - Html(..): raw HTML blocks or inline tags, handed to checker::html
//
// The chapter text itself is never rendered or modified.
// =============================================================================

use pulldown_cmark::{Event, Parser, Tag};

use super::html::{extract_html_links, normalize_http_url};

/// Every http(s) link in `markdown`, in document order. Duplicates are kept;
/// callers group them per course.
///
/// Example input:
///   "Read [the docs](https://docs.example.com) first."
///
/// Example output:
///   vec!["https://docs.example.com/"]
pub fn extract_markdown_links(markdown: &str) -> Vec<String> {
    let mut links = Vec::new();

    for event in Parser::new(markdown) {
        match event {
            // In pulldown-cmark 0.9, Link is Tag::Link(link_type, dest_url, title)
            Event::Start(Tag::Link(_link_type, dest_url, _title)) => {
                if let Some(url) = normalize_http_url(&dest_url) {
                    links.push(url);
                }
            }
            Event::Html(html) => links.extend(extract_html_links(&html)),
            _ => {}
        }
    }

    links
}
