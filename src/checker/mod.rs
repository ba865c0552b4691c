// src/checker/mod.rs
// =============================================================================
// External link audit for chapter content.
//
// Submodules:
// - markdown: extracts links from chapter markdown
// - html: extracts links from raw HTML inside that markdown
// - http: checks the collected URLs over HTTP
//
// collect_course_links groups every URL of a course with the chapters that
// mention it, so each URL is requested once no matter how often it appears.
// =============================================================================

mod html;
mod http;
mod markdown;

use std::collections::BTreeMap;

use crate::model::Course;

pub use html::extract_html_links;
pub use http::{check_links, LinkCheckResult, LinkStatus};
pub use markdown::extract_markdown_links;

/// A URL to check and the chapters that reference it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub url: String,
    pub chapters: Vec<String>,
}

/// Unique external URLs across all chapters, sorted by URL. Chapter ids are
/// listed in course reading order, each at most once per URL.
pub fn collect_course_links(course: &Course) -> Vec<LinkTarget> {
    let mut by_url: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for chapter in course.chapters() {
        for url in extract_markdown_links(chapter.content()) {
            let chapters = by_url.entry(url).or_default();
            if !chapters.iter().any(|id| id == chapter.id()) {
                chapters.push(chapter.id().to_string());
            }
        }
    }

    by_url
        .into_iter()
        .map(|(url, chapters)| LinkTarget { url, chapters })
        .collect()
}
