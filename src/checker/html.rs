// src/checker/html.rs
// =============================================================================
// Pulls external links out of raw HTML embedded in chapter markdown.
//
// Authors sometimes drop <a href="..."> tags straight into markdown (for
// target="_blank", buttons, embeds). pulldown-cmark hands those through as
// opaque Html events, so they are parsed again here with `scraper`.
//
// Only absolute http(s) URLs are kept. Relative hrefs point inside the course
// site itself and are not something an HTTP check can answer.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

/// Absolute http(s) links from `<a href>` elements in an HTML fragment,
/// normalized by `url` (e.g. a trailing `/` is added to bare hosts).
pub fn extract_html_links(fragment: &str) -> Vec<String> {
    let mut links = Vec::new();

    let document = Html::parse_fragment(fragment);
    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        if let Some(url) = element.value().attr("href").and_then(normalize_http_url) {
            links.push(url);
        }
    }

    links
}

/// Parses `href` as an absolute URL and keeps it only for http and https.
pub(crate) fn normalize_http_url(href: &str) -> Option<String> {
    let url = Url::parse(href.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_absolute_anchor() {
        let links = extract_html_links(r#"<a href="https://docs.anthropic.com" target="_blank">Docs</a>"#);
        assert_eq!(links, vec!["https://docs.anthropic.com/"]);
    }

    #[test]
    fn test_opening_tag_alone() {
        // inline HTML arrives one tag at a time
        let links = extract_html_links(r#"<a href="https://example.com/page">"#);
        assert_eq!(links, vec!["https://example.com/page"]);
    }

    #[test]
    fn test_skips_relative_and_special_links() {
        let html = r##"
            <a href="/capstone">Capstone</a>
            <a href="#top">Top</a>
            <a href="mailto:team@example.com">Mail</a>
            <a href="javascript:void(0)">Nope</a>
        "##;
        assert!(extract_html_links(html).is_empty());
    }

    #[test]
    fn test_normalize_http_url() {
        assert_eq!(
            normalize_http_url(" http://example.com "),
            Some("http://example.com/".to_string())
        );
        assert_eq!(normalize_http_url("ftp://example.com"), None);
        assert_eq!(normalize_http_url("./02-agent-setup"), None);
    }
}
