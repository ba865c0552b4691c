// src/checker/http.rs
// =============================================================================
// Checks whether the external URLs referenced by chapters are alive.
//
// Key functionality:
// - HTTP HEAD requests (no body download), retried as GET when a server
//   refuses HEAD
// - Redirects are followed by hand so every hop is counted against
//   max_redirects and the final URL can be reported
// - Timeout, redirect limit and concurrency come from course.toml [links]
// - Failure modes (404, timeout, TLS, DNS, ...) mapped onto LinkStatus by
//   walking the whole error source chain
// - Each result remembers which chapters referenced the URL
// =============================================================================

use futures::stream::{self, StreamExt};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::LinkTarget;
use crate::config::LinkCheckSettings;

/// Status of a link after checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "target", rename_all = "snake_case")]
pub enum LinkStatus {
    /// 2xx
    Ok,
    /// 2xx reached through one or more redirects, holds the final URL
    Redirect(String),
    /// 404 or 410
    Broken,
    Timeout,
    SslError,
    TooManyRedirects,
    DnsError,
    /// Anything else, including 5xx
    Error,
}

/// Outcome of checking one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCheckResult {
    pub url: String,
    #[serde(flatten)]
    pub status: LinkStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Ids of the chapters whose content references `url`.
    pub chapters: Vec<String>,
}

impl LinkCheckResult {
    /// Ok and Redirect both count as working.
    pub fn is_ok(&self) -> bool {
        matches!(self.status, LinkStatus::Ok | LinkStatus::Redirect(_))
    }
}

// Checks every target over HTTP.
//
// Parameters:
// - targets: unique URLs, each with the chapters that cite it
// - settings: timeout, redirect limit and concurrency from course.toml
//
// Returns: one LinkCheckResult per target, sorted by URL so reports are
// stable between runs. The only error is failing to build the HTTP client;
// a dead link is a result, not an error.
//
// Rust concepts:
// - `stream::iter(..).buffer_unordered(n)` runs at most n futures at once
// - Client is cheap to clone (it shares one connection pool)
pub async fn check_links(
    targets: Vec<LinkTarget>,
    settings: &LinkCheckSettings,
) -> reqwest::Result<Vec<LinkCheckResult>> {
    // One client for every request (connection pooling). Redirects are not
    // followed automatically, see follow_link.
    let client = Client::builder()
        .timeout(settings.timeout())
        .redirect(Policy::none())
        .build()?;

    let max_redirects = settings.max_redirects;
    let futures = targets.into_iter().map(|target| {
        let client = client.clone();
        async move { check_single_link(client, target, max_redirects).await }
    });

    let mut results: Vec<LinkCheckResult> = stream::iter(futures)
        .buffer_unordered(settings.concurrency.max(1))
        .collect()
        .await;

    results.sort_by(|a, b| a.url.cmp(&b.url));
    Ok(results)
}

async fn check_single_link(client: Client, target: LinkTarget, max_redirects: usize) -> LinkCheckResult {
    let LinkTarget { url, chapters } = target;
    debug!(%url, "checking link");

    let (status, message) = follow_link(&client, &url, max_redirects).await;

    LinkCheckResult {
        url,
        status,
        message: Some(message),
        chapters,
    }
}

// Requests `url` and follows up to `max_redirects` redirects.
//
// Each hop resolves the Location header against the current URL. Running
// out of hops gives TooManyRedirects; a 3xx without a usable Location is an
// Error because there is nothing left to check.
async fn follow_link(client: &Client, url: &str, max_redirects: usize) -> (LinkStatus, String) {
    let mut current = url.to_string();
    let mut hops = 0;

    loop {
        let response = match request(client, &current).await {
            Ok(response) => response,
            Err(e) => return categorize_error(&e),
        };

        let status_code = response.status();
        if !status_code.is_redirection() {
            let redirected_to = (hops > 0).then_some(current.as_str());
            return classify_status(status_code, redirected_to);
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok());
        let Some(next) = location.and_then(|l| resolve_location(&current, l)) else {
            return (
                LinkStatus::Error,
                format!("HTTP {} without a usable Location header", status_code.as_u16()),
            );
        };

        if hops == max_redirects {
            return (
                LinkStatus::TooManyRedirects,
                format!("More than {max_redirects} redirect(s), last -> {next}"),
            );
        }
        hops += 1;
        debug!(from = %current, to = %next, "following redirect");
        current = next;
    }
}

// HEAD first; some hosts refuse it and only answer GET
async fn request(client: &Client, url: &str) -> reqwest::Result<Response> {
    let response = client.head(url).send().await?;
    if needs_get_fallback(response.status()) {
        debug!(%url, status = response.status().as_u16(), "HEAD refused, retrying with GET");
        return client.get(url).send().await;
    }
    Ok(response)
}

fn needs_get_fallback(status_code: StatusCode) -> bool {
    matches!(
        status_code,
        StatusCode::METHOD_NOT_ALLOWED | StatusCode::FORBIDDEN | StatusCode::NOT_IMPLEMENTED
    )
}

// Location may be relative ("/docs/", "../intro")
fn resolve_location(base: &str, location: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(location).ok().map(|url| url.to_string())
}

/// Maps the final (non-redirect) status code to a status.
///
/// `redirected_to` is the URL that answered when redirects were followed.
fn classify_status(status_code: StatusCode, redirected_to: Option<&str>) -> (LinkStatus, String) {
    let code = status_code.as_u16();

    if status_code.is_success() {
        match redirected_to {
            Some(target) => (
                LinkStatus::Redirect(target.to_string()),
                format!("HTTP {code} -> {target}"),
            ),
            None => (LinkStatus::Ok, format!("HTTP {code}")),
        }
    } else if matches!(status_code, StatusCode::NOT_FOUND | StatusCode::GONE) {
        (LinkStatus::Broken, format!("HTTP {code}"))
    } else {
        (LinkStatus::Error, format!("HTTP {code}"))
    }
}

fn categorize_error(error: &reqwest::Error) -> (LinkStatus, String) {
    if error.is_timeout() {
        return (LinkStatus::Timeout, "Request timed out".to_string());
    }
    // reqwest's own message stops at "error sending request"; the resolver
    // and TLS causes are further down the source chain
    categorize_chain(&error_chain(error), error.is_connect())
}

fn categorize_chain(chain: &str, is_connect: bool) -> (LinkStatus, String) {
    let lower = chain.to_lowercase();

    if lower.contains("dns error")
        || lower.contains("failed to lookup address")
        || lower.contains("name or service not known")
    {
        (LinkStatus::DnsError, "Could not resolve hostname".to_string())
    } else if lower.contains("certificate") || lower.contains("ssl") {
        (LinkStatus::SslError, "SSL certificate error".to_string())
    } else if is_connect {
        (LinkStatus::Error, format!("Connection failed: {chain}"))
    } else {
        (LinkStatus::Error, chain.to_string())
    }
}

/// Joins the messages of `error` and all of its sources with ": ".
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_success_and_broken() {
        assert_eq!(
            classify_status(StatusCode::OK, None),
            (LinkStatus::Ok, "HTTP 200".to_string())
        );
        assert_eq!(classify_status(StatusCode::NOT_FOUND, None).0, LinkStatus::Broken);
        assert_eq!(classify_status(StatusCode::GONE, None).0, LinkStatus::Broken);
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, None).0,
            LinkStatus::Error
        );
    }

    #[test]
    fn test_success_after_redirect_reports_final_url() {
        let (status, message) = classify_status(StatusCode::OK, Some("https://new.example.com/"));
        assert_eq!(status, LinkStatus::Redirect("https://new.example.com/".to_string()));
        assert_eq!(message, "HTTP 200 -> https://new.example.com/");

        // A redirect that ends on a dead page is still broken
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND, Some("https://new.example.com/")).0,
            LinkStatus::Broken
        );
    }

    #[test]
    fn test_refused_head_falls_back_to_get() {
        assert!(needs_get_fallback(StatusCode::METHOD_NOT_ALLOWED));
        assert!(needs_get_fallback(StatusCode::FORBIDDEN));
        assert!(needs_get_fallback(StatusCode::NOT_IMPLEMENTED));
        assert!(!needs_get_fallback(StatusCode::OK));
        assert!(!needs_get_fallback(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_resolve_location() {
        let base = "https://example.com/docs/intro";
        assert_eq!(
            resolve_location(base, "/start").as_deref(),
            Some("https://example.com/start")
        );
        assert_eq!(
            resolve_location(base, "setup").as_deref(),
            Some("https://example.com/docs/setup")
        );
        assert_eq!(
            resolve_location(base, "https://other.example.org/").as_deref(),
            Some("https://other.example.org/")
        );
        assert_eq!(resolve_location("not a url", "/start"), None);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("error sending request")]
    struct SendError(#[source] ResolveError);

    #[derive(Debug, thiserror::Error)]
    #[error("dns error: failed to lookup address information")]
    struct ResolveError;

    #[test]
    fn test_dns_cause_is_found_in_source_chain() {
        let error = SendError(ResolveError);
        assert_eq!(error.to_string(), "error sending request");

        let chain = error_chain(&error);
        assert_eq!(
            chain,
            "error sending request: dns error: failed to lookup address information"
        );
        assert_eq!(categorize_chain(&chain, true).0, LinkStatus::DnsError);
    }

    #[test]
    fn test_categorize_chain_fallbacks() {
        assert_eq!(
            categorize_chain("error sending request: invalid peer certificate: UnknownIssuer", true).0,
            LinkStatus::SslError
        );
        assert_eq!(
            categorize_chain("error sending request: connection refused", true),
            (
                LinkStatus::Error,
                "Connection failed: error sending request: connection refused".to_string()
            )
        );
        assert_eq!(
            categorize_chain("builder error", false),
            (LinkStatus::Error, "builder error".to_string())
        );
    }

    #[test]
    fn test_link_result_is_ok() {
        let mut result = LinkCheckResult {
            url: "https://example.com".to_string(),
            status: LinkStatus::Redirect("https://example.org".to_string()),
            message: None,
            chapters: vec!["agent-setup".to_string()],
        };
        assert!(result.is_ok());

        result.status = LinkStatus::Broken;
        assert!(!result.is_ok());
    }

    #[test]
    fn test_result_json_shape() {
        let result = LinkCheckResult {
            url: "https://example.com/".to_string(),
            status: LinkStatus::Broken,
            message: Some("HTTP 404".to_string()),
            chapters: vec!["a".to_string()],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "broken");
        assert_eq!(value["chapters"][0], "a");
    }

    #[tokio::test]
    async fn test_no_targets_needs_no_network() {
        let results = check_links(Vec::new(), &LinkCheckSettings::default())
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
