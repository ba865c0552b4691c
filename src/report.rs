// src/report.rs
// =============================================================================
// Terminal output for the CLI: human-readable tables or JSON.
//
// Everything here writes to stdout. Diagnostics go through tracing (stderr).
// =============================================================================

use anyhow::Result;
use serde::Serialize;

use course_index::checker::{LinkCheckResult, LinkStatus};
use course_index::graph::{Finding, Navigation};
use course_index::{Chapter, Course, Section};

pub fn print_findings(findings: &[Finding], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(findings)?);
        return Ok(());
    }

    if findings.is_empty() {
        println!("✅ All chapter links are consistent");
        return Ok(());
    }

    println!("{:<30} {}", "SECTION", "PROBLEM");
    println!("{}", "=".repeat(90));
    for finding in findings {
        println!("{:<30} {}", truncate(&finding.section, 28), finding.issue);
    }
    println!();
    println!("❌ {} problem(s) found", findings.len());
    Ok(())
}

#[derive(Serialize)]
struct ChapterRef<'a> {
    id: &'a str,
    title: &'a str,
}

impl<'a> From<&'a Chapter> for ChapterRef<'a> {
    fn from(chapter: &'a Chapter) -> Self {
        Self {
            id: chapter.id(),
            title: chapter.title(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NavSummary<'a> {
    section_id: &'a str,
    current: ChapterRef<'a>,
    previous: Option<ChapterRef<'a>>,
    next: Option<ChapterRef<'a>>,
    requires_auth: bool,
}

pub fn print_navigation(nav: &Navigation<'_>, json: bool) -> Result<()> {
    let summary = NavSummary {
        section_id: nav.current.section_id(),
        current: nav.current.into(),
        previous: nav.previous.map(ChapterRef::from),
        next: nav.next.map(ChapterRef::from),
        requires_auth: nav.current.requires_auth(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let describe = |chapter: &Option<ChapterRef<'_>>| match chapter {
        Some(c) => format!("{} ({})", c.title, c.id),
        None => "-".to_string(),
    };

    println!("Section:  {}", summary.section_id);
    println!(
        "Chapter:  {} ({}){}",
        summary.current.title,
        summary.current.id,
        if summary.requires_auth { " 🔒" } else { "" }
    );
    println!("Previous: {}", describe(&summary.previous));
    println!("Next:     {}", describe(&summary.next));
    Ok(())
}

pub fn print_outline(course: &Course) {
    if let Some(title) = course.title() {
        println!("{title}");
        println!();
    }

    for section in course.sections() {
        print_section(section);
    }

    println!(
        "📊 {} section(s), {} chapter(s)",
        course.sections().len(),
        course.chapter_count()
    );
}

fn print_section(section: &Section) {
    let config = section.config();
    println!("[{}] {} ({})", config.order, config.title, config.id);
    for (position, chapter) in section.linked_order().enumerate() {
        let lock = if chapter.requires_auth() { " 🔒" } else { "" };
        println!("  {:>2}. {} ({}){}", position + 1, chapter.title(), chapter.id(), lock);
    }
    println!();
}

pub fn print_link_results(results: &[LinkCheckResult], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_link_table(results);
    }
    Ok(())
}

fn print_link_table(results: &[LinkCheckResult]) {
    println!("{:<60} {:<22} {:<30}", "URL", "STATUS", "CHAPTERS");
    println!("{}", "=".repeat(112));

    for result in results {
        println!(
            "{:<60} {:<22} {:<30}",
            truncate(&result.url, 57),
            format_status(&result.status),
            result.chapters.join(", ")
        );
        if let Some(message) = result.message.as_deref().filter(|_| !result.is_ok()) {
            println!("    {message}");
        }
    }

    println!();

    let ok_count = results.iter().filter(|r| r.is_ok()).count();
    let broken_count = results.len() - ok_count;

    println!("📊 Summary:");
    println!("   ✅ OK: {}", ok_count);
    println!("   ❌ Broken: {}", broken_count);
    println!("   📋 Total: {}", results.len());
}

fn format_status(status: &LinkStatus) -> &'static str {
    match status {
        LinkStatus::Ok => "✅ OK",
        LinkStatus::Redirect(_) => "🔀 REDIRECT",
        LinkStatus::Broken => "❌ BROKEN",
        LinkStatus::Timeout => "⏱️  TIMEOUT",
        LinkStatus::SslError => "🔒 SSL ERROR",
        LinkStatus::TooManyRedirects => "🔁 TOO MANY REDIRECTS",
        LinkStatus::DnsError => "🌐 DNS ERROR",
        LinkStatus::Error => "⚠️  ERROR",
    }
}

/// Shortens `text` to `max` characters plus "..." for table columns.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        // never splits a multi-byte character
        assert_eq!(truncate("ééé", 2), "éé...");
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(&LinkStatus::Broken), "❌ BROKEN");
        assert_eq!(
            format_status(&LinkStatus::Redirect("x".to_string())),
            "🔀 REDIRECT"
        );
    }
}
