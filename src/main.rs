// src/main.rs
// =============================================================================
// Entry point of the course-index CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Dispatch to the subcommand handler
// 4. Exit with a code CI can act on:
//      0 = everything is fine
//      1 = problems found (broken chapter links, unknown chapter, dead URLs)
//      2 = the command itself failed (unreadable tree, malformed manifest)
// =============================================================================

mod cli;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use course_index::checker::{check_links, collect_course_links};
use course_index::discovery::{audit_discovered, scan_course};
use course_index::{load_course, load_course_with, CourseConfig};

// Only `links` does async work, but a single runtime keeps main simple
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("course_index={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check { root, json } => handle_check(&root, json),
        Commands::Export {
            root,
            output,
            compact,
        } => handle_export(&root, output.as_deref(), compact),
        Commands::Nav {
            root,
            chapter_id,
            json,
        } => handle_nav(&root, &chapter_id, json),
        Commands::Outline { root } => handle_outline(&root),
        Commands::Links { root, json } => handle_links(&root, json).await,
    }
}

// Scans without failing fast so every problem shows up in one report
fn handle_check(root: &Path, json: bool) -> Result<i32> {
    let config = load_config(root)?;
    let sections = scan_course(root, &config.layout)
        .with_context(|| format!("failed to scan {}", root.display()))?;
    info!(sections = sections.len(), "scanned content tree");

    let findings = audit_discovered(&sections);
    report::print_findings(&findings, json)?;

    Ok(if findings.is_empty() { 0 } else { 1 })
}

fn handle_export(root: &Path, output: Option<&Path>, compact: bool) -> Result<i32> {
    let course = load(root)?;

    let json = if compact {
        serde_json::to_string(&course)?
    } else {
        serde_json::to_string_pretty(&course)?
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "course exported");
        }
        None => println!("{json}"),
    }

    Ok(0)
}

fn handle_nav(root: &Path, chapter_id: &str, json: bool) -> Result<i32> {
    let course = load(root)?;

    match course.navigation(chapter_id) {
        Some(nav) => {
            report::print_navigation(&nav, json)?;
            Ok(0)
        }
        None => {
            eprintln!("No chapter with id `{chapter_id}`");
            Ok(1)
        }
    }
}

fn handle_outline(root: &Path) -> Result<i32> {
    let course = load(root)?;
    report::print_outline(&course);
    Ok(0)
}

async fn handle_links(root: &Path, json: bool) -> Result<i32> {
    let config = load_config(root)?;
    let course = load_course_with(root, &config)
        .with_context(|| format!("failed to load course from {}", root.display()))?;

    let targets = collect_course_links(&course);
    if targets.is_empty() {
        if json {
            println!("[]");
        } else {
            println!("✅ No external links found in chapter content");
        }
        return Ok(0);
    }

    eprintln!("🌐 Checking {} unique link(s)...", targets.len());
    let results = check_links(targets, &config.links)
        .await
        .context("failed to build HTTP client")?;
    report::print_link_results(&results, json)?;

    let broken_count = results.iter().filter(|r| !r.is_ok()).count();
    Ok(if broken_count > 0 { 1 } else { 0 })
}

fn load_config(root: &Path) -> Result<CourseConfig> {
    CourseConfig::load(root).with_context(|| format!("failed to load config from {}", root.display()))
}

fn load(root: &Path) -> Result<course_index::Course> {
    load_course(root).with_context(|| format!("failed to load course from {}", root.display()))
}
