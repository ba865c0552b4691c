// src/discovery/scan.rs
// =============================================================================
// Walks a content tree and reads the manifests it finds.
//
// Layout (file names come from course.toml [layout]):
//
//   <root>/
//     <section-dir>/section.toml
//     <section-dir>/<chapter-dir>/chapter.toml
//     <section-dir>/<chapter-dir>/index.md
//
// Directories are visited in name order, so "01-intro" comes before
// "02-setup" and two scans of the same tree always agree. Hidden directories
// (".git", ".cache", ...) are never looked at.
//
// Nothing here checks chapter links; that is Section::assemble's job. This
// split lets `course-index check` report every broken link in one go.
// =============================================================================

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::{CourseError, Result};
use crate::model::{Chapter, ChapterManifest, SectionConfig};

/// A section read from disk whose chapter links have not been checked yet.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredSection {
    pub dir: PathBuf,
    pub config: SectionConfig,
    pub chapters: Vec<Chapter>,
}

/// Finds every section under `root`.
///
/// A subdirectory is a section when it holds the section manifest; other
/// subdirectories are skipped.
pub fn scan_course(root: &Path, layout: &LayoutConfig) -> Result<Vec<DiscoveredSection>> {
    let mut sections = Vec::new();

    for dir in sorted_subdirs(root)? {
        if !dir.join(&layout.section_manifest).is_file() {
            debug!(dir = %dir.display(), "no section manifest, skipping");
            continue;
        }
        sections.push(discover_section(&dir, layout)?);
    }

    Ok(sections)
}

/// Reads one section directory: its manifest and all of its chapters.
pub fn discover_section(section_dir: &Path, layout: &LayoutConfig) -> Result<DiscoveredSection> {
    let manifest_path = section_dir.join(&layout.section_manifest);
    let config: SectionConfig = read_manifest(&manifest_path)?;
    if config.id.trim().is_empty() {
        return Err(CourseError::EmptyId {
            path: manifest_path,
        });
    }

    let chapters = discover_chapters(section_dir, &config.id, layout)?;
    debug!(
        section = %config.id,
        chapters = chapters.len(),
        "discovered section"
    );

    Ok(DiscoveredSection {
        dir: section_dir.to_path_buf(),
        config,
        chapters,
    })
}

// Loads every chapter directly under a section directory.
//
// Parameters:
// - section_dir: the directory holding one subdirectory per chapter
// - section_id: stamped onto every chapter built here
// - layout: names of the manifest and content files
//
// Returns: the chapters in directory-name order (not the linked order), or
// the first error met. A subdirectory with neither a manifest nor a content
// file is ignored. One with only one of the two is an error, so a
// half-written chapter never vanishes from the course.
//
// Rust concepts:
// - Matching on a tuple of booleans covers all four file combinations
// - `?` returns early, so there is no partial result
pub fn discover_chapters(
    section_dir: &Path,
    section_id: &str,
    layout: &LayoutConfig,
) -> Result<Vec<Chapter>> {
    let mut chapters = Vec::new();

    for dir in sorted_subdirs(section_dir)? {
        let manifest_path = dir.join(&layout.chapter_manifest);
        let content_path = dir.join(&layout.chapter_content);

        match (manifest_path.is_file(), content_path.is_file()) {
            (false, false) => {
                debug!(dir = %dir.display(), "not a chapter directory, skipping");
            }
            (false, true) => return Err(CourseError::MissingManifest { path: dir }),
            (true, false) => {
                return Err(CourseError::MissingContent {
                    path: manifest_path,
                })
            }
            (true, true) => {
                let manifest: ChapterManifest = read_manifest(&manifest_path)?;
                if manifest.id.trim().is_empty() {
                    return Err(CourseError::EmptyId {
                        path: manifest_path,
                    });
                }
                let content = fs::read_to_string(&content_path)
                    .map_err(|e| CourseError::io(&content_path, e))?;
                chapters.push(Chapter::new(manifest, content, section_id));
            }
        }
    }

    Ok(chapters)
}

fn read_manifest<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| CourseError::io(path, e))?;
    toml::from_str(&text).map_err(|source| CourseError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Non-hidden subdirectories of `dir`, sorted by name.
fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| CourseError::io(dir, e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CourseError::io(dir, e))?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && path.is_dir() {
            dirs.push(path);
        }
    }

    dirs.sort();
    Ok(dirs)
}
