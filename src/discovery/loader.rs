// src/discovery/loader.rs
// =============================================================================
// From a content root to a validated Course.
//
//   course.toml ──> CourseConfig
//   scan_course ──> Vec<DiscoveredSection>   (raw, links unchecked)
//   assemble    ──> Vec<Section>             (links checked, fail fast)
//   Course::assemble ──> Course              (course-wide ids checked, sorted)
// =============================================================================

use std::path::Path;
use tracing::info;

use super::scan::{scan_course, DiscoveredSection};
use crate::config::CourseConfig;
use crate::error::Result;
use crate::graph::{audit_course, Finding};
use crate::model::{Course, Section};

impl DiscoveredSection {
    /// Validates the chapter links and builds the section.
    pub fn assemble(self) -> Result<Section> {
        Section::assemble(self.config, self.chapters)
    }
}

/// Loads `course.toml` (if any) and the whole course under `root`.
pub fn load_course(root: &Path) -> Result<Course> {
    let config = CourseConfig::load(root)?;
    load_course_with(root, &config)
}

/// Same as [`load_course`] with an already loaded config.
pub fn load_course_with(root: &Path, config: &CourseConfig) -> Result<Course> {
    let discovered = scan_course(root, &config.layout)?;
    let sections = discovered
        .into_iter()
        .map(DiscoveredSection::assemble)
        .collect::<Result<Vec<_>>>()?;

    let course = Course::assemble(config.title.clone(), sections)?;
    info!(
        root = %root.display(),
        sections = course.sections().len(),
        chapters = course.chapter_count(),
        "course loaded"
    );
    Ok(course)
}

/// Every link problem in a scanned tree, without stopping at the first.
pub fn audit_discovered(sections: &[DiscoveredSection]) -> Vec<Finding> {
    audit_course(
        sections
            .iter()
            .map(|s| (s.config.id.as_str(), s.chapters.as_slice())),
    )
}
