// src/config.rs
// =============================================================================
// course.toml: optional settings that live at the root of the content tree.
//
// Every key has a default, so a course without a course.toml (or with an
// empty one) behaves exactly like:
//
//   [layout]
//   section_manifest = "section.toml"
//   chapter_manifest = "chapter.toml"
//   chapter_content  = "index.md"
//
//   [links]
//   timeout_secs  = 10
//   max_redirects = 5
//   concurrency   = 50
// =============================================================================

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::{CourseError, Result};

/// Name of the config file looked up at the content root.
pub const COURSE_CONFIG_FILE: &str = "course.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CourseConfig {
    /// Display title for the whole course.
    pub title: Option<String>,
    pub layout: LayoutConfig,
    pub links: LinkCheckSettings,
}

/// File names the discovery step looks for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub section_manifest: String,
    pub chapter_manifest: String,
    pub chapter_content: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            section_manifest: "section.toml".to_string(),
            chapter_manifest: "chapter.toml".to_string(),
            chapter_content: "index.md".to_string(),
        }
    }
}

/// Knobs for the external link audit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkCheckSettings {
    pub timeout_secs: u64,
    pub max_redirects: usize,
    pub concurrency: usize,
}

impl Default for LinkCheckSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_redirects: 5,
            concurrency: 50,
        }
    }
}

impl LinkCheckSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CourseConfig {
    /// Loads `course.toml` from `root`, falling back to defaults when the file
    /// does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(COURSE_CONFIG_FILE);
        if !path.is_file() {
            debug!(path = %path.display(), "no course config, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path).map_err(|e| CourseError::io(&path, e))?;
        let config = Self::parse(&text).map_err(|source| CourseError::Manifest {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "loaded course config");
        Ok(config)
    }

    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
