// src/model/chapter.rs
// =============================================================================
// One learning unit.
//
// There are two shapes here:
// - ChapterManifest: what an author writes in chapter.toml
// - Chapter: the loaded record, manifest + markdown content + owning section
//
// A Chapter is only ever built by Chapter::new, so section_id is always the
// id of the section that discovered it. Nothing mutates a Chapter afterwards.
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Authored chapter metadata, deserialized from `chapter.toml`.
///
/// ```toml
/// id = "codebase-analysis"
/// title = "Codebase Analysis"
/// next_chapter_id = "feature-addition"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChapterManifest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub previous_chapter_id: Option<String>,
    #[serde(default)]
    pub next_chapter_id: Option<String>,
    #[serde(default)]
    pub requires_auth: bool,
    /// Opaque exercise payload. Any TOML value is accepted and passed through.
    #[serde(default)]
    pub exercise: Option<Value>,
}

/// A discovered chapter, owned by exactly one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    id: String,
    title: String,
    previous_chapter_id: Option<String>,
    next_chapter_id: Option<String>,
    requires_auth: bool,
    exercise: Option<Value>,
    content: String,
    section_id: String,
}

impl Chapter {
    /// Builds the loaded record from its authored fields, its content and
    /// the id of the section it was discovered in.
    pub fn new(manifest: ChapterManifest, content: String, section_id: impl Into<String>) -> Self {
        let ChapterManifest {
            id,
            title,
            previous_chapter_id,
            next_chapter_id,
            requires_auth,
            exercise,
        } = manifest;

        Self {
            id,
            title,
            previous_chapter_id,
            next_chapter_id,
            requires_auth,
            exercise,
            content,
            section_id: section_id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn previous_chapter_id(&self) -> Option<&str> {
        self.previous_chapter_id.as_deref()
    }

    pub fn next_chapter_id(&self) -> Option<&str> {
        self.next_chapter_id.as_deref()
    }

    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    pub fn exercise(&self) -> Option<&Value> {
        self.exercise.as_ref()
    }

    /// Raw markdown, exactly as read from disk.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    pub fn is_head(&self) -> bool {
        self.previous_chapter_id.is_none()
    }

    pub fn is_tail(&self) -> bool {
        self.next_chapter_id.is_none()
    }
}

/// Shorthand used by tests across the crate.
#[cfg(test)]
pub(crate) fn linked(id: &str, previous: Option<&str>, next: Option<&str>) -> Chapter {
    Chapter::new(
        ChapterManifest {
            id: id.to_string(),
            title: id.to_uppercase(),
            previous_chapter_id: previous.map(str::to_string),
            next_chapter_id: next.map(str::to_string),
            requires_auth: false,
            exercise: None,
        },
        format!("# {id}\n"),
        "test-section",
    )
}
