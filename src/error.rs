// src/error.rs
// =============================================================================
// Errors produced while loading a course.
//
// Everything here happens once, before the course is served or exported, so
// every variant is fatal for the load that produced it. The CLI wraps these in
// anyhow with extra context; library callers can match on the variants.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

use crate::graph::Issue;

/// Convenience alias used across the library.
pub type Result<T> = std::result::Result<T, CourseError>;

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("chapter directory {path} has content but no manifest")]
    MissingManifest { path: PathBuf },

    #[error("chapter manifest {path} has no content file")]
    MissingContent { path: PathBuf },

    #[error("manifest {path} declares an empty id")]
    EmptyId { path: PathBuf },

    #[error("section `{section}`: {issue}")]
    Link { section: String, issue: Issue },

    #[error("section id `{id}` is used by more than one section")]
    DuplicateSectionId { id: String },

    #[error("chapter id `{id}` appears in both section `{first}` and section `{second}`")]
    DuplicateChapterId {
        id: String,
        first: String,
        second: String,
    },
}

impl CourseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CourseError::Io {
            path: path.into(),
            source,
        }
    }
}
