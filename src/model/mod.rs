// src/model/mod.rs
// =============================================================================
// The course data model: chapters, sections and the course index.
//
// All records are built once by the loader and read-only afterwards.
// =============================================================================

mod chapter;
mod course;
mod section;

pub use chapter::{Chapter, ChapterManifest};
pub use course::Course;
pub use section::{Section, SectionConfig};

#[cfg(test)]
pub(crate) use chapter::linked;
