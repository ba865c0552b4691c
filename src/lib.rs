// src/lib.rs
// =============================================================================
// course-index: discovers the chapters of a markdown course, validates their
// previous/next links and exposes the result as an immutable course index.
//
// Modules:
// - config: course.toml (layout file names, link checker settings)
// - model: Chapter, Section, Course
// - discovery: content tree -> Course
// - graph: linked-list audit and navigation
// - checker: external link audit of chapter content
// - error: CourseError
//
// Typical use:
//
//   let course = course_index::load_course(Path::new("content"))?;
//   for section in course.sections() {
//       for chapter in section.linked_order() { /* ... */ }
//   }
// =============================================================================

pub mod checker;
pub mod config;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod model;

pub use config::CourseConfig;
pub use discovery::{load_course, load_course_with};
pub use error::{CourseError, Result};
pub use model::{Chapter, Course, Section, SectionConfig};
