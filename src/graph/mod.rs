// src/graph/mod.rs
// =============================================================================
// The chapter graph: the previous/next linked list inside each section.
//
// - audit: finds every broken invariant in a section or a whole course
// - nav: id lookup, head-following walk, prev/next resolution
// =============================================================================

mod audit;
mod nav;

pub use audit::{audit_course, audit_section, Direction, Finding, Issue};
pub use nav::{ChapterIndex, Navigation, Walk};
