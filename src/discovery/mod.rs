// src/discovery/mod.rs
// =============================================================================
// Finding sections and chapters on disk and turning them into a Course.
//
// - scan: directory walking and manifest parsing
// - loader: assembly and validation on top of scan
// =============================================================================

mod loader;
mod scan;

pub use loader::{audit_discovered, load_course, load_course_with};
pub use scan::{discover_chapters, discover_section, scan_course, DiscoveredSection};
