// src/model/course.rs
// =============================================================================
// The course index: every section, ordered for display.
//
// Sections are sorted by (order, id) so two sections sharing an `order`
// still come out in a stable position. Chapter ids must be unique across the
// whole course, which lets navigation look a chapter up without knowing its
// section.
// =============================================================================

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::{Chapter, Section};
use crate::error::{CourseError, Result};
use crate::graph::Navigation;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    sections: Vec<Section>,
    /// chapter id -> position of its section in `sections`
    #[serde(skip)]
    owners: HashMap<String, usize>,
}

impl Course {
    /// Combines assembled sections into the course index.
    pub fn assemble(title: Option<String>, mut sections: Vec<Section>) -> Result<Self> {
        let mut section_ids = HashSet::new();
        for section in &sections {
            if !section_ids.insert(section.id()) {
                return Err(CourseError::DuplicateSectionId {
                    id: section.id().to_string(),
                });
            }
        }

        let mut chapter_sections: HashMap<&str, &str> = HashMap::new();
        for section in &sections {
            for chapter in section.chapters() {
                if let Some(first) = chapter_sections.insert(chapter.id(), section.id()) {
                    return Err(CourseError::DuplicateChapterId {
                        id: chapter.id().to_string(),
                        first: first.to_string(),
                        second: section.id().to_string(),
                    });
                }
            }
        }

        sections.sort_by(|a, b| {
            a.config()
                .order
                .cmp(&b.config().order)
                .then_with(|| a.id().cmp(b.id()))
        });

        let owners = sections
            .iter()
            .enumerate()
            .flat_map(|(position, section)| {
                section
                    .chapters()
                    .iter()
                    .map(move |chapter| (chapter.id().to_string(), position))
            })
            .collect();

        Ok(Self {
            title,
            sections,
            owners,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Sections in display order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id() == id)
    }

    /// The section that owns chapter `id`.
    pub fn section_of(&self, chapter_id: &str) -> Option<&Section> {
        self.owners
            .get(chapter_id)
            .map(|&position| &self.sections[position])
    }

    pub fn find_chapter(&self, id: &str) -> Option<&Chapter> {
        self.section_of(id)?.chapter(id)
    }

    pub fn navigation(&self, id: &str) -> Option<Navigation<'_>> {
        self.section_of(id)?.navigation(id)
    }

    /// Every chapter, section by section in display order, each section in
    /// reading order.
    pub fn chapters(&self) -> impl Iterator<Item = &Chapter> + '_ {
        self.sections.iter().flat_map(Section::linked_order)
    }

    pub fn chapter_count(&self) -> usize {
        self.owners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChapterManifest, SectionConfig};
    use pretty_assertions::assert_eq;

    fn chapter(section: &str, id: &str, prev: Option<&str>, next: Option<&str>) -> Chapter {
        Chapter::new(
            ChapterManifest {
                id: id.to_string(),
                title: id.to_string(),
                previous_chapter_id: prev.map(str::to_string),
                next_chapter_id: next.map(str::to_string),
                requires_auth: false,
                exercise: None,
            },
            String::new(),
            section,
        )
    }

    fn section(id: &str, order: i32, chapters: Vec<Chapter>) -> Section {
        Section::assemble(
            SectionConfig {
                id: id.to_string(),
                title: id.to_string(),
                description: String::new(),
                order,
            },
            chapters,
        )
        .unwrap()
    }

    #[test]
    fn test_sections_sorted_by_order_then_id() {
        let course = Course::assemble(
            None,
            vec![
                section("capstone", 5, vec![chapter("capstone", "greenfield", None, None)]),
                section("fundamentals", 1, vec![chapter("fundamentals", "llm", None, None)]),
                section("brownfield", 5, vec![chapter("brownfield", "analysis", None, None)]),
            ],
        )
        .unwrap();
        let ids: Vec<&str> = course.sections().iter().map(Section::id).collect();
        assert_eq!(ids, vec!["fundamentals", "brownfield", "capstone"]);
    }

    #[test]
    fn test_lookup_across_sections() {
        let course = Course::assemble(
            Some("Course".to_string()),
            vec![
                section(
                    "one",
                    1,
                    vec![
                        chapter("one", "a", None, Some("b")),
                        chapter("one", "b", Some("a"), None),
                    ],
                ),
                section("two", 2, vec![chapter("two", "c", None, None)]),
            ],
        )
        .unwrap();

        assert_eq!(course.chapter_count(), 3);
        assert_eq!(course.section_of("c").map(Section::id), Some("two"));
        assert_eq!(course.find_chapter("b").map(Chapter::section_id), Some("one"));
        let nav = course.navigation("a").unwrap();
        assert_eq!(nav.next.map(Chapter::id), Some("b"));
        assert!(course.navigation("missing").is_none());

        let order: Vec<&str> = course.chapters().map(Chapter::id).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_section_id() {
        let err = Course::assemble(
            None,
            vec![
                section("one", 1, vec![chapter("one", "a", None, None)]),
                section("one", 2, vec![chapter("one", "b", None, None)]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, CourseError::DuplicateSectionId { id } if id == "one"));
    }

    #[test]
    fn test_chapter_id_shared_between_sections() {
        let err = Course::assemble(
            None,
            vec![
                section("one", 1, vec![chapter("one", "intro", None, None)]),
                section("two", 2, vec![chapter("two", "intro", None, None)]),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "chapter id `intro` appears in both section `one` and section `two`"
        );
    }
}
