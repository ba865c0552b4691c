// src/model/section.rs
// =============================================================================
// A section: static metadata plus the chapters discovered under it.
//
// Section::assemble is the only way to build one, and it refuses chapter
// lists that break the linked-list rules (see graph::audit). That means any
// Section in hand has a unique head, a unique tail and one chain between
// them, so navigation never has to handle a broken graph.
// =============================================================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Chapter;
use crate::error::{CourseError, Result};
use crate::graph::{audit_section, ChapterIndex, Navigation};

/// Authored section metadata, deserialized from `section.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Position among all sections, lowest first.
    pub order: i32,
}

/// Serializes as `{ "config": {..}, "chapters": [..] }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    config: SectionConfig,
    chapters: Vec<Chapter>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip)]
    reading_order: Vec<usize>,
}

impl Section {
    /// Binds `config` to its discovered chapters, validating the chapter links.
    ///
    /// Fails with [`CourseError::Link`] on the first problem found, naming the
    /// section and the offending chapter id.
    pub fn assemble(config: SectionConfig, chapters: Vec<Chapter>) -> Result<Self> {
        if let Some(issue) = audit_section(&config.id, &chapters).into_iter().next() {
            return Err(CourseError::Link {
                section: config.id,
                issue,
            });
        }

        let index: HashMap<String, usize> = chapters
            .iter()
            .enumerate()
            .map(|(position, chapter)| (chapter.id().to_string(), position))
            .collect();

        let reading_order = {
            let lookup = ChapterIndex::new(&chapters);
            match chapters.iter().find(|c| c.is_head()) {
                Some(head) => lookup
                    .walk(head)
                    .order
                    .iter()
                    .filter_map(|c| index.get(c.id()).copied())
                    .collect(),
                None => Vec::new(),
            }
        };

        Ok(Self {
            config,
            chapters,
            index,
            reading_order,
        })
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &SectionConfig {
        &self.config
    }

    /// Chapters in discovery order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter(&self, id: &str) -> Option<&Chapter> {
        self.index.get(id).map(|&position| &self.chapters[position])
    }

    /// Chapters in reading order, head first.
    pub fn linked_order(&self) -> impl Iterator<Item = &Chapter> + '_ {
        self.reading_order
            .iter()
            .map(move |&position| &self.chapters[position])
    }

    pub fn head(&self) -> Option<&Chapter> {
        self.linked_order().next()
    }

    pub fn tail(&self) -> Option<&Chapter> {
        self.reading_order
            .last()
            .map(|&position| &self.chapters[position])
    }

    /// Previous/next chapters of `id`, or `None` if the section has no such
    /// chapter.
    pub fn navigation(&self, id: &str) -> Option<Navigation<'_>> {
        let current = self.chapter(id)?;
        Some(Navigation::resolve(current, |target| self.chapter(target)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Direction, Issue};
    use crate::model::linked;
    use pretty_assertions::assert_eq;

    fn config() -> SectionConfig {
        SectionConfig {
            id: "test-section".to_string(),
            title: "Test Section".to_string(),
            description: String::new(),
            order: 1,
        }
    }

    fn ids<'a>(chapters: impl Iterator<Item = &'a Chapter>) -> Vec<&'a str> {
        chapters.map(Chapter::id).collect()
    }

    #[test]
    fn test_linked_order_regardless_of_discovery_order() {
        let section = Section::assemble(
            config(),
            vec![linked("b", Some("a"), None), linked("a", None, Some("b"))],
        )
        .unwrap();
        assert_eq!(ids(section.chapters().iter()), vec!["b", "a"]);
        assert_eq!(ids(section.linked_order()), vec!["a", "b"]);
        assert_eq!(section.head().map(Chapter::id), Some("a"));
        assert_eq!(section.tail().map(Chapter::id), Some("b"));
    }

    #[test]
    fn test_navigation() {
        let section = Section::assemble(
            config(),
            vec![
                linked("a", None, Some("b")),
                linked("b", Some("a"), Some("c")),
                linked("c", Some("b"), None),
            ],
        )
        .unwrap();

        let nav = section.navigation("b").unwrap();
        assert_eq!(nav.previous.map(Chapter::id), Some("a"));
        assert_eq!(nav.next.map(Chapter::id), Some("c"));

        let first = section.navigation("a").unwrap();
        assert!(first.previous.is_none());
        assert!(section.navigation("zzz").is_none());
    }

    #[test]
    fn test_dangling_reference_is_rejected() {
        let err = Section::assemble(
            config(),
            vec![
                linked("a", None, Some("b")),
                linked("b", Some("a"), Some("missing-id")),
            ],
        )
        .unwrap_err();

        match &err {
            CourseError::Link { section, issue } => {
                assert_eq!(section, "test-section");
                assert_eq!(
                    issue,
                    &Issue::Dangling {
                        chapter: "b".to_string(),
                        direction: Direction::Next,
                        target: "missing-id".to_string(),
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("missing-id"));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let err = Section::assemble(
            config(),
            vec![linked("a", None, None), linked("a", None, None)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CourseError::Link {
                issue: Issue::DuplicateId { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_serializes_config_and_chapters_only() {
        let section = Section::assemble(config(), vec![linked("a", None, None)]).unwrap();
        let value = serde_json::to_value(&section).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["chapters", "config"]);
        assert_eq!(value["config"]["order"], 1);
    }
}
