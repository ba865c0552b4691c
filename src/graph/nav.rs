// src/graph/nav.rs
// =============================================================================
// Walking the previous/next links of a section.
//
// Chapters are stored in discovery order (directory names), which is not the
// reading order. Reading order comes from starting at the head and following
// next_chapter_id until it runs out. ChapterIndex is the id -> chapter lookup
// that makes both the walk and prev/next resolution cheap.
// =============================================================================

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::model::Chapter;

/// Borrowed id -> chapter lookup over one section's chapters.
///
/// If ids repeat, the first chapter in discovery order wins; the audit
/// reports the duplicate separately.
#[derive(Debug)]
pub struct ChapterIndex<'a> {
    by_id: HashMap<&'a str, &'a Chapter>,
}

/// Result of following next links from a head.
#[derive(Debug)]
pub struct Walk<'a> {
    /// Chapters in reading order, each at most once.
    pub order: Vec<&'a Chapter>,
    /// Set when the walk stopped because a chapter came up twice.
    pub cycle_at: Option<&'a str>,
}

impl<'a> ChapterIndex<'a> {
    pub fn new(chapters: &'a [Chapter]) -> Self {
        let mut by_id = HashMap::with_capacity(chapters.len());
        for chapter in chapters {
            by_id.entry(chapter.id()).or_insert(chapter);
        }
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Chapter> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Follows `next_chapter_id` from `head`. Stops at a null link, a link to
    /// an unknown id, or the first repeated chapter.
    pub fn walk(&self, head: &'a Chapter) -> Walk<'a> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(head);

        while let Some(chapter) = current {
            if !seen.insert(chapter.id()) {
                return Walk {
                    order,
                    cycle_at: Some(chapter.id()),
                };
            }
            order.push(chapter);
            current = chapter.next_chapter_id().and_then(|id| self.get(id));
        }

        Walk {
            order,
            cycle_at: None,
        }
    }
}

/// The neighbours of one chapter. `None` means there is no such chapter and
/// the matching control should be disabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation<'a> {
    pub current: &'a Chapter,
    pub previous: Option<&'a Chapter>,
    pub next: Option<&'a Chapter>,
}

impl<'a> Navigation<'a> {
    /// Resolves the links of `current` against `lookup`. A null link and a
    /// link to an unknown id both resolve to `None`.
    pub fn resolve<F>(current: &'a Chapter, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'a Chapter>,
    {
        Self {
            current,
            previous: current.previous_chapter_id().and_then(&lookup),
            next: current.next_chapter_id().and_then(&lookup),
        }
    }
}
