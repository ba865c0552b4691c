// src/graph/audit.rs
// =============================================================================
// Consistency checks for the previous/next chapter lists.
//
// A section is healthy when:
// - every chapter id is unique
// - every link points at a chapter of the same section
// - links are mirrored (a.next == b  <=>  b.previous == a)
// - there is exactly one head and exactly one tail
// - walking next links from the head reaches every chapter exactly once
//
// audit_section collects every problem instead of stopping at the first one,
// so `course-index check` can print a complete report. Section::assemble uses
// the same function and rejects the section on the first issue.
// =============================================================================

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::nav::ChapterIndex;
use crate::model::Chapter;

/// Which link of a chapter an issue is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Previous,
    Next,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Previous => f.write_str("previous"),
            Direction::Next => f.write_str("next"),
        }
    }
}

/// One problem in a section's chapter graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    #[error("section has no chapters")]
    EmptySection,

    #[error("chapter id `{id}` is used by {count} chapters")]
    DuplicateId { id: String, count: usize },

    #[error("chapter `{chapter}` is stamped with section `{owner}`")]
    ForeignChapter { chapter: String, owner: String },

    #[error("chapter `{chapter}` has a {direction} link to missing chapter `{target}`")]
    Dangling {
        chapter: String,
        direction: Direction,
        target: String,
    },

    #[error(
        "chapter `{chapter}` has a {direction} link to `{target}`, but `{target}` links back to {}",
        back_label(.back)
    )]
    Asymmetric {
        chapter: String,
        direction: Direction,
        target: String,
        back: Option<String>,
    },

    #[error("no head chapter (every chapter has a previous chapter)")]
    MissingHead,

    #[error("more than one head chapter: {}", .ids.join(", "))]
    MultipleHeads { ids: Vec<String> },

    #[error("no tail chapter (every chapter has a next chapter)")]
    MissingTail,

    #[error("more than one tail chapter: {}", .ids.join(", "))]
    MultipleTails { ids: Vec<String> },

    #[error("following next links from `{head}` comes back to `{at}`")]
    Cycle { head: String, at: String },

    #[error("chapters not reachable from the head: {}", .ids.join(", "))]
    Unreachable { ids: Vec<String> },

    #[error("section id `{id}` is used by more than one section")]
    DuplicateSection { id: String },

    #[error("chapter id `{id}` is also used in section `{other}`")]
    SharedChapterId { id: String, other: String },
}

/// An issue tagged with the section it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub section: String,
    #[serde(flatten)]
    pub issue: Issue,
}

// Checks one section's chapters and collects every issue found.
//
// Parameters:
// - section_id: the id every chapter should be stamped with
// - chapters: the section's chapters in discovery order
//
// Returns: the issues in a fixed order (empty section, duplicate ids,
// foreign chapters, dangling and asymmetric links, heads, tails, cycle,
// unreachable chapters). An empty Vec means the section is valid.
//
// Rust concepts:
// - `let ... else` skips links that are absent or dangling
// - `if let [head] = heads.as_slice()` only walks when there is one head
pub fn audit_section(section_id: &str, chapters: &[Chapter]) -> Vec<Issue> {
    if chapters.is_empty() {
        return vec![Issue::EmptySection];
    }

    // Lookups are ambiguous with repeated ids, so nothing else is checked.
    let duplicates = duplicate_ids(chapters);
    if !duplicates.is_empty() {
        return duplicates;
    }

    let mut issues = Vec::new();
    let index = ChapterIndex::new(chapters);

    for chapter in chapters {
        if chapter.section_id() != section_id {
            issues.push(Issue::ForeignChapter {
                chapter: chapter.id().to_string(),
                owner: chapter.section_id().to_string(),
            });
        }
    }

    for chapter in chapters {
        let links = [
            (Direction::Previous, chapter.previous_chapter_id()),
            (Direction::Next, chapter.next_chapter_id()),
        ];
        for (direction, link) in links {
            let Some(target) = link else { continue };
            let Some(other) = index.get(target) else {
                issues.push(Issue::Dangling {
                    chapter: chapter.id().to_string(),
                    direction,
                    target: target.to_string(),
                });
                continue;
            };
            let back = match direction {
                Direction::Previous => other.next_chapter_id(),
                Direction::Next => other.previous_chapter_id(),
            };
            if back != Some(chapter.id()) {
                issues.push(Issue::Asymmetric {
                    chapter: chapter.id().to_string(),
                    direction,
                    target: target.to_string(),
                    back: back.map(str::to_string),
                });
            }
        }
    }

    let heads: Vec<&Chapter> = chapters.iter().filter(|c| c.is_head()).collect();
    let tails: Vec<&Chapter> = chapters.iter().filter(|c| c.is_tail()).collect();

    match heads.len() {
        0 => issues.push(Issue::MissingHead),
        1 => {}
        _ => issues.push(Issue::MultipleHeads { ids: owned_ids(&heads) }),
    }
    match tails.len() {
        0 => issues.push(Issue::MissingTail),
        1 => {}
        _ => issues.push(Issue::MultipleTails { ids: owned_ids(&tails) }),
    }

    if let [head] = heads.as_slice() {
        let walk = index.walk(*head);
        if let Some(at) = walk.cycle_at {
            issues.push(Issue::Cycle {
                head: head.id().to_string(),
                at: at.to_string(),
            });
        }

        let reached: HashSet<&str> = walk.order.iter().map(|c| c.id()).collect();
        let unreachable: Vec<String> = chapters
            .iter()
            .filter(|c| !reached.contains(c.id()))
            .map(|c| c.id().to_string())
            .collect();
        if !unreachable.is_empty() {
            issues.push(Issue::Unreachable { ids: unreachable });
        }
    }

    issues
}

/// Audits every section and the ids shared between them.
///
/// Sections are visited in the given order; a repeated section id or a
/// chapter id already claimed by an earlier section is reported against the
/// later section.
pub fn audit_course<'a, I>(sections: I) -> Vec<Finding>
where
    I: IntoIterator<Item = (&'a str, &'a [Chapter])>,
{
    let mut findings = Vec::new();
    let mut seen_sections = HashSet::new();
    let mut chapter_owner: HashMap<&str, &str> = HashMap::new();

    for (section_id, chapters) in sections {
        let mut push = |issue| {
            findings.push(Finding {
                section: section_id.to_string(),
                issue,
            })
        };

        if !seen_sections.insert(section_id) {
            push(Issue::DuplicateSection {
                id: section_id.to_string(),
            });
        }

        for issue in audit_section(section_id, chapters) {
            push(issue);
        }

        let mut local = HashSet::new();
        for chapter in chapters {
            if !local.insert(chapter.id()) {
                continue;
            }
            match chapter_owner.get(chapter.id()) {
                Some(other) if *other != section_id => push(Issue::SharedChapterId {
                    id: chapter.id().to_string(),
                    other: other.to_string(),
                }),
                Some(_) => {}
                None => {
                    chapter_owner.insert(chapter.id(), section_id);
                }
            }
        }
    }

    findings
}

fn duplicate_ids(chapters: &[Chapter]) -> Vec<Issue> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for chapter in chapters {
        *counts.entry(chapter.id()).or_default() += 1;
    }

    let mut reported = HashSet::new();
    chapters
        .iter()
        .filter_map(|chapter| {
            let count = counts[chapter.id()];
            (count > 1 && reported.insert(chapter.id())).then(|| Issue::DuplicateId {
                id: chapter.id().to_string(),
                count,
            })
        })
        .collect()
}

fn back_label(back: &Option<String>) -> String {
    match back {
        Some(id) => format!("`{id}`"),
        None => "nothing".to_string(),
    }
}

fn owned_ids(chapters: &[&Chapter]) -> Vec<String> {
    chapters.iter().map(|c| c.id().to_string()).collect()
}
