//! What to study next.

use serde::{Deserialize, Serialize};

use crate::id::{Page, Section, TestId};
use crate::record::ProgressRecord;

/// Title shown for the practice page.
pub const PRACTICE_TITLE: &str = "Practice and tests";

/// Where the learner should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "section")]
pub enum Target {
    /// An unfinished curriculum section
    Section(Section),
    /// All sections are done but tests remain
    Practice,
}

/// A recommendation with everything needed to render a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommended target
    pub target: Target,

    /// Human-readable title
    pub title: String,

    /// Navigation target
    pub url: String,
}

impl Recommendation {
    fn section(section: Section) -> Self {
        Self {
            target: Target::Section(section),
            title: section.title().to_string(),
            url: section.page().url(),
        }
    }

    fn practice() -> Self {
        Self {
            target: Target::Practice,
            title: PRACTICE_TITLE.to_string(),
            url: Page::Practice.url(),
        }
    }
}

/// First unfinished section in curriculum order, then practice while tests
/// remain. `None` means the curriculum is finished.
pub fn next_recommendation(record: &ProgressRecord) -> Option<Recommendation> {
    if let Some(section) = Section::ALL
        .into_iter()
        .find(|s| !record.is_section_complete(*s))
    {
        return Some(Recommendation::section(section));
    }

    if record.tests_complete() < TestId::ALL.len() {
        return Some(Recommendation::practice());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_record_recommends_basics() {
        let record = ProgressRecord::new(chrono::Utc::now());
        let rec = next_recommendation(&record).unwrap();
        assert_eq!(rec.target, Target::Section(Section::Basics));
        assert_eq!(rec.url, "basics.html");
        assert_eq!(rec.title, "Game basics");
    }

    #[test]
    fn test_skips_completed_sections_in_order() {
        let mut record = ProgressRecord::new(chrono::Utc::now());
        record.sections.insert(Section::Basics, true);
        record.sections.insert(Section::Yaku, true);
        let rec = next_recommendation(&record).unwrap();
        assert_eq!(rec.target, Target::Section(Section::Tiles));
    }

    #[test]
    fn test_practice_then_none() {
        let mut record = ProgressRecord::new(chrono::Utc::now());
        record.sections.values_mut().for_each(|v| *v = true);
        record.tests.insert(TestId::Test1, true);

        let rec = next_recommendation(&record).unwrap();
        assert_eq!(rec.target, Target::Practice);
        assert_eq!(rec.url, "practice.html");

        record.tests.values_mut().for_each(|v| *v = true);
        assert_eq!(next_recommendation(&record), None);
    }
}
