//! The persisted progress record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::{Page, Section, TestId};
use crate::Time;

/// Schema version written by this crate.
pub const SCHEMA_VERSION: u32 = 1;

/// Everything we know about one learner's progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Layout version of the stored record
    #[serde(rename = "schemaVersion", default)]
    pub schema_version: u32,

    /// Completion flag per section
    pub sections: BTreeMap<Section, bool>,

    /// Pass flag per test
    pub tests: BTreeMap<TestId, bool>,

    /// Yaku studied so far, in the order they were learned
    #[serde(default)]
    pub yaku_learned: Vec<String>,

    /// Visit counter per page
    pub visits: BTreeMap<Page, u64>,

    /// Time of the last save
    #[serde(rename = "lastVisit")]
    pub last_visit: Time,
}

impl ProgressRecord {
    /// A blank record: nothing completed, nothing visited.
    pub fn new(now: Time) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            sections: Section::ALL.iter().map(|s| (*s, false)).collect(),
            tests: TestId::ALL.iter().map(|t| (*t, false)).collect(),
            yaku_learned: Vec::new(),
            visits: Page::ALL.iter().map(|p| (*p, 0)).collect(),
            last_visit: now,
        }
    }

    /// Restore the fixed key sets and clean up the yaku list.
    ///
    /// Stored records may predate a key or have been edited by hand; after
    /// this call every section, test and page is present exactly once.
    pub fn normalize(&mut self) {
        for section in Section::ALL {
            self.sections.entry(section).or_insert(false);
        }
        for test in TestId::ALL {
            self.tests.entry(test).or_insert(false);
        }
        for page in Page::ALL {
            self.visits.entry(page).or_insert(0);
        }

        // Names are stored trimmed; older records may hold padded or blank ones.
        let mut seen = std::collections::HashSet::new();
        self.yaku_learned = std::mem::take(&mut self.yaku_learned)
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty() && seen.insert(name.clone()))
            .collect();

        self.schema_version = SCHEMA_VERSION;
    }

    /// Whether a section has been completed.
    pub fn is_section_complete(&self, section: Section) -> bool {
        self.sections.get(&section).copied().unwrap_or(false)
    }

    /// Whether a test has been passed.
    pub fn is_test_complete(&self, test: TestId) -> bool {
        self.tests.get(&test).copied().unwrap_or(false)
    }

    /// Visits recorded for a page.
    pub fn visits_for(&self, page: Page) -> u64 {
        self.visits.get(&page).copied().unwrap_or(0)
    }

    /// Number of completed sections.
    pub fn sections_complete(&self) -> usize {
        self.sections.values().filter(|done| **done).count()
    }

    /// Number of passed tests.
    pub fn tests_complete(&self) -> usize {
        self.tests.values().filter(|done| **done).count()
    }

    /// Sum of all visit counters.
    pub fn total_visits(&self) -> u64 {
        self.visits.values().sum()
    }

    /// Whether a yaku is already in the learned list.
    pub fn knows_yaku(&self, name: &str) -> bool {
        self.yaku_learned.iter().any(|y| y == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_fixed_keys() {
        let record = ProgressRecord::new(chrono::Utc::now());
        assert_eq!(record.sections.len(), 5);
        assert_eq!(record.tests.len(), 5);
        assert_eq!(record.visits.len(), 6);
        assert_eq!(record.sections_complete(), 0);
        assert_eq!(record.tests_complete(), 0);
        assert_eq!(record.total_visits(), 0);
        assert!(record.yaku_learned.is_empty());
        assert_eq!(record.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_normalize_fills_missing_keys_and_dedups() {
        let mut record = ProgressRecord::new(chrono::Utc::now());
        record.sections.remove(&Section::Scoring);
        record.visits.remove(&Page::Practice);
        record.sections.insert(Section::Basics, true);
        record.yaku_learned = vec!["riichi".into(), "tanyao".into(), "riichi".into()];
        record.schema_version = 0;

        record.normalize();

        assert_eq!(record.sections.len(), 5);
        assert!(!record.is_section_complete(Section::Scoring));
        assert!(record.is_section_complete(Section::Basics));
        assert_eq!(record.visits_for(Page::Practice), 0);
        assert_eq!(record.yaku_learned, vec!["riichi", "tanyao"]);
        assert_eq!(record.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_normalize_trims_stored_yaku() {
        let mut record = ProgressRecord::new(chrono::Utc::now());
        record.yaku_learned = vec![" riichi".into(), "riichi".into(), "  ".into(), "pinfu ".into()];

        record.normalize();

        assert_eq!(record.yaku_learned, vec!["riichi", "pinfu"]);
        assert!(record.knows_yaku("riichi"));
    }

    #[test]
    fn test_serialized_shape() {
        let record = ProgressRecord::new(chrono::Utc::now());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["sections"]["basics"], false);
        assert_eq!(value["tests"]["test5"], false);
        assert_eq!(value["visits"]["practice"], 0);
        assert!(value["yaku_learned"].as_array().unwrap().is_empty());
        assert!(value["lastVisit"].is_string());
        assert_eq!(value["schemaVersion"], 1);
    }
}
