//! Weighted progress and summary statistics.

use serde::{Deserialize, Serialize};

use crate::id::{Section, TestId};
use crate::record::ProgressRecord;

/// Share of the total score carried by sections.
pub const SECTION_WEIGHT: f64 = 60.0;

/// Share of the total score carried by tests.
pub const TEST_WEIGHT: f64 = 40.0;

/// Summary of a progress record, as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStats {
    /// Weighted completion percentage (0-100)
    pub total_progress: u8,

    /// Completed sections
    pub sections_complete: usize,

    /// Total sections
    pub total_sections: usize,

    /// Passed tests
    pub tests_complete: usize,

    /// Total tests
    pub total_tests: usize,

    /// Number of yaku learned
    pub yaku_learned: usize,

    /// Visits across all pages
    pub total_visits: u64,
}

impl ProgressStats {
    /// Compute statistics for a record.
    pub fn from_record(record: &ProgressRecord) -> Self {
        Self {
            total_progress: total_progress(record),
            sections_complete: record.sections_complete(),
            total_sections: Section::ALL.len(),
            tests_complete: record.tests_complete(),
            total_tests: TestId::ALL.len(),
            yaku_learned: record.yaku_learned.len(),
            total_visits: record.total_visits(),
        }
    }

    /// Whether every section and every test is done.
    pub fn is_finished(&self) -> bool {
        self.sections_complete == self.total_sections && self.tests_complete == self.total_tests
    }
}

/// Weighted completion: sections count for 60%, tests for 40%.
pub fn total_progress(record: &ProgressRecord) -> u8 {
    let sections = record.sections_complete() as f64 / Section::ALL.len() as f64;
    let tests = record.tests_complete() as f64 / TestId::ALL.len() as f64;
    let score = (sections * SECTION_WEIGHT + tests * TEST_WEIGHT).round();
    score.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ProgressRecord {
        ProgressRecord::new(chrono::Utc::now())
    }

    #[test]
    fn test_empty_record_is_zero() {
        assert_eq!(total_progress(&record()), 0);
    }

    #[test]
    fn test_everything_done_is_hundred() {
        let mut r = record();
        r.sections.values_mut().for_each(|v| *v = true);
        r.tests.values_mut().for_each(|v| *v = true);
        assert_eq!(total_progress(&r), 100);
        assert!(ProgressStats::from_record(&r).is_finished());
    }

    #[test]
    fn test_three_sections_is_36() {
        let mut r = record();
        r.sections.insert(Section::Basics, true);
        r.sections.insert(Section::Tiles, true);
        r.sections.insert(Section::Yaku, true);
        assert_eq!(total_progress(&r), 36);
    }

    #[test]
    fn test_mixed_weights() {
        let mut r = record();
        r.sections.insert(Section::Glossary, true);
        r.tests.insert(TestId::Test2, true);
        r.tests.insert(TestId::Test4, true);
        // 1/5 * 60 + 2/5 * 40 = 12 + 16
        assert_eq!(total_progress(&r), 28);
    }

    #[test]
    fn test_stats_counts() {
        let mut r = record();
        r.sections.insert(Section::Tiles, true);
        r.tests.insert(TestId::Test1, true);
        r.yaku_learned.push("riichi".into());
        r.visits.insert(crate::Page::Basics, 3);
        r.visits.insert(crate::Page::Practice, 2);

        let stats = ProgressStats::from_record(&r);
        assert_eq!(stats.total_progress, 20);
        assert_eq!(stats.sections_complete, 1);
        assert_eq!(stats.total_sections, 5);
        assert_eq!(stats.tests_complete, 1);
        assert_eq!(stats.total_tests, 5);
        assert_eq!(stats.yaku_learned, 1);
        assert_eq!(stats.total_visits, 5);
        assert!(!stats.is_finished());
    }
}
