//! Mahjong tutor core data models.
//!
//! This crate defines the learner's progress record and the pure
//! computations derived from it. It performs no I/O.

#![warn(missing_docs)]

mod id;
mod record;
mod recommendation;
mod stats;
mod time;

pub use id::{Page, Section, TestId, UnknownId};
pub use record::{ProgressRecord, SCHEMA_VERSION};
pub use recommendation::{next_recommendation, Recommendation, Target, PRACTICE_TITLE};
pub use stats::{total_progress, ProgressStats, SECTION_WEIGHT, TEST_WEIGHT};
pub use time::Clock;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
