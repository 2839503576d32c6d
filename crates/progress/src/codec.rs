//! Encoding of the persisted record, with schema versioning.
//!
//! Version 0 is the unversioned layout written before `schemaVersion`
//! existed. Its fields match version 1, so migrating it only means filling
//! in missing keys and stamping the current version.

use mjtutor_core::{ProgressRecord, SCHEMA_VERSION};
use tracing::debug;

/// Errors while decoding a stored record.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Bytes are not JSON or do not have the record's shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Written by a newer schema than this build understands
    #[error("Unsupported schema version {found} (newest supported is {supported})")]
    UnsupportedVersion {
        /// Version found in storage
        found: u64,
        /// Newest version this build reads
        supported: u64,
    },
}

/// Serialize a record for storage.
pub fn encode(record: &ProgressRecord) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(record)
}

/// Parse a stored record, migrating older layouts.
pub fn decode(bytes: &[u8]) -> Result<ProgressRecord, CodecError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;

    let version = match value.get("schemaVersion") {
        None => 0,
        Some(v) => v.as_u64().unwrap_or(u64::MAX),
    };
    let supported = u64::from(SCHEMA_VERSION);
    if version > supported {
        return Err(CodecError::UnsupportedVersion {
            found: version,
            supported,
        });
    }

    let mut record: ProgressRecord = serde_json::from_value(value)?;
    if version == 0 {
        debug!("Migrating unversioned progress record to version {}", SCHEMA_VERSION);
    }
    record.normalize();
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mjtutor_core::{Page, Section, TestId};

    const UNVERSIONED: &str = r#"{
        "sections": {"basics": true, "tiles": false, "yaku": false, "scoring": true, "glossary": false},
        "tests": {"test1": true, "test2": false, "test3": false, "test4": false, "test5": false},
        "yaku_learned": ["riichi", "pinfu"],
        "visits": {"basics": 4, "tiles": 1, "yaku": 0, "scoring": 2, "practice": 0, "glossary": 0},
        "lastVisit": "2024-05-01T09:30:00.000Z"
    }"#;

    #[test]
    fn test_round_trip() {
        let mut record = ProgressRecord::new(chrono::Utc::now());
        record.sections.insert(Section::Tiles, true);
        record.yaku_learned.push("tanyao".into());

        let decoded = decode(&encode(&record).unwrap()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_migrates_unversioned_layout() {
        let record = decode(UNVERSIONED.as_bytes()).unwrap();
        assert_eq!(record.schema_version, SCHEMA_VERSION);
        assert!(record.is_section_complete(Section::Basics));
        assert!(record.is_section_complete(Section::Scoring));
        assert!(record.is_test_complete(TestId::Test1));
        assert_eq!(record.visits_for(Page::Basics), 4);
        assert_eq!(record.yaku_learned, vec!["riichi", "pinfu"]);
    }

    #[test]
    fn test_fills_missing_keys() {
        let json = r#"{
            "schemaVersion": 1,
            "sections": {"basics": true},
            "tests": {},
            "visits": {"practice": 7},
            "lastVisit": "2024-05-01T09:30:00Z"
        }"#;
        let record = decode(json.as_bytes()).unwrap();
        assert_eq!(record.sections.len(), 5);
        assert_eq!(record.tests.len(), 5);
        assert_eq!(record.visits.len(), 6);
        assert_eq!(record.visits_for(Page::Practice), 7);
        assert!(record.yaku_learned.is_empty());
    }

    #[test]
    fn test_rejects_future_version() {
        let json = r#"{"schemaVersion": 9, "sections": {}}"#;
        let err = decode(json.as_bytes()).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedVersion { found: 9, supported: 1 }));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(decode(b"not json"), Err(CodecError::Json(_))));
        assert!(matches!(decode(b"[1, 2, 3]"), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_rejects_unknown_section_key() {
        let json = UNVERSIONED.replace("\"glossary\": false}", "\"glossary\": false, \"dora\": true}");
        assert!(matches!(decode(json.as_bytes()), Err(CodecError::Json(_))));
    }
}
