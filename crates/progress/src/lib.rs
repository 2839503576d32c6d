//! Progress tracking for the mahjong tutor.
//!
//! [`ProgressStore`] owns the learner's record, persists it through a
//! [`Storage`](mjtutor_storage::Storage) backend and derives statistics and
//! recommendations from it.

#![warn(missing_docs)]

pub mod codec;
pub mod export;
pub mod page;
pub mod tracker;

pub use codec::CodecError;
pub use export::{ExportArtifact, ExportError};
pub use page::page_id_from_path;
pub use tracker::{ProgressObserver, ProgressStore, StoreConfig};
