//! The progress store: one learner's record, kept in sync with storage.

use mjtutor_core::{
    next_recommendation, total_progress, Clock, Page, ProgressRecord, ProgressStats,
    Recommendation, Section, TestId,
};
use mjtutor_storage::{Result, Storage, StorageError};
use tracing::{debug, info, warn};

use crate::codec;
use crate::export::{ExportArtifact, ExportError};
use crate::page::{is_home, page_id_from_path};

/// Configuration for the progress store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Storage key holding the serialized record
    pub storage_key: String,
    /// File name prefix for exports
    pub export_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: "mahjongProgress".to_string(),
            export_prefix: "mahjong-progress".to_string(),
        }
    }
}

/// Notified after every successful save and after a reset.
pub trait ProgressObserver: Send + Sync {
    /// Progress changed; `stats` reflects the new state.
    fn on_progress_changed(&self, stats: &ProgressStats);
}

/// Holds the learner's progress record and mirrors it to storage.
///
/// Mutators return `Ok(true)` when the change was applied and saved,
/// `Ok(false)` when the input was ignored, and `Err` when the change was
/// applied in memory but could not be persisted. The last case is a warning
/// for the caller, not a failure of the session.
pub struct ProgressStore<S: Storage> {
    storage: S,
    record: ProgressRecord,
    config: StoreConfig,
    clock: Clock,
    observers: Vec<Box<dyn ProgressObserver>>,
    warnings: Vec<String>,
    /// The stored value could not be read at open, so it must not be
    /// overwritten until a reset clears it.
    read_failed: bool,
}

impl<S: Storage> ProgressStore<S> {
    /// Load progress from `storage`, falling back to a blank record.
    pub async fn open(storage: S, config: StoreConfig) -> Self {
        Self::open_with_clock(storage, config, Clock::System).await
    }

    /// Like [`open`](Self::open) with an explicit clock.
    pub async fn open_with_clock(storage: S, config: StoreConfig, clock: Clock) -> Self {
        let mut warnings = Vec::new();
        let (record, read_failed) =
            load(&storage, &config.storage_key, clock, &mut warnings).await;
        Self {
            storage,
            record,
            config,
            clock,
            observers: Vec::new(),
            warnings,
            read_failed,
        }
    }

    /// Register an observer.
    pub fn with_observer(mut self, observer: Box<dyn ProgressObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Register an observer on an existing store.
    pub fn add_observer(&mut self, observer: Box<dyn ProgressObserver>) {
        self.observers.push(observer);
    }

    /// Current record.
    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    /// Store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Drain anomalies noticed while loading.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    /// Stamp the record and write it under the configured key.
    ///
    /// Refuses to write when the stored record could not be read at open,
    /// since the in-memory record would replace progress we never saw.
    pub async fn save(&mut self) -> Result<()> {
        if self.read_failed {
            warn!("Not saving: stored progress was never read");
            return Err(StorageError::Unavailable(
                "stored progress could not be read; refusing to overwrite it".to_string(),
            ));
        }

        let previous = self.record.last_visit;
        self.record.last_visit = self.clock.now();

        let written = match codec::encode(&self.record) {
            Ok(bytes) => self.storage.put(&self.config.storage_key, &bytes).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = written {
            self.record.last_visit = previous;
            warn!("Failed to save progress: {}", e);
            return Err(e);
        }

        debug!("Saved progress ({}%)", self.total_progress());
        self.notify();
        Ok(())
    }

    // === Mutations ===

    /// Mark a section complete. Saves even if it already was.
    pub async fn mark_section_complete(&mut self, section: Section) -> Result<bool> {
        self.record.sections.insert(section, true);
        self.save().await?;
        Ok(true)
    }

    /// Mark a section complete by its raw identifier.
    pub async fn mark_section_complete_by_id(&mut self, id: &str) -> Result<bool> {
        match id.parse::<Section>() {
            Ok(section) => self.mark_section_complete(section).await,
            Err(e) => {
                debug!("Ignoring {}", e);
                Ok(false)
            }
        }
    }

    /// Mark a test passed.
    pub async fn mark_test_complete(&mut self, test: TestId) -> Result<bool> {
        self.record.tests.insert(test, true);
        self.save().await?;
        Ok(true)
    }

    /// Mark a test passed by its 1-based number.
    pub async fn mark_test_complete_by_number(&mut self, number: u32) -> Result<bool> {
        match TestId::from_ordinal(number) {
            Some(test) => self.mark_test_complete(test).await,
            None => {
                debug!("Ignoring unknown test number {}", number);
                Ok(false)
            }
        }
    }

    /// Add a yaku to the learned list. Saves only when it was new.
    pub async fn add_learned_yaku(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() || self.record.knows_yaku(name) {
            return Ok(false);
        }
        self.record.yaku_learned.push(name.to_string());
        self.save().await?;
        Ok(true)
    }

    /// Count a visit to `page`.
    pub async fn record_visit(&mut self, page: Page) -> Result<bool> {
        *self.record.visits.entry(page).or_insert(0) += 1;
        self.save().await?;
        Ok(true)
    }

    /// Count a visit by raw page identifier.
    pub async fn record_visit_by_id(&mut self, id: &str) -> Result<bool> {
        match id.parse::<Page>() {
            Ok(page) => self.record_visit(page).await,
            Err(e) => {
                debug!("Ignoring {}", e);
                Ok(false)
            }
        }
    }

    /// Count a visit for the page at a URL path. The landing page is not
    /// counted.
    pub async fn record_page_load(&mut self, path: &str) -> Result<bool> {
        let id = page_id_from_path(path);
        if is_home(id) {
            return Ok(false);
        }
        self.record_visit_by_id(id).await
    }

    /// Mark the section hosted at a URL path complete. The landing page and
    /// the practice page host no section.
    pub async fn mark_current_section_complete(&mut self, path: &str) -> Result<bool> {
        let id = page_id_from_path(path);
        if is_home(id) || id == Page::Practice.as_str() {
            return Ok(false);
        }
        self.mark_section_complete_by_id(id).await
    }

    /// Discard stored progress and start over. The caller is responsible
    /// for confirming with the learner first.
    pub async fn reset_progress(&mut self) -> Result<()> {
        let deleted = self.storage.delete(&self.config.storage_key).await;
        self.record = ProgressRecord::new(self.clock.now());
        if deleted.is_ok() {
            self.read_failed = false;
        }
        info!("Progress reset");
        self.notify();

        deleted.map_err(|e| {
            warn!("Failed to clear stored progress: {}", e);
            e
        })
    }

    // === Derived ===

    /// Weighted completion percentage.
    pub fn total_progress(&self) -> u8 {
        total_progress(&self.record)
    }

    /// Summary statistics.
    pub fn stats(&self) -> ProgressStats {
        ProgressStats::from_record(&self.record)
    }

    /// What to study next, or `None` once everything is done.
    pub fn next_recommendation(&self) -> Option<Recommendation> {
        next_recommendation(&self.record)
    }

    /// Snapshot the record as a dated, pretty-printed JSON artifact.
    pub fn export_progress(&self) -> std::result::Result<ExportArtifact, ExportError> {
        let artifact =
            ExportArtifact::from_record(&self.record, &self.config.export_prefix, self.clock.now())?;
        info!("Exported progress as {}", artifact.file_name);
        Ok(artifact)
    }

    fn notify(&self) {
        if self.observers.is_empty() {
            return;
        }
        let stats = self.stats();
        for observer in &self.observers {
            observer.on_progress_changed(&stats);
        }
    }
}

async fn load<S: Storage>(
    storage: &S,
    key: &str,
    clock: Clock,
    warnings: &mut Vec<String>,
) -> (ProgressRecord, bool) {
    let record = match storage.get(key).await {
        Ok(Some(bytes)) => match codec::decode(&bytes) {
            Ok(record) => {
                info!("Loaded progress ({}%)", total_progress(&record));
                record
            }
            Err(e) => {
                warn!("Stored progress is unreadable, starting fresh: {}", e);
                warnings.push(format!("Saved progress could not be read and was reset: {}", e));
                ProgressRecord::new(clock.now())
            }
        },
        Ok(None) => {
            info!("No stored progress, starting fresh");
            ProgressRecord::new(clock.now())
        }
        Err(e) => {
            warn!("Progress storage unavailable: {}", e);
            warnings.push(format!("Progress will not be saved: {}", e));
            return (ProgressRecord::new(clock.now()), true);
        }
    };
    (record, false)
}
