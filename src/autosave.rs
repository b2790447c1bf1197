//! Auto-save sidecar: debounced draft persistence
//!
//! Independent of validation. Every value change schedules a deferred write
//! of the form's full value map; the debounce is a quiescence window, so a
//! burst of edits keeps superseding the pending write and only the last
//! snapshot after the quiet period lands in the store. A saved draft is
//! restored at registration and cleared only when a submission succeeds.

use anyhow::Result;
use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::state::FieldValue;

/// A persisted draft: the form's field values keyed by identifier
pub type DraftRecord = HashMap<String, FieldValue>;

/// Store key for a form's draft
pub fn storage_key(form: &str) -> String {
    format!("form-autosave-{form}")
}

/// Key-value persistence for drafts
///
/// Written only by the sidecar and cleared only by the submission pipeline
/// on success; no other component touches it.
pub trait AutosaveStore: Send + Sync {
    fn save(&self, form: &str, record: &DraftRecord) -> Result<()>;
    fn load(&self, form: &str) -> Result<Option<DraftRecord>>;
    fn clear(&self, form: &str) -> Result<()>;
}

/// Draft store backed by one JSON file per form
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Root the store in the platform data directory
    pub fn new() -> Option<Self> {
        ProjectDirs::from("rs", "formflow", "formflow").map(|dirs| Self {
            root: dirs.data_dir().to_path_buf(),
        })
    }

    /// Root the store at an explicit path, for tests and embedding
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, form: &str) -> PathBuf {
        self.root.join(format!("{}.json", storage_key(form)))
    }
}

impl AutosaveStore for FileStore {
    fn save(&self, form: &str, record: &DraftRecord) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let content = serde_json::to_string(record)?;
        fs::write(self.record_path(form), content)?;
        Ok(())
    }

    fn load(&self, form: &str) -> Result<Option<DraftRecord>> {
        let path = self.record_path(form);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn clear(&self, form: &str) -> Result<()> {
        let path = self.record_path(form);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory draft store for tests and short-lived embedding
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, DraftRecord>>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many saves have landed, for asserting debounce coalescing
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl AutosaveStore for MemoryStore {
    fn save(&self, form: &str, record: &DraftRecord) -> Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(storage_key(form), record.clone());
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }

    fn load(&self, form: &str) -> Result<Option<DraftRecord>> {
        Ok(self.records.lock().unwrap().get(&storage_key(form)).cloned())
    }

    fn clear(&self, form: &str) -> Result<()> {
        self.records.lock().unwrap().remove(&storage_key(form));
        Ok(())
    }
}

/// Schedules, supersedes, and cancels the deferred draft writes
///
/// The debounce is modeled as cancel-and-reschedule of a spawned task, so
/// superseding a pending write is an explicit abort rather than an implicit
/// timer reset.
pub struct AutosaveSidecar {
    store: Arc<dyn AutosaveStore>,
    debounce: Duration,
    pending: HashMap<String, JoinHandle<()>>,
}

impl AutosaveSidecar {
    pub fn new(store: Arc<dyn AutosaveStore>, debounce: Duration) -> Self {
        Self {
            store,
            debounce,
            pending: HashMap::new(),
        }
    }

    /// Schedule a write of this snapshot after the quiescence window,
    /// superseding any write already pending for the form
    pub fn schedule(&mut self, form: &str, snapshot: DraftRecord) {
        if let Some(handle) = self.pending.remove(form) {
            handle.abort();
        }

        let store = Arc::clone(&self.store);
        let debounce = self.debounce;
        let form_id = form.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if let Err(error) = store.save(&form_id, &snapshot) {
                tracing::warn!(form = %form_id, %error, "auto-save write failed");
            } else {
                tracing::debug!(form = %form_id, "auto-save draft persisted");
            }
        });
        self.pending.insert(form.to_string(), handle);
    }

    /// Load the form's persisted draft, if any; store failures are logged
    /// and read as "no draft"
    pub fn restore(&self, form: &str) -> Option<DraftRecord> {
        match self.store.load(form) {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(form = %form, %error, "auto-save restore failed");
                None
            }
        }
    }

    /// Drop the form's draft and cancel any pending write for it
    pub fn clear(&mut self, form: &str) {
        if let Some(handle) = self.pending.remove(form) {
            handle.abort();
        }
        if let Err(error) = self.store.clear(form) {
            tracing::warn!(form = %form, %error, "auto-save clear failed");
        }
    }
}

impl Drop for AutosaveSidecar {
    fn drop(&mut self) {
        for handle in self.pending.values() {
            handle.abort();
        }
    }
}
