//! UI signal collaborator
//!
//! Validation and submission have presentation side effects the core does
//! not own: partitioning a field into its error or valid style, focusing and
//! scrolling to the first invalid control, disabling a form while a
//! submission is in flight, and the transient "draft restored" indicator.
//! Each one is an explicit event delivered to a host-provided sink.

use std::sync::Mutex;

/// One observable presentation side effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The field passed validation; show the valid style
    FieldValid { form: String, field: String },
    /// The field failed validation; show the error style and inline message
    FieldInvalid {
        form: String,
        field: String,
        message: String,
    },
    /// Focus this field and scroll it into view
    FocusField { form: String, field: String },
    /// Enable or disable every control on the form
    FormEnabled { form: String, enabled: bool },
    /// A persisted draft repopulated the form's fields
    DraftRestored { form: String },
    /// The form returned to pristine; clear values and styles
    FormReset { form: String },
}

/// Receives presentation events; implemented by the host's view layer
pub trait UiSink: Send + Sync {
    fn handle(&self, event: UiEvent);
}

/// Ignores every event; for headless embedding
#[derive(Debug, Default)]
pub struct NullUiSink;

impl UiSink for NullUiSink {
    fn handle(&self, _event: UiEvent) {}
}

/// Records events for later inspection; for host test suites
#[derive(Debug, Default)]
pub struct RecordingUiSink {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingUiSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event handled so far, in order
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl UiSink for RecordingUiSink {
    fn handle(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }
}
