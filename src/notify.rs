//! Notification sink collaborator
//!
//! The pipeline reports outcomes through this trait; how a message is
//! rendered, auto-dismissed, or manually dismissed is the host's concern.

use std::sync::Mutex;

/// How urgent a notification is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Fire-and-forget feedback channel to the user
pub trait NotificationSink: Send + Sync {
    fn show(&self, message: &str, severity: Severity);
}

/// Routes notifications to the `tracing` log
#[derive(Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn show(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => {
                tracing::info!(severity = severity.label(), %message, "notification")
            }
            Severity::Warning => {
                tracing::warn!(severity = severity.label(), %message, "notification")
            }
            Severity::Error => {
                tracing::error!(severity = severity.label(), %message, "notification")
            }
        }
    }
}

/// Discards every notification; for embedding without a feedback surface
#[derive(Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn show(&self, _message: &str, _severity: Severity) {}
}

/// Records notifications for later inspection; for host test suites
#[derive(Debug, Default)]
pub struct RecordingSink {
    shown: Mutex<Vec<(String, Severity)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification shown so far, in order
    pub fn shown(&self) -> Vec<(String, Severity)> {
        self.shown.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn show(&self, message: &str, severity: Severity) {
        self.shown
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}
