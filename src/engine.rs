//! Engine facade: wires the components and routes host events
//!
//! The host constructs every collaborator explicitly and hands them to
//! `FormEngine::new`; nothing here is a process-wide singleton. The engine
//! then routes the host's discrete events (register, input, commit, submit)
//! to the registry, sidecar, and pipeline in event order.

use std::sync::Arc;
use std::time::Duration;

use crate::autosave::{AutosaveSidecar, AutosaveStore};
use crate::declaration::FormDeclaration;
use crate::error::Error;
use crate::notify::{NotificationSink, Severity};
use crate::pipeline::{SubmissionOutcome, SubmissionPipeline};
use crate::registry::FormRegistry;
use crate::state::{FieldValue, FormState};
use crate::transport::Transport;
use crate::ui::{UiEvent, UiSink};
use crate::validate::ValidatorRegistry;

/// Copy shown when a persisted draft repopulates a form
pub const DRAFT_RESTORED_MESSAGE: &str = "Your draft has been restored.";

/// Tunables for the engine
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Quiescence window before an auto-save write lands
    pub debounce: Duration,
    /// Whether drafts are persisted and restored at all
    pub autosave: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1000),
            autosave: true,
        }
    }
}

/// Owns the registry, pipeline, and sidecar; the host's single entry point
pub struct FormEngine {
    registry: FormRegistry,
    pipeline: SubmissionPipeline,
    sidecar: AutosaveSidecar,
    notifier: Arc<dyn NotificationSink>,
    ui: Arc<dyn UiSink>,
    options: EngineOptions,
}

impl FormEngine {
    pub fn new(
        validators: ValidatorRegistry,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn NotificationSink>,
        ui: Arc<dyn UiSink>,
        store: Arc<dyn AutosaveStore>,
        options: EngineOptions,
    ) -> Self {
        Self {
            registry: FormRegistry::new(validators, Arc::clone(&ui)),
            pipeline: SubmissionPipeline::new(transport, Arc::clone(&notifier), Arc::clone(&ui)),
            sidecar: AutosaveSidecar::new(store, options.debounce),
            notifier,
            ui,
            options,
        }
    }

    /// Register a declared form and restore its persisted draft, if any
    ///
    /// Restoration happens before any validation runs: restored values do
    /// not trigger rule evaluation or a new auto-save write.
    pub fn register(&mut self, declaration: FormDeclaration) -> Result<String, Error> {
        let identifier = self.registry.register(declaration)?;

        if self.options.autosave {
            if let Some(record) = self.sidecar.restore(&identifier) {
                let restored = self.registry.restore_values(&identifier, &record)?;
                if restored > 0 {
                    tracing::debug!(form = %identifier, fields = restored, "draft restored");
                    self.ui.handle(UiEvent::DraftRestored {
                        form: identifier.clone(),
                    });
                    self.notifier.show(DRAFT_RESTORED_MESSAGE, Severity::Info);
                }
            }
        }

        Ok(identifier)
    }

    /// A live input event: updates the value, revalidates if the field is
    /// armed, and schedules a debounced draft write
    pub fn input(
        &mut self,
        form: &str,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), Error> {
        self.registry.apply_input(form, field, value.into())?;
        if self.options.autosave {
            let snapshot = self.registry.snapshot(form)?;
            self.sidecar.schedule(form, snapshot);
        }
        Ok(())
    }

    /// A value-committed (blur) event: always validates the field
    pub fn commit(&mut self, form: &str, field: &str) -> Result<bool, Error> {
        self.registry.commit_field(form, field)
    }

    /// Validate every field of the form and return the aggregate
    pub fn validate(&mut self, form: &str) -> Result<bool, Error> {
        self.registry.validate_form(form)
    }

    /// A submit intent: the whole pipeline, validation through transport
    pub async fn submit(&mut self, form: &str) -> Result<SubmissionOutcome, Error> {
        self.pipeline
            .submit(&mut self.registry, &mut self.sidecar, form)
            .await
    }

    /// Read access to a registered form's state
    pub fn form(&self, form: &str) -> Result<&FormState, Error> {
        self.registry.form(form)
    }
}
