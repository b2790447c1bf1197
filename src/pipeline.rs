//! Submission pipeline: the per-form submit state machine
//!
//! Idle -> Validating -> Rejected, or -> Submitting -> Succeeded | Failed,
//! always back to idle. Validation is synchronous, so the persistent state
//! is the form's `is_submitting` flag plus the returned outcome. While a
//! submission is in flight the form's controls are disabled and a second
//! submit intent is rejected without side effects.

use std::sync::Arc;

use crate::autosave::AutosaveSidecar;
use crate::error::Error;
use crate::notify::{NotificationSink, Severity};
use crate::registry::FormRegistry;
use crate::transport::{SubmissionRequest, SubmissionResult, Transport};
use crate::ui::{UiEvent, UiSink};

/// Copy shown when validation rejects a submit attempt
pub const REJECTION_MESSAGE: &str = "Please correct the errors below.";

/// Copy shown when the transport fails without a message of its own
pub const FAILURE_FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// How one submit attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// A submission was already in flight; the attempt was ignored
    InFlight,
    /// Validation failed; the first invalid field was focused
    Rejected { first_invalid: Option<String> },
    /// The transport accepted the submission; the form is pristine again
    Succeeded { message: String },
    /// The transport failed; values are preserved for retry
    Failed { message: String },
}

/// Drives submit intents through validation, transport, and feedback
pub struct SubmissionPipeline {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn NotificationSink>,
    ui: Arc<dyn UiSink>,
}

impl SubmissionPipeline {
    pub fn new(
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn NotificationSink>,
        ui: Arc<dyn UiSink>,
    ) -> Self {
        Self {
            transport,
            notifier,
            ui,
        }
    }

    /// Handle one submit intent for the form
    ///
    /// Owns the whole attempt: hosts must never submit the payload
    /// out-of-band. On success the form resets to pristine and its draft is
    /// cleared; on failure values and draft are left intact for retry.
    pub async fn submit(
        &self,
        registry: &mut FormRegistry,
        sidecar: &mut AutosaveSidecar,
        form: &str,
    ) -> Result<SubmissionOutcome, Error> {
        if registry.form(form)?.is_submitting {
            tracing::debug!(form = %form, "submit intent ignored, submission already in flight");
            return Ok(SubmissionOutcome::InFlight);
        }

        tracing::debug!(form = %form, "submit intent, validating");
        if !registry.validate_form(form)? {
            return self.reject(registry, form);
        }

        let form_state = registry.form(form)?;
        let purpose = form_state.purpose;
        let request = SubmissionRequest {
            form_type: purpose.slug().to_string(),
            payload: form_state.value_map(),
        };

        registry.form_mut(form)?.is_submitting = true;
        self.ui.handle(UiEvent::FormEnabled {
            form: form.to_string(),
            enabled: false,
        });
        tracing::debug!(form = %form, form_type = %purpose.slug(), "submitting");

        let result = self.transport.submit(request).await;

        registry.form_mut(form)?.is_submitting = false;
        self.ui.handle(UiEvent::FormEnabled {
            form: form.to_string(),
            enabled: true,
        });

        match result {
            Ok(SubmissionResult::Success { message }) => {
                tracing::debug!(form = %form, transport_message = %message, "submission succeeded");
                registry.reset_form(form)?;
                sidecar.clear(form);
                let copy = purpose.success_message().to_string();
                self.notifier.show(&copy, Severity::Success);
                Ok(SubmissionOutcome::Succeeded { message: copy })
            }
            Ok(SubmissionResult::Failure { message }) => {
                tracing::debug!(form = %form, %message, "submission rejected by transport");
                let copy = if message.is_empty() {
                    FAILURE_FALLBACK_MESSAGE.to_string()
                } else {
                    message
                };
                self.notifier.show(&copy, Severity::Error);
                Ok(SubmissionOutcome::Failed { message: copy })
            }
            Err(error) => {
                tracing::error!(form = %form, %error, "submission transport failed");
                self.notifier
                    .show(FAILURE_FALLBACK_MESSAGE, Severity::Error);
                Ok(SubmissionOutcome::Failed {
                    message: FAILURE_FALLBACK_MESSAGE.to_string(),
                })
            }
        }
    }

    /// The rejected path: no request is built, the first invalid field gets
    /// focus, and the form is immediately submittable again
    fn reject(&self, registry: &FormRegistry, form: &str) -> Result<SubmissionOutcome, Error> {
        let first_invalid = registry
            .form(form)?
            .first_error_field()
            .map(|field| field.identifier.clone());
        if let Some(field) = &first_invalid {
            self.ui.handle(UiEvent::FocusField {
                form: form.to_string(),
                field: field.clone(),
            });
        }
        self.notifier.show(REJECTION_MESSAGE, Severity::Error);
        tracing::debug!(form = %form, first_invalid = ?first_invalid, "submission rejected");
        Ok(SubmissionOutcome::Rejected { first_invalid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autosave::{AutosaveStore, DraftRecord, MemoryStore};
    use crate::declaration::{FieldDeclaration, FormDeclaration, FormPurpose};
    use crate::notify::RecordingSink;
    use crate::state::FieldValue;
    use crate::transport::MockTransport;
    use crate::ui::RecordingUiSink;
    use crate::validate::ValidatorRegistry;
    use anyhow::anyhow;
    use std::time::Duration;

    struct Harness {
        registry: FormRegistry,
        sidecar: AutosaveSidecar,
        store: Arc<MemoryStore>,
        notifier: Arc<RecordingSink>,
        ui: Arc<RecordingUiSink>,
    }

    fn harness() -> Harness {
        let ui = Arc::new(RecordingUiSink::new());
        let notifier = Arc::new(RecordingSink::new());
        let store = Arc::new(MemoryStore::new());
        let mut registry = FormRegistry::new(ValidatorRegistry::new(), Arc::clone(&ui) as _);
        registry
            .register(
                FormDeclaration::new(FormPurpose::Contact)
                    .with_identifier("contact")
                    .field(FieldDeclaration::text("name").require())
                    .field(FieldDeclaration::email("email")),
            )
            .unwrap();
        let sidecar = AutosaveSidecar::new(Arc::clone(&store) as _, Duration::from_millis(1000));
        Harness {
            registry,
            sidecar,
            store,
            notifier,
            ui,
        }
    }

    fn pipeline(harness: &Harness, transport: MockTransport) -> SubmissionPipeline {
        SubmissionPipeline::new(
            Arc::new(transport),
            Arc::clone(&harness.notifier) as _,
            Arc::clone(&harness.ui) as _,
        )
    }

    fn fill_valid(harness: &mut Harness) {
        harness
            .registry
            .apply_input("contact", "name", FieldValue::from("Ada"))
            .unwrap();
    }

    mod rejection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_invalid_form_makes_no_transport_call() {
            let mut h = harness();
            let mut transport = MockTransport::new();
            transport.expect_submit().times(0);
            let pipeline = pipeline(&h, transport);

            let outcome = pipeline
                .submit(&mut h.registry, &mut h.sidecar, "contact")
                .await
                .unwrap();

            assert_eq!(
                outcome,
                SubmissionOutcome::Rejected {
                    first_invalid: Some("name".to_string()),
                }
            );
            // Back to idle immediately, resubmission permitted
            assert!(!h.registry.form("contact").unwrap().is_submitting);
        }

        #[tokio::test]
        async fn test_first_invalid_field_receives_focus() {
            let mut h = harness();
            let mut transport = MockTransport::new();
            transport.expect_submit().times(0);
            let pipeline = pipeline(&h, transport);

            pipeline
                .submit(&mut h.registry, &mut h.sidecar, "contact")
                .await
                .unwrap();

            assert!(h.ui.events().contains(&UiEvent::FocusField {
                form: "contact".to_string(),
                field: "name".to_string(),
            }));
            let shown = h.notifier.shown();
            assert_eq!(shown.len(), 1);
            assert_eq!(shown[0], (REJECTION_MESSAGE.to_string(), Severity::Error));
        }

        #[tokio::test]
        async fn test_optional_invalid_field_does_not_reject() {
            let mut h = harness();
            fill_valid(&mut h);
            h.registry
                .apply_input("contact", "email", FieldValue::from("bad"))
                .unwrap();
            let mut transport = MockTransport::new();
            transport.expect_submit().times(1).returning(|_| {
                Ok(SubmissionResult::Success {
                    message: "ok".to_string(),
                })
            });
            let pipeline = pipeline(&h, transport);

            let outcome = pipeline
                .submit(&mut h.registry, &mut h.sidecar, "contact")
                .await
                .unwrap();
            assert!(matches!(outcome, SubmissionOutcome::Succeeded { .. }));
        }
    }

    mod success {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_success_resets_form_and_clears_draft() {
            let mut h = harness();
            fill_valid(&mut h);
            h.store
                .save("contact", &h.registry.snapshot("contact").unwrap())
                .unwrap();
            let mut transport = MockTransport::new();
            transport.expect_submit().times(1).returning(|_| {
                Ok(SubmissionResult::Success {
                    message: "stored".to_string(),
                })
            });
            let pipeline = pipeline(&h, transport);

            let outcome = pipeline
                .submit(&mut h.registry, &mut h.sidecar, "contact")
                .await
                .unwrap();

            assert_eq!(
                outcome,
                SubmissionOutcome::Succeeded {
                    message: FormPurpose::Contact.success_message().to_string(),
                }
            );
            let form = h.registry.form("contact").unwrap();
            assert_eq!(form.field("name").unwrap().value, FieldValue::from(""));
            assert!(!form.field("name").unwrap().is_valid);
            assert!(h.store.load("contact").unwrap().is_none());
        }

        #[tokio::test]
        async fn test_success_copy_is_purpose_specific() {
            let mut h = harness();
            fill_valid(&mut h);
            let mut transport = MockTransport::new();
            transport.expect_submit().returning(|_| {
                Ok(SubmissionResult::Success {
                    message: "stored".to_string(),
                })
            });
            let pipeline = pipeline(&h, transport);

            pipeline
                .submit(&mut h.registry, &mut h.sidecar, "contact")
                .await
                .unwrap();

            let shown = h.notifier.shown();
            assert_eq!(
                shown.last().unwrap(),
                &(
                    FormPurpose::Contact.success_message().to_string(),
                    Severity::Success,
                )
            );
        }

        #[tokio::test]
        async fn test_request_carries_slug_and_typed_payload() {
            let mut h = harness();
            h.registry
                .register(
                    FormDeclaration::new(FormPurpose::Newsletter)
                        .with_identifier("newsletter")
                        .field(FieldDeclaration::email("email").require())
                        .field(FieldDeclaration::checkbox("weekly"))
                        .field(FieldDeclaration::radio("plan")),
                )
                .unwrap();
            h.registry
                .apply_input("newsletter", "email", FieldValue::from("a@b.co"))
                .unwrap();
            h.registry
                .apply_input("newsletter", "weekly", FieldValue::from(true))
                .unwrap();
            h.registry
                .apply_input("newsletter", "plan", FieldValue::from("monthly"))
                .unwrap();

            let mut transport = MockTransport::new();
            transport
                .expect_submit()
                .withf(|request| {
                    request.form_type == "newsletter"
                        && request.payload["email"] == FieldValue::from("a@b.co")
                        && request.payload["weekly"] == FieldValue::from(true)
                        && request.payload["plan"] == FieldValue::from("monthly")
                })
                .times(1)
                .returning(|_| {
                    Ok(SubmissionResult::Success {
                        message: "ok".to_string(),
                    })
                });
            let pipeline = pipeline(&h, transport);

            let outcome = pipeline
                .submit(&mut h.registry, &mut h.sidecar, "newsletter")
                .await
                .unwrap();
            assert!(matches!(outcome, SubmissionOutcome::Succeeded { .. }));
        }
    }

    mod failure {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_failure_preserves_values_and_draft() {
            let mut h = harness();
            fill_valid(&mut h);
            let draft: DraftRecord = h.registry.snapshot("contact").unwrap();
            h.store.save("contact", &draft).unwrap();
            let mut transport = MockTransport::new();
            transport.expect_submit().returning(|_| {
                Ok(SubmissionResult::Failure {
                    message: "backend rejected the payload".to_string(),
                })
            });
            let pipeline = pipeline(&h, transport);

            let outcome = pipeline
                .submit(&mut h.registry, &mut h.sidecar, "contact")
                .await
                .unwrap();

            assert_eq!(
                outcome,
                SubmissionOutcome::Failed {
                    message: "backend rejected the payload".to_string(),
                }
            );
            let form = h.registry.form("contact").unwrap();
            assert_eq!(form.field("name").unwrap().value, FieldValue::from("Ada"));
            assert!(!form.is_submitting);
            assert_eq!(h.store.load("contact").unwrap().unwrap(), draft);
        }

        #[tokio::test]
        async fn test_channel_error_uses_fallback_copy() {
            let mut h = harness();
            fill_valid(&mut h);
            let mut transport = MockTransport::new();
            transport
                .expect_submit()
                .returning(|_| Err(anyhow!("connection refused")));
            let pipeline = pipeline(&h, transport);

            let outcome = pipeline
                .submit(&mut h.registry, &mut h.sidecar, "contact")
                .await
                .unwrap();

            assert_eq!(
                outcome,
                SubmissionOutcome::Failed {
                    message: FAILURE_FALLBACK_MESSAGE.to_string(),
                }
            );
            assert_eq!(
                h.notifier.shown().last().unwrap(),
                &(FAILURE_FALLBACK_MESSAGE.to_string(), Severity::Error)
            );
        }
    }

    mod backpressure {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_controls_disabled_while_submitting() {
            let mut h = harness();
            fill_valid(&mut h);
            let mut transport = MockTransport::new();
            transport.expect_submit().returning(|_| {
                Ok(SubmissionResult::Success {
                    message: "ok".to_string(),
                })
            });
            let pipeline = pipeline(&h, transport);

            pipeline
                .submit(&mut h.registry, &mut h.sidecar, "contact")
                .await
                .unwrap();

            let events = h.ui.events();
            let disabled = events.iter().position(|e| {
                *e == UiEvent::FormEnabled {
                    form: "contact".to_string(),
                    enabled: false,
                }
            });
            let enabled = events.iter().position(|e| {
                *e == UiEvent::FormEnabled {
                    form: "contact".to_string(),
                    enabled: true,
                }
            });
            assert!(disabled.unwrap() < enabled.unwrap());
        }

        #[tokio::test]
        async fn test_second_intent_while_submitting_is_ignored() {
            let mut h = harness();
            fill_valid(&mut h);
            // Simulate an in-flight submission
            h.registry.form_mut("contact").unwrap().is_submitting = true;
            let mut transport = MockTransport::new();
            transport.expect_submit().times(0);
            let pipeline = pipeline(&h, transport);

            let outcome = pipeline
                .submit(&mut h.registry, &mut h.sidecar, "contact")
                .await
                .unwrap();

            assert_eq!(outcome, SubmissionOutcome::InFlight);
            assert!(h.notifier.shown().is_empty());
        }
    }

    #[tokio::test]
    async fn test_unknown_form_errors() {
        let mut h = harness();
        let pipeline = pipeline(&h, MockTransport::new());
        let err = pipeline
            .submit(&mut h.registry, &mut h.sidecar, "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownForm(_)));
    }
}
