//! Form registry: owns every registered form and runs validation
//!
//! Forms are registered from declarations, which bind each field's rule
//! sequence up front. Validation runs on two triggers: a commit (blur)
//! always validates, while a live input event revalidates only after the
//! field has failed once, so a user typing a first pass is not flashed an
//! error mid-word.

use std::sync::Arc;
use uuid::Uuid;

use crate::autosave::DraftRecord;
use crate::binder::bind_field;
use crate::declaration::FormDeclaration;
use crate::error::Error;
use crate::state::{FieldState, FieldValue, FormState};
use crate::ui::{UiEvent, UiSink};
use crate::validate::ValidatorRegistry;

/// Owns registered forms and their validation lifecycle
///
/// Not a global: construct one per engine and hand it the validator registry
/// and UI sink it should use.
pub struct FormRegistry {
    validators: ValidatorRegistry,
    ui: Arc<dyn UiSink>,
    forms: Vec<FormState>,
}

impl FormRegistry {
    pub fn new(validators: ValidatorRegistry, ui: Arc<dyn UiSink>) -> Self {
        Self {
            validators,
            ui,
            forms: Vec::new(),
        }
    }

    /// Register a declared form; returns its identifier, generating a stable
    /// `form-<uuid>` one when the declaration carries none
    pub fn register(&mut self, declaration: FormDeclaration) -> Result<String, Error> {
        let identifier = declaration
            .identifier
            .clone()
            .unwrap_or_else(|| format!("form-{}", Uuid::new_v4()));

        if self.forms.iter().any(|f| f.identifier == identifier) {
            return Err(Error::DuplicateForm(identifier));
        }

        // Audit custom rule references up front; unregistered names still
        // fail closed at evaluation, but a registration-time warning points
        // at the misconfiguration
        for field in &declaration.fields {
            for custom in &field.custom {
                if !self.validators.has_custom(&custom.name) {
                    tracing::warn!(
                        form = %identifier,
                        field = %field.identifier,
                        validator = %custom.name,
                        "custom rule references an unregistered validator"
                    );
                }
            }
        }

        let fields: Vec<FieldState> = declaration.fields.iter().map(bind_field).collect();
        tracing::debug!(form = %identifier, fields = fields.len(), "form registered");
        self.forms
            .push(FormState::new(identifier.clone(), declaration.purpose, fields));
        Ok(identifier)
    }

    /// Look up a registered form
    pub fn form(&self, form: &str) -> Result<&FormState, Error> {
        self.forms
            .iter()
            .find(|f| f.identifier == form)
            .ok_or_else(|| Error::UnknownForm(form.to_string()))
    }

    pub(crate) fn form_mut(&mut self, form: &str) -> Result<&mut FormState, Error> {
        self.forms
            .iter_mut()
            .find(|f| f.identifier == form)
            .ok_or_else(|| Error::UnknownForm(form.to_string()))
    }

    /// The live input event: store the value, revalidating only once the
    /// field has already failed
    pub fn apply_input(&mut self, form: &str, field: &str, value: FieldValue) -> Result<(), Error> {
        let state = field_mut(self.form_mut(form)?, form, field)?;
        state.set_value(value);
        if state.live_validate {
            self.validate_field(form, field)?;
        }
        Ok(())
    }

    /// The value-committed (blur) event: always validates
    pub fn commit_field(&mut self, form: &str, field: &str) -> Result<bool, Error> {
        self.validate_field(form, field)
    }

    /// Run the field's rule sequence, first failure wins; updates the field,
    /// recomputes aggregate validity, and signals the error/valid partition
    pub fn validate_field(&mut self, form: &str, field: &str) -> Result<bool, Error> {
        let validators = &self.validators;
        let form_state = self
            .forms
            .iter_mut()
            .find(|f| f.identifier == form)
            .ok_or_else(|| Error::UnknownForm(form.to_string()))?;
        let state = field_mut(form_state, form, field)?;

        let failure = first_failure(validators, state);
        let event = match failure {
            Some(message) => {
                state.record_failure(message.clone());
                UiEvent::FieldInvalid {
                    form: form.to_string(),
                    field: field.to_string(),
                    message,
                }
            }
            None => {
                state.record_success();
                UiEvent::FieldValid {
                    form: form.to_string(),
                    field: field.to_string(),
                }
            }
        };
        let is_valid = state.is_valid;
        form_state.recompute_validity();

        self.ui.handle(event);
        Ok(is_valid)
    }

    /// Validate every field in declaration order; returns the aggregate
    pub fn validate_form(&mut self, form: &str) -> Result<bool, Error> {
        let fields: Vec<String> = self
            .form(form)?
            .fields
            .iter()
            .map(|f| f.identifier.clone())
            .collect();
        for field in &fields {
            self.validate_field(form, field)?;
        }
        Ok(self.form(form)?.is_valid)
    }

    /// Return the form to pristine: empty values, no errors, disarmed
    pub fn reset_form(&mut self, form: &str) -> Result<(), Error> {
        self.form_mut(form)?.reset();
        self.ui.handle(UiEvent::FormReset {
            form: form.to_string(),
        });
        Ok(())
    }

    /// Current field values keyed by identifier
    pub fn snapshot(&self, form: &str) -> Result<DraftRecord, Error> {
        Ok(self.form(form)?.value_map())
    }

    /// Repopulate fields from a persisted draft without validating; values
    /// for identifiers the form does not declare are ignored. Returns how
    /// many fields were repopulated.
    pub fn restore_values(&mut self, form: &str, record: &DraftRecord) -> Result<usize, Error> {
        let form_state = self.form_mut(form)?;
        let mut restored = 0;
        for (identifier, value) in record {
            if let Some(field) = form_state.field_mut(identifier) {
                field.set_value(value.clone());
                restored += 1;
            }
        }
        Ok(restored)
    }
}

fn field_mut<'a>(
    form_state: &'a mut FormState,
    form: &str,
    field: &str,
) -> Result<&'a mut FieldState, Error> {
    form_state.field_mut(field).ok_or_else(|| Error::UnknownField {
        form: form.to_string(),
        field: field.to_string(),
    })
}

/// Message of the first failing rule, or `None` when every rule passes
fn first_failure(validators: &ValidatorRegistry, field: &FieldState) -> Option<String> {
    let text = field.value.validation_text();
    field
        .rules
        .iter()
        .find(|rule| !validators.passes(rule, text))
        .map(|rule| rule.message.clone())
}
