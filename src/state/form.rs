//! Aggregate form state

use std::collections::HashMap;

use crate::declaration::FormPurpose;
use crate::state::field::{FieldState, FieldValue};

/// State of a registered form: its fields plus the aggregate flags the
/// pipeline reads before and during submission.
#[derive(Debug, Clone)]
pub struct FormState {
    pub identifier: String,
    pub purpose: FormPurpose,
    pub fields: Vec<FieldState>,
    /// True once every required field has validated successfully
    pub is_valid: bool,
    /// True while a submission is in flight
    pub is_submitting: bool,
}

impl FormState {
    pub fn new(identifier: String, purpose: FormPurpose, fields: Vec<FieldState>) -> Self {
        Self {
            identifier,
            purpose,
            fields,
            is_valid: false,
            is_submitting: false,
        }
    }

    /// Look up a field by identifier
    pub fn field(&self, identifier: &str) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.identifier == identifier)
    }

    /// Look up a field mutably by identifier
    pub fn field_mut(&mut self, identifier: &str) -> Option<&mut FieldState> {
        self.fields.iter_mut().find(|f| f.identifier == identifier)
    }

    /// Recompute aggregate validity from the required fields. Optional
    /// fields never hold the form back, even while they carry errors.
    pub fn recompute_validity(&mut self) {
        self.is_valid = self
            .fields
            .iter()
            .filter(|f| f.is_required())
            .all(|f| f.is_valid);
    }

    /// First field in declaration order that currently holds an error
    pub fn first_error_field(&self) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.last_error.is_some())
    }

    /// Current values keyed by field identifier, for payloads and drafts
    pub fn value_map(&self) -> HashMap<String, FieldValue> {
        self.fields
            .iter()
            .map(|f| (f.identifier.clone(), f.value.clone()))
            .collect()
    }

    /// Return every field to pristine and drop the aggregate flags
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
        self.is_valid = false;
        self.is_submitting = false;
    }
}
