//! Field state and value objects

use serde::{Deserialize, Serialize};

use crate::declaration::ControlKind;
use crate::validate::{RuleKind, ValidationRule};

/// Type-safe field values
///
/// Serializes untagged so payloads and auto-save records stay flat JSON maps
/// of strings and booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl FieldValue {
    /// The value each control kind starts with
    pub fn default_for(control: ControlKind) -> Self {
        match control {
            ControlKind::Checkbox => FieldValue::Flag(false),
            _ => FieldValue::Text(String::new()),
        }
    }

    /// Get the text value (empty for flag values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) => "",
        }
    }

    /// Get the flag value (false for text values)
    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Flag(f) => *f,
            FieldValue::Text(_) => false,
        }
    }

    /// The string rendition validators see: a set flag reads "true", an
    /// unset one reads empty so a required checkbox fails until checked
    pub fn validation_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(true) => "true",
            FieldValue::Flag(false) => "",
        }
    }

    /// Clear back to the control's empty value
    pub fn clear(&mut self) {
        match self {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Flag(f) => *f = false,
        }
    }
}

/// Per-field validation state
///
/// Owned by its parent `FormState`; mutated on input and commit events and
/// on every submission attempt. Pristine means never validated: `is_valid`
/// false, no error, live revalidation disarmed.
#[derive(Debug, Clone)]
pub struct FieldState {
    pub identifier: String,
    pub control: ControlKind,
    pub rules: Vec<ValidationRule>,
    pub value: FieldValue,
    pub is_valid: bool,
    pub last_error: Option<String>,
    /// Armed after the first failure; from then on the field revalidates on
    /// every input event instead of waiting for the next commit
    pub live_validate: bool,
}

impl FieldState {
    pub fn new(identifier: String, control: ControlKind, rules: Vec<ValidationRule>) -> Self {
        Self {
            identifier,
            control,
            rules,
            value: FieldValue::default_for(control),
            is_valid: false,
            last_error: None,
            live_validate: false,
        }
    }

    /// Whether the field carries a `Required` rule
    pub fn is_required(&self) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.kind == RuleKind::Required)
    }

    /// Replace the current value without validating
    pub fn set_value(&mut self, value: FieldValue) {
        self.value = value;
    }

    /// Record a validation failure
    pub fn record_failure(&mut self, message: String) {
        self.is_valid = false;
        self.last_error = Some(message);
        self.live_validate = true;
    }

    /// Record a validation pass
    pub fn record_success(&mut self) {
        self.is_valid = true;
        self.last_error = None;
    }

    /// Return to pristine: empty value, unvalidated, revalidation disarmed
    pub fn reset(&mut self) {
        self.value.clear();
        self.is_valid = false;
        self.last_error = None;
        self.live_validate = false;
    }
}
