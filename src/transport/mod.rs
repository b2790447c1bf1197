//! Submission transport module

mod simulated;
mod traits;

use std::collections::HashMap;

use crate::state::FieldValue;

pub use simulated::{SimulatedOutcome, SimulatedTransport};
pub use traits::Transport;

#[cfg(test)]
pub use traits::MockTransport;

/// One submission attempt, built fresh from the form's current values
///
/// Checkbox fields carry a boolean, radio fields the selected option, all
/// others the raw text; the untagged `FieldValue` serialization keeps the
/// payload a flat string/boolean map on the wire.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubmissionRequest {
    pub form_type: String,
    pub payload: HashMap<String, FieldValue>,
}

/// What the transport reported back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success { message: String },
    Failure { message: String },
}
