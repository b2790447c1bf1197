//! Crate error types
//!
//! Only programmer errors surface here: referencing a form or field that was
//! never registered, or registering the same form twice. Validation failures
//! are field state, transport failures become a `SubmissionOutcome::Failed`,
//! and store failures are logged and swallowed, so none of those appear in
//! this enum.

use thiserror::Error;

/// Errors returned by the public registry and engine APIs
#[derive(Debug, Error)]
pub enum Error {
    /// No form registered under the given identifier
    #[error("unknown form \"{0}\"")]
    UnknownForm(String),

    /// The form exists but has no field with the given identifier
    #[error("unknown field \"{field}\" on form \"{form}\"")]
    UnknownField { form: String, field: String },

    /// A form with this identifier is already registered
    #[error("form \"{0}\" is already registered")]
    DuplicateForm(String),
}
