//! formflow — form validation and submission pipeline
//!
//! A host-driven library for form handling: typed field declarations bind to
//! ordered validation rules, a per-form state machine drives submission over
//! an async transport, and a debounced sidecar persists in-progress drafts.
//! Presentation concerns (rendering errors, toasts, focus) stay with the
//! host behind the [`ui::UiSink`] and [`notify::NotificationSink`] traits.
//!
//! The usual entry point is [`FormEngine`]: construct the collaborators,
//! hand them over, then route input, commit, and submit events to it.

pub mod autosave;
pub mod binder;
pub mod declaration;
pub mod engine;
pub mod error;
pub mod notify;
pub mod pipeline;
pub mod registry;
pub mod state;
pub mod transport;
pub mod ui;
pub mod validate;

pub use declaration::{ControlKind, CustomRule, FieldDeclaration, FormDeclaration, FormPurpose};
pub use engine::{EngineOptions, FormEngine};
pub use error::Error;
pub use notify::{NotificationSink, Severity};
pub use pipeline::{SubmissionOutcome, SubmissionPipeline};
pub use registry::FormRegistry;
pub use state::{FieldState, FieldValue, FormState};
pub use transport::{SubmissionRequest, SubmissionResult, Transport};
pub use validate::{RuleKind, ValidationRule, ValidatorRegistry};
