//! Validation rules and the validator registry

mod registry;
mod rules;

pub use registry::{CustomPredicate, ValidatorRegistry};
pub use rules::{RuleKind, ValidationRule, REQUIRED_MESSAGE};
