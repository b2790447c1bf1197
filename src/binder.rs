//! Field binder: declaration constraints to an ordered rule sequence
//!
//! The derivation order is fixed and deliberate. Required-ness always comes
//! first so an empty field reports "required" rather than a confusing format
//! error; the semantic format check (from the control kind) follows, then
//! length bounds (min before max), then pattern, with custom rules last in
//! the order the declaration supplied them.

use crate::declaration::{ControlKind, FieldDeclaration};
use crate::state::FieldState;
use crate::validate::ValidationRule;

/// Derive the ordered rule sequence for a field declaration
pub fn bind_rules(declaration: &FieldDeclaration) -> Vec<ValidationRule> {
    let mut rules = Vec::new();

    if declaration.required {
        rules.push(ValidationRule::required());
    }

    match declaration.control {
        ControlKind::Email => rules.push(ValidationRule::email()),
        ControlKind::Phone => rules.push(ValidationRule::phone()),
        ControlKind::Url => rules.push(ValidationRule::url()),
        _ => {}
    }

    if let Some(min) = declaration.min_length {
        rules.push(ValidationRule::min_length(min));
    }
    if let Some(max) = declaration.max_length {
        rules.push(ValidationRule::max_length(max));
    }
    if let Some(pattern) = &declaration.pattern {
        rules.push(ValidationRule::pattern(pattern));
    }

    for custom in &declaration.custom {
        rules.push(ValidationRule::custom(
            &custom.name,
            custom.parameter.clone(),
            &custom.message,
        ));
    }

    rules
}

/// Build the initial state for a declared field
pub fn bind_field(declaration: &FieldDeclaration) -> FieldState {
    FieldState::new(
        declaration.identifier.clone(),
        declaration.control,
        bind_rules(declaration),
    )
}
