//! Form and field state module

mod field;
mod form;

pub use field::{FieldState, FieldValue};
pub use form::FormState;
