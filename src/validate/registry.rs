//! Validator registry with built-in and custom predicates
//!
//! Built-in checks are matched directly on `RuleKind`; custom validators are
//! registered by name and looked up dynamically. A custom rule whose name was
//! never registered fails closed (the value is treated as invalid) instead of
//! silently passing — a misconfigured rule must never let bad input through.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use url::Url;

use super::rules::RuleKind;

/// Predicate signature for custom validators: value and optional parameter
pub type CustomPredicate = Box<dyn Fn(&str, Option<&str>) -> bool + Send + Sync>;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

fn phone_re() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone pattern is valid"))
}

/// True when the value contains nothing but whitespace
fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_valid_phone(value: &str) -> bool {
    let digits: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    phone_re().is_match(&digits)
}

fn matches_pattern(value: &str, pattern: &str) -> bool {
    // Anchor so the whole value must match, not just a substring
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => re.is_match(value),
        Err(error) => {
            tracing::warn!(%pattern, %error, "invalid pattern rule; failing closed");
            false
        }
    }
}

fn parse_length(parameter: Option<&str>) -> Option<usize> {
    parameter.and_then(|p| p.parse::<usize>().ok())
}

/// Named validation predicates, both built-in and custom
///
/// Deliberately not a global: construct one, register custom validators on
/// it, and hand it to the form registry.
#[derive(Default)]
pub struct ValidatorRegistry {
    custom: HashMap<String, CustomPredicate>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom validator under a name referenced by `Custom` rules
    pub fn register<F>(&mut self, name: &str, predicate: F)
    where
        F: Fn(&str, Option<&str>) -> bool + Send + Sync + 'static,
    {
        self.custom.insert(name.to_string(), Box::new(predicate));
    }

    /// Whether a custom validator is registered under the given name
    pub fn has_custom(&self, name: &str) -> bool {
        self.custom.contains_key(name)
    }

    /// Evaluate one rule kind against a value
    ///
    /// Emptiness is solely the `Required` check's concern: format and length
    /// rules pass on blank input so an empty optional field never shows a
    /// format error.
    pub fn evaluate(&self, kind: &RuleKind, value: &str, parameter: Option<&str>) -> bool {
        match kind {
            RuleKind::Required => !is_blank(value),
            RuleKind::Email => is_blank(value) || email_re().is_match(value),
            RuleKind::Phone => is_blank(value) || is_valid_phone(value),
            RuleKind::Url => is_blank(value) || Url::parse(value).is_ok(),
            RuleKind::MinLength => match parse_length(parameter) {
                Some(min) => is_blank(value) || value.chars().count() >= min,
                None => {
                    tracing::warn!(?parameter, "min_length rule without a numeric parameter");
                    false
                }
            },
            RuleKind::MaxLength => match parse_length(parameter) {
                Some(max) => value.chars().count() <= max,
                None => {
                    tracing::warn!(?parameter, "max_length rule without a numeric parameter");
                    false
                }
            },
            RuleKind::Pattern => match parameter {
                Some(pattern) => is_blank(value) || matches_pattern(value, pattern),
                None => {
                    tracing::warn!("pattern rule without a pattern parameter");
                    false
                }
            },
            RuleKind::Custom(name) => match self.custom.get(name) {
                Some(predicate) => predicate(value, parameter),
                None => {
                    tracing::warn!(validator = %name, "custom validator not registered; failing closed");
                    false
                }
            },
        }
    }

    /// Evaluate a full rule (kind plus its own parameter)
    pub fn passes(&self, rule: &super::rules::ValidationRule, value: &str) -> bool {
        self.evaluate(&rule.kind, value, rule.parameter.as_deref())
    }
}
