//! Validation rule value objects

/// The kind of check a rule performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    Required,
    Email,
    Phone,
    Url,
    MinLength,
    MaxLength,
    Pattern,
    /// A dynamically registered validator, looked up by name
    Custom(String),
}

impl RuleKind {
    pub fn label(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::Pattern => "pattern",
            Self::Custom(name) => name,
        }
    }
}

/// Error copy for a failing `Required` rule; tests and hosts rely on the
/// exact wording
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// One check against a field value, with the error copy shown on failure
///
/// Rules are immutable once derived from a declaration. A field's rules are
/// evaluated in order and the first failure wins: its message becomes the
/// field's error and later rules are not consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRule {
    pub kind: RuleKind,
    pub parameter: Option<String>,
    pub message: String,
}

impl ValidationRule {
    pub fn required() -> Self {
        Self {
            kind: RuleKind::Required,
            parameter: None,
            message: REQUIRED_MESSAGE.to_string(),
        }
    }

    pub fn email() -> Self {
        Self {
            kind: RuleKind::Email,
            parameter: None,
            message: "Please enter a valid email address".to_string(),
        }
    }

    pub fn phone() -> Self {
        Self {
            kind: RuleKind::Phone,
            parameter: None,
            message: "Please enter a valid phone number".to_string(),
        }
    }

    pub fn url() -> Self {
        Self {
            kind: RuleKind::Url,
            parameter: None,
            message: "Please enter a valid URL".to_string(),
        }
    }

    pub fn min_length(min: usize) -> Self {
        Self {
            kind: RuleKind::MinLength,
            parameter: Some(min.to_string()),
            message: format!("Must be at least {min} characters"),
        }
    }

    pub fn max_length(max: usize) -> Self {
        Self {
            kind: RuleKind::MaxLength,
            parameter: Some(max.to_string()),
            message: format!("Must be no more than {max} characters"),
        }
    }

    pub fn pattern(pattern: &str) -> Self {
        Self {
            kind: RuleKind::Pattern,
            parameter: Some(pattern.to_string()),
            message: "Please match the requested format".to_string(),
        }
    }

    pub fn custom(name: &str, parameter: Option<String>, message: &str) -> Self {
        Self {
            kind: RuleKind::Custom(name.to_string()),
            parameter,
            message: message.to_string(),
        }
    }

    /// Override the default error copy
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }
}
