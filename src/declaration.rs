//! Form and field declarations
//!
//! A declaration is the strongly-typed description of a form as the host
//! presents it: which fields exist, what kind of control each one is, and
//! which constraints apply. Declarations are plain data and serialize to
//! JSON, so hosts can keep form definitions in configuration files.

use serde::{Deserialize, Serialize};

/// What the form is for; selects the success copy shown after submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormPurpose {
    Contact,
    Newsletter,
    Investor,
    Partnership,
    Career,
    Support,
}

impl FormPurpose {
    /// Wire identifier used as the submission `form_type`
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Newsletter => "newsletter",
            Self::Investor => "investor",
            Self::Partnership => "partnership",
            Self::Career => "career",
            Self::Support => "support",
        }
    }

    /// Success copy shown when the transport accepts a submission
    pub fn success_message(&self) -> &'static str {
        match self {
            Self::Contact => "Thanks for reaching out! We'll get back to you within one business day.",
            Self::Newsletter => "You're on the list! Watch your inbox for the next issue.",
            Self::Investor => "Thank you for your interest. Our investor relations team will contact you shortly.",
            Self::Partnership => "Thanks! Our partnerships team will review your proposal and follow up soon.",
            Self::Career => "Application received! We'll be in touch if there's a fit.",
            Self::Support => "Your request has been logged. Our support team will respond shortly.",
        }
    }
}

/// The kind of input control a field is bound to
///
/// `Email`, `Phone`, and `Url` carry an implied format rule; `Checkbox`
/// fields hold a boolean value instead of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    #[default]
    Text,
    TextArea,
    Email,
    Phone,
    Url,
    Checkbox,
    Radio,
    Select,
}

impl ControlKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextArea => "textarea",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
        }
    }
}

/// A custom rule reference: validator name, optional parameter, error copy
///
/// The named validator must be registered on the `ValidatorRegistry`; an
/// unregistered name fails closed at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRule {
    pub name: String,
    #[serde(default)]
    pub parameter: Option<String>,
    pub message: String,
}

impl CustomRule {
    pub fn new(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            parameter: None,
            message: message.to_string(),
        }
    }

    pub fn with_parameter(name: &str, parameter: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            parameter: Some(parameter.to_string()),
            message: message.to_string(),
        }
    }
}

/// Declared constraints for a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub identifier: String,
    #[serde(default)]
    pub control: ControlKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub custom: Vec<CustomRule>,
}

impl FieldDeclaration {
    /// Create a declaration for the given control kind with no constraints
    pub fn new(identifier: &str, control: ControlKind) -> Self {
        Self {
            identifier: identifier.to_string(),
            control,
            required: false,
            min_length: None,
            max_length: None,
            pattern: None,
            custom: Vec::new(),
        }
    }

    /// Create a plain text field
    pub fn text(identifier: &str) -> Self {
        Self::new(identifier, ControlKind::Text)
    }

    /// Create a multi-line text field
    pub fn text_area(identifier: &str) -> Self {
        Self::new(identifier, ControlKind::TextArea)
    }

    /// Create an email field (carries the email format rule)
    pub fn email(identifier: &str) -> Self {
        Self::new(identifier, ControlKind::Email)
    }

    /// Create a phone field (carries the phone format rule)
    pub fn phone(identifier: &str) -> Self {
        Self::new(identifier, ControlKind::Phone)
    }

    /// Create a URL field (carries the URL format rule)
    pub fn url(identifier: &str) -> Self {
        Self::new(identifier, ControlKind::Url)
    }

    /// Create a checkbox field (boolean value)
    pub fn checkbox(identifier: &str) -> Self {
        Self::new(identifier, ControlKind::Checkbox)
    }

    /// Create a radio group field (value is the selected option)
    pub fn radio(identifier: &str) -> Self {
        Self::new(identifier, ControlKind::Radio)
    }

    /// Create a select field
    pub fn select(identifier: &str) -> Self {
        Self::new(identifier, ControlKind::Select)
    }

    /// Mark the field as required
    pub fn require(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set a minimum length constraint
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set a maximum length constraint
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set a full-match pattern constraint
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    /// Append a custom rule (custom rules always evaluate last)
    pub fn with_custom(mut self, rule: CustomRule) -> Self {
        self.custom.push(rule);
        self
    }
}

/// Declared shape of a whole form
///
/// Field order is meaningful: it is the order fields appear in the
/// presentation, and the order validation and focus-first-error follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDeclaration {
    /// Stable identifier; a `form-<uuid>` identifier is generated when absent
    #[serde(default)]
    pub identifier: Option<String>,
    pub purpose: FormPurpose,
    pub fields: Vec<FieldDeclaration>,
}

impl FormDeclaration {
    pub fn new(purpose: FormPurpose) -> Self {
        Self {
            identifier: None,
            purpose,
            fields: Vec::new(),
        }
    }

    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.identifier = Some(identifier.to_string());
        self
    }

    pub fn field(mut self, field: FieldDeclaration) -> Self {
        self.fields.push(field);
        self
    }
}
