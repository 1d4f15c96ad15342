//! Error types for field construction, validation and rendering.

use thiserror::Error;

/// Error raised while registering validation rules.
///
/// These indicate a programming error (a rule that the rule table does not
/// know about), never a problem with submitted data. Failed submissions are
/// reported through the validator's error index instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The rule name is not present in the rule table.
    #[error("Invalid rule \"{rule}\" specified.")]
    UnknownRule {
        /// The offending rule spec, as given by the caller.
        rule: String,
    },
}

/// A setter received a value that failed its own self-check.
///
/// Never returned to the caller: the setter becomes a no-op and the rejection
/// is recorded on the node (see `FieldNode::rejected_attributes`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value {value:?} for {attribute} on field '{field}': {reason}")]
pub struct InvalidAttributeValue {
    /// Name of the field whose setter was called.
    pub field: String,
    /// Attribute the setter manages (e.g. "width", "class").
    pub attribute: &'static str,
    /// The rejected value.
    pub value: String,
    /// The rendered self-check message.
    pub reason: String,
}

/// Error returned by `render()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The field's construction-time parameters failed their self-check.
    #[error("Error rendering {kind} field with name '{field}': {}", errors.join("; "))]
    Precondition {
        /// Name of the field that refused to render.
        field: String,
        /// Kind of the field (e.g. "date range").
        kind: &'static str,
        /// The violated self-check messages.
        errors: Vec<String>,
    },
}

/// Error type for form-level operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A rule could not be registered.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The form method is not `post` or `get`.
    #[error("invalid method for form: {0}")]
    InvalidMethod(String),

    /// The enctype is not one of the supported encodings.
    #[error("invalid enctype for form: {0}")]
    InvalidEnctype(String),
}
