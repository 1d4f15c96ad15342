//! Form configuration.

use serde::Deserialize;

use crate::validation::RuleSpec;

/// Settings shared by every field and form built from one `FormContext`.
///
/// All keys are optional when deserialising; missing keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Date format (PHP-style tokens, e.g. `d-m-Y`) enforced on date fields.
    pub date_format: String,

    /// Class added to a field once it carries invalidations.
    pub invalid_class: String,

    /// Class added by `set_required(true)`.
    pub required_class: String,

    /// Separator used when a field's errors are joined into one invalidation.
    pub error_separator: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            date_format: "d-m-Y".to_string(),
            invalid_class: "invalid".to_string(),
            required_class: "required".to_string(),
            error_separator: "<br/>\n".to_string(),
        }
    }
}

impl FormConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date format.
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Set the class used to mark invalid fields.
    pub fn invalid_class(mut self, class: impl Into<String>) -> Self {
        self.invalid_class = class.into();
        self
    }

    /// Set the class used to mark required fields.
    pub fn required_class(mut self, class: impl Into<String>) -> Self {
        self.required_class = class.into();
        self
    }

    /// Set the separator between joined error messages.
    pub fn error_separator(mut self, separator: impl Into<String>) -> Self {
        self.error_separator = separator.into();
        self
    }

    /// The `date_format` rule for the configured format.
    pub fn date_rule(&self) -> RuleSpec {
        RuleSpec::new("date_format", self.date_format.as_str())
    }
}
