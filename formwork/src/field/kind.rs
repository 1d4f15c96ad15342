//! Field kinds and selection modes.

use std::fmt;

/// The kind of a field node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Password,
    Email,
    Hidden,
    TextArea,
    Date,
    File,
    Button,
    Submit,
    Dropdown,
    Checkbox,
    Radio,
    DateRange,
    Address,
}

impl FieldKind {
    /// Human-readable kind name, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Password => "password",
            FieldKind::Email => "email",
            FieldKind::Hidden => "hidden",
            FieldKind::TextArea => "textarea",
            FieldKind::Date => "date",
            FieldKind::File => "file",
            FieldKind::Button => "button",
            FieldKind::Submit => "submit",
            FieldKind::Dropdown => "dropdown",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::DateRange => "date range",
            FieldKind::Address => "address",
        }
    }

    /// The `type` attribute of the rendered `<input>`.
    ///
    /// Date fields render as plain text inputs with a fixed format.
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Date | FieldKind::DateRange | FieldKind::Address => "text",
            other => other.as_str(),
        }
    }

    /// Check if the kind picks from a fixed list of options.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FieldKind::Dropdown | FieldKind::Checkbox | FieldKind::Radio
        )
    }

    /// Check if the kind is built from child fields.
    pub fn is_composite(&self) -> bool {
        matches!(self, FieldKind::DateRange | FieldKind::Address)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How `set_selected` treats a field that already has submitted data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectMode {
    /// Only select when nothing was posted for the field.
    #[default]
    Default,
    /// Always select, replacing submitted data.
    OverrulePost,
    /// Only select on a plain page view, when nothing at all was submitted.
    InitiallyOnly,
}

impl SelectMode {
    /// Check if a selection may be applied.
    pub fn allows(self, posted: bool, submission_empty: bool) -> bool {
        match self {
            SelectMode::Default => !posted,
            SelectMode::OverrulePost => true,
            SelectMode::InitiallyOnly => !posted && submission_empty,
        }
    }
}
