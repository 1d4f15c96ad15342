//! The propagable attribute subset of a field.

use std::fmt;
use std::str::FromStr;

use super::store::AttributeStore;

/// Interaction state carried by the `disabled` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disabled {
    /// The field is greyed out and not submitted.
    Disabled,
    /// The field is shown and submitted, but cannot be edited.
    Readonly,
}

impl Disabled {
    /// The attribute name and value used in markup.
    pub fn as_str(&self) -> &'static str {
        match self {
            Disabled::Disabled => "disabled",
            Disabled::Readonly => "readonly",
        }
    }
}

impl fmt::Display for Disabled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Disabled {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" => Ok(Disabled::Disabled),
            "readonly" => Ok(Disabled::Readonly),
            other => Err(format!("unknown disabled state: {}", other)),
        }
    }
}

/// Attributes one field hands to another.
///
/// The same type serves two flows:
///
/// - **broadcast**: a composite pushes its classes, style (without width),
///   data attributes, disabled state, size and required flag to every
///   registered child after each mutation.
/// - **copy-down**: at render time a composite pushes all of its shared
///   presentation attributes, including width, title, autofocus and the
///   label toggle, but never its required flag.
///
/// Identity and state (name, id, value, label, selection, submitted data,
/// invalidations) are not representable here and always stay per-child.
///
/// Applying a broadcast merges classes, style and data attributes
/// additively and overwrites the disabled state and size. Copy-down only
/// overwrites members the composite set itself. Other optional members are
/// only applied when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    pub classes: Vec<String>,
    pub style: AttributeStore,
    pub data_attributes: AttributeStore,
    /// Overwritten by a broadcast, so enabling a parent re-enables its
    /// children.
    pub disabled: Option<Disabled>,
    /// Overwritten by a broadcast.
    pub size: Option<String>,
    pub required: Option<bool>,
    pub title: Option<String>,
    pub auto_focus: Option<bool>,
    pub render_with_label: Option<bool>,
}

/// Something that can publish and receive propagated attributes.
pub trait AttributePropagation {
    /// The attributes this node broadcasts to its dependents.
    fn attributes(&self) -> AttributeSet;

    /// Merge received attributes into this node.
    fn apply_attributes(&mut self, attributes: &AttributeSet);
}
