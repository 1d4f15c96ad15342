//! Traits shared by simple and composite fields.

use super::kind::FieldKind;
use super::node::FieldNode;
use crate::attributes::AttributePropagation;
use crate::error::RenderError;
use crate::submission::SubmittedValue;
use crate::validation::{RuleSpec, ValidationTarget};

/// A form field as seen by the form coordinator.
///
/// Implemented by [`FieldNode`] and by composites that own child nodes.
/// Composites override the methods whose answer depends on their children.
pub trait Field: AttributePropagation {
    /// The node carrying this field's own attributes.
    fn node(&self) -> &FieldNode;

    fn node_mut(&mut self) -> &mut FieldNode;

    fn name(&self) -> &str {
        self.node().name()
    }

    fn kind(&self) -> FieldKind {
        self.node().kind()
    }

    fn is_posted(&self) -> bool {
        self.node().is_posted()
    }

    fn is_required(&self) -> bool {
        self.node().is_required()
    }

    fn is_valid(&self) -> bool {
        self.node().is_valid()
    }

    /// The submitted data, as handed to the validator.
    fn submitted(&self) -> Option<SubmittedValue> {
        self.node().posted().cloned()
    }

    /// The validation targets of this field with the rules to run on each.
    fn validation_plan(&self) -> Vec<(ValidationTarget, Vec<RuleSpec>)> {
        let node = self.node();
        vec![(ValidationTarget::from(node), node.implicit_and_own_rules())]
    }

    /// Attach a validation failure to the field.
    fn invalidate(&mut self, message: &str) {
        self.node_mut().add_invalidation(message);
    }

    /// Render the field's markup.
    fn render(&mut self) -> Result<String, RenderError>;
}

impl Field for FieldNode {
    fn node(&self) -> &FieldNode {
        self
    }

    fn node_mut(&mut self) -> &mut FieldNode {
        self
    }

    fn render(&mut self) -> Result<String, RenderError> {
        crate::render::render_node(self)
    }
}

/// A collection of fields owned by a form.
///
/// Usually derived: `#[derive(FieldSet)]` on a struct lists its field
/// members in declaration order.
///
/// # Example
///
/// ```ignore
/// #[derive(FieldSet)]
/// struct Signup {
///     name: FieldNode,
///     period: DateRange,
///     #[field(skip)]
///     source: String,
/// }
/// ```
pub trait FieldSet {
    fn fields(&self) -> Vec<&dyn Field>;

    fn fields_mut(&mut self) -> Vec<&mut dyn Field>;

    /// Find a field by name.
    fn field(&self, name: &str) -> Option<&dyn Field> {
        self.fields().into_iter().find(|field| field.name() == name)
    }

    /// Find a field by name, mutably.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Field> {
        self.fields_mut()
            .into_iter()
            .find(|field| field.name() == name)
    }
}

impl FieldSet for Vec<FieldNode> {
    fn fields(&self) -> Vec<&dyn Field> {
        self.iter().map(|field| field as &dyn Field).collect()
    }

    fn fields_mut(&mut self) -> Vec<&mut dyn Field> {
        self.iter_mut().map(|field| field as &mut dyn Field).collect()
    }
}

impl FieldSet for Vec<Box<dyn Field>> {
    fn fields(&self) -> Vec<&dyn Field> {
        self.iter().map(|field| field.as_ref() as &dyn Field).collect()
    }

    fn fields_mut(&mut self) -> Vec<&mut dyn Field> {
        self.iter_mut()
            .map(|field| field.as_mut() as &mut dyn Field)
            .collect()
    }
}
