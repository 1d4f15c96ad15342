//! A Dutch-style address: postcode, house number and extension.

use std::ops::{Deref, DerefMut};

use super::kind::{FieldKind, SelectMode};
use super::node::FieldNode;
use super::traits::Field;
use crate::attributes::{AttributePropagation, AttributeSet, DependentKey};
use crate::context::FormContext;
use crate::error::RenderError;
use crate::render;
use crate::submission::SubmittedValue;
use crate::validation::{RuleSpec, ValidationTarget};

const POSTCODE: &str = "postcode";
const HOUSE_NUMBER: &str = "housenumber";
const EXTENSION: &str = "extension";

/// Style of the children while they still show their placeholder values.
const PLACEHOLDER_STYLE: &str = "font-style:italic; color:#888;";

/// Three text fields presented as one address field.
///
/// Each child starts with its own name as value, shown in a grey italic
/// placeholder style. A child still carrying that value counts as not
/// posted.
#[derive(Debug, Clone)]
pub struct Address {
    node: FieldNode,
    postcode: DependentKey,
    house_number: DependentKey,
    extension: DependentKey,
}

impl Address {
    pub fn new(cx: &FormContext, name: &str) -> Self {
        let mut node = FieldNode::new(cx, FieldKind::Address, name);

        let mut child = |role: &str| {
            let mut field = FieldNode::new(cx, FieldKind::Text, role);
            field.set_value(role);
            node.register_dependent(field)
        };
        let postcode = child(POSTCODE);
        let house_number = child(HOUSE_NUMBER);
        let extension = child(EXTENSION);

        node.set_width(150)
            .add_style(PLACEHOLDER_STYLE)
            .add_class("address");

        Self {
            node,
            postcode,
            house_number,
            extension,
        }
    }

    pub fn postcode(&self) -> &FieldNode {
        self.node.dependent(self.postcode)
    }

    pub fn postcode_mut(&mut self) -> &mut FieldNode {
        self.node.dependent_mut(self.postcode)
    }

    pub fn house_number(&self) -> &FieldNode {
        self.node.dependent(self.house_number)
    }

    pub fn house_number_mut(&mut self) -> &mut FieldNode {
        self.node.dependent_mut(self.house_number)
    }

    pub fn extension(&self) -> &FieldNode {
        self.node.dependent(self.extension)
    }

    pub fn extension_mut(&mut self) -> &mut FieldNode {
        self.node.dependent_mut(self.extension)
    }

    /// Check if postcode and house number were posted with real values.
    pub fn is_posted(&self) -> bool {
        is_real(self.postcode(), POSTCODE) && is_real(self.house_number(), HOUSE_NUMBER)
    }

    /// The submitted postcode, house number and extension, once posted.
    pub fn submitted(&self) -> Option<SubmittedValue> {
        if !self.is_posted() {
            return None;
        }
        let part = |child: &FieldNode| {
            child
                .posted()
                .and_then(SubmittedValue::as_single)
                .unwrap_or_default()
                .to_string()
        };
        Some(SubmittedValue::Many(vec![
            part(self.postcode()),
            part(self.house_number()),
            part(self.extension()),
        ]))
    }

    /// Select an address unless one was posted.
    pub fn set_selected(&mut self, postcode: &str, house_number: &str, extension: &str) -> &mut Self {
        self.set_selected_with(postcode, house_number, extension, SelectMode::Default)
    }

    /// Select an address and drop the placeholder style.
    ///
    /// Once the address itself accepts the selection, its children take it
    /// even if they posted their placeholder values.
    pub fn set_selected_with(
        &mut self,
        postcode: &str,
        house_number: &str,
        extension: &str,
        mode: SelectMode,
    ) -> &mut Self {
        if !mode.allows(self.is_posted(), self.node.submission_empty()) {
            log::debug!("Keeping submitted address '{}'", self.node.name());
            return self;
        }
        self.node.force_selected(SubmittedValue::from(vec![
            postcode,
            house_number,
            extension,
        ]));
        self.node.remove_style(PLACEHOLDER_STYLE);

        let values = [
            (self.postcode, postcode),
            (self.house_number, house_number),
            (self.extension, extension),
        ];
        for (key, value) in values {
            self.node
                .dependent_mut(key)
                .remove_style(PLACEHOLDER_STYLE)
                .set_selected_with(value, SelectMode::OverrulePost);
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.node.is_valid() && self.node.dependents().all(FieldNode::is_valid)
    }
}

fn is_real(child: &FieldNode, placeholder: &str) -> bool {
    child
        .posted()
        .is_some_and(|posted| posted.as_single() != Some(placeholder))
}

impl Deref for Address {
    type Target = FieldNode;

    fn deref(&self) -> &FieldNode {
        &self.node
    }
}

impl DerefMut for Address {
    fn deref_mut(&mut self) -> &mut FieldNode {
        &mut self.node
    }
}

impl AttributePropagation for Address {
    fn attributes(&self) -> AttributeSet {
        self.node.attributes()
    }

    fn apply_attributes(&mut self, attributes: &AttributeSet) {
        self.node.apply_attributes(attributes);
    }
}

impl Field for Address {
    fn node(&self) -> &FieldNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut FieldNode {
        &mut self.node
    }

    fn is_posted(&self) -> bool {
        Address::is_posted(self)
    }

    fn is_valid(&self) -> bool {
        Address::is_valid(self)
    }

    fn submitted(&self) -> Option<SubmittedValue> {
        Address::submitted(self)
    }

    fn validation_plan(&self) -> Vec<(ValidationTarget, Vec<RuleSpec>)> {
        let target = ValidationTarget::from(&self.node).data(self.submitted());
        vec![(target, self.node.validations().to_vec())]
    }

    fn render(&mut self) -> Result<String, RenderError> {
        self.node.ensure_renderable()?;

        let shared = self.node.shared_attributes();
        for key in [self.postcode, self.house_number, self.extension] {
            self.node.dependent_mut(key).inherit_attributes(&shared);
        }
        if let Some(label) = self.node.label().map(str::to_string) {
            self.postcode_mut().set_label(label);
        }
        self.house_number_mut().set_width(50);

        let mut out = String::new();
        for child in self.node.dependents() {
            out.push_str(&render::render_node(child)?);
        }
        out.push_str(&render::invalidations(&self.node));
        Ok(out)
    }
}
