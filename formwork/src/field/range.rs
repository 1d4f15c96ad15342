//! A date range built from two date fields.

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

/// Two date fields, `<name>-from` and `<name>-to`, presented as one field.
///
/// Attributes set on the range are broadcast to both dates. Rules added to
/// the range run against each date.
#[derive(Debug, Clone)]
pub struct DateRange {
    node: FieldNode,
    from: DependentKey,
    to: DependentKey,
}

impl DateRange {
    /// Create a range with optional default dates.
    ///
    /// Defaults are checked against the configured date format; a bad
    /// default blocks rendering.
    pub fn new(cx: &FormContext, name: &str, from: Option<&str>, to: Option<&str>) -> Self {
        let mut node = FieldNode::new(cx, FieldKind::DateRange, name);
        let format = cx.config().date_rule();
        for date in [from, to].into_iter().flatten() {
            if !date.trim().is_empty() {
                node.self_check(date, format.clone());
            }
        }

        let mut date_from = FieldNode::new(cx, FieldKind::Date, format!("{}-from", name));
        let mut date_to = FieldNode::new(cx, FieldKind::Date, format!("{}-to", name));
        if let Some(from) = from {
            date_from.set_value(from);
        }
        if let Some(to) = to {
            date_to.set_value(to);
        }

        let from = node.register_dependent(date_from);
        let to = node.register_dependent(date_to);
        let mut range = Self { node, from, to };
        range.set_labels("Between", "and");
        range
    }

    pub fn date_from(&self) -> &FieldNode {
        self.node.dependent(self.from)
    }

    pub fn date_from_mut(&mut self) -> &mut FieldNode {
        self.node.dependent_mut(self.from)
    }

    pub fn date_to(&self) -> &FieldNode {
        self.node.dependent(self.to)
    }

    pub fn date_to_mut(&mut self) -> &mut FieldNode {
        self.node.dependent_mut(self.to)
    }

    /// Set the labels of both dates.
    pub fn set_labels(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.date_from_mut().set_label(from);
        self.date_to_mut().set_label(to);
        self
    }

    /// The labels of both dates.
    pub fn labels(&self) -> (Option<&str>, Option<&str>) {
        (self.date_from().label(), self.date_to().label())
    }

    /// Check if both dates were posted.
    pub fn is_posted(&self) -> bool {
        self.date_from().is_posted() && self.date_to().is_posted()
    }

    /// Both submitted dates, once the range is posted.
    pub fn submitted(&self) -> Option<SubmittedValue> {
        let from = self.date_from().posted()?.as_single()?.to_string();
        let to = self.date_to().posted()?.as_single()?.to_string();
        Some(SubmittedValue::Many(vec![from, to]))
    }

    /// Select both dates unless the range was posted.
    pub fn set_selected(&mut self, from: &str, to: &str) -> &mut Self {
        self.set_selected_with(from, to, SelectMode::Default)
    }

    pub fn set_selected_with(&mut self, from: &str, to: &str, mode: SelectMode) -> &mut Self {
        if !mode.allows(self.is_posted(), self.node.submission_empty()) {
            log::debug!("Keeping submitted dates of range '{}'", self.node.name());
            return self;
        }
        self.node
            .force_selected(SubmittedValue::from(vec![from, to]));
        self.date_from_mut().set_selected_with(from, mode);
        self.date_to_mut().set_selected_with(to, mode);
        self
    }

    /// Valid when neither the range nor a date carries invalidations.
    pub fn is_valid(&self) -> bool {
        self.node.is_valid() && self.date_from().is_valid() && self.date_to().is_valid()
    }
}

impl Deref for DateRange {
    type Target = FieldNode;

    fn deref(&self) -> &FieldNode {
        &self.node
    }
}

impl DerefMut for DateRange {
    fn deref_mut(&mut self) -> &mut FieldNode {
        &mut self.node
    }
}

impl AttributePropagation for DateRange {
    fn attributes(&self) -> AttributeSet {
        self.node.attributes()
    }

    fn apply_attributes(&mut self, attributes: &AttributeSet) {
        self.node.apply_attributes(attributes);
    }
}

impl Field for DateRange {
    fn node(&self) -> &FieldNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut FieldNode {
        &mut self.node
    }

    fn is_posted(&self) -> bool {
        DateRange::is_posted(self)
    }

    fn is_valid(&self) -> bool {
        DateRange::is_valid(self)
    }

    fn submitted(&self) -> Option<SubmittedValue> {
        DateRange::submitted(self)
    }

    /// One target per date: its date format and allow-list rules plus the
    /// rules of the range.
    fn validation_plan(&self) -> Vec<(ValidationTarget, Vec<RuleSpec>)> {
        [self.date_from(), self.date_to()]
            .into_iter()
            .map(|date| {
                let mut rules = date.implicit_and_own_rules();
                rules.extend(self.node.validations().iter().cloned());
                (ValidationTarget::from(date), rules)
            })
            .collect()
    }

    fn render(&mut self) -> Result<String, RenderError> {
        self.node.ensure_renderable()?;

        let shared = self.node.shared_attributes();
        for key in [self.from, self.to] {
            self.node.dependent_mut(key).inherit_attributes(&shared);
        }

        let mut out = render::render_node(self.date_from())?;
        out.push_str(&render::render_node(self.date_to())?);
        out.push_str(&render::invalidations(&self.node));
        Ok(out)
    }
}
