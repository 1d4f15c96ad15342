//! Form context: the submission, rule table and configuration shared by
//! every field of a request.

use std::sync::Arc;

use crate::config::FormConfig;
use crate::field::{Address, DateRange, FieldKind, FieldNode};
use crate::submission::Submission;
use crate::validation::{RuleTable, Validator};

/// Shared, cheaply clonable handle to per-request form state.
///
/// Fields are created through the context so that each one reads the same
/// submission snapshot and validates against the same rule table.
///
/// # Example
///
/// ```ignore
/// let cx = FormContext::new(Submission::from_urlencoded(body));
/// let mut email = cx.email("email", None);
/// email.set_required(true);
/// ```
#[derive(Debug, Clone)]
pub struct FormContext {
    submission: Arc<Submission>,
    rules: Arc<RuleTable>,
    config: Arc<FormConfig>,
}

impl FormContext {
    /// Create a context with the standard rules and default configuration.
    pub fn new(submission: Submission) -> Self {
        Self {
            submission: Arc::new(submission),
            rules: Arc::new(RuleTable::standard()),
            config: Arc::new(FormConfig::default()),
        }
    }

    /// Replace the rule table.
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = Arc::new(rules);
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn rules(&self) -> &Arc<RuleTable> {
        &self.rules
    }

    pub fn config(&self) -> &Arc<FormConfig> {
        &self.config
    }

    /// A fresh validator over the context's rule table.
    pub fn validator(&self) -> Validator {
        Validator::new(self.rules.clone())
    }

    // =========================================================================
    // Field factories
    // =========================================================================

    fn field(&self, kind: FieldKind, name: &str, value: Option<&str>) -> FieldNode {
        let mut node = FieldNode::new(self, kind, name);
        if let Some(value) = value {
            node.set_value(value);
        }
        node
    }

    pub fn text(&self, name: &str, value: Option<&str>) -> FieldNode {
        self.field(FieldKind::Text, name, value)
    }

    pub fn password(&self, name: &str) -> FieldNode {
        self.field(FieldKind::Password, name, None)
    }

    pub fn email(&self, name: &str, value: Option<&str>) -> FieldNode {
        self.field(FieldKind::Email, name, value)
    }

    pub fn hidden(&self, name: &str, value: Option<&str>) -> FieldNode {
        self.field(FieldKind::Hidden, name, value)
    }

    pub fn textarea(&self, name: &str, value: Option<&str>) -> FieldNode {
        self.field(FieldKind::TextArea, name, value)
    }

    /// A date field. A non-empty default must match the date format.
    pub fn date(&self, name: &str, value: Option<&str>) -> FieldNode {
        let mut node = self.field(FieldKind::Date, name, value);
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            node.self_check(value, self.config.date_rule());
        }
        node
    }

    pub fn date_range(&self, name: &str, from: Option<&str>, to: Option<&str>) -> DateRange {
        DateRange::new(self, name, from, to)
    }

    pub fn address(&self, name: &str) -> Address {
        Address::new(self, name)
    }

    /// A dropdown with `(value, label)` options.
    pub fn dropdown<I, V, L>(&self, name: &str, options: I) -> FieldNode
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        let mut node = self.field(FieldKind::Dropdown, name, None);
        node.append_options(options);
        node
    }

    /// A checkbox group. Every value doubles as its label.
    pub fn checkbox<I, S>(&self, name: &str, values: I) -> FieldNode
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut node = self.field(FieldKind::Checkbox, name, None);
        node.set_values(values);
        node
    }

    /// A radio group. Every value doubles as its label.
    pub fn radio<I, S>(&self, name: &str, values: I) -> FieldNode
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut node = self.field(FieldKind::Radio, name, None);
        node.set_values(values);
        node
    }

    pub fn file(&self, name: &str) -> FieldNode {
        self.field(FieldKind::File, name, None)
    }

    pub fn button(&self, name: &str, value: &str) -> FieldNode {
        let mut node = self.field(FieldKind::Button, name, Some(value));
        node.add_class("btn");
        node
    }

    pub fn submit(&self, name: &str, value: &str) -> FieldNode {
        let mut node = self.field(FieldKind::Submit, name, Some(value));
        node.add_class("btn");
        node
    }
}
