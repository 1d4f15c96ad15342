//! The validation engine.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::messages::{label_for, replace_attribute};
use super::rules::{Params, RuleList, RuleSpec};
use super::table::RuleTable;
use crate::error::ValidationError;
use crate::submission::SubmittedValue;

/// Suffixes of the child fields of range composites.
const RANGE_SUFFIXES: &[&str] = &["-from", "-to"];

/// The subject of a validation: a field name, its human label and the data
/// under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationTarget {
    name: String,
    label: String,
    data: Option<SubmittedValue>,
}

impl ValidationTarget {
    /// Create a target without data. The label is derived from the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: label_for(&name),
            name,
            data: None,
        }
    }

    /// Set the data under test.
    pub fn data(mut self, data: Option<SubmittedValue>) -> Self {
        self.data = data;
        self
    }

    /// Set the human label used in messages.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for ValidationTarget {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ValidationTarget {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Rules, data and message accumulated for one field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingValidation {
    name: String,
    label: String,
    data: Option<SubmittedValue>,
    rules: Vec<RuleSpec>,
    message: Option<String>,
}

impl PendingValidation {
    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The data under test (`None` if nothing was supplied).
    pub fn data(&self) -> Option<&SubmittedValue> {
        self.data.as_ref()
    }

    /// The rules, deduplicated by rule name.
    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }

    /// The override message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Accumulates rules per field and evaluates them through a rule table.
///
/// One validator can serve many fields in sequence: accumulate with
/// `add_validation`, evaluate with `passes`, then `reset` before the next
/// field.
///
/// # Example
///
/// ```ignore
/// let mut validator = Validator::new(Arc::new(RuleTable::standard()));
/// validator.add_validation(&email_field, "required|email", None)?;
///
/// if !validator.passes() {
///     let errors = validator.attribute_errors("email");
/// }
/// validator.reset();
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    table: Arc<RuleTable>,
    pending: Vec<PendingValidation>,
    errors: BTreeMap<String, Vec<String>>,
    /// Failures recorded by one-shot `validate()` calls, kept until `reset()`.
    checked: BTreeMap<String, Vec<String>>,
}

impl Validator {
    /// Create an empty validator.
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self {
            table,
            pending: Vec::new(),
            errors: BTreeMap::new(),
            checked: BTreeMap::new(),
        }
    }

    /// The rule table this validator evaluates against.
    pub fn table(&self) -> &Arc<RuleTable> {
        &self.table
    }

    /// Register rules for a field.
    ///
    /// A second call for the same field merges rules whose name is not yet
    /// present; the first-seen data, message and parameters are kept.
    pub fn add_validation(
        &mut self,
        target: impl Into<ValidationTarget>,
        rules: impl Into<RuleList>,
        message: Option<&str>,
    ) -> Result<(), ValidationError> {
        let target = target.into();
        let rules = self.known_rules(rules.into())?;

        let entry = match self.pending.iter().position(|e| e.name == target.name) {
            Some(index) => &mut self.pending[index],
            None => {
                self.pending.push(PendingValidation {
                    name: target.name.clone(),
                    label: target.label.clone(),
                    data: None,
                    rules: Vec::new(),
                    message: None,
                });
                let last = self.pending.len() - 1;
                &mut self.pending[last]
            }
        };

        for rule in rules {
            if !entry.rules.iter().any(|existing| existing.same_rule(&rule)) {
                entry.rules.push(rule);
            }
        }
        if entry.data.is_none() {
            entry.data = target.data;
        }
        if entry.message.is_none() {
            entry.message = message.map(str::to_string);
        }
        Ok(())
    }

    /// Register one named rule with its parameters.
    ///
    /// A scalar parameter is wrapped into a one-element list and is never
    /// split on commas. Merging follows `add_validation`.
    pub fn add_rule(
        &mut self,
        target: impl Into<ValidationTarget>,
        rule: &str,
        params: impl Into<Params>,
        message: Option<&str>,
    ) -> Result<(), ValidationError> {
        self.add_validation(target, RuleSpec::new(rule, params), message)
    }

    /// The accumulated entries, in registration order.
    pub fn pending(&self) -> &[PendingValidation] {
        &self.pending
    }

    /// Validate a single value immediately.
    ///
    /// Failures are added to the error index under `name` and kept until
    /// `reset()`, so several checks against one name accumulate.
    pub fn validate(
        &mut self,
        name: &str,
        value: impl Into<SubmittedValue>,
        rules: impl Into<RuleList>,
        message: Option<&str>,
    ) -> Result<bool, ValidationError> {
        let rules = self.known_rules(rules.into())?;
        let value = value.into();
        let failed = self.failures(Some(&value), &rules, &label_for(name), message);
        if failed.is_empty() {
            return Ok(true);
        }

        self.checked
            .entry(name.to_string())
            .or_default()
            .extend(failed.iter().cloned());
        self.errors.entry(name.to_string()).or_default().extend(failed);
        Ok(false)
    }

    /// Evaluate rules against a value without recording anything.
    ///
    /// Returns the failure messages (empty when every rule passes).
    pub fn check(
        &self,
        name: &str,
        value: impl Into<SubmittedValue>,
        rules: impl Into<RuleList>,
    ) -> Result<Vec<String>, ValidationError> {
        let rules = self.known_rules(rules.into())?;
        Ok(self.failures(Some(&value.into()), &rules, &label_for(name), None))
    }

    /// Evaluate every pending entry and rebuild the error index.
    ///
    /// Pure over the pending entries: calling it twice yields the same errors.
    pub fn passes(&mut self) -> bool {
        let mut errors = self.checked.clone();
        for entry in &self.pending {
            let failed = self.failures(
                entry.data.as_ref(),
                &entry.rules,
                &entry.label,
                entry.message.as_deref(),
            );
            if !failed.is_empty() {
                errors.entry(entry.name.clone()).or_default().extend(failed);
            }
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Alias of `passes`.
    pub fn is_valid(&mut self) -> bool {
        self.passes()
    }

    /// Check if the error index currently holds any error.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The full error index, keyed by field name.
    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// The errors of one field.
    ///
    /// Falls back to `<name>-from`, then `<name>-to`, so that range
    /// composites answer for the failures of their children.
    pub fn attribute_errors(&self, name: &str) -> &[String] {
        if let Some(errors) = self.errors.get(name) {
            return errors;
        }
        RANGE_SUFFIXES
            .iter()
            .find_map(|suffix| self.errors.get(&format!("{}{}", name, suffix)))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Clear pending entries and errors for the next field.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.errors.clear();
        self.checked.clear();
    }

    fn known_rules(&self, rules: RuleList) -> Result<Vec<RuleSpec>, ValidationError> {
        let rules = rules.into_vec();
        for rule in &rules {
            self.table.ensure(rule)?;
        }
        Ok(rules)
    }

    fn failures(
        &self,
        value: Option<&SubmittedValue>,
        rules: &[RuleSpec],
        label: &str,
        message: Option<&str>,
    ) -> Vec<String> {
        rules
            .iter()
            .filter(|rule| !self.table.passes(rule, value))
            .map(|rule| match message {
                Some(message) => replace_attribute(message, label),
                None => self.table.message(rule, label),
            })
            .collect()
    }
}
