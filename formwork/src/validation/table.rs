//! The injectable rule table.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::messages::{DefaultMessages, MessageResolver};
use super::rules::RuleSpec;
use crate::error::ValidationError;
use crate::submission::SubmittedValue;

/// Type alias for rule predicate closures.
type Predicate = dyn Fn(Option<&SubmittedValue>, &[String]) -> bool + Send + Sync;

/// A named predicate over a submitted value and the rule's parameters.
#[derive(Clone)]
pub struct Rule {
    predicate: Arc<Predicate>,
    implicit: bool,
}

impl Rule {
    /// Create a rule that only runs on non-blank values.
    ///
    /// Blank or absent values pass automatically; combine with `required` to
    /// demand a value.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&SubmittedValue, &[String]) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(
                move |value: Option<&SubmittedValue>, params: &[String]| match value {
                    Some(value) => f(value, params),
                    None => true,
                },
            ),
            implicit: false,
        }
    }

    /// Create a rule that also runs on blank or absent values.
    pub fn implicit<F>(f: F) -> Self
    where
        F: Fn(Option<&SubmittedValue>, &[String]) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(f),
            implicit: true,
        }
    }

    /// Check if the rule runs on blank values.
    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    /// Evaluate the rule.
    pub fn evaluate(&self, value: Option<&SubmittedValue>, params: &[String]) -> bool {
        let value = value.filter(|value| !value.is_blank());
        if value.is_none() && !self.implicit {
            return true;
        }
        (self.predicate)(value, params)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("implicit", &self.implicit)
            .finish_non_exhaustive()
    }
}

/// Mapping from rule name to predicate, plus the message resolver.
///
/// Constructed once at startup and shared (`Arc<RuleTable>`) by every
/// validator and field built from the same context.
///
/// # Example
///
/// ```ignore
/// let table = RuleTable::standard()
///     .rule("postcode", |value, _| value.iter().all(is_dutch_postcode));
/// ```
#[derive(Clone)]
pub struct RuleTable {
    rules: HashMap<String, Rule>,
    messages: Arc<dyn MessageResolver>,
}

impl RuleTable {
    /// Create an empty table with the default messages.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
            messages: Arc::new(DefaultMessages),
        }
    }

    /// Add (or replace) a rule that only runs on non-blank values.
    pub fn rule<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&SubmittedValue, &[String]) -> bool + Send + Sync + 'static,
    {
        self.rules.insert(name.into(), Rule::new(f));
        self
    }

    /// Add (or replace) a rule that also runs on blank values.
    pub fn implicit_rule<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Option<&SubmittedValue>, &[String]) -> bool + Send + Sync + 'static,
    {
        self.rules.insert(name.into(), Rule::implicit(f));
        self
    }

    /// Replace the message resolver.
    pub fn messages(mut self, resolver: impl MessageResolver + 'static) -> Self {
        self.messages = Arc::new(resolver);
        self
    }

    /// Check if a rule name is known.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Get a rule by name.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// All known rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Fail with `UnknownRule` if the spec names a rule this table lacks.
    pub fn ensure(&self, spec: &RuleSpec) -> Result<(), ValidationError> {
        if self.contains(spec.name()) {
            Ok(())
        } else {
            Err(ValidationError::UnknownRule {
                rule: spec.to_string(),
            })
        }
    }

    /// Evaluate a rule spec against a value.
    ///
    /// Unknown rules never pass.
    pub fn passes(&self, spec: &RuleSpec, value: Option<&SubmittedValue>) -> bool {
        match self.rules.get(spec.name()) {
            Some(rule) => rule.evaluate(value, spec.params()),
            None => {
                log::error!("Evaluating unknown rule '{}'", spec.name());
                false
            }
        }
    }

    /// Render the failure message of a rule for a field label.
    pub fn message(&self, spec: &RuleSpec, label: &str) -> String {
        self.messages.message(spec.name(), label, spec.params())
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleTable")
            .field("rules", &self.names())
            .finish_non_exhaustive()
    }
}
