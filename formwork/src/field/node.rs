//! The field node: identity, presentation attributes, submitted data and
//! validation rules of a single form field.

use std::fmt::Display;
use std::sync::Arc;

use super::date::zero_pad_date;
use super::kind::{FieldKind, SelectMode};
use crate::attributes::{
    AttributePropagation, AttributeSet, AttributeStore, Broadcaster, DependentKey, Disabled,
};
use crate::config::FormConfig;
use crate::context::FormContext;
use crate::error::{InvalidAttributeValue, RenderError, ValidationError};
use crate::submission::{Submission, SubmittedValue};
use crate::validation::{RuleList, RuleSpec, ValidationTarget, Validator, label_for};

/// Input types that support the `placeholder` attribute.
const PLACEHOLDER_TYPES: &str = "in:text,search,url,tel,email,password";

/// One entry of a choice field (dropdown, checkbox group, radio group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A form field.
///
/// Nodes are created through a [`FormContext`], which hands them the
/// submission snapshot, the rule table and the configuration. The submitted
/// value is captured once, at construction.
///
/// Setters return `&mut Self` for chaining. A setter whose value fails its
/// self-check is a no-op; the rejection is logged and kept in
/// [`FieldNode::rejected_attributes`].
///
/// Every attribute mutation is broadcast to the node's dependents (see
/// [`FieldNode::register_dependent`]).
#[derive(Debug, Clone)]
pub struct FieldNode {
    kind: FieldKind,
    name: String,
    id: String,
    label: Option<String>,
    value: Option<String>,
    options: Vec<ChoiceOption>,
    title: Option<String>,
    placeholder: Option<String>,
    classes: Vec<String>,
    style: AttributeStore,
    data_attributes: AttributeStore,
    disabled: Option<Disabled>,
    size: Option<String>,
    max_length: Option<usize>,
    required: bool,
    render_with_label: Option<bool>,
    auto_focus: Option<bool>,
    selected: Option<SubmittedValue>,
    posted: Option<SubmittedValue>,
    submission_empty: bool,
    validations: Vec<RuleSpec>,
    invalidations: Vec<String>,
    checks: Validator,
    check_failures: Vec<String>,
    rejected: Vec<InvalidAttributeValue>,
    dependents: Broadcaster<FieldNode>,
    config: Arc<FormConfig>,
}

impl FieldNode {
    /// Create a node and capture its submitted value.
    ///
    /// The name is checked against `alpha_dash` (array brackets are allowed);
    /// a failing name blocks rendering.
    pub fn new(cx: &FormContext, kind: FieldKind, name: impl Into<String>) -> Self {
        let name = name.into();
        let mut node = Self {
            kind,
            id: id_for(&name),
            name: name.clone(),
            label: None,
            value: None,
            options: Vec::new(),
            title: None,
            placeholder: None,
            classes: Vec::new(),
            style: AttributeStore::new(),
            data_attributes: AttributeStore::new(),
            disabled: None,
            size: None,
            max_length: None,
            required: false,
            render_with_label: None,
            auto_focus: None,
            selected: None,
            posted: None,
            submission_empty: true,
            validations: Vec::new(),
            invalidations: Vec::new(),
            checks: cx.validator(),
            check_failures: Vec::new(),
            rejected: Vec::new(),
            dependents: Broadcaster::new(),
            config: cx.config().clone(),
        };

        let bare = name.replace(['[', ']'], "");
        node.self_check(&bare, "required|alpha_dash");
        node.capture(cx.submission());
        node
    }

    fn capture(&mut self, submission: &Submission) {
        self.submission_empty = submission.is_empty();
        let key = submission_key(&self.name);

        self.posted = match self.kind {
            FieldKind::File => submission
                .file(key)
                .map(|file| file.tmp_path.to_string_lossy().into_owned())
                .filter(|path| !path.is_empty())
                .map(SubmittedValue::Single),
            FieldKind::Date => submission.non_blank(key).map(|value| match value {
                SubmittedValue::Single(date) => SubmittedValue::Single(zero_pad_date(date)),
                other => other.clone(),
            }),
            _ => submission.non_blank(key).cloned(),
        };

        if self.posted.is_some() {
            log::trace!("Captured submitted value for field '{}'", self.name);
        }
        self.selected = self.posted.clone();
    }

    // =========================================================================
    // Self-checks
    // =========================================================================

    /// Validate a construction-time parameter.
    ///
    /// Failures are kept and make `render()` fail with a precondition error.
    pub(crate) fn self_check(&mut self, value: &str, rules: impl Into<RuleList>) -> bool {
        let name = self.name.clone();
        match self.checks.validate(&name, value, rules, None) {
            Ok(valid) => valid,
            Err(err) => {
                log::error!("Self-check on field '{}' failed: {}", name, err);
                self.check_failures.push(err.to_string());
                false
            }
        }
    }

    /// Validate a setter argument without recording it as a precondition.
    fn accepts(&mut self, attribute: &'static str, value: &str, rules: &str) -> bool {
        let reason = match self.checks.check(&self.name, value, rules) {
            Ok(failures) if failures.is_empty() => return true,
            Ok(failures) => failures.join(" "),
            Err(err) => err.to_string(),
        };
        self.reject(attribute, value, reason);
        false
    }

    fn reject(&mut self, attribute: &'static str, value: &str, reason: String) {
        let rejection = InvalidAttributeValue {
            field: self.name.clone(),
            attribute,
            value: value.to_string(),
            reason,
        };
        log::warn!("{}", rejection);
        self.rejected.push(rejection);
    }

    /// Messages of failed construction-time self-checks.
    pub fn self_check_errors(&self) -> Vec<String> {
        self.checks
            .errors()
            .values()
            .flatten()
            .chain(&self.check_failures)
            .cloned()
            .collect()
    }

    /// Setter arguments that were refused.
    pub fn rejected_attributes(&self) -> &[InvalidAttributeValue] {
        &self.rejected
    }

    /// Fail if any construction-time self-check failed.
    pub fn ensure_renderable(&self) -> Result<(), RenderError> {
        let errors = self.self_check_errors();
        if errors.is_empty() {
            return Ok(());
        }
        Err(RenderError::Precondition {
            field: self.name.clone(),
            kind: self.kind.as_str(),
            errors,
        })
    }

    // =========================================================================
    // Identity
    // =========================================================================

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Set the element id. Brackets are replaced by underscores.
    pub fn set_id(&mut self, id: &str) -> &mut Self {
        let id = id_for(id);
        if self.accepts("id", &id, "alpha_dash") {
            self.id = id;
        }
        self
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    // =========================================================================
    // Labels and text
    // =========================================================================

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Set the placeholder text. Only text-like kinds accept one.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) -> &mut Self {
        let placeholder = placeholder.into();
        let input_type = self.kind.input_type();
        if self.accepts("placeholder", input_type, PLACEHOLDER_TYPES) {
            self.placeholder = Some(placeholder);
        }
        self
    }

    pub fn render_with_label(&self) -> bool {
        self.render_with_label.unwrap_or(true)
    }

    /// Toggle rendering of the `<label>` element.
    pub fn set_render_with_label(&mut self, render_with_label: bool) -> &mut Self {
        self.render_with_label = Some(render_with_label);
        self.notify();
        self
    }

    pub fn auto_focus(&self) -> bool {
        self.auto_focus.unwrap_or(false)
    }

    pub fn set_auto_focus(&mut self, auto_focus: bool) -> &mut Self {
        self.auto_focus = Some(auto_focus);
        self
    }

    // =========================================================================
    // Values and options
    // =========================================================================

    /// The default value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = Some(value.into());
        self
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    /// The option values, in display order.
    pub fn option_values(&self) -> Vec<String> {
        self.options.iter().map(|o| o.value.clone()).collect()
    }

    /// Replace the options. Each value doubles as its label.
    pub fn set_values<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = values
            .into_iter()
            .map(|value| {
                let value = value.into();
                ChoiceOption::new(value.clone(), value)
            })
            .collect();
        self
    }

    /// Relabel the options positionally. Extra labels are ignored.
    pub fn set_labels<I, S>(&mut self, labels: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (option, label) in self.options.iter_mut().zip(labels) {
            option.label = label.into();
        }
        self
    }

    pub fn append_option(
        &mut self,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> &mut Self {
        self.options.push(ChoiceOption::new(value, label));
        self
    }

    pub fn append_options<I, V, L>(&mut self, options: I) -> &mut Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        for (value, label) in options {
            self.options.push(ChoiceOption::new(value, label));
        }
        self
    }

    pub fn prepend_option(
        &mut self,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> &mut Self {
        self.options.insert(0, ChoiceOption::new(value, label));
        self
    }

    /// Insert options before the existing ones, keeping their given order.
    pub fn prepend_options<I, V, L>(&mut self, options: I) -> &mut Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        let mut prepended: Vec<ChoiceOption> = options
            .into_iter()
            .map(|(value, label)| ChoiceOption::new(value, label))
            .collect();
        prepended.append(&mut self.options);
        self.options = prepended;
        self
    }

    pub fn remove_option(&mut self, value: &str) -> &mut Self {
        self.options.retain(|option| option.value != value);
        self
    }

    // =========================================================================
    // Submitted data and selection
    // =========================================================================

    /// The value captured from the submission, if any.
    pub fn posted(&self) -> Option<&SubmittedValue> {
        self.posted.as_ref()
    }

    /// Check if the submission carried a usable value for this field.
    ///
    /// File fields count as posted when an upload with a non-empty temporary
    /// path was registered under their name.
    pub fn is_posted(&self) -> bool {
        self.posted.is_some()
    }

    pub fn selected(&self) -> Option<&SubmittedValue> {
        self.selected.as_ref()
    }

    /// The value to render: the submitted value, else the selection, else
    /// the default value.
    pub fn effective_value(&self) -> Option<SubmittedValue> {
        self.selected
            .clone()
            .or_else(|| self.value.clone().map(SubmittedValue::Single))
    }

    /// Select a value unless the field was posted.
    pub fn set_selected(&mut self, value: impl Into<SubmittedValue>) -> &mut Self {
        self.set_selected_with(value, SelectMode::Default)
    }

    /// Select a value, with explicit handling of submitted data.
    pub fn set_selected_with(
        &mut self,
        value: impl Into<SubmittedValue>,
        mode: SelectMode,
    ) -> &mut Self {
        if mode.allows(self.is_posted(), self.submission_empty) {
            self.selected = Some(value.into());
        } else {
            log::debug!("Keeping submitted value of field '{}'", self.name);
        }
        self
    }

    pub(crate) fn force_selected(&mut self, value: SubmittedValue) {
        self.selected = Some(value);
    }

    pub(crate) fn submission_empty(&self) -> bool {
        self.submission_empty
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add one or more whitespace-separated classes.
    pub fn add_class(&mut self, classes: &str) -> &mut Self {
        let classes: Vec<String> = classes.split_whitespace().map(str::to_string).collect();
        self.merge_classes(&classes);
        self.notify();
        self
    }

    /// Replace every class. An invalid field keeps the invalid class.
    pub fn set_class(&mut self, classes: &str) -> &mut Self {
        self.classes.clear();
        self.mark_invalid();
        self.add_class(classes)
    }

    /// Remove a class. The invalid class stays while invalidations exist.
    pub fn remove_class(&mut self, class: &str) -> &mut Self {
        self.classes.retain(|c| c != class);
        self.mark_invalid();
        self.notify();
        self
    }

    fn mark_invalid(&mut self) {
        if self.invalidations.is_empty() {
            return;
        }
        let class = self.config.invalid_class.clone();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    fn merge_classes(&mut self, classes: &[String]) {
        for class in classes {
            if self.has_class(class) {
                continue;
            }
            if self.accepts("class", class, "alpha_dash") {
                self.classes.push(class.clone());
            }
        }
    }

    pub fn styles(&self) -> &AttributeStore {
        &self.style
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        self.style.get(key)
    }

    /// Merge style declarations (`"color:red; padding:2px"` or pairs).
    pub fn add_style(&mut self, style: impl Into<AttributeStore>) -> &mut Self {
        self.style.merge(&style.into());
        self.notify();
        self
    }

    /// Replace every style declaration.
    pub fn set_style(&mut self, style: impl Into<AttributeStore>) -> &mut Self {
        self.style = style.into();
        self.notify();
        self
    }

    /// Remove the given declarations. Only the keys are compared.
    pub fn remove_style(&mut self, style: impl Into<AttributeStore>) -> &mut Self {
        for key in style.into().keys() {
            self.style.forget(key);
        }
        self.notify();
        self
    }

    pub fn width(&self) -> Option<&str> {
        self.style.get("width")
    }

    /// Set the CSS width in pixels. Blank or non-numeric widths are rejected.
    pub fn set_width(&mut self, width: impl Display) -> &mut Self {
        let width = width.to_string();
        if self.accepts("width", &width, "required|numeric") {
            self.add_style([("width", format!("{}px", width.trim()))]);
        }
        self
    }

    /// Hide or show the field through `display:none`.
    pub fn set_hidden(&mut self, hidden: bool) -> &mut Self {
        if hidden {
            self.add_style([("display", "none")])
        } else {
            self.remove_style([("display", "")])
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.kind == FieldKind::Hidden || self.style.get("display") == Some("none")
    }

    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Set the `size` attribute. Blank or non-numeric sizes are rejected.
    pub fn set_size(&mut self, size: impl Display) -> &mut Self {
        let size = size.to_string();
        if self.accepts("size", &size, "required|numeric") {
            self.size = Some(size.trim().to_string());
            self.notify();
        }
        self
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn set_max_length(&mut self, max_length: usize) -> &mut Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn disabled(&self) -> Option<Disabled> {
        self.disabled
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.is_some()
    }

    pub fn set_disabled(&mut self, disabled: Disabled) -> &mut Self {
        self.disabled = Some(disabled);
        self.notify();
        self
    }

    pub fn remove_disabled(&mut self) -> &mut Self {
        self.disabled = None;
        self.notify();
        self
    }

    pub fn data_attributes(&self) -> &AttributeStore {
        &self.data_attributes
    }

    pub fn add_data_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.data_attributes.put(name, value);
        self.notify();
        self
    }

    /// Replace every data attribute.
    pub fn set_data_attributes(&mut self, attributes: impl Into<AttributeStore>) -> &mut Self {
        self.data_attributes = attributes.into();
        self.notify();
        self
    }

    pub fn remove_data_attribute(&mut self, name: &str) -> &mut Self {
        self.data_attributes.forget(name);
        self.notify();
        self
    }

    // =========================================================================
    // Required flag and rules
    // =========================================================================

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Mark the field required.
    ///
    /// Toggles the required class and the `required` rule along with the
    /// flag.
    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        let class = self.config.required_class.clone();
        let rule = RuleSpec::parse("required");
        if required {
            if !self.has_class(&class) {
                self.classes.push(class);
            }
            if !self.validations.iter().any(|r| r.same_rule(&rule)) {
                self.validations.push(rule);
            }
        } else {
            self.classes.retain(|c| *c != class);
            self.validations.retain(|r| !r.same_rule(&rule));
        }
        self.notify();
        self
    }

    /// The field's own rules, deduplicated by rule name.
    pub fn validations(&self) -> &[RuleSpec] {
        &self.validations
    }

    pub fn has_validations(&self) -> bool {
        !self.validations.is_empty()
    }

    /// Add rules. A rule whose name is already present is ignored.
    ///
    /// Fails without changing anything if a rule is not in the rule table.
    pub fn add_validation(
        &mut self,
        rules: impl Into<RuleList>,
    ) -> Result<&mut Self, ValidationError> {
        let rules: RuleList = rules.into();
        let rules = rules.into_vec();
        for rule in &rules {
            self.checks.table().ensure(rule)?;
        }
        for rule in rules {
            if !self.validations.iter().any(|r| r.same_rule(&rule)) {
                self.validations.push(rule);
            }
        }
        Ok(self)
    }

    /// Remove rules by name. Parameters are ignored.
    pub fn remove_validation(&mut self, rules: impl Into<RuleList>) -> &mut Self {
        let rules: RuleList = rules.into();
        for rule in rules {
            self.validations.retain(|r| !r.same_rule(&rule));
        }
        self
    }

    /// Replace rules of the same name with new parameters.
    pub fn replace_validation(
        &mut self,
        rules: impl Into<RuleList>,
    ) -> Result<&mut Self, ValidationError> {
        let rules: RuleList = rules.into();
        for rule in rules.iter() {
            self.checks.table().ensure(rule)?;
        }
        self.remove_validation(rules.clone());
        self.add_validation(rules)
    }

    /// Rules applied by the validation pass: the implicit date-format rule,
    /// the option allow-list, then the field's own rules.
    pub fn implicit_and_own_rules(&self) -> Vec<RuleSpec> {
        let mut rules = Vec::new();
        if self.kind == FieldKind::Date {
            rules.push(self.config.date_rule());
        }
        if self.kind.is_choice() && !self.options.is_empty() {
            rules.push(RuleSpec::new("all_in", self.option_values()));
        }
        rules.extend(self.validations.iter().cloned());
        rules
    }

    // =========================================================================
    // Invalidations
    // =========================================================================

    pub fn invalidations(&self) -> &[String] {
        &self.invalidations
    }

    /// Check if the field carries no invalidations.
    pub fn is_valid(&self) -> bool {
        self.invalidations.is_empty()
    }

    /// Attach a validation failure and add the invalid class.
    ///
    /// Repeated messages are kept once.
    pub fn add_invalidation(&mut self, message: impl Into<String>) -> &mut Self {
        let message = message.into();
        if !self.invalidations.contains(&message) {
            self.invalidations.push(message);
        }
        self.mark_invalid();
        self.notify();
        self
    }

    // =========================================================================
    // Dependents
    // =========================================================================

    /// Take ownership of a child node. It receives every later attribute
    /// broadcast of this node.
    pub fn register_dependent(&mut self, dependent: FieldNode) -> DependentKey {
        self.dependents.register(dependent)
    }

    pub fn dependent(&self, key: DependentKey) -> &FieldNode {
        self.dependents.get(key)
    }

    pub fn dependent_mut(&mut self, key: DependentKey) -> &mut FieldNode {
        self.dependents.get_mut(key)
    }

    pub fn dependents(&self) -> impl Iterator<Item = &FieldNode> {
        self.dependents.iter()
    }

    /// Broadcast the current attributes to every dependent.
    pub fn notify(&mut self) {
        if self.dependents.is_empty() {
            return;
        }
        let attributes = self.attributes();
        log::trace!(
            "Broadcasting attributes of '{}' to {} dependents",
            self.name,
            self.dependents.len()
        );
        self.dependents.broadcast(&attributes);
    }

    /// Presentation attributes copied to children at render time.
    ///
    /// Includes width, title, autofocus and the label toggle; never the
    /// required flag. Scalars this node never set are left out.
    pub fn shared_attributes(&self) -> AttributeSet {
        AttributeSet {
            classes: self.classes.clone(),
            style: self.style.clone(),
            data_attributes: self.data_attributes.clone(),
            disabled: self.disabled,
            size: self.size.clone(),
            required: None,
            title: self.title.clone(),
            auto_focus: self.auto_focus,
            render_with_label: self.render_with_label,
        }
    }

    /// Merge attributes copied down from the owning composite.
    ///
    /// Unlike a broadcast, a scalar missing from the set keeps this node's
    /// own value.
    pub fn inherit_attributes(&mut self, attributes: &AttributeSet) {
        if let Some(disabled) = attributes.disabled {
            self.disabled = Some(disabled);
        }
        if let Some(size) = &attributes.size {
            self.size = Some(size.clone());
        }
        self.merge_attributes(attributes);
    }

    fn merge_attributes(&mut self, attributes: &AttributeSet) {
        self.merge_classes(&attributes.classes);
        self.style.merge(&attributes.style);
        self.data_attributes.merge(&attributes.data_attributes);
        if let Some(required) = attributes.required {
            self.required = required;
        }
        if let Some(title) = &attributes.title {
            self.title = Some(title.clone());
        }
        if attributes.auto_focus.is_some() {
            self.auto_focus = attributes.auto_focus;
        }
        if attributes.render_with_label.is_some() {
            self.render_with_label = attributes.render_with_label;
        }
        self.notify();
    }
}

impl AttributePropagation for FieldNode {
    fn attributes(&self) -> AttributeSet {
        AttributeSet {
            classes: self.classes.clone(),
            style: self.style.without("width"),
            data_attributes: self.data_attributes.clone(),
            disabled: self.disabled,
            size: self.size.clone(),
            required: Some(self.required),
            title: None,
            auto_focus: None,
            render_with_label: None,
        }
    }

    fn apply_attributes(&mut self, attributes: &AttributeSet) {
        self.disabled = attributes.disabled;
        self.size = attributes.size.clone();
        self.merge_attributes(attributes);
    }
}

impl From<&FieldNode> for ValidationTarget {
    fn from(node: &FieldNode) -> Self {
        let label = node
            .label
            .clone()
            .unwrap_or_else(|| label_for(submission_key(&node.name)));
        ValidationTarget::new(submission_key(&node.name))
            .label(label)
            .data(node.posted.clone())
    }
}

/// The key a field's data is submitted under (`tags[]` posts as `tags`).
pub(crate) fn submission_key(name: &str) -> &str {
    name.strip_suffix("[]").unwrap_or(name)
}

/// Derive an element id from a name (`a[b]` becomes `a_b_`).
fn id_for(name: &str) -> String {
    name.replace(['[', ']'], "_")
}
