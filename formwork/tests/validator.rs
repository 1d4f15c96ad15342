//! Tests for the validation engine.

use std::sync::Arc;

use formwork::validation::{RuleTable, ValidationTarget, Validator};
use formwork::{FormContext, Submission, SubmittedValue, ValidationError};

fn validator() -> Validator {
    Validator::new(Arc::new(RuleTable::standard()))
}

fn rule_strings(validator: &Validator) -> Vec<String> {
    validator.pending()[0]
        .rules()
        .iter()
        .map(ToString::to_string)
        .collect()
}

// =============================================================================
// add_validation
// =============================================================================

#[test]
fn test_add_validation_records_entry() {
    let cx = FormContext::new(Submission::new());
    let input = cx.text("text", Some("value"));
    let mut validator = cx.validator();

    validator
        .add_validation(&input, "required|min:5", Some("This is a message"))
        .unwrap();

    assert_eq!(validator.pending().len(), 1);
    let entry = &validator.pending()[0];
    assert_eq!(entry.name(), "text");
    assert_eq!(entry.data(), None);
    assert_eq!(entry.message(), Some("This is a message"));
    assert_eq!(rule_strings(&validator), ["required", "min:5"]);
}

#[test]
fn test_add_validation_merges_rules_for_same_field() {
    let cx = FormContext::new(Submission::new());
    let input = cx.text("text", Some("value"));
    let mut validator = cx.validator();

    validator
        .add_validation(&input, "required|min:5", Some("This is a message"))
        .unwrap();
    validator
        .add_validation(&input, vec!["alpha_dash", "between:4,8", "required"], None)
        .unwrap();

    assert_eq!(validator.pending().len(), 1);
    assert_eq!(
        rule_strings(&validator),
        ["required", "min:5", "alpha_dash", "between:4,8"]
    );
    assert_eq!(validator.pending()[0].message(), Some("This is a message"));
}

#[test]
fn test_merge_keeps_first_seen_parameters() {
    let mut validator = validator();
    validator.add_validation("age", "between:4,8", None).unwrap();
    validator.add_validation("age", "between:1,2", None).unwrap();

    assert_eq!(rule_strings(&validator), ["between:4,8"]);
}

#[test]
fn test_merge_never_drops_captured_data() {
    let mut validator = validator();
    let target = ValidationTarget::new("age").data(Some(SubmittedValue::from("12")));
    validator.add_validation(target, "numeric", None).unwrap();
    validator.add_validation("age", "min:18", None).unwrap();

    let entry = &validator.pending()[0];
    assert_eq!(entry.data(), Some(&SubmittedValue::from("12")));
    assert!(!validator.passes());
}

#[test]
fn test_add_rule_wraps_scalar_parameters() {
    let mut validator = validator();
    validator.add_rule("age", "min", 18, None).unwrap();
    validator.add_rule("age", "in", "18,21", None).unwrap();
    validator.add_rule("age", "min", 21, None).unwrap();

    assert_eq!(rule_strings(&validator), ["min:18", "in:\"18,21\""]);
    assert_eq!(validator.pending()[0].rules()[1].params(), ["18,21"]);
    assert!(validator.add_rule("age", "no_such_rule", (), None).is_err());
}

#[test]
fn test_unknown_rule_is_rejected() {
    let mut validator = validator();
    let err = validator
        .add_validation("text", "required|invalid_rule", None)
        .unwrap_err();

    assert_eq!(
        err,
        ValidationError::UnknownRule {
            rule: "invalid_rule".to_string()
        }
    );
    assert_eq!(err.to_string(), "Invalid rule \"invalid_rule\" specified.");
    assert!(validator.pending().is_empty());
}

// =============================================================================
// validate / check
// =============================================================================

#[test]
fn test_validate_accumulates_errors() {
    let mut validator = validator();

    let result = validator
        .validate("test", "this is not numeric", "numeric|email", None)
        .unwrap();
    assert!(!result);

    let result = validator
        .validate("test", "test@domain.com", "email", None)
        .unwrap();
    assert!(result);

    let errors = validator.attribute_errors("test");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], "The test must be a number.");
    assert_eq!(errors[1], "The test must be a valid email address.");
}

#[test]
fn test_validate_errors_survive_passes() {
    let mut validator = validator();
    validator.validate("test", "abc", "numeric", None).unwrap();

    assert!(!validator.passes());
    assert_eq!(validator.attribute_errors("test").len(), 1);
}

#[test]
fn test_check_records_nothing() {
    let validator = validator();
    let failures = validator.check("width", "wide", "numeric").unwrap();

    assert_eq!(failures, ["The width must be a number."]);
    assert!(!validator.has_errors());
}

#[test]
fn test_date_format_ignores_leading_zeros() {
    let mut validator = validator();
    assert!(validator.validate("test", "28-02-2013", "date_format:d-m-Y", None).unwrap());
    assert!(validator.validate("test", "8-2-2013", "date_format:d-m-Y", None).unwrap());
    assert!(!validator.validate("test", "2013-02-28", "date_format:d-m-Y", None).unwrap());
}

#[test]
fn test_quoted_parameters_may_contain_commas() {
    let mut validator = validator();
    let rule = r#"in:"TAB", ";", ",""#;

    assert!(validator.validate("test", ",", rule, None).unwrap());
    assert!(validator.validate("test", ";", rule, None).unwrap());
    assert!(!validator.validate("test", "|", rule, None).unwrap());
}

#[test]
fn test_pipe_parameter_requires_list_form() {
    let mut validator = validator();
    let rules = vec![r#"in:"TAB", "|", ",""#];

    assert!(validator.validate("test", "|", rules, None).unwrap());
}

// =============================================================================
// passes / errors
// =============================================================================

#[test]
fn test_passes() {
    let cx = FormContext::new(Submission::new().with_value("text", "value"));
    let input = cx.text("text", None);
    let mut validator = cx.validator();

    validator
        .add_validation(&input, "required|min:5|between:4,8", Some("This is a message"))
        .unwrap();
    assert!(validator.passes());
    assert!(validator.errors().is_empty());

    validator.add_validation(&input, "numeric|date", None).unwrap();
    assert!(!validator.passes());
    assert_eq!(validator.errors()["text"].len(), 2);
}

#[test]
fn test_passes_is_idempotent() {
    let mut validator = validator();
    validator
        .add_validation(
            ValidationTarget::new("code").data(Some("12345".into())),
            "digits:4|max:10",
            None,
        )
        .unwrap();

    assert!(!validator.passes());
    let first = validator.errors().clone();
    assert!(!validator.passes());
    assert_eq!(validator.errors(), &first);
}

#[test]
fn test_messages_use_label_derived_from_name() {
    let cx = FormContext::new(Submission::new());
    let input = cx.text("my_name", None);
    let mut validator = cx.validator();

    validator.add_validation(&input, "required", None).unwrap();
    validator.passes();

    let errors = validator.errors();
    assert!(errors.contains_key("my_name"));
    assert_eq!(errors["my_name"][0], "The my name field is required.");
}

#[test]
fn test_custom_message_replaces_template() {
    let cx = FormContext::new(Submission::new());
    let input = cx.text("my_name", None);
    let mut validator = cx.validator();

    validator
        .add_validation(&input, "required", Some(":attribute is required."))
        .unwrap();
    validator.passes();

    assert_eq!(validator.errors()["my_name"][0], "my name is required.");
}

#[test]
fn test_field_label_overrides_derived_label() {
    let cx = FormContext::new(Submission::new());
    let mut input = cx.text("email", None);
    input.set_label("E-mail address");
    let mut validator = cx.validator();

    validator.add_validation(&input, "required", None).unwrap();
    validator.passes();

    assert_eq!(
        validator.attribute_errors("email"),
        ["The E-mail address field is required."]
    );
}

#[test]
fn test_blank_data_passes_non_implicit_rules() {
    let mut validator = validator();
    validator.add_validation("age", "numeric|min:18", None).unwrap();
    assert!(validator.passes());

    validator.add_validation("age", "required", None).unwrap();
    assert!(!validator.passes());
}

#[test]
fn test_all_in_accepts_lists_and_scalars() {
    let submission = Submission::new()
        .with_value("test1", vec!["one", "two", "three"])
        .with_value("test2", "two")
        .with_value("test3", vec!["one", "two", "FAIL"]);
    let cx = FormContext::new(submission);
    let mut validator = cx.validator();

    let test1 = cx.checkbox("test1", ["one", "two", "three"]);
    validator
        .add_validation(&test1, "required|all_in:one,two,three", None)
        .unwrap();
    assert!(validator.passes());

    let test2 = cx.checkbox("test2", ["one", "two", "three"]);
    validator
        .add_validation(&test2, "all_in:one,two,three", None)
        .unwrap();
    assert!(validator.passes());

    let test3 = cx.checkbox("test3", ["one", "two", "three"]);
    validator
        .add_validation(&test3, "all_in:one,two,three", None)
        .unwrap();
    assert!(!validator.passes());
    assert_eq!(validator.errors().len(), 1);
    assert!(validator.errors().contains_key("test3"));
}

#[test]
fn test_size_semantics() {
    let mut validator = validator();
    assert!(validator.validate("n", "12", "min:10", None).unwrap());
    assert!(validator.validate("s", "abc", "size:3", None).unwrap());
    assert!(
        validator
            .validate("l", vec!["a", "b"], "between:1,2", None)
            .unwrap()
    );
    assert!(!validator.validate("l", vec!["a", "b", "c"], "max:2", None).unwrap());
}

// =============================================================================
// attribute_errors fallback and reset
// =============================================================================

#[test]
fn test_attribute_errors_fall_back_to_range_children() {
    let mut validator = validator();
    validator.validate("r-from", "x", "numeric", None).unwrap();
    validator.validate("r-to", "y", "email", None).unwrap();

    assert_eq!(validator.attribute_errors("r"), ["The r from must be a number."]);
}

#[test]
fn test_attribute_errors_use_to_when_from_is_clean() {
    let mut validator = validator();
    validator.validate("r-to", "y", "email", None).unwrap();

    assert_eq!(
        validator.attribute_errors("r"),
        ["The r to must be a valid email address."]
    );
    assert!(validator.attribute_errors("other").is_empty());
}

#[test]
fn test_reset_clears_everything() {
    let mut validator = validator();
    validator.validate("a", "x", "numeric", None).unwrap();
    validator.add_validation("b", "required", None).unwrap();
    validator.passes();

    validator.reset();

    assert!(validator.pending().is_empty());
    assert!(!validator.has_errors());
    assert!(validator.passes());
}

#[test]
fn test_custom_rule_table() {
    let table = RuleTable::standard().rule("postcode", |value, _| {
        value.iter().all(|v| v.len() == 6 && v[..4].chars().all(|c| c.is_ascii_digit()))
    });
    let mut validator = Validator::new(Arc::new(table));

    assert!(validator.validate("pc", "1234AB", "postcode", None).unwrap());
    assert!(!validator.validate("pc", "AB1234", "postcode", None).unwrap());
    assert_eq!(
        validator.attribute_errors("pc"),
        ["The pc field is invalid."]
    );
}
