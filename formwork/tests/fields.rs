//! Tests for field nodes: submission capture, setters and rules.

use formwork::attributes::Disabled;
use formwork::{
    Field, FieldKind, FormContext, RenderError, SelectMode, Submission, SubmittedValue,
    UploadedFile,
};

fn empty() -> FormContext {
    FormContext::new(Submission::new())
}

// =============================================================================
// Submission capture
// =============================================================================

#[test]
fn test_posted_value_is_captured() {
    let cx = FormContext::new(Submission::new().with_value("name", "Jane"));
    let field = cx.text("name", Some("default"));

    assert!(field.is_posted());
    assert_eq!(field.posted(), Some(&SubmittedValue::from("Jane")));
    assert_eq!(field.effective_value(), Some(SubmittedValue::from("Jane")));
}

#[test]
fn test_blank_submission_is_not_posted() {
    let cx = FormContext::new(Submission::new().with_value("name", "   "));
    let field = cx.text("name", Some("default"));

    assert!(!field.is_posted());
    assert_eq!(field.effective_value(), Some(SubmittedValue::from("default")));
}

#[test]
fn test_array_name_reads_bare_key() {
    let cx = FormContext::new(Submission::from_urlencoded("tags[]=a&tags[]=b"));
    let field = cx.checkbox("tags[]", ["a", "b", "c"]);

    assert!(field.is_posted());
    assert_eq!(field.posted(), Some(&SubmittedValue::from(vec!["a", "b"])));
    assert!(field.self_check_errors().is_empty());
}

#[test]
fn test_date_is_zero_padded() {
    let cx = FormContext::new(Submission::new().with_value("day", "1-1-2020"));
    let field = cx.date("day", None);

    assert_eq!(field.posted(), Some(&SubmittedValue::from("01-01-2020")));
}

#[test]
fn test_file_posted_from_registry() {
    let submission = Submission::new()
        .with_file("upload", UploadedFile::new("/tmp/php123").original_name("cv.pdf"))
        .with_file("empty", UploadedFile::new(""));
    let cx = FormContext::new(submission);

    assert!(cx.file("upload").is_posted());
    assert!(!cx.file("empty").is_posted());
    assert!(!cx.file("missing").is_posted());
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_set_selected_respects_submission() {
    let cx = FormContext::new(Submission::new().with_value("name", "Jane"));
    let mut field = cx.text("name", None);

    field.set_selected("John");
    assert_eq!(field.effective_value(), Some(SubmittedValue::from("Jane")));

    field.set_selected_with("John", SelectMode::OverrulePost);
    assert_eq!(field.effective_value(), Some(SubmittedValue::from("John")));
}

#[test]
fn test_set_selected_initially_only() {
    let mut field = empty().text("name", None);
    field.set_selected_with("John", SelectMode::InitiallyOnly);
    assert_eq!(field.selected(), Some(&SubmittedValue::from("John")));

    let cx = FormContext::new(Submission::new().with_value("other", "x"));
    let mut field = cx.text("name", None);
    field.set_selected_with("John", SelectMode::InitiallyOnly);
    assert_eq!(field.selected(), None);
}

// =============================================================================
// Rules
// =============================================================================

#[test]
fn test_required_toggles_class_and_rule() {
    let mut field = empty().email("email", None);

    field.set_required(true);
    assert!(field.is_required());
    assert!(field.has_class("required"));
    assert_eq!(field.validations()[0].name(), "required");

    field.set_required(false);
    assert!(!field.is_required());
    assert!(!field.has_class("required"));
    assert!(!field.has_validations());
}

#[test]
fn test_add_validation_dedupes_by_rule_name() {
    let mut field = empty().text("age", None);
    field.add_validation("min:3|numeric").unwrap();
    field.add_validation("min:5").unwrap();

    let rules: Vec<String> = field.validations().iter().map(ToString::to_string).collect();
    assert_eq!(rules, ["min:3", "numeric"]);
}

#[test]
fn test_remove_validation_ignores_parameters() {
    let mut field = empty().text("age", None);
    field.add_validation("required|between:4,8").unwrap();

    field.remove_validation("between:1,2");

    let rules: Vec<String> = field.validations().iter().map(ToString::to_string).collect();
    assert_eq!(rules, ["required"]);
}

#[test]
fn test_add_then_remove_restores_rules() {
    let mut field = empty().text("age", None);
    field.add_validation("required|numeric").unwrap();
    let before = field.validations().to_vec();

    field.add_validation("max:99").unwrap();
    field.remove_validation("max:99");

    assert_eq!(field.validations(), before.as_slice());
}

#[test]
fn test_replace_validation_swaps_parameters() {
    let mut field = empty().text("age", None);
    field.add_validation("required|max:10").unwrap();
    field.replace_validation("max:99").unwrap();

    let rules: Vec<String> = field.validations().iter().map(ToString::to_string).collect();
    assert_eq!(rules, ["required", "max:99"]);
}

#[test]
fn test_unknown_rule_leaves_rules_untouched() {
    let mut field = empty().text("age", None);
    field.add_validation("required").unwrap();

    assert!(field.add_validation("numeric|no_such_rule").is_err());
    assert_eq!(field.validations().len(), 1);
}

#[test]
fn test_choice_fields_validate_against_their_options() {
    let cx = FormContext::new(Submission::new().with_value("size", "4"));
    let field = cx.dropdown("size", [("1", "S"), ("2", "M"), ("3", "L")]);

    let plan = field.validation_plan();
    assert_eq!(plan.len(), 1);
    let rules = &plan[0].1;
    assert_eq!(rules[0].name(), "all_in");
    assert_eq!(rules[0].params(), ["1", "2", "3"]);
}

// =============================================================================
// Setters and self-checks
// =============================================================================

#[test]
fn test_invalid_width_is_rejected() {
    let mut field = empty().text("name", None);

    field.set_width("wide");
    assert_eq!(field.width(), None);
    assert_eq!(field.rejected_attributes().len(), 1);
    assert_eq!(field.rejected_attributes()[0].attribute, "width");

    field.set_width(120);
    assert_eq!(field.width(), Some("120px"));
}

#[test]
fn test_blank_width_and_size_are_rejected() {
    let mut field = empty().dropdown("size", [("s", "Small")]);
    field.set_width("").set_size(" ");

    assert_eq!(field.width(), None);
    assert_eq!(field.size(), None);
    assert_eq!(field.rejected_attributes().len(), 2);
}

#[test]
fn test_rejected_setter_keeps_previous_value() {
    let mut field = empty().dropdown("size", [("s", "Small")]);
    field.set_size(3);
    field.set_size("three");

    assert_eq!(field.size(), Some("3"));
    assert_eq!(field.rejected_attributes().len(), 1);
}

#[test]
fn test_invalid_class_is_rejected() {
    let mut field = empty().text("name", None);
    field.add_class("ok bad!");

    assert!(field.has_class("ok"));
    assert!(!field.has_class("bad!"));
    assert_eq!(field.rejected_attributes()[0].value, "bad!");
}

#[test]
fn test_classes_are_deduplicated() {
    let mut field = empty().text("name", None);
    field.add_class("a b").add_class("b c");

    assert_eq!(field.classes(), ["a", "b", "c"]);

    field.set_class("d");
    assert_eq!(field.classes(), ["d"]);
}

#[test]
fn test_placeholder_only_on_text_kinds() {
    let mut text = empty().text("name", None);
    text.set_placeholder("Your name");
    assert_eq!(text.placeholder(), Some("Your name"));

    let mut dropdown = empty().dropdown("size", [("s", "Small")]);
    dropdown.set_placeholder("Pick one");
    assert_eq!(dropdown.placeholder(), None);
    assert_eq!(dropdown.rejected_attributes()[0].attribute, "placeholder");
}

#[test]
fn test_style_accepts_strings_and_pairs() {
    let mut field = empty().text("name", None);
    field.add_style("color:red; padding: 2px");
    field.add_style([("margin", "0")]);

    assert_eq!(field.style("padding"), Some("2px"));
    assert_eq!(field.styles().len(), 3);

    field.remove_style("color:blue");
    assert_eq!(field.style("color"), None);

    field.set_style("border:none");
    assert_eq!(field.styles().len(), 1);
}

#[test]
fn test_set_hidden() {
    let mut field = empty().text("name", None);
    field.set_hidden(true);
    assert!(field.is_hidden());
    field.set_hidden(false);
    assert!(!field.is_hidden());

    assert!(empty().hidden("token", Some("abc")).is_hidden());
}

#[test]
fn test_set_id_replaces_brackets() {
    let mut field = empty().text("name", None);
    field.set_id("person[name]");
    assert_eq!(field.id(), "person_name_");

    assert_eq!(empty().text("tags[]", None).id(), "tags__");
}

#[test]
fn test_disabled_state() {
    let mut field = empty().text("name", None);
    field.set_disabled(Disabled::Readonly);
    assert_eq!(field.disabled(), Some(Disabled::Readonly));

    field.remove_disabled();
    assert!(!field.is_disabled());

    assert_eq!("disabled".parse::<Disabled>(), Ok(Disabled::Disabled));
    assert!("grey".parse::<Disabled>().is_err());
}

#[test]
fn test_data_attributes() {
    let mut field = empty().text("name", None);
    field.add_data_attribute("role", "owner");
    field.add_data_attribute("id", "7");
    field.remove_data_attribute("id");
    assert_eq!(field.data_attributes().get("role"), Some("owner"));
    assert_eq!(field.data_attributes().get("id"), None);

    field.set_data_attributes([("tab", "2")]);
    assert_eq!(field.data_attributes().len(), 1);
}

#[test]
fn test_options() {
    let mut field = empty().dropdown("size", [("m", "Medium")]);
    field
        .append_option("l", "Large")
        .prepend_options([("xs", "Tiny"), ("s", "Small")])
        .remove_option("m");

    assert_eq!(field.option_values(), ["xs", "s", "l"]);
    assert_eq!(field.options()[0].label, "Tiny");
}

#[test]
fn test_add_invalidation_dedupes_and_marks_invalid() {
    let mut field = empty().text("name", None);
    assert!(field.is_valid());

    field.add_invalidation("Too short");
    field.add_invalidation("Too short");

    assert_eq!(field.invalidations(), ["Too short"]);
    assert!(field.has_class("invalid"));
    assert!(!field.is_valid());
}

#[test]
fn test_invalid_class_survives_class_changes() {
    let mut field = empty().text("name", None);
    field.add_invalidation("Too short");

    field.set_class("wide");
    assert!(field.has_class("invalid"));
    assert!(field.has_class("wide"));

    field.remove_class("invalid");
    assert!(field.has_class("invalid"));

    field.remove_class("wide");
    assert_eq!(field.classes(), ["invalid"]);
}

#[test]
fn test_valid_field_drops_invalid_class_freely() {
    let mut field = empty().text("name", None);
    field.add_class("invalid");

    field.remove_class("invalid");
    assert!(field.classes().is_empty());
}

// =============================================================================
// Render preconditions
// =============================================================================

#[test]
fn test_invalid_name_blocks_render() {
    let mut field = empty().text("bad name!", None);

    match field.render() {
        Err(RenderError::Precondition { field, kind, errors }) => {
            assert_eq!(field, "bad name!");
            assert_eq!(kind, "text");
            assert!(!errors.is_empty());
        }
        other => panic!("expected precondition error, got {:?}", other),
    }
}

#[test]
fn test_bad_default_date_blocks_render() {
    let mut field = empty().date("start", Some("2020-01-31"));
    assert_eq!(field.kind(), FieldKind::Date);

    let err = field.render().unwrap_err();
    assert!(err.to_string().contains("start"));
    assert!(err.to_string().contains("d-m-Y"));
}

#[test]
fn test_setter_rejection_does_not_block_render() {
    let mut field = empty().text("name", None);
    field.set_width("wide");

    assert!(field.render().is_ok());
}
