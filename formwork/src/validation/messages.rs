//! Human-readable validation messages.

/// Resolves the message shown when a rule fails.
///
/// The rule table owns one resolver; swap it out to translate messages or to
/// phrase them differently.
pub trait MessageResolver: Send + Sync {
    /// Render the message for `rule` failing on the field labelled `label`.
    fn message(&self, rule: &str, label: &str, params: &[String]) -> String;
}

/// English message templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl DefaultMessages {
    fn template(rule: &str) -> &'static str {
        match rule {
            "required" => "The :attribute field is required.",
            "not_empty" => "The :attribute field must not be empty.",
            "alpha" => "The :attribute may only contain letters.",
            "alpha_num" => "The :attribute may only contain letters and numbers.",
            "alpha_dash" => "The :attribute may only contain letters, numbers, and dashes.",
            "numeric" => "The :attribute must be a number.",
            "integer" => "The :attribute must be an integer.",
            "digits" => "The :attribute must be :digits digits.",
            "boolean" => "The :attribute field must be true or false.",
            "email" => "The :attribute must be a valid email address.",
            "url" | "regex" => "The :attribute format is invalid.",
            "in" | "not_in" => "The selected :attribute is invalid.",
            "all_in" => "One or more selected :attribute values are invalid.",
            "min" => "The :attribute must be at least :min.",
            "max" => "The :attribute may not be greater than :max.",
            "between" => "The :attribute must be between :min and :max.",
            "size" => "The :attribute must be :size.",
            "date" => "The :attribute is not a valid date.",
            "date_format" => "The :attribute does not match the format :format.",
            "array" => "The :attribute must be an array.",
            "not_array" => "The :attribute must not be an array.",
            _ => "The :attribute field is invalid.",
        }
    }
}

impl MessageResolver for DefaultMessages {
    fn message(&self, rule: &str, label: &str, params: &[String]) -> String {
        let param = |i: usize| param_at(params, i);

        let mut message = Self::template(rule).to_string();
        match rule {
            "min" => message = message.replace(":min", param(0)),
            "max" => message = message.replace(":max", param(0)),
            "between" => {
                message = message.replace(":min", param(0)).replace(":max", param(1));
            }
            "size" => message = message.replace(":size", param(0)),
            "digits" => message = message.replace(":digits", param(0)),
            "date_format" => message = message.replace(":format", param(0)),
            _ => {}
        }
        replace_attribute(&message, label)
    }
}

fn param_at(params: &[String], i: usize) -> &str {
    params.get(i).map(String::as_str).unwrap_or_default()
}

/// Substitute `:attribute` in a message template.
pub fn replace_attribute(template: &str, label: &str) -> String {
    template.replace(":attribute", label)
}

/// Derive a human label from a field name (`my_name` becomes `my name`).
pub fn label_for(name: &str) -> String {
    name.replace(['_', '-'], " ")
}
