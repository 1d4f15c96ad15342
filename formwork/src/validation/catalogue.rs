//! The standard rule catalogue.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use super::table::RuleTable;
use crate::submission::SubmittedValue;

static ALPHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\pL\pM]+$").expect("Invalid regex pattern"));
static ALPHA_NUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\pL\pM\pN]+$").expect("Invalid regex pattern"));
static ALPHA_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\pL\pM\pN_-]+$").expect("Invalid regex pattern"));

/// Formats accepted by the free-form `date` rule.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y"];
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%d-%m-%Y %H:%M"];

impl RuleTable {
    /// The standard catalogue of rules.
    pub fn standard() -> Self {
        Self::new()
            .implicit_rule("required", |value, _| {
                value.is_some_and(|value| !value.is_blank())
            })
            .implicit_rule("not_empty", |value, _| {
                value.is_some_and(|value| !value.is_blank())
            })
            .rule("alpha", |value, _| all(value, |v| ALPHA.is_match(v)))
            .rule("alpha_num", |value, _| all(value, |v| ALPHA_NUM.is_match(v)))
            .rule("alpha_dash", |value, _| all(value, is_alpha_dash))
            .rule("numeric", |value, _| all(value, |v| numeric(v).is_some()))
            .rule("integer", |value, _| all(value, |v| v.trim().parse::<i64>().is_ok()))
            .rule("digits", |value, params| {
                let Some(len) = params.first().and_then(|p| p.trim().parse::<usize>().ok()) else {
                    return false;
                };
                all(value, |v| v.len() == len && v.chars().all(|c| c.is_ascii_digit()))
            })
            .rule("boolean", |value, _| {
                all(value, |v| matches!(v.trim(), "true" | "false" | "1" | "0"))
            })
            .rule("email", |value, _| {
                all(value, |v| email_address::EmailAddress::is_valid(v.trim()))
            })
            .rule("url", |value, _| all(value, |v| url::Url::parse(v.trim()).is_ok()))
            .rule("in", |value, params| all(value, |v| params.iter().any(|p| p == v)))
            .rule("not_in", |value, params| all(value, |v| !params.iter().any(|p| p == v)))
            .rule("all_in", |value, params| all(value, |v| params.iter().any(|p| p == v)))
            .rule("min", |value, params| {
                param_number(params, 0).is_some_and(|min| size_of(value) >= min)
            })
            .rule("max", |value, params| {
                param_number(params, 0).is_some_and(|max| size_of(value) <= max)
            })
            .rule("between", |value, params| {
                match (param_number(params, 0), param_number(params, 1)) {
                    (Some(min), Some(max)) => (min..=max).contains(&size_of(value)),
                    _ => false,
                }
            })
            .rule("size", |value, params| {
                param_number(params, 0).is_some_and(|size| size_of(value) == size)
            })
            .rule("date", |value, _| all(value, is_date))
            .rule("date_format", |value, params| {
                let Some(format) = params.first() else {
                    return false;
                };
                all(value, |v| matches_date_format(v, format))
            })
            .rule("regex", |value, params| {
                let Some(regex) = params.first().and_then(|p| compile_pattern(p)) else {
                    return false;
                };
                all(value, |v| regex.is_match(v))
            })
            .rule("array", |value, _| matches!(value, SubmittedValue::Many(_)))
            .rule("not_array", |value, _| matches!(value, SubmittedValue::Single(_)))
    }
}

/// Check if every item of the value satisfies the predicate.
fn all(value: &SubmittedValue, predicate: impl Fn(&str) -> bool) -> bool {
    value.iter().all(predicate)
}

/// `alpha_dash` as used by field self-checks (names, ids, classes).
pub fn is_alpha_dash(value: &str) -> bool {
    ALPHA_DASH.is_match(value)
}

fn numeric(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn param_number(params: &[String], index: usize) -> Option<f64> {
    params.get(index).and_then(|p| numeric(p))
}

/// Size of a value for `min`/`max`/`between`/`size`.
///
/// Lists are measured by item count, numeric scalars by value, any other
/// scalar by character count.
fn size_of(value: &SubmittedValue) -> f64 {
    match value {
        SubmittedValue::Many(values) => values.len() as f64,
        SubmittedValue::Single(value) => {
            numeric(value).unwrap_or_else(|| value.chars().count() as f64)
        }
    }
}

fn is_date(value: &str) -> bool {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(value, format).is_ok())
        || DATE_TIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
        || DateTime::parse_from_rfc3339(value).is_ok()
}

/// Check a value against a PHP-style date format (`d-m-Y`, `Y-m-d H:i`, ...).
///
/// Leading zeros are optional: `8-2-2013` matches `d-m-Y`.
pub fn matches_date_format(value: &str, format: &str) -> bool {
    let format = chrono_format(format);
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, &format).is_ok()
        || NaiveDate::parse_from_str(value, &format).is_ok()
        || NaiveTime::parse_from_str(value, &format).is_ok()
}

/// Translate PHP date tokens into chrono's strftime syntax.
fn chrono_format(format: &str) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        let token = match c {
            'd' | 'j' => "%d",
            'm' | 'n' => "%m",
            'Y' => "%Y",
            'y' => "%y",
            'H' | 'G' => "%H",
            'h' | 'g' => "%I",
            'i' => "%M",
            's' => "%S",
            'A' | 'a' => "%p",
            'D' => "%a",
            'l' => "%A",
            'M' => "%b",
            'F' => "%B",
            '%' => "%%",
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
                continue;
            }
            other => {
                out.push(other);
                continue;
            }
        };
        out.push_str(token);
    }
    out
}

/// Compile a `/pattern/flags` style regex (delimiters optional).
fn compile_pattern(pattern: &str) -> Option<Regex> {
    let pattern = pattern.trim();
    let (body, flags) = match pattern.strip_prefix('/').and_then(|rest| rest.rsplit_once('/')) {
        Some((body, flags)) => (body, flags),
        None => (pattern, ""),
    };
    let inline: String = flags.chars().filter(|f| matches!(f, 'i' | 'm' | 's' | 'x')).collect();
    let source = if inline.is_empty() {
        body.to_string()
    } else {
        format!("(?{}){}", inline, body)
    };
    Regex::new(&source).ok()
}
