//! Rule specs: a rule name plus its ordered parameters.
//!
//! Rules are written textually as `name:param1,param2` and several rules can
//! be joined with `|` (`"required|between:4,8"`). Parameters containing a
//! comma, pipe or colon can be quoted (`in:"TAB", ";", ","`), but a pipe can
//! only be used when rules are passed as a list instead of a pipe-joined
//! string.

use std::fmt;

/// Rules whose parameter is taken verbatim instead of being split on commas.
const UNSPLIT_PARAMETER_RULES: &[&str] = &["regex"];

/// A single rule with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    name: String,
    params: Vec<String>,
}

impl RuleSpec {
    /// Create a rule spec from a name and parameters.
    pub fn new(name: impl Into<String>, params: impl Into<Params>) -> Self {
        Self {
            name: name.into(),
            params: params.into().0,
        }
    }

    /// Parse a textual rule spec (`name` or `name:p1,p2`).
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        match spec.split_once(':') {
            Some((name, params)) => {
                let name = name.trim();
                let params = if UNSPLIT_PARAMETER_RULES.contains(&name) {
                    vec![params.to_string()]
                } else {
                    split_params(params)
                };
                Self {
                    name: name.to_string(),
                    params,
                }
            }
            None => Self {
                name: spec.to_string(),
                params: Vec::new(),
            },
        }
    }

    /// The rule name, without parameters.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule parameters.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Check if two specs name the same rule, regardless of parameters.
    pub fn same_rule(&self, other: &RuleSpec) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.params.is_empty() {
            return Ok(());
        }
        f.write_str(":")?;
        if UNSPLIT_PARAMETER_RULES.contains(&self.name.as_str()) {
            return f.write_str(&self.params.join(","));
        }
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if param.contains([',', '|', ':']) || param.trim() != param {
                write!(f, "\"{}\"", param)?;
            } else {
                f.write_str(param)?;
            }
        }
        Ok(())
    }
}

impl From<&str> for RuleSpec {
    fn from(spec: &str) -> Self {
        Self::parse(spec)
    }
}

/// The rule name of a textual rule spec: everything before the first `:`.
///
/// `"between:4,8"` and `"between:1,2"` share the rule name `between`.
pub fn rule_name(spec: &str) -> &str {
    match spec.find(':') {
        Some(pos) => spec[..pos].trim(),
        None => spec.trim(),
    }
}

/// Split a parameter string on commas that are not inside double quotes.
fn split_params(params: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in params.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                current.push(c);
            }
            ',' if !quoted => {
                out.push(unquote(&current));
                current.clear();
            }
            _ => current.push(c),
        }
    }
    out.push(unquote(&current));
    out
}

fn unquote(param: &str) -> String {
    let trimmed = param.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}

/// A normalized list of rule specs.
///
/// Built from a pipe-delimited string, an explicit list of textual specs, or
/// already-structured `RuleSpec`s. Only the pipe-delimited string form is
/// split on `|`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleList(Vec<RuleSpec>);

impl RuleList {
    /// Parse a pipe-delimited rule string.
    pub fn parse(rules: &str) -> Self {
        Self(
            rules
                .split('|')
                .filter(|rule| !rule.trim().is_empty())
                .map(RuleSpec::parse)
                .collect(),
        )
    }

    /// Iterate over the specs.
    pub fn iter(&self) -> std::slice::Iter<'_, RuleSpec> {
        self.0.iter()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the specs out of the list.
    pub fn into_vec(self) -> Vec<RuleSpec> {
        self.0
    }
}

impl IntoIterator for RuleList {
    type Item = RuleSpec;
    type IntoIter = std::vec::IntoIter<RuleSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<&str> for RuleList {
    fn from(rules: &str) -> Self {
        Self::parse(rules)
    }
}

impl From<String> for RuleList {
    fn from(rules: String) -> Self {
        Self::parse(&rules)
    }
}

impl From<&String> for RuleList {
    fn from(rules: &String) -> Self {
        Self::parse(rules)
    }
}

impl From<Vec<&str>> for RuleList {
    fn from(rules: Vec<&str>) -> Self {
        Self(rules.into_iter().map(RuleSpec::parse).collect())
    }
}

impl From<Vec<String>> for RuleList {
    fn from(rules: Vec<String>) -> Self {
        Self(rules.iter().map(|rule| RuleSpec::parse(rule)).collect())
    }
}

impl From<&[String]> for RuleList {
    fn from(rules: &[String]) -> Self {
        Self(rules.iter().map(|rule| RuleSpec::parse(rule)).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RuleList {
    fn from(rules: [&str; N]) -> Self {
        Self(rules.into_iter().map(RuleSpec::parse).collect())
    }
}

impl From<RuleSpec> for RuleList {
    fn from(rule: RuleSpec) -> Self {
        Self(vec![rule])
    }
}

impl From<Vec<RuleSpec>> for RuleList {
    fn from(rules: Vec<RuleSpec>) -> Self {
        Self(rules)
    }
}

impl From<&[RuleSpec]> for RuleList {
    fn from(rules: &[RuleSpec]) -> Self {
        Self(rules.to_vec())
    }
}

/// Rule parameters.
///
/// A single scalar is accepted wherever a list is expected and wrapped into a
/// one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(pub Vec<String>);

impl From<()> for Params {
    fn from(_: ()) -> Self {
        Self(Vec::new())
    }
}

impl From<&str> for Params {
    fn from(param: &str) -> Self {
        Self(vec![param.to_string()])
    }
}

impl From<String> for Params {
    fn from(param: String) -> Self {
        Self(vec![param])
    }
}

impl From<Vec<String>> for Params {
    fn from(params: Vec<String>) -> Self {
        Self(params)
    }
}

impl From<Vec<&str>> for Params {
    fn from(params: Vec<&str>) -> Self {
        Self(params.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Params {
    fn from(params: &[&str]) -> Self {
        Self(params.iter().map(|p| p.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Params {
    fn from(params: [&str; N]) -> Self {
        Self(params.into_iter().map(str::to_string).collect())
    }
}

macro_rules! numeric_params {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Params {
                fn from(param: $ty) -> Self {
                    Self(vec![param.to_string()])
                }
            }

            impl<const N: usize> From<[$ty; N]> for Params {
                fn from(params: [$ty; N]) -> Self {
                    Self(params.iter().map(|p| p.to_string()).collect())
                }
            }
        )*
    };
}

numeric_params!(i32, i64, u32, u64, usize, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_rule() {
        let spec = RuleSpec::parse("required");
        assert_eq!(spec.name(), "required");
        assert!(spec.params().is_empty());
    }

    #[test]
    fn test_parse_rule_with_params() {
        let spec = RuleSpec::parse("between:4,8");
        assert_eq!(spec.name(), "between");
        assert_eq!(spec.params(), ["4", "8"]);
        assert_eq!(spec.to_string(), "between:4,8");
    }

    #[test]
    fn test_parse_quoted_params() {
        let spec = RuleSpec::parse(r#"in:"TAB", ";", ",""#);
        assert_eq!(spec.params(), ["TAB", ";", ","]);
    }

    #[test]
    fn test_regex_param_is_not_split() {
        let spec = RuleSpec::parse("regex:/^[a,b]+$/");
        assert_eq!(spec.params(), ["/^[a,b]+$/"]);
    }

    #[test]
    fn test_rule_name_strips_params() {
        assert_eq!(rule_name("between:4,8"), "between");
        assert_eq!(rule_name("required"), "required");
    }

    #[test]
    fn test_pipe_string_is_split_but_list_is_not() {
        let piped = RuleList::from("required|min:5");
        assert_eq!(piped.iter().count(), 2);

        let listed = RuleList::from(vec![r#"in:"TAB", "|", ",""#]);
        let specs = listed.into_vec();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].params(), ["TAB", "|", ","]);
    }

    #[test]
    fn test_scalar_params_are_wrapped() {
        assert_eq!(Params::from(5).0, vec!["5".to_string()]);
        assert_eq!(Params::from("x").0, vec!["x".to_string()]);
        assert_eq!(Params::from([20, 30]).0, vec!["20".to_string(), "30".to_string()]);
    }
}
