//! Immutable snapshot of submitted form data.
//!
//! A `Submission` replaces any ambient "current request" state: it is built
//! once per request and handed to every field at construction time and to the
//! validation pass. Fields read it exactly once, when they are created.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single submitted entry: one string or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmittedValue {
    /// Scalar value (text inputs, radio buttons, single selects).
    Single(String),
    /// Ordered values (checkbox groups, multi selects, `name[]` keys).
    Many(Vec<String>),
}

impl SubmittedValue {
    /// Check if the value carries no usable data.
    ///
    /// A whitespace-only scalar or an empty list is blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Single(value) => value.trim().is_empty(),
            Self::Many(values) => values.is_empty(),
        }
    }

    /// Get the scalar value, if this is one.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Many(_) => None,
        }
    }

    /// Iterate over the contained values (one item for a scalar).
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        };
        items.iter().map(String::as_str)
    }

    /// Number of contained values.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(values) => values.len(),
        }
    }

    /// Check if the value has no items.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Many(values) if values.is_empty())
    }
}

impl From<&str> for SubmittedValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for SubmittedValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for SubmittedValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for SubmittedValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// An uploaded file as handed over by the request layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Temporary storage location of the upload.
    pub tmp_path: PathBuf,
    /// File name reported by the client.
    #[serde(default)]
    pub original_name: String,
}

impl UploadedFile {
    /// Create an upload record for a temporary path.
    pub fn new(tmp_path: impl Into<PathBuf>) -> Self {
        Self {
            tmp_path: tmp_path.into(),
            original_name: String::new(),
        }
    }

    /// Set the client-side file name.
    pub fn original_name(mut self, name: impl Into<String>) -> Self {
        self.original_name = name.into();
        self
    }
}

/// Read-only view of everything a client submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    values: HashMap<String, SubmittedValue>,
    #[serde(default)]
    files: HashMap<String, UploadedFile>,
}

impl Submission {
    /// Create an empty submission (a plain page view, nothing posted).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` body.
    ///
    /// Keys ending in `[]` are collected into a list under the bare key.
    pub fn from_urlencoded(body: &str) -> Self {
        Self::from_pairs(
            url::form_urlencoded::parse(body.as_bytes())
                .map(|(key, value)| (key.into_owned(), value.into_owned())),
        )
    }

    /// Build a submission from raw key/value pairs.
    ///
    /// A key ending in `[]` appends to a list under the bare key; any other
    /// repeated key keeps the last value.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut values: HashMap<String, SubmittedValue> = HashMap::new();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            match key.strip_suffix("[]") {
                Some(bare) => match values.get_mut(bare) {
                    Some(SubmittedValue::Many(items)) => items.push(value),
                    _ => {
                        values.insert(bare.to_string(), SubmittedValue::Many(vec![value]));
                    }
                },
                None => {
                    values.insert(key, SubmittedValue::Single(value));
                }
            }
        }
        Self {
            values,
            files: HashMap::new(),
        }
    }

    /// Add a submitted value.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<SubmittedValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Add an uploaded file.
    pub fn with_file(mut self, name: impl Into<String>, file: UploadedFile) -> Self {
        self.files.insert(name.into(), file);
        self
    }

    /// Look up the raw value submitted for `name`.
    pub fn get(&self, name: &str) -> Option<&SubmittedValue> {
        self.values.get(name)
    }

    /// Look up the value submitted for `name`, ignoring blank entries.
    pub fn non_blank(&self, name: &str) -> Option<&SubmittedValue> {
        self.values.get(name).filter(|value| !value.is_blank())
    }

    /// Look up an uploaded file by field name.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }

    /// Check if nothing at all was submitted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.files.is_empty()
    }
}
