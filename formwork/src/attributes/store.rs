//! Ordered key/value storage for inline style and data attributes.

/// An ordered `key -> value` map.
///
/// Keys keep their first insertion position; putting an existing key replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeStore {
    entries: Vec<(String, String)>,
}

impl AttributeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an inline style string (`"color:red; padding: 8px"`).
    ///
    /// Empty declarations and declarations without a colon are ignored.
    pub fn parse(style: &str) -> Self {
        let mut store = Self::new();
        for declaration in style.split(';') {
            if let Some((key, value)) = declaration.split_once(':') {
                let key = key.trim();
                if !key.is_empty() {
                    store.put(key, value.trim());
                }
            }
        }
        store
    }

    /// Insert or replace a value.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove a key.
    pub fn forget(&mut self, key: &str) {
        self.entries.retain(|(k, _)| k != key);
    }

    /// Get the value of a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check if a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Put every entry of `other`, keeping entries `other` does not mention.
    pub fn merge(&mut self, other: &AttributeStore) {
        for (key, value) in other.iter() {
            self.put(key, value);
        }
    }

    /// A copy without the given key.
    pub fn without(&self, key: &str) -> Self {
        let mut copy = self.clone();
        copy.forget(key);
        copy
    }

    /// Iterate over the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as an inline style declaration list (`"color:red; width:80px;"`).
    pub fn to_inline_style(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let declarations: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect();
        format!("{};", declarations.join("; "))
    }
}

impl From<&str> for AttributeStore {
    fn from(style: &str) -> Self {
        Self::parse(style)
    }
}

impl From<String> for AttributeStore {
    fn from(style: String) -> Self {
        Self::parse(&style)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for AttributeStore {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for AttributeStore {
    fn from(entries: Vec<(K, V)>) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (key, value) in iter {
            store.put(key.into().trim(), value.into().trim());
        }
        store
    }
}
