//! Ownership-based attribute broadcasting.
//!
//! A composite owns its children through a `Broadcaster`, so the dependency
//! graph is a tree by construction: a child cannot register its parent, and
//! no node can be registered twice.

use super::set::{AttributePropagation, AttributeSet};

/// Handle to a registered dependent.
///
/// Only valid for the broadcaster that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DependentKey(usize);

/// Owns dependents and pushes attribute sets to them.
#[derive(Debug, Clone)]
pub struct Broadcaster<T> {
    dependents: Vec<T>,
}

impl<T> Default for Broadcaster<T> {
    fn default() -> Self {
        Self {
            dependents: Vec::new(),
        }
    }
}

impl<T: AttributePropagation> Broadcaster<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a dependent. It receives every later broadcast.
    pub fn register(&mut self, dependent: T) -> DependentKey {
        self.dependents.push(dependent);
        DependentKey(self.dependents.len() - 1)
    }

    /// Get a dependent.
    ///
    /// # Panics
    ///
    /// Panics if `key` was issued by another broadcaster with fewer
    /// dependents.
    pub fn get(&self, key: DependentKey) -> &T {
        &self.dependents[key.0]
    }

    /// Get a dependent mutably.
    ///
    /// # Panics
    ///
    /// Same as [`Broadcaster::get`].
    pub fn get_mut(&mut self, key: DependentKey) -> &mut T {
        &mut self.dependents[key.0]
    }

    /// Push an attribute set to every dependent, in registration order.
    pub fn broadcast(&mut self, attributes: &AttributeSet) {
        for dependent in &mut self.dependents {
            dependent.apply_attributes(attributes);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.dependents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.dependents.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        received: Vec<AttributeSet>,
    }

    impl AttributePropagation for Probe {
        fn attributes(&self) -> AttributeSet {
            AttributeSet::default()
        }

        fn apply_attributes(&mut self, attributes: &AttributeSet) {
            self.received.push(attributes.clone());
        }
    }

    #[test]
    fn test_broadcast_reaches_every_dependent() {
        let mut broadcaster = Broadcaster::new();
        let first = broadcaster.register(Probe::default());
        let second = broadcaster.register(Probe::default());

        let attributes = AttributeSet {
            classes: vec!["wide".to_string()],
            ..Default::default()
        };
        broadcaster.broadcast(&attributes);

        assert_eq!(broadcaster.get(first).received, vec![attributes.clone()]);
        assert_eq!(broadcaster.get(second).received, vec![attributes]);
    }

    #[test]
    fn test_keys_are_positional() {
        let mut broadcaster = Broadcaster::new();
        assert!(broadcaster.is_empty());
        let key = broadcaster.register(Probe::default());
        assert_eq!(key, DependentKey(0));
        assert_eq!(broadcaster.len(), 1);
    }
}
