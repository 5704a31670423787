//! Per-leaf render registry used to skip redundant resolution.

use crate::model::leaf::LeafId;
use std::collections::HashMap;

/// Last rendered file path per leaf.
#[derive(Debug, Default)]
pub struct LeafRegistry {
    rendered: HashMap<LeafId, String>,
}

impl LeafRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` only when `leaf_id` was last recorded with `path`.
    pub fn should_process(&self, leaf_id: &LeafId, path: &str) -> bool {
        self.rendered.get(leaf_id).map(String::as_str) != Some(path)
    }

    /// Records `path` as rendered for `leaf_id`, replacing any prior path.
    pub fn record(&mut self, leaf_id: LeafId, path: impl Into<String>) {
        self.rendered.insert(leaf_id, path.into());
    }

    /// Drops the record of a closed leaf.
    pub fn forget(&mut self, leaf_id: &LeafId) -> bool {
        self.rendered.remove(leaf_id).is_some()
    }

    pub fn clear(&mut self) {
        self.rendered.clear();
    }

    pub fn last_rendered(&self, leaf_id: &LeafId) -> Option<&str> {
        self.rendered.get(leaf_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::LeafRegistry;
    use crate::model::leaf::LeafId;

    #[test]
    fn record_then_same_path_is_skipped() {
        let mut registry = LeafRegistry::new();
        let leaf = LeafId::new("leaf-1");
        assert!(registry.should_process(&leaf, "Daily/2024-06-15.md"));
        registry.record(leaf.clone(), "Daily/2024-06-15.md");
        assert!(!registry.should_process(&leaf, "Daily/2024-06-15.md"));
    }

    #[test]
    fn changed_path_or_other_leaf_is_processed() {
        let mut registry = LeafRegistry::new();
        let leaf = LeafId::new("leaf-1");
        registry.record(leaf.clone(), "Daily/2024-06-15.md");
        assert!(registry.should_process(&leaf, "Daily/2024-06-16.md"));
        assert!(registry.should_process(&LeafId::new("leaf-2"), "Daily/2024-06-15.md"));
    }

    #[test]
    fn record_overwrites_and_forget_resets() {
        let mut registry = LeafRegistry::new();
        let leaf = LeafId::new("leaf-1");
        registry.record(leaf.clone(), "a.md");
        registry.record(leaf.clone(), "b.md");
        assert_eq!(registry.last_rendered(&leaf), Some("b.md"));
        assert_eq!(registry.len(), 1);

        assert!(registry.forget(&leaf));
        assert!(registry.should_process(&leaf, "b.md"));
        assert!(registry.is_empty());
    }
}
