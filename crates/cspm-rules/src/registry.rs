//! # Rule Registry
//!
//! Resolves rule identifiers to implementations.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::ram::AccessKeysRotation;
use crate::rule::Rule;

/// Identifier-keyed set of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<&'static str, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every rule shipped with this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(AccessKeysRotation::new()));
        registry
    }

    /// Add a rule, replacing any rule with the same id.
    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        let id = rule.metadata().id;
        if self.rules.insert(id, rule).is_some() {
            tracing::debug!(rule = id, "replaced registered rule");
        }
    }

    /// Look up a rule by id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Rule>> {
        self.rules.get(id).cloned()
    }

    /// Registered rules, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Rule>> {
        self.rules.values()
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_contains_rotation_rule() {
        let registry = RuleRegistry::builtin();
        assert_eq!(registry.len(), 1);
        let rule = registry.get("accessKeysRotation").unwrap();
        assert_eq!(rule.metadata().category, "RAM");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn register_replaces_same_id() {
        let mut registry = RuleRegistry::builtin();
        registry.register(Arc::new(AccessKeysRotation::new()));
        assert_eq!(registry.len(), 1);
    }
}
