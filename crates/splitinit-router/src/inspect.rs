//! Signature inspection and the signature cache.
//!
//! Signatures are static, so the cache is populated lazily and never
//! invalidated. One cache belongs to one registry: it is keyed by
//! [`ComponentId`], which is only meaningful within the registry that
//! issued it.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use splitinit_core::{ComponentId, ComponentRegistry, Signature};
use tracing::debug;

/// Returns the declared signature of `id`.
///
/// Opaque components, and ids unknown to the registry, yield an empty
/// signature that accepts no extra named arguments, so their arguments
/// simply end up as leftovers.
pub fn inspect(registry: &ComponentRegistry, id: ComponentId) -> Signature {
    match registry.get(id).and_then(|d| d.signature.as_ref()) {
        Some(signature) => signature.clone(),
        None => {
            debug!(
                event = "unintrospectable_component",
                category = "inspect",
                component = %id,
            );
            Signature::opaque()
        }
    }
}

/// Read-mostly cache of signatures and ancestor parameter names.
///
/// Lookups take a read lock; a miss takes the write lock and re-checks
/// before populating, so each entry is computed at most once per process
/// even under concurrent first use.
#[derive(Debug, Default)]
pub struct SignatureCache {
    signatures: RwLock<HashMap<ComponentId, Arc<Signature>>>,
    ancestor_names: RwLock<HashMap<(ComponentId, ComponentId), Arc<BTreeSet<String>>>>,
}

impl SignatureCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached [`inspect`].
    pub fn signature(&self, registry: &ComponentRegistry, id: ComponentId) -> Arc<Signature> {
        if let Some(hit) = self
            .signatures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return hit.clone();
        }

        let mut signatures = self
            .signatures
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        signatures
            .entry(id)
            .or_insert_with(|| Arc::new(inspect(registry, id)))
            .clone()
    }

    /// Keyword-eligible parameter names declared anywhere in the
    /// linearization of `id`, stopping before `stop` (or the root).
    pub fn ancestor_param_names(
        &self,
        registry: &ComponentRegistry,
        id: ComponentId,
        stop: ComponentId,
    ) -> Arc<BTreeSet<String>> {
        let key = (id, stop);
        if let Some(hit) = self
            .ancestor_names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return hit.clone();
        }

        let names = self.collect_param_names(registry, id, stop);
        let mut cache = self
            .ancestor_names
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        cache.entry(key).or_insert_with(|| Arc::new(names)).clone()
    }

    fn collect_param_names(
        &self,
        registry: &ComponentRegistry,
        id: ComponentId,
        stop: ComponentId,
    ) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for &ancestor in registry.linearization(id) {
            if ancestor == stop || ancestor.is_root() {
                break;
            }
            let signature = self.signature(registry, ancestor);
            names.extend(signature.keyword_params().map(|p| p.name.to_string()));
        }
        names
    }

    /// Number of cached signatures.
    pub fn len(&self) -> usize {
        self.signatures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitinit_core::{ComponentDescriptor, ParameterDescriptor};
    use std::thread;

    fn registry() -> (ComponentRegistry, ComponentId, ComponentId) {
        let mut registry = ComponentRegistry::new();
        let base = registry
            .register(
                ComponentDescriptor::new("Base")
                    .with_param(ParameterDescriptor::new("x"))
                    .with_param(ParameterDescriptor::positional_only("p")),
            )
            .unwrap();
        let child = registry
            .register(
                ComponentDescriptor::new("Child")
                    .with_param(ParameterDescriptor::keyword_only("y"))
                    .with_extra_named()
                    .with_parent(base),
            )
            .unwrap();
        (registry, base, child)
    }

    #[test]
    fn test_opaque_inspects_as_empty() {
        let mut registry = ComponentRegistry::new();
        let foreign = registry
            .register(ComponentDescriptor::opaque("Foreign"))
            .unwrap();
        let sig = inspect(&registry, foreign);
        assert!(sig.parameters.is_empty());
        assert!(!sig.accepts_extra_named);
    }

    #[test]
    fn test_ancestor_names_skip_positional_only() {
        let (registry, _, child) = registry();
        let cache = SignatureCache::new();
        let names = cache.ancestor_param_names(&registry, child, ComponentId::ROOT);
        let names: Vec<_> = names.iter().map(String::as_str).collect();
        assert_eq!(names, ["x", "y"]);
    }

    #[test]
    fn test_stop_boundary_limits_ancestor_names() {
        let (registry, base, child) = registry();
        let cache = SignatureCache::new();
        let names = cache.ancestor_param_names(&registry, child, base);
        assert_eq!(names.len(), 1);
        assert!(names.contains("y"));
    }

    #[test]
    fn test_cache_populates_once_across_threads() {
        let (registry, base, child) = registry();
        let cache = SignatureCache::new();
        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    cache.signature(&registry, base);
                    cache.signature(&registry, child);
                });
            }
        });
        assert_eq!(cache.len(), 2);
        assert!(Arc::ptr_eq(
            &cache.signature(&registry, base),
            &cache.signature(&registry, base)
        ));
    }
}
