//! Component registry.
//!
//! An arena of component descriptors addressed by [`ComponentId`]. Parents
//! must be registered before their children, so every composition graph in
//! a registry is acyclic by construction.

mod linearize;

#[cfg(test)]
mod tests;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::component::ComponentDescriptor;
use crate::error::RegistryError;

pub use linearize::c3_merge;

/// Stable identifier of a registered component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    /// The universal root every component descends from.
    pub const ROOT: ComponentId = ComponentId(0);

    /// Index of the component in its registry.
    pub fn index(self) -> usize {
        self.0
    }

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Name under which the universal root is registered.
pub const ROOT_NAME: &str = "root";

/// Arena of components with their precomputed linearizations.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    components: Vec<ComponentDescriptor>,
    // Own id first, ROOT last.
    linearizations: Vec<Vec<ComponentId>>,
    by_name: HashMap<Arc<str>, ComponentId>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry {
    /// Creates a registry holding only the universal root.
    pub fn new() -> Self {
        let root = ComponentDescriptor::opaque(ROOT_NAME);
        let mut by_name = HashMap::new();
        by_name.insert(root.name.clone(), ComponentId::ROOT);
        ComponentRegistry {
            components: vec![root],
            linearizations: vec![vec![ComponentId::ROOT]],
            by_name,
        }
    }

    /// Registers a component and returns its id.
    ///
    /// A component declared without parents gets the universal root as its
    /// single parent.
    ///
    /// # Errors
    ///
    /// Fails on duplicate names, unknown parents, duplicate parameter names
    /// and parent orders that admit no linearization.
    pub fn register(&mut self, mut descriptor: ComponentDescriptor) -> Result<ComponentId, RegistryError> {
        if self.by_name.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateComponent(descriptor.name.to_string()));
        }
        if descriptor.parents.is_empty() {
            descriptor.parents.push(ComponentId::ROOT);
        }
        for parent in &descriptor.parents {
            if parent.0 >= self.components.len() {
                return Err(RegistryError::UnknownParent {
                    component: descriptor.name.to_string(),
                    parent: parent.0,
                });
            }
        }
        if let Some(signature) = &descriptor.signature {
            let mut seen = HashSet::new();
            for param in &signature.parameters {
                if !seen.insert(param.name.as_ref()) {
                    return Err(RegistryError::DuplicateParameter {
                        component: descriptor.name.to_string(),
                        parameter: param.name.to_string(),
                    });
                }
            }
        }

        let id = ComponentId(self.components.len());
        let mut sequences: Vec<Vec<ComponentId>> = descriptor
            .parents
            .iter()
            .map(|p| self.linearizations[p.0].clone())
            .collect();
        sequences.push(descriptor.parents.clone());
        let Some(tail) = c3_merge(sequences) else {
            return Err(RegistryError::InconsistentHierarchy(descriptor.name.to_string()));
        };
        let mut linearization = Vec::with_capacity(tail.len() + 1);
        linearization.push(id);
        linearization.extend(tail);

        debug!(
            event = "component_registered",
            component = %descriptor.name,
            id = id.0,
            parents = descriptor.parents.len(),
        );
        self.by_name.insert(descriptor.name.clone(), id);
        self.components.push(descriptor);
        self.linearizations.push(linearization);
        Ok(id)
    }

    /// Number of registered components, the root included.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Always false: the root is always registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        id.0 < self.components.len()
    }

    /// Gets a descriptor by id.
    pub fn get(&self, id: ComponentId) -> Option<&ComponentDescriptor> {
        self.components.get(id.0)
    }

    /// Gets a descriptor by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    pub fn descriptor(&self, id: ComponentId) -> &ComponentDescriptor {
        &self.components[id.0]
    }

    /// Name of a component.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    pub fn name(&self, id: ComponentId) -> &str {
        &self.components[id.0].name
    }

    /// Looks a component up by name.
    pub fn lookup(&self, name: &str) -> Option<ComponentId> {
        self.by_name.get(name).copied()
    }

    /// Looks a component up by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownComponent`] if no such component exists.
    pub fn id_of(&self, name: &str) -> Result<ComponentId, RegistryError> {
        self.lookup(name)
            .ok_or_else(|| RegistryError::UnknownComponent(name.to_string()))
    }

    /// Direct parents of a component, in declared order.
    pub fn parents(&self, id: ComponentId) -> &[ComponentId] {
        self.components
            .get(id.0)
            .map(|c| c.parents.as_slice())
            .unwrap_or(&[])
    }

    /// The C3 linearization of a component: itself first, the root last.
    pub fn linearization(&self, id: ComponentId) -> &[ComponentId] {
        self.linearizations
            .get(id.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterates over all components with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &ComponentDescriptor)> {
        self.components
            .iter()
            .enumerate()
            .map(|(i, c)| (ComponentId(i), c))
    }
}
