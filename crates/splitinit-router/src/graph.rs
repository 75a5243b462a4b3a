//! Composition graph of a target component.
//!
//! Two views of the ancestry are used:
//! - the *direct parents* of the target, in declared order, which decide
//!   positional precedence and which components receive assignments;
//! - per parent, its *ancestor chain*, following first-parent links down to
//!   the stop boundary, which decides safe-broadcast eligibility, type-hint
//!   lookups and backfill requirements.

use splitinit_core::{ComponentId, ComponentRegistry};

/// One direct parent with its ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// The direct parent.
    pub parent: ComponentId,
    /// The parent followed by its first-parent ancestors, stopping before
    /// the stop boundary and the root.
    pub ancestors: Vec<ComponentId>,
}

/// Direct parents of a target and their ancestor chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionGraph {
    pub target: ComponentId,
    pub stop: ComponentId,
    pub branches: Vec<Branch>,
}

impl CompositionGraph {
    /// Builds the graph of `target`, cut at `stop`.
    pub fn build(registry: &ComponentRegistry, target: ComponentId, stop: ComponentId) -> Self {
        let branches = direct_parents(registry, target, stop)
            .into_iter()
            .map(|parent| Branch {
                parent,
                ancestors: ancestor_chain(registry, parent, stop),
            })
            .collect();
        CompositionGraph {
            target,
            stop,
            branches,
        }
    }

    /// Direct parents in declared order.
    pub fn parents(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.branches.iter().map(|b| b.parent)
    }

    pub fn branch(&self, parent: ComponentId) -> Option<&Branch> {
        self.branches.iter().find(|b| b.parent == parent)
    }
}

/// Direct parents of `id` in declared order, up to (excluding) the first
/// one that is the stop boundary or the root.
pub fn direct_parents(
    registry: &ComponentRegistry,
    id: ComponentId,
    stop: ComponentId,
) -> Vec<ComponentId> {
    registry
        .parents(id)
        .iter()
        .copied()
        .take_while(|&p| p != stop && !p.is_root())
        .collect()
}

/// `parent` followed by its first-parent ancestors, stopping before `stop`
/// or the root.
pub fn ancestor_chain(
    registry: &ComponentRegistry,
    parent: ComponentId,
    stop: ComponentId,
) -> Vec<ComponentId> {
    let mut chain = Vec::new();
    let mut current = parent;
    while current != stop && !current.is_root() && registry.contains(current) {
        chain.push(current);
        match registry.parents(current).first() {
            Some(&next) => current = next,
            None => break,
        }
    }
    chain
}

/// The linearization of `target` without `target` itself, stopping before
/// `stop` or the root. Every shared ancestor appears exactly once.
pub fn linearized_ancestors(
    registry: &ComponentRegistry,
    target: ComponentId,
    stop: ComponentId,
) -> Vec<ComponentId> {
    registry
        .linearization(target)
        .iter()
        .skip(1)
        .copied()
        .take_while(|&c| c != stop && !c.is_root())
        .collect()
}
