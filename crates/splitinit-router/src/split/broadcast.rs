//! Safe-fallback broadcaster.

use splitinit_core::{ComponentId, ComponentRegistry};
use tracing::debug;

use super::{CopySource, Copied, Pool, Routing};
use crate::graph::CompositionGraph;
use crate::inspect::SignatureCache;

/// Direct parents whose whole ancestor chain accepts extra named values.
pub fn safe_parents(
    registry: &ComponentRegistry,
    cache: &SignatureCache,
    graph: &CompositionGraph,
) -> Vec<ComponentId> {
    graph
        .branches
        .iter()
        .filter(|branch| {
            !branch.ancestors.is_empty()
                && branch
                    .ancestors
                    .iter()
                    .all(|&a| cache.signature(registry, a).accepts_extra_named)
        })
        .map(|branch| branch.parent)
        .collect()
}

/// Copies every unclaimed named value into every safe parent.
///
/// The pool is left untouched, so broadcast values remain leftovers.
pub fn broadcast(
    registry: &ComponentRegistry,
    cache: &SignatureCache,
    graph: &CompositionGraph,
    pool: &Pool,
    routing: &mut Routing,
) {
    if pool.named().is_empty() {
        return;
    }
    for parent in safe_parents(registry, cache, graph) {
        let Some(assignment) = routing.assignments.iter_mut().find(|a| a.component == parent) else {
            continue;
        };
        for (key, value) in pool.named() {
            if assignment.has(key) {
                continue;
            }
            assignment.named.insert(key.clone(), value.clone());
            debug!(
                event = "broadcast",
                category = "broadcast",
                component = registry.name(parent),
                key = %key,
            );
            routing.copies.push(Copied {
                key: key.clone(),
                component: parent,
                source: CopySource::Broadcast,
            });
        }
    }
}
