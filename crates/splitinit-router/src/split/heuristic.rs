//! Optional claiming passes for parents that accept extra named values.
//!
//! Both passes look past the direct parent into its first-parent ancestry
//! up to the stop boundary, since a parent with an extra named bag can
//! carry a value to any ancestor that owns it. Ancestors at or beyond the
//! stop are never constructed, so they own nothing. The type-hint pass runs
//! before the declared-key pass.
//!
//! A key with more than one candidate parent goes to the first declared
//! candidate and is reported as [`RoutingDiagnostic::AmbiguousRouting`].

use splitinit_core::{ComponentId, ComponentRegistry, Value};
use tracing::warn;

use super::primary::record;
use super::{ClaimKey, ClaimPass, Pool, Routing, RoutingDiagnostic};
use crate::graph::CompositionGraph;
use crate::inspect::SignatureCache;

/// Claims unclaimed named values whose kind matches the type hint of an
/// equally named parameter somewhere in a parent's ancestor chain.
pub fn route_by_type_hint(
    registry: &ComponentRegistry,
    cache: &SignatureCache,
    graph: &CompositionGraph,
    pool: &mut Pool,
    routing: &mut Routing,
) {
    claim_by(registry, cache, graph, pool, routing, ClaimPass::TypeHint, |ancestor, key, value| {
        cache
            .signature(registry, ancestor)
            .find(key)
            .filter(|p| p.accepts_named())
            .and_then(|p| p.type_hint)
            .is_some_and(|hint| hint.admits(value.kind()))
    });
}

/// Claims unclaimed named values whose key an ancestor declares it reads
/// from its extra named bag.
pub fn route_by_declared_keys(
    registry: &ComponentRegistry,
    cache: &SignatureCache,
    graph: &CompositionGraph,
    pool: &mut Pool,
    routing: &mut Routing,
) {
    claim_by(registry, cache, graph, pool, routing, ClaimPass::DeclaredKey, |ancestor, key, _| {
        registry
            .get(ancestor)
            .is_some_and(|d| d.consumes_keys.iter().any(|k| k.as_ref() == key))
    });
}

fn claim_by<F>(
    registry: &ComponentRegistry,
    cache: &SignatureCache,
    graph: &CompositionGraph,
    pool: &mut Pool,
    routing: &mut Routing,
    pass: ClaimPass,
    owns: F,
) where
    F: Fn(ComponentId, &str, &Value) -> bool,
{
    let reach: Vec<(ComponentId, &[ComponentId])> = graph
        .branches
        .iter()
        .map(|b| (b.parent, b.ancestors.as_slice()))
        .collect();

    for key in pool.keys() {
        let Some(value) = pool.get(&key) else {
            continue;
        };
        let candidates: Vec<ComponentId> = reach
            .iter()
            .filter(|(parent, _)| eligible(registry, cache, &*routing, *parent, &key))
            .filter(|(_, ancestors)| ancestors.iter().any(|&a| owns(a, key.as_str(), value)))
            .map(|(parent, _)| *parent)
            .collect();
        let Some(&chosen) = candidates.first() else {
            continue;
        };

        if candidates.len() > 1 {
            warn!(
                event = "ambiguous_routing",
                category = "heuristic",
                key = %key,
                pass = %pass,
                candidates = candidates.len(),
                chosen = registry.name(chosen),
            );
            routing.diagnostics.push(RoutingDiagnostic::AmbiguousRouting {
                key: key.clone(),
                candidates: candidates.clone(),
                chosen: Some(chosen),
            });
        }

        let Some(value) = pool.take(&key) else {
            continue;
        };
        let Some(assignment) = routing.assignment_mut(chosen) else {
            continue;
        };
        assignment.named.insert(key.clone(), value);
        record(registry, &mut routing.claims, chosen, ClaimKey::Name(key), pass);
    }
}

/// A parent can carry `key` only through its extra named bag, and only if
/// it does not already hold the name.
fn eligible(
    registry: &ComponentRegistry,
    cache: &SignatureCache,
    routing: &Routing,
    parent: ComponentId,
    key: &str,
) -> bool {
    cache.signature(registry, parent).accepts_extra_named
        && routing.assignment(parent).is_some_and(|a| !a.has(key))
}
