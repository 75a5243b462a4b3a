//! Primary splitter: the greedy positional / named / extra-named pass.

use splitinit_core::{ComponentId, ComponentRegistry};
use tracing::{debug, warn};

use super::{Claim, ClaimKey, ClaimPass, Pool, Routing, RoutingDiagnostic, SplitAssignment};
use crate::graph::CompositionGraph;
use crate::inspect::SignatureCache;

/// Assigns values from `pool` to every direct parent of the graph, in
/// declared order. Earlier parents win contested names.
pub fn split(
    registry: &ComponentRegistry,
    cache: &SignatureCache,
    graph: &CompositionGraph,
    pool: &mut Pool,
    routing: &mut Routing,
) {
    for parent in graph.parents() {
        if registry.get(parent).is_some_and(|d| d.is_opaque()) {
            warn!(
                event = "unintrospectable_component",
                category = "split",
                component = registry.name(parent),
            );
            routing
                .diagnostics
                .push(RoutingDiagnostic::Unintrospectable { component: parent });
        }

        let mut assignment = SplitAssignment::new(parent);
        positional_phase(registry, cache, pool, &mut assignment, &mut routing.claims);
        named_phase(registry, cache, pool, &mut assignment, &mut routing.claims);
        extra_named_phase(registry, cache, graph, pool, &mut assignment, &mut routing.claims);
        routing.assignments.push(assignment);
    }
}

fn positional_phase(
    registry: &ComponentRegistry,
    cache: &SignatureCache,
    pool: &mut Pool,
    assignment: &mut SplitAssignment,
    claims: &mut Vec<Claim>,
) {
    let signature = cache.signature(registry, assignment.component);
    for param in signature.positional_params() {
        if let Some((index, value)) = pool.pop_positional() {
            assignment.positional.push(value);
            assignment.positionally_consumed.insert(param.name.to_string());
            record(registry, claims, assignment.component, ClaimKey::Index(index), ClaimPass::Positional);
            continue;
        }
        // Positional-only parameters cannot be passed by name.
        if !param.accepts_named() {
            break;
        }
        match pool.take(&param.name) {
            Some(value) => {
                assignment.named.insert(param.name.to_string(), value);
                record(
                    registry,
                    claims,
                    assignment.component,
                    ClaimKey::Name(param.name.to_string()),
                    ClaimPass::PositionalByName,
                );
            }
            None => break,
        }
    }
}

fn named_phase(
    registry: &ComponentRegistry,
    cache: &SignatureCache,
    pool: &mut Pool,
    assignment: &mut SplitAssignment,
    claims: &mut Vec<Claim>,
) {
    let signature = cache.signature(registry, assignment.component);
    for key in pool.keys() {
        if !signature.accepts_keyword(&key) || assignment.has(&key) {
            continue;
        }
        if let Some(value) = pool.take(&key) {
            assignment.named.insert(key.clone(), value);
            record(registry, claims, assignment.component, ClaimKey::Name(key), ClaimPass::Named);
        }
    }
}

fn extra_named_phase(
    registry: &ComponentRegistry,
    cache: &SignatureCache,
    graph: &CompositionGraph,
    pool: &mut Pool,
    assignment: &mut SplitAssignment,
    claims: &mut Vec<Claim>,
) {
    let signature = cache.signature(registry, assignment.component);
    if !signature.accepts_extra_named {
        return;
    }
    let usable = cache.ancestor_param_names(registry, assignment.component, graph.stop);
    for key in pool.keys() {
        if !usable.contains(&key) || assignment.has(&key) {
            continue;
        }
        if let Some(value) = pool.take(&key) {
            assignment.named.insert(key.clone(), value);
            record(registry, claims, assignment.component, ClaimKey::Name(key), ClaimPass::ExtraNamed);
        }
    }
}

pub(crate) fn record(
    registry: &ComponentRegistry,
    claims: &mut Vec<Claim>,
    component: ComponentId,
    key: ClaimKey,
    pass: ClaimPass,
) {
    debug!(
        event = "claim",
        category = "split",
        component = registry.name(component),
        key = %key,
        pass = %pass,
    );
    claims.push(Claim {
        component,
        pass,
        key,
    });
}
