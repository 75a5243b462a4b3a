//! Missing-parameter backfill.
//!
//! A required parameter is often supplied once and routed to one sibling
//! while another sibling needs it too. Backfill copies the value across,
//! but only when every sibling holding the name agrees on it.

use std::collections::BTreeSet;

use splitinit_core::{ComponentId, ComponentRegistry, Value};
use tracing::{debug, warn};

use super::{CopySource, Copied, Routing, RoutingDiagnostic};
use crate::graph::CompositionGraph;
use crate::inspect::SignatureCache;

/// Names `parent` must receive for its construction to bind.
///
/// These are the keyword-eligible required parameters of the parent and,
/// when the parent accepts extra named values, of its first-parent
/// ancestors.
pub fn required_names(
    registry: &ComponentRegistry,
    cache: &SignatureCache,
    graph: &CompositionGraph,
    parent: ComponentId,
) -> BTreeSet<String> {
    let signature = cache.signature(registry, parent);
    let mut names: BTreeSet<String> = signature
        .required_params()
        .filter(|p| p.accepts_named())
        .map(|p| p.name.to_string())
        .collect();
    if signature.accepts_extra_named {
        let ancestors = graph.branch(parent).map(|b| b.ancestors.as_slice()).unwrap_or(&[]);
        for &ancestor in ancestors.iter().skip(1) {
            let inherited = cache.signature(registry, ancestor);
            names.extend(
                inherited
                    .required_params()
                    .filter(|p| p.accepts_named())
                    .map(|p| p.name.to_string()),
            );
        }
    }
    names
}

/// Fills missing required names of each direct parent from the values
/// already assigned to its siblings.
pub fn backfill(
    registry: &ComponentRegistry,
    cache: &SignatureCache,
    graph: &CompositionGraph,
    routing: &mut Routing,
) {
    for index in 0..routing.assignments.len() {
        let parent = routing.assignments[index].component;
        let signature = cache.signature(registry, parent);

        for name in required_names(registry, cache, graph, parent) {
            let target = &routing.assignments[index];
            if target.has(&name) {
                continue;
            }
            if !signature.accepts_keyword(&name) && !signature.accepts_extra_named {
                continue;
            }

            let donors: Vec<(ComponentId, &Value)> = routing
                .assignments
                .iter()
                .filter(|a| a.component != parent)
                .filter_map(|a| a.named.get(&name).map(|v| (a.component, v)))
                .collect();
            let Some(&(donor, value)) = donors.first() else {
                continue;
            };

            if donors.iter().any(|(_, v)| *v != value) {
                let candidates: Vec<ComponentId> = donors.iter().map(|(c, _)| *c).collect();
                warn!(
                    event = "ambiguous_routing",
                    category = "backfill",
                    key = %name,
                    component = registry.name(parent),
                    candidates = candidates.len(),
                );
                routing.diagnostics.push(RoutingDiagnostic::AmbiguousRouting {
                    key: name,
                    candidates,
                    chosen: None,
                });
                continue;
            }

            let value = value.clone();
            debug!(
                event = "backfill",
                category = "backfill",
                component = registry.name(parent),
                key = %name,
                donor = registry.name(donor),
            );
            routing.assignments[index].named.insert(name.clone(), value);
            routing.copies.push(Copied {
                key: name,
                component: parent,
                source: CopySource::Backfill { donor },
            });
        }
    }
}
