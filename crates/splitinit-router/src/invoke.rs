//! Delegate invoker.

use std::any::Any;

use splitinit_core::{
    invoke_component, invoke_detached, invoke_open_chain, CallArgs, ComponentId, ComponentRegistry,
    ConstructError,
};
use tracing::{debug, trace, warn};

use crate::chain::{Chain, ChainEnd};
use crate::split::Routing;

/// Invokes every chain head once with the union of its chain's
/// assignments.
///
/// A head already reached (through another chain's forwarding, or a
/// previous call sharing `invoked`) is not invoked again. With
/// `direct_fallback`, a binding failure inside a chain is followed by
/// direct invocation of the members it did not reach, each with its own
/// assignment; other failures always propagate. Values forwarded past
/// the end of a misconfigured chain are dropped rather than rejected.
///
/// # Errors
///
/// Returns the first constructor or binding failure.
pub fn invoke_chains(
    registry: &ComponentRegistry,
    routing: &Routing,
    chains: &[Chain],
    instance: &mut dyn Any,
    direct_fallback: bool,
    invoked: &mut Vec<ComponentId>,
) -> Result<(), ConstructError> {
    for chain in chains {
        let head = chain.head();
        if invoked.contains(&head) {
            trace!(event = "invoke_skipped", category = "invoke", head = registry.name(head));
            continue;
        }

        let args = chain_args(routing, chain);
        debug!(
            event = "invoke_head",
            category = "invoke",
            head = registry.name(head),
            branch = chain.branch.map_or("-", |b| registry.name(b)),
            chain = %chain,
            positional = args.positional.len(),
            named = args.named.len(),
        );
        let result = match chain.end {
            ChainEnd::Closed => invoke_component(registry, head, instance, args, chain.rest(), invoked),
            ChainEnd::Misconfigured => {
                invoke_open_chain(registry, head, instance, args, chain.rest(), invoked)
            }
        };
        match result {
            Ok(()) => {}
            Err(err) if direct_fallback && err.is_binding_error() => {
                warn!(
                    event = "direct_fallback",
                    category = "invoke",
                    head = registry.name(head),
                    error = %err,
                );
                invoke_directly(registry, routing, chain, instance, invoked)?;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Positional values concatenated and named values merged over the chain
/// members, in chain order.
pub fn chain_args(routing: &Routing, chain: &Chain) -> CallArgs {
    let mut args = CallArgs::new();
    for &member in &chain.members {
        if let Some(assignment) = routing.assignment(member) {
            args.extend(&assignment.to_call_args());
        }
    }
    args
}

fn invoke_directly(
    registry: &ComponentRegistry,
    routing: &Routing,
    chain: &Chain,
    instance: &mut dyn Any,
    invoked: &mut Vec<ComponentId>,
) -> Result<(), ConstructError> {
    for &member in &chain.members {
        if invoked.contains(&member) {
            continue;
        }
        let args = routing
            .assignment(member)
            .map(|a| a.to_call_args())
            .unwrap_or_default();
        invoke_detached(registry, member, instance, args, invoked)?;
    }
    Ok(())
}
