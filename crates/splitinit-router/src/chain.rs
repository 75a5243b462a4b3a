//! Cooperative-chain segmentation.
//!
//! The linearized ancestors of a target are cut into chains. A component
//! that accepts extra named values and delegates forward keeps its chain
//! open; any other component closes it, inclusive. Only chain heads are
//! invoked; the rest of a chain is reached through forwarding.

use std::fmt;

use smallvec::SmallVec;
use splitinit_core::{ComponentId, ComponentRegistry};
use tracing::{debug, warn};

use crate::graph::linearized_ancestors;
use crate::split::RoutingDiagnostic;

/// How a chain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainEnd {
    /// Closed by a component that does not forward.
    Closed,
    /// Still forwarding when the stop boundary (or the root) was reached.
    Misconfigured,
}

/// A run of components reached by one head invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    /// Members in invocation order; the first is the head.
    pub members: SmallVec<[ComponentId; 4]>,
    /// The first direct parent of the target whose ancestry contains the head.
    pub branch: Option<ComponentId>,
    pub end: ChainEnd,
}

impl Chain {
    pub fn head(&self) -> ComponentId {
        self.members[0]
    }

    /// Members after the head, in forwarding order.
    pub fn rest(&self) -> &[ComponentId] {
        &self.members[1..]
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.members.contains(&id)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{member}")?;
        }
        f.write_str("]")
    }
}

/// Chains of `target`, plus diagnostics for chains left open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub chains: Vec<Chain>,
    pub diagnostics: Vec<RoutingDiagnostic>,
}

/// Segments the ancestors of `target` up to `stop` into chains.
///
/// `skip` is left out of the walk entirely.
pub fn segment(
    registry: &ComponentRegistry,
    target: ComponentId,
    stop: ComponentId,
    skip: Option<ComponentId>,
) -> Segmentation {
    let mut out = Segmentation::default();
    let mut current: SmallVec<[ComponentId; 4]> = SmallVec::new();

    for id in linearized_ancestors(registry, target, stop) {
        if Some(id) == skip {
            continue;
        }
        current.push(id);
        let descriptor = registry.descriptor(id);
        let forwards = descriptor.accepts_extra_named() && descriptor.delegates_forward;
        if !forwards {
            let chain = close(registry, target, std::mem::take(&mut current), ChainEnd::Closed);
            out.chains.push(chain);
        }
    }

    if let Some(&last) = current.last() {
        warn!(
            event = "chain_misconfigured",
            category = "chain",
            component = registry.name(last),
        );
        out.diagnostics
            .push(RoutingDiagnostic::ChainMisconfiguration { component: last });
        let chain = close(registry, target, current, ChainEnd::Misconfigured);
        out.chains.push(chain);
    }
    out
}

fn close(
    registry: &ComponentRegistry,
    target: ComponentId,
    members: SmallVec<[ComponentId; 4]>,
    end: ChainEnd,
) -> Chain {
    let head = members[0];
    let branch = registry
        .parents(target)
        .iter()
        .copied()
        .find(|&p| registry.linearization(p).contains(&head));
    debug!(
        event = "chain_closed",
        category = "chain",
        head = registry.name(head),
        members = members.len(),
        end = ?end,
    );
    Chain {
        members,
        branch,
        end,
    }
}
