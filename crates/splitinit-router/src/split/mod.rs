//! Splitting one flat argument set across the direct parents of a target.
//!
//! Passes run in a fixed order over a shared pool of unclaimed values:
//! 1. [`primary`] - positional, named and extra-named claims per parent
//! 2. [`heuristic`] - optional type-hint and declared-key claims
//! 3. [`broadcast`] - copies of unclaimed named values into safe parents
//! 4. [`backfill`] - copies of sibling values for missing required parameters
//!
//! Claiming passes *move* a value out of the pool; broadcast and backfill
//! only *copy*.

pub mod backfill;
pub mod broadcast;
pub mod heuristic;
pub mod primary;


use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use splitinit_core::{CallArgs, ComponentId, Value};

/// Arguments assigned to one component.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitAssignment {
    pub component: ComponentId,
    /// Positional values, in call order.
    pub positional: Vec<Value>,
    /// Named values.
    pub named: BTreeMap<String, Value>,
    /// Declared names satisfied by positional binding. Never overlaps the
    /// keys of `named`.
    pub positionally_consumed: BTreeSet<String>,
}

impl SplitAssignment {
    pub fn new(component: ComponentId) -> Self {
        SplitAssignment {
            component,
            positional: Vec::new(),
            named: BTreeMap::new(),
            positionally_consumed: BTreeSet::new(),
        }
    }

    /// Returns true if `name` is already satisfied, positionally or by name.
    pub fn has(&self, name: &str) -> bool {
        self.named.contains_key(name) || self.positionally_consumed.contains(name)
    }

    /// The assignment as call arguments.
    pub fn to_call_args(&self) -> CallArgs {
        CallArgs {
            positional: self.positional.clone(),
            named: self.named.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// Which pass claimed a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimPass {
    /// Bound to a positional parameter.
    Positional,
    /// A positional parameter filled from the named pool.
    PositionalByName,
    /// Matched a keyword-eligible parameter.
    Named,
    /// Matched a parameter of an ancestor through the extra named bag.
    ExtraNamed,
    /// Matched an ancestor's parameter type hint.
    TypeHint,
    /// Matched a key an ancestor declares it consumes.
    DeclaredKey,
}

impl fmt::Display for ClaimPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClaimPass::Positional => "positional",
            ClaimPass::PositionalByName => "positional_by_name",
            ClaimPass::Named => "named",
            ClaimPass::ExtraNamed => "extra_named",
            ClaimPass::TypeHint => "type_hint",
            ClaimPass::DeclaredKey => "declared_key",
        };
        f.write_str(name)
    }
}

/// Record of one value moved out of the unclaimed pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub component: ComponentId,
    pub pass: ClaimPass,
    /// Parameter name for named claims, positional index otherwise.
    pub key: ClaimKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimKey {
    Name(String),
    Index(usize),
}

impl fmt::Display for ClaimKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimKey::Name(name) => f.write_str(name),
            ClaimKey::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Where a copied value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopySource {
    /// An unclaimed value broadcast into a safe parent.
    Broadcast,
    /// A value already assigned to `donor`, copied to fill a required
    /// parameter.
    Backfill { donor: ComponentId },
}

/// Record of one value copied without leaving its original place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Copied {
    pub key: String,
    pub component: ComponentId,
    pub source: CopySource,
}

/// Recoverable routing issue. Logged and recorded, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDiagnostic {
    /// A parent's signature could not be inspected.
    Unintrospectable { component: ComponentId },
    /// More than one component could own `key`; `chosen` got it (if any).
    AmbiguousRouting {
        key: String,
        candidates: Vec<ComponentId>,
        chosen: Option<ComponentId>,
    },
    /// A delegating component has nothing to forward to before the stop
    /// boundary; its chain was closed at that component.
    ChainMisconfiguration { component: ComponentId },
    /// The routing target is not part of the registry.
    UnknownTarget { component: ComponentId },
}

/// Outcome of routing one argument set.
#[derive(Debug, Clone, PartialEq)]
pub struct Routing {
    pub target: ComponentId,
    /// One assignment per direct parent, in declared order.
    pub assignments: Vec<SplitAssignment>,
    /// Values no claiming pass took. Broadcast copies stay in here.
    pub leftovers: CallArgs,
    pub claims: Vec<Claim>,
    /// Values copied by broadcast and backfill.
    pub copies: Vec<Copied>,
    pub diagnostics: Vec<RoutingDiagnostic>,
}

impl Routing {
    pub(crate) fn new(target: ComponentId) -> Self {
        Routing {
            target,
            assignments: Vec::new(),
            leftovers: CallArgs::new(),
            claims: Vec::new(),
            copies: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn assignment(&self, component: ComponentId) -> Option<&SplitAssignment> {
        self.assignments.iter().find(|a| a.component == component)
    }

    pub fn assignment_mut(&mut self, component: ComponentId) -> Option<&mut SplitAssignment> {
        self.assignments.iter_mut().find(|a| a.component == component)
    }

    /// Leftover values that no component received, not even as a copy.
    pub fn undelivered(&self) -> CallArgs {
        let named = self
            .leftovers
            .named
            .iter()
            .filter(|(k, _)| {
                !self
                    .copies
                    .iter()
                    .any(|c| c.source == CopySource::Broadcast && &c.key == *k)
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        CallArgs {
            positional: self.leftovers.positional.clone(),
            named,
        }
    }

    /// Components that claimed the named value `key`.
    pub fn claimants(&self, key: &str) -> Vec<ComponentId> {
        self.claims
            .iter()
            .filter(|c| matches!(&c.key, ClaimKey::Name(n) if n == key))
            .map(|c| c.component)
            .collect()
    }
}

/// Values not yet claimed by any pass.
#[derive(Debug, Clone, Default)]
pub struct Pool {
    positional: VecDeque<Value>,
    next_index: usize,
    named: BTreeMap<String, Value>,
}

impl Pool {
    pub fn new(args: CallArgs) -> Self {
        Pool {
            positional: args.positional.into(),
            next_index: 0,
            named: args.named,
        }
    }

    /// Takes the next positional value with its original index.
    pub fn pop_positional(&mut self) -> Option<(usize, Value)> {
        let value = self.positional.pop_front()?;
        let index = self.next_index;
        self.next_index += 1;
        Some((index, value))
    }

    pub fn has_positional(&self) -> bool {
        !self.positional.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.named.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.named.get(key)
    }

    /// Removes a named value.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.named.remove(key)
    }

    /// Unclaimed named keys, in lexical order.
    pub fn keys(&self) -> Vec<String> {
        self.named.keys().cloned().collect()
    }

    pub fn named(&self) -> &BTreeMap<String, Value> {
        &self.named
    }

    pub fn into_leftovers(self) -> CallArgs {
        CallArgs {
            positional: self.positional.into(),
            named: self.named,
        }
    }
}
