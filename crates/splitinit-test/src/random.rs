//! Seeded random composition graphs and argument sets.
//!
//! Every generated component records into a [`CallLog`](crate::CallLog).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use splitinit_core::{
    CallArgs, ComponentDescriptor, ComponentId, ComponentRegistry, ParameterDescriptor, Signature,
};

use crate::log::{forwarding_recorder, recorder};

/// Parameter names drawn from; small so that components collide on names.
pub const NAMES: [&str; 6] = ["a", "b", "c", "x", "y", "z"];

/// A random registry with a target component and arguments for it.
pub struct RandomCase {
    pub registry: ComponentRegistry,
    pub target: ComponentId,
    pub args: CallArgs,
}

/// Generates case number `seed`. The same seed always yields the same case.
pub fn random_case(seed: u64) -> RandomCase {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut registry = ComponentRegistry::new();
    let mut ids: Vec<ComponentId> = Vec::new();

    for i in 0..rng.random_range(2..7) {
        let name = format!("P{i}");
        let mut descriptor = ComponentDescriptor::new(name.as_str()).with_signature(random_signature(&mut rng));
        descriptor = if rng.random_bool(0.3) {
            descriptor.delegating().with_constructor(forwarding_recorder(name))
        } else {
            descriptor.with_constructor(recorder(name))
        };
        descriptor = descriptor.with_parents(pick(&mut rng, &ids, 2));
        // Parent orders without a linearization are simply skipped.
        if let Ok(id) = registry.register(descriptor) {
            ids.push(id);
        }
    }

    let mut parents = pick(&mut rng, &ids, 3);
    if parents.is_empty() {
        parents.extend(ids.first().copied());
    }
    let target = match registry.register(ComponentDescriptor::new("Target").with_parents(parents)) {
        Ok(id) => id,
        // Fall back to the first component as the target.
        Err(_) => ids.first().copied().unwrap_or(ComponentId::ROOT),
    };

    RandomCase {
        registry,
        target,
        args: random_args(&mut rng),
    }
}

fn random_signature(rng: &mut ChaCha8Rng) -> Signature {
    let mut signature = Signature::new();
    for name in NAMES {
        if !rng.random_bool(0.35) {
            continue;
        }
        let mut param = match rng.random_range(0..4) {
            0 => ParameterDescriptor::positional_only(name),
            1 => ParameterDescriptor::keyword_only(name),
            _ => ParameterDescriptor::new(name),
        };
        if rng.random_bool(0.5) {
            param = param.with_default(0);
        }
        signature = signature.with_param(param);
    }
    if rng.random_bool(0.5) {
        signature = signature.with_extra_named();
    }
    signature
}

fn random_args(rng: &mut ChaCha8Rng) -> CallArgs {
    let mut args = CallArgs::new();
    for _ in 0..rng.random_range(0..4) {
        args = args.arg(rng.random_range(0..100i64));
    }
    for name in NAMES.iter().chain(&["extra"]) {
        if rng.random_bool(0.4) {
            args = args.named(*name, rng.random_range(0..100i64));
        }
    }
    args
}

/// Up to `max` distinct ids from `ids`, in a random order.
fn pick(rng: &mut ChaCha8Rng, ids: &[ComponentId], max: usize) -> Vec<ComponentId> {
    let mut pool = ids.to_vec();
    let mut out = Vec::new();
    let count = rng.random_range(0..=max.min(pool.len()));
    for _ in 0..count {
        let index = rng.random_range(0..pool.len());
        out.push(pool.swap_remove(index));
    }
    out
}
