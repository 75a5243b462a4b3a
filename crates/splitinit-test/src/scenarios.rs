//! Ready-made composition graphs.
//!
//! Every component gets a recording constructor, so constructing any of
//! these into a [`CallLog`](crate::CallLog) shows who ran with what.

use splitinit_core::{
    ComponentDescriptor, ComponentId, ComponentRegistry, ParameterDescriptor, Value, ValueKind,
};

use crate::log::{forwarding_recorder, recorder};

/// A recording component with no parameters yet.
pub fn component(name: &str) -> ComponentDescriptor {
    ComponentDescriptor::new(name).with_constructor(recorder(name))
}

/// A recording component that accepts any name and forwards its extras.
pub fn delegating(name: &str) -> ComponentDescriptor {
    ComponentDescriptor::new(name)
        .with_extra_named()
        .delegating()
        .with_constructor(forwarding_recorder(name))
}

fn register(registry: &mut ComponentRegistry, descriptor: ComponentDescriptor) -> ComponentId {
    registry
        .register(descriptor)
        .expect("fixture components register")
}

/// `A(a)`, `B(b, **extra)` and `C(A, B)`.
pub struct ExtraNamedPair {
    pub registry: ComponentRegistry,
    pub a: ComponentId,
    pub b: ComponentId,
    pub c: ComponentId,
}

pub fn extra_named_pair() -> ExtraNamedPair {
    let mut registry = ComponentRegistry::new();
    let a = register(&mut registry, component("A").with_param(ParameterDescriptor::new("a")));
    let b = register(
        &mut registry,
        component("B")
            .with_param(ParameterDescriptor::new("b"))
            .with_extra_named(),
    );
    let c = register(&mut registry, ComponentDescriptor::new("C").with_parents([a, b]));
    ExtraNamedPair { registry, a, b, c }
}

/// `Base(x)`; `Left` and `Right` forward to it; `Top(Left, Right)`.
pub struct Diamond {
    pub registry: ComponentRegistry,
    pub base: ComponentId,
    pub left: ComponentId,
    pub right: ComponentId,
    pub top: ComponentId,
}

pub fn diamond() -> Diamond {
    let mut registry = ComponentRegistry::new();
    let base = register(
        &mut registry,
        component("Base").with_param(ParameterDescriptor::new("x")),
    );
    let left = register(&mut registry, delegating("Left").with_parent(base));
    let right = register(&mut registry, delegating("Right").with_parent(base));
    let top = register(&mut registry, ComponentDescriptor::new("Top").with_parents([left, right]));
    Diamond {
        registry,
        base,
        left,
        right,
        top,
    }
}

/// `C(c=0)`, `B(b)`, `D(**kw)` forwarding to `B`, `G(g=None)`, `K(k, b)`
/// and `L(C, D, G, K)`.
///
/// `b` is only supplied once but both `B` (through `D`) and `K` need it.
pub struct SiblingBackfill {
    pub registry: ComponentRegistry,
    pub b: ComponentId,
    pub c: ComponentId,
    pub d: ComponentId,
    pub g: ComponentId,
    pub k: ComponentId,
    pub l: ComponentId,
}

pub fn sibling_backfill() -> SiblingBackfill {
    let mut registry = ComponentRegistry::new();
    let c = register(
        &mut registry,
        component("C").with_param(ParameterDescriptor::new("c").with_default(0)),
    );
    let b = register(&mut registry, component("B").with_param(ParameterDescriptor::new("b")));
    let d = register(&mut registry, delegating("D").with_parent(b));
    let g = register(
        &mut registry,
        component("G").with_param(ParameterDescriptor::new("g").with_default(Value::None)),
    );
    let k = register(
        &mut registry,
        component("K")
            .with_param(ParameterDescriptor::new("k"))
            .with_param(ParameterDescriptor::new("b")),
    );
    let l = register(&mut registry, ComponentDescriptor::new("L").with_parents([c, d, g, k]));
    SiblingBackfill {
        registry,
        b,
        c,
        d,
        g,
        k,
        l,
    }
}

/// `A(a1, a2=0, **kwargs)`, `B(b1, b2=0)`, a parameterless `Mixin` that
/// accepts anything, and `E(A, B)` / `M(Mixin, A, B)` composites.
///
/// `E` and `M` both record their own construction with `**extra`, so they
/// can take the leftover bucket.
pub struct MixinPair {
    pub registry: ComponentRegistry,
    pub a: ComponentId,
    pub b: ComponentId,
    pub mixin: ComponentId,
    pub e: ComponentId,
    pub m: ComponentId,
}

pub fn mixin_pair() -> MixinPair {
    let mut registry = ComponentRegistry::new();
    let a = register(
        &mut registry,
        component("A")
            .with_param(ParameterDescriptor::new("a1").with_type_hint(ValueKind::String))
            .with_param(ParameterDescriptor::new("a2").with_default(0))
            .with_extra_named(),
    );
    let b = register(
        &mut registry,
        component("B")
            .with_param(ParameterDescriptor::new("b1"))
            .with_param(ParameterDescriptor::new("b2").with_default(0)),
    );
    let mixin = register(&mut registry, component("Mixin").with_extra_named());
    let e = register(
        &mut registry,
        component("E").with_extra_named().with_parents([a, b]),
    );
    let m = register(
        &mut registry,
        component("M").with_extra_named().with_parents([mixin, a, b]),
    );
    MixinPair {
        registry,
        a,
        b,
        mixin,
        e,
        m,
    }
}
