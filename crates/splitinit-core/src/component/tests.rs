//! Tests for component manifests and forwarding.

use std::any::Any;

use super::*;
use crate::args::{BoundArgs, CallArgs};
use crate::error::ConstructError;
use crate::registry::{ComponentId, ComponentRegistry};
use crate::value::Value;

#[derive(Debug, Default)]
struct Trace {
    calls: Vec<String>,
}

fn log(
    name: &'static str,
) -> impl Fn(&mut Trace, BoundArgs, Forward<'_>) -> Result<(), ConstructError> + Send + Sync {
    move |trace: &mut Trace, mut args: BoundArgs, next: Forward<'_>| {
        trace.calls.push(name.to_string());
        let rest = args.take_extra_named();
        next.forward(trace as &mut dyn Any, CallArgs::from_named(rest))
    }
}

#[test]
fn test_parameter_kind_eligibility() {
    assert!(ParameterKind::PositionalOnly.accepts_positional());
    assert!(!ParameterKind::PositionalOnly.accepts_named());
    assert!(ParameterKind::PositionalOrKeyword.accepts_positional());
    assert!(ParameterKind::PositionalOrKeyword.accepts_named());
    assert!(!ParameterKind::KeywordOnly.accepts_positional());
    assert!(ParameterKind::KeywordOnly.accepts_named());
}

#[test]
fn test_signature_queries() {
    let sig = Signature::new()
        .with_param(ParameterDescriptor::new("a"))
        .with_param(ParameterDescriptor::keyword_only("b").with_default(1))
        .with_param(ParameterDescriptor::positional_only("c"));

    let positional: Vec<_> = sig.positional_params().map(|p| p.name.as_ref()).collect();
    assert_eq!(positional, ["a", "c"]);
    let required: Vec<_> = sig.required_params().map(|p| p.name.as_ref()).collect();
    assert_eq!(required, ["a", "c"]);
    assert!(sig.accepts_keyword("b"));
    assert!(!sig.accepts_keyword("c"));
    assert!(!sig.accepts_extra_named);
}

#[test]
fn test_opaque_descriptor() {
    let d = ComponentDescriptor::opaque("Foreign");
    assert!(d.is_opaque());
    assert!(!d.accepts_extra_named());
}

#[test]
fn test_forward_runs_rest_of_chain_once() {
    let mut registry = ComponentRegistry::new();
    let a = registry
        .register(
            ComponentDescriptor::new("A")
                .with_extra_named()
                .delegating()
                .with_constructor(log("A")),
        )
        .unwrap();
    let b = registry
        .register(
            ComponentDescriptor::new("B")
                .with_param(ParameterDescriptor::new("b"))
                .with_constructor(|trace: &mut Trace, args: BoundArgs, _next: Forward<'_>| {
                    trace.calls.push(format!("B({})", args.get("b").cloned().unwrap_or(Value::None)));
                    Ok(())
                }),
        )
        .unwrap();

    let mut trace = Trace::default();
    let mut invoked = Vec::new();
    invoke_component(
        &registry,
        a,
        &mut trace,
        CallArgs::new().named("b", 2),
        &[b],
        &mut invoked,
    )
    .unwrap();

    assert_eq!(trace.calls, ["A", "B(2)"]);
    assert_eq!(invoked, [a, b]);
}

#[test]
fn test_forward_past_chain_end_rejects_arguments() {
    let mut registry = ComponentRegistry::new();
    let a = registry
        .register(
            ComponentDescriptor::new("A")
                .with_extra_named()
                .delegating()
                .with_constructor(log("A")),
        )
        .unwrap();

    let mut trace = Trace::default();
    let mut invoked = Vec::new();
    let err = invoke_component(
        &registry,
        a,
        &mut trace,
        CallArgs::new().named("stray", 1),
        &[],
        &mut invoked,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConstructError::UnexpectedArgument {
            component: "root".into(),
            name: "stray".into()
        }
    );
}

#[test]
fn test_detached_forward_drops_arguments() {
    let mut registry = ComponentRegistry::new();
    let a = registry
        .register(
            ComponentDescriptor::new("A")
                .with_extra_named()
                .delegating()
                .with_constructor(log("A")),
        )
        .unwrap();

    let mut trace = Trace::default();
    let mut invoked = Vec::new();
    invoke_detached(&registry, a, &mut trace, CallArgs::new().named("x", 1), &mut invoked).unwrap();
    assert_eq!(trace.calls, ["A"]);
    assert_eq!(invoked, [a]);
}

#[test]
fn test_wrong_instance_type() {
    let mut registry = ComponentRegistry::new();
    let a = registry
        .register(ComponentDescriptor::new("A").with_constructor(log("A")))
        .unwrap();

    let mut wrong = 5_u32;
    let mut invoked = Vec::new();
    let err = invoke_component(&registry, a, &mut wrong, CallArgs::new(), &[], &mut invoked).unwrap_err();
    assert!(matches!(err, ConstructError::InstanceType { .. }));
}

#[test]
fn test_constructorless_delegating_component_passes_through() {
    let mut registry = ComponentRegistry::new();
    let mixin = registry
        .register(ComponentDescriptor::new("Mixin").with_extra_named().delegating())
        .unwrap();
    let leaf = registry
        .register(
            ComponentDescriptor::new("Leaf")
                .with_param(ParameterDescriptor::new("v"))
                .with_constructor(|trace: &mut Trace, args: BoundArgs, _next: Forward<'_>| {
                    trace.calls.push(format!("Leaf({})", args.get("v").cloned().unwrap_or(Value::None)));
                    Ok(())
                }),
        )
        .unwrap();

    let mut trace = Trace::default();
    let mut invoked = Vec::new();
    invoke_component(&registry, mixin, &mut trace, CallArgs::new().named("v", 7), &[leaf], &mut invoked)
        .unwrap();
    assert_eq!(trace.calls, ["Leaf(7)"]);
    assert_eq!(invoked, [mixin, leaf]);
    assert_ne!(mixin, ComponentId::ROOT);
}

#[test]
fn test_open_chain_drops_values_forwarded_past_its_end() {
    let mut registry = ComponentRegistry::new();
    let left = registry
        .register(
            ComponentDescriptor::new("Left")
                .with_extra_named()
                .delegating()
                .with_constructor(log("Left")),
        )
        .unwrap();

    let mut trace = Trace::default();
    let mut invoked = Vec::new();
    let err = invoke_component(&registry, left, &mut trace, CallArgs::new().named("x", 5), &[], &mut invoked)
        .unwrap_err();
    assert!(matches!(err, ConstructError::UnexpectedArgument { ref name, .. } if name == "x"));

    let mut trace = Trace::default();
    let mut invoked = Vec::new();
    invoke_open_chain(&registry, left, &mut trace, CallArgs::new().named("x", 5), &[], &mut invoked).unwrap();
    assert_eq!(trace.calls, ["Left"]);
    assert_eq!(invoked, [left]);
}
