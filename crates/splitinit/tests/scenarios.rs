//! End-to-end construction scenarios through the public facade.

use std::any::Any;

use splitinit::prelude::*;
use splitinit::{BoundArgs, Forward};
use splitinit_test::scenarios::{diamond, extra_named_pair, mixin_pair, sibling_backfill};
use splitinit_test::CallLog;

#[test]
fn test_extra_named_pair() {
    let pair = extra_named_pair();
    let router = Router::new(pair.registry);
    let mut log = CallLog::new();
    let args = CallArgs::new().named("a", 1).named("b", 2).named("extra_key", 9);
    let done = router
        .construct(pair.c, &mut log, args, &ConstructOptions::default())
        .unwrap();

    let a = log.call("A").unwrap();
    assert_eq!(a.values.len(), 1);
    assert_eq!(a.values["a"], Value::from(1));
    let b = log.call("B").unwrap();
    assert_eq!(b.values["b"], Value::from(2));
    assert_eq!(b.extra_named["extra_key"], Value::from(9));

    assert!(done.routing.undelivered().is_empty());
    assert!(done.diagnostics().is_empty());
}

#[test]
fn test_diamond_runs_base_once() {
    let d = diamond();
    let router = Router::new(d.registry);
    let mut log = CallLog::new();
    router
        .construct(d.top, &mut log, CallArgs::new().named("x", 5), &ConstructOptions::default())
        .unwrap();

    assert_eq!(log.count("Base"), 1);
    assert_eq!(log.count("Left"), 1);
    assert_eq!(log.count("Right"), 1);
}

#[test]
fn test_sibling_backfill() {
    let s = sibling_backfill();
    let router = Router::new(s.registry);
    let mut log = CallLog::new();
    let done = router
        .construct(
            s.l,
            &mut log,
            CallArgs::new().named("b", 2).named("k", 11),
            &ConstructOptions::default(),
        )
        .unwrap();

    assert_eq!(log.value("K", "b"), Some(&Value::from(2)));
    assert_eq!(log.value("B", "b"), Some(&Value::from(2)));
    assert!(done.leftovers().is_empty());
}

#[test]
fn test_sibling_fails_without_backfill() {
    let s = sibling_backfill();
    let router = Router::new(s.registry);
    let mut log = CallLog::new();
    let options = ConstructOptions::new().with_route(RouteOptions::new().with_backfill(false));
    let err = router
        .construct(s.l, &mut log, CallArgs::new().named("b", 2).named("k", 11), &options)
        .unwrap_err();

    assert_eq!(
        err,
        ConstructError::MissingRequiredParameter {
            component: "K".into(),
            parameter: "b".into()
        }
    );
}

#[test]
fn test_earlier_parent_wins() {
    let mut registry = ComponentRegistry::new();
    let p = registry
        .register(ComponentDescriptor::new("P").with_param(ParameterDescriptor::new("v")))
        .unwrap();
    let q = registry
        .register(ComponentDescriptor::new("Q").with_param(ParameterDescriptor::new("v")))
        .unwrap();
    let t = registry
        .register(ComponentDescriptor::new("T").with_parents([p, q]))
        .unwrap();

    let router = Router::new(registry);
    let routing = router.route(
        t,
        CallArgs::new().named("v", 1),
        &RouteOptions::new().with_backfill(false),
    );
    assert_eq!(routing.claimants("v"), [p]);
    assert!(!routing.assignment(q).unwrap().has("v"));
}

#[test]
fn test_leftovers_reach_catch_all() {
    let m = mixin_pair();
    let mut registry = m.registry.clone();
    let sink = registry
        .register(ComponentDescriptor::new("Sink").with_extra_named())
        .unwrap();
    let replay = registry
        .register(ComponentDescriptor::new("Replay").with_parent(sink))
        .unwrap();

    let router = Router::new(registry);
    let args = CallArgs::new().named("a1", "a").named("b1", "b").named("extra", 1).named("more", 2);
    let first = router.route(m.e, args, &RouteOptions::default());
    assert_eq!(first.leftovers.named.len(), 2);

    let second = router.route(replay, first.leftovers.clone(), &RouteOptions::default());
    assert!(second.undelivered().is_empty());
    assert_eq!(second.assignment(sink).unwrap().named, first.leftovers.named);
}

#[test]
fn test_wrong_instance_type() {
    let d = diamond();
    let router = Router::new(d.registry);
    let mut instance = String::new();
    let err = router
        .construct(d.top, &mut instance, CallArgs::new().named("x", 5), &ConstructOptions::default())
        .unwrap_err();

    assert!(matches!(err, ConstructError::InstanceType { ref component, .. } if component == "Left"));
}

#[derive(Debug, Default)]
struct Widget {
    x: i64,
    label: String,
    base_calls: usize,
    trail: Vec<&'static str>,
    leftovers: CallArgs,
}

impl HasLeftovers for Widget {
    fn set_leftovers(&mut self, leftovers: CallArgs) {
        self.leftovers = leftovers;
    }
}

fn pass_through(name: &'static str) -> ComponentDescriptor {
    ComponentDescriptor::new(name)
        .with_extra_named()
        .delegating()
        .with_constructor(move |w: &mut Widget, mut args: BoundArgs, next: Forward<'_>| {
            w.trail.push(name);
            next.forward(w as &mut dyn Any, CallArgs::from_named(args.take_extra_named()))
        })
}

/// `Base(x)`, `Left` / `Right` passing through to it, `Labeled(label="")`
/// and `Widget(Left, Right, Labeled, **kw)`.
fn widget_registry() -> (ComponentRegistry, ComponentId) {
    let mut registry = ComponentRegistry::new();
    let base = registry
        .register(
            ComponentDescriptor::new("Base")
                .with_param(ParameterDescriptor::new("x"))
                .with_constructor(|w: &mut Widget, args: BoundArgs, _next: Forward<'_>| {
                    w.base_calls += 1;
                    w.x = args.get("x").and_then(Value::as_i64).unwrap_or_default();
                    Ok(())
                }),
        )
        .unwrap();
    let left = registry.register(pass_through("Left").with_parent(base)).unwrap();
    let right = registry.register(pass_through("Right").with_parent(base)).unwrap();
    let labeled = registry
        .register(
            ComponentDescriptor::new("Labeled")
                .with_param(ParameterDescriptor::keyword_only("label").with_default(""))
                .with_constructor(|w: &mut Widget, args: BoundArgs, _next: Forward<'_>| {
                    w.label = args.get("label").and_then(Value::as_str).unwrap_or("").to_string();
                    Ok(())
                }),
        )
        .unwrap();
    let widget = registry
        .register(
            ComponentDescriptor::new("Widget")
                .with_extra_named()
                .with_parents([left, right, labeled]),
        )
        .unwrap();
    (registry, widget)
}

#[test]
fn test_typed_instance_construction() {
    let (registry, widget) = widget_registry();
    let (router, options) = splitinit::configure(registry, &RouterConfig::default()).unwrap();

    let mut w = Widget::default();
    let args = CallArgs::new().named("x", 5).named("label", "w").named("color", "red");
    let done = router.construct_into(widget, &mut w, args, &options).unwrap();

    assert_eq!(w.base_calls, 1);
    assert_eq!(w.x, 5);
    assert_eq!(w.label, "w");
    assert_eq!(w.trail, ["Left", "Right"]);
    assert_eq!(w.leftovers, CallArgs::new().named("color", "red"));
    assert_eq!(done.chains.len(), 2);
}

#[test]
fn test_configure_from_toml() {
    let (registry, widget) = widget_registry();
    let config = RouterConfig::from_toml_str(
        r#"
        stop_boundary = "Base"
        direct_fallback = true
        "#,
    )
    .unwrap();
    let (router, options) = splitinit::configure(registry, &config).unwrap();
    assert!(options.direct_fallback);

    let routing = router.route(widget, CallArgs::new().named("x", 5), &options.route);
    assert_eq!(routing.leftovers, CallArgs::new().named("x", 5));

    // Base lies past the stop, so `x` is only broadcast into the pass-throughs.
    assert!(routing.claimants("x").is_empty());
    assert!(routing.undelivered().is_empty());
    assert!(routing.diagnostics.is_empty());
}

#[test]
fn test_configure_rejects_unknown_stop() {
    let (registry, _) = widget_registry();
    let config = RouterConfig::new().with_stop_boundary("Missing");
    let err = splitinit::configure(registry, &config).unwrap_err();
    assert!(matches!(err, splitinit::SplitInitError::Config(_)));
}
