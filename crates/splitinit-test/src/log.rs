//! Recording instance type.

use std::any::Any;
use std::collections::BTreeMap;

use splitinit_core::{BoundArgs, CallArgs, ConstructError, Forward, HasLeftovers, Value};

/// One recorded constructor call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub component: String,
    /// Declared parameter values, defaults included.
    pub values: BTreeMap<String, Value>,
    pub extra_named: BTreeMap<String, Value>,
}

/// Instance that records every constructor run on it.
#[derive(Debug, Default)]
pub struct CallLog {
    pub calls: Vec<Call>,
    pub leftovers: Option<CallArgs>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls to `component`.
    pub fn count(&self, component: &str) -> usize {
        self.calls.iter().filter(|c| c.component == component).count()
    }

    /// First call to `component`.
    pub fn call(&self, component: &str) -> Option<&Call> {
        self.calls.iter().find(|c| c.component == component)
    }

    /// Value `component` received for `name`, declared or extra.
    pub fn value(&self, component: &str, name: &str) -> Option<&Value> {
        let call = self.call(component)?;
        call.values.get(name).or_else(|| call.extra_named.get(name))
    }

    /// Components in call order.
    pub fn order(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.component.as_str()).collect()
    }

    fn push(&mut self, component: &str, args: &BoundArgs) {
        self.calls.push(Call {
            component: component.to_string(),
            values: args.values().clone(),
            extra_named: args.extra_named().clone(),
        });
    }
}

impl HasLeftovers for CallLog {
    fn set_leftovers(&mut self, leftovers: CallArgs) {
        self.leftovers = Some(leftovers);
    }
}

/// A constructor that records its call and does nothing else.
pub fn recorder(
    name: impl Into<String>,
) -> impl Fn(&mut CallLog, BoundArgs, Forward<'_>) -> Result<(), ConstructError> + Send + Sync + 'static {
    let name = name.into();
    move |log: &mut CallLog, args: BoundArgs, _next: Forward<'_>| {
        log.push(&name, &args);
        Ok(())
    }
}

/// A constructor that records its call, then forwards its extra named
/// values to the next chain member.
pub fn forwarding_recorder(
    name: impl Into<String>,
) -> impl Fn(&mut CallLog, BoundArgs, Forward<'_>) -> Result<(), ConstructError> + Send + Sync + 'static {
    let name = name.into();
    move |log: &mut CallLog, mut args: BoundArgs, next: Forward<'_>| {
        log.push(&name, &args);
        let rest = args.take_extra_named();
        next.forward(log as &mut dyn Any, CallArgs::from_named(rest))
    }
}
