//! Constructors and cooperative forwarding.
//!
//! A component's constructor receives its bound arguments and a [`Forward`]
//! handle. Components that delegate forward hand their remaining named
//! arguments to the handle, which binds and runs the next member of the
//! cooperative chain. The router only ever calls chain heads; everything
//! after the head is reached through forwarding.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{trace, warn};

use crate::args::{bind, BoundArgs, CallArgs};
use crate::component::Signature;
use crate::error::ConstructError;
use crate::registry::{ComponentId, ComponentRegistry};

/// Trait for component constructors.
///
/// The instance is type-erased so one registry can hold constructors for
/// any instance type; see [`FnConstructor`] for the typed adapter.
pub trait Constructor: Send + Sync {
    /// Initializes `instance` from `args`, forwarding through `next` if the
    /// component delegates to the rest of its chain.
    fn construct(
        &self,
        instance: &mut dyn Any,
        args: BoundArgs,
        next: Forward<'_>,
    ) -> Result<(), ConstructError>;
}

/// A constructor backed by a closure over a concrete instance type.
///
/// # Type Parameters
/// * `T` - The instance type
/// * `F` - The closure type
pub struct FnConstructor<T, F> {
    component: Arc<str>,
    f: F,
    _instance: PhantomData<fn(&mut T)>,
}

impl<T, F> FnConstructor<T, F>
where
    T: 'static,
    F: Fn(&mut T, BoundArgs, Forward<'_>) -> Result<(), ConstructError> + Send + Sync,
{
    /// Creates a new typed constructor for `component`.
    pub fn new(component: Arc<str>, f: F) -> Self {
        Self {
            component,
            f,
            _instance: PhantomData,
        }
    }
}

impl<T, F> Constructor for FnConstructor<T, F>
where
    T: 'static,
    F: Fn(&mut T, BoundArgs, Forward<'_>) -> Result<(), ConstructError> + Send + Sync,
{
    fn construct(
        &self,
        instance: &mut dyn Any,
        args: BoundArgs,
        next: Forward<'_>,
    ) -> Result<(), ConstructError> {
        let Some(instance) = instance.downcast_mut::<T>() else {
            return Err(ConstructError::InstanceType {
                component: self.component.to_string(),
                expected: std::any::type_name::<T>(),
            });
        };
        (self.f)(instance, args, next)
    }
}

/// Handle for reaching the next member of a cooperative chain.
pub struct Forward<'a> {
    registry: &'a ComponentRegistry,
    rest: &'a [ComponentId],
    invoked: &'a mut Vec<ComponentId>,
    detached: bool,
    open_end: bool,
}

impl<'a> Forward<'a> {
    /// Creates a handle whose next members are `rest`, in order.
    pub fn new(
        registry: &'a ComponentRegistry,
        rest: &'a [ComponentId],
        invoked: &'a mut Vec<ComponentId>,
    ) -> Self {
        Self {
            registry,
            rest,
            invoked,
            detached: false,
            open_end: false,
        }
    }

    /// Like [`new`](Self::new), but values forwarded past the last member
    /// are dropped with a warning instead of rejected.
    ///
    /// Used for chains cut short by a stop boundary.
    pub fn open_ended(
        registry: &'a ComponentRegistry,
        rest: &'a [ComponentId],
        invoked: &'a mut Vec<ComponentId>,
    ) -> Self {
        Self {
            open_end: true,
            ..Self::new(registry, rest, invoked)
        }
    }

    /// Creates a handle that drops forwarded arguments.
    ///
    /// Used for direct, non-cooperative invocation where the caller reaches
    /// every component itself.
    pub fn detached(registry: &'a ComponentRegistry, invoked: &'a mut Vec<ComponentId>) -> Self {
        Self {
            registry,
            rest: &[],
            invoked,
            detached: true,
            open_end: false,
        }
    }

    /// The component a call to [`forward`](Self::forward) would reach.
    pub fn next_component(&self) -> Option<ComponentId> {
        if self.detached {
            None
        } else {
            self.rest.first().copied()
        }
    }

    /// Forwards `args` to the next chain member.
    ///
    /// Past the end of the chain only empty arguments are accepted, exactly
    /// like forwarding into the universal root, unless the handle is
    /// [open-ended](Self::open_ended).
    pub fn forward(self, instance: &mut dyn Any, args: CallArgs) -> Result<(), ConstructError> {
        if self.detached {
            trace!(event = "forward_suppressed", dropped = args.named.len());
            return Ok(());
        }
        match self.rest.split_first() {
            Some((&next, rest)) => {
                invoke_member(self.registry, next, instance, args, rest, self.open_end, self.invoked)
            }
            None if self.open_end => {
                if !args.is_empty() {
                    warn!(
                        event = "forward_dropped",
                        category = "invoke",
                        positional = args.positional.len(),
                        keys = ?args.named.keys().collect::<Vec<_>>(),
                    );
                }
                Ok(())
            }
            None => reject_past_chain_end(self.registry, args),
        }
    }
}

fn reject_past_chain_end(registry: &ComponentRegistry, args: CallArgs) -> Result<(), ConstructError> {
    let component = registry.name(ComponentId::ROOT).to_string();
    if !args.positional.is_empty() {
        return Err(ConstructError::TooManyPositional {
            component,
            expected: 0,
            given: args.positional.len(),
        });
    }
    match args.named.into_keys().next() {
        Some(name) => Err(ConstructError::UnexpectedArgument { component, name }),
        None => Ok(()),
    }
}

/// Binds `args` for component `id` and runs its constructor.
///
/// `rest` lists the chain members after `id`; a component without a
/// constructor forwards its extra named arguments if it delegates and
/// otherwise only validates its arguments.
pub fn invoke_component(
    registry: &ComponentRegistry,
    id: ComponentId,
    instance: &mut dyn Any,
    args: CallArgs,
    rest: &[ComponentId],
    invoked: &mut Vec<ComponentId>,
) -> Result<(), ConstructError> {
    invoke_member(registry, id, instance, args, rest, false, invoked)
}

/// Like [`invoke_component`] for a chain that ends before reaching a
/// component that stops forwarding: whatever the last member forwards is
/// dropped with a warning.
pub fn invoke_open_chain(
    registry: &ComponentRegistry,
    id: ComponentId,
    instance: &mut dyn Any,
    args: CallArgs,
    rest: &[ComponentId],
    invoked: &mut Vec<ComponentId>,
) -> Result<(), ConstructError> {
    invoke_member(registry, id, instance, args, rest, true, invoked)
}

fn invoke_member(
    registry: &ComponentRegistry,
    id: ComponentId,
    instance: &mut dyn Any,
    args: CallArgs,
    rest: &[ComponentId],
    open_end: bool,
    invoked: &mut Vec<ComponentId>,
) -> Result<(), ConstructError> {
    let descriptor = registry.descriptor(id);
    let opaque = Signature::opaque();
    let signature = descriptor.signature.as_ref().unwrap_or(&opaque);
    let mut bound = bind(&descriptor.name, signature, args)?;

    trace!(event = "construct", component = %descriptor.name, chain_rest = rest.len());
    invoked.push(id);
    let next = if open_end {
        Forward::open_ended(registry, rest, invoked)
    } else {
        Forward::new(registry, rest, invoked)
    };
    match &descriptor.constructor {
        Some(constructor) => constructor.construct(instance, bound, next),
        None if descriptor.delegates_forward => {
            next.forward(instance, CallArgs::from_named(bound.take_extra_named()))
        }
        None => Ok(()),
    }
}

/// Like [`invoke_component`] but with forwarding suppressed.
pub fn invoke_detached(
    registry: &ComponentRegistry,
    id: ComponentId,
    instance: &mut dyn Any,
    args: CallArgs,
    invoked: &mut Vec<ComponentId>,
) -> Result<(), ConstructError> {
    let descriptor = registry.descriptor(id);
    let opaque = Signature::opaque();
    let signature = descriptor.signature.as_ref().unwrap_or(&opaque);
    let bound = bind(&descriptor.name, signature, args)?;

    trace!(event = "construct_detached", component = %descriptor.name);
    invoked.push(id);
    match &descriptor.constructor {
        Some(constructor) => {
            constructor.construct(instance, bound, Forward::detached(registry, invoked))
        }
        None => Ok(()),
    }
}
