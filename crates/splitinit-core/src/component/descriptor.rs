//! Component descriptor.

use std::fmt;
use std::sync::Arc;

use super::{Constructor, FnConstructor, Forward, ParameterDescriptor, Signature};
use crate::args::BoundArgs;
use crate::error::ConstructError;
use crate::registry::ComponentId;

/// The declared manifest of a composable component.
///
/// Replaces runtime reflection: the signature, the direct parents and the
/// forwarding behavior are all stated up front at registration time.
#[derive(Clone)]
pub struct ComponentDescriptor {
    /// Name of the component (unique within a registry).
    pub name: Arc<str>,
    /// Constructor signature. `None` marks an opaque component whose
    /// signature cannot be inspected.
    pub signature: Option<Signature>,
    /// Direct parents in declared order. Empty means the universal root.
    pub parents: Vec<ComponentId>,
    /// Whether the constructor always forwards remaining named arguments
    /// to the next component of its cooperative chain.
    pub delegates_forward: bool,
    /// Named keys the constructor reads out of its extra named bag.
    pub consumes_keys: Vec<Arc<str>>,
    /// The constructor, if any.
    pub constructor: Option<Arc<dyn Constructor>>,
}

impl ComponentDescriptor {
    /// Creates a component with an empty signature and no parents.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        ComponentDescriptor {
            name: name.into(),
            signature: Some(Signature::new()),
            parents: Vec::new(),
            delegates_forward: false,
            consumes_keys: Vec::new(),
            constructor: None,
        }
    }

    /// Creates a component whose signature is unknown.
    pub fn opaque(name: impl Into<Arc<str>>) -> Self {
        ComponentDescriptor {
            signature: None,
            ..Self::new(name)
        }
    }

    /// Replaces the signature.
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Adds a parameter to the signature.
    pub fn with_param(mut self, parameter: ParameterDescriptor) -> Self {
        self.signature
            .get_or_insert_with(Signature::new)
            .parameters
            .push(parameter);
        self
    }

    /// Marks the signature as accepting extra named arguments.
    pub fn with_extra_named(mut self) -> Self {
        self.signature
            .get_or_insert_with(Signature::new)
            .accepts_extra_named = true;
        self
    }

    /// Appends a direct parent.
    pub fn with_parent(mut self, parent: ComponentId) -> Self {
        self.parents.push(parent);
        self
    }

    /// Appends several direct parents, keeping their order.
    pub fn with_parents(mut self, parents: impl IntoIterator<Item = ComponentId>) -> Self {
        self.parents.extend(parents);
        self
    }

    /// Marks the component as forwarding to the next chain member.
    pub fn delegating(mut self) -> Self {
        self.delegates_forward = true;
        self
    }

    /// Declares a key the constructor reads from its extra named bag.
    pub fn consumes(mut self, key: impl Into<Arc<str>>) -> Self {
        self.consumes_keys.push(key.into());
        self
    }

    /// Sets a typed constructor closure.
    pub fn with_constructor<T, F>(mut self, f: F) -> Self
    where
        T: 'static,
        F: Fn(&mut T, BoundArgs, Forward<'_>) -> Result<(), ConstructError> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(FnConstructor::new(self.name.clone(), f)));
        self
    }

    /// Sets a constructor implementation.
    pub fn with_constructor_impl(mut self, constructor: Arc<dyn Constructor>) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Returns true if the signature cannot be inspected.
    pub fn is_opaque(&self) -> bool {
        self.signature.is_none()
    }

    /// Returns true if the component accepts extra named arguments.
    pub fn accepts_extra_named(&self) -> bool {
        self.signature
            .as_ref()
            .is_some_and(|s| s.accepts_extra_named)
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("parents", &self.parents)
            .field("delegates_forward", &self.delegates_forward)
            .field("consumes_keys", &self.consumes_keys)
            .field("has_constructor", &self.constructor.is_some())
            .finish()
    }
}
