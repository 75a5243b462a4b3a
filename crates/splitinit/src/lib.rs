//! SplitInit - constructor-argument routing for multi-parent components
//!
//! Declare components with their parents and constructor signatures, then
//! construct a composite from one flat set of arguments: each ancestor
//! constructor gets the values meant for it, shared ancestors run once,
//! and whatever nobody claimed comes back as leftovers.
//!
//! # Example
//!
//! ```rust
//! use splitinit::prelude::*;
//!
//! let mut registry = ComponentRegistry::new();
//! let a = registry
//!     .register(ComponentDescriptor::new("A").with_param(ParameterDescriptor::new("a")))
//!     .unwrap();
//! let b = registry
//!     .register(ComponentDescriptor::new("B").with_param(ParameterDescriptor::new("b")))
//!     .unwrap();
//! let c = registry
//!     .register(ComponentDescriptor::new("C").with_parents([a, b]))
//!     .unwrap();
//!
//! let router = Router::new(registry);
//! let routing = router.route(
//!     c,
//!     CallArgs::new().named("a", 1).named("b", 2).named("z", 3),
//!     &RouteOptions::default(),
//! );
//! assert_eq!(routing.claimants("a"), [a]);
//! assert_eq!(routing.leftovers, CallArgs::new().named("z", 3));
//! ```

// Value model and registry
pub use splitinit_core::{
    bind, BoundArgs, CallArgs, ComponentDescriptor, ComponentId, ComponentRegistry,
    ConstructError, Constructor, FnConstructor, Forward, HasLeftovers, ParameterDescriptor,
    ParameterKind, RegistryError, Result, Signature, SplitInitError, Value, ValueKind,
};

// Configuration
pub use splitinit_config::{ConfigError, LogConfig, RouterConfig};

// Routing and construction
pub use splitinit_router::{
    Chain, ChainEnd, ClaimKey, ClaimPass, Construction, ConstructOptions, CopySource,
    RouteOptions, Router, Routing, RoutingDiagnostic, SignatureCache, SplitAssignment,
};

/// Lower-level routing passes, for callers composing their own pipeline.
pub mod passes {
    pub use splitinit_router::split::{backfill, broadcast, heuristic, primary};
    pub use splitinit_router::{chain, graph, inspect, invoke};
}

mod setup;
pub use setup::configure;

pub mod prelude {
    pub use super::{
        CallArgs, ComponentDescriptor, ComponentId, ComponentRegistry, ConstructError,
        HasLeftovers, ParameterDescriptor, Signature, Value, ValueKind,
    };
    pub use super::{ConstructOptions, RouteOptions, Router, RouterConfig};
    pub use super::configure;
}
