//! SplitInit Router - constructor-argument routing for multi-parent components
//!
//! Given a component composed from several parents, the router decides
//! which of one flat set of positional and named arguments each ancestor
//! constructor receives, then runs those constructors so that every shared
//! ancestor is invoked exactly once.
//!
//! # Pipeline
//!
//! 1. [`inspect`] - signatures of the components, cached per registry
//! 2. [`graph`] - direct parents and their ancestor chains
//! 3. [`split`] - primary, heuristic, broadcast and backfill passes
//! 4. [`chain`] - cooperative chains over the linearized ancestors
//! 5. [`invoke`] - one invocation per chain head
//!
//! # Example
//!
//! ```
//! use splitinit_core::{CallArgs, ComponentDescriptor, ComponentRegistry, ParameterDescriptor};
//! use splitinit_router::{RouteOptions, Router};
//!
//! let mut registry = ComponentRegistry::new();
//! let a = registry
//!     .register(ComponentDescriptor::new("A").with_param(ParameterDescriptor::new("a")))
//!     .unwrap();
//! let b = registry
//!     .register(
//!         ComponentDescriptor::new("B")
//!             .with_param(ParameterDescriptor::new("b"))
//!             .with_extra_named(),
//!     )
//!     .unwrap();
//! let c = registry
//!     .register(ComponentDescriptor::new("C").with_parents([a, b]))
//!     .unwrap();
//!
//! let router = Router::new(registry);
//! let routing = router.route(
//!     c,
//!     CallArgs::new().named("a", 1).named("b", 2).named("extra_key", 9),
//!     &RouteOptions::default(),
//! );
//! assert_eq!(routing.assignment(a).unwrap().named.len(), 1);
//! assert_eq!(routing.assignment(b).unwrap().named.len(), 2);
//! assert!(routing.undelivered().is_empty());
//! ```

pub mod chain;
pub mod graph;
pub mod inspect;
pub mod invoke;
pub mod options;
pub mod router;
pub mod split;


pub use chain::{segment, Chain, ChainEnd, Segmentation};
pub use graph::{ancestor_chain, direct_parents, linearized_ancestors, Branch, CompositionGraph};
pub use inspect::{inspect, SignatureCache};
pub use invoke::invoke_chains;
pub use options::{ConstructOptions, RouteOptions};
pub use router::{Construction, Router};
pub use split::{
    Claim, ClaimKey, ClaimPass, CopySource, Copied, Routing, RoutingDiagnostic, SplitAssignment,
};
