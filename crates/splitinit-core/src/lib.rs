//! SplitInit Core - Core types for routing construction arguments
//!
//! This crate provides the data model shared by the router:
//! - Values and call arguments
//! - Parameter, signature and component descriptors (explicit manifests)
//! - The component registry with its integer-indexed composition graph
//! - Argument binding and cooperative forwarding

pub mod args;
pub mod component;
pub mod error;
pub mod registry;
pub mod value;

pub use args::{bind, BoundArgs, CallArgs, HasLeftovers};
pub use component::{
    invoke_component, invoke_detached, invoke_open_chain, ComponentDescriptor, Constructor, FnConstructor, Forward, ParameterDescriptor, ParameterKind,
    Signature,
};
pub use error::{ConstructError, RegistryError, Result, SplitInitError};
pub use registry::{ComponentId, ComponentRegistry};
pub use value::{Value, ValueKind};
