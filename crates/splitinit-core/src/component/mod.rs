//! Component manifests.
//!
//! A component is described by:
//! - `Signature`: its ordered parameters and whether it takes extra named arguments
//! - `ComponentDescriptor`: signature, direct parents and forwarding behavior
//! - `Constructor`: the code run when the component is initialized

mod constructor;
mod descriptor;
mod signature;

#[cfg(test)]
mod tests;

pub use constructor::{
    invoke_component, invoke_detached, invoke_open_chain, Constructor, FnConstructor, Forward,
};
pub use descriptor::ComponentDescriptor;
pub use signature::{ParameterDescriptor, ParameterKind, Signature};
