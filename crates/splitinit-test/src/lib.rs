//! Shared test fixtures for SplitInit crates.
//!
//! This crate only depends on `splitinit-core`, so the router can use it as
//! a dev-dependency without a cycle.
//!
//! - [`log`] - `CallLog`, an instance type that records constructor calls
//! - [`scenarios`] - ready-made composition graphs
//! - [`random`] - seeded random graphs and argument sets
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! splitinit-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use splitinit_test::scenarios::diamond;
//! use splitinit_test::CallLog;
//! ```

pub mod log;
pub mod random;
pub mod scenarios;

pub use log::{forwarding_recorder, recorder, Call, CallLog};
pub use scenarios::{diamond, extra_named_pair, mixin_pair, sibling_backfill};
