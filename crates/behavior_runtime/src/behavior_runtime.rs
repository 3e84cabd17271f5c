//! Behavior Runtime - Registry, validation, evaluation and persistence
//!
//! This crate operates on the data structures from `behavior_types`:
//! it catalogs the available node kinds, checks assembled trees for
//! structural completeness, runs them against a trigger context, and
//! converts them to and from their persisted record form.

pub use behavior_types;

mod editor;
mod evaluator;
mod persist;
mod registry;
mod validator;

pub use editor::*;
pub use evaluator::*;
pub use persist::*;
pub use registry::*;
pub use validator::*;
