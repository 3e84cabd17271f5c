//! Behavior Types - Core data structures for composed item behaviors
//!
//! This crate contains the pure data structures of the behavior system:
//! the node capability model, the runtime value type, the function tree
//! a user assembles, and the persisted record shape. It has no runtime
//! dependencies; the registry, validator, evaluator and persistence
//! live in `behavior_runtime`.

mod document;
mod node;
mod tree;
mod value;

pub use document::*;
pub use node::*;
pub use tree::*;
pub use value::*;
