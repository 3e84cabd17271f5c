//! Node capability model
//!
//! Every building block a user can pick is a node kind: a trigger that
//! starts execution, an effect that acts on the world, a parameter that
//! computes a value from sub-values, or a literal leaf. A kind is a
//! stateless singleton shared across every tree that references it; the
//! only per-tree state (a literal's payload) lives on the tree node.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Handle, Value};

// ─────────────────────────────────────────────────────────────────────────────
// Value Types
// ─────────────────────────────────────────────────────────────────────────────

/// Semantic types a node can declare as its return type or expect from
/// a child slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "PascalCase")]
pub enum ValueType {
    /// Boolean value
    Boolean,
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Real,
    /// UTF-8 string
    Text,
    /// Handle to a living entity in the host world
    Entity,
    /// Handle to an item the behavior is bound to
    Item,
    /// List of a specific element type
    List { element: Box<ValueType> },
}

impl ValueType {
    /// Create a list type
    pub fn list(element: ValueType) -> Self {
        ValueType::List {
            element: Box::new(element),
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Boolean => write!(f, "Boolean"),
            ValueType::Integer => write!(f, "Integer"),
            ValueType::Real => write!(f, "Real"),
            ValueType::Text => write!(f, "Text"),
            ValueType::Entity => write!(f, "Entity"),
            ValueType::Item => write!(f, "Item"),
            ValueType::List { element } => write!(f, "List<{}>", element),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Run Context
// ─────────────────────────────────────────────────────────────────────────────

/// Context a trigger fires with: who executed the behavior and which
/// item it is bound to
#[derive(Debug, Clone)]
pub struct RunContext {
    /// The entity the behavior runs on behalf of
    pub executor: Handle,
    /// The item the behavior is attached to
    pub item: Handle,
}

impl RunContext {
    /// Create a new run context
    pub fn new(executor: Handle, item: Handle) -> Self {
        Self { executor, item }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Node Behavior Traits
// ─────────────────────────────────────────────────────────────────────────────

/// A node kind that starts execution of everything beneath it
pub trait TriggerNode: Send + Sync {
    /// Stable identifier, unique across the registry
    fn key(&self) -> &str;
}

/// A node kind that performs a side effect, consuming child values
pub trait EffectNode: Send + Sync {
    /// Stable identifier, unique across the registry
    fn key(&self) -> &str;

    /// Types of the child values this effect consumes, in slot order
    fn receives(&self) -> &[ValueType];

    /// Perform the effect. Arguments are positional; a slot left empty
    /// in the tree arrives as `None` and the implementation must
    /// tolerate it.
    fn apply(&self, args: Vec<Option<Value>>, ctx: &RunContext) -> Option<Value>;
}

/// A node kind that computes a value from child values
pub trait ParameterNode: Send + Sync {
    /// Stable identifier, unique across the registry
    fn key(&self) -> &str;

    /// The type this parameter produces
    fn return_type(&self) -> ValueType;

    /// Types of the child values this parameter consumes, in slot order
    fn receives(&self) -> &[ValueType];

    /// Compute the value. Arguments are positional; empty slots arrive
    /// as `None`.
    fn compute(&self, args: Vec<Option<Value>>, ctx: &RunContext) -> Option<Value>;
}

/// A terminal node kind whose value is stored directly on the tree node
pub trait LiteralNode: Send + Sync {
    /// Stable identifier, unique across the registry
    fn key(&self) -> &str;

    /// The type this literal produces
    fn return_type(&self) -> ValueType;

    /// Payload a freshly placed node of this kind starts with
    fn default_value(&self) -> Value;
}

// ─────────────────────────────────────────────────────────────────────────────
// Node Kind
// ─────────────────────────────────────────────────────────────────────────────

/// A node kind instance: one of the four capability families
///
/// This is the closed taxonomy every placement and dispatch decision
/// matches on. Instances are cheap to clone (`Arc` per variant).
#[derive(Clone)]
pub enum NodeKind {
    /// Starts execution; sits at the root, never under a parent
    Trigger(Arc<dyn TriggerNode>),
    /// Acts on the world; consumes child values, returns nothing upward
    Effect(Arc<dyn EffectNode>),
    /// Computes a value from child values and returns it upward
    Parameter(Arc<dyn ParameterNode>),
    /// Stores a raw value directly; always a leaf
    Literal(Arc<dyn LiteralNode>),
}

impl NodeKind {
    /// Stable identifier of the underlying kind
    pub fn key(&self) -> &str {
        match self {
            NodeKind::Trigger(n) => n.key(),
            NodeKind::Effect(n) => n.key(),
            NodeKind::Parameter(n) => n.key(),
            NodeKind::Literal(n) => n.key(),
        }
    }

    /// The type this kind produces when evaluated, if any
    pub fn return_type(&self) -> Option<ValueType> {
        match self {
            NodeKind::Trigger(_) | NodeKind::Effect(_) => None,
            NodeKind::Parameter(n) => Some(n.return_type()),
            NodeKind::Literal(n) => Some(n.return_type()),
        }
    }

    /// Declared child slot types, in order
    pub fn receives(&self) -> &[ValueType] {
        match self {
            NodeKind::Trigger(_) | NodeKind::Literal(_) => &[],
            NodeKind::Effect(n) => n.receives(),
            NodeKind::Parameter(n) => n.receives(),
        }
    }

    /// Number of child slots this kind requires
    pub fn arity(&self) -> usize {
        self.receives().len()
    }

    /// Whether this kind requires child value slots
    pub fn consumes_values(&self) -> bool {
        self.arity() > 0
    }

    /// Whether this kind's result must feed an enclosing consumer
    pub fn returns_upward(&self) -> bool {
        matches!(self, NodeKind::Parameter(_) | NodeKind::Literal(_))
    }

    /// Whether this kind starts execution
    pub fn is_trigger(&self) -> bool {
        matches!(self, NodeKind::Trigger(_))
    }

    /// Whether this kind stores its value directly
    pub fn is_literal(&self) -> bool {
        matches!(self, NodeKind::Literal(_))
    }
}

impl std::fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let family = match self {
            NodeKind::Trigger(_) => "Trigger",
            NodeKind::Effect(_) => "Effect",
            NodeKind::Parameter(_) => "Parameter",
            NodeKind::Literal(_) => "Literal",
        };
        write!(f, "{}({})", family, self.key())
    }
}
