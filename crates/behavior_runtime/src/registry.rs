// Node Registry - Catalog of available node kinds
//
// Populated once during startup registration and read-only afterwards.
// The registry is an explicit value passed to whoever needs lookups
// (tree building and deserialization); validation and evaluation never
// touch it.

use std::collections::HashMap;
use std::sync::Arc;

use behavior_types::{
    EffectNode, LiteralNode, NodeKind, ParameterNode, TriggerNode, ValueType,
};

/// Registry of all available node kinds, split by capability family
#[derive(Default)]
pub struct NodeRegistry {
    triggers: HashMap<String, Arc<dyn TriggerNode>>,
    effects: HashMap<String, Arc<dyn EffectNode>>,
    parameters: HashMap<String, Arc<dyn ParameterNode>>,
    literals: HashMap<String, Arc<dyn LiteralNode>>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node kind into its family map, keyed by its stable
    /// identifier
    ///
    /// A duplicate key silently overwrites the previous registration;
    /// keys are expected to be unique by construction.
    pub fn register(&mut self, kind: NodeKind) {
        let key = kind.key().to_string();
        let replaced = match kind {
            NodeKind::Trigger(n) => self.triggers.insert(key.clone(), n).is_some(),
            NodeKind::Effect(n) => self.effects.insert(key.clone(), n).is_some(),
            NodeKind::Parameter(n) => self.parameters.insert(key.clone(), n).is_some(),
            NodeKind::Literal(n) => self.literals.insert(key.clone(), n).is_some(),
        };
        if replaced {
            tracing::warn!(key = %key, "Node kind re-registered, previous entry replaced");
        } else {
            tracing::debug!(key = %key, "Registered node kind");
        }
    }

    /// Register several node kinds at once
    pub fn register_all(&mut self, kinds: impl IntoIterator<Item = NodeKind>) {
        for kind in kinds {
            self.register(kind);
        }
    }

    /// Resolve a stable identifier back to its kind, searching all four
    /// family maps
    pub fn lookup_by_name(&self, name: &str) -> Option<NodeKind> {
        if let Some(n) = self.triggers.get(name) {
            return Some(NodeKind::Trigger(Arc::clone(n)));
        }
        if let Some(n) = self.effects.get(name) {
            return Some(NodeKind::Effect(Arc::clone(n)));
        }
        if let Some(n) = self.parameters.get(name) {
            return Some(NodeKind::Parameter(Arc::clone(n)));
        }
        if let Some(n) = self.literals.get(name) {
            return Some(NodeKind::Literal(Arc::clone(n)));
        }
        None
    }

    /// All parameter and literal kinds whose return type equals the
    /// given one
    ///
    /// Feeds the picker's choice list for a value slot. No ordering
    /// guarantee beyond map iteration.
    pub fn query_by_return_type(&self, ty: &ValueType) -> Vec<NodeKind> {
        let params = self
            .parameters
            .values()
            .filter(|n| n.return_type() == *ty)
            .map(|n| NodeKind::Parameter(Arc::clone(n)));
        let literals = self
            .literals
            .values()
            .filter(|n| n.return_type() == *ty)
            .map(|n| NodeKind::Literal(Arc::clone(n)));
        params.chain(literals).collect()
    }

    /// Copy of the trigger family map
    pub fn triggers(&self) -> HashMap<String, Arc<dyn TriggerNode>> {
        self.triggers.clone()
    }

    /// Copy of the effect family map
    pub fn effects(&self) -> HashMap<String, Arc<dyn EffectNode>> {
        self.effects.clone()
    }

    /// Copy of the parameter family map
    pub fn parameters(&self) -> HashMap<String, Arc<dyn ParameterNode>> {
        self.parameters.clone()
    }

    /// Copy of the literal family map
    pub fn literals(&self) -> HashMap<String, Arc<dyn LiteralNode>> {
        self.literals.clone()
    }

    /// Check if a kind is registered under the given name
    pub fn contains(&self, name: &str) -> bool {
        self.lookup_by_name(name).is_some()
    }

    /// Total number of registered kinds
    pub fn len(&self) -> usize {
        self.triggers.len() + self.effects.len() + self.parameters.len() + self.literals.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
