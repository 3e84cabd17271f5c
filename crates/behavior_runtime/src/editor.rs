// Editor contract - The mutation surface the picker UI drives
//
// The inventory UI itself lives host-side; this module is the small
// contract it speaks: list the kinds that can fill a value slot, commit
// a pick into a slot, and learn which slot to open next.

use behavior_types::{FunctionTree, NodeId, NodeKind, ValueType};

use crate::NodeRegistry;

/// Outcome of committing a pick into a slot
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// The pick is terminal (a literal or an arity-0 kind); the edit
    /// for this slot is finished
    Complete,
    /// The pick opened fresh child slots; the picker should offer
    /// choices of `expected` for `first_slot` next
    Open {
        first_slot: NodeId,
        expected: ValueType,
    },
}

/// Kinds that can fill a value slot of the given type
pub fn choices_for(registry: &NodeRegistry, ty: &ValueType) -> Vec<NodeKind> {
    registry.query_by_return_type(ty)
}

/// The return type a slot requires, read off its parent's declaration
///
/// `None` for a root slot or when the parent declares nothing for that
/// position.
pub fn expected_type(tree: &FunctionTree, slot: NodeId) -> Option<ValueType> {
    let parent = tree.parent(slot)?;
    let position = tree.children(parent).iter().position(|&c| c == slot)?;
    tree.current(parent)?.receives().get(position).cloned()
}

/// Commit a pick: attach `kind` as the current value of `slot`
///
/// Child slots are reallocated to empty placeholders sized by the new
/// kind's arity; the result says whether the picker is done here or
/// which slot to drill into next.
pub fn choose(tree: &mut FunctionTree, slot: NodeId, kind: NodeKind) -> Placement {
    tracing::debug!(slot = %slot, key = kind.key(), "Committing pick");
    let first_expected = kind.receives().first().cloned();
    tree.assign(slot, kind);

    match first_expected {
        None => Placement::Complete,
        Some(expected) => Placement::Open {
            first_slot: tree.children(slot)[0],
            expected,
        },
    }
}
