// Persistence - Convert function trees to and from their record form
//
// The record shape (Name/Value/Values) is the saved-state contract;
// resolving a record back into a tree needs the registry to map stable
// names to node kinds. An unresolvable name fails the whole load: a
// save written against a missing node catalog cannot be repaired.

use std::fs;
use std::path::Path;

use behavior_types::{FunctionTree, NodeId, NodeRecord};

use crate::NodeRegistry;

/// Errors from persisting or restoring a behavior
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("Tree is incomplete and cannot be persisted")]
    IncompleteTree,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid behavior file: {0}")]
    Format(#[from] serde_json::Error),
}

/// Serialize a tree into its record form
///
/// Returns `None` when the root slot was never filled; callers are
/// expected to gate saving on validation, so partially filled inner
/// slots serialize as null child entries rather than failing here.
pub fn serialize(tree: &FunctionTree) -> Option<NodeRecord> {
    serialize_node(tree, tree.root())
}

fn serialize_node(tree: &FunctionTree, id: NodeId) -> Option<NodeRecord> {
    let kind = tree.current(id)?;

    if kind.is_literal() {
        return Some(NodeRecord {
            name: kind.key().to_string(),
            value: tree.literal(id).cloned(),
            values: None,
        });
    }

    let children = tree.children(id);
    let values = if children.is_empty() {
        None
    } else {
        Some(
            children
                .iter()
                .map(|&child| serialize_node(tree, child))
                .collect(),
        )
    };

    Some(NodeRecord {
        name: kind.key().to_string(),
        value: None,
        values,
    })
}

/// Restore a tree from its record form, resolving names against the
/// registry
pub fn deserialize(
    registry: &NodeRegistry,
    record: &NodeRecord,
) -> Result<FunctionTree, PersistError> {
    let mut tree = FunctionTree::new();
    let root = tree.root();
    restore(registry, &mut tree, root, record)?;
    Ok(tree)
}

fn restore(
    registry: &NodeRegistry,
    tree: &mut FunctionTree,
    id: NodeId,
    record: &NodeRecord,
) -> Result<(), PersistError> {
    let Some(kind) = registry.lookup_by_name(&record.name) else {
        tracing::error!(name = %record.name, "No registered node kind for persisted name");
        return Err(PersistError::UnknownNodeType(record.name.clone()));
    };

    let is_literal = kind.is_literal();
    tree.place(id, kind);

    if is_literal {
        if let Some(value) = &record.value {
            tree.set_literal(id, value.clone());
        }
        return Ok(());
    }

    // A null or empty Values field leaves the node childless and
    // returns early, even when the kind declares an arity. Old saves
    // rely on this; such a tree loads but fails validation.
    let Some(children) = &record.values else {
        return Ok(());
    };

    for child in children {
        match child {
            Some(child_record) => {
                let child_id = tree.push_empty_child(id);
                restore(registry, tree, child_id, child_record)?;
            }
            // A slot saved mid-edit stays an unfilled slot.
            None => {
                tree.push_empty_child(id);
            }
        }
    }

    Ok(())
}

/// Serialize a tree and write it to a JSON file
pub fn save_to_file(path: impl AsRef<Path>, tree: &FunctionTree) -> Result<(), PersistError> {
    let record = serialize(tree).ok_or(PersistError::IncompleteTree)?;
    let json = serde_json::to_string_pretty(&record)?;
    fs::write(path.as_ref(), json)?;
    tracing::debug!(path = %path.as_ref().display(), "Saved behavior");
    Ok(())
}

/// Read a JSON file and restore the tree it holds
pub fn load_from_file(
    registry: &NodeRegistry,
    path: impl AsRef<Path>,
) -> Result<FunctionTree, PersistError> {
    let text = fs::read_to_string(path.as_ref())?;
    let record: NodeRecord = serde_json::from_str(&text)?;
    deserialize(registry, &record)
}
