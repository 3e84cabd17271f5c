// Validator - Structural completeness check for function trees
//
// Pure and side-effect free. Validation is two-sided on purpose: a
// consumer's arity is checked from below and a returner's placement is
// checked from above, because a tree may be inspected starting from any
// node, not only the root.

use behavior_types::{FunctionTree, NodeId};

/// Check a whole tree for structural validity, starting at its root
pub fn is_valid(tree: &FunctionTree) -> bool {
    validate_from(tree, tree.root())
}

/// Check the tree starting from an arbitrary node
///
/// An unfilled slot anywhere below (or an illegal placement of the
/// start node itself) invalidates the result.
pub fn validate_from(tree: &FunctionTree, id: NodeId) -> bool {
    let Some(kind) = tree.current(id) else {
        // A slot still awaiting a pick is never valid for execution.
        return false;
    };

    if kind.is_trigger() {
        // Triggers sit at the top; anything above them is illegal.
        if tree.parent(id).is_some() {
            return false;
        }
        let children = tree.children(id);
        if children.iter().any(|&c| tree.is_empty_slot(c)) {
            return false;
        }
        return children.iter().all(|&c| validate_from(tree, c));
    }

    if kind.consumes_values() {
        let children = tree.children(id);
        if children.is_empty()
            || children.len() != kind.arity()
            || children.iter().any(|&c| tree.is_empty_slot(c))
        {
            return false;
        }
    }

    if kind.returns_upward() {
        let parent_consumes = tree
            .parent(id)
            .and_then(|p| tree.current(p))
            .is_some_and(|p| p.consumes_values());
        if !parent_consumes {
            return false;
        }
    }

    tree.children(id).iter().all(|&c| validate_from(tree, c))
}
