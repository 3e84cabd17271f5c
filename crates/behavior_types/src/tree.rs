//! Function tree - the per-behavior tree a user assembles
//!
//! Nodes live in an arena owned by the tree; children hold owning
//! indices and `parent` is a plain back-index used only for upward
//! navigation, so the up/down links can never form an ownership cycle.
//! An unassigned slot is a node whose `current` is `None`; it is a
//! legal editing state but never valid for execution or persistence.

use crate::{NodeKind, Value};

// ─────────────────────────────────────────────────────────────────────────────
// Node Id
// ─────────────────────────────────────────────────────────────────────────────

/// Index of a node within one [`FunctionTree`] arena
///
/// Identity is index equality; two structurally identical nodes in the
/// same tree are still distinct. Ids are only meaningful for the tree
/// that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tree Node
// ─────────────────────────────────────────────────────────────────────────────

/// One slot in the arena
#[derive(Debug, Clone)]
struct TreeNode {
    /// The chosen node kind, or `None` for a placeholder awaiting a pick
    current: Option<NodeKind>,
    /// Literal payload, present only when `current` is a literal kind
    literal: Option<Value>,
    /// Ordered child slots
    children: Vec<NodeId>,
    /// Back-index for upward navigation only
    parent: Option<NodeId>,
}

impl TreeNode {
    fn empty(parent: Option<NodeId>) -> Self {
        Self {
            current: None,
            literal: None,
            children: Vec::new(),
            parent,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Function Tree
// ─────────────────────────────────────────────────────────────────────────────

/// A single-rooted tree of node picks representing one behavior
///
/// Replaced subtrees stay allocated in the arena until the whole tree
/// is dropped; they become unreachable from the root and are ignored by
/// every walk.
#[derive(Debug, Clone)]
pub struct FunctionTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
}

impl Default for FunctionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionTree {
    /// Create a tree with a single empty root slot
    pub fn new() -> Self {
        Self {
            nodes: vec![TreeNode::empty(None)],
            root: NodeId(0),
        }
    }

    /// Create a tree rooted at the given kind, with empty child slots
    /// sized by its arity
    pub fn with_root(kind: NodeKind) -> Self {
        let mut tree = Self::new();
        tree.assign(tree.root, kind);
        tree
    }

    /// The root slot
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of slots ever allocated, including replaced ones
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0]
    }

    /// The kind chosen for a slot, if any
    pub fn current(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).current.as_ref()
    }

    /// Whether a slot is still awaiting a pick
    pub fn is_empty_slot(&self, id: NodeId) -> bool {
        self.node(id).current.is_none()
    }

    /// Ordered child slots of a node
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Parent of a node, or `None` for the root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Literal payload stored on a node, if any
    pub fn literal(&self, id: NodeId) -> Option<&Value> {
        self.node(id).literal.as_ref()
    }

    /// Assign a kind to a slot, replacing whatever was there
    ///
    /// Old children are detached (they stay in the arena but become
    /// unreachable). Non-literal kinds get `arity` fresh empty child
    /// slots; literal kinds get their default payload and no children.
    pub fn assign(&mut self, id: NodeId, kind: NodeKind) {
        self.node_mut(id).children.clear();
        self.node_mut(id).literal = match &kind {
            NodeKind::Literal(lit) => Some(lit.default_value()),
            _ => None,
        };

        let arity = kind.arity();
        self.node_mut(id).current = Some(kind);
        for _ in 0..arity {
            let child = self.push_empty(Some(id));
            self.node_mut(id).children.push(child);
        }
    }

    /// Replace the literal payload of a slot
    ///
    /// Returns `false` (and changes nothing) when the slot does not
    /// hold a literal kind.
    pub fn set_literal(&mut self, id: NodeId, value: Value) -> bool {
        match self.node(id).current {
            Some(NodeKind::Literal(_)) => {
                self.node_mut(id).literal = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Set a slot's kind without allocating placeholder children
    ///
    /// Raw counterpart of [`FunctionTree::assign`], used when restoring
    /// a persisted tree whose children arrive explicitly (or, for an
    /// old save, not at all).
    pub fn place(&mut self, id: NodeId, kind: NodeKind) {
        self.node_mut(id).children.clear();
        self.node_mut(id).literal = match &kind {
            NodeKind::Literal(lit) => Some(lit.default_value()),
            _ => None,
        };
        self.node_mut(id).current = Some(kind);
    }

    /// Append a child slot holding the given kind, without allocating
    /// placeholder grandchildren
    ///
    /// This is the raw growth operation persistence restores trees
    /// with; interactive editing goes through [`FunctionTree::assign`].
    pub fn push_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let literal = match &kind {
            NodeKind::Literal(lit) => Some(lit.default_value()),
            _ => None,
        };
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            current: Some(kind),
            literal,
            children: Vec::new(),
            parent: Some(parent),
        });
        self.node_mut(parent).children.push(id);
        id
    }

    /// Append an empty child slot
    pub fn push_empty_child(&mut self, parent: NodeId) -> NodeId {
        let id = self.push_empty(Some(parent));
        self.node_mut(parent).children.push(id);
        id
    }

    fn push_empty(&mut self, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode::empty(parent));
        id
    }

    /// Walk parent links from a node to the top and return that node
    ///
    /// The picker may start editing from any slot; this recovers the
    /// tree's root unambiguously.
    pub fn father(&self, id: NodeId) -> NodeId {
        let mut cursor = id;
        while let Some(parent) = self.node(cursor).parent {
            cursor = parent;
        }
        cursor
    }

    /// Depth-first membership test: is `target` at or below `ancestor`?
    ///
    /// Matches by slot identity, never by structural equality.
    pub fn contains(&self, ancestor: NodeId, target: NodeId) -> bool {
        if ancestor == target {
            return true;
        }
        self.node(ancestor)
            .children
            .iter()
            .any(|&child| self.contains(child, target))
    }
}

impl std::fmt::Display for FunctionTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn render(
            tree: &FunctionTree,
            id: NodeId,
            depth: usize,
            f: &mut std::fmt::Formatter<'_>,
        ) -> std::fmt::Result {
            let key = tree.current(id).map(NodeKind::key).unwrap_or("<empty>");
            writeln!(f, "{}- {}", "  ".repeat(depth), key)?;
            for &child in tree.children(id) {
                render(tree, child, depth + 1, f)?;
            }
            Ok(())
        }
        render(self, self.root, 0, f)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
