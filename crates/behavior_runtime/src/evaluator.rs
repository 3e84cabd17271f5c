// Evaluator - Recursive bottom-up execution of a function tree
//
// Children evaluate strictly before their parent, left to right. The
// lenient mode mirrors the editor's best-effort behavior: a half-built
// tree runs without error and missing slots propagate as absent
// values. Strict mode refuses to run anything the validator rejects.

use behavior_types::{FunctionTree, NodeId, NodeKind, RunContext, Value};

use crate::validator::is_valid;

/// How evaluation treats structurally incomplete trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvalMode {
    /// Run whatever is there; unfilled slots yield absent values that
    /// flow into consumer argument lists as `None`
    #[default]
    Lenient,
    /// Refuse to run unless the tree passes validation
    Strict,
}

/// Errors from strict evaluation
#[derive(Debug, Clone, thiserror::Error)]
pub enum EvalError {
    #[error("Tree is structurally incomplete")]
    InvalidTree,
}

/// Evaluate a tree leniently against a trigger context
///
/// Incomplete trees are not an error here; they produce absent values.
pub fn evaluate(tree: &FunctionTree, ctx: &RunContext) -> Option<Value> {
    eval_node(tree, tree.root(), ctx)
}

/// Evaluate a tree, refusing to run if it fails validation
pub fn evaluate_strict(tree: &FunctionTree, ctx: &RunContext) -> Result<Option<Value>, EvalError> {
    if !is_valid(tree) {
        tracing::debug!("Strict evaluation rejected an incomplete tree");
        return Err(EvalError::InvalidTree);
    }
    Ok(eval_node(tree, tree.root(), ctx))
}

/// Evaluate a tree in the given mode
pub fn evaluate_in(
    tree: &FunctionTree,
    ctx: &RunContext,
    mode: EvalMode,
) -> Result<Option<Value>, EvalError> {
    match mode {
        EvalMode::Lenient => Ok(evaluate(tree, ctx)),
        EvalMode::Strict => evaluate_strict(tree, ctx),
    }
}

fn eval_node(tree: &FunctionTree, id: NodeId, ctx: &RunContext) -> Option<Value> {
    let Some(kind) = tree.current(id) else {
        // Unfilled slot: nothing to run, nothing to return.
        return None;
    };

    match kind {
        NodeKind::Trigger(_) => {
            // Triggers fan out to their children for effects only and
            // never produce a value themselves.
            for &child in tree.children(id) {
                let _ = eval_node(tree, child, ctx);
            }
            None
        }
        NodeKind::Effect(effect) => {
            let args = collect_args(tree, id, effect.receives().len(), ctx);
            effect.apply(args, ctx)
        }
        other => {
            if tree.children(id).is_empty() {
                // Literals short-circuit to their payload before any
                // producer dispatch; any other childless node is dead
                // or incomplete and yields nothing.
                return match other {
                    NodeKind::Literal(_) => tree.literal(id).cloned(),
                    _ => None,
                };
            }
            match other {
                NodeKind::Parameter(param) => {
                    let args = collect_args(tree, id, param.receives().len(), ctx);
                    param.compute(args, ctx)
                }
                _ => None,
            }
        }
    }
}

// Arguments are positional and sized by the declared arity; a missing
// or unfilled slot contributes `None`.
fn collect_args(
    tree: &FunctionTree,
    id: NodeId,
    arity: usize,
    ctx: &RunContext,
) -> Vec<Option<Value>> {
    (0..arity)
        .map(|i| {
            tree.children(id)
                .get(i)
                .copied()
                .and_then(|child| eval_node(tree, child, ctx))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use behavior_types::{
        EffectNode, Handle, LiteralNode, NodeKind, ParameterNode, TriggerNode, ValueType,
    };

    use super::*;

    fn ctx() -> RunContext {
        RunContext::new(Handle::new("entity"), Handle::new("item"))
    }

    struct OnUse;
    impl TriggerNode for OnUse {
        fn key(&self) -> &str {
            "OnUse"
        }
    }

    #[derive(Default)]
    struct RecordingEffect {
        calls: Mutex<Vec<Vec<Option<Value>>>>,
    }
    impl EffectNode for RecordingEffect {
        fn key(&self) -> &str {
            "Recording"
        }
        fn receives(&self) -> &[ValueType] {
            &[ValueType::Real]
        }
        fn apply(&self, args: Vec<Option<Value>>, _ctx: &RunContext) -> Option<Value> {
            self.calls.lock().unwrap().push(args);
            None
        }
    }

    struct NumberLiteral;
    impl LiteralNode for NumberLiteral {
        fn key(&self) -> &str {
            "NumberLiteral"
        }
        fn return_type(&self) -> ValueType {
            ValueType::Real
        }
        fn default_value(&self) -> Value {
            Value::Real(0.0)
        }
    }

    struct Doubled;
    impl ParameterNode for Doubled {
        fn key(&self) -> &str {
            "Doubled"
        }
        fn return_type(&self) -> ValueType {
            ValueType::Real
        }
        fn receives(&self) -> &[ValueType] {
            &[ValueType::Real]
        }
        fn compute(&self, args: Vec<Option<Value>>, _ctx: &RunContext) -> Option<Value> {
            let v = args.first()?.as_ref()?.as_f64()?;
            Some(Value::Real(v * 2.0))
        }
    }

    #[test]
    fn test_empty_tree_is_a_noop() {
        let tree = FunctionTree::new();
        assert_eq!(evaluate(&tree, &ctx()), None);
    }

    #[test]
    fn test_literal_short_circuits_to_payload() {
        let mut tree = FunctionTree::with_root(NodeKind::Literal(Arc::new(NumberLiteral)));
        tree.set_literal(tree.root(), Value::Real(5.0));
        assert_eq!(evaluate(&tree, &ctx()), Some(Value::Real(5.0)));
    }

    #[test]
    fn test_parameter_computes_from_children() {
        let mut tree = FunctionTree::with_root(NodeKind::Parameter(Arc::new(Doubled)));
        let slot = tree.children(tree.root())[0];
        tree.assign(slot, NodeKind::Literal(Arc::new(NumberLiteral)));
        tree.set_literal(slot, Value::Real(21.0));

        assert_eq!(evaluate(&tree, &ctx()), Some(Value::Real(42.0)));
    }

    #[test]
    fn test_trigger_runs_children_and_returns_nothing() {
        let effect = Arc::new(RecordingEffect::default());
        let mut tree = FunctionTree::with_root(NodeKind::Trigger(Arc::new(OnUse)));
        let child = tree.push_empty_child(tree.root());
        tree.assign(child, NodeKind::Effect(Arc::clone(&effect) as Arc<dyn EffectNode>));
        let slot = tree.children(child)[0];
        tree.assign(slot, NodeKind::Literal(Arc::new(NumberLiteral)));
        tree.set_literal(slot, Value::Real(5.0));

        assert_eq!(evaluate(&tree, &ctx()), None);
        let calls = effect.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[vec![Some(Value::Real(5.0))]]);
    }

    #[test]
    fn test_unfilled_slot_becomes_absent_argument() {
        let effect = Arc::new(RecordingEffect::default());
        let tree =
            FunctionTree::with_root(NodeKind::Effect(Arc::clone(&effect) as Arc<dyn EffectNode>));
        // The single slot stays empty; lenient evaluation still runs.

        assert_eq!(evaluate(&tree, &ctx()), None);
        let calls = effect.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[vec![None]]);
        drop(calls);

        // Strict mode refuses the same tree.
        assert!(matches!(
            evaluate_strict(&tree, &ctx()),
            Err(EvalError::InvalidTree)
        ));
    }

    #[test]
    fn test_sibling_order_is_left_to_right() {
        struct Probe {
            tag: f64,
            log: Arc<Mutex<Vec<f64>>>,
        }
        impl ParameterNode for Probe {
            fn key(&self) -> &str {
                "Probe"
            }
            fn return_type(&self) -> ValueType {
                ValueType::Real
            }
            fn receives(&self) -> &[ValueType] {
                &[ValueType::Real]
            }
            fn compute(&self, _args: Vec<Option<Value>>, _ctx: &RunContext) -> Option<Value> {
                self.log.lock().unwrap().push(self.tag);
                Some(Value::Real(self.tag))
            }
        }

        struct TwoSlot;
        impl EffectNode for TwoSlot {
            fn key(&self) -> &str {
                "TwoSlot"
            }
            fn receives(&self) -> &[ValueType] {
                &[ValueType::Real, ValueType::Real]
            }
            fn apply(&self, _args: Vec<Option<Value>>, _ctx: &RunContext) -> Option<Value> {
                None
            }
        }

        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tree = FunctionTree::with_root(NodeKind::Effect(Arc::new(TwoSlot)));
        let slots: Vec<_> = tree.children(tree.root()).to_vec();
        for (i, &slot) in slots.iter().enumerate() {
            tree.assign(
                slot,
                NodeKind::Parameter(Arc::new(Probe {
                    tag: i as f64,
                    log: Arc::clone(&log),
                })),
            );
            let leaf = tree.children(slot)[0];
            tree.assign(leaf, NodeKind::Literal(Arc::new(NumberLiteral)));
        }

        evaluate(&tree, &ctx());
        assert_eq!(log.lock().unwrap().as_slice(), &[0.0, 1.0]);
    }
}
