//! Shared sample node catalog for integration tests
//!
//! A minimal gameplay-flavored palette: one trigger, one effect with an
//! observable side-effect log, one computing parameter and one literal.

use std::sync::{Arc, Mutex};

use behavior_runtime::NodeRegistry;
use behavior_types::{
    EffectNode, Handle, LiteralNode, NodeKind, ParameterNode, RunContext, TriggerNode, Value,
    ValueType,
};

pub struct OnUse;

impl TriggerNode for OnUse {
    fn key(&self) -> &str {
        "OnUse"
    }
}

/// Heals the executing entity; records every invocation for assertions
#[derive(Default)]
pub struct Heal {
    pub calls: Mutex<Vec<Vec<Option<Value>>>>,
}

impl EffectNode for Heal {
    fn key(&self) -> &str {
        "Heal"
    }

    fn receives(&self) -> &[ValueType] {
        &[ValueType::Real]
    }

    fn apply(&self, args: Vec<Option<Value>>, _ctx: &RunContext) -> Option<Value> {
        self.calls.lock().unwrap().push(args);
        None
    }
}

pub struct Sum;

impl ParameterNode for Sum {
    fn key(&self) -> &str {
        "Sum"
    }

    fn return_type(&self) -> ValueType {
        ValueType::Real
    }

    fn receives(&self) -> &[ValueType] {
        &[ValueType::Real, ValueType::Real]
    }

    fn compute(&self, args: Vec<Option<Value>>, _ctx: &RunContext) -> Option<Value> {
        let a = args.first()?.as_ref()?.as_f64()?;
        let b = args.get(1)?.as_ref()?.as_f64()?;
        Some(Value::Real(a + b))
    }
}

pub struct NumberLiteral;

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

/// Registry over the whole sample catalog, sharing the given Heal
/// instance so tests can inspect its call log
pub fn sample_registry(heal: &Arc<Heal>) -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    registry.register_all([
        NodeKind::Trigger(Arc::new(OnUse)),
        NodeKind::Effect(Arc::clone(heal) as Arc<dyn EffectNode>),
        NodeKind::Parameter(Arc::new(Sum)),
        NodeKind::Literal(Arc::new(NumberLiteral)),
    ]);
    registry
}

pub fn run_ctx() -> RunContext {
    RunContext::new(Handle::new("entity"), Handle::new("item"))
}
