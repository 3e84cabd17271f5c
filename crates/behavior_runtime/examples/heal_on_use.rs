//! Example: composing and running a heal-on-use behavior
//!
//! Registers a tiny node catalog, assembles the tree a player would
//! click together (OnUse → Heal(Amount = 5)), validates it, runs it,
//! and prints its persisted form.
//!
//! Usage: cargo run --example heal_on_use

use std::sync::Arc;

use behavior_runtime::{
    NodeRegistry, Placement, choices_for, choose, deserialize, evaluate, is_valid, serialize,
};
use behavior_types::{
    EffectNode, FunctionTree, Handle, LiteralNode, NodeKind, RunContext, TriggerNode, Value,
    ValueType,
};

struct OnUse;

impl TriggerNode for OnUse {
    fn key(&self) -> &str {
        "OnUse"
    }
}

struct Heal;

impl EffectNode for Heal {
    fn key(&self) -> &str {
        "Heal"
    }

    fn receives(&self) -> &[ValueType] {
        &[ValueType::Real]
    }

    fn apply(&self, args: Vec<Option<Value>>, ctx: &RunContext) -> Option<Value> {
        match args.first().and_then(|a| a.as_ref()).and_then(Value::as_f64) {
            Some(amount) => println!("  Healing {} by {}", ctx.executor.id, amount),
            None => println!("  Heal fired with no amount, skipping"),
        }
        None
    }
}

struct Amount;

impl LiteralNode for Amount {
    fn key(&self) -> &str {
        "Amount"
    }

    fn return_type(&self) -> ValueType {
        ValueType::Real
    }

    fn default_value(&self) -> Value {
        Value::Real(0.0)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("Behavior Composition Example");
    println!("============================\n");

    let mut registry = NodeRegistry::new();
    registry.register_all([
        NodeKind::Trigger(Arc::new(OnUse)),
        NodeKind::Effect(Arc::new(Heal)),
        NodeKind::Literal(Arc::new(Amount)),
    ]);
    println!("Registered {} node kind(s)\n", registry.len());

    // Assemble OnUse → Heal(Amount = 5) the way the picker would.
    let mut tree = FunctionTree::with_root(
        registry
            .lookup_by_name("OnUse")
            .ok_or("OnUse not registered")?,
    );
    let effect_slot = tree.push_empty_child(tree.root());

    let placement = choose(
        &mut tree,
        effect_slot,
        registry.lookup_by_name("Heal").ok_or("Heal not registered")?,
    );

    if let Placement::Open {
        first_slot,
        expected,
    } = placement
    {
        let choices = choices_for(&registry, &expected);
        println!(
            "Choices for a {} slot: {:?}",
            expected,
            choices.iter().map(NodeKind::key).collect::<Vec<_>>()
        );
        let pick = choices
            .into_iter()
            .find(|k| k.key() == "Amount")
            .ok_or("Amount not offered")?;
        choose(&mut tree, first_slot, pick);
        tree.set_literal(first_slot, Value::Real(5.0));
    }

    println!("\nAssembled tree:\n{}", tree);
    println!("Valid: {}\n", is_valid(&tree));

    println!("Triggering:");
    let ctx = RunContext::new(Handle::new("entity"), Handle::new("item"));
    evaluate(&tree, &ctx);

    let record = serialize(&tree).ok_or("tree is incomplete")?;
    println!("\nPersisted form:\n{}", serde_json::to_string_pretty(&record)?);

    let restored = deserialize(&registry, &record)?;
    println!("\nRestored tree is valid: {}", is_valid(&restored));

    Ok(())
}
