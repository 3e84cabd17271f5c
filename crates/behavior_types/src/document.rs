//! Persisted record shape for function trees
//!
//! Every tree node persists as one record keyed by the node kind's
//! stable name. The field names `Name`, `Value` and `Values` are part
//! of the saved-state contract: previously saved behaviors must keep
//! loading, so they are pinned here and must never change.

use serde::{Deserialize, Serialize};

use crate::Value;

/// One persisted tree node
///
/// A literal node carries `Value` (its payload); every other node
/// carries `Values` (its ordered children), which is null or absent
/// when there are none. A child slot that was never filled persists as
/// a null element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Stable identifier of the node kind, resolved against the
    /// registry on load
    #[serde(rename = "Name")]
    pub name: String,
    /// Literal payload
    #[serde(rename = "Value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Ordered child records
    #[serde(rename = "Values", default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Option<NodeRecord>>>,
}

impl NodeRecord {
    /// Record for a literal node
    pub fn literal(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            values: None,
        }
    }

    /// Record for a childless non-literal node
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            values: None,
        }
    }

    /// Record for a node with children
    pub fn branch(name: impl Into<String>, children: Vec<Option<NodeRecord>>) -> Self {
        Self {
            name: name.into(),
            value: None,
            values: Some(children),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_are_pinned() {
        let record = NodeRecord::branch(
            "OnUse",
            vec![Some(NodeRecord::branch(
                "Heal",
                vec![Some(NodeRecord::literal("NumberLiteral", Value::Real(5.0)))],
            ))],
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Name"], "OnUse");
        assert_eq!(json["Values"][0]["Name"], "Heal");
        assert_eq!(json["Values"][0]["Values"][0]["Name"], "NumberLiteral");
        assert_eq!(json["Values"][0]["Values"][0]["Value"], 5.0);
    }

    #[test]
    fn test_missing_values_field_deserializes_as_none() {
        let record: NodeRecord = serde_json::from_str(r#"{"Name": "OnUse"}"#).unwrap();
        assert_eq!(record.name, "OnUse");
        assert_eq!(record.values, None);
        assert_eq!(record.value, None);
    }

    #[test]
    fn test_null_values_field_deserializes_as_none() {
        let record: NodeRecord =
            serde_json::from_str(r#"{"Name": "Heal", "Values": null}"#).unwrap();
        assert_eq!(record.values, None);
    }

    #[test]
    fn test_null_child_slot_survives_roundtrip() {
        let record = NodeRecord::branch("Heal", vec![None]);
        let json = serde_json::to_string(&record).unwrap();
        let back: NodeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
