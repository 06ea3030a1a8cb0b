//! Typed records flowing through the pipeline.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! output and schema validation.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An entity that owns zero or more secondary records through its `id`.
///
/// Unknown fields in the source JSON are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PrimaryRecord {
    pub id: i64,
    pub name: String,
}

/// A record referring to a [`PrimaryRecord`] by id. No ownership is implied.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SecondaryRecord {
    pub foreign_key: i64,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl SecondaryRecord {
    #[must_use]
    pub const fn new(foreign_key: i64, attributes: Map<String, Value>) -> Self {
        Self {
            foreign_key,
            attributes,
        }
    }

    /// Look up one attribute by field name.
    #[must_use]
    pub fn attribute(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }
}

/// Per-owner category counts. Derived on every run and never mutated in place.
///
/// `counts_by_category` is a `BTreeMap` so serialized output is stable across
/// runs for identical input.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AggregateRecord {
    pub owner_name: String,
    pub counts_by_category: BTreeMap<String, u64>,
}

impl AggregateRecord {
    /// Count for one category, `0` when the category is unknown.
    #[must_use]
    pub fn count(&self, category: &str) -> u64 {
        self.counts_by_category.get(category).copied().unwrap_or(0)
    }

    /// Sum of all category counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts_by_category.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_ignores_extra_fields() {
        let record: PrimaryRecord = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Leanne Graham",
            "email": "Sincere@april.biz",
            "address": { "city": "Gwenborough" }
        }))
        .unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.name, "Leanne Graham");
    }

    #[test]
    fn aggregate_count_defaults_to_zero() {
        let record = AggregateRecord {
            owner_name: "Ervin Howell".into(),
            counts_by_category: BTreeMap::from([("completed".to_string(), 3)]),
        };
        assert_eq!(record.count("completed"), 3);
        assert_eq!(record.count("pending"), 0);
        assert_eq!(record.total(), 3);
    }
}
