//! Relationship implementation for property graph
//!
//! Relationships are directed and typed. Several relationships may join the
//! same pair of nodes, and a relationship may start and end at one node.

use super::property::{PropertyMap, PropertyValue};
use super::types::{NodeId, RelationshipId};
use serde::{Deserialize, Serialize};

/// Property key that feeds [`Relationship::weight`]
pub const WEIGHT_PROPERTY: &str = "weight";

/// A directed relationship in the property graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Unique identifier for this relationship
    pub id: RelationshipId,

    /// Type of relationship (e.g., "KNOWS", "WORKS_AT")
    #[serde(rename = "type")]
    pub rel_type: String,

    /// Source node (relationship goes FROM this node)
    pub source_id: NodeId,

    /// Target node (relationship goes TO this node)
    pub target_id: NodeId,

    /// Properties associated with this relationship
    #[serde(default)]
    pub properties: PropertyMap,

    /// Optional analytics weight; absent means 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl Relationship {
    /// Create a new relationship stamped with `now`.
    ///
    /// A numeric `weight` property initialises [`Relationship::weight`].
    pub fn new(
        id: RelationshipId,
        rel_type: impl Into<String>,
        source_id: NodeId,
        target_id: NodeId,
        properties: PropertyMap,
        now: i64,
    ) -> Self {
        let weight = properties.get(WEIGHT_PROPERTY).and_then(PropertyValue::as_number);
        Relationship {
            id,
            rel_type: rel_type.into(),
            source_id,
            target_id,
            properties,
            weight,
            created_at: now,
            updated_at: now,
        }
    }

    /// Weight used by analytics
    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }

    pub fn is_type(&self, rel_type: &str) -> bool {
        self.rel_type == rel_type
    }

    /// Set a property value. Writing a numeric `weight` also updates the weight.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
        now: i64,
    ) -> Option<PropertyValue> {
        let key = key.into();
        let value = value.into();
        if key == WEIGHT_PROPERTY {
            if let Some(w) = value.as_number() {
                self.weight = Some(w);
            }
        }
        let old = self.properties.insert(key, value);
        self.touch(now);
        old
    }

    pub fn set_weight(&mut self, weight: Option<f64>, now: i64) {
        self.weight = weight;
        self.touch(now);
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Check if property exists
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Check if this relationship connects two specific nodes (in either direction)
    pub fn connects(&self, node1: &str, node2: &str) -> bool {
        (self.source_id.as_str() == node1 && self.target_id.as_str() == node2)
            || (self.source_id.as_str() == node2 && self.target_id.as_str() == node1)
    }

    /// Check if this relationship touches a node at either end
    pub fn touches(&self, node: &str) -> bool {
        self.source_id.as_str() == node || self.target_id.as_str() == node
    }

    pub fn is_self_loop(&self) -> bool {
        self.source_id == self.target_id
    }

    fn touch(&mut self, now: i64) {
        self.updated_at = self.updated_at.max(now);
    }
}
