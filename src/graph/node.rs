//! Graph nodes

use super::property::{PropertyMap, PropertyValue};
use super::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A typed vertex with a property bag.
///
/// `id` is assigned by the store and never changes. `node_type` is what MATCH
/// filters and statistics group on; `labels` are extra tags that take no part
/// in either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,

    /// Primary classification, e.g. "Person"
    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(default)]
    pub properties: PropertyMap,

    #[serde(default)]
    pub labels: BTreeSet<String>,

    /// Unix milliseconds
    pub created_at: i64,
    /// Unix milliseconds, never earlier than `created_at`
    pub updated_at: i64,
}

impl Node {
    /// Create a new node stamped with `now`
    pub fn new(id: NodeId, node_type: impl Into<String>, properties: PropertyMap, now: i64) -> Self {
        Node {
            id,
            node_type: node_type.into(),
            properties,
            labels: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the node's primary type matches
    pub fn is_type(&self, node_type: &str) -> bool {
        self.node_type == node_type
    }

    /// Returns false when the label was already present
    pub fn add_label(&mut self, label: impl Into<String>, now: i64) -> bool {
        let added = self.labels.insert(label.into());
        if added {
            self.touch(now);
        }
        added
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Insert or overwrite, returning the previous value
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
        now: i64,
    ) -> Option<PropertyValue> {
        let old = self.properties.insert(key.into(), value.into());
        self.touch(now);
        old
    }

    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn remove_property(&mut self, key: &str, now: i64) -> Option<PropertyValue> {
        let removed = self.properties.shift_remove(key);
        if removed.is_some() {
            self.touch(now);
        }
        removed
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    fn touch(&mut self, now: i64) {
        self.updated_at = self.updated_at.max(now);
    }
}
