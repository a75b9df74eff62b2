//! Core type definitions for the graph engine

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node
///
/// Opaque to callers. Store-generated ids look like `node_<32 hex>`; ids that
/// arrive through [`GraphStore::restore`](super::GraphStore::restore) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    /// Fresh random id, collision-free for practical purposes
    pub fn generate() -> Self {
        NodeId(format!("node_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(id)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a relationship
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RelationshipId(String);

impl RelationshipId {
    pub fn new(id: impl Into<String>) -> Self {
        RelationshipId(id.into())
    }

    pub fn generate() -> Self {
        RelationshipId(format!("rel_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RelationshipId {
    fn from(id: String) -> Self {
        RelationshipId(id)
    }
}

impl From<&str> for RelationshipId {
    fn from(id: &str) -> Self {
        RelationshipId(id.to_string())
    }
}

impl AsRef<str> for RelationshipId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RelationshipId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
