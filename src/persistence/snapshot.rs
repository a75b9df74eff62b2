//! Serializable graph snapshots

use super::PersistenceResult;
use crate::graph::{GraphData, GraphStore, Node, Relationship};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Current snapshot layout version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Descriptive header stored alongside the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unix milliseconds
    pub created_at: i64,
    pub version: u32,
}

impl SnapshotMetadata {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
            version: SNAPSHOT_VERSION,
        }
    }
}

/// Nodes and relationships in store insertion order, plus optional metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub relationships: Vec<Relationship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SnapshotMetadata>,
}

impl GraphSnapshot {
    pub fn from_store(store: &GraphStore, metadata: Option<SnapshotMetadata>) -> Self {
        let GraphData {
            nodes,
            relationships,
        } = store.get_all_data();
        Self {
            nodes,
            relationships,
            metadata,
        }
    }

    pub fn into_data(self) -> GraphData {
        GraphData {
            nodes: self.nodes,
            relationships: self.relationships,
        }
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// SHA-256 of the compact JSON encoding, lower-case hex
    pub fn content_hash(&self) -> PersistenceResult<String> {
        Ok(hash_bytes(self.to_json()?.as_bytes()))
    }

    pub fn read_from(path: impl AsRef<Path>) -> PersistenceResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Write pretty-printed JSON
    pub fn write_to(&self, path: impl AsRef<Path>) -> PersistenceResult<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

pub(crate) fn hash_bytes(bytes: &[u8]) -> String {
    let hash = Sha256::digest(bytes);
    format!("{hash:x}")
}
