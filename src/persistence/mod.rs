//! Persistence collaborators
//!
//! The engine does not define a storage backend. Saving goes through two
//! seams: a [`SnapshotStore`] that keeps serialized graphs as blobs, and a
//! [`MetadataRegistry`] that records what was saved. [`save_graph`] and
//! [`load_graph`] drive them against a [`GraphStore`].

pub mod memory;
pub mod snapshot;

pub use memory::{MemoryBlobStore, MemoryRegistry};
pub use snapshot::{GraphSnapshot, SnapshotMetadata, SNAPSHOT_VERSION};

use crate::graph::{GraphError, GraphStats, GraphStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Persistence errors
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Blob {0} not found")]
    BlobNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Invalid save request: {0}")]
    InvalidRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Receipt for a stored blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBlob {
    pub blob_id: String,
    /// Bytes stored
    pub size: usize,
    /// Unix milliseconds
    pub timestamp: i64,
}

/// Stores and retrieves serialized snapshots by blob id
pub trait SnapshotStore {
    fn store(&mut self, snapshot: &GraphSnapshot) -> PersistenceResult<StoredBlob>;
    fn load(&self, blob_id: &str) -> PersistenceResult<GraphSnapshot>;
}

/// What the registry learns about a saved graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphRecord {
    pub name: String,
    pub description: String,
    pub blob_id: String,
    pub node_count: usize,
    pub relationship_count: usize,
    pub is_public: bool,
    pub tags: Vec<String>,
}

/// Records graph metadata and returns a record id
pub trait MetadataRegistry {
    fn record_metadata(&mut self, record: GraphRecord) -> PersistenceResult<String>;
}

/// Caller-supplied description of a save
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SaveRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Tags from comma-separated text; blanks are dropped
    pub fn with_tag_list(mut self, tags: &str) -> Self {
        self.tags = tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGraph {
    pub blob: StoredBlob,
    pub record_id: String,
}

/// Snapshot the store into `blobs`, then record it in `registry`
pub fn save_graph<S, R>(
    store: &GraphStore,
    blobs: &mut S,
    registry: &mut R,
    request: SaveRequest,
) -> PersistenceResult<SavedGraph>
where
    S: SnapshotStore + ?Sized,
    R: MetadataRegistry + ?Sized,
{
    if request.name.trim().is_empty() {
        return Err(PersistenceError::InvalidRequest(
            "name must not be empty".to_string(),
        ));
    }

    let metadata = SnapshotMetadata::new(request.name.clone(), request.description.clone());
    let snapshot = GraphSnapshot::from_store(store, Some(metadata));
    let blob = blobs.store(&snapshot)?;

    let record_id = registry.record_metadata(GraphRecord {
        name: request.name,
        description: request.description,
        blob_id: blob.blob_id.clone(),
        node_count: snapshot.nodes.len(),
        relationship_count: snapshot.relationships.len(),
        is_public: request.is_public,
        tags: request.tags,
    })?;

    info!(
        blob_id = %blob.blob_id,
        record_id = %record_id,
        nodes = snapshot.nodes.len(),
        relationships = snapshot.relationships.len(),
        "graph saved"
    );
    Ok(SavedGraph { blob, record_id })
}

/// Replace the store contents with the snapshot stored under `blob_id`.
///
/// On any error the store is left unchanged.
pub fn load_graph<S>(store: &mut GraphStore, blobs: &S, blob_id: &str) -> PersistenceResult<GraphStats>
where
    S: SnapshotStore + ?Sized,
{
    let snapshot = blobs.load(blob_id)?;
    store.restore(snapshot.into_data())?;
    info!(blob_id, "graph loaded");
    Ok(store.get_graph_stats())
}
