//! In-process collaborators for tests and the CLI

use super::snapshot::{hash_bytes, GraphSnapshot};
use super::{GraphRecord, MetadataRegistry, PersistenceError, PersistenceResult, SnapshotStore, StoredBlob};
use indexmap::IndexMap;
use tracing::debug;

/// Content-addressed blob store: the blob id is the SHA-256 of the bytes
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    blobs: IndexMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn contains(&self, blob_id: &str) -> bool {
        self.blobs.contains_key(blob_id)
    }
}

impl SnapshotStore for MemoryBlobStore {
    fn store(&mut self, snapshot: &GraphSnapshot) -> PersistenceResult<StoredBlob> {
        let json = snapshot.to_json()?;
        let blob_id = hash_bytes(json.as_bytes());
        let size = json.len();
        debug!(blob_id = %blob_id, size, "stored blob");
        self.blobs.insert(blob_id.clone(), json);
        Ok(StoredBlob {
            blob_id,
            size,
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }

    fn load(&self, blob_id: &str) -> PersistenceResult<GraphSnapshot> {
        let json = self
            .blobs
            .get(blob_id)
            .ok_or_else(|| PersistenceError::BlobNotFound(blob_id.to_string()))?;
        GraphSnapshot::from_json(json)
    }
}

/// Registry that keeps records in memory, numbered from 1
#[derive(Debug, Default, Clone)]
pub struct MemoryRegistry {
    records: IndexMap<String, GraphRecord>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, record_id: &str) -> Option<&GraphRecord> {
        self.records.get(record_id)
    }

    pub fn records(&self) -> impl Iterator<Item = (&str, &GraphRecord)> {
        self.records.iter().map(|(id, r)| (id.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MetadataRegistry for MemoryRegistry {
    fn record_metadata(&mut self, record: GraphRecord) -> PersistenceResult<String> {
        let record_id = format!("record_{}", self.records.len() + 1);
        self.records.insert(record_id.clone(), record);
        Ok(record_id)
    }
}
