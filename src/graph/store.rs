//! In-memory graph storage implementation
//!
//! The store is the sole owner of node and relationship identity. Nodes and
//! relationships live in insertion-ordered maps; adjacency lists give
//! O(degree) access to incident relationships for deletes and analytics.

use super::node::Node;
use super::property::{PropertyMap, PropertyValue};
use super::relationship::Relationship;
use super::stats::GraphStats;
use super::types::{NodeId, RelationshipId};
use crate::config::{DeletePolicy, StoreConfig};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Relationship {0} not found")]
    RelationshipNotFound(RelationshipId),

    #[error("Invalid relationship: source node {0} does not exist")]
    InvalidRelationshipSource(NodeId),

    #[error("Invalid relationship: target node {0} does not exist")]
    InvalidRelationshipTarget(NodeId),

    #[error("Node {id} still has {count} incident relationship(s)")]
    NodeHasRelationships { id: NodeId, count: usize },

    #[error("Self-loop relationships are not allowed (node {0})")]
    SelfLoopRejected(NodeId),

    #[error("Type must not be empty")]
    EmptyType,

    #[error("Node {0} already exists")]
    DuplicateNodeId(NodeId),

    #[error("Relationship {0} already exists")]
    DuplicateRelationshipId(RelationshipId),
}

impl GraphError {
    /// An operation named an id that is not live in the store
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            GraphError::NodeNotFound(_)
                | GraphError::RelationshipNotFound(_)
                | GraphError::InvalidRelationshipSource(_)
                | GraphError::InvalidRelationshipTarget(_)
        )
    }

    /// A store rule refused an otherwise well-formed operation
    pub fn is_constraint_error(&self) -> bool {
        matches!(
            self,
            GraphError::NodeHasRelationships { .. } | GraphError::SelfLoopRejected(_)
        )
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Detached copy of the store contents, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<Node>,
    pub relationships: Vec<Relationship>,
}

impl GraphData {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }
}

#[derive(Debug, Default, Clone)]
struct Adjacency {
    outgoing: Vec<RelationshipId>,
    incoming: Vec<RelationshipId>,
}

/// In-memory graph storage
///
/// - nodes: NodeId -> Node (insertion ordered)
/// - relationships: RelationshipId -> Relationship (insertion ordered)
/// - adjacency: NodeId -> outgoing / incoming relationship ids
///
/// Every node has an adjacency entry, and every relationship id appears in
/// exactly its source's outgoing list and its target's incoming list.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: IndexMap<NodeId, Node>,
    relationships: IndexMap<RelationshipId, Relationship>,
    adjacency: FxHashMap<NodeId, Adjacency>,
    config: StoreConfig,
    /// Highest timestamp handed out so far
    last_timestamp: i64,
}

impl GraphStore {
    /// Create a new empty graph store with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        GraphStore {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current wall clock in Unix milliseconds, never below a previous reading
    fn now(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis().max(self.last_timestamp);
        self.last_timestamp = now;
        now
    }

    /// Create a node with a fresh id
    pub fn create_node(
        &mut self,
        node_type: impl Into<String>,
        properties: PropertyMap,
    ) -> GraphResult<NodeId> {
        self.create_node_with_labels(node_type, Vec::<String>::new(), properties)
    }

    /// Create a node carrying auxiliary labels besides its primary type
    pub fn create_node_with_labels<L: Into<String>>(
        &mut self,
        node_type: impl Into<String>,
        labels: impl IntoIterator<Item = L>,
        properties: PropertyMap,
    ) -> GraphResult<NodeId> {
        let node_type = node_type.into();
        if node_type.is_empty() {
            return Err(GraphError::EmptyType);
        }

        let mut id = NodeId::generate();
        while self.nodes.contains_key(&id) {
            id = NodeId::generate();
        }

        let now = self.now();
        let mut node = Node::new(id.clone(), node_type, properties, now);
        for label in labels {
            node.add_label(label, now);
        }

        debug!(node_id = %id, node_type = %node.node_type, "created node");
        self.adjacency.insert(id.clone(), Adjacency::default());
        self.nodes.insert(id.clone(), node);
        Ok(id)
    }

    /// Create a directed relationship between two live nodes
    pub fn create_relationship(
        &mut self,
        rel_type: impl Into<String>,
        source: impl AsRef<str>,
        target: impl AsRef<str>,
        properties: PropertyMap,
    ) -> GraphResult<RelationshipId> {
        let rel_type = rel_type.into();
        if rel_type.is_empty() {
            return Err(GraphError::EmptyType);
        }
        let source_id = self.live_node_id(source.as_ref())
            .ok_or_else(|| GraphError::InvalidRelationshipSource(NodeId::new(source.as_ref())))?;
        let target_id = self.live_node_id(target.as_ref())
            .ok_or_else(|| GraphError::InvalidRelationshipTarget(NodeId::new(target.as_ref())))?;

        if source_id == target_id && !self.config.allow_self_loops {
            return Err(GraphError::SelfLoopRejected(source_id));
        }

        let mut id = RelationshipId::generate();
        while self.relationships.contains_key(&id) {
            id = RelationshipId::generate();
        }

        let now = self.now();
        let rel = Relationship::new(id.clone(), rel_type, source_id, target_id, properties, now);
        debug!(
            rel_id = %id,
            rel_type = %rel.rel_type,
            source = %rel.source_id,
            target = %rel.target_id,
            "created relationship"
        );
        self.link(&rel);
        self.relationships.insert(id.clone(), rel);
        Ok(id)
    }

    fn live_node_id(&self, id: &str) -> Option<NodeId> {
        self.nodes.get_key_value(id).map(|(k, _)| k.clone())
    }

    fn link(&mut self, rel: &Relationship) {
        self.adjacency
            .entry(rel.source_id.clone())
            .or_default()
            .outgoing
            .push(rel.id.clone());
        self.adjacency
            .entry(rel.target_id.clone())
            .or_default()
            .incoming
            .push(rel.id.clone());
    }

    fn unlink(&mut self, rel: &Relationship) {
        if let Some(adj) = self.adjacency.get_mut(&rel.source_id) {
            adj.outgoing.retain(|r| r != &rel.id);
        }
        if let Some(adj) = self.adjacency.get_mut(&rel.target_id) {
            adj.incoming.retain(|r| r != &rel.id);
        }
    }

    pub fn get_node(&self, id: impl AsRef<str>) -> Option<&Node> {
        self.nodes.get(id.as_ref())
    }

    pub fn get_relationship(&self, id: impl AsRef<str>) -> Option<&Relationship> {
        self.relationships.get(id.as_ref())
    }

    pub fn has_node(&self, id: impl AsRef<str>) -> bool {
        self.nodes.contains_key(id.as_ref())
    }

    pub fn has_relationship(&self, id: impl AsRef<str>) -> bool {
        self.relationships.contains_key(id.as_ref())
    }

    /// Set a property on a node, returning the previous value
    pub fn set_node_property(
        &mut self,
        id: impl AsRef<str>,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<Option<PropertyValue>> {
        let now = self.now();
        let node = self
            .nodes
            .get_mut(id.as_ref())
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::new(id.as_ref())))?;
        Ok(node.set_property(key, value, now))
    }

    /// Set a property on a relationship, returning the previous value
    pub fn set_relationship_property(
        &mut self,
        id: impl AsRef<str>,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<Option<PropertyValue>> {
        let now = self.now();
        let rel = self
            .relationships
            .get_mut(id.as_ref())
            .ok_or_else(|| GraphError::RelationshipNotFound(RelationshipId::new(id.as_ref())))?;
        Ok(rel.set_property(key, value, now))
    }

    /// Override the analytics weight of a relationship; `None` means 1
    pub fn set_relationship_weight(
        &mut self,
        id: impl AsRef<str>,
        weight: Option<f64>,
    ) -> GraphResult<()> {
        let now = self.now();
        let rel = self
            .relationships
            .get_mut(id.as_ref())
            .ok_or_else(|| GraphError::RelationshipNotFound(RelationshipId::new(id.as_ref())))?;
        rel.set_weight(weight, now);
        Ok(())
    }

    /// Delete a node, applying the configured policy to incident relationships.
    ///
    /// Under [`DeletePolicy::Cascade`] every relationship touching the node is
    /// removed first; under [`DeletePolicy::Reject`] the call fails while any exist.
    pub fn delete_node(&mut self, id: impl AsRef<str>) -> GraphResult<Node> {
        let id = id.as_ref();
        let adj = self
            .adjacency
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::new(id)))?;

        // A self-loop sits in both lists
        let mut incident: Vec<RelationshipId> = adj.outgoing.clone();
        for rel_id in &adj.incoming {
            if !incident.contains(rel_id) {
                incident.push(rel_id.clone());
            }
        }

        if !incident.is_empty() && self.config.delete_policy == DeletePolicy::Reject {
            return Err(GraphError::NodeHasRelationships {
                id: NodeId::new(id),
                count: incident.len(),
            });
        }

        for rel_id in &incident {
            if let Some(rel) = self.relationships.shift_remove(rel_id) {
                self.unlink(&rel);
            }
        }
        self.adjacency.remove(id);
        let node = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::new(id)))?;

        debug!(node_id = %node.id, cascaded = incident.len(), "deleted node");
        Ok(node)
    }

    /// Delete a relationship. Endpoint nodes are untouched.
    pub fn delete_relationship(&mut self, id: impl AsRef<str>) -> GraphResult<Relationship> {
        let rel = self
            .relationships
            .shift_remove(id.as_ref())
            .ok_or_else(|| GraphError::RelationshipNotFound(RelationshipId::new(id.as_ref())))?;
        self.unlink(&rel);
        debug!(rel_id = %rel.id, "deleted relationship");
        Ok(rel)
    }

    /// Iterate live nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate live relationships in insertion order
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.values()
    }

    pub fn nodes_by_type<'a>(&'a self, node_type: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.values().filter(move |n| n.is_type(node_type))
    }

    pub fn relationships_by_type<'a>(
        &'a self,
        rel_type: &'a str,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships.values().filter(move |r| r.is_type(rel_type))
    }

    /// Relationships leaving a node, in creation order
    pub fn outgoing_relationships(&self, id: impl AsRef<str>) -> Vec<&Relationship> {
        self.adjacency
            .get(id.as_ref())
            .map(|adj| {
                adj.outgoing
                    .iter()
                    .filter_map(|r| self.relationships.get(r))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Relationships arriving at a node, in creation order
    pub fn incoming_relationships(&self, id: impl AsRef<str>) -> Vec<&Relationship> {
        self.adjacency
            .get(id.as_ref())
            .map(|adj| {
                adj.incoming
                    .iter()
                    .filter_map(|r| self.relationships.get(r))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every relationship touching a node; self-loops appear once
    pub fn incident_relationships(&self, id: impl AsRef<str>) -> Vec<&Relationship> {
        let id = id.as_ref();
        let mut result = self.outgoing_relationships(id);
        result.extend(
            self.incoming_relationships(id)
                .into_iter()
                .filter(|r| !r.is_self_loop()),
        );
        result
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Copy of all nodes and relationships; later mutations do not show through
    pub fn get_all_data(&self) -> GraphData {
        GraphData {
            nodes: self.nodes.values().cloned().collect(),
            relationships: self.relationships.values().cloned().collect(),
        }
    }

    /// Same as [`GraphStore::get_all_data`]
    pub fn snapshot(&self) -> GraphData {
        self.get_all_data()
    }

    /// Recompute statistics from the live collections
    pub fn get_graph_stats(&self) -> GraphStats {
        GraphStats::compute(self.nodes.values(), self.relationships.values())
    }

    /// Remove all nodes and relationships
    pub fn clear_graph(&mut self) {
        let (nodes, rels) = (self.nodes.len(), self.relationships.len());
        self.nodes.clear();
        self.relationships.clear();
        self.adjacency.clear();
        info!(nodes, relationships = rels, "graph cleared");
    }

    // ============================================================
    // Bulk load - ids and timestamps are taken from the caller
    // ============================================================

    /// Insert a node keeping its id and timestamps
    pub fn insert_node(&mut self, node: Node) -> GraphResult<()> {
        if node.node_type.is_empty() {
            return Err(GraphError::EmptyType);
        }
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNodeId(node.id));
        }
        self.last_timestamp = self.last_timestamp.max(node.updated_at);
        self.adjacency.insert(node.id.clone(), Adjacency::default());
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Insert a relationship keeping its id and timestamps.
    /// Both endpoints must already exist.
    pub fn insert_relationship(&mut self, rel: Relationship) -> GraphResult<()> {
        if rel.rel_type.is_empty() {
            return Err(GraphError::EmptyType);
        }
        if self.relationships.contains_key(&rel.id) {
            return Err(GraphError::DuplicateRelationshipId(rel.id));
        }
        if !self.nodes.contains_key(&rel.source_id) {
            return Err(GraphError::InvalidRelationshipSource(rel.source_id));
        }
        if !self.nodes.contains_key(&rel.target_id) {
            return Err(GraphError::InvalidRelationshipTarget(rel.target_id));
        }
        if rel.is_self_loop() && !self.config.allow_self_loops {
            return Err(GraphError::SelfLoopRejected(rel.source_id));
        }
        self.last_timestamp = self.last_timestamp.max(rel.updated_at);
        self.link(&rel);
        self.relationships.insert(rel.id.clone(), rel);
        Ok(())
    }

    /// Replace the whole contents with `data`.
    ///
    /// The data is loaded into a fresh store first, so on error the current
    /// contents are left untouched.
    pub fn restore(&mut self, data: GraphData) -> GraphResult<()> {
        let mut fresh = GraphStore::with_config(self.config.clone());
        fresh.last_timestamp = self.last_timestamp;
        for node in data.nodes {
            fresh.insert_node(node)?;
        }
        for rel in data.relationships {
            fresh.insert_relationship(rel)?;
        }
        info!(
            nodes = fresh.node_count(),
            relationships = fresh.relationship_count(),
            "graph restored"
        );
        *self = fresh;
        Ok(())
    }
}
