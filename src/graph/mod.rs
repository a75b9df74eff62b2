//! Core property graph implementation
//!
//! - Nodes with a primary type, auxiliary labels and properties
//! - Directed, typed relationships with properties and an optional weight
//! - Multiple relationships between the same nodes, self-loops by config
//! - In-memory storage with insertion-ordered maps and adjacency lists

pub mod node;
pub mod property;
pub mod relationship;
pub mod stats;
pub mod store;
pub mod types;

// Re-export main types
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use relationship::{Relationship, WEIGHT_PROPERTY};
pub use stats::GraphStats;
pub use store::{GraphData, GraphError, GraphResult, GraphStore};
pub use types::{NodeId, RelationshipId};
