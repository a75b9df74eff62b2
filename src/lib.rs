//! Graphforge
//!
//! An embeddable in-memory property graph engine with a small line-oriented
//! command language and structural analytics.
//!
//! # Components
//!
//! - [`graph`]: the store, sole owner of node and relationship identity
//! - [`query`]: parser for `CREATE` / `MATCH` / `CLEAR` commands and the batch executor
//! - [`algo`]: degree centrality, connected components and PageRank
//! - [`persistence`]: snapshot and metadata-registry seams for saving graphs
//! - [`config`]: YAML-loadable engine settings
//!
//! The engine is synchronous and single-threaded. Callers that share a store
//! across threads serialize access themselves.
//!
//! ## Example Usage
//!
//! ```rust
//! use graphforge::{GraphStore, PropertyMap, QueryExecutor};
//!
//! let mut store = GraphStore::new();
//!
//! let result = QueryExecutor::new(&mut store).run(
//!     "CREATE (a:Person {name: \"Alice\", age: 30})\n\
//!      CREATE (b:Person {name: \"Bob\"})\n\
//!      MATCH (p:Person) RETURN p",
//! );
//! assert_eq!(result.executed_commands(), 3);
//!
//! // Relationships go through the store API
//! let ids: Vec<_> = store.nodes().map(|n| n.id.clone()).collect();
//! store
//!     .create_relationship("KNOWS", &ids[0], &ids[1], PropertyMap::new())
//!     .unwrap();
//!
//! let ranks = graphforge::algo::page_rank(&store, &Default::default());
//! assert_eq!(ranks[0].node_id, ids[1]);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;
pub mod persistence;
pub mod query;

pub use graph::{
    GraphData, GraphError, GraphResult, GraphStats, GraphStore, Node, NodeId, PropertyMap,
    PropertyValue, Relationship, RelationshipId,
};

pub use query::{
    parse_command, BatchResult, BatchSummary, Command, CommandError, ExecutionError, ParseError,
    QueryExecutor,
};

pub use algo::{analyze, GraphAnalysis};

pub use config::{AnalyticsConfig, ConfigError, DeletePolicy, EngineConfig, StoreConfig};

pub use persistence::{
    load_graph, save_graph, GraphSnapshot, MetadataRegistry, PersistenceError, PersistenceResult,
    SaveRequest, SnapshotStore,
};

/// Crate version, as recorded in the package manifest
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
