//! Topology-only graph algorithms for Graphforge
//!
//! Algorithms run over a [`GraphView`], a dense CSR snapshot of the graph, and
//! never see the store that produced it.

pub mod centrality;
pub mod common;
pub mod community;
pub mod pagerank;

pub use centrality::degree_centrality;
pub use common::{GraphView, NodeId};
pub use community::{weakly_connected_components, WccResult};
pub use pagerank::{page_rank, PageRankConfig, PageRankResult, DAMPING_FACTOR};
