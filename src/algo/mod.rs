//! Graph analytics
//!
//! Algorithms are implemented in the `graphforge-algorithms` crate.
//! This module provides the integration/adapter layer: it projects the store
//! into a [`GraphView`] and maps results back to store ids.

use crate::config::AnalyticsConfig;
use crate::graph::{GraphStore, NodeId};
use graphforge_algorithms::GraphView;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

// Re-export algorithms
pub use graphforge_algorithms::{
    page_rank as page_rank_view, PageRankConfig, PageRankResult, WccResult, DAMPING_FACTOR,
};

/// Build a GraphView from the store for algorithm execution.
///
/// `node_type` restricts the nodes, `rel_type` the relationships; a
/// relationship is kept only when both endpoints are in the view. Weights are
/// attached when any kept relationship carries one.
pub fn build_view(store: &GraphStore, node_type: Option<&str>, rel_type: Option<&str>) -> GraphView {
    let index_to_node: Vec<String> = store
        .nodes()
        .filter(|n| node_type.map_or(true, |t| n.is_type(t)))
        .map(|n| n.id.as_str().to_string())
        .collect();

    let mut edges = Vec::new();
    let mut weights = Vec::new();
    let mut weighted = false;
    {
        let node_to_index: FxHashMap<&str, usize> = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.as_str(), idx))
            .collect();

        for rel in store.relationships() {
            if rel_type.is_some_and(|t| !rel.is_type(t)) {
                continue;
            }
            let (Some(&u), Some(&v)) = (
                node_to_index.get(rel.source_id.as_str()),
                node_to_index.get(rel.target_id.as_str()),
            ) else {
                continue;
            };
            edges.push((u, v));
            weights.push(rel.effective_weight());
            weighted |= rel.weight.is_some();
        }
    }

    debug!(nodes = index_to_node.len(), edges = edges.len(), weighted, "built graph view");
    GraphView::from_edge_list(index_to_node, &edges, weighted.then_some(weights.as_slice()))
}

/// Degree of one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeScore {
    pub node_id: NodeId,
    pub degree: usize,
}

/// PageRank score of one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankScore {
    pub node_id: NodeId,
    pub score: f64,
}

/// Relationships per node, both directions counted; sorted by degree
/// descending with ties in node insertion order
pub fn degree_centrality(store: &GraphStore) -> Vec<DegreeScore> {
    degree_scores(&build_view(store, None, None))
}

/// Weakly connected components, ordered by their earliest-inserted member
pub fn connected_components(store: &GraphStore) -> Vec<Vec<NodeId>> {
    component_ids(&build_view(store, None, None))
}

fn degree_scores(view: &GraphView) -> Vec<DegreeScore> {
    graphforge_algorithms::degree_centrality(view)
        .into_iter()
        .map(|(id, degree)| DegreeScore {
            node_id: NodeId::new(id),
            degree,
        })
        .collect()
}

fn component_ids(view: &GraphView) -> Vec<Vec<NodeId>> {
    graphforge_algorithms::weakly_connected_components(view)
        .components
        .into_iter()
        .map(|members| members.into_iter().map(NodeId::new).collect())
        .collect()
}

/// PageRank scores sorted descending
pub fn page_rank(store: &GraphStore, config: &AnalyticsConfig) -> Vec<RankScore> {
    rank_scores(run_page_rank(store, config))
}

fn run_page_rank(store: &GraphStore, config: &AnalyticsConfig) -> PageRankResult {
    let view = build_view(store, None, None);
    let result = page_rank_view(&view, &config.page_rank_config());
    debug!(
        iterations = result.iterations,
        converged = result.converged,
        "pagerank finished"
    );
    result
}

fn rank_scores(result: PageRankResult) -> Vec<RankScore> {
    result
        .scores
        .into_iter()
        .map(|(id, score)| RankScore {
            node_id: NodeId::new(id),
            score,
        })
        .collect()
}

/// All analytics over one store state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphAnalysis {
    pub degree_centrality: Vec<DegreeScore>,
    pub components: Vec<Vec<NodeId>>,
    pub page_rank: Vec<RankScore>,
    /// PageRank iterations actually run
    pub page_rank_iterations: usize,
    /// Whether PageRank stopped on tolerance rather than the iteration cap
    pub page_rank_converged: bool,
}

impl GraphAnalysis {
    pub fn top_degree(&self, n: usize) -> &[DegreeScore] {
        &self.degree_centrality[..n.min(self.degree_centrality.len())]
    }

    pub fn top_page_rank(&self, n: usize) -> &[RankScore] {
        &self.page_rank[..n.min(self.page_rank.len())]
    }

    pub fn largest_component(&self) -> Option<&[NodeId]> {
        // First component wins a tie
        let mut best: Option<&Vec<NodeId>> = None;
        for component in &self.components {
            if best.map_or(true, |b| component.len() > b.len()) {
                best = Some(component);
            }
        }
        best.map(Vec::as_slice)
    }
}

/// Run every analytic once
pub fn analyze(store: &GraphStore, config: &AnalyticsConfig) -> GraphAnalysis {
    let view = build_view(store, None, None);
    let ranks = page_rank_view(&view, &config.page_rank_config());
    let (page_rank_iterations, page_rank_converged) = (ranks.iterations, ranks.converged);

    GraphAnalysis {
        degree_centrality: degree_scores(&view),
        components: component_ids(&view),
        page_rank: rank_scores(ranks),
        page_rank_iterations,
        page_rank_converged,
    }
}
