//! PageRank algorithm implementation
//!
//! Power iteration over the directed graph:
//!
//! `PR'(v) = (1-d)/N + d * (Σ PR(u) * w(u,v) / W(u) + D/N)`
//!
//! where `W(u)` is the total outgoing weight of `u` and `D` is the rank held
//! by dangling nodes (no outgoing weight), spread uniformly so the scores keep
//! summing to 1. With unit weights `w(u,v) / W(u)` is `1 / outDegree(u)`.

use super::common::{descending_order, GraphView, NodeId};

/// Fixed damping factor
pub const DAMPING_FACTOR: f64 = 0.85;

/// PageRank configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Maximum number of iterations
    pub iterations: usize,
    /// Stop once the L1 change between two iterations drops below this
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: DAMPING_FACTOR,
            iterations: 20,
            tolerance: 1e-6,
        }
    }
}

/// PageRank output
#[derive(Debug, Clone, Default)]
pub struct PageRankResult {
    /// Scores sorted by descending value; ties keep insertion order
    pub scores: Vec<(NodeId, f64)>,
    /// Iterations actually run
    pub iterations: usize,
    /// Whether the tolerance was reached before the iteration cap
    pub converged: bool,
}

impl PageRankResult {
    pub fn score(&self, node: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(id, _)| id == node)
            .map(|(_, score)| *score)
    }

    pub fn total(&self) -> f64 {
        self.scores.iter().map(|(_, s)| s).sum()
    }
}

/// Calculate PageRank for the graph view
pub fn page_rank(view: &GraphView, config: &PageRankConfig) -> PageRankResult {
    let n = view.node_count;

    if n == 0 {
        return PageRankResult {
            converged: true,
            ..PageRankResult::default()
        };
    }

    let nf = n as f64;
    let d = config.damping_factor;
    let base_score = (1.0 - d) / nf;

    let out_weight: Vec<f64> = (0..n).map(|i| view.out_weight(i)).collect();

    let mut scores = vec![1.0 / nf; n];
    let mut next_scores = vec![0.0; n];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.iterations {
        iterations += 1;

        let dangling_mass: f64 = (0..n)
            .filter(|&i| out_weight[i] <= 0.0)
            .map(|i| scores[i])
            .sum();
        let uniform = base_score + d * dangling_mass / nf;
        next_scores.iter_mut().for_each(|s| *s = uniform);

        // Push each node's rank along its outgoing edges
        for u in 0..n {
            if out_weight[u] <= 0.0 {
                continue;
            }
            let share = d * scores[u] / out_weight[u];
            for (k, &v) in view.successors(u).iter().enumerate() {
                next_scores[v] += share * view.edge_weight(u, k);
            }
        }

        let total_diff: f64 = scores
            .iter()
            .zip(&next_scores)
            .map(|(old, new)| (new - old).abs())
            .sum();

        // Swap buffers
        std::mem::swap(&mut scores, &mut next_scores);

        if total_diff < config.tolerance {
            converged = true;
            break;
        }
    }

    let ranked = descending_order(&scores)
        .into_iter()
        .map(|idx| (view.index_to_node[idx].clone(), scores[idx]))
        .collect();

    PageRankResult {
        scores: ranked,
        iterations,
        converged,
    }
}
