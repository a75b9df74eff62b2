//! Dense topology snapshot shared by every algorithm in this crate

use std::cmp::Ordering;
use std::collections::HashMap;

/// Node identifier type (the engine's opaque string id)
pub type NodeId = String;

/// Read-only adjacency in compressed sparse row form, one row per node for
/// each direction.
///
/// Dense indices follow the order of `index_to_node`, which callers fill in
/// node insertion order. Every tie-break in this crate falls back to that order.
#[derive(Debug, Clone, Default)]
pub struct GraphView {
    pub node_count: usize,
    /// Dense index to engine id
    pub index_to_node: Vec<NodeId>,
    /// Engine id to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Row `i` of the successor table is `out_adj[out_start[i]..out_start[i + 1]]`
    out_start: Vec<usize>,
    out_adj: Vec<usize>,
    /// Same layout, keyed by target
    in_start: Vec<usize>,
    in_adj: Vec<usize>,

    /// Parallel to `out_adj`. `None` means every edge weighs 1.
    pub weights: Option<Vec<f64>>,
}

/// Prefix sums of per-row counts, with a leading zero
fn row_starts(counts: &[usize]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(counts.len() + 1);
    let mut total = 0;
    starts.push(total);
    for &c in counts {
        total += c;
        starts.push(total);
    }
    starts
}

impl GraphView {
    /// An empty view
    pub fn empty() -> Self {
        Self {
            out_start: vec![0],
            in_start: vec![0],
            ..Self::default()
        }
    }

    /// Build a view from `(source_index, target_index)` pairs.
    ///
    /// `weights`, when given, is aligned with `edges`; missing entries weigh 1.
    /// Parallel edges and self-loops are kept, and each row keeps the order in
    /// which its edges appear in `edges`. Indices must be below
    /// `index_to_node.len()`.
    pub fn from_edge_list(
        index_to_node: Vec<NodeId>,
        edges: &[(usize, usize)],
        weights: Option<&[f64]>,
    ) -> Self {
        let n = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();

        let mut out_count = vec![0usize; n];
        let mut in_count = vec![0usize; n];
        for &(u, v) in edges {
            out_count[u] += 1;
            in_count[v] += 1;
        }
        let out_start = row_starts(&out_count);
        let in_start = row_starts(&in_count);

        // Fill cursors start at each row's first slot
        let mut out_fill = out_start[..n].to_vec();
        let mut in_fill = in_start[..n].to_vec();
        let mut out_adj = vec![0usize; edges.len()];
        let mut in_adj = vec![0usize; edges.len()];
        let mut flat_weights = weights.map(|_| vec![1.0; edges.len()]);

        for (e, &(u, v)) in edges.iter().enumerate() {
            let slot = out_fill[u];
            out_adj[slot] = v;
            out_fill[u] += 1;
            if let (Some(flat), Some(w)) = (flat_weights.as_mut(), weights) {
                flat[slot] = w.get(e).copied().unwrap_or(1.0);
            }

            in_adj[in_fill[v]] = u;
            in_fill[v] += 1;
        }

        GraphView {
            node_count: n,
            index_to_node,
            node_to_index,
            out_start,
            out_adj,
            in_start,
            in_adj,
            weights: flat_weights,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.out_adj.len()
    }

    pub fn out_degree(&self, idx: usize) -> usize {
        self.successors(idx).len()
    }

    pub fn in_degree(&self, idx: usize) -> usize {
        self.predecessors(idx).len()
    }

    /// Targets of `idx`'s outgoing edges, one entry per edge
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.out_adj[self.out_start[idx]..self.out_start[idx + 1]]
    }

    /// Sources of `idx`'s incoming edges, one entry per edge
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        &self.in_adj[self.in_start[idx]..self.in_start[idx + 1]]
    }

    /// Raw weights of `idx`'s outgoing edges, aligned with [`successors`](Self::successors)
    pub fn weights(&self, idx: usize) -> Option<&[f64]> {
        let row = self.out_start[idx]..self.out_start[idx + 1];
        self.weights.as_ref().map(|w| &w[row])
    }

    /// Weight of the `k`-th outgoing edge of a node, clamped to `[0, inf)`.
    pub fn edge_weight(&self, idx: usize, k: usize) -> f64 {
        match self.weights(idx) {
            Some(ws) => sanitize_weight(ws[k]),
            None => 1.0,
        }
    }

    /// Sum of the (clamped) weights of a node's outgoing edges
    pub fn out_weight(&self, idx: usize) -> f64 {
        match self.weights(idx) {
            Some(ws) => ws.iter().copied().map(sanitize_weight).sum(),
            None => self.out_degree(idx) as f64,
        }
    }
}

fn sanitize_weight(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 {
        w
    } else {
        0.0
    }
}

/// Dense indices ordered by descending value. The sort is stable, so equal
/// values keep ascending index order.
pub(crate) fn descending_order<T: PartialOrd>(values: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].partial_cmp(&values[a]).unwrap_or(Ordering::Equal));
    order
}

#[cfg(test)]
pub(crate) fn ids(names: &[&str]) -> Vec<NodeId> {
    names.iter().map(|s| s.to_string()).collect()
}
