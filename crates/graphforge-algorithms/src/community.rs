//! Component detection
//!
//! Treats every directed edge as an undirected link and groups nodes that can
//! reach each other.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

/// Partition of the nodes into weakly connected components
#[derive(Debug, Clone, Default)]
pub struct WccResult {
    /// Components in order of their earliest-inserted member. Members keep
    /// insertion order too.
    pub components: Vec<Vec<NodeId>>,
    /// Map of NodeId -> position in `components`
    pub node_component: HashMap<NodeId, usize>,
}

impl WccResult {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Size of the largest component (0 for an empty graph)
    pub fn largest_size(&self) -> usize {
        self.components.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Whether two nodes share a component
    pub fn connected(&self, a: &str, b: &str) -> bool {
        match (self.node_component.get(a), self.node_component.get(b)) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    }
}

/// Disjoint sets over dense indices, merged by size
struct DisjointSets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Representative of `x`, halving the path on the way up
    fn root(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    fn merge(&mut self, a: usize, b: usize) {
        let (mut big, mut small) = (self.root(a), self.root(b));
        if big == small {
            return;
        }
        if self.size[big] < self.size[small] {
            std::mem::swap(&mut big, &mut small);
        }
        self.parent[small] = big;
        self.size[big] += self.size[small];
    }
}

/// Weakly connected components.
///
/// Every node lands in exactly one component. Edge direction is ignored and
/// isolated nodes form singleton components.
pub fn weakly_connected_components(view: &GraphView) -> WccResult {
    let n = view.node_count;
    let mut sets = DisjointSets::new(n);

    for src in 0..n {
        for &dst in view.successors(src) {
            sets.merge(src, dst);
        }
    }

    // Scanning in index order numbers components by their first member
    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Vec<NodeId>> = Vec::new();
    let mut node_component = HashMap::with_capacity(n);

    for (idx, id) in view.index_to_node.iter().enumerate() {
        let root = sets.root(idx);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(id.clone());
        node_component.insert(id.clone(), slot);
    }

    WccResult {
        components,
        node_component,
    }
}
