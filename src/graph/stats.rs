//! Derived graph statistics

use super::node::Node;
use super::relationship::Relationship;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts by type, recomputed from the live collections on every call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_count: usize,
    pub relationship_count: usize,
    /// type -> number of nodes of that type
    pub node_types: BTreeMap<String, usize>,
    /// type -> number of relationships of that type
    pub relationship_types: BTreeMap<String, usize>,
}

impl GraphStats {
    /// O(N + E) pass over nodes and relationships
    pub fn compute<'a>(
        nodes: impl IntoIterator<Item = &'a Node>,
        relationships: impl IntoIterator<Item = &'a Relationship>,
    ) -> Self {
        let mut stats = GraphStats::default();
        for node in nodes {
            stats.node_count += 1;
            *stats.node_types.entry(node.node_type.clone()).or_default() += 1;
        }
        for rel in relationships {
            stats.relationship_count += 1;
            *stats.relationship_types.entry(rel.rel_type.clone()).or_default() += 1;
        }
        stats
    }

    /// Mean number of incident relationships per node
    pub fn average_degree(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            2.0 * self.relationship_count as f64 / self.node_count as f64
        }
    }

    /// Ratio of relationships to the number of ordered node pairs
    pub fn density(&self) -> f64 {
        if self.node_count < 2 {
            0.0
        } else {
            let n = self.node_count as f64;
            self.relationship_count as f64 / (n * (n - 1.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeId, PropertyMap, RelationshipId};

    #[test]
    fn test_compute_groups_by_type() {
        let nodes = vec![
            Node::new(NodeId::new("a"), "Person", PropertyMap::new(), 0),
            Node::new(NodeId::new("b"), "Person", PropertyMap::new(), 0),
            Node::new(NodeId::new("c"), "Company", PropertyMap::new(), 0),
        ];
        let rels = vec![Relationship::new(
            RelationshipId::new("r"),
            "WORKS_AT",
            NodeId::new("a"),
            NodeId::new("c"),
            PropertyMap::new(),
            0,
        )];

        let stats = GraphStats::compute(&nodes, &rels);
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.relationship_count, 1);
        assert_eq!(stats.node_types["Person"], 2);
        assert_eq!(stats.node_types["Company"], 1);
        assert_eq!(stats.relationship_types["WORKS_AT"], 1);
        assert!((stats.average_degree() - 2.0 / 3.0).abs() < 1e-12);
        assert!((stats.density() - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_stats() {
        let stats = GraphStats::compute(&Vec::<Node>::new(), &Vec::<Relationship>::new());
        assert_eq!(stats, GraphStats::default());
        assert_eq!(stats.average_degree(), 0.0);
        assert_eq!(stats.density(), 0.0);
    }
}
