//! Degree centrality
//!
//! A node's degree counts every incident edge regardless of direction. A
//! self-loop is seen once as outgoing and once as incoming, so it adds 2.

use super::common::{descending_order, GraphView, NodeId};

/// Degree of every node, sorted by descending degree.
///
/// Ties keep the view's index order, i.e. node insertion order.
pub fn degree_centrality(view: &GraphView) -> Vec<(NodeId, usize)> {
    let degrees: Vec<usize> = (0..view.node_count)
        .map(|idx| view.out_degree(idx) + view.in_degree(idx))
        .collect();

    descending_order(&degrees)
        .into_iter()
        .map(|idx| (view.index_to_node[idx].clone(), degrees[idx]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ids;

    #[test]
    fn test_degree_counts_both_directions() {
        // a -> b, a -> c, b -> c
        let view = GraphView::from_edge_list(ids(&["a", "b", "c"]), &[(0, 1), (0, 2), (1, 2)], None);
        let result = degree_centrality(&view);

        assert_eq!(
            result,
            vec![("a".to_string(), 2), ("b".to_string(), 2), ("c".to_string(), 2)]
        );
        let total: usize = result.iter().map(|(_, d)| d).sum();
        assert_eq!(total, 2 * view.edge_count());
    }

    #[test]
    fn test_self_loop_counts_twice() {
        let view = GraphView::from_edge_list(ids(&["a", "b"]), &[(1, 1)], None);
        let result = degree_centrality(&view);

        assert_eq!(result[0], ("b".to_string(), 2));
        assert_eq!(result[1], ("a".to_string(), 0));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        // hub -> x, hub -> y; x and y tie at 1, z isolated
        let view = GraphView::from_edge_list(ids(&["x", "hub", "y", "z"]), &[(1, 0), (1, 2)], None);
        let order: Vec<String> = degree_centrality(&view).into_iter().map(|(id, _)| id).collect();

        assert_eq!(order, vec!["hub", "x", "y", "z"]);
    }

    #[test]
    fn test_empty_graph() {
        assert!(degree_centrality(&GraphView::empty()).is_empty());
    }
}
