use graphforge::algo::{analyze, connected_components, degree_centrality, page_rank};
use graphforge::graph::{GraphStore, NodeId, PropertyMap};
use graphforge::query::QueryExecutor;
use graphforge::AnalyticsConfig;
use std::collections::HashSet;

fn nodes(store: &mut GraphStore, n: usize) -> Vec<NodeId> {
    (0..n)
        .map(|_| store.create_node("Node", PropertyMap::new()).unwrap())
        .collect()
}

fn link(store: &mut GraphStore, a: &NodeId, b: &NodeId) {
    store
        .create_relationship("LINK", a, b, PropertyMap::new())
        .unwrap();
}

#[test]
fn test_pagerank_star() {
    // Center -> Bob, Charlie; Bob -> Center; Charlie -> Center
    let mut store = GraphStore::new();
    let ids = nodes(&mut store, 3);
    link(&mut store, &ids[0], &ids[1]);
    link(&mut store, &ids[0], &ids[2]);
    link(&mut store, &ids[1], &ids[0]);
    link(&mut store, &ids[2], &ids[0]);

    let ranks = page_rank(&store, &AnalyticsConfig::default());
    assert_eq!(ranks.len(), 3);
    assert_eq!(ranks[0].node_id, ids[0]);
    assert!((ranks[1].score - ranks[2].score).abs() < 1e-9);

    let total: f64 = ranks.iter().map(|r| r.score).sum();
    assert!((total - 1.0).abs() < 1e-6);
}

#[test]
fn test_pagerank_with_dangling_nodes_conserves_mass() {
    let mut store = GraphStore::new();
    let ids = nodes(&mut store, 5);
    link(&mut store, &ids[0], &ids[1]);
    link(&mut store, &ids[1], &ids[2]);
    link(&mut store, &ids[3], &ids[2]);
    // ids[2] and ids[4] are dangling

    let ranks = page_rank(&store, &AnalyticsConfig::default());
    let total: f64 = ranks.iter().map(|r| r.score).sum();
    assert!((total - 1.0).abs() < 1e-6);
    assert_eq!(ranks[0].node_id, ids[2]);
    assert!(ranks.iter().all(|r| r.score > 0.0));
}

#[test]
fn test_degree_sum_is_twice_relationships() {
    let mut store = GraphStore::new();
    let ids = nodes(&mut store, 6);
    for (a, b) in [(0, 1), (1, 2), (2, 0), (3, 4), (0, 4), (0, 1)] {
        link(&mut store, &ids[a], &ids[b]);
    }

    let degrees = degree_centrality(&store);
    let sum: usize = degrees.iter().map(|d| d.degree).sum();
    assert_eq!(sum, 2 * store.relationship_count());
    assert_eq!(degrees[0].node_id, ids[0]);
    assert_eq!(degrees[0].degree, 4);
    // Isolated node comes last
    assert_eq!(degrees.last().unwrap().degree, 0);
    assert!(degrees.windows(2).all(|w| w[0].degree >= w[1].degree));
}

#[test]
fn test_self_loop_counts_twice() {
    let mut store = GraphStore::new();
    let ids = nodes(&mut store, 1);
    link(&mut store, &ids[0], &ids[0]);
    assert_eq!(degree_centrality(&store)[0].degree, 2);
}

#[test]
fn test_components_partition_nodes() {
    let mut store = GraphStore::new();
    let ids = nodes(&mut store, 7);
    link(&mut store, &ids[1], &ids[0]);
    link(&mut store, &ids[2], &ids[3]);
    link(&mut store, &ids[4], &ids[3]);
    link(&mut store, &ids[5], &ids[5]);

    let components = connected_components(&store);
    assert_eq!(components.len(), 4);

    let mut seen = HashSet::new();
    for component in &components {
        for id in component {
            assert!(seen.insert(id.clone()), "{} appears twice", id);
        }
    }
    let all: HashSet<NodeId> = ids.iter().cloned().collect();
    assert_eq!(seen, all);

    // Ordered by earliest inserted member
    assert_eq!(components[0][0], ids[0]);
    assert_eq!(components[1][0], ids[2]);
    assert_eq!(components[2], vec![ids[5].clone()]);
    assert_eq!(components[3], vec![ids[6].clone()]);
}

#[test]
fn test_analytics_on_empty_graph() {
    let store = GraphStore::new();
    let config = AnalyticsConfig::default();
    assert!(degree_centrality(&store).is_empty());
    assert!(connected_components(&store).is_empty());
    assert!(page_rank(&store, &config).is_empty());

    let analysis = analyze(&store, &config);
    assert!(analysis.page_rank_converged);
}

#[test]
fn test_analytics_after_batch() {
    let mut store = GraphStore::new();
    QueryExecutor::new(&mut store)
        .execute_batch("CREATE (a:P)\nCREATE (b:P)\nCREATE (c:Q)")
        .unwrap();
    let ids: Vec<NodeId> = store.nodes().map(|n| n.id.clone()).collect();
    link(&mut store, &ids[0], &ids[1]);

    let analysis = analyze(&store, &AnalyticsConfig::default());
    assert_eq!(analysis.components.len(), 2);
    assert_eq!(analysis.degree_centrality.len(), 3);
    assert_eq!(analysis.top_page_rank(1)[0].node_id, ids[1]);
}

#[test]
fn test_iteration_cap_from_config() {
    let mut store = GraphStore::new();
    let ids = nodes(&mut store, 4);
    for i in 0..4 {
        link(&mut store, &ids[i], &ids[(i + 1) % 4]);
    }
    link(&mut store, &ids[0], &ids[2]);

    let config = AnalyticsConfig {
        max_iterations: 1,
        tolerance: 0.0,
    };
    let analysis = analyze(&store, &config);
    assert_eq!(analysis.page_rank_iterations, 1);
    assert!(!analysis.page_rank_converged);
    let total: f64 = analysis.page_rank.iter().map(|r| r.score).sum();
    assert!((total - 1.0).abs() < 1e-9);
}
