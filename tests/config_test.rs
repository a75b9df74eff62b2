use graphforge::config::{ConfigError, DeletePolicy, EngineConfig};
use graphforge::graph::{GraphError, GraphStore, PropertyMap};
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(
        "store:\n  delete_policy: reject\n  allow_self_loops: false\nanalytics:\n  max_iterations: 50\n  tolerance: 1.0e-8\n",
    );
    let config = EngineConfig::from_file(file.path()).unwrap();
    assert_eq!(config.store.delete_policy, DeletePolicy::Reject);
    assert!(!config.store.allow_self_loops);
    assert_eq!(config.analytics.max_iterations, 50);
    assert_eq!(config.analytics.tolerance, 1e-8);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_negative_tolerance_rejected() {
    let err = EngineConfig::from_yaml_str("analytics:\n  tolerance: -1.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_store_follows_reject_policy() {
    let config = EngineConfig::from_yaml_str("store:\n  delete_policy: reject\n").unwrap();
    let mut store = GraphStore::with_config(config.store);
    let a = store.create_node("N", PropertyMap::new()).unwrap();
    let b = store.create_node("N", PropertyMap::new()).unwrap();
    store.create_relationship("R", &a, &b, PropertyMap::new()).unwrap();

    let err = store.delete_node(&b).unwrap_err();
    assert_eq!(err, GraphError::NodeHasRelationships { id: b.clone(), count: 1 });
    assert_eq!(store.node_count(), 2);
}

#[test]
fn test_store_follows_cascade_policy() {
    let mut store = GraphStore::with_config(EngineConfig::default().store);
    let a = store.create_node("N", PropertyMap::new()).unwrap();
    let b = store.create_node("N", PropertyMap::new()).unwrap();
    store.create_relationship("R", &a, &b, PropertyMap::new()).unwrap();
    store.create_relationship("R", &b, &a, PropertyMap::new()).unwrap();

    store.delete_node(&b).unwrap();
    assert_eq!(store.relationship_count(), 0);
    assert!(store.outgoing_relationships(&a).is_empty());
    assert!(store.incoming_relationships(&a).is_empty());
}

#[test]
fn test_store_rejects_self_loops_when_configured() {
    let config = EngineConfig::from_yaml_str("store:\n  allow_self_loops: false\n").unwrap();
    let mut store = GraphStore::with_config(config.store);
    let a = store.create_node("N", PropertyMap::new()).unwrap();
    let err = store
        .create_relationship("R", &a, &a, PropertyMap::new())
        .unwrap_err();
    assert!(err.is_constraint_error());
    assert_eq!(store.relationship_count(), 0);
}
