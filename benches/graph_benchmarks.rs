use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graphforge::algo::{analyze, page_rank};
use graphforge::graph::{GraphStore, NodeId, PropertyMap};
use graphforge::query::parse_command;
use graphforge::{AnalyticsConfig, QueryExecutor};

fn person(i: usize) -> PropertyMap {
    let mut props = PropertyMap::new();
    props.insert("name".to_string(), format!("Person{}", i).into());
    props.insert("age".to_string(), ((i % 100) as i64).into());
    props
}

/// Ring plus chords, so every node has out-degree 2
fn build_graph(size: usize) -> GraphStore {
    let mut store = GraphStore::new();
    let ids: Vec<NodeId> = (0..size)
        .map(|i| store.create_node("Person", person(i)).unwrap())
        .collect();
    for i in 0..size {
        store
            .create_relationship("KNOWS", &ids[i], &ids[(i + 1) % size], PropertyMap::new())
            .unwrap();
        store
            .create_relationship("KNOWS", &ids[i], &ids[(i * 7 + 3) % size], PropertyMap::new())
            .unwrap();
    }
    store
}

/// Benchmark node insertion throughput
fn bench_node_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("node_insertion");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut store = GraphStore::new();
                for i in 0..size {
                    store.create_node("Person", person(i)).unwrap();
                }
                criterion::black_box(store.node_count());
            });
        });
    }
    group.finish();
}

/// Benchmark command parsing
fn bench_parse(c: &mut Criterion) {
    let lines = [
        r#"CREATE (a:Person {name: "Alice, Jr.", age: 30, active: true, score: 9.5})"#,
        "MATCH (p:Person) RETURN p",
        "MATCH (a)-[r:KNOWS]->(b)",
        "CLEAR",
    ];
    c.bench_function("parse_command", |b| {
        b.iter(|| {
            for line in &lines {
                criterion::black_box(parse_command(line).unwrap());
            }
        });
    });
}

/// Benchmark batch execution: creates followed by a typed MATCH
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_execution");

    for size in [100, 1000].iter() {
        let mut batch: String = (0..*size)
            .map(|i| format!("CREATE (n{}:Person {{name: \"P{}\", age: {}}})\n", i, i, i % 90))
            .collect();
        batch.push_str("MATCH (p:Person) RETURN p\n");

        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| {
                let mut store = GraphStore::new();
                let summary = QueryExecutor::new(&mut store).execute_batch(batch).unwrap();
                criterion::black_box(summary.executed_commands);
            });
        });
    }
    group.finish();
}

/// Benchmark PageRank, including the store-to-view projection
fn bench_pagerank(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagerank");
    let config = AnalyticsConfig::default();

    for size in [100, 1000, 10_000].iter() {
        let store = build_graph(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| criterion::black_box(page_rank(&store, &config).len()));
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let store = build_graph(1000);
    let config = AnalyticsConfig::default();
    c.bench_function("analyze_1000", |b| {
        b.iter(|| criterion::black_box(analyze(&store, &config).components.len()));
    });
}

criterion_group!(
    benches,
    bench_node_insertion,
    bench_parse,
    bench_batch,
    bench_pagerank,
    bench_analyze
);
criterion_main!(benches);
