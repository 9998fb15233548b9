//! Benchmark for per-graph metric computation.
//!
//! Measures the cost of the full metric set (degree, clustering, path
//! length, diameter) on seeded random directed graphs of various sizes.
//! Diameter and path length dominate: both are all-pairs BFS.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use netmetrics::graph::DiGraph;
use netmetrics::metrics::{self, MetricSample};
use rand::prelude::*;

/// Erdős-Rényi style random digraph with a directed ring underneath so the
/// graph is strongly connected and the expensive metrics always complete.
fn random_digraph(n: usize, p: f64, seed: u64) -> DiGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = DiGraph::new();
    for i in 0..n {
        graph.add_edge(&i.to_string(), &((i + 1) % n).to_string());
    }
    for i in 0..n {
        for j in 0..n {
            if i != j && rng.gen::<f64>() < p {
                graph.add_edge(&i.to_string(), &j.to_string());
            }
        }
    }
    graph
}

fn bench_metric_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("metric_sample");
    for &n in &[50, 100, 200] {
        let graph = random_digraph(n, 0.05, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, g| {
            b.iter(|| MetricSample::compute(black_box(g)))
        });
    }
    group.finish();
}

fn bench_individual_metrics(c: &mut Criterion) {
    let graph = random_digraph(200, 0.05, 42);
    c.bench_function("mean_degree_200", |b| {
        b.iter(|| metrics::mean_degree(black_box(&graph)))
    });
    c.bench_function("average_clustering_200", |b| {
        b.iter(|| metrics::average_clustering(black_box(&graph)))
    });
    c.bench_function("average_path_length_200", |b| {
        b.iter(|| metrics::average_path_length(black_box(&graph)))
    });
    c.bench_function("diameter_200", |b| {
        b.iter(|| metrics::diameter(black_box(&graph)))
    });
}

criterion_group!(benches, bench_metric_sample, bench_individual_metrics);
criterion_main!(benches);
