//! Metric Provider: topological metrics for a single graph instance.
//!
//! Four metrics per graph: mean total degree, average directed clustering
//! coefficient, average shortest path length, and diameter. The latter two
//! are only defined on strongly connected graphs; their failures are
//! expected, recoverable conditions surfaced as `Result` here and converted
//! to an explicit `Option` at the [`MetricSample`] boundary, never panics.

use crate::graph::DiGraph;
use crate::round_to;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MetricError {
    #[error("graph is not strongly connected")]
    NotStronglyConnected,

    #[error("graph has no nodes")]
    EmptyGraph,
}

/// Computed metrics for one graph instance. `None` means the metric was
/// unavailable for this sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Mean total degree (in + out), rounded to 3 decimals.
    pub mean_degree: f64,
    /// Mean local directed clustering coefficient in [0, 1], rounded to
    /// 3 decimals.
    pub avg_clustering: f64,
    /// Mean shortest-path length over ordered pairs, rounded to 2 decimals.
    pub avg_path_length: Option<f64>,
    /// Longest shortest-path length.
    pub diameter: Option<u64>,
}

impl MetricSample {
    pub fn compute(graph: &DiGraph) -> Self {
        Self {
            mean_degree: mean_degree(graph),
            avg_clustering: average_clustering(graph),
            avg_path_length: average_path_length(graph).ok(),
            diameter: diameter(graph).ok(),
        }
    }
}

/// Arithmetic mean of total degree over all nodes, counting parallel edges
/// and self-loops with multiplicity. 0.0 for an empty graph.
pub fn mean_degree(graph: &DiGraph) -> f64 {
    let n = graph.node_count();
    if n == 0 {
        return 0.0;
    }
    let total: usize = (0..n).map(|v| graph.total_degree(v)).sum();
    round_to(total as f64 / n as f64, 3)
}

/// Mean local clustering coefficient under the directed (Fagiolo)
/// definition: triangle closure over the union of successor and predecessor
/// sets, with reciprocal edges discounted in the denominator. Nodes with
/// fewer than two distinct neighbors contribute 0.
pub fn average_clustering(graph: &DiGraph) -> f64 {
    let n = graph.node_count();
    if n == 0 {
        return 0.0;
    }
    let total: f64 = (0..n).map(|v| local_clustering(graph, v)).sum();
    round_to(total / n as f64, 3)
}

fn neighbor_sets(graph: &DiGraph, v: usize) -> (HashSet<usize>, HashSet<usize>) {
    let preds = graph
        .predecessors(v)
        .iter()
        .copied()
        .filter(|&u| u != v)
        .collect();
    let succs = graph
        .successors(v)
        .iter()
        .copied()
        .filter(|&u| u != v)
        .collect();
    (preds, succs)
}

fn local_clustering(graph: &DiGraph, v: usize) -> f64 {
    let (preds, succs) = neighbor_sets(graph, v);
    let d_total = preds.len() + succs.len();
    if d_total < 2 {
        return 0.0;
    }
    let d_bidirectional = preds.intersection(&succs).count();

    // Directed triangles through v: every orientation of a closing edge
    // between two neighbors counts.
    let mut triangles = 0usize;
    for &j in preds.iter().chain(succs.iter()) {
        let (jpreds, jsuccs) = neighbor_sets(graph, j);
        triangles += preds.intersection(&jpreds).count()
            + preds.intersection(&jsuccs).count()
            + succs.intersection(&jpreds).count()
            + succs.intersection(&jsuccs).count();
    }
    if triangles == 0 {
        return 0.0;
    }
    let denominator = (d_total * (d_total - 1) - 2 * d_bidirectional) * 2;
    if denominator == 0 {
        return 0.0;
    }
    triangles as f64 / denominator as f64
}

/// Mean shortest-path length over all ordered pairs of distinct nodes.
/// Fails unless the graph is strongly connected. 0.0 when there are fewer
/// than two nodes.
pub fn average_path_length(graph: &DiGraph) -> Result<f64, MetricError> {
    let n = graph.node_count();
    if n < 2 {
        return Ok(0.0);
    }
    let mut total: u64 = 0;
    for v in 0..n {
        for (u, d) in graph.bfs_distances(v).iter().enumerate() {
            if u == v {
                continue;
            }
            match d {
                Some(d) => total += u64::from(*d),
                None => return Err(MetricError::NotStronglyConnected),
            }
        }
    }
    Ok(round_to(total as f64 / (n * (n - 1)) as f64, 2))
}

/// Maximum eccentricity: the longest shortest-path length over all ordered
/// pairs. Fails on an empty or not strongly connected graph.
pub fn diameter(graph: &DiGraph) -> Result<u64, MetricError> {
    let n = graph.node_count();
    if n == 0 {
        return Err(MetricError::EmptyGraph);
    }
    let mut max: u64 = 0;
    for v in 0..n {
        for (u, d) in graph.bfs_distances(v).iter().enumerate() {
            match d {
                Some(d) => max = max.max(u64::from(*d)),
                None => {
                    debug_assert_ne!(u, v);
                    return Err(MetricError::NotStronglyConnected);
                }
            }
        }
    }
    Ok(max)
}
