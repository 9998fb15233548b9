//! netmetrics: topological metrics aggregation for generated graph instances.
//!
//! Pipeline: load edge-list files named `graph_n<N>_m<M>_k<K>_*`, compute
//! per-graph metrics (mean degree, directed clustering, average path length,
//! diameter), fold repeated samples per `(n, m, k)` triplet into a running
//! aggregate, and emit a `;`-delimited report for downstream plotting.

pub mod aggregate;
pub mod graph;
pub mod loader;
pub mod metrics;
pub mod report;

/// Round to `decimals` decimal places.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
