//! In-memory directed graph built from a serialized edge list.
//!
//! Node identifiers are arbitrary strings interned to dense indices.
//! Parallel edges and self-loops are preserved exactly as inserted: the
//! graph is the file, not a cleaned-up version of it.

use std::collections::{HashMap, VecDeque};

/// Directed, unweighted graph with string node labels.
#[derive(Debug, Clone, Default)]
pub struct DiGraph {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    succ: Vec<Vec<usize>>,
    pred: Vec<Vec<usize>>,
    edge_count: usize,
}

impl DiGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Return the dense index for a label, creating the node if unseen.
    pub fn intern(&mut self, label: &str) -> usize {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), idx);
        self.succ.push(Vec::new());
        self.pred.push(Vec::new());
        idx
    }

    /// Add a directed edge. Duplicates and self-loops are kept.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        let s = self.intern(source);
        let t = self.intern(target);
        self.succ[s].push(t);
        self.pred[t].push(s);
        self.edge_count += 1;
    }

    pub fn label(&self, node: usize) -> &str {
        &self.labels[node]
    }

    /// Successor indices of `node`, with multiplicity.
    pub fn successors(&self, node: usize) -> &[usize] {
        &self.succ[node]
    }

    /// Predecessor indices of `node`, with multiplicity.
    pub fn predecessors(&self, node: usize) -> &[usize] {
        &self.pred[node]
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.succ[node].len()
    }

    pub fn in_degree(&self, node: usize) -> usize {
        self.pred[node].len()
    }

    /// Total degree (in + out), counting parallel edges and self-loops
    /// once per direction.
    pub fn total_degree(&self, node: usize) -> usize {
        self.in_degree(node) + self.out_degree(node)
    }

    /// Unweighted shortest-path distances from `start` to every node.
    /// `None` marks unreachable nodes.
    pub fn bfs_distances(&self, start: usize) -> Vec<Option<u32>> {
        let mut dist = vec![None; self.node_count()];
        dist[start] = Some(0);
        let mut queue = VecDeque::new();
        queue.push_back(start);
        while let Some(v) = queue.pop_front() {
            let d = dist[v].unwrap_or(0);
            for &w in &self.succ[v] {
                if dist[w].is_none() {
                    dist[w] = Some(d + 1);
                    queue.push_back(w);
                }
            }
        }
        dist
    }
}
