//! Graph Loader: parameter extraction from filenames and edge-list parsing.
//!
//! Input files follow the naming contract `graph_n<N>_m<M>_k<K>_<free-text>`
//! and contain one directed edge per line as `<source>;<target>`.

use crate::graph::DiGraph;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Field separator inside an edge line.
pub const EDGE_DELIMITER: char = ';';

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed filename '{0}': expected graph_n<N>_m<M>_k<K>_<rest>")]
    MalformedFilename(String),

    #[error("malformed edge at {file}:{line}: expected <source>;<target>")]
    MalformedEdgeLine { file: String, line: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Generation parameter triplet parsed from an input filename.
///
/// Files sharing a triplet are repeated samples of the same generative
/// configuration and are merged into one aggregate record. Values are kept
/// numeric so downstream sorting by `(k, n)` is numeric, not lexical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamKey {
    pub n: u64,
    pub m: u64,
    pub k: u64,
}

impl ParamKey {
    /// Parse the triplet out of a filename such as
    /// `graph_n1000_m160_k20_alpha3-2.csv`.
    pub fn from_filename(name: &str) -> Result<Self, LoadError> {
        let malformed = || LoadError::MalformedFilename(name.to_string());
        let fields: Vec<&str> = name.split('_').collect();
        if fields.len() < 4 {
            return Err(malformed());
        }
        let n = parse_field(fields[1], 'n').ok_or_else(malformed)?;
        let m = parse_field(fields[2], 'm').ok_or_else(malformed)?;
        let k = parse_field(fields[3], 'k').ok_or_else(malformed)?;
        Ok(Self { n, m, k })
    }
}

impl std::fmt::Display for ParamKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}m{}k{}", self.n, self.m, self.k)
    }
}

fn parse_field(field: &str, prefix: char) -> Option<u64> {
    field.strip_prefix(prefix)?.parse().ok()
}

/// Load one serialized graph instance.
///
/// The filename supplies the parameter triplet; the content supplies the
/// edges. Self-loops and parallel edges are preserved as written. The file
/// is opened read-only and closed before return.
pub fn load_graph_file(path: &Path) -> Result<(ParamKey, DiGraph), LoadError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoadError::MalformedFilename(path.display().to_string()))?;
    let key = ParamKey::from_filename(name)?;

    let reader = BufReader::new(File::open(path)?);
    let mut graph = DiGraph::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split(EDGE_DELIMITER);
        let source = tokens.next().map(str::trim).unwrap_or("");
        let target = tokens.next().map(str::trim).unwrap_or("");
        if source.is_empty() || target.is_empty() || tokens.next().is_some() {
            return Err(LoadError::MalformedEdgeLine {
                file: name.to_string(),
                line: idx + 1,
            });
        }
        graph.add_edge(source, target);
    }
    Ok((key, graph))
}
