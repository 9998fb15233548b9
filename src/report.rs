//! Report Writer and Reader for the aggregated stats CSV.
//!
//! Wire format: header `n;m;k;degree;avg_clustering;diameter;average_path_length`,
//! then one `;`-separated row per triplet with a trailing delimiter. An
//! unestablished diameter serializes as `0`; an unavailable path length
//! serializes as `NaN` so it stays distinguishable from any computed value.
//! The reader is the plot-feeder side of the contract: it parses rows back
//! into numeric form and groups them for line charts.

use crate::aggregate::AggregateRecord;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

pub const REPORT_HEADER: &str = "n;m;k;degree;avg_clustering;diameter;average_path_length";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing or unexpected report header")]
    BadHeader,

    #[error("malformed report row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
}

/// Format a metric the way the report expects: integral values keep one
/// decimal place (`18` prints as `18.0`), everything else prints shortest.
fn format_metric(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Write the report, truncating any previous file at `path`. Rows appear in
/// the order given; re-running on the same records is idempotent.
pub fn write_report(path: &Path, records: &[AggregateRecord]) -> Result<(), ReportError> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{}", REPORT_HEADER)?;
    for record in records {
        let diameter = match record.diameter {
            Some(d) => format_metric(d),
            None => "0".to_string(),
        };
        let path_length = match record.avg_path_length {
            Some(p) => format_metric(p),
            None => "NaN".to_string(),
        };
        writeln!(
            out,
            "{};{};{};{};{};{};{};",
            record.key.n,
            record.key.m,
            record.key.k,
            format_metric(record.degree),
            format_metric(record.avg_clustering),
            diameter,
            path_length,
        )?;
    }
    out.flush()?;
    Ok(())
}

/// One parsed report row. `diameter` is the serialized value, so `0.0` is
/// ambiguous between "never computed" and a true zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRow {
    pub n: u64,
    pub m: u64,
    pub k: u64,
    pub degree: f64,
    pub avg_clustering: f64,
    pub diameter: f64,
    pub avg_path_length: Option<f64>,
}

/// Parse a report written by [`write_report`].
pub fn read_report(path: &Path) -> Result<Vec<ReportRow>, ReportError> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(ReportError::BadHeader),
    };
    if header.trim_end() != REPORT_HEADER {
        return Err(ReportError::BadHeader);
    }

    let mut rows = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        rows.push(parse_row(line, idx + 2)?);
    }
    Ok(rows)
}

fn parse_row(line: &str, line_no: usize) -> Result<ReportRow, ReportError> {
    let malformed = |reason: &str| ReportError::MalformedRow {
        line: line_no,
        reason: reason.to_string(),
    };
    let mut fields: Vec<&str> = line.split(';').collect();
    // trailing delimiter leaves one empty field
    if fields.last() == Some(&"") {
        fields.pop();
    }
    if fields.len() != 7 {
        return Err(malformed("expected 7 fields"));
    }
    let int = |s: &str| s.parse::<u64>().map_err(|_| malformed("bad integer"));
    let real = |s: &str| s.parse::<f64>().map_err(|_| malformed("bad number"));
    let path_length = if fields[6] == "NaN" {
        None
    } else {
        Some(real(fields[6])?)
    };
    Ok(ReportRow {
        n: int(fields[0])?,
        m: int(fields[1])?,
        k: int(fields[2])?,
        degree: real(fields[3])?,
        avg_clustering: real(fields[4])?,
        diameter: real(fields[5])?,
        avg_path_length: path_length,
    })
}

/// Group rows by `k`, each group sorted numerically by `n` for line-chart
/// rendering. Groups come back in ascending `k` order.
pub fn group_by_k(rows: &[ReportRow]) -> Vec<(u64, Vec<ReportRow>)> {
    let mut groups: BTreeMap<u64, Vec<ReportRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.k).or_default().push(*row);
    }
    groups
        .into_iter()
        .map(|(k, mut rows)| {
            rows.sort_by_key(|r| r.n);
            (k, rows)
        })
        .collect()
}

/// Group rows by `(k, m)`, each group sorted by `n`. One group per curve
/// when charts split series on both parameters.
pub fn group_by_k_m(rows: &[ReportRow]) -> Vec<((u64, u64), Vec<ReportRow>)> {
    let mut groups: BTreeMap<(u64, u64), Vec<ReportRow>> = BTreeMap::new();
    for row in rows {
        groups.entry((row.k, row.m)).or_default().push(*row);
    }
    groups
        .into_iter()
        .map(|(key, mut rows)| {
            rows.sort_by_key(|r| r.n);
            (key, rows)
        })
        .collect()
}
