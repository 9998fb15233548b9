//! Aggregation Store: running per-triplet aggregates.
//!
//! Repeated samples for the same `(n, m, k)` triplet fold into one record
//! via a two-point running mean: each merge averages the new sample with the
//! current aggregate, giving the new sample equal weight to the whole prior
//! history. That makes the result order-dependent and non-associative for
//! three or more samples; it is the documented algorithm, not an
//! approximation of a cumulative mean, and must not be "fixed" into one.
//!
//! Diameter carries an extra wrinkle: the report format overloads `0` as
//! both "never computed" and a legitimate zero. Internally the record keeps
//! an explicit `Option`, and a stored zero is replaced outright by the next
//! available value rather than averaged, matching the emitted-format
//! semantics. A true zero-diameter sample is therefore indistinguishable
//! from "unavailable" on the wire; the ambiguity is deliberate.

use crate::loader::ParamKey;
use crate::metrics::MetricSample;
use crate::round_to;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Decimal places for degree and clustering merges.
const DEGREE_PRECISION: u32 = 3;
/// Decimal places for path-length and diameter merges.
const PATH_PRECISION: u32 = 2;

/// Running aggregate for one parameter triplet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    #[serde(flatten)]
    pub key: ParamKey,
    pub degree: f64,
    pub avg_clustering: f64,
    pub avg_path_length: Option<f64>,
    /// `None` until a sample establishes a value; serialized as `0`.
    pub diameter: Option<f64>,
}

/// Two-point running mean: average the accumulated value with the new
/// observation, at the metric's precision. Shared by every merging metric.
pub fn merge_mean(accumulated: f64, new: f64, decimals: u32) -> f64 {
    round_to((accumulated + new) / 2.0, decimals)
}

/// Table of aggregate records keyed by parameter triplet, in first-seen
/// insertion order. Single writer; owned by the processing loop for the
/// run's lifetime.
#[derive(Debug, Default)]
pub struct StatsTable {
    records: Vec<AggregateRecord>,
    index: HashMap<ParamKey, usize>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fold one sample into the aggregate for its key.
    pub fn ingest(&mut self, key: ParamKey, sample: &MetricSample) {
        let slot = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(AggregateRecord {
                    key,
                    degree: sample.mean_degree,
                    avg_clustering: sample.avg_clustering,
                    avg_path_length: sample.avg_path_length,
                    diameter: sample.diameter.map(|d| d as f64),
                });
                return;
            }
        };

        let record = &mut self.records[slot];
        record.degree = merge_mean(record.degree, sample.mean_degree, DEGREE_PRECISION);
        record.avg_clustering = merge_mean(
            record.avg_clustering,
            sample.avg_clustering,
            DEGREE_PRECISION,
        );

        // an unavailable sample never disturbs the stored value
        if let Some(new) = sample.avg_path_length {
            record.avg_path_length = Some(match record.avg_path_length {
                Some(prev) => merge_mean(prev, new, PATH_PRECISION),
                None => new,
            });
        }

        if let Some(new) = sample.diameter {
            let new = new as f64;
            record.diameter = Some(match record.diameter {
                // a stored zero means "not yet established", so adopt
                Some(prev) if prev != 0.0 => merge_mean(prev, new, PATH_PRECISION),
                _ => new,
            });
        }
    }

    /// Records in first-seen key order. Presentation sorting is a
    /// downstream concern.
    pub fn records(&self) -> &[AggregateRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AggregateRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u64, m: u64, k: u64) -> ParamKey {
        ParamKey { n, m, k }
    }

    fn sample(degree: f64, clustering: f64, apl: Option<f64>, diameter: Option<u64>) -> MetricSample {
        MetricSample {
            mean_degree: degree,
            avg_clustering: clustering,
            avg_path_length: apl,
            diameter,
        }
    }

    #[test]
    fn test_one_record_per_key() {
        let mut table = StatsTable::new();
        table.ingest(key(10, 2, 3), &sample(4.0, 0.5, Some(2.0), Some(4)));
        table.ingest(key(10, 2, 3), &sample(6.0, 0.7, Some(3.0), Some(6)));
        table.ingest(key(20, 2, 3), &sample(5.0, 0.1, None, None));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_two_point_merge() {
        let mut table = StatsTable::new();
        let k = key(10, 2, 3);
        table.ingest(k, &sample(4.0, 0.25, Some(2.0), Some(4)));
        table.ingest(k, &sample(6.0, 0.75, Some(3.0), Some(6)));
        let record = table.records()[0];
        assert_eq!(record.degree, 5.0);
        assert_eq!(record.avg_clustering, 0.5);
        assert_eq!(record.avg_path_length, Some(2.5));
        assert_eq!(record.diameter, Some(5.0));
    }

    #[test]
    fn test_three_samples_use_mean_of_means_not_cumulative_mean() {
        let mut table = StatsTable::new();
        let k = key(10, 2, 3);
        for degree in [0.0, 0.0, 3.0] {
            table.ingest(k, &sample(degree, 0.0, None, None));
        }
        let record = table.records()[0];
        // mean(mean(0, 0), 3) = 1.5, a cumulative mean would give 1.0
        assert_eq!(record.degree, 1.5);
        assert_ne!(record.degree, 1.0);
    }

    #[test]
    fn test_merge_is_order_dependent() {
        let forward = {
            let mut t = StatsTable::new();
            for d in [1.0, 2.0, 4.0] {
                t.ingest(key(1, 1, 1), &sample(d, 0.0, None, None));
            }
            t.records()[0].degree
        };
        let reverse = {
            let mut t = StatsTable::new();
            for d in [4.0, 2.0, 1.0] {
                t.ingest(key(1, 1, 1), &sample(d, 0.0, None, None));
            }
            t.records()[0].degree
        };
        assert_eq!(forward, 2.75);
        assert_eq!(reverse, 2.0);
    }

    #[test]
    fn test_diameter_sentinel_adopted_outright() {
        let mut table = StatsTable::new();
        let k = key(10, 2, 3);
        table.ingest(k, &sample(1.0, 0.0, None, None));
        assert_eq!(table.records()[0].diameter, None);
        table.ingest(k, &sample(1.0, 0.0, None, Some(7)));
        // adopted, not averaged with the sentinel
        assert_eq!(table.records()[0].diameter, Some(7.0));
        table.ingest(k, &sample(1.0, 0.0, None, Some(9)));
        assert_eq!(table.records()[0].diameter, Some(8.0));
    }

    #[test]
    fn test_diameter_unavailable_retains_prior() {
        let mut table = StatsTable::new();
        let k = key(10, 2, 3);
        table.ingest(k, &sample(1.0, 0.0, None, Some(4)));
        table.ingest(k, &sample(1.0, 0.0, None, None));
        assert_eq!(table.records()[0].diameter, Some(4.0));
    }

    #[test]
    fn test_established_zero_diameter_is_replaced_not_averaged() {
        // a single-node sample yields a true diameter of 0, which the wire
        // format cannot tell apart from "never computed"
        let mut table = StatsTable::new();
        let k = key(1, 1, 1);
        table.ingest(k, &sample(0.0, 0.0, Some(0.0), Some(0)));
        assert_eq!(table.records()[0].diameter, Some(0.0));
        table.ingest(k, &sample(0.0, 0.0, Some(0.0), Some(6)));
        assert_eq!(table.records()[0].diameter, Some(6.0));
    }

    #[test]
    fn test_path_length_retention_on_failure() {
        let mut table = StatsTable::new();
        let k = key(10, 2, 3);
        table.ingest(k, &sample(1.0, 0.0, Some(2.5), None));
        table.ingest(k, &sample(1.0, 0.0, None, None));
        assert_eq!(table.records()[0].avg_path_length, Some(2.5));
    }

    #[test]
    fn test_path_length_established_after_initial_failure() {
        let mut table = StatsTable::new();
        let k = key(10, 2, 3);
        table.ingest(k, &sample(1.0, 0.0, None, None));
        assert_eq!(table.records()[0].avg_path_length, None);
        table.ingest(k, &sample(1.0, 0.0, Some(3.25), None));
        assert_eq!(table.records()[0].avg_path_length, Some(3.25));
    }

    #[test]
    fn test_merge_rounding() {
        assert_eq!(merge_mean(0.333, 0.334, 3), 0.334);
        assert_eq!(merge_mean(1.11, 2.22, 2), 1.67);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut table = StatsTable::new();
        table.ingest(key(30, 1, 1), &sample(1.0, 0.0, None, None));
        table.ingest(key(10, 1, 1), &sample(1.0, 0.0, None, None));
        table.ingest(key(20, 1, 1), &sample(1.0, 0.0, None, None));
        let ns: Vec<u64> = table.records().iter().map(|r| r.key.n).collect();
        assert_eq!(ns, vec![30, 10, 20]);
    }
}
