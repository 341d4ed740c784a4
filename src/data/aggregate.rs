//! The counting half of the filter-and-aggregate pipeline: six independent
//! aggregations over the current filtered view.
//!
//! Every function is a pure map from (dataset, filtered indices) to an
//! ordered key/count table. Records whose grouping key is missing are
//! skipped by that aggregation only; they still feed the other five.

use std::collections::BTreeMap;

use super::model::{Incident, IncidentDataset, YearMonth};

/// Ordered key/count pairs produced by one aggregation.
pub type Counts<K> = Vec<(K, u64)>;

// ---------------------------------------------------------------------------
// The six aggregations
// ---------------------------------------------------------------------------

/// Incident count per year + calendar month, in chronological order.
///
/// Grouping is by year *and* month so that, say, January 2019 and January
/// 2020 stay separate buckets on the trend line.
pub fn monthly_trend(dataset: &IncidentDataset, indices: &[usize]) -> Counts<YearMonth> {
    count_by(dataset, indices, Incident::year_month)
}

/// Incident count per victims-under-18 bucket, ascending bucket key.
pub fn victims_under_18_distribution(dataset: &IncidentDataset, indices: &[usize]) -> Counts<u32> {
    count_by(dataset, indices, |incident| incident.victims_under_18)
}

/// Incident count per offense-type string, most frequent first.
pub fn offense_breakdown(dataset: &IncidentDataset, indices: &[usize]) -> Counts<String> {
    by_descending_count(count_by(dataset, indices, |incident| {
        incident.offense.clone()
    }))
}

/// Incident count per offenders-under-18 bucket, ascending bucket key.
pub fn offenders_under_18_distribution(
    dataset: &IncidentDataset,
    indices: &[usize],
) -> Counts<u32> {
    count_by(dataset, indices, |incident| incident.offenders_under_18)
}

/// Incident count per zip-code label, most frequent first.
pub fn zip_code_breakdown(dataset: &IncidentDataset, indices: &[usize]) -> Counts<String> {
    by_descending_count(count_by(dataset, indices, |incident| {
        incident.zip_code.clone()
    }))
}

/// Incident count per bias-motivation string, most frequent first.
pub fn bias_breakdown(dataset: &IncidentDataset, indices: &[usize]) -> Counts<String> {
    by_descending_count(count_by(dataset, indices, |incident| incident.bias.clone()))
}

// ---------------------------------------------------------------------------
// Grouping helpers
// ---------------------------------------------------------------------------

/// Count filtered records per key, skipping records where `key` is `None`.
/// The result comes back in ascending key order.
fn count_by<K: Ord>(
    dataset: &IncidentDataset,
    indices: &[usize],
    key: impl Fn(&Incident) -> Option<K>,
) -> Counts<K> {
    let mut counts: BTreeMap<K, u64> = BTreeMap::new();
    for &i in indices {
        if let Some(k) = key(&dataset.incidents[i]) {
            *counts.entry(k).or_default() += 1;
        }
    }
    counts.into_iter().collect()
}

/// Reorder key-ascending counts into most-frequent-first order. The sort is
/// stable, so ties stay in key order and the output is deterministic.
fn by_descending_count<K: Ord>(mut counts: Counts<K>) -> Counts<K> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
