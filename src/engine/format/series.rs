use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::engine::aggregate::PeriodBucket;

/// One flat chart row: `period`, then `<m>_mean`, `<m>_min`, `<m>_max` per measurement, then
/// `data_points`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub period: String,
    #[serde(flatten)]
    pub values: IndexMap<String, Option<f64>>,
    pub data_points: u64,
}

impl SeriesRow {
    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied().flatten()
    }
}

/// Every measurement name that has statistics in any bucket, sorted.
pub fn measurements_in(buckets: &[PeriodBucket]) -> Vec<String> {
    buckets
        .iter()
        .flat_map(|b| b.stats.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Flatten buckets into rows. An empty `requested` list selects every measurement present.
/// A measurement with no data in a bucket is `null`, never zero.
pub fn format(buckets: &[PeriodBucket], requested: &[String]) -> Vec<SeriesRow> {
    let columns = if requested.is_empty() {
        measurements_in(buckets)
    } else {
        requested.to_vec()
    };

    buckets
        .iter()
        .map(|bucket| {
            let mut values = IndexMap::with_capacity(columns.len() * 3);
            for name in &columns {
                let stats = bucket.stat(name);
                values.insert(format!("{name}_mean"), stats.map(|s| s.mean));
                values.insert(format!("{name}_min"), stats.map(|s| s.min));
                values.insert(format!("{name}_max"), stats.map(|s| s.max));
            }
            SeriesRow {
                period: bucket.label().to_string(),
                values,
                data_points: bucket.max_count(),
            }
        })
        .collect()
}
