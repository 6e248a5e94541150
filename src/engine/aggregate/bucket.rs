use std::collections::BTreeMap;

use serde::Serialize;

use super::accumulator::MeasurementStats;
use crate::shared::datetime::PeriodKey;

/// One period of an aggregated series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodBucket {
    pub period_key: PeriodKey,
    pub stats: BTreeMap<String, MeasurementStats>,
}

impl PeriodBucket {
    pub fn label(&self) -> &str {
        self.period_key.label()
    }

    pub fn stat(&self, measurement: &str) -> Option<&MeasurementStats> {
        self.stats.get(measurement)
    }

    /// Highest per-measurement count in the bucket. Approximates the number of contributing
    /// records; it undercounts when measurements were present on disjoint records.
    pub fn max_count(&self) -> u64 {
        self.stats.values().map(|s| s.count).max().unwrap_or(0)
    }
}
