use std::collections::BTreeMap;

use serde::Serialize;

use super::bucket::PeriodBucket;
use crate::engine::record::NormalizedRecord;
use crate::shared::datetime::PeriodKey;

/// Finalized statistics for one measurement in one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasurementStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: u64,
}

/// Running `{count, mean, min, max}` for one measurement. The mean is updated incrementally so
/// values near `f64::MAX` never overflow an intermediate sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementAccumulator {
    count: u64,
    mean: f64,
    min: f64,
    max: f64,
}

impl Default for MeasurementAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementAccumulator {
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn update(&mut self, value: f64) {
        self.count += 1;
        self.mean += (value - self.mean) / self.count as f64;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn merge(&mut self, other: &MeasurementAccumulator) {
        if other.count == 0 {
            return;
        }
        let total = self.count + other.count;
        self.mean += (other.mean - self.mean) * (other.count as f64 / total as f64);
        self.count = total;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// `None` until at least one value was seen.
    pub fn finalize(&self) -> Option<MeasurementStats> {
        if self.count == 0 {
            return None;
        }
        Some(MeasurementStats {
            min: self.min,
            max: self.max,
            mean: self.mean,
            count: self.count,
        })
    }
}

/// Per-measurement accumulators for one period.
#[derive(Debug, Clone)]
pub struct BucketAccumulator {
    key: PeriodKey,
    measurements: BTreeMap<String, MeasurementAccumulator>,
}

impl BucketAccumulator {
    pub fn new(key: PeriodKey) -> Self {
        Self {
            key,
            measurements: BTreeMap::new(),
        }
    }

    /// Fold in every finite measurement of `record`; absent ones contribute nothing.
    pub fn update(&mut self, record: &NormalizedRecord) {
        for (name, value) in &record.measurements {
            if !value.is_finite() {
                continue;
            }
            match self.measurements.get_mut(name) {
                Some(acc) => acc.update(*value),
                None => {
                    let mut acc = MeasurementAccumulator::new();
                    acc.update(*value);
                    self.measurements.insert(name.clone(), acc);
                }
            }
        }
    }

    pub fn finalize(self) -> PeriodBucket {
        let stats = self
            .measurements
            .iter()
            .filter_map(|(name, acc)| acc.finalize().map(|s| (name.clone(), s)))
            .collect();
        PeriodBucket {
            period_key: self.key,
            stats,
        }
    }
}
