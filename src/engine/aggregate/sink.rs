use std::collections::HashMap;

use ahash::RandomState as AHashRandomState;
use tracing::debug;

use super::accumulator::BucketAccumulator;
use super::bucket::PeriodBucket;
use crate::command::types::Granularity;
use crate::engine::record::NormalizedRecord;
use crate::shared::datetime::{PeriodKey, SeasonCalendar, period_of};

/// Collects records into period buckets. Owned by a single aggregation call.
pub struct PeriodSink<'c> {
    granularity: Granularity,
    calendar: &'c SeasonCalendar,
    groups: HashMap<PeriodKey, BucketAccumulator, AHashRandomState>,
    records_seen: usize,
}

impl<'c> PeriodSink<'c> {
    pub fn new(granularity: Granularity, calendar: &'c SeasonCalendar) -> Self {
        Self {
            granularity,
            calendar,
            groups: HashMap::with_hasher(AHashRandomState::new()),
            records_seen: 0,
        }
    }

    pub fn on_record(&mut self, record: &NormalizedRecord) {
        let key = period_of(record.timestamp, self.granularity, self.calendar);
        self.groups
            .entry(key)
            .or_insert_with_key(|k| BucketAccumulator::new(k.clone()))
            .update(record);
        self.records_seen += 1;
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Finalize every bucket, ordered chronologically.
    pub fn into_buckets(self) -> Vec<PeriodBucket> {
        let mut buckets: Vec<PeriodBucket> = self
            .groups
            .into_values()
            .map(BucketAccumulator::finalize)
            .collect();
        buckets.sort_by(|a, b| a.period_key.cmp(&b.period_key));
        debug!(
            target: "crop_series::aggregate",
            granularity = %self.granularity,
            records = self.records_seen,
            buckets = buckets.len(),
            "Aggregated records into periods"
        );
        buckets
    }
}

/// Bucket `records` at `granularity` and compute per-measurement statistics.
pub fn aggregate(
    records: &[NormalizedRecord],
    granularity: Granularity,
    calendar: &SeasonCalendar,
) -> Vec<PeriodBucket> {
    let mut sink = PeriodSink::new(granularity, calendar);
    for record in records {
        sink.on_record(record);
    }
    sink.into_buckets()
}
