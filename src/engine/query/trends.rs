use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::command::types::{FilterCriteria, Granularity, TrendQuery};
use crate::engine::aggregate::aggregate;
use crate::engine::errors::QueryError;
use crate::engine::filter::{Predicate, build_filter};
use crate::engine::format::{SeriesRow, format};
use crate::engine::normalize::{Normalizer, RejectReport, normalize_batch};
use crate::engine::record::{NormalizedRecord, RawObservation};
use crate::engine::source::RecordSource;
use crate::shared::datetime::SeasonCalendar;

/// Payload of a trend query: the series plus batch accounting.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResponse {
    pub data: Vec<SeriesRow>,
    /// Rows returned by the source.
    pub total_records: usize,
    /// Normalized records that passed the filter and were aggregated.
    pub matched_records: usize,
    pub rejects: RejectReport,
    pub granularity: Granularity,
    pub filters: FilterCriteria,
}

/// Normalized, filtered, chronologically sorted records of one fetch.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub records: Vec<NormalizedRecord>,
    pub total_rows: usize,
    pub report: RejectReport,
}

/// Normalize `rows`, drop rejects, re-apply `predicate` and stable-sort by timestamp.
pub fn load_records(
    rows: &[RawObservation],
    predicate: &Predicate,
    normalizer: &Normalizer,
) -> LoadedRecords {
    let batch = normalize_batch(rows, normalizer);
    if !batch.report.is_clean() {
        warn!(
            target: "crop_series::query",
            rows = batch.report.rows_seen,
            rejected = batch.report.rejected(),
            reasons = ?batch.report.by_reason,
            "Rejected rows during normalization"
        );
    }

    let mut records = batch.records;
    predicate.retain(&mut records);
    records.sort_by_key(|r| r.timestamp);

    LoadedRecords {
        records,
        total_rows: rows.len(),
        report: batch.report,
    }
}

/// The synchronous half of a trend query, over rows already fetched.
pub fn run_pipeline(
    rows: &[RawObservation],
    predicate: &Predicate,
    query: &TrendQuery,
    normalizer: &Normalizer,
    calendar: &SeasonCalendar,
) -> TrendResponse {
    let loaded = load_records(rows, predicate, normalizer);
    let buckets = aggregate(&loaded.records, query.granularity, calendar);
    let data = format(&buckets, &query.measurements);

    TrendResponse {
        data,
        total_records: loaded.total_rows,
        matched_records: loaded.records.len(),
        rejects: loaded.report,
        granularity: query.granularity,
        filters: query.criteria.clone(),
    }
}

/// Fetches from a source and runs the aggregation pipeline.
#[derive(Clone)]
pub struct TrendService {
    source: Arc<dyn RecordSource>,
    normalizer: Normalizer,
    calendar: SeasonCalendar,
}

impl TrendService {
    pub fn new(
        source: Arc<dyn RecordSource>,
        normalizer: Normalizer,
        calendar: SeasonCalendar,
    ) -> Self {
        Self {
            source,
            normalizer,
            calendar,
        }
    }

    pub fn calendar(&self) -> &SeasonCalendar {
        &self.calendar
    }

    pub async fn run(&self, query: &TrendQuery) -> Result<TrendResponse, QueryError> {
        let predicate = build_filter(&query.criteria)?;
        let rows = self.source.fetch(&predicate).await?;
        let response = run_pipeline(&rows, &predicate, query, &self.normalizer, &self.calendar);
        info!(
            target: "crop_series::query",
            granularity = %query.granularity,
            fetched = response.total_records,
            matched = response.matched_records,
            periods = response.data.len(),
            "Trend query complete"
        );
        Ok(response)
    }

    /// Fetch and normalize records matching `criteria` without aggregating them.
    pub async fn records(&self, criteria: &FilterCriteria) -> Result<LoadedRecords, QueryError> {
        self.records_matching(&build_filter(criteria)?).await
    }

    pub async fn records_matching(
        &self,
        predicate: &Predicate,
    ) -> Result<LoadedRecords, QueryError> {
        let rows = self.source.fetch(predicate).await?;
        Ok(load_records(&rows, predicate, &self.normalizer))
    }
}
