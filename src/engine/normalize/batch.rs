use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::normalizer::Normalizer;
use crate::engine::errors::{RejectReason, Rejected};
use crate::engine::record::{NormalizedRecord, RawObservation};

/// Rejected rows kept verbatim in a report; the per-reason counts cover the rest.
pub const MAX_REJECT_SAMPLES: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRejection {
    /// Position of the row in the fetched batch.
    pub index: usize,
    pub reason: RejectReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RejectReport {
    pub rows_seen: usize,
    pub accepted: usize,
    pub by_reason: BTreeMap<RejectReason, usize>,
    pub samples: Vec<RowRejection>,
}

impl RejectReport {
    pub fn rejected(&self) -> usize {
        self.rows_seen - self.accepted
    }

    pub fn is_clean(&self) -> bool {
        self.by_reason.is_empty()
    }

    pub fn count(&self, reason: RejectReason) -> usize {
        self.by_reason.get(&reason).copied().unwrap_or(0)
    }

    fn record_accept(&mut self) {
        self.rows_seen += 1;
        self.accepted += 1;
    }

    fn record_reject(&mut self, index: usize, rejected: Rejected) {
        self.rows_seen += 1;
        *self.by_reason.entry(rejected.reason).or_insert(0) += 1;
        if self.samples.len() < MAX_REJECT_SAMPLES {
            self.samples.push(RowRejection {
                index,
                reason: rejected.reason,
                field: rejected.field,
            });
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub records: Vec<NormalizedRecord>,
    pub report: RejectReport,
}

/// Normalize every row, keeping going past rejects.
pub fn normalize_batch<'a, I>(rows: I, normalizer: &Normalizer) -> NormalizedBatch
where
    I: IntoIterator<Item = &'a RawObservation>,
{
    let mut batch = NormalizedBatch::default();
    for (index, row) in rows.into_iter().enumerate() {
        match normalizer.normalize(row) {
            Ok(record) => {
                batch.report.record_accept();
                batch.records.push(record);
            }
            Err(rejected) => {
                debug!(
                    target: "crop_series::normalize",
                    index,
                    reason = rejected.reason.code(),
                    field = rejected.field.as_deref().unwrap_or("-"),
                    "Row rejected"
                );
                batch.report.record_reject(index, rejected);
            }
        }
    }
    batch
}
