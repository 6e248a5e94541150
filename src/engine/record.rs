use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

/// A row as delivered by a data source: field names vary by dataset family.
pub type RawObservation = serde_json::Map<String, serde_json::Value>;

/// Canonical in-memory observation. Only built by the normalizer, which guarantees a valid
/// timestamp and at least one finite measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub timestamp: NaiveDate,
    pub dimensions: BTreeMap<String, String>,
    pub measurements: BTreeMap<String, f64>,
}

impl NormalizedRecord {
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions.get(name).map(String::as_str)
    }

    pub fn measurement(&self, name: &str) -> Option<f64> {
        self.measurements.get(name).copied()
    }

    /// Trimmed, Unicode-lowercased dimension comparison, agreeing with SQL `LOWER`.
    pub fn dimension_matches(&self, name: &str, value: &str) -> bool {
        self.dimension(name)
            .is_some_and(|v| v.trim().to_lowercase() == value.trim().to_lowercase())
    }
}
