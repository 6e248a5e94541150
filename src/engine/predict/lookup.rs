use chrono::Datelike;

use super::features::FeatureSource;
use crate::engine::record::NormalizedRecord;

/// A history row chosen for a prediction and how closely it matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryMatch<'a> {
    pub record: &'a NormalizedRecord,
    pub source: FeatureSource,
}

/// Normalized per-district history (rainfall or production) used to fill features.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<NormalizedRecord>,
}

impl History {
    pub fn new(records: Vec<NormalizedRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn in_district<'a>(&'a self, district: &str) -> impl Iterator<Item = &'a NormalizedRecord> {
        self.records
            .iter()
            .filter(move |r| r.dimension_matches("district", district))
    }

    /// Exact (district, year, month), else the same district and year with the nearest month.
    /// Equal distances go to the earlier month.
    pub fn rainfall_for(&self, district: &str, year: i32, month: u32) -> Option<HistoryMatch<'_>> {
        let same_year = || {
            self.in_district(district)
                .filter(move |r| r.timestamp.year() == year)
        };
        if let Some(record) = same_year().find(|r| r.timestamp.month() == month) {
            return Some(HistoryMatch {
                record,
                source: FeatureSource::HistoryExact,
            });
        }
        same_year()
            .min_by_key(|r| (r.timestamp.month().abs_diff(month), r.timestamp.month()))
            .map(|record| HistoryMatch {
                record,
                source: FeatureSource::HistoryFallback,
            })
    }

    /// Exact (district, year), else the nearest year for the district. Equal distances go to
    /// the earlier year.
    pub fn production_for(&self, district: &str, year: i32) -> Option<HistoryMatch<'_>> {
        if let Some(record) = self
            .in_district(district)
            .find(|r| r.timestamp.year() == year)
        {
            return Some(HistoryMatch {
                record,
                source: FeatureSource::HistoryExact,
            });
        }
        self.in_district(district)
            .min_by_key(|r| (r.timestamp.year().abs_diff(year), r.timestamp.year()))
            .map(|record| HistoryMatch {
                record,
                source: FeatureSource::HistoryFallback,
            })
    }
}
