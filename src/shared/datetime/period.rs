use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use super::season::SeasonCalendar;
use crate::command::types::Granularity;
use crate::engine::errors::QueryError;

/// Canonical identifier of a calendar period at one granularity.
///
/// Ordering and equality follow `(year, ordinal)`, so keys sort chronologically even where
/// the label would not (season names). `ordinal` is day-of-year, month, quarter, season rank,
/// or 0 for whole years.
#[derive(Debug, Clone)]
pub struct PeriodKey {
    year: i32,
    ordinal: u32,
    label: String,
}

impl PeriodKey {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for PeriodKey {
    fn eq(&self, other: &Self) -> bool {
        self.year == other.year && self.ordinal == other.ordinal
    }
}

impl Eq for PeriodKey {}

impl Hash for PeriodKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.year.hash(state);
        self.ordinal.hash(state);
    }
}

impl Ord for PeriodKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.ordinal).cmp(&(other.year, other.ordinal))
    }
}

impl PartialOrd for PeriodKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

/// Map a date onto its period at `granularity`.
pub fn period_of(date: NaiveDate, granularity: Granularity, seasons: &SeasonCalendar) -> PeriodKey {
    let year = date.year();
    match granularity {
        Granularity::Day => PeriodKey {
            year,
            ordinal: date.ordinal(),
            label: date.format("%Y-%m-%d").to_string(),
        },
        Granularity::Month => PeriodKey {
            year,
            ordinal: date.month(),
            label: format!("{:04}-{:02}", year, date.month()),
        },
        Granularity::Quarter => {
            let quarter = (date.month() - 1) / 3 + 1;
            PeriodKey {
                year,
                ordinal: quarter,
                label: format!("{:04}-Q{}", year, quarter),
            }
        }
        Granularity::Year => PeriodKey {
            year,
            ordinal: 0,
            label: format!("{:04}", year),
        },
        Granularity::Season => {
            let season = seasons.season_of(date.month());
            PeriodKey {
                year,
                ordinal: season.rank,
                label: format!("{:04}-{}", year, season.name),
            }
        }
    }
}

/// Text-granularity entry point: fails with `InvalidGranularity` for unsupported values.
pub fn resolve_period(
    date: NaiveDate,
    granularity: &str,
    seasons: &SeasonCalendar,
) -> Result<PeriodKey, QueryError> {
    let granularity: Granularity = granularity.parse()?;
    Ok(period_of(date, granularity, seasons))
}
