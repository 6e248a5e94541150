use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::errors::QueryError;

/// Calendar resolution at which observations are bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
    Quarter,
    Year,
    Season,
}

impl Granularity {
    pub const ALL: [Granularity; 5] = [
        Granularity::Day,
        Granularity::Month,
        Granularity::Quarter,
        Granularity::Year,
        Granularity::Season,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
            Granularity::Season => "season",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "month" => Ok(Granularity::Month),
            "quarter" => Ok(Granularity::Quarter),
            "year" => Ok(Granularity::Year),
            "season" => Ok(Granularity::Season),
            _ => Err(QueryError::InvalidGranularity(s.to_string())),
        }
    }
}

/// Optional filter criteria; every provided field narrows the result (logical AND).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commodity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_month: Option<u32>,
}

impl FilterCriteria {
    /// Dimension criteria as `(dimension name, expected value)` pairs, in a fixed order.
    pub fn dimension_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("commodity", self.commodity.as_deref()),
            ("district", self.district.as_deref()),
            ("market", self.market.as_deref()),
            ("variety", self.variety.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .filter(|(_, v)| !v.trim().is_empty())
        .collect()
    }
}

/// A request for an aggregated price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendQuery {
    #[serde(default)]
    pub criteria: FilterCriteria,
    pub granularity: Granularity,
    /// Measurements to emit; empty means every measurement present in the result.
    #[serde(default)]
    pub measurements: Vec<String>,
}

impl TrendQuery {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            granularity,
            measurements: Vec::new(),
        }
    }

    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn with_measurements<I, S>(mut self, measurements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.measurements = measurements.into_iter().map(Into::into).collect();
        self
    }
}
