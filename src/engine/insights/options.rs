use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::engine::record::NormalizedRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionOption {
    pub name: String,
    pub data_points: usize,
}

/// Distinct values per filterable dimension, for populating selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DimensionOptions {
    pub commodities: Vec<DimensionOption>,
    pub districts: Vec<DimensionOption>,
    pub markets: Vec<DimensionOption>,
    pub varieties: Vec<DimensionOption>,
}

/// Distinct values are compared exactly and sorted by name.
pub fn dimension_options(records: &[NormalizedRecord]) -> DimensionOptions {
    DimensionOptions {
        commodities: distinct(records, "commodity"),
        districts: distinct(records, "district"),
        markets: distinct(records, "market"),
        varieties: distinct(records, "variety"),
    }
}

fn distinct(records: &[NormalizedRecord], dimension: &str) -> Vec<DimensionOption> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in records.iter().filter_map(|r| r.dimension(dimension)) {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(name, data_points)| DimensionOption {
            name: name.to_string(),
            data_points,
        })
        .collect()
}

/// Markets seen in `district` (case-insensitive), sorted.
pub fn markets_for_district(records: &[NormalizedRecord], district: &str) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.dimension_matches("district", district))
        .filter_map(|r| r.dimension("market"))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
