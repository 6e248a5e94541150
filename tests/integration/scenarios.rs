use std::collections::BTreeMap;
use std::fs;

use crop_series::command::types::TrendQuery;
use crop_series::engine::normalize::SchemaPreset;
use crop_series::engine::record::RawObservation;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct TrendScenario {
    pub name: String,
    #[serde(default)]
    pub preset: SchemaPreset,
    pub rows: Vec<RawObservation>,
    pub query: TrendQuery,
    pub expect: Expectation,
}

#[derive(Debug, Deserialize)]
pub struct Expectation {
    pub total_records: usize,
    pub matched_records: usize,
    /// Reject counts by reason code. Omitted reasons must not occur.
    #[serde(default)]
    pub rejects: BTreeMap<String, usize>,
    /// One partial row per period, in order. Only the listed columns are checked.
    pub periods: Vec<BTreeMap<String, Value>>,
}

pub fn load_scenarios_from_json(path: &str) -> Vec<TrendScenario> {
    let content = fs::read_to_string(path).expect("Failed to read scenario file");
    serde_json::from_str(&content).expect("Invalid JSON format")
}
