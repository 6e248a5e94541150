use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

use crop_series::engine::normalize::{Normalizer, RecordSchema};
use crop_series::engine::query::{TrendResponse, TrendService};
use crop_series::engine::source::{JsonLinesSource, MemorySource, RecordSource};
use crop_series::shared::datetime::SeasonCalendar;
use tempfile::NamedTempFile;
use tracing::info;

use crate::integration::matcher::row_mismatches;
use crate::integration::scenarios::TrendScenario;

async fn run_with(source: Arc<dyn RecordSource>, scenario: &TrendScenario) -> TrendResponse {
    let service = TrendService::new(
        source,
        Normalizer::new(RecordSchema::preset(scenario.preset)),
        SeasonCalendar::default(),
    );
    service
        .run(&scenario.query)
        .await
        .unwrap_or_else(|e| panic!("[{}] query failed: {}", scenario.name, e))
}

fn write_jsonl(scenario: &TrendScenario) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create dataset file");
    for row in &scenario.rows {
        writeln!(file, "{}", serde_json::to_string(row).unwrap()).unwrap();
    }
    file
}

/// Runs a scenario against an in-memory source and a JSON-lines file holding the same rows;
/// both must produce the same response, and it must meet the expectation.
pub async fn run_scenario(scenario: &TrendScenario) {
    info!("Running scenario: {}", scenario.name);

    let from_memory = run_with(Arc::new(MemorySource::new(scenario.rows.clone())), scenario).await;
    let file = write_jsonl(scenario);
    let from_file = run_with(Arc::new(JsonLinesSource::new(file.path())), scenario).await;

    let memory_json = serde_json::to_value(&from_memory).unwrap();
    assert_eq!(
        memory_json,
        serde_json::to_value(&from_file).unwrap(),
        "[{}] memory and file sources disagree",
        scenario.name
    );

    let expect = &scenario.expect;
    assert_eq!(
        from_memory.total_records, expect.total_records,
        "[{}] total records",
        scenario.name
    );
    assert_eq!(
        from_memory.matched_records, expect.matched_records,
        "[{}] matched records",
        scenario.name
    );

    let rejects: BTreeMap<String, usize> = from_memory
        .rejects
        .by_reason
        .iter()
        .map(|(reason, count)| (reason.code().to_string(), *count))
        .collect();
    assert_eq!(rejects, expect.rejects, "[{}] rejects", scenario.name);

    let rows = memory_json["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(
        rows.len(),
        expect.periods.len(),
        "[{}] period count in {:?}",
        scenario.name,
        rows
    );
    for (want, got) in expect.periods.iter().zip(&rows) {
        let mismatches = row_mismatches(want, got);
        assert!(
            mismatches.is_empty(),
            "[{}] row {} mismatched: {:?}",
            scenario.name,
            got["period"],
            mismatches
        );
    }
}
