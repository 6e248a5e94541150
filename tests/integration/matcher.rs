use std::collections::BTreeMap;

use serde_json::Value;

const TOLERANCE: f64 = 1e-6;

/// Compares the listed columns of `expected` against `actual`; unlisted columns are ignored.
/// Numbers match within a small tolerance.
pub fn row_mismatches(expected: &BTreeMap<String, Value>, actual: &Value) -> Vec<String> {
    expected
        .iter()
        .filter_map(|(column, want)| {
            let got = actual.get(column).unwrap_or(&Value::Null);
            if values_match(want, got) {
                None
            } else {
                Some(format!("{}: expected {}, got {}", column, want, got))
            }
        })
        .collect()
}

fn values_match(want: &Value, got: &Value) -> bool {
    match (want.as_f64(), got.as_f64()) {
        (Some(w), Some(g)) => (w - g).abs() < TOLERANCE,
        _ => want == got,
    }
}
