use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use super::RecordSource;
use crate::engine::errors::SourceError;
use crate::engine::filter::Predicate;
use crate::engine::record::RawObservation;

/// Newline-delimited JSON objects, one row per line.
#[derive(Debug, Clone)]
pub struct JsonLinesSource {
    path: PathBuf,
}

impl JsonLinesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSource for JsonLinesSource {
    async fn fetch(&self, _predicate: &Predicate) -> Result<Vec<RawObservation>, SourceError> {
        let file = File::open(&self.path).await.map_err(|e| {
            SourceError::Unavailable(format!("cannot open {}: {}", self.path.display(), e))
        })?;

        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut rows = Vec::new();
        let mut line_no = 0usize;
        let mut skipped = 0usize;

        // Raw bytes, so a line that is not UTF-8 is skipped like any other malformed line.
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            line_no += 1;
            let line = buf.trim_ascii();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_slice::<Value>(line) {
                Ok(Value::Object(row)) => rows.push(row),
                Ok(other) => {
                    skipped += 1;
                    warn!(
                        target: "crop_series::source",
                        line = line_no,
                        "Skipping non-object JSON line ({})",
                        json_kind(&other)
                    );
                }
                Err(e) => {
                    skipped += 1;
                    warn!(
                        target: "crop_series::source",
                        line = line_no,
                        "Skipping malformed JSON line: {}",
                        e
                    );
                }
            }
        }

        debug!(
            target: "crop_series::source",
            path = %self.path.display(),
            rows = rows.len(),
            skipped,
            "Read JSON-lines dataset"
        );
        Ok(rows)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
