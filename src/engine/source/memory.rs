use async_trait::async_trait;

use super::RecordSource;
use crate::engine::errors::SourceError;
use crate::engine::filter::Predicate;
use crate::engine::record::RawObservation;

/// Rows held in memory. No pushdown.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<RawObservation>,
}

impl MemorySource {
    pub fn new(rows: Vec<RawObservation>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn fetch(&self, _predicate: &Predicate) -> Result<Vec<RawObservation>, SourceError> {
        Ok(self.rows.clone())
    }
}
