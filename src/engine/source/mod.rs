use async_trait::async_trait;

use crate::engine::errors::SourceError;
use crate::engine::filter::Predicate;
use crate::engine::record::RawObservation;

pub mod json_lines;
pub mod memory;

pub use json_lines::JsonLinesSource;
pub use memory::MemorySource;

/// Supplies raw rows, nominally in ascending timestamp order.
///
/// Sources may push the predicate down or ignore it; the pipeline re-applies it after
/// normalization either way.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, predicate: &Predicate) -> Result<Vec<RawObservation>, SourceError>;
}
