pub mod aliases;
pub mod batch;
pub mod normalizer;
pub mod numeric;
pub mod schema;

pub use aliases::{FieldAliases, canonicalize_key};
pub use batch::{NormalizedBatch, RejectReport, RowRejection, normalize_batch};
pub use normalizer::{Normalizer, normalize};
pub use schema::{DateFields, MeasurementSpec, RecordSchema, SchemaPreset};

#[cfg(test)]
mod numeric_test;
