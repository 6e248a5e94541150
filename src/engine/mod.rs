pub mod aggregate;
pub mod errors;
pub mod filter;
pub mod format;
pub mod insights;
pub mod normalize;
pub mod predict;
pub mod query;
pub mod record;
pub mod source;

pub use errors::*;
