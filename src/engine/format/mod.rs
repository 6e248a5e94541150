pub mod series;

pub use series::{SeriesRow, format, measurements_in};
