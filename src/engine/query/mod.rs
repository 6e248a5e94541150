pub mod trends;

pub use trends::{LoadedRecords, TrendResponse, TrendService, load_records, run_pipeline};

#[cfg(test)]
mod trends_test;
