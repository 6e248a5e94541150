pub mod model;

pub use model::{
    AggregationConfig, LoggingConfig, PredictionConfig, SchemaConfig, Settings, SourceConfig,
    load_settings,
};
