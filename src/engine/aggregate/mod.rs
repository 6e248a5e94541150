pub mod accumulator;
pub mod bucket;
pub mod sink;

pub use accumulator::{BucketAccumulator, MeasurementAccumulator, MeasurementStats};
pub use bucket::PeriodBucket;
pub use sink::{PeriodSink, aggregate};
