pub mod compare;
pub mod latest;
pub mod options;

pub use compare::{CommoditySeries, compare_commodities, compare_predicate};
pub use latest::{DEFAULT_LATEST_LIMIT, latest_per_group};
pub use options::{DimensionOption, DimensionOptions, dimension_options, markets_for_district};
