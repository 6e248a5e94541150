pub mod builder;
pub mod condition;
pub mod sql;

pub use builder::{Predicate, build_filter};
pub use condition::{
    Condition, DateRangeCondition, DimensionCondition, LogicalCondition, LogicalOp,
    MonthRangeCondition, YearRangeCondition,
};
pub use sql::{SqlColumns, SqlFragment, SqlParam};

#[cfg(test)]
mod condition_test;
