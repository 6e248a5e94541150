use std::fmt::Display;

use tracing::debug;

use super::condition::{
    Bounds, Condition, DateRangeCondition, DimensionCondition, LogicalCondition, LogicalOp,
    MonthRangeCondition, YearRangeCondition,
};
use super::sql::{SqlColumns, SqlFragment, SqlWriter};
use crate::command::types::FilterCriteria;
use crate::engine::errors::QueryError;
use crate::engine::record::NormalizedRecord;

/// Conjunction of conditions. With no conditions every record matches.
#[derive(Debug, Default)]
pub struct Predicate {
    conditions: Vec<Box<dyn Condition>>,
}

impl Predicate {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn and(mut self, condition: impl Condition + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }

    /// Add a group that holds when any of `alternatives` holds.
    pub fn any_of(self, alternatives: Vec<Box<dyn Condition>>) -> Self {
        self.and(LogicalCondition::new(alternatives, LogicalOp::Or))
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        self.conditions.iter().all(|c| c.evaluate(record))
    }

    /// Keep only matching records, preserving order.
    pub fn retain(&self, records: &mut Vec<NormalizedRecord>) {
        if !self.is_empty() {
            records.retain(|r| self.matches(r));
        }
    }

    /// Render as `1=1 AND (…) AND (…)` with positional parameters.
    pub fn to_sql(&self, columns: &SqlColumns) -> SqlFragment {
        let mut sql = SqlWriter::new();
        let mut clause = String::from("1=1");
        for condition in &self.conditions {
            let part = condition.to_sql(columns, &mut sql);
            clause.push_str(" AND (");
            clause.push_str(&part);
            clause.push(')');
        }
        sql.finish(clause)
    }
}

/// Build the predicate for `criteria`, rejecting inverted or out-of-range bounds.
pub fn build_filter(criteria: &FilterCriteria) -> Result<Predicate, QueryError> {
    let dates = Bounds::new(criteria.start_date, criteria.end_date);
    let years = Bounds::new(criteria.start_year, criteria.end_year);
    let months = Bounds::new(criteria.start_month, criteria.end_month);

    check_order("date", &dates)?;
    check_order("year", &years)?;
    for month in [months.start, months.end].into_iter().flatten() {
        if !(1..=12).contains(&month) {
            return Err(QueryError::invalid_range(
                "month",
                format!("{month} is outside 1..=12"),
            ));
        }
    }
    check_order("month", &months)?;

    let mut predicate = Predicate::open();
    for (name, value) in criteria.dimension_pairs() {
        predicate = predicate.and(DimensionCondition::new(name, value));
    }
    if !dates.is_open() {
        predicate = predicate.and(DateRangeCondition::new(dates.start, dates.end));
    }
    if !years.is_open() {
        predicate = predicate.and(YearRangeCondition::new(years.start, years.end));
    }
    if !months.is_open() {
        predicate = predicate.and(MonthRangeCondition::new(months.start, months.end));
    }

    debug!(
        target: "crop_series::filter",
        conditions = predicate.len(),
        "Built filter predicate"
    );
    Ok(predicate)
}

fn check_order<T: PartialOrd + Copy + Display>(
    field: &'static str,
    bounds: &Bounds<T>,
) -> Result<(), QueryError> {
    match (bounds.start, bounds.end) {
        (Some(start), Some(end)) if start > end => Err(QueryError::invalid_range(
            field,
            format!("start {start} is after end {end}"),
        )),
        _ => Ok(()),
    }
}
