use std::fmt::Debug;

use chrono::{Datelike, NaiveDate};

use super::sql::{SqlColumns, SqlParam, SqlWriter};
use crate::engine::record::NormalizedRecord;

/// A constraint that can be checked in memory or rendered as SQL with the same meaning.
pub trait Condition: Send + Sync + Debug {
    fn evaluate(&self, record: &NormalizedRecord) -> bool;

    fn to_sql(&self, columns: &SqlColumns, sql: &mut SqlWriter) -> String;
}

/// Trimmed, case-insensitive equality on one dimension.
#[derive(Debug)]
pub struct DimensionCondition {
    field: String,
    value: String,
}

impl DimensionCondition {
    pub fn new(field: impl Into<String>, value: &str) -> Self {
        Self {
            field: field.into(),
            value: value.trim().to_string(),
        }
    }
}

impl Condition for DimensionCondition {
    fn evaluate(&self, record: &NormalizedRecord) -> bool {
        record.dimension_matches(&self.field, &self.value)
    }

    fn to_sql(&self, columns: &SqlColumns, sql: &mut SqlWriter) -> String {
        match columns.dimension(&self.field) {
            Some(column) => {
                let placeholder = sql.bind(SqlParam::Text(self.value.to_lowercase()));
                format!("LOWER(TRIM({column})) = {placeholder}")
            }
            None => "1=0".to_string(),
        }
    }
}

/// Inclusive bounds on some ordered property of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds<T> {
    pub start: Option<T>,
    pub end: Option<T>,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(start: Option<T>, end: Option<T>) -> Self {
        Self { start, end }
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, value: T) -> bool {
        self.start.is_none_or(|s| value >= s) && self.end.is_none_or(|e| value <= e)
    }

    fn render(&self, column: &str, sql: &mut SqlWriter, param: impl Fn(T) -> SqlParam) -> String {
        let mut parts = Vec::with_capacity(2);
        if let Some(start) = self.start {
            parts.push(format!("{column} >= {}", sql.bind(param(start))));
        }
        if let Some(end) = self.end {
            parts.push(format!("{column} <= {}", sql.bind(param(end))));
        }
        if parts.is_empty() {
            "1=1".to_string()
        } else {
            parts.join(" AND ")
        }
    }
}

#[derive(Debug)]
pub struct DateRangeCondition {
    bounds: Bounds<NaiveDate>,
}

impl DateRangeCondition {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            bounds: Bounds::new(start, end),
        }
    }
}

impl Condition for DateRangeCondition {
    fn evaluate(&self, record: &NormalizedRecord) -> bool {
        self.bounds.contains(record.timestamp)
    }

    fn to_sql(&self, columns: &SqlColumns, sql: &mut SqlWriter) -> String {
        self.bounds.render(&columns.date, sql, SqlParam::Date)
    }
}

/// Calendar year of the record's timestamp.
#[derive(Debug)]
pub struct YearRangeCondition {
    bounds: Bounds<i32>,
}

impl YearRangeCondition {
    pub fn new(start: Option<i32>, end: Option<i32>) -> Self {
        Self {
            bounds: Bounds::new(start, end),
        }
    }
}

impl Condition for YearRangeCondition {
    fn evaluate(&self, record: &NormalizedRecord) -> bool {
        self.bounds.contains(record.timestamp.year())
    }

    fn to_sql(&self, columns: &SqlColumns, sql: &mut SqlWriter) -> String {
        self.bounds
            .render(&columns.year, sql, |y| SqlParam::Int(i64::from(y)))
    }
}

/// Month of year, whatever the year.
#[derive(Debug)]
pub struct MonthRangeCondition {
    bounds: Bounds<u32>,
}

impl MonthRangeCondition {
    pub fn new(start: Option<u32>, end: Option<u32>) -> Self {
        Self {
            bounds: Bounds::new(start, end),
        }
    }
}

impl Condition for MonthRangeCondition {
    fn evaluate(&self, record: &NormalizedRecord) -> bool {
        self.bounds.contains(record.timestamp.month())
    }

    fn to_sql(&self, columns: &SqlColumns, sql: &mut SqlWriter) -> String {
        self.bounds
            .render(&columns.month, sql, |m| SqlParam::Int(i64::from(m)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// AND/OR over child conditions. An empty AND holds; an empty OR does not.
#[derive(Debug)]
pub struct LogicalCondition {
    conditions: Vec<Box<dyn Condition>>,
    operation: LogicalOp,
}

impl LogicalCondition {
    pub fn new(conditions: Vec<Box<dyn Condition>>, operation: LogicalOp) -> Self {
        Self {
            conditions,
            operation,
        }
    }
}

impl Condition for LogicalCondition {
    fn evaluate(&self, record: &NormalizedRecord) -> bool {
        match self.operation {
            LogicalOp::And => self.conditions.iter().all(|c| c.evaluate(record)),
            LogicalOp::Or => self.conditions.iter().any(|c| c.evaluate(record)),
        }
    }

    fn to_sql(&self, columns: &SqlColumns, sql: &mut SqlWriter) -> String {
        let (empty, joiner) = match self.operation {
            LogicalOp::And => ("1=1", " AND "),
            LogicalOp::Or => ("1=0", " OR "),
        };
        if self.conditions.is_empty() {
            return empty.to_string();
        }
        let parts: Vec<String> = self
            .conditions
            .iter()
            .map(|c| format!("({})", c.to_sql(columns, sql)))
            .collect();
        parts.join(joiner)
    }
}
