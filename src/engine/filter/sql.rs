use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

/// Column expressions a SQL-backed source filters on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlColumns {
    pub date: String,
    pub year: String,
    pub month: String,
    /// Dimension name → column. A dimension without a column cannot match any row.
    pub dimensions: BTreeMap<String, String>,
}

impl SqlColumns {
    /// `crop_prices`: one `arrival_date` column per row.
    pub fn crop_prices() -> Self {
        Self {
            date: "arrival_date".into(),
            year: "EXTRACT(YEAR FROM arrival_date)".into(),
            month: "EXTRACT(MONTH FROM arrival_date)".into(),
            dimensions: [
                ("commodity", "commodity"),
                ("district", "district"),
                ("market", "market"),
                ("variety", "variety"),
            ]
            .into_iter()
            .map(|(d, c)| (d.to_string(), c.to_string()))
            .collect(),
        }
    }

    /// `onion_prices`: integer `year` and `month` columns, no commodity column.
    pub fn onion_prices() -> Self {
        Self {
            date: "make_date(year, month, 1)".into(),
            year: "year".into(),
            month: "month".into(),
            dimensions: [
                ("district", "district"),
                ("market", "market_name"),
                ("variety", "variety"),
            ]
            .into_iter()
            .map(|(d, c)| (d.to_string(), c.to_string()))
            .collect(),
        }
    }

    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions.get(name).map(String::as_str)
    }
}

/// A bound parameter, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SqlParam {
    Text(String),
    Date(NaiveDate),
    Int(i64),
}

/// A WHERE clause body with `$n` placeholders and the values bound to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlFragment {
    pub clause: String,
    pub params: Vec<SqlParam>,
}

/// Collects parameters while conditions render, handing out `$1, $2, …`.
#[derive(Debug, Default)]
pub struct SqlWriter {
    params: Vec<SqlParam>,
}

impl SqlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    pub fn finish(self, clause: String) -> SqlFragment {
        SqlFragment {
            clause,
            params: self.params,
        }
    }
}
