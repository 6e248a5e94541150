use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use super::aliases::RowIndex;
use super::numeric::{finite_number, scalar_text, whole_number};
use super::schema::{DateFields, RecordSchema};
use crate::engine::errors::{RejectReason, Rejected};
use crate::engine::record::{NormalizedRecord, RawObservation};
use crate::shared::datetime::parse::{
    from_spreadsheet_serial, from_year_month, month_from_name, parse_date_text,
};

/// Turns raw rows of one dataset family into [`NormalizedRecord`]s.
#[derive(Debug, Clone)]
pub struct Normalizer {
    schema: RecordSchema,
}

impl Normalizer {
    pub fn new(schema: RecordSchema) -> Self {
        Self { schema }
    }

    pub fn normalize(&self, row: &RawObservation) -> Result<NormalizedRecord, Rejected> {
        normalize(row, &self.schema)
    }
}

/// Resolve one raw row against `schema`.
///
/// The date is resolved first, so a row with both a bad date and a bad measurement is
/// reported as a date problem. Optional measurements that fail to parse are dropped; required
/// ones reject the row.
pub fn normalize(row: &RawObservation, schema: &RecordSchema) -> Result<NormalizedRecord, Rejected> {
    let index = RowIndex::new(row);
    let timestamp = resolve_timestamp(&index, schema)?;

    let mut measurements = BTreeMap::new();
    for spec in &schema.measurements {
        match schema.aliases.lookup(&index, &spec.name) {
            None if spec.required => {
                return Err(Rejected::new(
                    RejectReason::MissingRequiredField,
                    spec.name.as_str(),
                ));
            }
            None => {}
            Some(value) => match finite_number(value) {
                Some(v) => {
                    measurements.insert(spec.name.clone(), v);
                }
                None if spec.required => {
                    return Err(Rejected::new(
                        RejectReason::UnparseableRequiredNumber,
                        spec.name.as_str(),
                    ));
                }
                None => {}
            },
        }
    }

    if measurements.is_empty() {
        return Err(Rejected::without_field(RejectReason::NoMeasurements));
    }

    let dimensions = schema
        .dimensions
        .iter()
        .filter_map(|name| {
            let value = schema.aliases.lookup(&index, name)?;
            scalar_text(value).map(|text| (name.clone(), text))
        })
        .collect();

    Ok(NormalizedRecord {
        timestamp,
        dimensions,
        measurements,
    })
}

fn resolve_timestamp(index: &RowIndex<'_>, schema: &RecordSchema) -> Result<NaiveDate, Rejected> {
    let fields = &schema.date;

    if let Some((name, value)) = present(index, schema, fields.date.as_deref()) {
        return date_from_value(value).ok_or_else(|| unparseable(name));
    }

    if let Some((name, year)) = present(index, schema, fields.year.as_deref()) {
        return date_from_parts(index, schema, fields, name, year);
    }

    Err(Rejected::new(
        RejectReason::MissingRequiredField,
        fields.primary(),
    ))
}

fn present<'s, 'r>(
    index: &RowIndex<'r>,
    schema: &RecordSchema,
    field: Option<&'s str>,
) -> Option<(&'s str, &'r Value)> {
    let name = field?;
    schema.aliases.lookup(index, name).map(|value| (name, value))
}

fn date_from_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(text) => parse_date_text(text),
        Value::Number(n) => from_spreadsheet_serial(n.as_f64()?),
        _ => None,
    }
}

fn date_from_parts(
    index: &RowIndex<'_>,
    schema: &RecordSchema,
    fields: &DateFields,
    year_field: &str,
    year: &Value,
) -> Result<NaiveDate, Rejected> {
    let year = whole_number(year).ok_or_else(|| unparseable(year_field))?;

    let month = match present(index, schema, fields.month.as_deref()) {
        Some((name, value)) => month_number(value).ok_or_else(|| unparseable(name))?,
        None => match fields.default_month {
            Some(m) => i64::from(m),
            None => {
                return Err(Rejected::new(
                    RejectReason::MissingRequiredField,
                    fields.month.as_deref().unwrap_or("month"),
                ));
            }
        },
    };

    let day = match present(index, schema, fields.day.as_deref()) {
        Some((name, value)) => Some(whole_number(value).ok_or_else(|| unparseable(name))?),
        None => None,
    };

    from_year_month(year, month, day).ok_or_else(|| unparseable(year_field))
}

/// `4`, `"04"`, `"Apr"` and `"April"` are all April.
fn month_number(value: &Value) -> Option<i64> {
    whole_number(value).or_else(|| match value {
        Value::String(s) => month_from_name(s).map(i64::from),
        _ => None,
    })
}

fn unparseable(field: &str) -> Rejected {
    Rejected::new(RejectReason::UnparseableDate, field)
}
