use serde::Serialize;

use crate::command::types::{FilterCriteria, Granularity};
use crate::engine::aggregate::aggregate;
use crate::engine::errors::QueryError;
use crate::engine::filter::{Condition, DimensionCondition, Predicate, build_filter};
use crate::engine::format::{SeriesRow, format};
use crate::engine::record::NormalizedRecord;
use crate::shared::datetime::SeasonCalendar;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommoditySeries {
    pub commodity: String,
    pub data: Vec<SeriesRow>,
}

fn requested_names(commodities: &[String]) -> Result<Vec<&str>, QueryError> {
    let names: Vec<&str> = commodities.iter().map(|c| c.trim()).collect();
    if names.is_empty() {
        return Err(QueryError::InvalidRequest(
            "at least one commodity is required for comparison".into(),
        ));
    }
    if names.iter().any(|n| n.is_empty()) {
        return Err(QueryError::InvalidRequest(
            "commodity names must not be blank".into(),
        ));
    }
    Ok(names)
}

/// Filter for a comparison fetch: `criteria` plus "commodity is one of `commodities`".
pub fn compare_predicate(
    criteria: &FilterCriteria,
    commodities: &[String],
) -> Result<Predicate, QueryError> {
    let names = requested_names(commodities)?;
    let alternatives: Vec<Box<dyn Condition>> = names
        .into_iter()
        .map(|n| Box::new(DimensionCondition::new("commodity", n)) as Box<dyn Condition>)
        .collect();
    Ok(build_filter(criteria)?.any_of(alternatives))
}

/// One aggregated series per commodity, in request order.
pub fn compare_commodities(
    records: &[NormalizedRecord],
    commodities: &[String],
    granularity: Granularity,
    calendar: &SeasonCalendar,
    measurements: &[String],
) -> Result<Vec<CommoditySeries>, QueryError> {
    let names = requested_names(commodities)?;
    Ok(names
        .into_iter()
        .map(|name| {
            let subset: Vec<NormalizedRecord> = records
                .iter()
                .filter(|r| r.dimension_matches("commodity", name))
                .cloned()
                .collect();
            let buckets = aggregate(&subset, granularity, calendar);
            CommoditySeries {
                commodity: name.to_string(),
                data: format(&buckets, measurements),
            }
        })
        .collect())
}
