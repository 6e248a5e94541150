use chrono::NaiveDate;

use super::condition::{
    Condition, DateRangeCondition, DimensionCondition, LogicalCondition, LogicalOp,
    MonthRangeCondition, YearRangeCondition,
};
use super::sql::{SqlColumns, SqlParam, SqlWriter};
use crate::test_helpers::factory::Factory;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn dimension_condition_trims_and_ignores_case() {
    let record = Factory::record().with_dimension("district", "Nashik").create();
    assert!(DimensionCondition::new("district", "  nashik ").evaluate(&record));
    assert!(!DimensionCondition::new("district", "Pune").evaluate(&record));
}

#[test]
fn dimension_condition_fails_when_dimension_missing() {
    let record = Factory::record().without_dimension("variety").create();
    assert!(!DimensionCondition::new("variety", "Red").evaluate(&record));
}

#[test]
fn ranges_are_inclusive() {
    let cond = DateRangeCondition::new(Some(date(2023, 1, 15)), Some(date(2023, 2, 1)));
    assert!(cond.evaluate(&Factory::record().on(2023, 1, 15).create()));
    assert!(cond.evaluate(&Factory::record().on(2023, 2, 1).create()));
    assert!(!cond.evaluate(&Factory::record().on(2023, 2, 2).create()));

    let years = YearRangeCondition::new(Some(2020), None);
    assert!(years.evaluate(&Factory::record().on(2020, 1, 1).create()));
    assert!(!years.evaluate(&Factory::record().on(2019, 12, 31).create()));
}

#[test]
fn month_range_ignores_the_year() {
    let cond = MonthRangeCondition::new(Some(6), Some(9));
    assert!(cond.evaluate(&Factory::record().on(2019, 6, 1).create()));
    assert!(cond.evaluate(&Factory::record().on(2023, 9, 30).create()));
    assert!(!cond.evaluate(&Factory::record().on(2023, 10, 1).create()));
}

#[test]
fn logical_condition_identities() {
    let record = Factory::record().create();
    assert!(LogicalCondition::new(vec![], LogicalOp::And).evaluate(&record));
    assert!(!LogicalCondition::new(vec![], LogicalOp::Or).evaluate(&record));

    let either = LogicalCondition::new(
        vec![
            Box::new(DimensionCondition::new("commodity", "Wheat")),
            Box::new(DimensionCondition::new("commodity", "onion")),
        ],
        LogicalOp::Or,
    );
    assert!(either.evaluate(&record));
}

#[test]
fn dimension_sql_binds_lowercased_value() {
    let mut sql = SqlWriter::new();
    let clause =
        DimensionCondition::new("market", " Lasalgaon ").to_sql(&SqlColumns::onion_prices(), &mut sql);
    assert_eq!(clause, "LOWER(TRIM(market_name)) = $1");
    let fragment = sql.finish(clause);
    assert_eq!(fragment.params, vec![SqlParam::Text("lasalgaon".into())]);
}

#[test]
fn unmapped_dimension_renders_false() {
    let mut sql = SqlWriter::new();
    let clause =
        DimensionCondition::new("commodity", "Onion").to_sql(&SqlColumns::onion_prices(), &mut sql);
    assert_eq!(clause, "1=0");
    assert!(sql.finish(clause).params.is_empty());
}

#[test]
fn half_open_range_renders_one_bound() {
    let mut sql = SqlWriter::new();
    let clause = YearRangeCondition::new(None, Some(2022)).to_sql(&SqlColumns::onion_prices(), &mut sql);
    assert_eq!(clause, "year <= $1");
    assert_eq!(sql.finish(clause).params, vec![SqlParam::Int(2022)]);
}

#[test]
fn non_ascii_case_folds_the_same_in_memory_and_sql() {
    let record = Factory::record().with_dimension("market", "ÉCIJA").create();
    let cond = DimensionCondition::new("market", " écija ");
    assert!(cond.evaluate(&record));
    assert!(record.dimension_matches("market", "Écija"));
    assert!(!record.dimension_matches("market", "ecija"));

    let mut sql = SqlWriter::new();
    let clause = cond.to_sql(&SqlColumns::onion_prices(), &mut sql);
    assert_eq!(clause, "LOWER(TRIM(market_name)) = $1");
    assert_eq!(sql.finish(clause).params, vec![SqlParam::Text("écija".into())]);
}
