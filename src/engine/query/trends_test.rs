use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

use super::trends::{TrendService, load_records};
use crate::command::types::{FilterCriteria, Granularity, TrendQuery};
use crate::engine::errors::{QueryError, RejectReason, SourceError};
use crate::engine::filter::{Predicate, build_filter};
use crate::engine::normalize::{Normalizer, RecordSchema};
use crate::engine::record::RawObservation;
use crate::engine::source::{MemorySource, RecordSource};
use crate::shared::datetime::SeasonCalendar;
use crate::test_helpers::factory::Factory;

fn service(rows: Vec<RawObservation>) -> TrendService {
    TrendService::new(
        Arc::new(MemorySource::new(rows)),
        Normalizer::new(RecordSchema::commodity_prices()),
        SeasonCalendar::default(),
    )
}

fn price_row(date: &str, price: &str) -> RawObservation {
    Factory::raw_row()
        .with("Arrival_Date", date)
        .with("Modal Price (Rs./Quintal)", price)
        .create()
}

#[derive(Default)]
struct CountingSource {
    calls: AtomicUsize,
}

#[async_trait]
impl RecordSource for CountingSource {
    async fn fetch(&self, _predicate: &Predicate) -> Result<Vec<RawObservation>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SourceError::Unavailable("database down".into()))
    }
}

#[tokio::test]
async fn monthly_series_from_raw_rows() {
    let svc = service(vec![
        price_row("2023-02-01", "200"),
        price_row("2023-01-20", "120"),
        price_row("15/01/2023", "100"),
    ]);
    let query = TrendQuery::new(Granularity::Month).with_measurements(["modal_price"]);
    let response = svc.run(&query).await.unwrap();

    assert_eq!(response.total_records, 3);
    assert_eq!(response.matched_records, 3);
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[0].period, "2023-01");
    assert_eq!(response.data[0].value("modal_price_mean"), Some(110.0));
    assert_eq!(response.data[0].data_points, 2);
    assert_eq!(response.data[1].period, "2023-02");
    assert!(response.rejects.is_clean());
}

#[tokio::test]
async fn rejected_rows_are_reported_not_fatal() {
    crate::logging::init_for_tests();

    let svc = service(vec![
        price_row("2023-01-15", "100"),
        price_row("2023-01-16", "abc"),
        Factory::raw_row()
            .without("Modal Price (Rs./Quintal)")
            .create(),
        price_row("whenever", "100"),
    ]);
    let response = svc
        .run(&TrendQuery::new(Granularity::Year))
        .await
        .unwrap();

    assert_eq!(response.total_records, 4);
    assert_eq!(response.matched_records, 1);
    assert_eq!(response.rejects.rejected(), 3);
    assert_eq!(
        response
            .rejects
            .count(RejectReason::UnparseableRequiredNumber),
        1
    );
    assert_eq!(response.rejects.count(RejectReason::MissingRequiredField), 1);
    assert_eq!(response.rejects.count(RejectReason::UnparseableDate), 1);
    assert_eq!(response.data.len(), 1);
}

#[tokio::test]
async fn filter_is_reapplied_after_fetch() {
    let svc = service(vec![
        price_row("2023-01-15", "100"),
        Factory::raw_row()
            .with("District Name", "Pune")
            .with("Arrival_Date", "2023-01-20")
            .create(),
        price_row("2022-12-31", "90"),
    ]);
    let criteria = FilterCriteria {
        district: Some("NASHIK".into()),
        start_year: Some(2023),
        ..Default::default()
    };
    let query = TrendQuery::new(Granularity::Month).with_criteria(criteria.clone());
    let response = svc.run(&query).await.unwrap();

    assert_eq!(response.total_records, 3);
    assert_eq!(response.matched_records, 1);
    assert_eq!(response.filters, criteria);
}

#[tokio::test]
async fn invalid_range_fails_before_fetching() {
    let source = Arc::new(CountingSource::default());
    let svc = TrendService::new(
        source.clone(),
        Normalizer::new(RecordSchema::commodity_prices()),
        SeasonCalendar::default(),
    );
    let criteria = FilterCriteria {
        start_date: NaiveDate::from_ymd_opt(2023, 6, 1),
        end_date: NaiveDate::from_ymd_opt(2023, 1, 1),
        ..Default::default()
    };
    let err = svc
        .run(&TrendQuery::new(Granularity::Month).with_criteria(criteria))
        .await
        .unwrap_err();

    assert!(matches!(err, QueryError::InvalidRange { field: "date", .. }));
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn source_failure_is_upstream_error() {
    let svc = TrendService::new(
        Arc::new(CountingSource::default()),
        Normalizer::new(RecordSchema::commodity_prices()),
        SeasonCalendar::default(),
    );
    let err = svc
        .run(&TrendQuery::new(Granularity::Month))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        QueryError::Upstream(SourceError::Unavailable(_))
    ));
}

#[tokio::test]
async fn response_uses_original_payload_names() {
    let svc = service(vec![price_row("2023-04-01", "150")]);
    let response = svc
        .run(&TrendQuery::new(Granularity::Quarter).with_measurements(["modal_price"]))
        .await
        .unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["totalRecords"], json!(1));
    assert_eq!(json["matchedRecords"], json!(1));
    assert_eq!(json["granularity"], json!("quarter"));
    assert_eq!(json["filters"], json!({}));
    assert_eq!(json["data"][0]["period"], json!("2023-Q2"));
    assert_eq!(json["data"][0]["modal_price_max"], json!(150.0));
}

#[test]
fn load_records_sorts_chronologically() {
    let rows = Factory::raw_row().create_on_dates(&["2023-03-01", "2023-01-01", "2023-02-01"]);
    let predicate = build_filter(&FilterCriteria::default()).unwrap();
    let loaded = load_records(
        &rows,
        &predicate,
        &Normalizer::new(RecordSchema::commodity_prices()),
    );
    let dates: Vec<String> = loaded
        .records
        .iter()
        .map(|r| r.timestamp.to_string())
        .collect();
    assert_eq!(dates, vec!["2023-01-01", "2023-02-01", "2023-03-01"]);
    assert_eq!(loaded.total_rows, 3);
}
