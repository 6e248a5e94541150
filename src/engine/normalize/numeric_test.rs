use serde_json::json;

use super::numeric::{finite_number, parse_finite, scalar_text, whole_number};

#[test]
fn numbers_and_numeric_strings() {
    assert_eq!(finite_number(&json!(1500)), Some(1500.0));
    assert_eq!(finite_number(&json!(12.5)), Some(12.5));
    assert_eq!(finite_number(&json!(" 1500 ")), Some(1500.0));
    assert_eq!(finite_number(&json!("1e3")), Some(1000.0));
}

#[test]
fn garbage_is_missing_not_zero() {
    assert_eq!(finite_number(&json!("abc")), None);
    assert_eq!(finite_number(&json!("")), None);
    assert_eq!(finite_number(&json!(null)), None);
    assert_eq!(finite_number(&json!(true)), None);
    assert_eq!(finite_number(&json!([1])), None);
    assert_eq!(parse_finite("NaN"), None);
    assert_eq!(parse_finite("inf"), None);
    assert_eq!(parse_finite("-infinity"), None);
}

#[test]
fn whole_numbers() {
    assert_eq!(whole_number(&json!(2023)), Some(2023));
    assert_eq!(whole_number(&json!("2023")), Some(2023));
    assert_eq!(whole_number(&json!(2023.0)), Some(2023));
    assert_eq!(whole_number(&json!("4.0")), Some(4));
    assert_eq!(whole_number(&json!(4.5)), None);
    assert_eq!(whole_number(&json!("April")), None);
}

#[test]
fn scalar_text_trims_and_skips_empty() {
    assert_eq!(scalar_text(&json!("  Nashik ")), Some("Nashik".to_string()));
    assert_eq!(scalar_text(&json!(42)), Some("42".to_string()));
    assert_eq!(scalar_text(&json!("   ")), None);
    assert_eq!(scalar_text(&json!({"a": 1})), None);
}
