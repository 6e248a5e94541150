use crate::test_helpers::factory::Factory;
use serde_json::json;

#[test]
fn test_raw_row_factory() {
    let row = Factory::raw_row()
        .with("Modal Price (Rs./Quintal)", "abc")
        .without("Variety")
        .create();

    assert_eq!(row["Modal Price (Rs./Quintal)"], json!("abc"));
    assert!(!row.contains_key("Variety"));

    let rows = Factory::raw_row().create_on_dates(&["2023-01-01", "2023-02-01"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["Arrival_Date"], json!("2023-02-01"));
}
