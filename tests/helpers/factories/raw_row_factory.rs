use crate::engine::record::RawObservation;
use serde_json::{Value, json};

pub struct RawRowFactory {
    row: RawObservation,
}

impl RawRowFactory {
    /// A mandi price row as scraped: string-typed numbers and display-style headers.
    pub fn new() -> Self {
        let mut row = RawObservation::new();
        row.insert("Arrival_Date".into(), json!("2023-01-15"));
        row.insert("Commodity".into(), json!("Onion"));
        row.insert("District Name".into(), json!("Nashik"));
        row.insert("Market Name".into(), json!("Lasalgaon"));
        row.insert("Variety".into(), json!("Red"));
        row.insert("Min Price (Rs./Quintal)".into(), json!("900"));
        row.insert("Max Price (Rs./Quintal)".into(), json!("1300"));
        row.insert("Modal Price (Rs./Quintal)".into(), json!("1100"));
        Self { row }
    }

    /// A row from the onion model dataset: year/month columns and numeric features.
    pub fn onion() -> Self {
        let mut row = RawObservation::new();
        row.insert("District".into(), json!("Nashik"));
        row.insert("Market Name".into(), json!("Lasalgaon"));
        row.insert("Variety".into(), json!("Red"));
        row.insert("Modal Price (Rs./Quintal)".into(), json!(1500));
        row.insert("Year".into(), json!(2018));
        row.insert("Month".into(), json!(9));
        row.insert("Rainfall_Minus1".into(), json!(120.5));
        row.insert("Rainfall_Minus2".into(), json!(98.0));
        row.insert("Rainfall_Minus3".into(), json!(45.2));
        row.insert("Total_Rainfall_3Months".into(), json!(263.7));
        row.insert("Area_Hectare".into(), json!(1200.0));
        row.insert("Yield_TonnePerHectare".into(), json!(18.4));
        Self { row }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.row.insert(key.to_string(), value.into());
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.row.remove(key);
        self
    }

    pub fn create(self) -> RawObservation {
        self.row
    }

    /// One row per date, every other column unchanged.
    pub fn create_on_dates(self, dates: &[&str]) -> Vec<RawObservation> {
        dates
            .iter()
            .map(|d| {
                let mut row = self.row.clone();
                row.insert("Arrival_Date".into(), json!(d));
                row
            })
            .collect()
    }
}
