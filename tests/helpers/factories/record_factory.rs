use crate::engine::record::NormalizedRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub struct RecordFactory {
    timestamp: NaiveDate,
    dimensions: BTreeMap<String, String>,
    measurements: BTreeMap<String, f64>,
}

impl RecordFactory {
    pub fn new() -> Self {
        let mut dimensions = BTreeMap::new();
        dimensions.insert("commodity".into(), "Onion".into());
        dimensions.insert("district".into(), "Nashik".into());
        dimensions.insert("market".into(), "Lasalgaon".into());
        dimensions.insert("variety".into(), "Red".into());
        let mut measurements = BTreeMap::new();
        measurements.insert("modal_price".into(), 1000.0);
        Self {
            timestamp: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            dimensions,
            measurements,
        }
    }

    pub fn on(mut self, year: i32, month: u32, day: u32) -> Self {
        self.timestamp = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        self
    }

    pub fn with_dimension(mut self, name: &str, value: &str) -> Self {
        self.dimensions.insert(name.into(), value.into());
        self
    }

    pub fn without_dimension(mut self, name: &str) -> Self {
        self.dimensions.remove(name);
        self
    }

    pub fn with_measurement(mut self, name: &str, value: f64) -> Self {
        self.measurements.insert(name.into(), value);
        self
    }

    pub fn without_measurement(mut self, name: &str) -> Self {
        self.measurements.remove(name);
        self
    }

    /// Shorthand for the modal price.
    pub fn price(self, value: f64) -> Self {
        self.with_measurement("modal_price", value)
    }

    pub fn create(self) -> NormalizedRecord {
        NormalizedRecord {
            timestamp: self.timestamp,
            dimensions: self.dimensions,
            measurements: self.measurements,
        }
    }
}
