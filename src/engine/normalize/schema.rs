use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::aliases::FieldAliases;

/// A named measurement. Required measurements reject the row when absent or unparseable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementSpec {
    pub name: String,
    pub required: bool,
}

impl MeasurementSpec {
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: true,
        }
    }

    pub fn optional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: false,
        }
    }
}

/// Canonical names of the fields a timestamp can be built from. A full date is tried first,
/// then year + month (+ day).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFields {
    pub date: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    /// Month used when a row carries a year but no month (annual datasets).
    pub default_month: Option<u32>,
}

impl DateFields {
    pub fn full_date() -> Self {
        Self {
            date: Some("date".into()),
            year: Some("year".into()),
            month: Some("month".into()),
            day: Some("day".into()),
            default_month: None,
        }
    }

    pub fn year_month() -> Self {
        Self {
            date: None,
            year: Some("year".into()),
            month: Some("month".into()),
            day: None,
            default_month: None,
        }
    }

    pub fn year_only(default_month: u32) -> Self {
        Self {
            date: None,
            year: Some("year".into()),
            month: None,
            day: None,
            default_month: Some(default_month),
        }
    }

    /// Field reported when a row carries no date information at all.
    pub fn primary(&self) -> &str {
        self.date
            .as_deref()
            .or(self.year.as_deref())
            .unwrap_or("date")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SchemaPreset {
    #[default]
    CommodityPrices,
    OnionPrices,
    Rainfall,
    Production,
}

/// Shape of one dataset family: where the date lives, which columns are dimensions and
/// which are measurements, and the column aliases for all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub date: DateFields,
    pub dimensions: Vec<String>,
    pub measurements: Vec<MeasurementSpec>,
    pub aliases: FieldAliases,
}

impl RecordSchema {
    pub fn preset(preset: SchemaPreset) -> Self {
        match preset {
            SchemaPreset::CommodityPrices => Self::commodity_prices(),
            SchemaPreset::OnionPrices => Self::onion_prices(),
            SchemaPreset::Rainfall => Self::rainfall(),
            SchemaPreset::Production => Self::production(),
        }
    }

    /// Mandi price rows: one arrival date, min/max/modal price per quintal.
    pub fn commodity_prices() -> Self {
        Self {
            date: DateFields::full_date(),
            dimensions: names(&["commodity", "district", "market", "variety"]),
            measurements: vec![
                MeasurementSpec::optional("min_price"),
                MeasurementSpec::optional("max_price"),
                MeasurementSpec::required("modal_price"),
            ],
            aliases: FieldAliases::new()
                .with("date", &["date", "arrival_date", "price_date", "reported_date"])
                .with("commodity", &["commodity", "commodity_name"])
                .with("district", &["district", "district_name"])
                .with("market", &["market", "market_name"])
                .with(
                    "min_price",
                    &["min_price", "Min Price (Rs./Quintal)", "minimum_price"],
                )
                .with(
                    "max_price",
                    &["max_price", "Max Price (Rs./Quintal)", "maximum_price"],
                )
                .with(
                    "modal_price",
                    &["modal_price", "Modal Price (Rs./Quintal)", "mode_price", "price"],
                ),
        }
    }

    /// Onion model dataset: monthly modal price joined with rainfall and production features.
    pub fn onion_prices() -> Self {
        Self {
            date: DateFields::year_month(),
            dimensions: names(&["district", "market", "variety"]),
            measurements: vec![
                MeasurementSpec::required("modal_price"),
                MeasurementSpec::optional("rainfall_minus1"),
                MeasurementSpec::optional("rainfall_minus2"),
                MeasurementSpec::optional("rainfall_minus3"),
                MeasurementSpec::optional("total_rainfall_3months"),
                MeasurementSpec::optional("area_hectare"),
                MeasurementSpec::optional("yield_tonne_per_hectare"),
            ],
            aliases: FieldAliases::new()
                .with("district", &["district", "district_name"])
                .with("market", &["market_name", "market"])
                .with(
                    "modal_price",
                    &["modal_price", "Modal Price (Rs./Quintal)", "price"],
                )
                .with("area_hectare", &["area_hectare", "area"])
                .with(
                    "yield_tonne_per_hectare",
                    &["yield_tonne_per_hectare", "yield_tonneperhectare", "yield"],
                ),
        }
    }

    /// Monthly rainfall history per district, with lagged values when the dataset has them.
    pub fn rainfall() -> Self {
        Self {
            date: DateFields::year_month(),
            dimensions: names(&["district"]),
            measurements: vec![
                MeasurementSpec::required("rainfall_mm"),
                MeasurementSpec::optional("rainfall_lag_1"),
                MeasurementSpec::optional("rainfall_lag_2"),
                MeasurementSpec::optional("rainfall_lag_3"),
                MeasurementSpec::optional("rainfall_3mo_sum"),
            ],
            aliases: FieldAliases::new()
                .with("district", &["district", "district_name"])
                .with("rainfall_mm", &["rainfall_mm", "rainfall"]),
        }
    }

    /// Annual area and yield per district.
    pub fn production() -> Self {
        Self {
            date: DateFields::year_only(1),
            dimensions: names(&["district"]),
            measurements: vec![
                MeasurementSpec::required("area_hectare"),
                MeasurementSpec::required("yield_tonne_per_hectare"),
            ],
            aliases: FieldAliases::new()
                .with("district", &["district", "district_name"])
                .with("area_hectare", &["area_hectare", "area"])
                .with(
                    "yield_tonne_per_hectare",
                    &["yield_tonne_per_hectare", "yield_tonneperhectare", "yield"],
                ),
        }
    }

    /// Aliases supplied by configuration take precedence over the preset's.
    pub fn with_extra_aliases(mut self, extra: &FieldAliases) -> Self {
        self.aliases.merge_preferred(extra);
        self
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
