use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::lookup::{History, HistoryMatch};
use crate::engine::errors::PredictionError;

/// Argument order expected by the price model.
pub const FEATURE_ORDER: [&str; 11] = [
    "district",
    "market",
    "variety",
    "year",
    "month",
    "rainfall_minus1",
    "rainfall_minus2",
    "rainfall_minus3",
    "total_rainfall_3months",
    "area_hectare",
    "yield_tonne_per_hectare",
];

/// Rainfall features and the rainfall-history measurement each one is read from.
const RAINFALL_FEATURES: [(&str, &str); 4] = [
    ("rainfall_minus1", "rainfall_lag_1"),
    ("rainfall_minus2", "rainfall_lag_2"),
    ("rainfall_minus3", "rainfall_lag_3"),
    ("total_rainfall_3months", "rainfall_3mo_sum"),
];

const PRODUCTION_FEATURES: [(&str, &str); 2] = [
    ("area_hectare", "area_hectare"),
    ("yield_tonne_per_hectare", "yield_tonne_per_hectare"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Text(String),
    Int(i64),
    Number(f64),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Text(s) => f.write_str(s),
            FeatureValue::Int(i) => write!(f, "{}", i),
            FeatureValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Named features in model order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector {
    values: IndexMap<String, FeatureValue>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, value: FeatureValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Values rendered as process arguments, in order.
    pub fn to_args(&self) -> Vec<String> {
        self.values.values().map(ToString::to_string).collect()
    }
}

/// Rainfall figures supplied by the caller; any may be left out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainfallInput {
    pub minus1: Option<f64>,
    pub minus2: Option<f64>,
    pub minus3: Option<f64>,
    #[serde(alias = "total3Months", alias = "total_3_months")]
    pub total3months: Option<f64>,
}

impl RainfallInput {
    fn get(&self, feature: &str) -> Option<f64> {
        match feature {
            "rainfall_minus1" => self.minus1,
            "rainfall_minus2" => self.minus2,
            "rainfall_minus3" => self.minus3,
            "total_rainfall_3months" => self.total3months,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionInput {
    #[serde(alias = "area")]
    pub area_hectare: Option<f64>,
    #[serde(alias = "yield")]
    pub yield_tonne_per_hectare: Option<f64>,
}

impl ProductionInput {
    fn get(&self, feature: &str) -> Option<f64> {
        match feature {
            "area_hectare" => self.area_hectare,
            "yield_tonne_per_hectare" => self.yield_tonne_per_hectare,
            _ => None,
        }
    }
}

/// Where a feature group came from. Ordered from most to least specific; a group reports the
/// least specific source any of its features needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSource {
    Provided,
    HistoryExact,
    HistoryFallback,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub district: String,
    pub market: String,
    pub variety: String,
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub rainfall: Option<RainfallInput>,
    #[serde(default)]
    pub production: Option<ProductionInput>,
}

impl PredictionRequest {
    pub fn validate(&self) -> Result<(), PredictionError> {
        for (name, value) in [
            ("district", &self.district),
            ("market", &self.market),
            ("variety", &self.variety),
        ] {
            if value.trim().is_empty() {
                return Err(PredictionError::InvalidInput(format!("{name} is required")));
            }
        }
        if !(1900..=2100).contains(&self.year) {
            return Err(PredictionError::InvalidInput(format!(
                "year {} is outside 1900..=2100",
                self.year
            )));
        }
        if !(1..=12).contains(&self.month) {
            return Err(PredictionError::InvalidInput(format!(
                "month {} is outside 1..=12",
                self.month
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledFeatures {
    pub features: FeatureVector,
    pub rainfall_source: FeatureSource,
    pub production_source: FeatureSource,
}

/// Builds the model's feature vector from the request, history and configured defaults.
/// A feature nobody can supply is an error; nothing is zero-filled.
#[derive(Debug, Clone, Default)]
pub struct FeatureAssembler {
    rainfall: History,
    production: History,
    defaults: BTreeMap<String, f64>,
}

impl FeatureAssembler {
    pub fn new(rainfall: History, production: History, defaults: BTreeMap<String, f64>) -> Self {
        Self {
            rainfall,
            production,
            defaults,
        }
    }

    pub fn assemble(&self, request: &PredictionRequest) -> Result<AssembledFeatures, PredictionError> {
        request.validate()?;

        let mut features = FeatureVector::new();
        features.push("district", FeatureValue::Text(request.district.trim().to_string()));
        features.push("market", FeatureValue::Text(request.market.trim().to_string()));
        features.push("variety", FeatureValue::Text(request.variety.trim().to_string()));
        features.push("year", FeatureValue::Int(i64::from(request.year)));
        features.push("month", FeatureValue::Int(i64::from(request.month)));

        let rainfall_match =
            self.rainfall
                .rainfall_for(&request.district, request.year, request.month);
        let rainfall_source = self.fill_group(
            &mut features,
            &RAINFALL_FEATURES,
            |f| request.rainfall.and_then(|r| r.get(f)),
            rainfall_match.as_ref(),
        )?;

        let production_match = self
            .production
            .production_for(&request.district, request.year);
        let production_source = self.fill_group(
            &mut features,
            &PRODUCTION_FEATURES,
            |f| request.production.and_then(|p| p.get(f)),
            production_match.as_ref(),
        )?;

        Ok(AssembledFeatures {
            features,
            rainfall_source,
            production_source,
        })
    }

    fn fill_group(
        &self,
        features: &mut FeatureVector,
        group: &[(&str, &str)],
        provided: impl Fn(&str) -> Option<f64>,
        history: Option<&HistoryMatch<'_>>,
    ) -> Result<FeatureSource, PredictionError> {
        let mut worst = FeatureSource::Provided;
        for &(feature, measurement) in group {
            let (value, source) = if let Some(v) = provided(feature).filter(|v| v.is_finite()) {
                (v, FeatureSource::Provided)
            } else if let Some((v, src)) =
                history.and_then(|h| h.record.measurement(measurement).map(|v| (v, h.source)))
            {
                (v, src)
            } else if let Some(v) = self.defaults.get(feature).copied() {
                (v, FeatureSource::Default)
            } else {
                return Err(PredictionError::MissingFeature(feature.to_string()));
            };
            worst = worst.max(source);
            features.push(feature, FeatureValue::Number(value));
        }
        Ok(worst)
    }
}
