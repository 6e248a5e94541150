pub mod features;
pub mod lookup;
pub mod predictor;
pub mod process;
pub mod service;

pub use features::{
    AssembledFeatures, FEATURE_ORDER, FeatureAssembler, FeatureSource, FeatureValue,
    FeatureVector, PredictionRequest, ProductionInput, RainfallInput,
};
pub use lookup::{History, HistoryMatch};
pub use predictor::{Prediction, Predictor, parse_prediction_output};
pub use process::ProcessPredictor;
pub use service::{PredictionReport, PredictionService};

#[cfg(test)]
mod predictor_test;
