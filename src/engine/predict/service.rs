use std::sync::Arc;

use serde::Serialize;

use super::features::{FeatureAssembler, FeatureSource, FeatureVector, PredictionRequest};
use super::predictor::{Prediction, Predictor};
use crate::engine::errors::PredictionError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub prediction: Prediction,
    pub features: FeatureVector,
    pub rainfall_source: FeatureSource,
    pub production_source: FeatureSource,
}

#[derive(Clone)]
pub struct PredictionService {
    assembler: FeatureAssembler,
    predictor: Arc<dyn Predictor>,
}

impl PredictionService {
    pub fn new(assembler: FeatureAssembler, predictor: Arc<dyn Predictor>) -> Self {
        Self {
            assembler,
            predictor,
        }
    }

    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionReport, PredictionError> {
        let result = self.run(request).await;
        if let Err(e) = &result {
            e.log_error();
        }
        result
    }

    async fn run(&self, request: &PredictionRequest) -> Result<PredictionReport, PredictionError> {
        let assembled = self.assembler.assemble(request)?;
        let prediction = self.predictor.predict(&assembled.features).await?;
        Ok(PredictionReport {
            prediction,
            features: assembled.features,
            rainfall_source: assembled.rainfall_source,
            production_source: assembled.production_source,
        })
    }
}
