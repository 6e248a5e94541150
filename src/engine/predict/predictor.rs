use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::features::FeatureVector;
use crate::engine::errors::PredictionError;
use crate::engine::normalize::numeric::finite_number;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub value: f64,
    /// Absent or non-finite confidence is reported as missing, not as zero.
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    /// The model's full response.
    pub raw: Value,
}

/// Opaque price model: ordered features in, a prediction or an error out.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictionError>;
}

/// Parse the model's JSON response. Diagnostic lines printed before the JSON are tolerated:
/// when the whole output is not JSON, the last non-empty line is tried.
pub fn parse_prediction_output(stdout: &str) -> Result<Prediction, PredictionError> {
    let text = stdout.trim();
    if text.is_empty() {
        return Err(PredictionError::EmptyOutput);
    }

    let parsed: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(whole_err) => {
            let last = text.lines().rev().map(str::trim).find(|l| !l.is_empty());
            match last.map(serde_json::from_str::<Value>) {
                Some(Ok(v)) => v,
                _ => return Err(PredictionError::InvalidOutput(whole_err.to_string())),
            }
        }
    };

    let Value::Object(fields) = &parsed else {
        return Err(PredictionError::InvalidOutput(
            "expected a JSON object".to_string(),
        ));
    };

    match fields.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => {}
        Some(Value::String(msg)) => return Err(PredictionError::Model(msg.clone())),
        Some(other) => return Err(PredictionError::Model(other.to_string())),
    }

    let value = fields
        .get("prediction")
        .and_then(finite_number)
        .ok_or_else(|| {
            PredictionError::InvalidOutput("missing or non-finite prediction".to_string())
        })?;
    let confidence = fields.get("confidence").and_then(finite_number);
    let model_type = fields
        .get("model_type")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Prediction {
        value,
        confidence,
        model_type,
        raw: parsed.clone(),
    })
}
