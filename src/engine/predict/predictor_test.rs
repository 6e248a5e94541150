use serde_json::json;

use super::predictor::parse_prediction_output;
use crate::engine::errors::PredictionError;

#[test]
fn parses_prediction_and_confidence() {
    let p = parse_prediction_output(
        r#"{"prediction": 1523.4, "confidence": 87.5, "model_type": "Random Forest"}"#,
    )
    .unwrap();
    assert_eq!(p.value, 1523.4);
    assert_eq!(p.confidence, Some(87.5));
    assert_eq!(p.model_type.as_deref(), Some("Random Forest"));
    assert_eq!(p.raw["model_type"], json!("Random Forest"));
}

#[test]
fn missing_confidence_is_none_not_zero() {
    let p = parse_prediction_output(r#"{"prediction": "1500"}"#).unwrap();
    assert_eq!(p.value, 1500.0);
    assert_eq!(p.confidence, None);

    let p = parse_prediction_output(r#"{"prediction": 1, "confidence": "n/a"}"#).unwrap();
    assert_eq!(p.confidence, None);
}

#[test]
fn tolerates_log_lines_before_the_json() {
    let out = "loading model...\nwarming up\n{\"prediction\": 42.0}\n";
    assert_eq!(parse_prediction_output(out).unwrap().value, 42.0);
}

#[test]
fn error_shapes() {
    assert!(matches!(
        parse_prediction_output("  \n"),
        Err(PredictionError::EmptyOutput)
    ));
    assert!(matches!(
        parse_prediction_output("Traceback (most recent call last)"),
        Err(PredictionError::InvalidOutput(_))
    ));
    assert!(matches!(
        parse_prediction_output("[1, 2]"),
        Err(PredictionError::InvalidOutput(_))
    ));
    assert!(matches!(
        parse_prediction_output(r#"{"error": "Could not load model package"}"#),
        Err(PredictionError::Model(m)) if m == "Could not load model package"
    ));
    assert!(matches!(
        parse_prediction_output(r#"{"prediction": "abc"}"#),
        Err(PredictionError::InvalidOutput(_))
    ));
    assert!(matches!(
        parse_prediction_output(r#"{"confidence": 80}"#),
        Err(PredictionError::InvalidOutput(_))
    ));
}
