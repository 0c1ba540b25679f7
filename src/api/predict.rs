/// Prediction endpoint client
///
/// Submits the selected image as one multipart form post and parses the
/// JSON reply. The backend owns the model and its schema has drifted
/// before, so every response field is optional and decoded leniently: a
/// field with an unexpected shape degrades to "not available" in the UI
/// instead of failing the whole body.

use log::debug;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::state::data::ImageSelection;

/// Where predictions come from. The service is deployed alongside the web
/// client and has a single fixed route.
pub const PREDICT_ENDPOINT: &str = "https://cropdisease-app.onrender.com/predict";

/// Multipart field name the backend expects the image under
const IMAGE_FIELD: &str = "image";

/// Why a submission cycle failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    /// The request never produced an HTTP response
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered outside the success range
    #[error("server returned HTTP {status}")]
    Status { status: u16 },
    /// A successful response carried an unparseable body
    #[error("unparseable response body: {0}")]
    MalformedBody(String),
}

/// Confidence arrives as a number (percentage scale) from the current
/// backend, but has shipped as a preformatted string before; accept both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    Number(f64),
    Text(String),
}

/// Mean hue/saturation/value of the affected region
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorMetrics {
    #[serde(default, deserialize_with = "lenient")]
    pub mean_hue: Option<serde_json::Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub mean_saturation: Option<serde_json::Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub mean_value: Option<serde_json::Number>,
}

/// Severity sub-record: stage of progression and how much of the leaf is
/// affected
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Severity {
    /// 1-5 scale
    #[serde(default, deserialize_with = "lenient")]
    pub severity_score: Option<serde_json::Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub stage: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub affected_area_percent: Option<serde_json::Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub color_metrics: Option<ColorMetrics>,
}

/// Parsed diagnosis. Immutable once received; the next submission replaces
/// it wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default, deserialize_with = "lenient")]
    pub disease: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub confidence: Option<Confidence>,
    #[serde(default, deserialize_with = "lenient")]
    pub severity: Option<Severity>,
}

/// Decode a field if it has the expected shape, swallowing mismatches so a
/// drifted field renders as absent rather than failing the body.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Turn an HTTP status and body into a prediction or an error.
///
/// Kept separate from the transport so response handling is testable
/// without a live server.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<PredictionResult, PredictError> {
    if !status.is_success() {
        return Err(PredictError::Status {
            status: status.as_u16(),
        });
    }

    serde_json::from_slice(body).map_err(|err| PredictError::MalformedBody(err.to_string()))
}

/// Submit the selected image to the prediction endpoint.
///
/// Exactly one request per invocation; the caller gates concurrency by
/// disabling submission while a cycle is in flight.
pub async fn submit_image(selection: ImageSelection) -> Result<PredictionResult, PredictError> {
    let part = reqwest::multipart::Part::bytes(selection.bytes)
        .file_name(selection.file_name)
        .mime_str(&selection.mime)
        .map_err(|err| PredictError::Transport(err.to_string()))?;
    let form = reqwest::multipart::Form::new().part(IMAGE_FIELD, part);

    let response = reqwest::Client::new()
        .post(PREDICT_ENDPOINT)
        .header(ACCEPT, "application/json")
        .multipart(form)
        .send()
        .await
        .map_err(|err| PredictError::Transport(err.to_string()))?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|err| PredictError::Transport(err.to_string()))?;

    debug!("prediction endpoint answered {status} with {} bytes", body.len());

    interpret_response(status, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_parses() {
        let body = br#"{ "disease": "Leaf Blight", "confidence": 92.5 }"#;
        let result = interpret_response(StatusCode::OK, body).unwrap();

        assert_eq!(result.disease.as_deref(), Some("Leaf Blight"));
        assert_eq!(result.confidence, Some(Confidence::Number(92.5)));
        assert!(result.severity.is_none());
    }

    #[test]
    fn test_severity_sub_record_parses() {
        let body = br#"{
            "disease": "Rust",
            "confidence": 70.0,
            "severity": {
                "severity_score": 3,
                "stage": "Moderate",
                "affected_area_percent": 12.5,
                "color_metrics": { "mean_hue": 41.2 }
            }
        }"#;
        let result = interpret_response(StatusCode::OK, body).unwrap();
        let severity = result.severity.unwrap();

        assert_eq!(severity.severity_score.unwrap().to_string(), "3");
        assert_eq!(severity.stage.as_deref(), Some("Moderate"));
        assert_eq!(severity.affected_area_percent.unwrap().to_string(), "12.5");
        let metrics = severity.color_metrics.unwrap();
        assert_eq!(metrics.mean_hue.unwrap().to_string(), "41.2");
        assert!(metrics.mean_saturation.is_none());
    }

    #[test]
    fn test_string_confidence_is_accepted() {
        let body = br#"{ "confidence": "very high" }"#;
        let result = interpret_response(StatusCode::OK, body).unwrap();
        assert_eq!(result.confidence, Some(Confidence::Text("very high".to_string())));
    }

    #[test]
    fn test_mistyped_fields_degrade_to_absent() {
        // severity as a bare number, disease as an array: both unusable,
        // neither should sink the whole response
        let body = br#"{ "disease": [1, 2], "confidence": 55.0, "severity": 5 }"#;
        let result = interpret_response(StatusCode::OK, body).unwrap();

        assert!(result.disease.is_none());
        assert_eq!(result.confidence, Some(Confidence::Number(55.0)));
        assert!(result.severity.is_none());
    }

    #[test]
    fn test_empty_object_is_a_valid_result() {
        let result = interpret_response(StatusCode::OK, b"{}").unwrap();
        assert_eq!(result, PredictionResult::default());
    }

    #[test]
    fn test_non_success_status_is_failure() {
        let err = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, b"{}").unwrap_err();
        assert_eq!(err, PredictError::Status { status: 500 });

        let err = interpret_response(StatusCode::NOT_FOUND, b"").unwrap_err();
        assert_eq!(err, PredictError::Status { status: 404 });
    }

    #[test]
    fn test_malformed_body_is_failure() {
        let err = interpret_response(StatusCode::OK, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, PredictError::MalformedBody(_)));
    }

    #[test]
    fn test_top_level_array_is_malformed() {
        let err = interpret_response(StatusCode::OK, b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, PredictError::MalformedBody(_)));
    }
}
