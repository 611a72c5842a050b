use anyhow::Context;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_REPORT_TYPE: &str = "daily";

/// A validated calculate request
#[derive(Debug, Clone, PartialEq)]
pub struct CalculateRequest {
    pub birth_date: String,
    pub lat: f64,
    pub lng: f64,
    pub report_type: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("birthDate is required")]
    MissingBirthDate,
    #[error("lat and lng must be numbers")]
    InvalidCoordinates,
    #[error("Invalid reportType: must be a string.")]
    InvalidReportType,
}

impl CalculateRequest {
    /// Validate a JSON body `{birthDate, lat, lng, reportType?}`.
    ///
    /// `birthDate` is only checked for presence here; its format is checked
    /// when the chart is computed.
    pub fn from_json(body: &Value) -> Result<Self, RequestError> {
        let body = body.as_object().ok_or(RequestError::NotAnObject)?;

        let birth_date = match body.get("birthDate") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            // a number is passed through and rejected as a date later
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(RequestError::MissingBirthDate),
        };

        let (lat, lng) = match (number(body, "lat"), number(body, "lng")) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => return Err(RequestError::InvalidCoordinates),
        };

        // only an absent key takes the default; null or any other non-string is rejected
        let report_type = match body.get("reportType") {
            None => DEFAULT_REPORT_TYPE.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(RequestError::InvalidReportType),
        };

        Ok(Self {
            birth_date,
            lat,
            lng,
            report_type,
        })
    }
}

fn number(body: &Map<String, Value>, key: &str) -> Option<f64> {
    body.get(key).and_then(Value::as_f64)
}

/// Read a JSON request body from a file, or stdin when `source` is `-`
pub fn read_request_body(source: &Path) -> anyhow::Result<Value> {
    let text = if source == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read request from stdin")?;
        text
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read request {}", source.display()))?
    };
    serde_json::from_str(&text).context("Request is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_request_defaults_report_type() {
        let request =
            CalculateRequest::from_json(&json!({"birthDate": "1990-05-15T14:30:00", "lat": 37.5, "lng": 127}))
                .unwrap();
        assert_eq!(request.birth_date, "1990-05-15T14:30:00");
        assert_eq!(request.lng, 127.0);
        assert_eq!(request.report_type, "daily");
    }

    #[test]
    fn test_explicit_report_type() {
        let request = CalculateRequest::from_json(
            &json!({"birthDate": "1990-05-15", "lat": 0, "lng": 0, "reportType": "weekly"}),
        )
        .unwrap();
        assert_eq!(request.report_type, "weekly");
    }

    #[test]
    fn test_missing_birth_date() {
        for body in [
            json!({"lat": 1, "lng": 2}),
            json!({"birthDate": "", "lat": 1, "lng": 2}),
            json!({"birthDate": null, "lat": 1, "lng": 2}),
        ] {
            assert_eq!(
                CalculateRequest::from_json(&body),
                Err(RequestError::MissingBirthDate)
            );
        }
    }

    #[test]
    fn test_coordinates_must_be_numbers() {
        let err = CalculateRequest::from_json(&json!({"birthDate": "1990-05-15", "lat": "37.5", "lng": 127}))
            .unwrap_err();
        assert_eq!(err, RequestError::InvalidCoordinates);
        assert_eq!(err.to_string(), "lat and lng must be numbers");

        let err = CalculateRequest::from_json(&json!({"birthDate": "1990-05-15", "lat": 37.5})).unwrap_err();
        assert_eq!(err, RequestError::InvalidCoordinates);
    }

    #[test]
    fn test_non_string_report_type_is_rejected() {
        for report_type in [json!(5), json!(null), json!(["weekly"])] {
            let body = json!({"birthDate": "1990-05-15", "lat": 0, "lng": 0, "reportType": report_type});
            let err = CalculateRequest::from_json(&body).unwrap_err();
            assert_eq!(err, RequestError::InvalidReportType);
            assert_eq!(err.to_string(), "Invalid reportType: must be a string.");
        }
    }

    #[test]
    fn test_non_object_body() {
        assert_eq!(
            CalculateRequest::from_json(&json!([1, 2])),
            Err(RequestError::NotAnObject)
        );
    }

    #[test]
    fn test_read_request_body_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, r#"{"birthDate":"2000-01-01","lat":0,"lng":0}"#).unwrap();

        let body = read_request_body(&path).unwrap();
        assert_eq!(body["birthDate"], "2000-01-01");
        assert!(read_request_body(&dir.path().join("missing.json")).is_err());
    }
}
