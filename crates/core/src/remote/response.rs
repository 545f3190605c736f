use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the inference service answered, by status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Success,
    /// Model is still being loaded onto the inference hardware.
    Loading,
    RateLimited,
    Other(u16),
}

impl ResponseStatus {
    pub fn from_code(code: u16) -> Self {
        match code {
            200 => ResponseStatus::Success,
            503 => ResponseStatus::Loading,
            429 => ResponseStatus::RateLimited,
            other => ResponseStatus::Other(other),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SummaryText {
    summary_text: Option<String>,
}

/// The service answers with either a one-element list or a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SummaryPayload {
    List(Vec<SummaryText>),
    Single(SummaryText),
}

/// A successful summary, whatever shape it arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSummaryResult {
    pub text: String,
}

impl RemoteSummaryResult {
    pub fn from_body(body: &str) -> Result<Self, String> {
        let payload: SummaryPayload =
            serde_json::from_str(body).map_err(|e| format!("unparsable summary body: {e}"))?;

        let text = match payload {
            SummaryPayload::List(items) => items.into_iter().next().and_then(|s| s.summary_text),
            SummaryPayload::Single(item) => item.summary_text,
        };

        match text {
            Some(text) if !text.trim().is_empty() => Ok(Self { text }),
            _ => Err("response carries no summary_text".to_string()),
        }
    }
}

/// Body of a 503 while the model warms up.
#[derive(Debug, Default, Deserialize)]
pub struct LoadingState {
    pub estimated_time: Option<f64>,
}

impl LoadingState {
    /// Parse leniently; a body that is not JSON simply carries no estimate.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Estimate in seconds, if it is a usable wait.
    pub fn estimate(&self) -> Option<f64> {
        self.estimated_time
            .filter(|secs| Duration::try_from_secs_f64(*secs).is_ok())
    }

    /// The estimate as a sleep duration; `None` for absent, negative,
    /// non-finite or out-of-range values.
    pub fn wait(&self) -> Option<Duration> {
        self.estimated_time
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

/// Result of a lightweight health check against the remote model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ModelStatus {
    Available {
        code: u16,
    },
    Loading {
        code: u16,
        #[serde(skip_serializing_if = "Option::is_none")]
        estimated_time: Option<f64>,
    },
    Error {
        code: u16,
        detail: String,
    },
    Down {
        error: String,
    },
}

impl ModelStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ModelStatus::Available { .. } => "available",
            ModelStatus::Loading { .. } => "loading",
            ModelStatus::Error { .. } => "error",
            ModelStatus::Down { .. } => "down",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_status_codes() {
        assert_eq!(ResponseStatus::from_code(200), ResponseStatus::Success);
        assert_eq!(ResponseStatus::from_code(503), ResponseStatus::Loading);
        assert_eq!(ResponseStatus::from_code(429), ResponseStatus::RateLimited);
        assert_eq!(ResponseStatus::from_code(401), ResponseStatus::Other(401));
    }

    #[test]
    fn accepts_list_shaped_summary() {
        let result = RemoteSummaryResult::from_body(r#"[{"summary_text": "A list summary."}]"#);
        assert_eq!(result.unwrap().text, "A list summary.");
    }

    #[test]
    fn accepts_object_shaped_summary() {
        let result = RemoteSummaryResult::from_body(r#"{"summary_text": "An object summary."}"#);
        assert_eq!(result.unwrap().text, "An object summary.");
    }

    #[test]
    fn rejects_empty_or_missing_summary() {
        assert!(RemoteSummaryResult::from_body("[]").is_err());
        assert!(RemoteSummaryResult::from_body(r#"{"error": "oops"}"#).is_err());
        assert!(RemoteSummaryResult::from_body(r#"[{"summary_text": "  "}]"#).is_err());
        assert!(RemoteSummaryResult::from_body("<html>bad gateway</html>").is_err());
    }

    #[test]
    fn loading_state_tolerates_missing_estimate() {
        assert_eq!(LoadingState::from_body(r#"{"estimated_time": 12.5}"#).estimate(), Some(12.5));
        assert_eq!(LoadingState::from_body(r#"{"error": "loading"}"#).estimate(), None);
        assert_eq!(LoadingState::from_body("not json").estimate(), None);
        assert_eq!(LoadingState::from_body(r#"{"estimated_time": -3.0}"#).estimate(), None);
        assert_eq!(LoadingState::from_body(r#"{"estimated_time": 1e20}"#).estimate(), None);
        assert_eq!(LoadingState::from_body(r#"{"estimated_time": 1e20}"#).wait(), None);
        assert_eq!(
            LoadingState::from_body(r#"{"estimated_time": 2.5}"#).wait(),
            Some(Duration::from_millis(2500))
        );
    }

    #[test]
    fn model_status_serializes_with_status_tag() {
        assert_eq!(
            serde_json::to_value(ModelStatus::Available { code: 200 }).unwrap(),
            serde_json::json!({"status": "available", "code": 200})
        );
        assert_eq!(
            serde_json::to_value(ModelStatus::Loading {
                code: 503,
                estimated_time: None
            })
            .unwrap(),
            serde_json::json!({"status": "loading", "code": 503})
        );
    }
}
