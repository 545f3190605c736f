use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::provider::InferenceProvider;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParameters {
    pub max_length: usize,
    pub min_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_sample: Option<bool>,
}

/// JSON body posted to the inference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

impl InferenceRequest {
    /// Deterministic (no sampling) summarization request.
    pub fn summarization(inputs: String, max_length: usize, min_length: usize) -> Self {
        Self {
            inputs,
            parameters: GenerationParameters {
                max_length,
                min_length,
                do_sample: Some(false),
            },
        }
    }

    /// Smallest request the model accepts; used for health checks.
    pub fn ping() -> Self {
        Self {
            inputs: "Ping".to_string(),
            parameters: GenerationParameters {
                max_length: 2,
                min_length: 1,
                do_sample: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("connection failed: {0}")]
    Connection(String),
}

/// Sends one request to the inference service. Status codes are not
/// interpreted here; only network-level failures are errors.
#[async_trait]
pub trait InferenceTransport: Send + Sync {
    async fn post(
        &self,
        request: &InferenceRequest,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ReqwestTransport {
    pub fn new(provider: &InferenceProvider) -> Self {
        Self::with_client(reqwest::Client::new(), provider)
    }

    pub fn with_client(client: reqwest::Client, provider: &InferenceProvider) -> Self {
        Self {
            client,
            endpoint: provider.endpoint(),
            api_key: provider.api_key.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceTransport for ReqwestTransport {
    async fn post(
        &self,
        request: &InferenceRequest,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        let to_transport_error = |e: reqwest::Error| {
            if e.is_timeout() {
                TransportError::Timeout(timeout)
            } else {
                TransportError::Connection(e.to_string())
            }
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .map_err(to_transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(to_transport_error)?;

        Ok(RawResponse { status, body })
    }
}
