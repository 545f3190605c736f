//! Client for the hosted abstractive summarization model.

pub mod response;
pub mod transport;

use std::{fmt, time::Duration};

use async_trait::async_trait;

pub use response::{LoadingState, ModelStatus, RemoteSummaryResult, ResponseStatus};
pub use transport::{
    GenerationParameters, InferenceRequest, InferenceTransport, RawResponse, ReqwestTransport,
    TransportError,
};

use crate::{
    config::RemotePolicy,
    error::{KratkoError, Result},
    provider::InferenceProvider,
    text::{truncate_words, word_count},
};

/// Anything that turns text into a fluent summary within length bounds.
#[async_trait]
pub trait AbstractiveSummarizer: Send + Sync {
    async fn summarize(&self, text: &str, max_length: usize, min_length: usize) -> Result<String>;
}

#[async_trait]
impl<S: AbstractiveSummarizer + ?Sized> AbstractiveSummarizer for std::sync::Arc<S> {
    async fn summarize(&self, text: &str, max_length: usize, min_length: usize) -> Result<String> {
        (**self).summarize(text, max_length, min_length).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RetryReason {
    ModelLoading,
    RateLimited,
    Transport(String),
}

impl fmt::Display for RetryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryReason::ModelLoading => f.write_str("model loading"),
            RetryReason::RateLimited => f.write_str("rate limited"),
            RetryReason::Transport(e) => write!(f, "transport error: {e}"),
        }
    }
}

/// What to do after one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt {
    Done(String),
    Retry { wait: Duration, reason: RetryReason },
    Abort(String),
}

/// Map one request outcome onto the retry policy.
pub fn classify(
    outcome: std::result::Result<RawResponse, TransportError>,
    policy: &RemotePolicy,
) -> Attempt {
    let response = match outcome {
        Ok(response) => response,
        Err(e) => {
            return Attempt::Retry {
                wait: policy.transport_retry_wait,
                reason: RetryReason::Transport(e.to_string()),
            };
        }
    };

    match ResponseStatus::from_code(response.status) {
        ResponseStatus::Success => match RemoteSummaryResult::from_body(&response.body) {
            Ok(result) => Attempt::Done(result.text),
            Err(reason) => Attempt::Abort(reason),
        },
        ResponseStatus::Loading => {
            let wait = LoadingState::from_body(&response.body)
                .wait()
                .unwrap_or(policy.default_loading_wait);
            Attempt::Retry {
                wait,
                reason: RetryReason::ModelLoading,
            }
        }
        ResponseStatus::RateLimited => Attempt::Retry {
            wait: policy.rate_limit_wait,
            reason: RetryReason::RateLimited,
        },
        ResponseStatus::Other(code) => Attempt::Abort(format!("API {code}: {}", response.body)),
    }
}

/// Summarizer backed by a Hugging Face style inference endpoint.
pub struct HfInferenceClient<T = ReqwestTransport> {
    transport: T,
    policy: RemotePolicy,
}

impl HfInferenceClient {
    pub fn new(provider: &InferenceProvider, policy: RemotePolicy) -> Self {
        tracing::info!(model = %provider.model, endpoint = %provider.endpoint(), "inference client ready");
        Self::with_transport(ReqwestTransport::new(provider), policy)
    }
}

impl<T: InferenceTransport> HfInferenceClient<T> {
    pub fn with_transport(transport: T, policy: RemotePolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RemotePolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Summarize with at most `max_retries` requests.
    ///
    /// Input over the word limit is cut silently (logged at warn). Loading,
    /// rate-limit and transport failures wait and retry; any other status
    /// aborts at once. Waits suspend only the calling task.
    pub async fn summarize_with_retries(
        &self,
        text: &str,
        max_length: usize,
        min_length: usize,
        max_retries: usize,
    ) -> Result<String> {
        let inputs = match truncate_words(text, self.policy.max_input_words) {
            Some(truncated) => {
                tracing::warn!(
                    original_words = word_count(text),
                    limit = self.policy.max_input_words,
                    "input truncated to fit the model's token limit"
                );
                truncated
            }
            None => text.to_string(),
        };
        let request = InferenceRequest::summarization(inputs, max_length, min_length);

        for attempt in 1..=max_retries {
            let outcome = self
                .transport
                .post(&request, self.policy.request_timeout)
                .await;

            match classify(outcome, &self.policy) {
                Attempt::Done(summary) => {
                    tracing::debug!(attempt, summary_words = word_count(&summary), "summary received");
                    return Ok(summary);
                }
                Attempt::Abort(reason) => {
                    tracing::error!(attempt, %reason, "summarization request rejected");
                    return Err(KratkoError::RemoteUnavailable { reason });
                }
                Attempt::Retry { wait, reason } => {
                    if attempt == max_retries {
                        tracing::warn!(attempt, %reason, "no attempts left");
                        break;
                    }
                    match reason {
                        RetryReason::Transport(_) => {
                            tracing::warn!(attempt, wait_secs = wait.as_secs_f64(), %reason, "retrying")
                        }
                        _ => tracing::info!(attempt, wait_secs = wait.as_secs_f64(), %reason, "retrying"),
                    }
                    tokio::time::sleep(wait).await;
                }
            }
        }

        Err(KratkoError::RemoteUnavailable {
            reason: format!("no summary after {max_retries} attempts"),
        })
    }

    /// Check the model with a tiny request and the short health timeout.
    pub async fn check_status(&self) -> ModelStatus {
        let outcome = self
            .transport
            .post(&InferenceRequest::ping(), self.policy.health_timeout)
            .await;

        match outcome {
            Ok(response) => match ResponseStatus::from_code(response.status) {
                ResponseStatus::Success => ModelStatus::Available {
                    code: response.status,
                },
                ResponseStatus::Loading => ModelStatus::Loading {
                    code: response.status,
                    estimated_time: LoadingState::from_body(&response.body).estimate(),
                },
                ResponseStatus::RateLimited | ResponseStatus::Other(_) => ModelStatus::Error {
                    code: response.status,
                    detail: response.body,
                },
            },
            Err(e) => ModelStatus::Down {
                error: e.to_string(),
            },
        }
    }

    /// Wake the model up; true once it produced a summary.
    pub async fn warmup(&self) -> bool {
        tracing::info!("warming up summarization model");
        match self.summarize_with_retries("Hello world.", 10, 5, self.policy.max_retries).await {
            Ok(_) => {
                tracing::info!("model is warm");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "model warm-up failed");
                false
            }
        }
    }
}

#[async_trait]
impl<T: InferenceTransport> AbstractiveSummarizer for HfInferenceClient<T> {
    async fn summarize(&self, text: &str, max_length: usize, min_length: usize) -> Result<String> {
        self.summarize_with_retries(text, max_length, min_length, self.policy.max_retries)
            .await
    }
}
