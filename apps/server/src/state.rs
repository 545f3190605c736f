use std::sync::Arc;

use async_trait::async_trait;
use kratko_core::{
    AbstractiveSummarizer, HfInferenceClient, ModelStatus, SummarizationPipeline,
    remote::InferenceTransport,
};

/// Remote summarizer that can also report on the model behind it.
#[async_trait]
pub trait SummaryBackend: AbstractiveSummarizer {
    async fn status(&self) -> ModelStatus;
}

#[async_trait]
impl<T: InferenceTransport> SummaryBackend for HfInferenceClient<T> {
    async fn status(&self) -> ModelStatus {
        self.check_status().await
    }
}

/// Shared read-only by every request; each request runs its own pipeline pass.
pub struct AppState<B> {
    pub pipeline: Arc<SummarizationPipeline<B>>,
}

impl<B> AppState<B> {
    pub fn new(pipeline: SummarizationPipeline<B>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}
