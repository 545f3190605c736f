use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use kratko_core::ModelStatus;
use serde::Serialize;

use crate::state::{AppState, SummaryBackend};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub huggingface_api: ModelStatus,
}

pub async fn health_handler<B>(State(state): State<AppState<B>>) -> impl IntoResponse
where
    B: SummaryBackend + 'static,
{
    let model = state.pipeline.remote().status().await;
    tracing::debug!(model_status = model.label(), "health check");

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            huggingface_api: model,
        }),
    )
}

pub async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Kratko summarizer API running" }))
}
