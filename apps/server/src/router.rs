use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    handlers::{health_handler, root_handler, summarize_handler},
    state::{AppState, SummaryBackend},
};

pub fn create_router<B>(state: AppState<B>) -> Router
where
    B: SummaryBackend + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler::<B>))
        .route("/summarize", post(summarize_handler::<B>))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
