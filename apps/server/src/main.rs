use anyhow::Context;
use kratko_core::{HfInferenceClient, InferenceProvider, PipelineConfig, SummarizationPipeline};
use kratko_server::{
    AppState, create_router,
    observability::{TracingConfig, init_tracing},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port: u16 = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    init_tracing(TracingConfig::from_env(), port);

    let provider = InferenceProvider::from_env()?;
    let config = PipelineConfig::default();
    let client = HfInferenceClient::new(&provider, config.remote);

    if std::env::var("WARMUP").is_ok_and(|v| v == "1") && !client.warmup().await {
        tracing::warn!("Serving without a warm model; first requests may wait for it to load");
    }

    let state = AppState::new(SummarizationPipeline::new(config, client));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    tracing::info!(port, model = %provider.model, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
