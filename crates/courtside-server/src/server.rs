//! HTTP server startup

use crate::routes::router;
use crate::state::AppState;
use anyhow::{Context, Result};
use courtside_core::{ChatPipeline, Config, HttpLLMClient, StatsFetcher};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Build the HTTP-backed state from configuration
pub fn build_state(config: &Config) -> Result<AppState> {
    let llm = Arc::new(HttpLLMClient::new(config.llm_service.clone())?);
    let fetcher = Arc::new(StatsFetcher::from_config(&config.stats_provider)?);
    let pipeline = ChatPipeline::with_client(llm.clone(), fetcher);
    Ok(AppState::new(pipeline).with_llm_metrics(llm))
}

/// Serve the `/nba` routes until Ctrl+C or SIGTERM
pub async fn start_server(config: &Config) -> Result<()> {
    let state = build_state(config)?;
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        "Listening on http://{} (LLM {} via {}, stats via {})",
        addr,
        config.llm_service.model,
        config.llm_service.url,
        config.stats_provider.url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
