//! HTTP server initialization and runtime setup.

use crate::config::Config;
use crate::domain::{create_lookup, AvailabilityResolver};
use crate::error::{DomainSuggestError, Result};
use crate::http::{app_router, AppState};
use crate::llm::{create_provider, CandidateGenerator};
use crate::pipeline::DomainPipeline;
use crate::types::PerformanceMetrics;
use std::net::SocketAddr;
use std::sync::Arc;

/// Wire the configured collaborators into a pipeline sharing `metrics`.
pub fn build_pipeline(config: &Config, metrics: Arc<PerformanceMetrics>) -> Result<DomainPipeline> {
    let provider = create_provider(&config.llm)?;
    let lookup = create_lookup(&config.availability)?;

    tracing::info!(
        provider = %provider.name(),
        model = %provider.model(),
        availability = %lookup.method_name(),
        concurrency = config.check.concurrency,
        "Pipeline configured"
    );

    let generator = CandidateGenerator::with_metrics(provider, Arc::clone(&metrics));
    let resolver = AvailabilityResolver::with_metrics(lookup, config.check.clone(), metrics);

    Ok(DomainPipeline::new(generator, resolver, config.pipeline.clone()))
}

/// Runs the HTTP server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if a collaborator cannot be configured, the listen
/// address is invalid or the listener cannot be bound.
pub async fn run(config: Config) -> Result<()> {
    let metrics = Arc::new(PerformanceMetrics::new());
    let pipeline = build_pipeline(&config, Arc::clone(&metrics))?;
    let app = app_router(AppState::new(pipeline, metrics));

    let addr: SocketAddr = config.listen_addr.parse().map_err(|e| {
        DomainSuggestError::config(format!("Invalid LISTEN address '{}': {}", config.listen_addr, e))
    })?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
