//! Metrics Server
//!
//! This server serves metrics over /metrics in OpenMetrics format.
use {
    crate::config::RunOptions,
    anyhow::Result,
    axum::{
        routing::get,
        Router,
    },
    axum_prometheus::metrics_exporter_prometheus::PrometheusHandle,
    tokio_util::sync::CancellationToken,
};

pub async fn start_metrics(
    run_options: RunOptions,
    metric_handle: PrometheusHandle,
    cancellation_token: CancellationToken,
) -> Result<()> {
    tracing::info!(addr = %run_options.server.metrics_addr, "Starting Metrics Server...");

    let app = Router::new();
    let app = app.route("/metrics", get(|| async move { metric_handle.render() }));

    let listener = tokio::net::TcpListener::bind(&run_options.server.metrics_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancellation_token.cancelled().await;
            tracing::info!("Shutting down metrics server...");
        })
        .await?;
    Ok(())
}
