//! Roadroute HTTP service.
//!
//! Loads a road graph from GraphML at startup and serves shortest paths
//! between randomly selected junctions.
//!
//! # Configuration
//!
//! - `ROADROUTE_GRAPH_PATH` - Path to the GraphML file (default: /data/graph.graphml)
//! - `SERVICE_PORT` - HTTP port (default: 5000)
//! - `ROADROUTE_SEED` - Fixed seed for junction pair selection (optional)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus route (default: enabled at /metrics)

use std::net::SocketAddr;

use tracing::{error, info};

use roadroute_service::build_router;
use roadroute_service_shared::{
    AppState, LoggingConfig, MetricsConfig, ServiceConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("roadroute");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional; keep serving without them.
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        graph_path = %config.graph_path.display(),
        port = config.port,
        seeded = config.seed.is_some(),
        "starting roadroute service"
    );

    let state = AppState::load(&config.graph_path, config.seed).map_err(|e| {
        error!(error = %e, path = %config.graph_path.display(), "failed to load application state");
        e
    })?;

    info!(
        nodes = state.graph().node_count(),
        edges = state.graph().edge_count(),
        junctions = state.query().junctions().len(),
        "application state loaded"
    );

    let app = build_router(state, &metrics_config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
