//! Health check handlers for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always "ok"; a state that cannot serve queries is never constructed.
    pub status: String,

    pub service: String,

    pub version: String,

    /// Number of nodes in the loaded road graph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_loaded: Option<usize>,

    /// Edges inserted while loading, parallel edges included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges_loaded: Option<usize>,

    /// Number of junctions available for random path queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub junctions: Option<usize>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            nodes_loaded: None,
            edges_loaded: None,
            junctions: None,
        }
    }

    /// Create a ready status with graph counts.
    pub fn ready(
        service: &str,
        version: &str,
        nodes: usize,
        edges: usize,
        junctions: usize,
    ) -> Self {
        Self {
            nodes_loaded: Some(nodes),
            edges_loaded: Some(edges),
            junctions: Some(junctions),
            ..Self::alive(service, version)
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"roadroute-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// `AppState` only exists once the graph is loaded and at least two
/// junctions are classified, so a reachable handler is always ready.
///
/// ```text
/// GET /health/ready
/// {"status":"ok",...,"nodes_loaded":4210,"edges_loaded":5532,"junctions":1873}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let graph = state.graph();
    let status = HealthStatus::ready(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        graph.node_count(),
        graph.edge_count(),
        state.query().junctions().len(),
    );
    (StatusCode::OK, Json(status))
}
