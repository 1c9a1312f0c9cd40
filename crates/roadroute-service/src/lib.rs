//! Routes and handlers for the roadroute HTTP service.
//!
//! # Endpoints
//!
//! - `GET /api/random-junction-path` - Shortest path between two random junctions
//! - `GET /api/all-nodes` - Coordinates of every node in the road graph
//! - `GET /metrics` - Prometheus metrics (path set by `METRICS_PATH`, absent when disabled)
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe

#![deny(warnings)]

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use roadroute_lib::{Coordinate, Error as LibError, RoutedPath};
use roadroute_service_shared::{
    AppState, ErrorResponse, MetricsConfig, MetricsLayer, RequestId, ServiceResponse,
    from_lib_error, health_live, health_ready, metrics_handler, record_nodes_listed,
    record_path_computed, record_path_failed, record_path_shape,
};

/// Metric label for the random junction query.
const RANDOM_JUNCTION_QUERY: &str = "random_junction";

/// Payload of `GET /api/random-junction-path`.
#[derive(Debug, Serialize)]
pub struct RandomPathResponse {
    /// Ordered `[lat, lon]` pairs from start to end, inclusive.
    pub path: Vec<Coordinate>,
    pub start_point: Coordinate,
    pub end_point: Coordinate,
}

impl From<RoutedPath> for RandomPathResponse {
    fn from(routed: RoutedPath) -> Self {
        Self {
            path: routed.path,
            start_point: routed.start_point,
            end_point: routed.end_point,
        }
    }
}

/// Payload of `GET /api/all-nodes`.
#[derive(Debug, Serialize)]
pub struct AllNodesResponse {
    pub nodes: Vec<Coordinate>,
}

/// HTTP response: a success envelope or an error envelope.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Success(ServiceResponse<T>),
    Error(ErrorResponse),
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            ApiResponse::Success(data) => data.into_response(),
            ApiResponse::Error(problem) => problem.into_response(),
        }
    }
}

/// Build the service router over a loaded state.
///
/// The Prometheus route is mounted at `metrics.path` only when metrics are
/// enabled.
pub fn build_router(state: AppState, metrics: &MetricsConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/api/random-junction-path", get(random_junction_path))
        .route("/api/all-nodes", get(all_nodes))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));
    if metrics.enabled {
        router = router.route(&metrics.path, get(metrics_handler));
    }

    router
        .layer(MetricsLayer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Handle `GET /api/random-junction-path`.
///
/// The search runs on the blocking pool; a panicked task is reported as a
/// 500 like any other internal fault.
pub async fn random_junction_path(
    State(state): State<AppState>,
    request_id: RequestId,
) -> ApiResponse<RandomPathResponse> {
    let query = state.query_arc();
    let outcome = tokio::task::spawn_blocking(move || query.random_path()).await;

    let routed = match outcome {
        Ok(Ok(routed)) => routed,
        Ok(Err(e)) => {
            error!(request_id = %request_id, error = %e, "path computation failed");
            record_path_failed(failure_reason(&e), RANDOM_JUNCTION_QUERY);
            return ApiResponse::Error(from_lib_error(&e, request_id.as_str()));
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "path computation task aborted");
            record_path_failed("internal_error", RANDOM_JUNCTION_QUERY);
            return ApiResponse::Error(ErrorResponse::internal_error(
                "internal error",
                request_id.as_str(),
            ));
        }
    };

    record_path_computed(RANDOM_JUNCTION_QUERY);
    record_path_shape(routed.nodes.len(), routed.cost);

    info!(
        request_id = %request_id,
        start = routed.nodes.first().copied().unwrap_or_default(),
        goal = routed.nodes.last().copied().unwrap_or_default(),
        nodes = routed.nodes.len(),
        meters = routed.cost,
        "path computed successfully"
    );

    ApiResponse::Success(ServiceResponse::new(RandomPathResponse::from(routed)))
}

/// Handle `GET /api/all-nodes`.
pub async fn all_nodes(
    State(state): State<AppState>,
    request_id: RequestId,
) -> ApiResponse<AllNodesResponse> {
    let nodes = state.query().all_node_coordinates();

    record_nodes_listed(nodes.len());
    info!(request_id = %request_id, count = nodes.len(), "listed all nodes");

    ApiResponse::Success(ServiceResponse::new(AllNodesResponse { nodes }))
}

/// Metric label for a failed path computation.
fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::PathNotFound { .. } => "no_path",
        LibError::InsufficientJunctions { .. } => "insufficient_junctions",
        _ => "internal_error",
    }
}
