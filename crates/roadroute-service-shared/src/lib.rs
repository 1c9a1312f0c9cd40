//! Shared infrastructure for the roadroute HTTP service.
//!
//! - [`AppState`]: loaded road graph and query service shared by handlers
//! - [`health_live`] / [`health_ready`]: liveness and readiness probe handlers
//! - [`ErrorResponse`]: `{"status":"error",...}` envelope for failed requests
//! - [`ServiceResponse`]: `{"status":"success",...}` envelope for payloads
//! - [`config`]: environment-driven service configuration
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: structured logging setup
//! - [`middleware`]: request ID propagation and HTTP metrics
//!
//! # Architecture
//!
//! Handlers stay thin. Graph loading, junction classification and path search
//! live in `roadroute-lib`; this crate only provides the HTTP glue:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Take the request ID                                      │
//! │  - Call roadroute-lib through AppState                      │
//! │  - Record business metrics                                  │
//! │  - Wrap the result in a success or error envelope           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a seeded fixture state for handler
//! testing. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

pub mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::ServiceConfig;
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_nodes_listed, record_path_computed, record_path_failed,
    record_path_shape, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{from_lib_error, ErrorResponse, MESSAGE_PATH_NOT_FOUND, STATUS_ERROR};
pub use response::{ServiceResponse, STATUS_SUCCESS};
pub use state::{AppState, AppStateError};
