//! Prometheus exposition and the service's business metrics.
//!
//! [`init_metrics`] installs the global recorder once at startup and
//! [`metrics_handler`] renders it. The router mounts the handler at
//! [`MetricsConfig::path`] when metrics are enabled.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Default exposition path.
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Metrics settings, read from `METRICS_ENABLED` and `METRICS_PATH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route serving the Prometheus text, always starting with `/`.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_METRICS_PATH.to_string(),
        }
    }
}

impl MetricsConfig {
    /// `METRICS_ENABLED=false` disables collection and the route; any other
    /// value (or none) enables it. `METRICS_PATH` overrides the route.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        let path = lookup("METRICS_PATH")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|v| if v.starts_with('/') { v } else { format!("/{v}") })
            .unwrap_or_else(|| DEFAULT_METRICS_PATH.to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus recorder.
///
/// # Errors
///
/// Fails when metrics are disabled, the recorder was already installed, or
/// the exporter cannot be built.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Render every recorded series in Prometheus text format.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Why [`init_metrics`] did not install a recorder.
#[derive(Debug, Clone)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

/// Count a successful path computation for `query` (e.g. "random_junction").
pub fn record_path_computed(query: &str) {
    metrics::counter!(
        "roadroute_paths_computed_total",
        "query" => query.to_string()
    )
    .increment(1);
}

/// Count a failed path computation. `reason` is "no_path",
/// "insufficient_junctions" or "internal_error".
pub fn record_path_failed(reason: &str, query: &str) {
    metrics::counter!(
        "roadroute_paths_failed_total",
        "reason" => reason.to_string(),
        "query" => query.to_string()
    )
    .increment(1);
}

/// Node count and length in meters of a computed path.
pub fn record_path_shape(nodes: usize, meters: f64) {
    metrics::histogram!("roadroute_path_nodes").record(nodes as f64);
    metrics::histogram!("roadroute_path_length_meters").record(meters);
}

pub fn record_nodes_listed(count: usize) {
    metrics::counter!("roadroute_nodes_listed_total").increment(1);
    metrics::histogram!("roadroute_nodes_returned").record(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> MetricsConfig {
        MetricsConfig::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
    }

    #[test]
    fn test_metrics_config_default() {
        let config = config_from(&[]);
        assert_eq!(config, MetricsConfig::default());
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_metrics_config_reads_path_and_switch() {
        let config = config_from(&[
            ("METRICS_ENABLED", "FALSE"),
            ("METRICS_PATH", "/custom-metrics"),
        ]);
        assert!(!config.enabled);
        assert_eq!(config.path, "/custom-metrics");
    }

    #[test]
    fn test_metrics_path_gets_leading_slash() {
        assert_eq!(config_from(&[("METRICS_PATH", "prom")]).path, "/prom");
        assert_eq!(config_from(&[("METRICS_PATH", " ")]).path, "/metrics");
    }

    #[test]
    fn test_disabled_metrics_are_not_installed() {
        let config = MetricsConfig {
            enabled: false,
            ..MetricsConfig::default()
        };
        assert!(matches!(init_metrics(&config), Err(MetricsError::Disabled)));
    }

    #[test]
    fn test_metrics_handler_returns_prometheus_format() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let output = rt.block_on(async { metrics_handler().await });

        // Either rendered metrics or the "not initialized" comment.
        assert!(output.contains('#') || output.is_empty());
    }

    #[test]
    fn test_business_metric_helpers_do_not_panic() {
        // Without an installed recorder these are no-ops.
        record_path_computed("random_junction");
        record_path_failed("no_path", "random_junction");
        record_path_shape(12, 845.3);
        record_nodes_listed(4210);
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert_eq!(
            MetricsError::AlreadyInitialized.to_string(),
            "metrics recorder already initialized"
        );

        let failed = MetricsError::InstallFailed("test error".to_string());
        assert!(failed.to_string().contains("test error"));
    }
}
