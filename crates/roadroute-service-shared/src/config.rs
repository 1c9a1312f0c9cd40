//! Service configuration read from the environment.

use std::path::PathBuf;

/// Default GraphML location inside the container image.
pub const DEFAULT_GRAPH_PATH: &str = "/data/graph.graphml";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;

/// Runtime configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// GraphML file to load at startup.
    pub graph_path: PathBuf,
    /// Port to bind on all interfaces.
    pub port: u16,
    /// Fixed seed for junction pair selection; entropy-seeded when `None`.
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            graph_path: PathBuf::from(DEFAULT_GRAPH_PATH),
            port: DEFAULT_PORT,
            seed: None,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// - `ROADROUTE_GRAPH_PATH`: GraphML file (default: `/data/graph.graphml`)
    /// - `SERVICE_PORT`: HTTP port (default: 5000)
    /// - `ROADROUTE_SEED`: integer seed for reproducible pair selection
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let graph_path = lookup("ROADROUTE_GRAPH_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.graph_path);
        let port = lookup("SERVICE_PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.port);
        let seed = lookup("ROADROUTE_SEED").and_then(|v| v.trim().parse().ok());

        Self {
            graph_path,
            port,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServiceConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.port, 5000);
        assert_eq!(config.graph_path, PathBuf::from("/data/graph.graphml"));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = config_from(&[
            ("ROADROUTE_GRAPH_PATH", "/srv/hanoi.graphml"),
            ("SERVICE_PORT", "8088"),
            ("ROADROUTE_SEED", "42"),
        ]);
        assert_eq!(config.graph_path, PathBuf::from("/srv/hanoi.graphml"));
        assert_eq!(config.port, 8088);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("ROADROUTE_GRAPH_PATH", "  "),
            ("SERVICE_PORT", "http"),
            ("ROADROUTE_SEED", "-1"),
        ]);
        assert_eq!(config.graph_path, PathBuf::from(DEFAULT_GRAPH_PATH));
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.seed.is_none());
    }
}
