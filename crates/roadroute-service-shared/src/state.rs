//! Application state for the HTTP service.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the loaded graph and the query service built on top of it.

use std::path::Path;
use std::sync::Arc;

use roadroute_lib::{load_graphml, Error as LibError, GraphStore, QueryService};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Graph file not found.
    GraphNotFound(String),

    /// Failed to read or build the graph.
    GraphLoad(LibError),

    /// The graph cannot serve random junction queries.
    QueryService(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GraphNotFound(path) => write!(f, "graph file not found: {}", path),
            Self::GraphLoad(e) => write!(f, "failed to load graph: {}", e),
            Self::QueryService(e) => write!(f, "failed to initialise query service: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::GraphLoad(e) | Self::QueryService(e) => Some(e),
            Self::GraphNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        if err.is_graph_load() {
            Self::GraphLoad(err)
        } else {
            Self::QueryService(err)
        }
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor. The graph is never mutated after
/// construction, so handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<QueryService>,
}

impl AppState {
    /// Load application state from a GraphML file.
    ///
    /// Classifies junctions immediately and fails when fewer than two exist,
    /// so a misconfigured graph is caught before the listener starts.
    ///
    /// # Arguments
    ///
    /// * `graph_path` - Path to the GraphML file
    /// * `seed` - Optional RNG seed for reproducible random pairs
    pub fn load(graph_path: impl AsRef<Path>, seed: Option<u64>) -> Result<Self, AppStateError> {
        let graph_path = graph_path.as_ref();

        if !graph_path.exists() {
            return Err(AppStateError::GraphNotFound(
                graph_path.display().to_string(),
            ));
        }

        tracing::info!(path = %graph_path.display(), "loading graph");
        let graph = load_graphml(graph_path)?;
        tracing::info!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count(),
            "graph loaded successfully"
        );

        Self::from_graph(graph, seed)
    }

    /// Create application state from a pre-built graph.
    ///
    /// This is useful for testing or when the graph comes from another loader.
    pub fn from_graph(graph: GraphStore, seed: Option<u64>) -> Result<Self, AppStateError> {
        let service = QueryService::from_seed(Arc::new(graph), seed)?;
        tracing::info!(
            junction_count = service.junctions().len(),
            seeded = seed.is_some(),
            "query service ready"
        );
        Ok(Self::from_service(service))
    }

    /// Wrap an already constructed query service.
    pub fn from_service(service: QueryService) -> Self {
        Self {
            inner: Arc::new(service),
        }
    }

    /// Access the query service.
    pub fn query(&self) -> &QueryService {
        &self.inner
    }

    /// Owned handle to the query service, for moving into blocking tasks.
    pub fn query_arc(&self) -> Arc<QueryService> {
        Arc::clone(&self.inner)
    }

    /// Access the loaded graph.
    pub fn graph(&self) -> &GraphStore {
        self.inner.graph()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("node_count", &self.graph().node_count())
            .field("junction_count", &self.inner.junctions().len())
            .finish()
    }
}
