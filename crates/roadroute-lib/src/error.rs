use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the roadroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Graph file could not be located at the resolved path.
    #[error("graph file not found at {path}")]
    GraphFileNotFound { path: PathBuf },

    /// Raised when the graph document is structurally invalid.
    #[error("malformed graph: {message}")]
    MalformedGraph { message: String },

    /// Raised when two nodes share the same identifier.
    #[error("duplicate node id {id}")]
    DuplicateNode { id: NodeId },

    /// Raised when an edge references a node that does not exist.
    #[error("edge {from} -> {to} references an unknown node")]
    UnknownEdgeEndpoint { from: NodeId, to: NodeId },

    /// Raised when a node coordinate is not a finite latitude/longitude.
    #[error("invalid coordinate for node {id}: ({lat}, {lon})")]
    InvalidCoordinate { id: NodeId, lat: f64, lon: f64 },

    /// Raised when an edge length is negative or not finite.
    #[error("invalid weight {weight} on edge {from} -> {to}")]
    InvalidEdgeWeight { from: NodeId, to: NodeId, weight: f64 },

    /// Raised when the graph has too few junctions to pick a random pair.
    #[error("at least two junctions are required, found {found}")]
    InsufficientJunctions { found: usize },

    /// Raised when a lookup references a node that is not in the graph.
    #[error("node {id} not found")]
    NodeNotFound { id: NodeId },

    /// Raised when two consecutive nodes of a sequence share no edge.
    #[error("nodes {from} and {to} are not adjacent")]
    NotAdjacent { from: NodeId, to: NodeId },

    /// Raised when no path connects two nodes.
    #[error("no path found between {start} and {goal}")]
    PathNotFound { start: NodeId, goal: NodeId },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for XML parsing errors.
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
}

impl Error {
    /// Whether this error happened while reading or building the graph.
    ///
    /// Load errors are fatal at startup; there is no usable service without
    /// a graph.
    pub fn is_graph_load(&self) -> bool {
        matches!(
            self,
            Error::GraphFileNotFound { .. }
                | Error::MalformedGraph { .. }
                | Error::DuplicateNode { .. }
                | Error::UnknownEdgeEndpoint { .. }
                | Error::InvalidCoordinate { .. }
                | Error::InvalidEdgeWeight { .. }
                | Error::Io(_)
                | Error::Xml(_)
        )
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedGraph {
            message: message.into(),
        }
    }
}
