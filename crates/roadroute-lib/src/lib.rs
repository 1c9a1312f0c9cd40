//! roadroute library entry points.
//!
//! This crate loads a road-network graph into memory, classifies its
//! junctions and runs heuristic shortest-path searches between them. The HTTP
//! service should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod graph;
pub mod graphml;
pub mod junction;
pub mod path;
pub mod query;
pub mod selector;

pub use error::{Error, Result};
pub use geo::{haversine_distance, Coordinate, EARTH_RADIUS_M};
pub use graph::{Edge, GraphBuilder, GraphStore, Node, NodeId};
pub use graphml::{load_graphml, parse_graphml};
pub use junction::JunctionSet;
pub use path::{find_path, find_path_dijkstra, path_cost, Path};
pub use query::{QueryService, RoutedPath};
pub use selector::select_pair;
