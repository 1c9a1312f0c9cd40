//! Query façade used by the HTTP layer.
//!
//! [`QueryService`] owns the shared graph, the cached junction set and the
//! random source. It is `Sync`: graph reads need no locking, and the RNG is
//! locked only while a pair is drawn, never during the search itself.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::Coordinate;
use crate::graph::{GraphStore, NodeId};
use crate::junction::JunctionSet;
use crate::path::find_path;
use crate::selector::select_pair;

/// A computed path expressed as coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedPath {
    /// Coordinates from start to end, inclusive.
    pub path: Vec<Coordinate>,
    pub start_point: Coordinate,
    pub end_point: Coordinate,
    /// Node identifiers matching `path`.
    pub nodes: Vec<NodeId>,
    /// Total path length in meters.
    pub cost: f64,
}

pub struct QueryService {
    graph: Arc<GraphStore>,
    junctions: JunctionSet,
    rng: Mutex<SmallRng>,
}

impl QueryService {
    /// Classify junctions and validate that random pairs can be drawn.
    pub fn new(graph: Arc<GraphStore>, rng: SmallRng) -> Result<Self> {
        let junctions = JunctionSet::classify(&graph);
        if junctions.len() < 2 {
            return Err(Error::InsufficientJunctions {
                found: junctions.len(),
            });
        }

        Ok(Self {
            graph,
            junctions,
            rng: Mutex::new(rng),
        })
    }

    /// Like [`QueryService::new`], seeding the RNG from `seed` or from OS
    /// entropy when `None`.
    pub fn from_seed(graph: Arc<GraphStore>, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::new(graph, rng)
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn junctions(&self) -> &JunctionSet {
        &self.junctions
    }

    /// Shortest path between two distinct, randomly drawn junctions.
    pub fn random_path(&self) -> Result<RoutedPath> {
        let (start, goal) = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            select_pair(&self.junctions, &mut *rng)?
        };
        debug!(start, goal, "selected random junction pair");
        self.path_between(start, goal)
    }

    /// Shortest path between two known nodes.
    pub fn path_between(&self, start: NodeId, goal: NodeId) -> Result<RoutedPath> {
        let found = find_path(&self.graph, start, goal)?;
        let path = found
            .nodes
            .iter()
            .map(|&id| self.graph.coordinate(id))
            .collect::<Result<Vec<_>>>()?;

        Ok(RoutedPath {
            start_point: self.graph.coordinate(start)?,
            end_point: self.graph.coordinate(goal)?,
            path,
            nodes: found.nodes,
            cost: found.cost,
        })
    }

    /// Coordinates of every node, in load order.
    pub fn all_node_coordinates(&self) -> Vec<Coordinate> {
        self.graph.nodes().map(|node| node.coordinate).collect()
    }
}

impl std::fmt::Debug for QueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryService")
            .field("node_count", &self.graph.node_count())
            .field("junction_count", &self.junctions.len())
            .finish()
    }
}
