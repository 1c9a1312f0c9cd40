//! Test fixtures for handler testing.
//!
//! The fixture is a five-node street scenario: a main road `1 - 2 - 3 - 4`
//! heading east along the equator with a spur `2 - 5` heading north from
//! node 2. Junctions (degree other than 2) are 1, 2, 4 and 5.

use std::sync::OnceLock;

use roadroute_lib::{Coordinate, GraphStore, NodeId};

use crate::middleware::RequestId;
use crate::state::AppState;

/// Seed used by [`test_state`] so random pairs are reproducible.
pub const TEST_SEED: u64 = 7;

/// Node identifiers in the fixture graph.
pub mod fixture_nodes {
    use roadroute_lib::NodeId;

    pub const WEST_END: NodeId = 1;
    pub const CROSSING: NodeId = 2;
    pub const BEND: NodeId = 3;
    pub const EAST_END: NodeId = 4;
    pub const SPUR_END: NodeId = 5;

    /// Junctions in load order.
    pub const JUNCTIONS: [NodeId; 4] = [WEST_END, CROSSING, EAST_END, SPUR_END];
}

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Build the fixture graph.
///
/// # Panics
///
/// Panics if the hard-coded fixture is rejected by the builder.
pub fn fixture_graph() -> GraphStore {
    let nodes: [(NodeId, f64, f64); 5] = [
        (fixture_nodes::WEST_END, 0.0, 0.0),
        (fixture_nodes::CROSSING, 0.0, 0.001),
        (fixture_nodes::BEND, 0.0, 0.002),
        (fixture_nodes::EAST_END, 0.0, 0.003),
        (fixture_nodes::SPUR_END, 0.001, 0.001),
    ];
    let edges = [(1, 2), (2, 3), (3, 4), (2, 5)];

    let mut builder = GraphStore::builder();
    for (id, lat, lon) in nodes {
        builder
            .add_node(id, Coordinate::new(lat, lon))
            .unwrap_or_else(|e| panic!("fixture node {id} rejected: {e}"));
    }
    for (from, to) in edges {
        builder
            .add_edge(from, to, None)
            .unwrap_or_else(|e| panic!("fixture edge {from}-{to} rejected: {e}"));
    }
    builder.build()
}

/// Shared, seeded state over the fixture graph.
///
/// The state is built once and cloned afterwards, so the RNG sequence is
/// shared between tests that call this.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| seeded_state(TEST_SEED))
        .clone()
}

/// A fresh state with its own RNG seeded with `seed`.
pub fn seeded_state(seed: u64) -> AppState {
    AppState::from_graph(fixture_graph(), Some(seed))
        .unwrap_or_else(|e| panic!("failed to build fixture state: {}", e))
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", RequestId::generate())
}
