//! Shared graph fixtures for integration tests.

use roadroute_lib::{haversine_distance, Coordinate, GraphStore, NodeId};

pub const A: NodeId = 1;
pub const B: NodeId = 2;
pub const C: NodeId = 3;
pub const D: NodeId = 4;
pub const E: NodeId = 5;

/// Five-node street: A-B-C-D along the equator with a spur B-E.
///
/// Every edge is weighted with the haversine distance of its endpoints.
pub fn street_graph() -> GraphStore {
    let nodes = [
        (A, Coordinate::new(0.0, 0.0)),
        (B, Coordinate::new(0.0, 0.001)),
        (C, Coordinate::new(0.0, 0.002)),
        (D, Coordinate::new(0.0, 0.003)),
        (E, Coordinate::new(0.001, 0.001)),
    ];

    let mut builder = GraphStore::builder();
    for (id, coordinate) in nodes {
        builder.add_node(id, coordinate).expect("unique node");
    }
    for (from, to) in [(A, B), (B, C), (C, D), (B, E)] {
        let weight = haversine_distance(&nodes[(from - 1) as usize].1, &nodes[(to - 1) as usize].1);
        builder.add_edge(from, to, Some(weight)).expect("valid edge");
    }
    builder.build()
}

/// Square grid of `size * size` nodes spaced `step` degrees apart.
///
/// Edge weights are the haversine distance scaled by `1.0 + detour`, so the
/// heuristic stays admissible for any non-negative detour. `detour` is drawn
/// per edge from a fixed pattern to make routes non-trivial.
#[allow(dead_code)]
pub fn grid_graph(size: i64, step: f64) -> GraphStore {
    let id = |row: i64, col: i64| row * size + col;
    let coordinate = |row: i64, col: i64| Coordinate::new(row as f64 * step, col as f64 * step);

    let mut builder = GraphStore::builder();
    for row in 0..size {
        for col in 0..size {
            builder
                .add_node(id(row, col), coordinate(row, col))
                .expect("unique node");
        }
    }

    let mut edges = Vec::new();
    for row in 0..size {
        for col in 0..size {
            if col + 1 < size {
                edges.push(((row, col), (row, col + 1)));
            }
            if row + 1 < size {
                edges.push(((row, col), (row + 1, col)));
            }
        }
    }

    for (n, ((r1, c1), (r2, c2))) in edges.into_iter().enumerate() {
        let detour = ((n * 7919) % 13) as f64 / 10.0;
        let weight = haversine_distance(&coordinate(r1, c1), &coordinate(r2, c2)) * (1.0 + detour);
        builder
            .add_edge(id(r1, c1), id(r2, c2), Some(weight))
            .expect("valid edge");
    }
    builder.build()
}
