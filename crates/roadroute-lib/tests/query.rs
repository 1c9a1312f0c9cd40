mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{street_graph, A, B, C, D, E};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use roadroute_lib::{Coordinate, Error, GraphStore, QueryService};

fn service(seed: u64) -> QueryService {
    QueryService::new(Arc::new(street_graph()), SmallRng::seed_from_u64(seed))
        .expect("fixture has four junctions")
}

#[test]
fn random_path_connects_two_distinct_junctions() {
    let service = service(11);
    let junctions: HashSet<_> = service.junctions().ids().iter().copied().collect();

    for _ in 0..50 {
        let routed = service.random_path().expect("street graph is connected");
        let start = *routed.nodes.first().unwrap();
        let goal = *routed.nodes.last().unwrap();

        assert_ne!(start, goal);
        assert!(junctions.contains(&start));
        assert!(junctions.contains(&goal));
        assert!(!junctions.contains(&C));
        assert_eq!(routed.path.len(), routed.nodes.len());
        assert_eq!(routed.path.first(), Some(&routed.start_point));
        assert_eq!(routed.path.last(), Some(&routed.end_point));
    }
}

#[test]
fn seeded_services_agree() {
    let first = service(2024);
    let second = service(2024);
    for _ in 0..10 {
        assert_eq!(
            first.random_path().unwrap().nodes,
            second.random_path().unwrap().nodes
        );
    }
}

#[test]
fn explicit_pair_maps_nodes_to_coordinates() {
    let service = service(0);
    let routed = service.path_between(A, D).unwrap();

    assert_eq!(routed.nodes, vec![A, B, C, D]);
    assert_eq!(
        routed.path,
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.001),
            Coordinate::new(0.0, 0.002),
            Coordinate::new(0.0, 0.003),
        ]
    );
    assert_eq!(routed.start_point, Coordinate::new(0.0, 0.0));
    assert_eq!(routed.end_point, Coordinate::new(0.0, 0.003));
}

#[test]
fn all_node_coordinates_follow_load_order() {
    let service = service(0);
    let coordinates = service.all_node_coordinates();

    let expected: Vec<_> = [A, B, C, D, E]
        .iter()
        .map(|&id| service.graph().coordinate(id).unwrap())
        .collect();
    assert_eq!(coordinates, expected);
}

#[test]
fn too_few_junctions_fail_at_construction() {
    // A ring has only degree-2 nodes.
    let mut builder = GraphStore::builder();
    builder
        .add_node(1, Coordinate::new(0.0, 0.0))
        .unwrap()
        .add_node(2, Coordinate::new(0.0, 0.001))
        .unwrap()
        .add_node(3, Coordinate::new(0.001, 0.0))
        .unwrap()
        .add_edge(1, 2, None)
        .unwrap()
        .add_edge(2, 3, None)
        .unwrap()
        .add_edge(3, 1, None)
        .unwrap();

    let error = QueryService::from_seed(Arc::new(builder.build()), Some(1))
        .expect_err("ring has no junctions");
    assert!(matches!(error, Error::InsufficientJunctions { found: 0 }));
}

#[test]
fn unreachable_junctions_surface_path_not_found() {
    // Two disjoint dead-end pairs: every junction pair across islands fails.
    let mut builder = GraphStore::builder();
    for (id, lon) in [(1, 0.0), (2, 0.001), (3, 0.01), (4, 0.011)] {
        builder.add_node(id, Coordinate::new(0.0, lon)).unwrap();
    }
    builder
        .add_edge(1, 2, None)
        .unwrap()
        .add_edge(3, 4, None)
        .unwrap();
    let service = QueryService::from_seed(Arc::new(builder.build()), Some(5)).unwrap();

    assert!(matches!(
        service.path_between(1, 4),
        Err(Error::PathNotFound { start: 1, goal: 4 })
    ));

    let mut saw_failure = false;
    for _ in 0..50 {
        if let Err(error) = service.random_path() {
            assert!(matches!(error, Error::PathNotFound { .. }));
            saw_failure = true;
        }
    }
    assert!(saw_failure, "cross-island pairs should be drawn");
}

#[test]
fn routed_path_serializes_coordinates_as_pairs() {
    let service = service(0);
    let routed = service.path_between(A, B).unwrap();
    let json = serde_json::to_value(&routed).unwrap();

    assert_eq!(json["start_point"], serde_json::json!([0.0, 0.0]));
    assert_eq!(json["path"][1], serde_json::json!([0.0, 0.001]));
}
