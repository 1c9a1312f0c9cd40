use std::collections::HashSet;

use tracing::info;

use crate::graph::{GraphStore, NodeId};

/// Degree of a pass-through node on a simple road segment.
const PASS_THROUGH_DEGREE: usize = 2;

/// Nodes whose incident edge count is not exactly two.
///
/// Intersections (degree >= 3), dead ends (degree 1) and isolated points
/// (degree 0) are junctions. Members keep the graph's load order so seeded
/// random selection is reproducible.
#[derive(Debug, Clone, Default)]
pub struct JunctionSet {
    ids: Vec<NodeId>,
    members: HashSet<NodeId>,
}

impl JunctionSet {
    /// Classify every node of the graph.
    pub fn classify(graph: &GraphStore) -> Self {
        let ids: Vec<NodeId> = (0..graph.node_count())
            .filter(|&idx| graph.degree_at(idx) != PASS_THROUGH_DEGREE)
            .map(|idx| graph.node_at(idx).id)
            .collect();
        let members = ids.iter().copied().collect();

        info!(
            junctions = ids.len(),
            nodes = graph.node_count(),
            "classified junctions"
        );

        Self { ids, members }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.members.contains(&id)
    }

    /// Junction ids in graph load order.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.ids.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    #[test]
    fn degree_two_is_pass_through() {
        let mut builder = GraphStore::builder();
        for id in 0..6 {
            builder
                .add_node(id, Coordinate::new(0.0, id as f64 * 0.001))
                .unwrap();
        }
        // 0 isolated, 1 dead end, 2 pass-through, 3 hub (degree 3)
        builder
            .add_edge(1, 2, None)
            .unwrap()
            .add_edge(2, 3, None)
            .unwrap()
            .add_edge(3, 4, None)
            .unwrap()
            .add_edge(3, 5, None)
            .unwrap();
        let graph = builder.build();

        let junctions = JunctionSet::classify(&graph);
        assert!(junctions.contains(0));
        assert!(junctions.contains(1));
        assert!(!junctions.contains(2));
        assert!(junctions.contains(3));
        assert_eq!(junctions.ids(), &[0, 1, 3, 4, 5]);
    }

    #[test]
    fn parallel_edges_raise_degree() {
        let mut builder = GraphStore::builder();
        builder
            .add_node(1, Coordinate::new(0.0, 0.0))
            .unwrap()
            .add_node(2, Coordinate::new(0.0, 0.001))
            .unwrap()
            .add_edge(1, 2, Some(111.2))
            .unwrap()
            .add_edge(2, 1, Some(111.2))
            .unwrap();
        let graph = builder.build();

        // Each endpoint has two adjacency entries, both pointing at the same neighbour.
        let junctions = JunctionSet::classify(&graph);
        assert!(junctions.is_empty());
    }
}
