use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::Coordinate;

/// Numeric identifier for a road node (the OSM node id for OSMnx exports).
pub type NodeId = i64;

/// A road-network node with its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub coordinate: Coordinate,
}

/// Weighted adjacency entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    /// Edge length in meters.
    pub weight: f64,
    target_index: usize,
}

impl Edge {
    pub(crate) fn target_index(&self) -> usize {
        self.target_index
    }
}

/// Immutable in-memory road graph.
///
/// Edges are undirected: inserting `(u, v)` makes each endpoint traversable
/// from the other with the same weight. When the source data holds several
/// parallel edges between the same pair, the first inserted edge wins and
/// later ones only contribute to [`GraphStore::degree`].
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<Edge>>,
    degrees: Vec<usize>,
    edge_count: usize,
}

impl GraphStore {
    /// Start building a new graph.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges inserted while building, parallel edges included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Nodes in load order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    /// Node identifiers in load order.
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|node| node.id)
    }

    /// Position of a node.
    pub fn coordinate(&self, id: NodeId) -> Result<Coordinate> {
        self.position(id).map(|idx| self.nodes[idx].coordinate)
    }

    /// Traversable neighbours of a node, one entry per distinct neighbour.
    pub fn neighbors(&self, id: NodeId) -> Result<&[Edge]> {
        self.position(id).map(|idx| self.adjacency[idx].as_slice())
    }

    /// Number of incident adjacency entries, counting every parallel edge.
    pub fn degree(&self, id: NodeId) -> Result<usize> {
        self.position(id).map(|idx| self.degrees[idx])
    }

    /// Weight of the first inserted edge between `from` and `to`, if any.
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Result<Option<f64>> {
        let from_idx = self.position(from)?;
        let to_idx = self.position(to)?;
        Ok(self.adjacency[from_idx]
            .iter()
            .find(|edge| edge.target_index == to_idx)
            .map(|edge| edge.weight))
    }

    pub(crate) fn position(&self, id: NodeId) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or(Error::NodeNotFound { id })
    }

    pub(crate) fn node_at(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub(crate) fn neighbors_at(&self, idx: usize) -> &[Edge] {
        &self.adjacency[idx]
    }

    pub(crate) fn degree_at(&self, idx: usize) -> usize {
        self.degrees[idx]
    }
}

/// Incremental constructor for [`GraphStore`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: GraphStore,
}

impl GraphBuilder {
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            graph: GraphStore {
                nodes: Vec::with_capacity(nodes),
                index: HashMap::with_capacity(nodes),
                adjacency: Vec::with_capacity(nodes),
                degrees: Vec::with_capacity(nodes),
                edge_count: 0,
            },
        }
    }

    /// Register a node. Identifiers must be unique.
    pub fn add_node(&mut self, id: NodeId, coordinate: Coordinate) -> Result<&mut Self> {
        if !coordinate.is_valid() {
            return Err(Error::InvalidCoordinate {
                id,
                lat: coordinate.lat,
                lon: coordinate.lon,
            });
        }
        if self.graph.index.contains_key(&id) {
            return Err(Error::DuplicateNode { id });
        }

        let graph = &mut self.graph;
        graph.index.insert(id, graph.nodes.len());
        graph.nodes.push(Node { id, coordinate });
        graph.adjacency.push(Vec::new());
        graph.degrees.push(0);
        Ok(self)
    }

    /// Connect two registered nodes.
    ///
    /// `length` is the edge length in meters; when absent the haversine
    /// distance between the endpoints is used instead.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, length: Option<f64>) -> Result<&mut Self> {
        let graph = &mut self.graph;
        let (Some(&from_idx), Some(&to_idx)) = (graph.index.get(&from), graph.index.get(&to))
        else {
            return Err(Error::UnknownEdgeEndpoint { from, to });
        };

        let weight = match length {
            Some(weight) if weight.is_finite() && weight >= 0.0 => weight,
            Some(weight) => return Err(Error::InvalidEdgeWeight { from, to, weight }),
            None => graph.nodes[from_idx]
                .coordinate
                .distance_to(&graph.nodes[to_idx].coordinate),
        };

        graph.edge_count += 1;
        graph.degrees[from_idx] += 1;
        graph.degrees[to_idx] += 1;

        if from_idx != to_idx {
            link(&mut graph.adjacency[from_idx], to, to_idx, weight);
            link(&mut graph.adjacency[to_idx], from, from_idx, weight);
        }
        Ok(self)
    }

    /// Freeze the graph.
    pub fn build(self) -> GraphStore {
        debug!(
            nodes = self.graph.nodes.len(),
            edges = self.graph.edge_count,
            "graph built"
        );
        self.graph
    }
}

// First inserted edge wins; parallel edges keep the original weight.
fn link(entries: &mut Vec<Edge>, target: NodeId, target_index: usize, weight: f64) {
    if entries.iter().any(|edge| edge.target_index == target_index) {
        return;
    }
    entries.push(Edge {
        target,
        weight,
        target_index,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_nodes() -> GraphBuilder {
        let mut builder = GraphStore::builder();
        builder
            .add_node(1, Coordinate::new(0.0, 0.0))
            .unwrap()
            .add_node(2, Coordinate::new(0.0, 0.001))
            .unwrap();
        builder
    }

    #[test]
    fn edges_are_traversable_both_ways() {
        let mut builder = two_nodes();
        builder.add_edge(1, 2, Some(120.0)).unwrap();
        let graph = builder.build();

        assert_eq!(graph.edge_weight(1, 2).unwrap(), Some(120.0));
        assert_eq!(graph.edge_weight(2, 1).unwrap(), Some(120.0));
        assert_eq!(graph.neighbors(1).unwrap()[0].target, 2);
        assert_eq!(graph.neighbors(2).unwrap()[0].target, 1);
    }

    #[test]
    fn first_parallel_edge_wins() {
        let mut builder = two_nodes();
        builder
            .add_edge(1, 2, Some(150.0))
            .unwrap()
            .add_edge(2, 1, Some(112.0))
            .unwrap();
        let graph = builder.build();

        assert_eq!(graph.neighbors(1).unwrap().len(), 1);
        assert_eq!(graph.edge_weight(1, 2).unwrap(), Some(150.0));
        assert_eq!(graph.edge_weight(2, 1).unwrap(), Some(150.0));
        assert_eq!(graph.degree(1).unwrap(), 2);
        assert_eq!(graph.degree(2).unwrap(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn missing_length_falls_back_to_haversine() {
        let mut builder = two_nodes();
        builder.add_edge(1, 2, None).unwrap();
        let graph = builder.build();

        let weight = graph.edge_weight(1, 2).unwrap().unwrap();
        assert!((weight - 111.195).abs() < 0.01);
    }

    #[test]
    fn rejects_duplicate_nodes() {
        let mut builder = two_nodes();
        let err = builder
            .add_node(1, Coordinate::new(1.0, 1.0))
            .expect_err("duplicate id");
        assert!(matches!(err, Error::DuplicateNode { id: 1 }));
    }

    #[test]
    fn rejects_unknown_endpoints_and_bad_weights() {
        let mut builder = two_nodes();
        assert!(matches!(
            builder.add_edge(1, 9, Some(1.0)),
            Err(Error::UnknownEdgeEndpoint { from: 1, to: 9 })
        ));
        assert!(matches!(
            builder.add_edge(1, 2, Some(-3.0)),
            Err(Error::InvalidEdgeWeight { .. })
        ));
        assert!(matches!(
            builder.add_edge(1, 2, Some(f64::INFINITY)),
            Err(Error::InvalidEdgeWeight { .. })
        ));
    }

    #[test]
    fn self_loop_counts_twice_but_is_not_traversable() {
        let mut builder = two_nodes();
        builder.add_edge(1, 1, Some(5.0)).unwrap();
        let graph = builder.build();

        assert_eq!(graph.degree(1).unwrap(), 2);
        assert!(graph.neighbors(1).unwrap().is_empty());
    }

    #[test]
    fn unknown_lookups_fail() {
        let graph = two_nodes().build();
        assert!(matches!(
            graph.coordinate(42),
            Err(Error::NodeNotFound { id: 42 })
        ));
        assert!(graph.neighbors(42).is_err());
        assert!(graph.degree(42).is_err());
    }
}
