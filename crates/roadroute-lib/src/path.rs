use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{GraphStore, NodeId};

/// Node sequence from start to goal, inclusive, with its total weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    /// Sum of edge weights along the path, in meters.
    pub cost: f64,
}

impl Path {
    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Run A* search with the haversine distance to `goal` as heuristic.
///
/// The result is optimal as long as no edge is shorter than the great-circle
/// distance between its endpoints. That holds for surveyed road lengths but
/// is not checked when the graph is built.
///
/// Among frontier entries with equal estimates, the node loaded first is
/// expanded first.
pub fn find_path(graph: &GraphStore, start: NodeId, goal: NodeId) -> Result<Path> {
    let goal_idx = graph.position(goal)?;
    let goal_position = graph.node_at(goal_idx).coordinate;
    search(graph, start, goal, |idx| {
        graph.node_at(idx).coordinate.distance_to(&goal_position)
    })
}

/// Run Dijkstra's algorithm; the same search as [`find_path`] without a
/// heuristic.
pub fn find_path_dijkstra(graph: &GraphStore, start: NodeId, goal: NodeId) -> Result<Path> {
    search(graph, start, goal, |_| 0.0)
}

/// Total weight of a node sequence, using the first-wins edge weights.
///
/// Fails with [`Error::NotAdjacent`] at the first step without an edge.
pub fn path_cost(graph: &GraphStore, nodes: &[NodeId]) -> Result<f64> {
    nodes.windows(2).try_fold(0.0, |total, pair| {
        graph
            .edge_weight(pair[0], pair[1])?
            .map(|weight| total + weight)
            .ok_or(Error::NotAdjacent {
                from: pair[0],
                to: pair[1],
            })
    })
}

fn search<H>(graph: &GraphStore, start: NodeId, goal: NodeId, heuristic: H) -> Result<Path>
where
    H: Fn(usize) -> f64,
{
    let start_idx = graph.position(start)?;
    let goal_idx = graph.position(goal)?;

    if start_idx == goal_idx {
        return Ok(Path {
            nodes: vec![start],
            cost: 0.0,
        });
    }

    let mut g_score = vec![f64::INFINITY; graph.node_count()];
    let mut parents: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut queue = BinaryHeap::new();

    g_score[start_idx] = 0.0;
    queue.push(AStarEntry::new(start_idx, 0.0, heuristic(start_idx)));

    while let Some(entry) = queue.pop() {
        let current_score = g_score[entry.node];
        if entry.cost.0 > current_score {
            continue;
        }

        if entry.node == goal_idx {
            return Ok(Path {
                nodes: reconstruct_path(graph, &parents, start_idx, goal_idx),
                cost: current_score,
            });
        }

        for edge in graph.neighbors_at(entry.node) {
            let next = edge.target_index();
            let tentative_g = current_score + edge.weight;
            if tentative_g < g_score[next] {
                g_score[next] = tentative_g;
                parents[next] = Some(entry.node);
                queue.push(AStarEntry::new(next, tentative_g, heuristic(next)));
            }
        }
    }

    Err(Error::PathNotFound { start, goal })
}

fn reconstruct_path(
    graph: &GraphStore,
    parents: &[Option<usize>],
    start: usize,
    goal: usize,
) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(graph.node_at(node).id);
        if node == start {
            break;
        }
        current = parents[node];
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: usize,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl AStarEntry {
    fn new(node: usize, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lowest estimate, then the lowest index.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
