//! Shortest-path search over the navigation graph.
//!
//! Plain binary-heap Dijkstra: edge costs are non-negative propulsion
//! magnitudes, so no heuristic or re-weighting is needed. The search
//! returns the full node path plus the azimuth of the first hop, which
//! is what a steering loop actually consumes.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::error::{NavError, Result};
use crate::graph::NavGraph;
use crate::grid::NodeId;

/// Result of a shortest-path query.
#[derive(Clone, Debug)]
pub struct Route {
    /// Ordered path from source to destination, inclusive.
    pub nodes: Vec<NodeId>,
    /// Azimuth of the first edge on the path, degrees in [0, 360).
    pub first_azimuth_deg: f64,
    /// Sum of edge costs along the path.
    pub total_cost: f64,
}

/// Node in the Dijkstra open set.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
    node: NodeId,
    cost: f64,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for SearchNode {}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lower cost = higher priority)
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path from `src` to `dest`.
///
/// Fails with `OutOfBounds` if either node is not a vertex of `graph`,
/// `DegenerateRoute` if both resolve to the same node, and `NoPathFound`
/// if the destination is unreachable.
pub fn route(graph: &NavGraph, src: NodeId, dest: NodeId) -> Result<Route> {
    ensure_in_graph(graph, src)?;
    ensure_in_graph(graph, dest)?;
    if src == dest {
        return Err(NavError::DegenerateRoute);
    }

    let mut dist: HashMap<NodeId, f64> = HashMap::new();
    let mut prev: HashMap<NodeId, NodeId> = HashMap::new();
    let mut open_set = BinaryHeap::new();

    dist.insert(src, 0.0);
    open_set.push(SearchNode {
        node: src,
        cost: 0.0,
    });

    while let Some(SearchNode { node, cost }) = open_set.pop() {
        if node == dest {
            break;
        }
        // Skip stale heap entries
        if cost > *dist.get(&node).unwrap_or(&f64::INFINITY) {
            continue;
        }

        if let Some(edges) = graph.edges(node) {
            for edge in edges {
                let tentative = cost + edge.cost;
                if tentative < *dist.get(&edge.target).unwrap_or(&f64::INFINITY) {
                    dist.insert(edge.target, tentative);
                    prev.insert(edge.target, node);
                    open_set.push(SearchNode {
                        node: edge.target,
                        cost: tentative,
                    });
                }
            }
        }
    }

    let total_cost = *dist.get(&dest).ok_or(NavError::NoPathFound)?;

    let mut nodes = vec![dest];
    let mut current = dest;
    while current != src {
        current = *prev.get(&current).ok_or(NavError::NoPathFound)?;
        nodes.push(current);
    }
    nodes.reverse();

    let first_azimuth_deg = graph
        .edges(nodes[0])
        .and_then(|edges| edges.iter().find(|e| e.target == nodes[1]))
        .map(|e| e.azimuth_deg)
        .ok_or(NavError::NoPathFound)?;

    Ok(Route {
        nodes,
        first_azimuth_deg,
        total_cost,
    })
}

fn ensure_in_graph(graph: &NavGraph, node: NodeId) -> Result<()> {
    if graph.contains(node) {
        Ok(())
    } else {
        Err(NavError::out_of_bounds(
            node.decode(),
            graph.y_dim(),
            graph.x_dim(),
        ))
    }
}
