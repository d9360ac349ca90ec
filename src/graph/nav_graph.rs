//! Directed navigation graph.
//!
//! Vertices are exactly the cells of one grid snapshot; edges are the
//! legal king moves between adjacent cells, weighted by flow-corrected
//! effort. The adjacency list is a flat row-major `Vec` so the graph
//! shares the field's indexing scheme and needs no hashing to walk.

use crate::grid::{GridCell, NodeId};

/// A directed edge to an adjacent cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowEdge {
    /// Destination node.
    pub target: NodeId,
    /// Non-negative traversal effort (m/s of required propulsion).
    pub cost: f64,
    /// Forward azimuth from source to destination, degrees in [0, 360).
    pub azimuth_deg: f64,
}

/// Immutable directed graph over one flow-field snapshot.
#[derive(Clone, Debug)]
pub struct NavGraph {
    y_dim: usize,
    x_dim: usize,
    adjacency: Vec<Vec<FlowEdge>>,
}

impl NavGraph {
    /// Assemble a graph from its parts. The adjacency list must be
    /// row-major with exactly `y_dim * x_dim` entries.
    pub(crate) fn from_parts(y_dim: usize, x_dim: usize, adjacency: Vec<Vec<FlowEdge>>) -> Self {
        debug_assert_eq!(adjacency.len(), y_dim * x_dim);
        Self {
            y_dim,
            x_dim,
            adjacency,
        }
    }

    /// Number of grid rows.
    #[inline]
    pub fn y_dim(&self) -> usize {
        self.y_dim
    }

    /// Number of grid columns.
    #[inline]
    pub fn x_dim(&self) -> usize {
        self.x_dim
    }

    /// Number of vertices.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Whether a node belongs to this graph's grid.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        let cell = node.decode();
        (cell.row as usize) < self.y_dim && (cell.col as usize) < self.x_dim
    }

    /// Outgoing edges of a node, or `None` if the node is not in the
    /// graph.
    pub fn edges(&self, node: NodeId) -> Option<&[FlowEdge]> {
        if !self.contains(node) {
            return None;
        }
        let cell = node.decode();
        Some(&self.adjacency[cell.flat_index(self.x_dim)])
    }

    /// Iterate all nodes in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.adjacency.len()).map(|i| NodeId::encode(GridCell::from_flat(i, self.x_dim)))
    }
}
