//! Grid cell addressing.
//!
//! Cells are addressed by `(row, col)` and identified by a compact
//! `NodeId` that packs both indices into one `u64`. Encode/decode is a
//! bijection over the whole `u32` range, so two distinct cells can never
//! collide.

use serde::{Deserialize, Serialize};

/// Grid cell position (row-major).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCell {
    /// Row index (y axis).
    pub row: u32,
    /// Column index (x axis).
    pub col: u32,
}

/// King-move offsets, clockwise starting east.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

impl GridCell {
    /// Create a new grid cell position.
    #[inline]
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Reconstruct a cell from its row-major flat index.
    #[inline]
    pub fn from_flat(index: usize, x_dim: usize) -> Self {
        Self {
            row: (index / x_dim) as u32,
            col: (index % x_dim) as u32,
        }
    }

    /// Row-major flat index of this cell.
    #[inline]
    pub fn flat_index(&self, x_dim: usize) -> usize {
        self.row as usize * x_dim + self.col as usize
    }

    /// The up-to-8 king-move neighbors that fall inside a
    /// `y_dim` x `x_dim` grid. Corner cells get 3, non-corner edge
    /// cells 5, interior cells all 8.
    pub fn neighbors_within(&self, y_dim: usize, x_dim: usize) -> Vec<GridCell> {
        let row = self.row as i64;
        let col = self.col as i64;

        let mut neighbors = Vec::with_capacity(8);
        for (dr, dc) in NEIGHBOR_OFFSETS {
            let nr = row + dr;
            let nc = col + dc;
            if nr >= 0 && nc >= 0 && (nr as usize) < y_dim && (nc as usize) < x_dim {
                neighbors.push(GridCell::new(nr as u32, nc as u32));
            }
        }
        neighbors
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Compact, comparable identifier for one grid cell.
///
/// Packs `(row, col)` as `(row << 32) | col`, so ordering follows
/// row-major order and decoding is exact.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(u64);

impl NodeId {
    /// Pack a cell position into a node identifier.
    #[inline]
    pub fn encode(cell: GridCell) -> Self {
        Self(((cell.row as u64) << 32) | cell.col as u64)
    }

    /// Unpack the cell position. Exact inverse of [`NodeId::encode`].
    #[inline]
    pub fn decode(self) -> GridCell {
        GridCell {
            row: (self.0 >> 32) as u32,
            col: self.0 as u32,
        }
    }
}
