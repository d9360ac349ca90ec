//! Flow field storage.
//!
//! A [`FlowField`] couples a Y x X grid of geographic coordinates with a
//! co-indexed grid of ambient flow vectors, stored as flat row-major
//! arrays. Both arrays are validated against the declared dimensions at
//! construction, so every downstream consumer can rely on the shape
//! invariant instead of re-checking it.

use crate::error::{NavError, Result};
use crate::geo::{FlowVector, GeoPoint};
use crate::grid::index::GridCell;

/// Geographic coordinate grid plus co-indexed flow field.
#[derive(Clone, Debug)]
pub struct FlowField {
    y_dim: usize,
    x_dim: usize,
    coords: Vec<GeoPoint>,
    flow: Vec<FlowVector>,
}

impl FlowField {
    /// Create a field from flat row-major arrays.
    ///
    /// Fails if the grid is empty, if either array does not contain
    /// exactly `y_dim * x_dim` entries, or if any coordinate is NaN or
    /// out of range. A failed construction installs nothing.
    pub fn new(
        y_dim: usize,
        x_dim: usize,
        coords: Vec<GeoPoint>,
        flow: Vec<FlowVector>,
    ) -> Result<Self> {
        if y_dim == 0 || x_dim == 0 {
            return Err(NavError::EmptyGrid);
        }

        let expected = y_dim * x_dim;
        if coords.len() != expected || flow.len() != expected {
            return Err(NavError::ShapeMismatch {
                expected,
                coords: coords.len(),
                flow: flow.len(),
            });
        }

        for coord in &coords {
            coord.validate()?;
        }

        Ok(Self {
            y_dim,
            x_dim,
            coords,
            flow,
        })
    }

    /// Create a field from row-major nested arrays.
    ///
    /// Dimensions are taken from the coordinate rows; ragged input is
    /// rejected as a shape mismatch.
    pub fn from_rows(coords: Vec<Vec<GeoPoint>>, flow: Vec<Vec<FlowVector>>) -> Result<Self> {
        let y_dim = coords.len();
        let x_dim = coords.first().map(|row| row.len()).unwrap_or(0);

        let flat_coords: Vec<GeoPoint> = coords.into_iter().flatten().collect();
        let flat_flow: Vec<FlowVector> = flow.into_iter().flatten().collect();

        Self::new(y_dim, x_dim, flat_coords, flat_flow)
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

    /// Total cell count.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Always false: empty grids are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Whether a cell lies inside the grid.
    #[inline]
    pub fn contains(&self, cell: GridCell) -> bool {
        (cell.row as usize) < self.y_dim && (cell.col as usize) < self.x_dim
    }

    /// Geographic coordinate of a cell, if in bounds.
    #[inline]
    pub fn coord(&self, cell: GridCell) -> Option<GeoPoint> {
        self.contains(cell)
            .then(|| self.coords[cell.flat_index(self.x_dim)])
    }

    /// Ambient flow at a cell, if in bounds.
    #[inline]
    pub fn flow(&self, cell: GridCell) -> Option<FlowVector> {
        self.contains(cell)
            .then(|| self.flow[cell.flat_index(self.x_dim)])
    }

    /// Flattened row-major coordinate array.
    #[inline]
    pub fn coords(&self) -> &[GeoPoint] {
        &self.coords
    }
}
