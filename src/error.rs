//! Error types for DharaNav

use thiserror::Error;

use crate::grid::GridCell;

/// DharaNav error type
#[derive(Error, Debug, Clone)]
pub enum NavError {
    /// Latitude or longitude is NaN or outside the valid range.
    #[error("invalid coordinate: lat={lat}, lon={lon}")]
    InvalidCoordinate {
        /// Offending latitude in degrees.
        lat: f64,
        /// Offending longitude in degrees.
        lon: f64,
    },

    /// A grid cell fell outside the current grid dimensions.
    #[error("cell ({row}, {col}) is outside the {y_dim}x{x_dim} grid")]
    OutOfBounds {
        /// Row index of the offending cell.
        row: u32,
        /// Column index of the offending cell.
        col: u32,
        /// Number of grid rows.
        y_dim: usize,
        /// Number of grid columns.
        x_dim: usize,
    },

    /// Destination is unreachable from the source.
    #[error("no path between source and destination cells")]
    NoPathFound,

    /// Source and destination resolve to the same grid cell.
    #[error("source and destination resolve to the same grid cell")]
    DegenerateRoute,

    /// Spatial index and navigation graph were built from different grids.
    #[error("spatial index and navigation graph disagree on grid size")]
    SnapshotMismatch,

    /// Coordinate and flow arrays do not match the declared dimensions.
    #[error(
        "grid shape mismatch: expected {expected} cells, \
         got {coords} coordinates and {flow} flow vectors"
    )]
    ShapeMismatch {
        /// Cell count implied by the declared dimensions.
        expected: usize,
        /// Length of the coordinate array.
        coords: usize,
        /// Length of the flow array.
        flow: usize,
    },

    /// Grid has zero cells.
    #[error("grid must contain at least one cell")]
    EmptyGrid,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl NavError {
    pub(crate) fn out_of_bounds(cell: GridCell, y_dim: usize, x_dim: usize) -> Self {
        NavError::OutOfBounds {
            row: cell.row,
            col: cell.col,
            y_dim,
            x_dim,
        }
    }
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, NavError>;
