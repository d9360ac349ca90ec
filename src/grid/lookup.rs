//! Nearest-cell spatial lookup.
//!
//! Maps an arbitrary geographic query point to the nearest grid cell via
//! a k-d tree over the flattened coordinate list. The tree treats raw
//! (lat, lon) pairs as a flat Euclidean plane — a deliberate
//! approximation inherited from the map format this crate consumes. It
//! ignores ellipsoidal distortion, which is acceptable for the
//! single-region grids this engine routes over but degrades for grids
//! spanning a wide latitude range.

use kiddo::{KdTree, SquaredEuclidean};

use crate::error::Result;
use crate::geo::GeoPoint;
use crate::grid::field::FlowField;
use crate::grid::index::GridCell;

/// Read-only nearest-neighbor index over one grid snapshot.
pub struct SpatialLookup {
    tree: KdTree<f64, 2>,
    x_dim: usize,
    len: usize,
}

impl SpatialLookup {
    /// Build the index from a field's coordinate grid.
    pub fn build(field: &FlowField) -> Self {
        let mut tree: KdTree<f64, 2> = KdTree::new();
        for (i, coord) in field.coords().iter().enumerate() {
            tree.add(&[coord.lat, coord.lon], i as u64);
        }

        Self {
            tree,
            x_dim: field.x_dim(),
            len: field.len(),
        }
    }

    /// The grid cell whose coordinate is closest to the query point.
    ///
    /// Fails fast with `InvalidCoordinate` on malformed queries; always
    /// returns a valid in-grid cell otherwise.
    pub fn nearest(&self, point: GeoPoint) -> Result<GridCell> {
        point.validate()?;

        let hit = self.tree.nearest_one::<SquaredEuclidean>(&[point.lat, point.lon]);
        Ok(GridCell::from_flat(hit.item as usize, self.x_dim))
    }

    /// Number of indexed cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: built from a non-empty field.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl std::fmt::Debug for SpatialLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialLookup")
            .field("len", &self.len)
            .field("x_dim", &self.x_dim)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;
    use crate::geo::FlowVector;

    fn test_field() -> FlowField {
        // 3x3 grid, one degree spacing, northernmost row first
        let mut coords = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                coords.push(GeoPoint::new(10.0 - row as f64, 20.0 + col as f64));
            }
        }
        FlowField::new(3, 3, coords, vec![FlowVector::ZERO; 9]).unwrap()
    }

    #[test]
    fn test_exact_coordinate_hits_its_cell() {
        let field = test_field();
        let lookup = SpatialLookup::build(&field);

        for row in 0..3u32 {
            for col in 0..3u32 {
                let cell = GridCell::new(row, col);
                let coord = field.coord(cell).unwrap();
                assert_eq!(lookup.nearest(coord).unwrap(), cell);
            }
        }
    }

    #[test]
    fn test_off_grid_point_resolves_to_nearest() {
        let field = test_field();
        let lookup = SpatialLookup::build(&field);

        // Slightly northeast of the center cell (9.0, 21.0)
        let cell = lookup.nearest(GeoPoint::new(9.2, 21.3)).unwrap();
        assert_eq!(cell, GridCell::new(1, 1));

        // Far outside the grid still clamps to the closest corner
        let cell = lookup.nearest(GeoPoint::new(50.0, -120.0)).unwrap();
        assert_eq!(cell, GridCell::new(0, 0));
    }

    #[test]
    fn test_invalid_query_rejected() {
        let field = test_field();
        let lookup = SpatialLookup::build(&field);

        let result = lookup.nearest(GeoPoint::new(f64::NAN, 0.0));
        assert!(matches!(result, Err(NavError::InvalidCoordinate { .. })));
    }

    #[test]
    fn test_len_matches_field() {
        let field = test_field();
        let lookup = SpatialLookup::build(&field);
        assert_eq!(lookup.len(), field.len());
        assert!(!lookup.is_empty());
    }
}
