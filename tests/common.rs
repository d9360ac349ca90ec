//! Test utilities for DharaNav scenario tests.
//!
//! Provides helpers for creating regular coordinate grids and flow
//! patterns.

#![allow(dead_code)]

use dhara_nav::{FlowField, FlowVector, GeoPoint};

/// Regular grid with the northernmost row first: cell (row, col) sits at
/// `(lat0 - row * spacing, lon0 + col * spacing)`.
pub fn grid_coords(
    y_dim: usize,
    x_dim: usize,
    lat0: f64,
    lon0: f64,
    spacing_deg: f64,
) -> Vec<GeoPoint> {
    let mut coords = Vec::with_capacity(y_dim * x_dim);
    for row in 0..y_dim {
        for col in 0..x_dim {
            coords.push(GeoPoint::new(
                lat0 - row as f64 * spacing_deg,
                lon0 + col as f64 * spacing_deg,
            ));
        }
    }
    coords
}

/// One-degree-spaced grid in still water, anchored at (10 N, 20 E).
pub fn still_water_field(y_dim: usize, x_dim: usize) -> FlowField {
    FlowField::new(
        y_dim,
        x_dim,
        grid_coords(y_dim, x_dim, 10.0, 20.0, 1.0),
        vec![FlowVector::ZERO; y_dim * x_dim],
    )
    .unwrap()
}

/// Same grid with a uniform current everywhere.
pub fn uniform_flow_field(y_dim: usize, x_dim: usize, u: f64, v: f64) -> FlowField {
    FlowField::new(
        y_dim,
        x_dim,
        grid_coords(y_dim, x_dim, 10.0, 20.0, 1.0),
        vec![FlowVector::new(u, v); y_dim * x_dim],
    )
    .unwrap()
}
