//! Geographic value types.

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};

/// A WGS84 geographic coordinate in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
}

impl GeoPoint {
    /// Create a new geographic point.
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that both components are finite and within range
    /// (|lat| <= 90, |lon| <= 180).
    pub fn validate(&self) -> Result<()> {
        let valid = self.lat.is_finite()
            && self.lon.is_finite()
            && self.lat.abs() <= 90.0
            && self.lon.abs() <= 180.0;

        if valid {
            Ok(())
        } else {
            Err(NavError::InvalidCoordinate {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Ambient flow at one grid cell as orthogonal velocity components.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowVector {
    /// Eastward component in m/s.
    pub u: f64,
    /// Northward component in m/s.
    pub v: f64,
}

impl FlowVector {
    /// Still water.
    pub const ZERO: FlowVector = FlowVector { u: 0.0, v: 0.0 };

    /// Create a new flow vector.
    #[inline]
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Flow speed in m/s.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        (self.u * self.u + self.v * self.v).sqrt()
    }
}
