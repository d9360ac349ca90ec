//! # DharaNav
//!
//! Flow-aware navigation over geographic grids for autonomous surface
//! vehicles.
//!
//! Given a Y x X grid of (lat, lon) coordinates and a co-indexed field
//! of ambient flow vectors (ocean current, wind drift), DharaNav builds
//! a directed graph whose edge costs measure the propulsion needed to
//! make each one-cell hop against or with the flow, then answers "what
//! heading should I steer next?" with a shortest-path search.
//!
//! ## Features
//!
//! - **Flow-corrected edge costs**: each hop's cost is the residual
//!   propulsion after subtracting the source cell's current from the
//!   required ground velocity, so favorable currents make edges cheap
//! - **Ellipsoidal geodesy**: azimuths and distances from Vincenty's
//!   inverse formulae on WGS84
//! - **Snapshot concurrency**: queries read an immutable snapshot while
//!   field updates rebuild and atomically swap in a new one
//! - **Parallel rebuilds**: the per-cell graph construction fans out
//!   over worker threads
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dhara_nav::{FlowField, FlowVector, GeoPoint, NavConfig, NavigationEngine};
//!
//! # fn main() -> dhara_nav::Result<()> {
//! // Two rows of two cells, one degree apart, still water
//! let coords = vec![
//!     vec![GeoPoint::new(1.0, 0.0), GeoPoint::new(1.0, 1.0)],
//!     vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)],
//! ];
//! let flow = vec![vec![FlowVector::ZERO; 2]; 2];
//!
//! let field = FlowField::from_rows(coords, flow)?;
//! let engine = NavigationEngine::new(field, NavConfig::default())?;
//!
//! let heading = engine.next_heading(GeoPoint::new(1.0, 0.0), GeoPoint::new(0.0, 1.0))?;
//! println!("steer {:.1} deg, {} waypoints", heading.azimuth_deg, heading.path.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`geo`]: geographic value types
//! - [`geodesy`]: WGS84 inverse problem (azimuth + distance)
//! - [`grid`]: cell addressing, field storage, nearest-cell lookup
//! - [`graph`]: flow graph representation and construction
//! - [`routing`]: Dijkstra shortest path
//! - [`engine`]: snapshot ownership and the public query API
//!
//! ## Limitations
//!
//! The nearest-cell lookup treats raw (lat, lon) as a flat Euclidean
//! plane. This matches the grids the engine was built for (single-region
//! ocean models) but is increasingly wrong for grids spanning a wide
//! latitude range or crossing the antimeridian.

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod geodesy;
pub mod graph;
pub mod grid;
pub mod routing;

pub use config::NavConfig;
pub use engine::{Heading, NavigationEngine};
pub use error::{NavError, Result};
pub use geo::{FlowVector, GeoPoint};
pub use geodesy::Forward;
pub use graph::{FlowEdge, GraphBuilder, NavGraph, ProgressFn};
pub use grid::{FlowField, GridCell, NodeId, SpatialLookup};
pub use routing::Route;
