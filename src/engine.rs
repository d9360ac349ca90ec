//! Navigation engine orchestration.
//!
//! Owns the current (field, spatial index, graph) snapshot and answers
//! routing queries against it. A field update rebuilds the index and
//! graph off-lock and installs the finished snapshot with one atomic
//! pointer swap, so queries never wait behind a rebuild: in-flight
//! readers keep the `Arc` to the previous snapshot until they are done,
//! and a failed rebuild leaves the previous snapshot in place. A
//! separate rebuild mutex serializes concurrent updates.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::info;

use crate::config::NavConfig;
use crate::error::{NavError, Result};
use crate::geo::{FlowVector, GeoPoint};
use crate::graph::{GraphBuilder, NavGraph, ProgressFn};
use crate::grid::{FlowField, GridCell, NodeId, SpatialLookup};
use crate::routing;

/// Answer to a heading query.
#[derive(Clone, Debug)]
pub struct Heading {
    /// Azimuth of the next hop, degrees clockwise from true north.
    pub azimuth_deg: f64,
    /// Full route in geographic coordinates, source cell first,
    /// destination cell last.
    pub path: Vec<GeoPoint>,
}

/// One consistent version of the navigable world.
struct Snapshot {
    field: FlowField,
    lookup: SpatialLookup,
    graph: NavGraph,
}

impl Snapshot {
    /// Index and graph are always derived from the same field in
    /// [`build_snapshot`]; a disagreement here means a programming
    /// error, surfaced instead of silently routing on mixed versions.
    fn verify(&self) -> Result<()> {
        let cells = self.field.len();
        if self.lookup.len() == cells && self.graph.node_count() == cells {
            Ok(())
        } else {
            Err(NavError::SnapshotMismatch)
        }
    }
}

fn build_snapshot(
    config: &NavConfig,
    progress: Option<&ProgressFn>,
    field: FlowField,
) -> Result<Snapshot> {
    let lookup = SpatialLookup::build(&field);
    let graph = GraphBuilder::new(config.timestep_secs, config.workers).build(&field, progress)?;

    Ok(Snapshot {
        field,
        lookup,
        graph,
    })
}

/// Flow-aware navigation engine.
pub struct NavigationEngine {
    config: NavConfig,
    progress: Option<Box<ProgressFn>>,
    /// Serializes rebuilds without blocking readers.
    rebuild_lock: Mutex<()>,
    current: RwLock<Arc<Snapshot>>,
}

impl NavigationEngine {
    /// Build an engine from an initial field.
    pub fn new(field: FlowField, config: NavConfig) -> Result<Self> {
        Self::with_progress(field, config, None)
    }

    /// Build an engine with an optional rebuild progress callback.
    ///
    /// The callback observes `(completed, total)` cell counts during the
    /// initial build and every subsequent [`set_field`]; it runs outside
    /// all engine locks.
    ///
    /// [`set_field`]: NavigationEngine::set_field
    pub fn with_progress(
        field: FlowField,
        config: NavConfig,
        progress: Option<Box<ProgressFn>>,
    ) -> Result<Self> {
        config.validate()?;
        let snapshot = build_snapshot(&config, progress.as_deref(), field)?;
        info!(
            cells = snapshot.field.len(),
            edges = snapshot.graph.edge_count(),
            "navigation engine ready"
        );

        Ok(Self {
            config,
            progress,
            rebuild_lock: Mutex::new(()),
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Replace the flow field, rebuilding the spatial index and graph.
    ///
    /// The rebuild runs without holding the snapshot lock; queries keep
    /// reading the previous snapshot until the new one is swapped in.
    /// On error the previous snapshot stays installed.
    pub fn set_field(&self, field: FlowField) -> Result<()> {
        let _rebuild = self.rebuild_lock.lock();
        let snapshot = build_snapshot(&self.config, self.progress.as_deref(), field)?;
        info!(
            cells = snapshot.field.len(),
            edges = snapshot.graph.edge_count(),
            "installed new flow field snapshot"
        );

        *self.current.write() = Arc::new(snapshot);
        Ok(())
    }

    /// Azimuth of the best next hop from `pos` toward `dest`, plus the
    /// full route in geographic coordinates.
    ///
    /// Both points resolve to their nearest grid cells first; requesting
    /// a route to the cell one is already in fails with
    /// `DegenerateRoute`.
    pub fn next_heading(&self, pos: GeoPoint, dest: GeoPoint) -> Result<Heading> {
        let snapshot = self.snapshot();
        snapshot.verify()?;

        let src_cell = snapshot.lookup.nearest(pos)?;
        let dest_cell = snapshot.lookup.nearest(dest)?;

        let route = routing::route(
            &snapshot.graph,
            NodeId::encode(src_cell),
            NodeId::encode(dest_cell),
        )?;

        let mut path = Vec::with_capacity(route.nodes.len());
        for node in &route.nodes {
            path.push(self.resolve_coord(&snapshot, node.decode())?);
        }

        Ok(Heading {
            azimuth_deg: route.first_azimuth_deg,
            path,
        })
    }

    /// Ambient flow at the grid cell nearest to `pos`.
    pub fn flow_at(&self, pos: GeoPoint) -> Result<FlowVector> {
        let snapshot = self.snapshot();
        snapshot.verify()?;

        let cell = snapshot.lookup.nearest(pos)?;
        snapshot.field.flow(cell).ok_or_else(|| {
            NavError::out_of_bounds(cell, snapshot.field.y_dim(), snapshot.field.x_dim())
        })
    }

    /// Engine configuration.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Dimensions of the current grid as `(y_dim, x_dim)`.
    pub fn grid_dims(&self) -> (usize, usize) {
        let snapshot = self.snapshot();
        (snapshot.field.y_dim(), snapshot.field.x_dim())
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    fn resolve_coord(&self, snapshot: &Snapshot, cell: GridCell) -> Result<GeoPoint> {
        snapshot.field.coord(cell).ok_or_else(|| {
            NavError::out_of_bounds(cell, snapshot.field.y_dim(), snapshot.field.x_dim())
        })
    }
}

impl std::fmt::Debug for NavigationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("NavigationEngine")
            .field("config", &self.config)
            .field("cells", &snapshot.field.len())
            .field("edges", &snapshot.graph.edge_count())
            .finish()
    }
}
