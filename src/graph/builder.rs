//! Flow graph construction.
//!
//! Transforms a [`FlowField`] into a [`NavGraph`]. For every cell the
//! builder computes the geodesic azimuth and distance to each in-bounds
//! king-move neighbor, converts the hop into a required ground velocity
//! for the configured timestep, subtracts the source cell's ambient
//! flow, and stores the residual propulsion magnitude as the edge cost:
//!
//! ```text
//! v       = distance / timestep
//! u_req   = v * sin(azimuth)         (east component)
//! v_req   = v * cos(azimuth)         (north component)
//! cost    = |(u_req - u_flow, v_req - v_flow)|
//! ```
//!
//! A following current lowers the cost of downstream edges and raises
//! the cost of the return edges, so edge pairs are asymmetric: each
//! direction subtracts the flow at its own source cell.
//!
//! The build is the dominant cost of a field update (one geodesic batch
//! per cell), so the grid is split into row bands computed on scoped
//! worker threads. Cell edges read only the immutable field, making the
//! bands independent.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use tracing::debug;

use crate::error::Result;
use crate::geodesy;
use crate::grid::{FlowField, GridCell, NodeId};

use super::nav_graph::{FlowEdge, NavGraph};

/// Progress callback: `(completed cells, total cells)`.
///
/// Invoked once per completed row, from whichever worker finished the
/// row, never while any engine lock is held.
pub type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

/// Builds navigation graphs from flow fields.
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    timestep_secs: f64,
    workers: usize,
}

impl GraphBuilder {
    /// Create a builder for the given hop time budget.
    ///
    /// `workers == 0` resolves to the machine's available parallelism.
    pub fn new(timestep_secs: f64, workers: usize) -> Self {
        Self {
            timestep_secs,
            workers,
        }
    }

    /// Build the directed graph for one field snapshot.
    pub fn build(
        &self,
        field: &FlowField,
        progress: Option<&(dyn Fn(usize, usize) + Send + Sync)>,
    ) -> Result<NavGraph> {
        let y_dim = field.y_dim();
        let x_dim = field.x_dim();
        let total = field.len();
        let workers = self.effective_workers(y_dim);

        debug!(y_dim, x_dim, workers, "building navigation graph");

        let mut adjacency: Vec<Vec<FlowEdge>> = vec![Vec::new(); total];
        let completed = AtomicUsize::new(0);

        if workers <= 1 {
            for (flat, slot) in adjacency.iter_mut().enumerate() {
                *slot = self.cell_edges(field, GridCell::from_flat(flat, x_dim))?;
                Self::report(&completed, x_dim, total, progress);
            }
        } else {
            let band_len = y_dim.div_ceil(workers) * x_dim;
            let completed = &completed;

            thread::scope(|scope| -> Result<()> {
                let mut handles = Vec::with_capacity(workers);
                for (band_idx, band) in adjacency.chunks_mut(band_len).enumerate() {
                    let start = band_idx * band_len;
                    handles.push(scope.spawn(move || -> Result<()> {
                        for (offset, slot) in band.iter_mut().enumerate() {
                            let cell = GridCell::from_flat(start + offset, x_dim);
                            *slot = self.cell_edges(field, cell)?;
                            Self::report(completed, x_dim, total, progress);
                        }
                        Ok(())
                    }));
                }
                for handle in handles {
                    handle.join().expect("graph build worker panicked")?;
                }
                Ok(())
            })?;
        }

        let graph = NavGraph::from_parts(y_dim, x_dim, adjacency);
        debug!(edges = graph.edge_count(), "navigation graph built");
        Ok(graph)
    }

    /// Outgoing edges of one cell.
    fn cell_edges(&self, field: &FlowField, cell: GridCell) -> Result<Vec<FlowEdge>> {
        let x_dim = field.x_dim();
        let origin = field.coords()[cell.flat_index(x_dim)];
        let flow = field.flow(cell).unwrap_or_default();

        let neighbors = cell.neighbors_within(field.y_dim(), x_dim);
        let targets: Vec<_> = neighbors
            .iter()
            .map(|n| field.coords()[n.flat_index(x_dim)])
            .collect();
        let legs = geodesy::forward_batch(origin, &targets)?;

        let mut edges = Vec::with_capacity(neighbors.len());
        for (neighbor, leg) in neighbors.into_iter().zip(legs) {
            let speed = leg.distance_m / self.timestep_secs;
            let theta = leg.azimuth_deg.to_radians();

            let u_net = speed * theta.sin() - flow.u;
            let v_net = speed * theta.cos() - flow.v;

            edges.push(FlowEdge {
                target: NodeId::encode(neighbor),
                cost: (u_net * u_net + v_net * v_net).sqrt(),
                azimuth_deg: leg.azimuth_deg,
            });
        }
        Ok(edges)
    }

    fn report(
        completed: &AtomicUsize,
        x_dim: usize,
        total: usize,
        progress: Option<&(dyn Fn(usize, usize) + Send + Sync)>,
    ) {
        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
        if done % x_dim == 0 {
            if let Some(callback) = progress {
                callback(done, total);
            }
        }
    }

    fn effective_workers(&self, y_dim: usize) -> usize {
        let requested = if self.workers == 0 {
            thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
        } else {
            self.workers
        };
        requested.min(y_dim).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{FlowVector, GeoPoint};
    use std::sync::Mutex;

    /// 1-degree-spaced grid with the northernmost row first.
    fn grid_coords(y_dim: usize, x_dim: usize) -> Vec<GeoPoint> {
        let mut coords = Vec::with_capacity(y_dim * x_dim);
        for row in 0..y_dim {
            for col in 0..x_dim {
                coords.push(GeoPoint::new(10.0 - row as f64, 20.0 + col as f64));
            }
        }
        coords
    }

    fn still_water_field(y_dim: usize, x_dim: usize) -> FlowField {
        FlowField::new(
            y_dim,
            x_dim,
            grid_coords(y_dim, x_dim),
            vec![FlowVector::ZERO; y_dim * x_dim],
        )
        .unwrap()
    }

    #[test]
    fn test_edge_count_3x3() {
        let field = still_water_field(3, 3);
        let graph = GraphBuilder::new(3600.0, 1).build(&field, None).unwrap();

        // 4 corners * 3 + 4 edges * 5 + 1 interior * 8
        assert_eq!(graph.node_count(), 9);
        assert_eq!(graph.edge_count(), 40);
        assert!(graph.edge_count() <= 8 * field.len());
    }

    #[test]
    fn test_no_self_loops() {
        let field = still_water_field(3, 3);
        let graph = GraphBuilder::new(3600.0, 1).build(&field, None).unwrap();

        for node in graph.nodes() {
            for edge in graph.edges(node).unwrap() {
                assert_ne!(edge.target, node);
            }
        }
    }

    #[test]
    fn test_zero_flow_cost_is_required_ground_speed() {
        let timestep = 3600.0;
        let field = still_water_field(3, 3);
        let graph = GraphBuilder::new(timestep, 1).build(&field, None).unwrap();

        for node in graph.nodes() {
            let origin = field.coord(node.decode()).unwrap();
            for edge in graph.edges(node).unwrap() {
                let target = field.coord(edge.target.decode()).unwrap();
                let leg = geodesy::forward(origin, target).unwrap();

                assert!(edge.cost >= 0.0);
                assert!((edge.cost - leg.distance_m / timestep).abs() < 1e-9);
                assert!((edge.azimuth_deg - leg.azimuth_deg).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_following_current_discounts_downstream_edge() {
        // Uniform 1 m/s eastward current
        let flow = vec![FlowVector::new(1.0, 0.0); 9];
        let field = FlowField::new(3, 3, grid_coords(3, 3), flow).unwrap();
        let graph = GraphBuilder::new(3600.0, 1).build(&field, None).unwrap();

        let center = NodeId::encode(GridCell::new(1, 1));
        let east = NodeId::encode(GridCell::new(1, 2));
        let west = NodeId::encode(GridCell::new(1, 0));

        let edges = graph.edges(center).unwrap();
        let eastward = edges.iter().find(|e| e.target == east).unwrap();
        let westward = edges.iter().find(|e| e.target == west).unwrap();

        assert!(eastward.cost < westward.cost);
    }

    #[test]
    fn test_edge_pairs_use_their_own_source_flow() {
        // Current differs per cell, so the two directions of a pair
        // subtract different flows and end up with different costs.
        let mut flow = vec![FlowVector::ZERO; 4];
        flow[0] = FlowVector::new(2.0, 0.0);
        let field = FlowField::new(2, 2, grid_coords(2, 2), flow).unwrap();
        let graph = GraphBuilder::new(3600.0, 1).build(&field, None).unwrap();

        let a = NodeId::encode(GridCell::new(0, 0));
        let b = NodeId::encode(GridCell::new(0, 1));

        let ab = graph
            .edges(a)
            .unwrap()
            .iter()
            .find(|e| e.target == b)
            .unwrap()
            .cost;
        let ba = graph
            .edges(b)
            .unwrap()
            .iter()
            .find(|e| e.target == a)
            .unwrap()
            .cost;

        assert!((ab - ba).abs() > 0.5);
    }

    #[test]
    fn test_parallel_build_matches_sequential() {
        let field = still_water_field(8, 5);
        let sequential = GraphBuilder::new(1800.0, 1).build(&field, None).unwrap();
        let parallel = GraphBuilder::new(1800.0, 4).build(&field, None).unwrap();

        assert_eq!(sequential.edge_count(), parallel.edge_count());
        for node in sequential.nodes() {
            assert_eq!(sequential.edges(node), parallel.edges(node));
        }
    }

    #[test]
    fn test_progress_reports_every_row() {
        let field = still_water_field(4, 3);
        let seen: Mutex<Vec<(usize, usize)>> = Mutex::new(Vec::new());

        GraphBuilder::new(3600.0, 1)
            .build(&field, Some(&|done, total| {
                seen.lock().unwrap().push((done, total));
            }))
            .unwrap();

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 4);
        assert!(seen.iter().all(|&(_, total)| total == 12));
        assert_eq!(seen.last(), Some(&(12, 12)));
    }

    #[test]
    fn test_single_cell_grid_builds_empty_graph() {
        let field = FlowField::new(
            1,
            1,
            vec![GeoPoint::new(0.0, 0.0)],
            vec![FlowVector::ZERO],
        )
        .unwrap();
        let graph = GraphBuilder::new(3600.0, 1).build(&field, None).unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }
}
