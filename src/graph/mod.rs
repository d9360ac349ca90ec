//! Navigation graph representation and construction.

pub mod builder;
pub mod nav_graph;

pub use builder::{GraphBuilder, ProgressFn};
pub use nav_graph::{FlowEdge, NavGraph};
