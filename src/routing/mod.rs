//! Shortest-path routing.

pub mod dijkstra;

pub use dijkstra::{route, Route};
