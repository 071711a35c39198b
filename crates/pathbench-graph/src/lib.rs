//! Random graph generators and shortest-path benchmarking for pathbench.
//!
//! This crate builds two shapes of randomized, structurally valid graphs
//! and times petgraph's shortest-path algorithms over them.
//!
//! # Key Abstractions
//!
//! - [`Graph`]: undirected graph over `usize` ids or grid [`Cell`]s, keeping
//!   the optional integer weight of every edge next to the petgraph view
//! - [`general::generate`]: connected random graph with N vertices
//! - [`grid::generate`]: grid graph with obstacles and a repair pass
//! - [`SingleSource`] / [`AStar`]: path-finding wrappers around petgraph
//! - [`benchmark`]: timing harness returning raw samples and their mean
//!
//! All randomized entry points take an injectable `rand::Rng`, so seeded
//! generators reproduce graphs exactly.

pub mod algorithms;
pub mod benchmark;
pub mod connectivity;
pub mod general;
pub mod grid;
pub mod stats;
pub mod types;
pub mod validation;

pub use algorithms::{AStar, BellmanFord, Dijkstra, Heuristic, ShortestPaths, SingleSource};
pub use benchmark::{
    BenchmarkReport, PointToPointReport, PointToPointTrial, benchmark, benchmark_point_to_point,
    compare,
};
pub use connectivity::{connected_components, first_component, is_connected};
pub use grid::GridReport;
pub use stats::{GraphStats, compute_stats, quick_summary};
pub use types::{Cell, Direction, Edge, Graph, UNIT_COST};
pub use validation::{ValidationIssue, ValidationResult, validate_graph};
