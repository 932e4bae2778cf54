//! pathtrace-core: directed weighted graph store and shortest-path engine.
//!
//! A pure Rust library that owns a directed, edge-weighted graph and
//! computes shortest paths between two chosen nodes with Bellman-Ford,
//! Floyd-Warshall, or Dijkstra, producing an ordered path plus the
//! highlighted-edge set a rendering layer displays.
//! No UI dependencies — this crate compiles standalone.
//!
//! Designed as the core engine behind an interactive graph visualizer,
//! but usable independently for benchmarking and testing.

mod error;
mod graph;
mod input;
mod path;
mod session;
mod shortest;

pub use error::{ComputeError, MutationError, RunError};
pub use graph::{Graph, NodeId, NodeKind, DEFAULT_WEIGHT};
pub use input::{parse_algorithm, parse_edge, parse_node, parse_random, parse_run_node};
pub use path::{edge_list, walk_predecessors};
pub use session::{MutationOp, RunResult, RunState, Session, Snapshot};
pub use shortest::{
    bellman_ford, dijkstra, floyd_warshall, Algorithm, AllPairs, ShortestPathTree,
};
