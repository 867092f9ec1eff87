//! graph-engine-core: traversal and widest-path engine.
//!
//! A pure Rust library computing breadth-first order, depth-first order and
//! the maximum-bottleneck ("widest") path over a weighted, undirected graph
//! snapshot. Every call builds its own adjacency map and keeps no state
//! afterwards, so independent snapshots can be queried from many threads.
//!
//! Used by the `graph-engine` command-line front end and the benchmark
//! binary, but has no I/O of its own.

mod adjacency;
mod cancel;
mod error;
mod graph;
mod path;
mod traversal;
mod widest;

pub use adjacency::{AdjacencyMap, Neighbor};
pub use cancel::CancelToken;
pub use error::{GraphError, Result};
pub use graph::{Edge, Graph, NodeId};
pub use path::{reconstruct, PathEdge};
pub use traversal::{breadth_first, depth_first};
pub use widest::{widest_path, Capacity, WidestPath};
