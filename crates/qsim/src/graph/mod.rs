//! Connectivity graph: builder (BFS ray tracing) and path-mode labeling (DFS).
//!
//! Purpose
//! - Turn a grid snapshot into a directed graph whose edges are ray segments
//!   between consecutive elements (`build`), then tag each segment with the
//!   path mode it belongs to (`label`).
//!
//! Layout
//! - `types.rs`: arena graph (nodes, edges, adjacency) and cycle detection.
//! - `build.rs`: breadth-first construction from sources.
//! - `label.rs`: depth-first path-mode assignment.

mod build;
mod label;
mod types;

pub use build::{build_graph, scan_next};
pub use label::{dfs_tree_edges, label_paths, unique_source};
pub use types::{Edge, Graph, NodeId};
