//! Curated surface for callers embedding the kernel (editors, CLIs, bindings).
//!
//! Everything here is a re-export; the stage functions are exposed so callers
//! can inspect intermediate results (graph, labels, per-layer operations).

// Element model
pub use crate::element::{next_directions, Element, ElementId, ElementKind, Orientation, Position};
// Grid boundary
pub use crate::grid::{Grid, GridAccessor};
// Stages
pub use crate::evolve::{
    layer_operation, propagate, Amplitude, Operation, Phase, Propagator, State,
};
pub use crate::graph::{
    build_graph, dfs_tree_edges, label_paths, scan_next, unique_source, Edge, Graph, NodeId,
};
// Random layouts
pub use crate::rand::{draw_layout, layout_from_seed, RandomLayoutCfg, ReplayToken};
// Pipeline
pub use crate::cfg::SimCfg;
pub use crate::error::{GridError, SimError};
pub use crate::sim::{simulate, simulate_with_defaults, Simulation};
