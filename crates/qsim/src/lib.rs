//! Path-mode simulation kernel for 2D optical setups.
//!
//! Pipeline
//! - `graph::build_graph`: trace rays from the source across the grid into a
//!   directed graph of elements (Manhattan-weighted edges, walls at the border).
//! - `graph::label_paths`: tag DFS chains of edges with path-mode indices.
//! - `evolve::propagate`: start in `e0` and apply one unitary per breadth-first
//!   layer, mixing modes at every beamsplitter.
//! - `sim::simulate` runs all three for one grid snapshot.
//!
//! API Policy
//! - The grid is owned by the caller and read through `grid::GridAccessor`.
//! - Loops and multiple sources are refused with a `SimError`, never truncated.

pub mod api;
pub mod cfg;
pub mod element;
pub mod error;
pub mod evolve;
pub mod graph;
pub mod grid;
pub mod rand;
pub mod sim;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::SimCfg;
pub use error::{GridError, SimError};
pub use sim::{simulate, simulate_with_defaults, Simulation};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::element::{Element, ElementId, ElementKind, Orientation, Position};
    pub use crate::evolve::{Amplitude, Operation, State};
    pub use crate::graph::{Graph, NodeId};
    pub use crate::grid::{Grid, GridAccessor};
    pub use crate::{simulate, simulate_with_defaults, GridError, SimCfg, SimError, Simulation};
}
