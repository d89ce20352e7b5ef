//! One simulation request: build → label → propagate.
//!
//! All errors surface synchronously; there is no partial result.

use crate::cfg::SimCfg;
use crate::error::SimError;
use crate::evolve::{Propagator, State};
use crate::graph::{build_graph, label_paths, unique_source, Graph, NodeId};
use crate::grid::GridAccessor;

/// Result of a simulation run.
#[derive(Clone, Debug)]
pub struct Simulation {
    /// Labeled connectivity graph.
    pub graph: Graph,
    pub source: NodeId,
    pub mode_count: usize,
    /// Number of propagation layers applied.
    pub layers: usize,
    pub state: State,
}

/// Simulate the grid snapshot behind `grid`.
///
/// Exactly one source is required; more than one fails fast with
/// `MultiSourceUnsupported` before any graph is built.
pub fn simulate<G: GridAccessor + ?Sized>(grid: &G, cfg: SimCfg) -> Result<Simulation, SimError> {
    let sources = grid.sources();
    match sources.len() {
        0 => return Err(SimError::NoSource),
        1 => {}
        count => return Err(SimError::MultiSourceUnsupported { count }),
    }
    let mut graph = build_graph(grid, &sources)?;
    let source = unique_source(&graph)?;
    let mode_count = label_paths(&mut graph, source);
    let mut propagator = Propagator::new(&graph, &[source], mode_count, cfg);
    while propagator.step()? {}
    let layers = propagator.layers();
    let state = propagator.state().clone();
    tracing::debug!(mode_count, layers, "simulation finished");
    Ok(Simulation {
        graph,
        source,
        mode_count,
        layers,
        state,
    })
}

/// `simulate` with `SimCfg::default()`.
pub fn simulate_with_defaults<G: GridAccessor + ?Sized>(grid: &G) -> Result<Simulation, SimError> {
    simulate(grid, SimCfg::default())
}
