//! Layered state propagation through the labeled graph.

use crate::cfg::SimCfg;
use crate::error::SimError;
use crate::graph::{Graph, NodeId};

use super::operation::{Operation, State};

/// Operation of one layer: identity with one splitter sub-unitary cascaded per
/// splitter occurrence in `group` (duplicates apply again).
pub fn layer_operation(
    graph: &Graph,
    group: &[NodeId],
    mode_count: usize,
) -> Result<Operation, SimError> {
    let mut op = Operation::identity(mode_count);
    for &node in group {
        let element = graph.node(node);
        if !element.kind.is_splitter() {
            continue;
        }
        // Transmitted output first, reflected second.
        let labels: Option<Vec<usize>> = graph.out_edges(node).map(|e| e.label).collect();
        let Some(&[out1, out2]) = labels.as_deref() else {
            return Err(SimError::UnlabeledBranch { node: element.id() });
        };
        op.cascade(&Operation::beam_splitter(mode_count, out1, out2)?);
    }
    Ok(op)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Layering,
    Terminated,
}

/// Breadth-first propagation: one unitary step per layer of nodes.
pub struct Propagator<'a> {
    graph: &'a Graph,
    cfg: SimCfg,
    mode_count: usize,
    state: State,
    group: Vec<NodeId>,
    layers: usize,
    phase: Phase,
}

impl<'a> Propagator<'a> {
    /// State starts in `e0`; the first layer is `sources`.
    pub fn new(graph: &'a Graph, sources: &[NodeId], mode_count: usize, cfg: SimCfg) -> Self {
        Self {
            graph,
            cfg,
            mode_count,
            state: State::from_path_modes(mode_count),
            group: sources.to_vec(),
            layers: 0,
            phase: Phase::Initialized,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Nodes of the layer processed by the next `step`.
    #[inline]
    pub fn group(&self) -> &[NodeId] {
        &self.group
    }

    /// Layers applied so far.
    #[inline]
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Apply the current layer and advance. Returns `false` once terminated.
    pub fn step(&mut self) -> Result<bool, SimError> {
        if self.group.is_empty() {
            self.phase = Phase::Terminated;
            return Ok(false);
        }
        // An acyclic graph has at most one layer per node.
        if self.layers >= self.graph.nodes.len() {
            let cycle = self
                .graph
                .find_cycle()
                .unwrap_or_default()
                .into_iter()
                .map(|n| self.graph.node(n).id())
                .collect();
            return Err(SimError::Topology { cycle });
        }
        self.phase = Phase::Layering;
        let op = layer_operation(self.graph, &self.group, self.mode_count)?;
        debug_assert!(
            op.is_unitary(self.cfg.unitary_eps),
            "layer {} operation is not unitary",
            self.layers
        );
        self.state = op.apply(&self.state);
        let mut next: Vec<NodeId> = self
            .group
            .iter()
            .flat_map(|&n| self.graph.successors(n))
            .collect();
        if self.cfg.dedup_layers {
            let mut seen = vec![false; self.graph.nodes.len()];
            next.retain(|n| !std::mem::replace(&mut seen[n.0], true));
        }
        tracing::trace!(
            layer = self.layers,
            width = self.group.len(),
            next = next.len(),
            "layer applied"
        );
        self.group = next;
        self.layers += 1;
        Ok(true)
    }

    /// Run to termination and return the final state.
    pub fn run(mut self) -> Result<State, SimError> {
        while self.step()? {}
        Ok(self.state)
    }
}

/// Propagate `e0` from `sources` through every layer of `graph`.
pub fn propagate(
    graph: &Graph,
    sources: &[NodeId],
    mode_count: usize,
    cfg: SimCfg,
) -> Result<State, SimError> {
    Propagator::new(graph, sources, mode_count, cfg).run()
}
