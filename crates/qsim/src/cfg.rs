//! Simulation configuration.

/// Switches and tolerances for one simulation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimCfg {
    /// Collapse repeated nodes in a propagation layer to their first occurrence.
    /// Off by default: a node reached through several edges in the same layer
    /// is processed once per edge, so a splitter there is applied repeatedly.
    pub dedup_layers: bool,
    /// Max-abs tolerance for the `U^† U ≈ I` check on layer operations (debug builds).
    pub unitary_eps: f64,
}

impl Default for SimCfg {
    fn default() -> Self {
        Self {
            dedup_layers: false,
            unitary_eps: 1e-9,
        }
    }
}
