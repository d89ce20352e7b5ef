//! State evolution: per-layer operations and the layered propagator.
//!
//! - `operation.rs`: `State` (amplitude vector) and `Operation` (unitary matrix).
//! - `propagate.rs`: `layer_operation` and the breadth-first `Propagator`.

mod operation;
mod propagate;

pub use operation::{Amplitude, Operation, State};
pub use propagate::{layer_operation, propagate, Phase, Propagator};
