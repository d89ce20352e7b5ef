//! Errors surfaced by the grid and the simulation pipeline.

use thiserror::Error;

use crate::element::{ElementId, ElementKind, Position};

/// Errors from placing or editing elements on a `Grid`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        pos: Position,
        rows: usize,
        cols: usize,
    },
    #[error("cell {pos} is already occupied by a {existing}")]
    Occupied {
        pos: Position,
        existing: ElementKind,
    },
    /// Walls are synthesized by the scanner, never placed.
    #[error("walls cannot be placed on the grid")]
    WallNotPlaceable,
}

/// Errors that refuse a simulation request. None are retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The connectivity graph has a directed cycle (optical feedback loop).
    #[error("optical setup contains a loop through {}", format_cycle(.cycle))]
    Topology { cycle: Vec<ElementId> },
    #[error("{count} sources found; path labeling supports exactly one")]
    MultiSourceUnsupported { count: usize },
    #[error("no source on the grid")]
    NoSource,
    /// A splitter output reaches an element the labeling DFS had already visited.
    #[error("splitter {node} has an unlabeled output path (merging paths are not supported)")]
    UnlabeledBranch { node: ElementId },
    #[error("path mode {mode} out of range for dimension {dimension}")]
    ModeOutOfRange { mode: usize, dimension: usize },
}

fn format_cycle(cycle: &[ElementId]) -> String {
    cycle
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
