//! Text and JSON views of a finished simulation.

use qsim::prelude::{Amplitude, Simulation, State};
use serde::Serialize;
use std::fmt;

/// Rounded to 5 decimals; negative zero prints as zero.
fn round5(x: f64) -> f64 {
    let r = (x * 1e5).round() / 1e5;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

pub fn format_amplitude(a: Amplitude) -> String {
    format!("{:.5}{:+.5}i", round5(a.re), round5(a.im))
}

/// Two-column `Label | Value` table, one row per path mode.
pub struct StateTable<'a>(pub &'a State);

impl fmt::Display for StateTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<(String, String)> = self
            .0
            .labeled()
            .map(|(k, a)| (format!("|{k}>"), format_amplitude(a)))
            .collect();
        let width = rows
            .iter()
            .map(|(l, _)| l.len())
            .max()
            .unwrap_or(0)
            .max("Label".len());
        writeln!(f, "{:<width$} | Value", "Label")?;
        writeln!(f, "{}-+-{}", "-".repeat(width), "-".repeat(16))?;
        for (label, value) in rows {
            writeln!(f, "{label:<width$} | {value}")?;
        }
        Ok(())
    }
}

/// Body of the `run` artifact.
#[derive(Debug, Serialize)]
pub struct RunResult {
    pub mode_count: usize,
    pub layers: usize,
    pub amplitudes: Vec<[f64; 2]>,
    pub probabilities: Vec<f64>,
}

impl From<&Simulation> for RunResult {
    fn from(sim: &Simulation) -> Self {
        Self {
            mode_count: sim.mode_count,
            layers: sim.layers,
            amplitudes: sim.state.labeled().map(|(_, a)| [a.re, a.im]).collect(),
            probabilities: sim.state.probabilities(),
        }
    }
}
