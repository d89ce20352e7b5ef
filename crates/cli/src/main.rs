mod layout;
mod provenance;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qsim::api::{layout_from_seed, RandomLayoutCfg};
use qsim::{simulate, SimCfg, Simulation};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::layout::LayoutFile;
use crate::provenance::{write_sidecar, Sidecar};
use crate::render::{RunResult, StateTable};

#[derive(Parser)]
#[command(name = "qsim")]
#[command(about = "Path-mode simulation of 2D optical layouts")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Simulate a layout and write the final state as JSON
    Run {
        #[arg(long)]
        layout: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Collapse repeated elements within one propagation layer
        #[arg(long)]
        dedup_layers: bool,
    },
    /// Print the labeled state table for a layout
    Show {
        #[arg(long)]
        layout: PathBuf,
        /// Also print the labeled edge list
        #[arg(long)]
        graph: bool,
        #[arg(long)]
        dedup_layers: bool,
    },
    /// Write a random single-source layout
    Random {
        #[arg(long, default_value_t = 8)]
        rows: usize,
        #[arg(long, default_value_t = 8)]
        cols: usize,
        #[arg(long, default_value_t = 8)]
        elements: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            layout,
            out,
            dedup_layers,
        } => run(&layout, &out, dedup_layers),
        Action::Show {
            layout,
            graph,
            dedup_layers,
        } => show(&layout, graph, dedup_layers),
        Action::Random {
            rows,
            cols,
            elements,
            seed,
            out,
        } => {
            let cfg = RandomLayoutCfg {
                rows,
                cols,
                elements,
                ..RandomLayoutCfg::default()
            };
            random(&cfg, seed, &out)
        }
        Action::Report => report(),
    }
}

fn simulate_file(layout: &Path, dedup_layers: bool) -> Result<Simulation> {
    let grid = LayoutFile::read(layout)?.to_grid()?;
    let cfg = SimCfg {
        dedup_layers,
        ..SimCfg::default()
    };
    simulate(&grid, cfg).with_context(|| format!("simulating {}", layout.display()))
}

fn write_json<T: serde::Serialize>(out: &Path, value: &T) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}

fn run(layout: &Path, out: &Path, dedup_layers: bool) -> Result<()> {
    let sim = simulate_file(layout, dedup_layers)?;
    tracing::info!(
        layout = %layout.display(),
        modes = sim.mode_count,
        layers = sim.layers,
        "run"
    );
    write_json(out, &RunResult::from(&sim))?;
    let sidecar = Sidecar::new(
        "run",
        json!({
            "layout": layout.to_string_lossy(),
            "dedup_layers": dedup_layers,
            "mode_count": sim.mode_count,
        }),
    );
    write_sidecar(out, sidecar)?;
    Ok(())
}

fn show(layout: &Path, graph: bool, dedup_layers: bool) -> Result<()> {
    let sim = simulate_file(layout, dedup_layers)?;
    if graph {
        print!("{}", sim.graph);
        println!();
    }
    print!("{}", StateTable(&sim.state));
    Ok(())
}

fn random(cfg: &RandomLayoutCfg, seed: u64, out: &Path) -> Result<()> {
    let (grid, token) = layout_from_seed(cfg, seed)
        .with_context(|| format!("drawing {}x{} layout", cfg.rows, cfg.cols))?;
    tracing::info!(seed = token.seed, elements = grid.len(), "random");
    write_json(out, &LayoutFile::from_grid(&grid)?)?;
    let sidecar = Sidecar::new(
        "random",
        json!({
            "seed": token.seed,
            "rows": cfg.rows,
            "cols": cfg.cols,
            "elements": cfg.elements,
        }),
    );
    write_sidecar(out, sidecar)?;
    Ok(())
}

fn report() -> Result<()> {
    let block = Sidecar::new("report", json!({}));
    println!("{}", serde_json::to_string_pretty(&block)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    const SCENARIO: &str = r#"{"rows": 4, "cols": 7, "elements": [
        {"kind": "source", "row": 0, "col": 0},
        {"kind": "beam_splitter", "row": 0, "col": 3},
        {"kind": "detector", "row": 0, "col": 6},
        {"kind": "detector", "row": 3, "col": 3}
    ]}"#;

    #[test]
    fn run_writes_result_and_sidecar() {
        let dir = tempdir().unwrap();
        let layout = dir.path().join("scenario.json");
        fs::write(&layout, SCENARIO).unwrap();
        let out = dir.path().join("runs").join("state.json");
        run(&layout, &out, false).unwrap();

        let result: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(result["mode_count"], 2);
        let amps = result["amplitudes"].as_array().unwrap();
        assert!((amps[0][0].as_f64().unwrap() - 0.70711).abs() < 1e-5);
        assert!((amps[1][1].as_f64().unwrap() - 0.70711).abs() < 1e-5);
        assert!(dir.path().join("runs").join("state.provenance.json").exists());
    }

    #[test]
    fn run_reports_loop_with_context() {
        let dir = tempdir().unwrap();
        let layout = dir.path().join("loop.json");
        let text = r#"{"rows": 3, "cols": 3, "elements": [
            {"kind": "source", "row": 0, "col": 0},
            {"kind": "mirror", "row": 0, "col": 2},
            {"kind": "mirror", "row": 2, "col": 2, "orientation": 1},
            {"kind": "mirror", "row": 2, "col": 0}
        ]}"#;
        fs::write(&layout, text).unwrap();
        let err = run(&layout, &dir.path().join("out.json"), false).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("simulating"), "{msg}");
        assert!(msg.contains("loop through"), "{msg}");
    }

    #[test]
    fn random_writes_layout_and_sidecar() {
        let dir = tempdir().unwrap();
        let cfg = RandomLayoutCfg {
            rows: 6,
            cols: 6,
            elements: 5,
            ..RandomLayoutCfg::default()
        };
        let path = dir.path().join("random.json");
        random(&cfg, 7, &path).unwrap();
        let layout = LayoutFile::read(&path).unwrap();
        assert_eq!((layout.rows, layout.cols), (6, 6));
        assert_eq!(layout.elements.len(), 6);
        assert!(dir.path().join("random.provenance.json").exists());
    }
}
