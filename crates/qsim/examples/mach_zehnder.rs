//! Mach-Zehnder interferometer on a 6x8 grid.
//!
//! Prints the labeled graph and the final state, once with the default
//! layering and once with per-layer deduplication, to show how the merged
//! splitter is counted.

use qsim::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut grid = Grid::new(6, 8);
    let e = Orientation::EAST;
    grid.place(ElementKind::Source, Position::new(1, 0), e)?;
    grid.place(ElementKind::BeamSplitter, Position::new(1, 2), e)?;
    grid.place(ElementKind::Mirror, Position::new(1, 5), e)?;
    grid.place(ElementKind::Mirror, Position::new(4, 2), e)?;
    grid.place(ElementKind::BeamSplitter, Position::new(4, 5), e)?;
    grid.place(ElementKind::Detector, Position::new(4, 7), e)?;
    grid.place(ElementKind::Detector, Position::new(5, 5), e)?;

    let sim = simulate_with_defaults(&grid)?;
    print!("{}", sim.graph);
    println!("modes={} layers={}", sim.mode_count, sim.layers);
    println!("default: {}", sim.state);

    let dedup = SimCfg {
        dedup_layers: true,
        ..SimCfg::default()
    };
    println!("dedup:   {}", simulate(&grid, dedup)?.state);
    Ok(())
}
