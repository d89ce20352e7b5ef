//! JSON layout files: the grid contents the kernel is run on.
//!
//! ```json
//! {"rows": 4, "cols": 7, "elements": [
//!   {"kind": "source", "row": 0, "col": 0, "orientation": 0},
//!   {"kind": "beam_splitter", "row": 0, "col": 3}
//! ]}
//! ```

use anyhow::{anyhow, Context, Result};
use qsim::prelude::{ElementKind, Grid, Orientation, Position};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindName {
    Source,
    Detector,
    Mirror,
    BeamSplitter,
    PolarizingBeamSplitter,
}

impl From<KindName> for ElementKind {
    fn from(k: KindName) -> Self {
        match k {
            KindName::Source => ElementKind::Source,
            KindName::Detector => ElementKind::Detector,
            KindName::Mirror => ElementKind::Mirror,
            KindName::BeamSplitter => ElementKind::BeamSplitter,
            KindName::PolarizingBeamSplitter => ElementKind::PolarizingBeamSplitter,
        }
    }
}

impl TryFrom<ElementKind> for KindName {
    type Error = anyhow::Error;

    fn try_from(k: ElementKind) -> Result<Self> {
        Ok(match k {
            ElementKind::Source => KindName::Source,
            ElementKind::Detector => KindName::Detector,
            ElementKind::Mirror => KindName::Mirror,
            ElementKind::BeamSplitter => KindName::BeamSplitter,
            ElementKind::PolarizingBeamSplitter => KindName::PolarizingBeamSplitter,
            ElementKind::Wall => return Err(anyhow!("walls are not part of a layout")),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedElement {
    pub kind: KindName,
    pub row: usize,
    pub col: usize,
    #[serde(default)]
    pub orientation: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutFile {
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub elements: Vec<PlacedElement>,
}

impl LayoutFile {
    pub fn read(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading layout {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing layout {}", path.display()))
    }

    pub fn to_grid(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.rows, self.cols);
        for (i, e) in self.elements.iter().enumerate() {
            let orientation = Orientation::new(e.orientation)
                .ok_or_else(|| anyhow!("element {i}: orientation {} not in 0..4", e.orientation))?;
            grid.place(e.kind.into(), Position::new(e.row, e.col), orientation)
                .with_context(|| format!("element {i}"))?;
        }
        Ok(grid)
    }

    pub fn from_grid(grid: &Grid) -> Result<Self> {
        let elements = grid
            .elements()
            .map(|e| {
                Ok(PlacedElement {
                    kind: e.kind.try_into()?,
                    row: e.pos.row,
                    col: e.pos.col,
                    orientation: e.orientation.index(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            rows: grid.rows(),
            cols: grid.cols(),
            elements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim::prelude::GridAccessor;

    #[test]
    fn parses_and_builds_grid() {
        let text = r#"{"rows": 4, "cols": 7, "elements": [
            {"kind": "source", "row": 0, "col": 0},
            {"kind": "beam_splitter", "row": 0, "col": 3, "orientation": 0},
            {"kind": "detector", "row": 0, "col": 6},
            {"kind": "detector", "row": 3, "col": 3}
        ]}"#;
        let layout: LayoutFile = serde_json::from_str(text).unwrap();
        let grid = layout.to_grid().unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.sources().len(), 1);
        assert_eq!(LayoutFile::from_grid(&grid).unwrap(), layout);
    }

    #[test]
    fn every_placeable_kind_has_a_name() {
        for kind in ElementKind::PLACEABLE {
            let name = KindName::try_from(kind).unwrap();
            assert_eq!(ElementKind::from(name), kind);
        }
        assert!(KindName::try_from(ElementKind::Wall).is_err());
    }

    #[test]
    fn rejects_bad_orientation_and_overlap() {
        let bad = LayoutFile {
            rows: 2,
            cols: 2,
            elements: vec![PlacedElement {
                kind: KindName::Mirror,
                row: 0,
                col: 0,
                orientation: 4,
            }],
        };
        assert!(bad.to_grid().is_err());
        let overlap = LayoutFile {
            rows: 2,
            cols: 2,
            elements: vec![
                PlacedElement {
                    kind: KindName::Mirror,
                    row: 1,
                    col: 1,
                    orientation: 0,
                },
                PlacedElement {
                    kind: KindName::Detector,
                    row: 1,
                    col: 1,
                    orientation: 0,
                },
            ],
        };
        let err = overlap.to_grid().unwrap_err();
        assert!(format!("{err:#}").contains("occupied"));
    }
}
