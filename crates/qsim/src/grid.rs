//! Grid access: the boundary between the kernel and whoever owns element placement.
//!
//! The kernel only reads the grid through `GridAccessor`. `Grid` is a small
//! row-major in-memory implementation used by the CLI, tests and benches.

use crate::element::{Element, ElementKind, Orientation, Position};
use crate::error::GridError;

/// Read-only view of a grid snapshot.
pub trait GridAccessor {
    /// Element occupying `pos`, or `None` (also for positions outside the grid).
    fn item_at(&self, pos: Position) -> Option<Element>;
    /// All placed sources.
    fn sources(&self) -> Vec<Element>;
    /// `(rows, cols)`.
    fn size(&self) -> (usize, usize);
}

/// Dense row-major grid with at most one element per cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Element>>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn index(&self, pos: Position) -> Result<usize, GridError> {
        if self.contains(pos) {
            Ok(pos.row * self.cols + pos.col)
        } else {
            Err(GridError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Place a new element on an empty cell.
    pub fn place(
        &mut self,
        kind: ElementKind,
        pos: Position,
        orientation: Orientation,
    ) -> Result<Element, GridError> {
        if kind == ElementKind::Wall {
            return Err(GridError::WallNotPlaceable);
        }
        let idx = self.index(pos)?;
        if let Some(existing) = &self.cells[idx] {
            return Err(GridError::Occupied {
                pos,
                existing: existing.kind,
            });
        }
        let element = Element::new(kind, pos, orientation);
        self.cells[idx] = Some(element);
        Ok(element)
    }

    /// Remove and return the element at `pos`, if any.
    pub fn remove(&mut self, pos: Position) -> Option<Element> {
        let idx = self.index(pos).ok()?;
        self.cells[idx].take()
    }

    /// Turn the element at `pos` by a quarter; returns its new orientation.
    pub fn rotate(&mut self, pos: Position) -> Option<Orientation> {
        let idx = self.index(pos).ok()?;
        let cell = self.cells[idx].as_mut()?;
        *cell = cell.rotated();
        Some(cell.orientation)
    }

    /// Elements in row-major order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.cells.iter().flatten()
    }

    pub fn items_of_kind(&self, kind: ElementKind) -> Vec<Element> {
        self.elements().filter(|e| e.kind == kind).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.elements().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GridAccessor for Grid {
    fn item_at(&self, pos: Position) -> Option<Element> {
        let idx = self.index(pos).ok()?;
        self.cells[idx]
    }

    fn sources(&self) -> Vec<Element> {
        self.items_of_kind(ElementKind::Source)
    }

    fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_rejects_occupied_out_of_bounds_and_walls() {
        let mut g = Grid::new(2, 3);
        g.place(ElementKind::Mirror, Position::new(1, 2), Orientation::EAST)
            .unwrap();
        assert_eq!(
            g.place(ElementKind::Detector, Position::new(1, 2), Orientation::EAST),
            Err(GridError::Occupied {
                pos: Position::new(1, 2),
                existing: ElementKind::Mirror
            })
        );
        assert!(matches!(
            g.place(ElementKind::Detector, Position::new(2, 0), Orientation::EAST),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(
            g.place(ElementKind::Wall, Position::new(0, 0), Orientation::EAST),
            Err(GridError::WallNotPlaceable)
        );
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn accessor_reads_cells_and_sources_row_major() {
        let mut g = Grid::new(3, 3);
        g.place(ElementKind::Source, Position::new(2, 0), Orientation::NORTH)
            .unwrap();
        g.place(ElementKind::Source, Position::new(0, 1), Orientation::EAST)
            .unwrap();
        let srcs = g.sources();
        assert_eq!(srcs.len(), 2);
        assert_eq!(srcs[0].pos, Position::new(0, 1));
        assert_eq!(srcs[1].pos, Position::new(2, 0));
        assert!(g.item_at(Position::new(5, 5)).is_none());
        assert!(g.item_at(Position::new(1, 1)).is_none());
        assert_eq!(g.size(), (3, 3));
    }

    #[test]
    fn rotate_and_remove() {
        let mut g = Grid::new(1, 1);
        let p = Position::new(0, 0);
        g.place(ElementKind::BeamSplitter, p, Orientation::NORTH)
            .unwrap();
        assert_eq!(g.rotate(p), Some(Orientation::EAST));
        assert_eq!(g.item_at(p).map(|e| e.orientation), Some(Orientation::EAST));
        assert!(g.remove(p).is_some());
        assert!(g.is_empty());
        assert_eq!(g.rotate(p), None);
    }
}
