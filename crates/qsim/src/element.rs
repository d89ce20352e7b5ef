//! Optical elements placed on the grid and their direction logic.
//!
//! Purpose
//! - Describe what sits in a grid cell (`Element`) and how it redirects a ray
//!   (`next_directions`).
//! - Keep direction logic a single pure `match` over `ElementKind` so every
//!   kind's behavior is visible in one place.
//!
//! Conventions
//! - `Orientation` indexes the four axis-aligned directions cyclically:
//!   0 = +col (east), 1 = +row (south), 2 = −col (west), 3 = −row (north).
//! - The same type serves as an element's installed rotation and as a ray's
//!   travel direction.

use std::fmt;

/// Grid cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance; used as edge weight.
    #[inline]
    pub fn manhattan(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// One unit step in `dir`, or `None` when the step leaves `[0, rows) × [0, cols)`.
    pub fn step(&self, dir: Orientation, rows: usize, cols: usize) -> Option<Position> {
        let (dr, dc) = dir.step();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        if row < rows && col < cols {
            Some(Position::new(row, col))
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// One of four axis-aligned directions (invariant: index < 4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Orientation(u8);

impl Orientation {
    pub const EAST: Self = Self(0);
    pub const SOUTH: Self = Self(1);
    pub const WEST: Self = Self(2);
    pub const NORTH: Self = Self(3);

    pub const ALL: [Self; 4] = [Self::EAST, Self::SOUTH, Self::WEST, Self::NORTH];

    /// `None` for indices outside `0..4`.
    #[inline]
    pub fn new(index: u8) -> Option<Self> {
        (index < 4).then_some(Self(index))
    }

    /// Reduce any integer modulo 4.
    #[inline]
    pub fn wrapping(index: i64) -> Self {
        Self(index.rem_euclid(4) as u8)
    }

    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }

    /// Next installed rotation (quarter turn).
    #[inline]
    pub fn rotated(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    /// Unit step `(drow, dcol)`.
    #[inline]
    pub fn step(self) -> (isize, isize) {
        match self.0 {
            0 => (0, 1),
            1 => (1, 0),
            2 => (0, -1),
            _ => (-1, 0),
        }
    }

    /// Direction after reflecting off a diagonal surface installed at `installed`.
    ///
    /// `(self + (-1)^parity) mod 4` with `parity = (installed & 1) ^ (self & 1)`:
    /// the turn is clockwise when the parities agree and counterclockwise otherwise.
    #[inline]
    pub fn reflect_off(self, installed: Orientation) -> Orientation {
        let parity = (installed.0 & 1) ^ (self.0 & 1);
        let turn = if parity == 0 { 1 } else { -1 };
        Self::wrapping(i64::from(self.0) + turn)
    }

    /// True for east/west travel.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        self.0 & 1 == 0
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::EAST
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Element kinds. `Wall` is the synthetic sentinel for "ray left the grid".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Source,
    Detector,
    Mirror,
    BeamSplitter,
    PolarizingBeamSplitter,
    Wall,
}

impl ElementKind {
    /// Kinds a user can place on the grid (everything except `Wall`).
    pub const PLACEABLE: [ElementKind; 5] = [
        ElementKind::Source,
        ElementKind::Detector,
        ElementKind::Mirror,
        ElementKind::BeamSplitter,
        ElementKind::PolarizingBeamSplitter,
    ];

    /// Kinds that mix two path modes.
    #[inline]
    pub fn is_splitter(self) -> bool {
        matches!(
            self,
            ElementKind::BeamSplitter | ElementKind::PolarizingBeamSplitter
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Source => "Source",
            ElementKind::Detector => "Detector",
            ElementKind::Mirror => "Mirror",
            ElementKind::BeamSplitter => "BeamSplitter",
            ElementKind::PolarizingBeamSplitter => "PolarizingBeamSplitter",
            ElementKind::Wall => "Wall",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of an element: two elements of one kind never share a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    pub kind: ElementKind,
    pub pos: Position,
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.pos)
    }
}

/// A placed element. For `Wall` the orientation is never read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Element {
    pub kind: ElementKind,
    pub pos: Position,
    pub orientation: Orientation,
}

impl Element {
    #[inline]
    pub fn new(kind: ElementKind, pos: Position, orientation: Orientation) -> Self {
        Self {
            kind,
            pos,
            orientation,
        }
    }

    #[inline]
    pub fn wall(pos: Position) -> Self {
        Self::new(ElementKind::Wall, pos, Orientation::default())
    }

    #[inline]
    pub fn id(&self) -> ElementId {
        ElementId {
            kind: self.kind,
            pos: self.pos,
        }
    }

    /// Same element turned by a quarter.
    #[inline]
    pub fn rotated(&self) -> Self {
        Self {
            orientation: self.orientation.rotated(),
            ..*self
        }
    }

    /// Outgoing directions for a ray arriving with `incoming`.
    #[inline]
    pub fn next_directions(&self, incoming: Orientation) -> Vec<Orientation> {
        next_directions(self.kind, self.orientation, incoming)
    }
}

/// Outgoing travel directions produced by an element of `kind` installed at
/// `installed` for a ray arriving with `incoming`.
///
/// Splitters list the transmitted direction first and the reflected one second.
pub fn next_directions(
    kind: ElementKind,
    installed: Orientation,
    incoming: Orientation,
) -> Vec<Orientation> {
    match kind {
        ElementKind::Source => {
            if incoming == installed {
                vec![incoming]
            } else {
                Vec::new()
            }
        }
        ElementKind::Mirror => vec![incoming.reflect_off(installed)],
        // No polarization degree of freedom: a PBS routes like a plain splitter.
        ElementKind::BeamSplitter | ElementKind::PolarizingBeamSplitter => {
            vec![incoming, incoming.reflect_off(installed)]
        }
        ElementKind::Detector | ElementKind::Wall => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn source_emits_only_along_installed_axis() {
        for installed in Orientation::ALL {
            for incoming in Orientation::ALL {
                let out = next_directions(ElementKind::Source, installed, incoming);
                if incoming == installed {
                    assert_eq!(out, vec![installed]);
                } else {
                    assert!(out.is_empty());
                }
            }
        }
    }

    #[test]
    fn terminal_kinds_absorb() {
        for d in Orientation::ALL {
            assert!(next_directions(ElementKind::Detector, Orientation::EAST, d).is_empty());
            assert!(next_directions(ElementKind::Wall, Orientation::NORTH, d).is_empty());
        }
    }

    #[test]
    fn mirror_reflection_table() {
        // Installed 0: east -> south, south -> east, west -> north, north -> west.
        let m0 = Orientation::EAST;
        assert_eq!(Orientation::EAST.reflect_off(m0), Orientation::SOUTH);
        assert_eq!(Orientation::SOUTH.reflect_off(m0), Orientation::EAST);
        assert_eq!(Orientation::WEST.reflect_off(m0), Orientation::NORTH);
        assert_eq!(Orientation::NORTH.reflect_off(m0), Orientation::WEST);
        // Installed 1 is the other diagonal: east -> north, north -> east.
        let m1 = Orientation::SOUTH;
        assert_eq!(Orientation::EAST.reflect_off(m1), Orientation::NORTH);
        assert_eq!(Orientation::NORTH.reflect_off(m1), Orientation::EAST);
        assert_eq!(Orientation::SOUTH.reflect_off(m1), Orientation::WEST);
        // Installed 2 behaves like 0 (same diagonal).
        assert_eq!(
            Orientation::EAST.reflect_off(Orientation::WEST),
            Orientation::SOUTH
        );
    }

    #[test]
    fn splitters_transmit_then_reflect() {
        for kind in [ElementKind::BeamSplitter, ElementKind::PolarizingBeamSplitter] {
            let out = next_directions(kind, Orientation::EAST, Orientation::EAST);
            assert_eq!(out, vec![Orientation::EAST, Orientation::SOUTH]);
        }
    }

    #[test]
    fn position_step_respects_bounds() {
        let p = Position::new(0, 0);
        assert_eq!(p.step(Orientation::NORTH, 3, 3), None);
        assert_eq!(p.step(Orientation::WEST, 3, 3), None);
        assert_eq!(p.step(Orientation::EAST, 3, 3), Some(Position::new(0, 1)));
        let q = Position::new(2, 2);
        assert_eq!(q.step(Orientation::SOUTH, 3, 3), None);
        assert_eq!(q.step(Orientation::EAST, 3, 3), None);
    }

    #[test]
    fn ids_display_kind_and_cell() {
        let e = Element::new(
            ElementKind::BeamSplitter,
            Position::new(0, 3),
            Orientation::EAST,
        );
        assert_eq!(e.id().to_string(), "BeamSplitter(0,3)");
        assert_eq!(e.rotated().orientation, Orientation::SOUTH);
        assert_eq!(Orientation::NORTH.rotated(), Orientation::EAST);
    }

    proptest! {
        #[test]
        fn reflection_is_axis_switching_involution(i in 0u8..4, m in 0u8..4) {
            let d = Orientation::new(i).unwrap();
            let inst = Orientation::new(m).unwrap();
            let r = d.reflect_off(inst);
            prop_assert_ne!(r.is_horizontal(), d.is_horizontal());
            prop_assert_eq!(r.reflect_off(inst), d);
        }

        #[test]
        fn wrapping_agrees_with_rem_euclid(k in -100i64..100) {
            prop_assert_eq!(i64::from(Orientation::wrapping(k).index()), k.rem_euclid(4));
        }
    }
}
