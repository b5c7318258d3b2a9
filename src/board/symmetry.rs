//! Incremental board-symmetry detection
//!
//! Each [`SymmetryKind`] is one geometric map of the square onto itself.
//! The board partitions its squares into the orbits of that map; every orbit
//! with more than one square becomes a [`SymmetryGroup`] that is symmetric
//! while all of its squares share a state. A [`SymmetryAxis`] keeps one bit
//! per group (set = that group is broken), so asking whether the whole axis
//! holds is a single comparison against zero.

use serde::{Deserialize, Serialize};

use super::square::{Coord, SquareState};

/// Geometric symmetries registered on every board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymmetryKind {
    /// Mirror about the horizontal midline (rows swap)
    Horizontal,
    /// Mirror about the vertical midline (columns swap)
    Vertical,
    /// Mirror about the top-left to bottom-right diagonal
    MainDiagonal,
    /// Mirror about the top-right to bottom-left diagonal
    AntiDiagonal,
    /// Rotation by 90 degrees clockwise
    QuarterTurn,
    /// Rotation by 180 degrees
    HalfTurn,
}

impl SymmetryKind {
    pub const ALL: [SymmetryKind; 6] = [
        SymmetryKind::Horizontal,
        SymmetryKind::Vertical,
        SymmetryKind::MainDiagonal,
        SymmetryKind::AntiDiagonal,
        SymmetryKind::QuarterTurn,
        SymmetryKind::HalfTurn,
    ];

    /// Image of `coord` under this map on a board of the given side
    pub fn map(self, coord: Coord, side: usize) -> Coord {
        let last = side - 1;
        let Coord { row, col } = coord;
        match self {
            SymmetryKind::Horizontal => Coord::new(last - row, col),
            SymmetryKind::Vertical => Coord::new(row, last - col),
            SymmetryKind::MainDiagonal => Coord::new(col, row),
            SymmetryKind::AntiDiagonal => Coord::new(last - col, last - row),
            SymmetryKind::QuarterTurn => Coord::new(col, last - row),
            SymmetryKind::HalfTurn => Coord::new(last - row, last - col),
        }
    }

    /// Orbits of this map with at least two squares, as flat row-major indices.
    ///
    /// Orbits are emitted in row-major order of their first square, and each
    /// orbit lists the square followed by its successive images.
    pub fn orbits(self, side: usize) -> Vec<Vec<usize>> {
        let mut seen = vec![false; side * side];
        let mut orbits = Vec::new();

        for start in 0..side * side {
            if seen[start] {
                continue;
            }
            let mut orbit = vec![start];
            seen[start] = true;
            let mut current = self.map(Coord::new(start / side, start % side), side);
            loop {
                let idx = current.row * side + current.col;
                if idx == start {
                    break;
                }
                seen[idx] = true;
                orbit.push(idx);
                current = self.map(current, side);
            }
            if orbit.len() > 1 {
                orbits.push(orbit);
            }
        }

        orbits
    }
}

/// Location of a group: `(axis index, group index within the axis)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupRef {
    pub axis: usize,
    pub group: usize,
}

/// A small set of squares that must share one state for its axis to hold
#[derive(Debug, Clone)]
pub struct SymmetryGroup {
    squares: Vec<usize>,
    symmetric: bool,
    symmetry_priority: u32,
}

impl SymmetryGroup {
    pub(crate) fn new(squares: Vec<usize>, symmetry_priority: u32) -> Self {
        SymmetryGroup {
            squares,
            symmetric: false,
            symmetry_priority,
        }
    }

    pub fn squares(&self) -> &[usize] {
        &self.squares
    }

    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Highest priority among the members, fixed at construction
    pub fn symmetry_priority(&self) -> u32 {
        self.symmetry_priority
    }
}

/// Aggregate judgement for one symmetry kind
#[derive(Debug, Clone)]
pub struct SymmetryAxis {
    kind: SymmetryKind,
    groups: Vec<SymmetryGroup>,
    broken: u64,
}

impl SymmetryAxis {
    pub(crate) fn new(kind: SymmetryKind) -> Self {
        SymmetryAxis {
            kind,
            groups: Vec::new(),
            broken: 0,
        }
    }

    pub(crate) fn add_group(&mut self, group: SymmetryGroup) -> usize {
        debug_assert!(self.groups.len() < u64::BITS as usize);
        self.groups.push(group);
        self.groups.len() - 1
    }

    /// Re-evaluate one group against the live square states
    pub(crate) fn refresh(&mut self, group: usize, states: impl Fn(usize) -> SquareState) {
        let entry = &mut self.groups[group];
        let first = states(entry.squares[0]);
        entry.symmetric = entry.squares[1..].iter().all(|&sq| states(sq) == first);

        if entry.symmetric {
            self.broken &= !(1u64 << group);
        } else {
            self.broken |= 1u64 << group;
        }
    }

    pub fn kind(&self) -> SymmetryKind {
        self.kind
    }

    pub fn groups(&self) -> &[SymmetryGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> &SymmetryGroup {
        &self.groups[index]
    }

    /// Bitmask with one set bit per currently broken group
    pub fn broken_mask(&self) -> u64 {
        self.broken
    }

    pub fn is_symmetric(&self) -> bool {
        self.broken == 0
    }
}
