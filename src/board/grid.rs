//! The board: squares, win conditions and symmetry axes

use std::fmt;

use rand::{Rng, seq::SliceRandom};

use super::{
    lines::WinCondition,
    square::{Coord, Square, SquareState},
    symmetry::{GroupRef, SymmetryAxis, SymmetryGroup, SymmetryKind},
};

/// Largest supported side length; a symmetry axis keeps its groups in a `u64`
pub const MAX_SIDE: usize = 8;

/// A square board of `side * side` cells needing `win_length` in a line.
///
/// Squares are stored row-major. Win conditions and symmetry axes are built
/// once from the layout and referenced from squares by index, so every state
/// change goes through [`Board::set_state`], which keeps the derived counts
/// and symmetry flags in step.
#[derive(Debug)]
pub struct Board {
    side: usize,
    win_length: usize,
    squares: Vec<Square>,
    win_conditions: Vec<WinCondition>,
    symmetry_axes: Vec<SymmetryAxis>,
    available_moves: usize,
}

impl Board {
    /// Create an empty board with a fresh random priority permutation
    pub fn new(side: usize, win_length: usize) -> crate::Result<Self> {
        Self::with_rng(side, win_length, &mut rand::rng())
    }

    /// Create an empty board drawing priorities from `rng`
    pub fn with_rng<R: Rng + ?Sized>(
        side: usize,
        win_length: usize,
        rng: &mut R,
    ) -> crate::Result<Self> {
        Self::validate_geometry(side, win_length)?;
        let priorities = Self::random_priorities(side, rng);
        let squares = priorities
            .into_iter()
            .map(|priority| Square::new(SquareState::Empty, priority))
            .collect();
        Ok(Self::from_squares(side, win_length, squares))
    }

    /// Create a board from a textual layout with fresh random priorities.
    ///
    /// Rows are separated by `/` or newlines; `.`, `_` or a space marks an
    /// empty square. The side length is the number of rows.
    pub fn parse(layout: &str, win_length: usize) -> crate::Result<Self> {
        Self::parse_with_rng(layout, win_length, &mut rand::rng())
    }

    /// Create a board from a textual layout drawing priorities from `rng`
    pub fn parse_with_rng<R: Rng + ?Sized>(
        layout: &str,
        win_length: usize,
        rng: &mut R,
    ) -> crate::Result<Self> {
        let rows = Self::layout_rows(layout);
        let side = rows.len();
        Self::validate_geometry(side, win_length)?;

        let mut states = Vec::with_capacity(side * side);
        for (r, row) in rows.iter().enumerate() {
            let chars: Vec<char> = row.chars().collect();
            if chars.len() != side {
                return Err(crate::Error::InvalidRowLength {
                    row: r,
                    expected: side,
                    got: chars.len(),
                    context: layout.to_string(),
                });
            }
            for (c, &ch) in chars.iter().enumerate() {
                let state =
                    SquareState::from_char(ch).ok_or_else(|| crate::Error::InvalidCellCharacter {
                        character: ch,
                        row: r,
                        col: c,
                        context: layout.to_string(),
                    })?;
                states.push(state);
            }
        }

        let priorities = Self::random_priorities(side, rng);
        let squares = states
            .into_iter()
            .zip(priorities)
            .map(|(state, priority)| Square::new(state, priority))
            .collect();
        Ok(Self::from_squares(side, win_length, squares))
    }

    /// Rows of a layout. Spaces are cells, so only line endings are stripped.
    pub(crate) fn layout_rows(layout: &str) -> Vec<&str> {
        layout
            .split(['/', '\n'])
            .map(|row| row.trim_end_matches('\r'))
            .filter(|row| !row.is_empty())
            .collect()
    }

    fn validate_geometry(side: usize, win_length: usize) -> crate::Result<()> {
        if side == 0 || side > MAX_SIDE || win_length == 0 || win_length > side {
            return Err(crate::Error::InvalidGeometry {
                side,
                win_length,
                max_side: MAX_SIDE,
            });
        }
        Ok(())
    }

    /// A uniformly random permutation of `0..side²`
    fn random_priorities<R: Rng + ?Sized>(side: usize, rng: &mut R) -> Vec<u32> {
        let mut priorities: Vec<u32> = (0..(side * side) as u32).collect();
        priorities.shuffle(rng);
        priorities
    }

    /// Build every derived structure over freshly owned squares
    fn from_squares(side: usize, win_length: usize, squares: Vec<Square>) -> Self {
        let available_moves = squares
            .iter()
            .filter(|sq| sq.state == SquareState::Empty)
            .count();
        let mut board = Board {
            side,
            win_length,
            squares,
            win_conditions: Vec::new(),
            symmetry_axes: Vec::new(),
            available_moves,
        };
        board.set_win_conditions();
        board.set_symmetries();
        board
    }

    /// Rows and columns interleaved per index, then both diagonals
    fn set_win_conditions(&mut self) {
        let side = self.side;
        let mut lines: Vec<Vec<usize>> = Vec::with_capacity(2 * side + 2);

        for i in 0..side {
            lines.push((0..side).map(|j| i * side + j).collect());
            lines.push((0..side).map(|j| j * side + i).collect());
        }
        lines.push((0..side).map(|i| i * side + i).collect());
        lines.push((0..side).map(|i| i * side + (side - 1 - i)).collect());

        for members in lines {
            let index = self.win_conditions.len();
            let mut condition = WinCondition::new(self.win_length);
            for sq in members {
                condition.add_square(sq, self.squares[sq].state);
                self.squares[sq].win_conditions.push(index);
            }
            self.win_conditions.push(condition);
        }
    }

    fn set_symmetries(&mut self) {
        for kind in SymmetryKind::ALL {
            let axis_index = self.symmetry_axes.len();
            let mut axis = SymmetryAxis::new(kind);

            for orbit in kind.orbits(self.side) {
                let priority = orbit
                    .iter()
                    .map(|&sq| self.squares[sq].priority)
                    .max()
                    .unwrap_or_default();
                let members = orbit.clone();
                let group = axis.add_group(SymmetryGroup::new(members, priority));
                for sq in orbit {
                    self.squares[sq].groups.push(GroupRef {
                        axis: axis_index,
                        group,
                    });
                }
                let squares = &self.squares;
                axis.refresh(group, |sq| squares[sq].state);
            }

            self.symmetry_axes.push(axis);
        }
    }

    fn index(&self, coord: Coord) -> crate::Result<usize> {
        if coord.row >= self.side || coord.col >= self.side {
            return Err(crate::Error::OutOfBounds {
                coord,
                side: self.side,
            });
        }
        Ok(coord.row * self.side + coord.col)
    }

    fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index / self.side, index % self.side)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Number of empty squares
    pub fn available_moves(&self) -> usize {
        self.available_moves
    }

    /// Number of occupied squares
    pub fn occupied_count(&self) -> usize {
        self.squares.len() - self.available_moves
    }

    pub fn square(&self, coord: Coord) -> crate::Result<&Square> {
        Ok(&self.squares[self.index(coord)?])
    }

    pub fn state(&self, coord: Coord) -> crate::Result<SquareState> {
        Ok(self.square(coord)?.state)
    }

    pub fn priority(&self, coord: Coord) -> crate::Result<u32> {
        Ok(self.square(coord)?.priority)
    }

    /// Row-major `(coord, square)` pairs
    pub fn squares(&self) -> impl Iterator<Item = (Coord, &Square)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .map(|(i, sq)| (self.coord_of(i), sq))
    }

    pub fn win_conditions(&self) -> &[WinCondition] {
        &self.win_conditions
    }

    pub fn symmetry_axes(&self) -> &[SymmetryAxis] {
        &self.symmetry_axes
    }

    pub fn symmetry_axis(&self, kind: SymmetryKind) -> &SymmetryAxis {
        let position = SymmetryKind::ALL
            .iter()
            .position(|&k| k == kind)
            .unwrap_or_default();
        &self.symmetry_axes[position]
    }

    /// Empty squares in row-major order
    pub fn legal_moves(&self) -> Vec<Coord> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, sq)| sq.state == SquareState::Empty)
            .map(|(i, _)| self.coord_of(i))
            .collect()
    }

    /// The single mutation path.
    ///
    /// Overwriting an occupied square is accepted; legality is the caller's
    /// concern. Returns the previous state.
    pub fn set_state(&mut self, coord: Coord, state: SquareState) -> crate::Result<SquareState> {
        let index = self.index(coord)?;
        let old = self.squares[index].state;
        if old == state {
            return Ok(old);
        }

        if old == SquareState::Empty {
            self.available_moves -= 1;
        }
        if state == SquareState::Empty {
            self.available_moves += 1;
        }

        self.squares[index].state = state;
        for &condition in &self.squares[index].win_conditions {
            self.win_conditions[condition].transfer(old, state);
        }

        let squares = &self.squares;
        for &GroupRef { axis, group } in &squares[index].groups {
            self.symmetry_axes[axis].refresh(group, |sq| squares[sq].state);
        }

        Ok(old)
    }

    /// First state whose count reached the win length, scanning rows and
    /// columns before diagonals. Empty means nobody has won.
    pub fn check_win(&self) -> SquareState {
        self.win_conditions
            .iter()
            .map(WinCondition::check_for_win)
            .find(|&state| state != SquareState::Empty)
            .unwrap_or(SquareState::Empty)
    }

    /// Whether the search may skip this square.
    ///
    /// True iff some group containing the square belongs to an axis that
    /// currently holds and has a member of strictly higher priority.
    pub fn is_culled(&self, coord: Coord) -> crate::Result<bool> {
        let square = self.square(coord)?;
        Ok(square.groups.iter().any(|&GroupRef { axis, group }| {
            let axis = &self.symmetry_axes[axis];
            axis.is_symmetric() && axis.group(group).symmetry_priority() > square.priority
        }))
    }

    /// Images of `coord` under every axis that currently holds
    pub fn symmetric_images(&self, coord: Coord) -> crate::Result<Vec<Coord>> {
        self.index(coord)?;
        Ok(self
            .symmetry_axes
            .iter()
            .filter(|axis| axis.is_symmetric())
            .map(|axis| axis.kind().map(coord, self.side))
            .filter(|&image| image != coord)
            .collect())
    }
}

impl Clone for Board {
    /// Copies states and priorities only; derived structures are rebuilt
    fn clone(&self) -> Self {
        let squares = self
            .squares
            .iter()
            .map(|sq| Square::new(sq.state, sq.priority))
            .collect();
        Self::from_squares(self.side, self.win_length, squares)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, square) in self.squares.iter().enumerate() {
            write!(f, "{}", square.state.to_char())?;
            if (i + 1).is_multiple_of(self.side) && i + 1 < self.squares.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
