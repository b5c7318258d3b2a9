//! Square states, players, coordinates and the square record itself

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::symmetry::GroupRef;

/// Occupancy of a single square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareState {
    Empty,
    X,
    O,
}

impl SquareState {
    /// Every state, in the order win-condition counts are indexed
    pub const ALL: [SquareState; 3] = [SquareState::Empty, SquareState::X, SquareState::O];

    pub fn to_char(self) -> char {
        match self {
            SquareState::Empty => '.',
            SquareState::X => 'X',
            SquareState::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<SquareState> {
        match c {
            '.' | '_' | ' ' => Some(SquareState::Empty),
            'X' | 'x' => Some(SquareState::X),
            'O' | 'o' | '0' => Some(SquareState::O),
            _ => None,
        }
    }

    /// Index into per-state count tables
    pub fn index(self) -> usize {
        match self {
            SquareState::Empty => 0,
            SquareState::X => 1,
            SquareState::O => 2,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            SquareState::X => Some(Player::X),
            SquareState::O => Some(Player::O),
            SquareState::Empty => None,
        }
    }
}

impl fmt::Display for SquareState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to the square state it places
    pub fn to_state(self) -> SquareState {
        match self {
            Player::X => SquareState::X,
            Player::O => SquareState::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

impl FromStr for Player {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(crate::Error::InvalidPlayer {
                input: other.to_string(),
            }),
        }
    }
}

/// Row/column position on the board, zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Coord {
    type Err = crate::Error;

    /// Parses `"row col"`, `"row,col"` or `"(row, col)"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::InvalidCoordinate {
            input: s.to_string(),
        };
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace() || c == '(' || c == ')')
            .filter(|p| !p.is_empty())
            .collect();
        let [row, col] = parts.as_slice() else {
            return Err(invalid());
        };
        let row = row.parse().map_err(|_| invalid())?;
        let col = col.parse().map_err(|_| invalid())?;
        Ok(Coord { row, col })
    }
}

/// One cell of the board.
///
/// Memberships are indices into the owning board's win conditions and
/// symmetry axes. They are fixed once the board is built.
#[derive(Debug)]
pub struct Square {
    pub(crate) state: SquareState,
    pub(crate) priority: u32,
    pub(crate) win_conditions: Vec<usize>,
    pub(crate) groups: Vec<GroupRef>,
}

impl Square {
    pub(crate) fn new(state: SquareState, priority: u32) -> Self {
        Square {
            state,
            priority,
            win_conditions: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn state(&self) -> SquareState {
        self.state
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Indices of the win conditions this square belongs to
    pub fn win_conditions(&self) -> &[usize] {
        &self.win_conditions
    }

    /// Symmetry groups this square belongs to
    pub fn groups(&self) -> &[GroupRef] {
        &self.groups
    }
}
