//! Winning lines with incrementally maintained occupancy counts

use super::square::SquareState;

/// One winning line (row, column or diagonal).
///
/// `counts[state.index()]` always equals the number of member squares
/// currently in `state`; the board keeps it current on every mutation.
#[derive(Debug, Clone)]
pub struct WinCondition {
    squares: Vec<usize>,
    counts: [usize; 3],
    amount_for_win: usize,
}

impl WinCondition {
    pub(crate) fn new(amount_for_win: usize) -> Self {
        WinCondition {
            squares: Vec::new(),
            counts: [0; 3],
            amount_for_win,
        }
    }

    /// Register a member square in its current state
    pub(crate) fn add_square(&mut self, square: usize, state: SquareState) {
        self.squares.push(square);
        self.counts[state.index()] += 1;
    }

    /// Move one member from `old` to `new` in the count table
    pub(crate) fn transfer(&mut self, old: SquareState, new: SquareState) {
        self.counts[old.index()] -= 1;
        self.counts[new.index()] += 1;
    }

    /// Flat indices of the member squares, in line order
    pub fn squares(&self) -> &[usize] {
        &self.squares
    }

    pub fn count(&self, state: SquareState) -> usize {
        self.counts[state.index()]
    }

    pub fn amount_for_win(&self) -> usize {
        self.amount_for_win
    }

    /// Returns the player state whose count reached the threshold, or Empty
    pub fn check_for_win(&self) -> SquareState {
        [SquareState::X, SquareState::O]
            .into_iter()
            .find(|&state| self.count(state) >= self.amount_for_win)
            .unwrap_or(SquareState::Empty)
    }
}
