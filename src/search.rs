//! Full-depth minimax with alpha-beta and symmetry pruning

pub mod config;
pub mod score;
pub mod stats;
pub mod task;

pub use config::{DEFAULT_YIELD_SLICE_MILLIS, SearchConfig};
pub use score::{NodeResult, Outcome, SearchScore};
pub use stats::SearchStats;
pub use task::{Decision, SearchProgress, SearchTask};

use crate::board::{Board, Player};

/// Entry points for choosing a move
pub struct Search;

impl Search {
    /// Begin a search for `playing_as` on a private clone of `board`.
    ///
    /// Fails with [`Error::NoValidMoves`](crate::Error::NoValidMoves) on a
    /// full board and [`Error::GameOver`](crate::Error::GameOver) when someone
    /// has already won.
    pub fn start(
        board: &Board,
        playing_as: Player,
        config: SearchConfig,
    ) -> crate::Result<SearchTask> {
        SearchTask::new(board, playing_as, config)
    }

    /// Search to completion without yielding to the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridmark::{Board, Coord, Player, Search, SearchConfig};
    ///
    /// let board = Board::parse("XX./OO./...", 3)?;
    /// let decision = Search::decide(&board, Player::X, SearchConfig::default())?;
    /// assert_eq!(decision.chosen, Coord::new(0, 2));
    /// # Ok::<(), gridmark::Error>(())
    /// ```
    pub fn decide(
        board: &Board,
        playing_as: Player,
        config: SearchConfig,
    ) -> crate::Result<Decision> {
        Self::start(board, playing_as, config)?.run_to_completion()
    }
}
