//! One game from first move to result.
//!
//! A `GameSession` owns the authoritative board and decides whose turn it is.
//! Searches run on their own clone; their decisions are applied here only
//! after they complete, and only if the board has not moved on since.

use std::fmt;

use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    Error, Result,
    board::{Board, Coord, Player, SquareState},
    config::GameConfig,
    search::{Decision, Search, SearchTask},
};

/// Who controls a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Seat {
    Human,
    Computer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Tie,
    /// The player marked an occupied square
    Cheated(Player),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Won(player) => write!(f, "{player} wins"),
            GameStatus::Tie => write!(f, "tie"),
            GameStatus::Cheated(player) => write!(f, "{player} cheated"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveValidity {
    Legal,
    SquareAlreadyOccupied,
}

/// A move as it was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub player: Player,
    pub coord: Coord,
    pub validity: MoveValidity,
}

/// What applying a move did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub player: Player,
    pub coord: Coord,
    pub validity: MoveValidity,
    pub status: GameStatus,
}

#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    to_move: Player,
    status: GameStatus,
    history: Vec<MoveRecord>,
}

impl GameSession {
    /// Start a game on an empty board.
    ///
    /// Square priorities come from the search seed when one is set.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let board = match config.search.seed {
            Some(seed) => Board::with_rng(
                config.side,
                config.win_length,
                &mut StdRng::seed_from_u64(seed),
            )?,
            None => Board::new(config.side, config.win_length)?,
        };
        Ok(Self::from_board(config, board))
    }

    /// Continue a game from an existing position with `to_move` next
    pub fn with_board(config: GameConfig, board: Board, to_move: Player) -> Result<Self> {
        config.validate()?;
        if (board.side(), board.win_length()) != (config.side, config.win_length) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "board is {}x{} with win length {}, config expects {}x{} with win length {}",
                    board.side(),
                    board.side(),
                    board.win_length(),
                    config.side,
                    config.side,
                    config.win_length
                ),
            });
        }
        let mut session = Self::from_board(config, board);
        session.to_move = to_move;
        session.status = session.evaluate_status(None);
        Ok(session)
    }

    fn from_board(config: GameConfig, board: Board) -> Self {
        info!(
            side = board.side(),
            win_length = board.win_length(),
            first = %config.first_player,
            computer = ?config.computer,
            "game started"
        );
        GameSession {
            to_move: config.first_player,
            config,
            board,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn seat(&self, player: Player) -> Seat {
        if self.config.is_computer(player) {
            Seat::Computer
        } else {
            Seat::Human
        }
    }

    /// Apply a human move. An occupied square is accepted and ends the game.
    pub fn play_human(&mut self, coord: Coord) -> Result<MoveReport> {
        self.ensure_turn(Seat::Human)?;
        self.apply_move(coord)
    }

    /// Begin the search for the computer's move
    pub fn start_computer_turn(&self) -> Result<SearchTask> {
        self.ensure_turn(Seat::Computer)?;
        Search::start(&self.board, self.to_move, self.config.search.clone())
    }

    /// Apply a finished search, rejecting it if the board has moved on
    pub fn apply_decision(&mut self, decision: &Decision) -> Result<MoveReport> {
        self.ensure_turn(Seat::Computer)?;
        if decision.playing_as != self.to_move {
            return Err(Error::WrongTurn {
                expected: self.to_move,
                got: decision.playing_as,
            });
        }
        let current = self.board.occupied_count();
        if decision.board_ply != current {
            return Err(Error::StaleDecision {
                decided_at: decision.board_ply,
                current,
            });
        }
        self.apply_move(decision.chosen)
    }

    /// Search and move in one blocking call
    pub fn play_computer(&mut self) -> Result<(Decision, MoveReport)> {
        let decision = self.start_computer_turn()?.run_to_completion()?;
        let report = self.apply_decision(&decision)?;
        Ok((decision, report))
    }

    fn ensure_turn(&self, seat: Seat) -> Result<()> {
        if self.status.is_over() {
            return Err(Error::GameOver);
        }
        if self.seat(self.to_move) != seat {
            return Err(Error::WrongSeat {
                player: self.to_move,
                controller: match seat {
                    Seat::Human => "human",
                    Seat::Computer => "computer",
                },
            });
        }
        Ok(())
    }

    fn apply_move(&mut self, coord: Coord) -> Result<MoveReport> {
        let player = self.to_move;
        let previous = self.board.set_state(coord, player.to_state())?;
        let validity = if previous == SquareState::Empty {
            MoveValidity::Legal
        } else {
            warn!(%player, %coord, occupied_by = %previous, "move on an occupied square");
            MoveValidity::SquareAlreadyOccupied
        };

        self.history.push(MoveRecord {
            player,
            coord,
            validity,
        });
        self.status = self.evaluate_status(Some((player, validity)));

        if self.status.is_over() {
            info!(status = %self.status, moves = self.history.len(), "game over");
        } else {
            self.to_move = player.opponent();
        }

        Ok(MoveReport {
            player,
            coord,
            validity,
            status: self.status,
        })
    }

    fn evaluate_status(&self, last: Option<(Player, MoveValidity)>) -> GameStatus {
        if let Some((player, MoveValidity::SquareAlreadyOccupied)) = last {
            return GameStatus::Cheated(player);
        }
        if let Some(winner) = self.board.check_win().to_player() {
            return GameStatus::Won(winner);
        }
        if self.board.available_moves() == 0 {
            return GameStatus::Tie;
        }
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchConfig;

    fn seeded(computer: Vec<Player>) -> GameConfig {
        GameConfig::default().with_computer(computer).with_search(
            SearchConfig::default()
                .with_non_blocking(false)
                .with_seed(9),
        )
    }

    #[test]
    fn test_human_win() {
        let mut session = GameSession::new(seeded(vec![])).unwrap();
        let moves = [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)];
        let mut last = None;
        for (r, c) in moves {
            last = Some(session.play_human(Coord::new(r, c)).unwrap());
        }

        let report = last.unwrap();
        assert_eq!(report.status, GameStatus::Won(Player::X));
        assert_eq!(session.status(), GameStatus::Won(Player::X));
        assert_eq!(session.history().len(), 5);
        assert!(matches!(
            session.play_human(Coord::new(2, 2)),
            Err(Error::GameOver)
        ));
    }

    #[test]
    fn test_cheating_ends_the_game() {
        let mut session = GameSession::new(seeded(vec![])).unwrap();
        session.play_human(Coord::new(1, 1)).unwrap();
        let report = session.play_human(Coord::new(1, 1)).unwrap();

        assert_eq!(report.validity, MoveValidity::SquareAlreadyOccupied);
        assert_eq!(report.status, GameStatus::Cheated(Player::O));
        // The overwrite was accepted by the board
        assert_eq!(
            session.board().state(Coord::new(1, 1)).unwrap(),
            SquareState::O
        );
        assert!(session.board().is_consistent());
    }

    #[test]
    fn test_out_of_bounds_is_an_error_not_a_move() {
        let mut session = GameSession::new(seeded(vec![])).unwrap();
        assert!(matches!(
            session.play_human(Coord::new(5, 0)),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(session.history().is_empty());
        assert_eq!(session.to_move(), Player::X);
    }

    #[test]
    fn test_seats_are_enforced() {
        let mut session = GameSession::new(seeded(vec![Player::O])).unwrap();
        assert!(matches!(
            session.start_computer_turn(),
            Err(Error::WrongSeat {
                player: Player::X,
                ..
            })
        ));

        session.play_human(Coord::new(1, 1)).unwrap();
        assert!(matches!(
            session.play_human(Coord::new(0, 0)),
            Err(Error::WrongSeat {
                player: Player::O,
                ..
            })
        ));

        let (decision, report) = session.play_computer().unwrap();
        assert_eq!(report.validity, MoveValidity::Legal);
        assert_eq!(report.coord, decision.chosen);
        assert_eq!(session.to_move(), Player::X);
    }

    #[test]
    fn test_stale_decision_rejected() {
        let mut session = GameSession::new(seeded(vec![Player::X, Player::O])).unwrap();
        let opening = session.start_computer_turn().unwrap().run_to_completion().unwrap();
        session.apply_decision(&opening).unwrap();
        session.play_computer().unwrap();

        assert_eq!(session.to_move(), Player::X);
        assert!(matches!(
            session.apply_decision(&opening),
            Err(Error::StaleDecision {
                decided_at: 0,
                current: 2
            })
        ));
    }

    #[test]
    fn test_decision_for_other_player_rejected() {
        let mut session = GameSession::new(seeded(vec![Player::X, Player::O])).unwrap();
        let opening = session.start_computer_turn().unwrap().run_to_completion().unwrap();
        session.apply_decision(&opening).unwrap();

        assert!(matches!(
            session.apply_decision(&opening),
            Err(Error::WrongTurn {
                expected: Player::O,
                got: Player::X
            })
        ));
    }

    #[test]
    fn test_with_board_detects_finished_position() {
        let board = Board::parse("XXX/OO./...", 3).unwrap();
        let session = GameSession::with_board(seeded(vec![]), board, Player::O).unwrap();
        assert_eq!(session.status(), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_with_board_rejects_mismatched_geometry() {
        let board = Board::parse("..../..../..../....", 4).unwrap();
        let result = GameSession::with_board(seeded(vec![]), board, Player::X);
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));

        let board = Board::parse("..../..../..../....", 3).unwrap();
        let config = seeded(vec![]).with_geometry(4, 4);
        let result = GameSession::with_board(config, board, Player::X);
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));

        let board = Board::parse("..../..../..../....", 3).unwrap();
        let config = seeded(vec![]).with_geometry(4, 3);
        assert!(GameSession::with_board(config, board, Player::X).is_ok());
    }
}
