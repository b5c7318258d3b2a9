//! Generalized tic-tac-toe engine
//!
//! This crate provides:
//! - Square boards of side up to 8 with any win length, tracking win lines
//!   and six geometric symmetries incrementally as squares change
//! - Full-depth minimax with alpha-beta pruning, symmetry pruning and
//!   length-aware tie-breaking, runnable as a resumable task
//! - A game session that sequences human and computer turns
//! - The `gridmark` command-line front-end

pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod search;
pub mod session;

pub use board::{Board, Coord, MAX_SIDE, Player, SquareState, SymmetryKind};
pub use config::GameConfig;
pub use error::{Error, Result};
pub use search::{
    Decision, Outcome, Search, SearchConfig, SearchProgress, SearchScore, SearchStats, SearchTask,
};
pub use session::{GameSession, GameStatus, MoveReport, MoveValidity, Seat};
