//! Subcommand implementations

use anyhow::{Context, Result};
use rand::{SeedableRng, rngs::StdRng};

use crate::board::Board;

pub mod compare;
pub mod decide;
pub mod play;

/// Parse a `--board` layout; the win length defaults to the side length
pub(crate) fn load_board(
    layout: &str,
    win_length: Option<usize>,
    seed: Option<u64>,
) -> Result<Board> {
    let side = Board::layout_rows(layout).len();
    let win_length = win_length.unwrap_or(side);

    let board = match seed {
        Some(seed) => {
            Board::parse_with_rng(layout, win_length, &mut StdRng::seed_from_u64(seed))
        }
        None => Board::parse(layout, win_length),
    }
    .with_context(|| format!("parsing board '{layout}'"))?;
    Ok(board)
}
