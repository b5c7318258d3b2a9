//! Common test utilities for the gridmark test suite.
//!
//! Provides seeded random positions and a brute-force minimax over plain
//! cell vectors, independent of the engine's incremental bookkeeping.

#![allow(dead_code)]

use gridmark::{
    Board, Coord, Outcome, Player, SearchConfig, SearchScore, SquareState,
    board::MAX_SIDE,
};
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

/// Empty board with priorities drawn from `seed`
pub fn seeded_board(side: usize, win_length: usize, seed: u64) -> Board {
    assert!(side <= MAX_SIDE);
    Board::with_rng(side, win_length, &mut StdRng::seed_from_u64(seed)).unwrap()
}

/// Blocking search config with a fixed tie-break seed
pub fn blocking_config(seed: u64) -> SearchConfig {
    SearchConfig::default()
        .with_non_blocking(false)
        .with_seed(seed)
}

/// Play `plies` random legal moves from an empty board, X first.
///
/// Returns the board and the player to move, or `None` if the game ended on
/// the way.
pub fn random_position(
    side: usize,
    win_length: usize,
    plies: usize,
    seed: u64,
) -> Option<(Board, Player)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::with_rng(side, win_length, &mut rng).unwrap();
    let mut to_move = Player::X;

    for _ in 0..plies {
        let moves = board.legal_moves();
        let &coord = moves.choose(&mut rng)?;
        board.set_state(coord, to_move.to_state()).unwrap();
        if board.check_win() != SquareState::Empty {
            return None;
        }
        to_move = to_move.opponent();
    }

    (board.available_moves() > 0).then_some((board, to_move))
}

/// Collect `count` unfinished random positions
pub fn random_positions(
    side: usize,
    win_length: usize,
    plies: std::ops::RangeInclusive<usize>,
    count: usize,
) -> Vec<(Board, Player)> {
    let mut positions = Vec::with_capacity(count);
    let mut seed = 0;
    while positions.len() < count {
        let span = (plies.end() - plies.start() + 1) as u64;
        let ply = plies.start() + (seed % span) as usize;
        if let Some(position) = random_position(side, win_length, ply, seed) {
            positions.push(position);
        }
        seed += 1;
    }
    positions
}

/// Plain-array game state for the reference search
pub struct Position {
    win_length: usize,
    cells: Vec<Option<Player>>,
    lines: Vec<Vec<usize>>,
}

impl Position {
    pub fn from_board(board: &Board) -> Self {
        let side = board.side();
        let mut lines = Vec::new();
        for i in 0..side {
            lines.push((0..side).map(|j| i * side + j).collect());
            lines.push((0..side).map(|j| j * side + i).collect());
        }
        lines.push((0..side).map(|i| i * side + i).collect());
        lines.push((0..side).map(|i| i * side + side - 1 - i).collect());

        Position {
            win_length: board.win_length(),
            cells: board
                .squares()
                .map(|(_, sq)| sq.state().to_player())
                .collect(),
            lines,
        }
    }

    fn has_line(&self, player: Player) -> bool {
        self.lines.iter().any(|line| {
            line.iter()
                .filter(|&&i| self.cells[i] == Some(player))
                .count()
                >= self.win_length
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

/// Preference key: larger is better for the side choosing
fn preference(score: (i8, u32), maximizing: bool) -> (i64, i64) {
    let (value, plies) = (score.0 as i64, score.1 as i64);
    if maximizing {
        (value, if value > 0 { -plies } else { plies })
    } else {
        (-value, if value < 0 { -plies } else { plies })
    }
}

/// Score of each legal move for `to_place`, from `searcher`'s point of view
fn move_scores(pos: &mut Position, to_place: Player, searcher: Player) -> Vec<(usize, (i8, u32))> {
    let mut scores = Vec::new();
    for i in 0..pos.cells.len() {
        if pos.cells[i].is_some() {
            continue;
        }
        pos.cells[i] = Some(to_place);
        let score = if pos.has_line(to_place) {
            (if to_place == searcher { 1 } else { -1 }, 1)
        } else if pos.is_full() {
            (0, 1)
        } else {
            let (value, plies) = reference_value(pos, to_place.opponent(), searcher);
            (value, plies + 1)
        };
        pos.cells[i] = None;
        scores.push((i, score));
    }
    scores
}

/// Exhaustive minimax value with the length-aware tie-break
pub fn reference_value(pos: &mut Position, to_place: Player, searcher: Player) -> (i8, u32) {
    let maximizing = to_place == searcher;
    move_scores(pos, to_place, searcher)
        .into_iter()
        .map(|(_, score)| score)
        .max_by_key(|&score| preference(score, maximizing))
        .expect("reference search on a full board")
}

fn to_score((value, plies): (i8, u32)) -> SearchScore {
    let outcome = match value {
        1 => Outcome::Win,
        0 => Outcome::Tie,
        _ => Outcome::Loss,
    };
    SearchScore::new(outcome, plies)
}

/// Best score and every move achieving it, row-major
pub fn reference_decision(board: &Board, searcher: Player) -> (SearchScore, Vec<Coord>) {
    let side = board.side();
    let mut pos = Position::from_board(board);
    let scores = move_scores(&mut pos, searcher, searcher);
    let best = scores
        .iter()
        .map(|&(_, score)| preference(score, true))
        .max()
        .expect("reference decision on a full board");

    let mut best_score = None;
    let mut moves = Vec::new();
    for (i, score) in scores {
        if preference(score, true) == best {
            best_score = Some(score);
            moves.push(Coord::new(i / side, i % side));
        }
    }
    (to_score(best_score.unwrap()), moves)
}

/// Reference value of the position after `searcher` plays `coord`
pub fn reference_after_move(board: &Board, searcher: Player, coord: Coord) -> SearchScore {
    let mut after = board.clone();
    after.set_state(coord, searcher.to_state()).unwrap();
    if after.check_win() != SquareState::Empty {
        return SearchScore::new(Outcome::Win, 1);
    }
    if after.available_moves() == 0 {
        return SearchScore::new(Outcome::Tie, 1);
    }
    let mut pos = Position::from_board(&after);
    to_score(reference_value(&mut pos, searcher.opponent(), searcher)).extended()
}
