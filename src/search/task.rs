//! Resumable minimax over a private board clone.
//!
//! The tree is walked with an explicit frame stack instead of recursion so a
//! search can hand control back between time slices and pick up exactly where
//! it stopped. Each frame owns a cursor into the shared candidate list; the
//! `available` markers record which candidates are currently placed further
//! up the line.

use std::{cmp::Ordering, time::Instant};

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::Serialize;
use tracing::{debug, trace};

use super::{
    config::SearchConfig,
    score::{NodeResult, Outcome, SearchScore},
    stats::SearchStats,
};
use crate::{
    Error,
    board::{Board, Coord, Player, SquareState},
};

/// Result of a completed search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// The move to play, drawn uniformly from `candidates`
    pub chosen: Coord,
    /// Every equally-best root move, row-major
    pub candidates: Vec<Coord>,
    /// Best score from the searching player's point of view
    pub score: SearchScore,
    pub playing_as: Player,
    /// Occupied squares on the board that was searched
    pub board_ply: usize,
    pub stats: SearchStats,
}

/// What one call to [`SearchTask::resume`] produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchProgress {
    /// The slice ran out; call `resume` again
    Pending,
    Complete(Decision),
}

#[derive(Debug)]
struct Frame {
    to_place: Player,
    depth: usize,
    /// Parent's best outcome when this node was entered
    bound: Option<Outcome>,
    cursor: usize,
    /// Candidate whose subtree is on the stack above this frame
    pending: Option<usize>,
    best: Option<SearchScore>,
}

impl Frame {
    fn new(to_place: Player, depth: usize, bound: Option<Outcome>) -> Self {
        Frame {
            to_place,
            depth,
            bound,
            cursor: 0,
            pending: None,
            best: None,
        }
    }
}

/// A search in progress
#[derive(Debug)]
pub struct SearchTask {
    board: Board,
    playing_as: Player,
    config: SearchConfig,
    rng: StdRng,
    candidates: Vec<Coord>,
    available: Vec<bool>,
    remaining: usize,
    stack: Vec<Frame>,
    root_choices: Vec<Coord>,
    stats: SearchStats,
    board_ply: usize,
    started: Instant,
    finished: bool,
}

fn invariant(message: impl Into<String>) -> Error {
    Error::SearchInvariant {
        message: message.into(),
    }
}

impl SearchTask {
    pub(super) fn new(
        board: &Board,
        playing_as: Player,
        config: SearchConfig,
    ) -> crate::Result<Self> {
        if board.check_win() != SquareState::Empty {
            return Err(Error::GameOver);
        }
        let candidates = board.legal_moves();
        if candidates.is_empty() {
            return Err(Error::NoValidMoves);
        }

        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        debug!(
            %playing_as,
            moves = candidates.len(),
            alpha_beta = config.alpha_beta_pruning,
            symmetry = config.symmetry_pruning,
            "search started"
        );

        Ok(SearchTask {
            board: board.clone(),
            playing_as,
            rng: StdRng::seed_from_u64(seed),
            available: vec![true; candidates.len()],
            remaining: candidates.len(),
            candidates,
            stack: vec![Frame::new(playing_as, 0, None)],
            root_choices: Vec::new(),
            stats: SearchStats {
                states_sampled: 1,
                ..SearchStats::default()
            },
            board_ply: board.occupied_count(),
            started: Instant::now(),
            finished: false,
            config,
        })
    }

    pub fn playing_as(&self) -> Player {
        self.playing_as
    }

    pub fn board_ply(&self) -> usize {
        self.board_ply
    }

    /// Counters so far
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run until the search completes or, when non-blocking, the yield slice
    /// has elapsed.
    pub fn resume(&mut self) -> crate::Result<SearchProgress> {
        if self.finished {
            return Err(Error::SearchFinished);
        }

        let slice_start = Instant::now();
        let slice = self.config.yield_slice();
        loop {
            if let Some(decision) = self.step()? {
                self.finished = true;
                return Ok(SearchProgress::Complete(decision));
            }

            if self.config.non_blocking && slice_start.elapsed() >= slice {
                self.stats.yields += 1;
                trace!(
                    depth = self.stack.len().saturating_sub(1),
                    states = self.stats.states_sampled,
                    "search yielded"
                );
                return Ok(SearchProgress::Pending);
            }
        }
    }

    /// Resume until complete, ignoring slice boundaries
    pub fn run_to_completion(mut self) -> crate::Result<Decision> {
        loop {
            if let SearchProgress::Complete(decision) = self.resume()? {
                return Ok(decision);
            }
        }
    }

    /// Advance by one candidate or one finished node.
    fn step(&mut self) -> crate::Result<Option<Decision>> {
        let Some(frame) = self.stack.last_mut() else {
            return Err(invariant("search stepped with an empty stack"));
        };
        let next = (frame.cursor..self.candidates.len()).find(|&i| self.available[i]);
        let Some(index) = next else {
            return self.finish_frame();
        };
        frame.cursor = index + 1;
        let (to_place, depth) = (frame.to_place, frame.depth);

        let coord = self.candidates[index];
        if self.config.symmetry_pruning && self.board.is_culled(coord)? {
            self.stats.symmetry_culled += 1;
            return Ok(None);
        }

        self.place(index, to_place)?;

        if let Some(winner) = self.board.check_win().to_player() {
            self.unplace(index)?;
            let outcome = if winner == self.playing_as {
                Outcome::Win
            } else {
                Outcome::Loss
            };
            return self.record(SearchScore::new(outcome, 1), index);
        }

        if self.remaining == 0 {
            self.unplace(index)?;
            return self.record(SearchScore::new(Outcome::Tie, 1), index);
        }

        let parent = self
            .stack
            .last_mut()
            .ok_or_else(|| invariant("frame vanished while descending"))?;
        parent.pending = Some(index);
        let bound = parent.best.map(|best| best.outcome);

        self.stack
            .push(Frame::new(to_place.opponent(), depth + 1, bound));
        self.stats.states_sampled += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth + 1);
        Ok(None)
    }

    /// Fold a child's score into the top frame
    fn record(&mut self, score: SearchScore, index: usize) -> crate::Result<Option<Decision>> {
        let playing_as = self.playing_as;
        let Some(frame) = self.stack.last_mut() else {
            return Err(invariant("scored a move with no frame to receive it"));
        };
        let maximizing = frame.to_place == playing_as;

        if self.config.alpha_beta_pruning && frame.depth > 0 {
            if let Some(bound) = frame.bound {
                let dominated = if maximizing {
                    score.outcome > bound
                } else {
                    score.outcome < bound
                };
                if dominated {
                    self.stats.alpha_beta_cutoffs += 1;
                    return self.complete_frame(NodeResult::Pruned);
                }
            }
        }

        let rank = frame
            .best
            .map_or(Ordering::Greater, |best| score.rank_against(best, maximizing));
        if rank == Ordering::Greater {
            frame.best = Some(score);
        }

        if frame.depth == 0 {
            let coord = self.candidates[index];
            match rank {
                Ordering::Greater => {
                    self.root_choices.clear();
                    self.root_choices.push(coord);
                    debug!(%coord, %score, "new best root move");
                }
                Ordering::Equal => {
                    self.root_choices.push(coord);
                    debug!(%coord, %score, "equally viable root move");
                }
                Ordering::Less => {}
            }
        }

        Ok(None)
    }

    /// The top frame has no candidates left
    fn finish_frame(&mut self) -> crate::Result<Option<Decision>> {
        let frame = self
            .stack
            .last()
            .ok_or_else(|| invariant("finished a frame on an empty stack"))?;
        let best = frame.best.ok_or_else(|| {
            invariant(format!(
                "node at depth {} finished without scoring any move",
                frame.depth
            ))
        })?;
        self.complete_frame(NodeResult::Scored(best))
    }

    /// Pop the top frame and hand its result to the parent
    fn complete_frame(&mut self, result: NodeResult) -> crate::Result<Option<Decision>> {
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| invariant("completed a frame on an empty stack"))?;

        if frame.depth == 0 {
            return match result {
                NodeResult::Scored(score) => self.conclude(score).map(Some),
                NodeResult::Pruned => Err(invariant("root result was pruned")),
            };
        }

        let index = self
            .stack
            .last_mut()
            .and_then(|parent| parent.pending.take())
            .ok_or_else(|| invariant("child finished with no pending move in its parent"))?;
        self.unplace(index)?;

        match result {
            NodeResult::Scored(score) => self.record(score.extended(), index),
            NodeResult::Pruned => Ok(None),
        }
    }

    fn conclude(&mut self, score: SearchScore) -> crate::Result<Decision> {
        let mut candidates = std::mem::take(&mut self.root_choices);
        if self.config.symmetry_pruning {
            self.close_under_symmetry(&mut candidates)?;
        }
        candidates.sort();

        let chosen = *candidates
            .choose(&mut self.rng)
            .ok_or_else(|| invariant("root finished with no candidate moves"))?;
        self.stats.elapsed = self.started.elapsed();

        debug!(
            %chosen,
            %score,
            candidates = candidates.len(),
            stats = %self.stats,
            "search complete"
        );

        Ok(Decision {
            chosen,
            candidates,
            score,
            playing_as: self.playing_as,
            board_ply: self.board_ply,
            stats: self.stats.clone(),
        })
    }

    /// Add the images of every root candidate under the axes holding on the
    /// root board. Culled squares are exactly such images, so this restores
    /// the moves symmetry pruning skipped.
    fn close_under_symmetry(&self, candidates: &mut Vec<Coord>) -> crate::Result<()> {
        let mut i = 0;
        while i < candidates.len() {
            for image in self.board.symmetric_images(candidates[i])? {
                if !candidates.contains(&image) {
                    candidates.push(image);
                }
            }
            i += 1;
        }
        Ok(())
    }

    fn place(&mut self, index: usize, player: Player) -> crate::Result<()> {
        self.board
            .set_state(self.candidates[index], player.to_state())?;
        self.available[index] = false;
        self.remaining -= 1;
        Ok(())
    }

    fn unplace(&mut self, index: usize) -> crate::Result<()> {
        self.board
            .set_state(self.candidates[index], SquareState::Empty)?;
        self.available[index] = true;
        self.remaining += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Search;

    fn blocking(seed: u64) -> SearchConfig {
        SearchConfig::default()
            .with_non_blocking(false)
            .with_seed(seed)
    }

    fn board(layout: &str) -> Board {
        let mut rng = StdRng::seed_from_u64(11);
        Board::parse_with_rng(layout, 3, &mut rng).unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        let decision = Search::decide(&board("XX./OO./..."), Player::X, blocking(1)).unwrap();
        assert_eq!(decision.chosen, Coord::new(0, 2));
        assert_eq!(decision.candidates, vec![Coord::new(0, 2)]);
        assert_eq!(decision.score, SearchScore::new(Outcome::Win, 1));
    }

    #[test]
    fn test_blocks_open_row() {
        let decision = Search::decide(&board("XX./O../..."), Player::O, blocking(2)).unwrap();
        assert_eq!(decision.candidates, vec![Coord::new(0, 2)]);
        assert_eq!(decision.score, SearchScore::new(Outcome::Loss, 4));
    }

    #[test]
    fn test_answers_center_with_corner() {
        let corners = [
            Coord::new(0, 0),
            Coord::new(0, 2),
            Coord::new(2, 0),
            Coord::new(2, 2),
        ];
        let decision = Search::decide(&board(".../.X./..."), Player::O, blocking(3)).unwrap();
        assert_eq!(decision.score, SearchScore::new(Outcome::Tie, 8));
        assert_eq!(decision.candidates, corners.to_vec());
        assert!(corners.contains(&decision.chosen));
    }

    #[test]
    fn test_rejects_full_and_won_boards() {
        let full = board("XOX/XOO/OXX");
        assert!(matches!(
            Search::start(&full, Player::X, SearchConfig::default()),
            Err(Error::NoValidMoves)
        ));

        let won = board("XXX/OO./...");
        assert!(matches!(
            Search::start(&won, Player::O, SearchConfig::default()),
            Err(Error::GameOver)
        ));
    }

    #[test]
    fn test_last_square_is_a_one_ply_tie() {
        let decision = Search::decide(&board("XOX/XOO/OX."), Player::X, blocking(4)).unwrap();
        assert_eq!(decision.chosen, Coord::new(2, 2));
        assert_eq!(decision.score, SearchScore::new(Outcome::Tie, 1));
        assert_eq!(decision.stats.states_sampled, 1);
    }

    #[test]
    fn test_yielding_does_not_change_the_result() {
        let layout = "X../.../...";
        let expected = Search::decide(&board(layout), Player::O, blocking(5)).unwrap();

        let config = SearchConfig::default()
            .with_yield_slice_millis(0)
            .with_seed(5);
        let mut task = Search::start(&board(layout), Player::O, config).unwrap();
        let mut pending = 0;
        let decision = loop {
            match task.resume().unwrap() {
                SearchProgress::Pending => pending += 1,
                SearchProgress::Complete(decision) => break decision,
            }
        };

        assert!(pending > 0);
        assert_eq!(decision.stats.yields, pending);
        assert_eq!(decision.chosen, expected.chosen);
        assert_eq!(decision.candidates, expected.candidates);
        assert_eq!(decision.score, expected.score);
        assert!(task.is_finished());
        assert!(matches!(task.resume(), Err(Error::SearchFinished)));
    }

    #[test]
    fn test_search_leaves_caller_board_untouched() {
        let original = board("X../.O./...");
        let before = original.to_string();
        Search::decide(&original, Player::X, blocking(6)).unwrap();
        assert_eq!(original.to_string(), before);
        assert!(original.is_consistent());
    }

    #[test]
    fn test_pruning_reduces_work() {
        let empty = board(".../.../...");
        let full = Search::decide(
            &empty,
            Player::X,
            blocking(7)
                .with_alpha_beta_pruning(false)
                .with_symmetry_pruning(false),
        )
        .unwrap();
        let pruned = Search::decide(&empty, Player::X, blocking(7)).unwrap();

        assert_eq!(full.stats.skipped(), 0);
        assert!(pruned.stats.symmetry_culled > 0);
        assert!(pruned.stats.states_sampled < full.stats.states_sampled);
        assert_eq!(pruned.score, full.score);
        assert_eq!(pruned.candidates, full.candidates);
    }

    #[test]
    fn test_alpha_beta_alone_cuts_branches() {
        let empty = board(".../.../...");
        let unpruned = blocking(5)
            .with_alpha_beta_pruning(false)
            .with_symmetry_pruning(false);
        let full = Search::decide(&empty, Player::X, unpruned.clone()).unwrap();
        let cut =
            Search::decide(&empty, Player::X, unpruned.with_alpha_beta_pruning(true)).unwrap();

        assert_eq!(full.stats.alpha_beta_cutoffs, 0);
        assert!(cut.stats.alpha_beta_cutoffs > 0);
        assert_eq!(cut.stats.symmetry_culled, 0);
        assert!(cut.stats.states_sampled < full.stats.states_sampled);
        assert_eq!(cut.score, full.score);
        assert_eq!(cut.candidates, full.candidates);
    }
}
