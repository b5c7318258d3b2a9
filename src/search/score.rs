//! Scores reported by search nodes

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

/// Game result from the searching player's point of view.
///
/// Ordered `Loss < Tie < Win`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Loss,
    Tie,
    Win,
}

impl Outcome {
    /// -1, 0 or +1
    pub fn value(self) -> i8 {
        match self {
            Outcome::Loss => -1,
            Outcome::Tie => 0,
            Outcome::Win => 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Loss => write!(f, "loss"),
            Outcome::Tie => write!(f, "tie"),
            Outcome::Win => write!(f, "win"),
        }
    }
}

/// Outcome plus the number of plies until the game ends along the chosen line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchScore {
    pub outcome: Outcome,
    pub plies_to_end: u32,
}

impl SearchScore {
    pub fn new(outcome: Outcome, plies_to_end: u32) -> Self {
        SearchScore {
            outcome,
            plies_to_end,
        }
    }

    /// The same score seen one ply further up the tree
    pub fn extended(self) -> Self {
        SearchScore {
            plies_to_end: self.plies_to_end + 1,
            ..self
        }
    }

    /// Rank `self` against `other` for the side choosing between them.
    ///
    /// `Greater` means `self` is preferred. The searching player (`maximizing`)
    /// wants the higher outcome, its opponent the lower one. On equal outcomes
    /// the side that is winning wants the shorter game and the other side the
    /// longer one.
    pub fn rank_against(self, other: SearchScore, maximizing: bool) -> Ordering {
        let (outcome_order, winning) = if maximizing {
            (self.outcome.cmp(&other.outcome), self.outcome == Outcome::Win)
        } else {
            (other.outcome.cmp(&self.outcome), self.outcome == Outcome::Loss)
        };

        match outcome_order {
            Ordering::Equal if winning => other.plies_to_end.cmp(&self.plies_to_end),
            Ordering::Equal => self.plies_to_end.cmp(&other.plies_to_end),
            order => order,
        }
    }
}

impl fmt::Display for SearchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} after {} plies", self.outcome, self.plies_to_end)
    }
}

/// What a finished node hands to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeResult {
    Scored(SearchScore),
    /// The parent already has a strictly better line; ignore this node
    Pruned,
}
