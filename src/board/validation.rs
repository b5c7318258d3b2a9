//! Independent recomputation of the board's derived bookkeeping

use super::{
    grid::Board,
    square::{Coord, SquareState},
    symmetry::SymmetryKind,
};

/// A disagreement between cached bookkeeping and the live square states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditFinding {
    AvailableMoves {
        recorded: usize,
        actual: usize,
    },
    WinCount {
        condition: usize,
        state: SquareState,
        recorded: usize,
        actual: usize,
    },
    GroupFlag {
        kind: SymmetryKind,
        group: usize,
        recorded: bool,
        actual: bool,
    },
    AxisFlag {
        kind: SymmetryKind,
        recorded: bool,
        actual: bool,
    },
}

impl Board {
    /// Recompute everything the board caches and report each mismatch
    pub fn audit(&self) -> Vec<AuditFinding> {
        let mut findings = Vec::new();
        let states: Vec<SquareState> = self.squares().map(|(_, sq)| sq.state()).collect();

        let empty = states.iter().filter(|&&s| s == SquareState::Empty).count();
        if empty != self.available_moves() {
            findings.push(AuditFinding::AvailableMoves {
                recorded: self.available_moves(),
                actual: empty,
            });
        }

        for (index, condition) in self.win_conditions().iter().enumerate() {
            for state in SquareState::ALL {
                let actual = condition
                    .squares()
                    .iter()
                    .filter(|&&sq| states[sq] == state)
                    .count();
                if actual != condition.count(state) {
                    findings.push(AuditFinding::WinCount {
                        condition: index,
                        state,
                        recorded: condition.count(state),
                        actual,
                    });
                }
            }
        }

        for axis in self.symmetry_axes() {
            for (index, group) in axis.groups().iter().enumerate() {
                let first = states[group.squares()[0]];
                let actual = group.squares().iter().all(|&sq| states[sq] == first);
                if actual != group.is_symmetric() {
                    findings.push(AuditFinding::GroupFlag {
                        kind: axis.kind(),
                        group: index,
                        recorded: group.is_symmetric(),
                        actual,
                    });
                }
            }

            let actual = self.holds_geometrically(axis.kind());
            if actual != axis.is_symmetric() {
                findings.push(AuditFinding::AxisFlag {
                    kind: axis.kind(),
                    recorded: axis.is_symmetric(),
                    actual,
                });
            }
        }

        findings
    }

    pub fn is_consistent(&self) -> bool {
        self.audit().is_empty()
    }

    /// Whether every square matches its image under `kind`, checked directly
    pub fn holds_geometrically(&self, kind: SymmetryKind) -> bool {
        let side = self.side();
        (0..side * side).all(|i| {
            let coord = Coord::new(i / side, i % side);
            let image = kind.map(coord, side);
            self.state(coord).ok() == self.state(image).ok()
        })
    }

    /// Whether some line holds at least `win_length` squares of `state`, checked directly
    pub fn has_line_of(&self, state: SquareState) -> bool {
        let side = self.side();
        let count = |cells: &mut dyn Iterator<Item = Coord>| {
            cells
                .filter(|&c| self.state(c).ok() == Some(state))
                .count()
        };

        let rows_or_columns = (0..side).any(|i| {
            count(&mut (0..side).map(|j| Coord::new(i, j))) >= self.win_length()
                || count(&mut (0..side).map(|j| Coord::new(j, i))) >= self.win_length()
        });
        rows_or_columns
            || count(&mut (0..side).map(|i| Coord::new(i, i))) >= self.win_length()
            || count(&mut (0..side).map(|i| Coord::new(i, side - 1 - i))) >= self.win_length()
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_fresh_board_is_consistent() {
        let mut rng = StdRng::seed_from_u64(1);
        for side in 1..=5 {
            let board = Board::with_rng(side, side, &mut rng).unwrap();
            assert!(board.is_consistent(), "side {side}: {:?}", board.audit());
        }
    }

    #[test]
    fn test_random_mutations_stay_consistent() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::with_rng(4, 3, &mut rng).unwrap();

        for _ in 0..500 {
            let coord = Coord::new(rng.random_range(0..4), rng.random_range(0..4));
            let state = SquareState::ALL[rng.random_range(0..3)];
            board.set_state(coord, state).unwrap();
            assert!(board.is_consistent(), "{:?}", board.audit());
        }
    }

    #[test]
    fn test_has_line_of_agrees_with_check_win() {
        let board = Board::parse("OX./OX./.X.", 3).unwrap();
        assert!(board.has_line_of(SquareState::X));
        assert!(!board.has_line_of(SquareState::O));
        assert_eq!(board.check_win(), SquareState::X);
    }

    #[test]
    fn test_geometric_symmetry_of_parsed_board() {
        let board = Board::parse("X.X/.O./X.X", 3).unwrap();
        for kind in SymmetryKind::ALL {
            assert!(board.holds_geometrically(kind), "{kind:?}");
            assert!(board.symmetry_axis(kind).is_symmetric(), "{kind:?}");
        }

        let board = Board::parse("XX./.../...", 3).unwrap();
        assert!(!board.holds_geometrically(SymmetryKind::Vertical));
        assert!(!board.holds_geometrically(SymmetryKind::Horizontal));
        assert_eq!(
            board.holds_geometrically(SymmetryKind::AntiDiagonal),
            board.symmetry_axis(SymmetryKind::AntiDiagonal).is_symmetric()
        );
    }
}
