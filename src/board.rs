//! Square-grid board with incremental win and symmetry bookkeeping

pub mod grid;
pub mod lines;
pub mod square;
pub mod symmetry;
pub mod validation;

pub use grid::{Board, MAX_SIDE};
pub use lines::WinCondition;
pub use square::{Coord, Player, Square, SquareState};
pub use symmetry::{GroupRef, SymmetryAxis, SymmetryGroup, SymmetryKind};
pub use validation::AuditFinding;
