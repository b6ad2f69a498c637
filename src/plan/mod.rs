//! Build plans and the pieces they queue.
//!
//! The planner pushes candidate pieces onto a `BuildPlan`, asks it for the
//! total cost, and feeds that cost to an estimator to rank candidates.

pub mod piece;
pub mod ranking;
pub mod stack;

pub use piece::{PieceKind, PossiblePiece, ALL_PIECE_KINDS, PIECE_KIND_COUNT};
pub use ranking::{rank_plans, RankedPlan};
pub use stack::BuildPlan;
