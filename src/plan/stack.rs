//! Build plans.
//!
//! A build plan is a stack of intended pieces: the last one pushed is the
//! next one to build. The planner fills it during search and drains it one
//! piece per successful build.

use serde::{Deserialize, Serialize};

use crate::resources::ResourceSet;

use super::piece::PossiblePiece;

/// Stack of pieces waiting to be built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildPlan {
    pieces: Vec<PossiblePiece>,
}

impl BuildPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        BuildPlan::default()
    }

    /// Queues `piece` as the next one to build.
    pub fn push(&mut self, piece: PossiblePiece) {
        self.pieces.push(piece);
    }

    /// Number of queued pieces.
    #[inline]
    pub fn depth(&self) -> usize {
        self.pieces.len()
    }

    /// Returns true if nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Returns the piece `offset` places below the top; `peek(0)` is the next build.
    ///
    /// The caller must check `depth()` first; an out-of-range offset panics.
    #[inline]
    pub fn peek(&self, offset: usize) -> &PossiblePiece {
        &self.pieces[self.pieces.len() - 1 - offset]
    }

    /// Removes the top piece after it has been built.
    ///
    /// The caller must check `depth()` first; advancing an empty plan is a
    /// logic error.
    #[inline]
    pub fn advance(&mut self) {
        debug_assert!(!self.pieces.is_empty(), "advance on an empty build plan");
        self.pieces.pop();
    }

    /// Sums the cost of every queued piece.
    pub fn total_cost(&self) -> ResourceSet {
        let mut total = ResourceSet::EMPTY;
        for piece in &self.pieces {
            total += piece.cost();
        }
        total
    }

    /// Iterates pieces from the top (next build) down.
    pub fn iter(&self) -> impl Iterator<Item = &PossiblePiece> {
        self.pieces.iter().rev()
    }

    /// Drops every queued piece.
    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}

impl FromIterator<PossiblePiece> for BuildPlan {
    /// Pushes pieces in iteration order, so the last one ends up on top.
    fn from_iter<I: IntoIterator<Item = PossiblePiece>>(iter: I) -> Self {
        BuildPlan {
            pieces: iter.into_iter().collect(),
        }
    }
}
