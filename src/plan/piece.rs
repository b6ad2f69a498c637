//! Buildable pieces and their fixed costs.

use serde::{Deserialize, Serialize};

use crate::resources::{ResourceKind, ResourceSet};

/// Number of piece kinds.
pub const PIECE_KIND_COUNT: usize = 4;

/// Something a player can spend resources on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Road = 0,
    Settlement = 1,
    City = 2,
    Card = 3,
}

/// All piece kinds in index order.
pub const ALL_PIECE_KINDS: [PieceKind; PIECE_KIND_COUNT] = [
    PieceKind::Road,
    PieceKind::Settlement,
    PieceKind::City,
    PieceKind::Card,
];

impl PieceKind {
    /// Returns the array index of this kind.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Road => "road",
            PieceKind::Settlement => "settlement",
            PieceKind::City => "city",
            PieceKind::Card => "card",
        }
    }

    /// Returns the resources needed to build one of these.
    pub fn cost(self) -> ResourceSet {
        use ResourceKind::*;
        match self {
            PieceKind::Road => ResourceSet::EMPTY.with(Clay, 1).with(Wood, 1),
            PieceKind::Settlement => ResourceSet::EMPTY
                .with(Clay, 1)
                .with(Sheep, 1)
                .with(Wheat, 1)
                .with(Wood, 1),
            PieceKind::City => ResourceSet::EMPTY.with(Ore, 3).with(Wheat, 2),
            PieceKind::Card => ResourceSet::EMPTY.with(Ore, 1).with(Sheep, 1).with(Wheat, 1),
        }
    }
}

/// A piece the planner is considering, and where it would go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PossiblePiece {
    pub kind: PieceKind,
    /// Board coordinate; development cards have none.
    #[serde(default)]
    pub coord: Option<u32>,
}

impl PossiblePiece {
    /// A road, settlement, or city at `coord`.
    pub fn at(kind: PieceKind, coord: u32) -> Self {
        PossiblePiece {
            kind,
            coord: Some(coord),
        }
    }

    /// A development card.
    pub fn card() -> Self {
        PossiblePiece {
            kind: PieceKind::Card,
            coord: None,
        }
    }

    /// Returns the resources needed to build this piece.
    pub fn cost(&self) -> ResourceSet {
        self.kind.cost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn costs_match_the_rules() {
        assert_eq!(PieceKind::Road.cost().total(), 2);
        assert_eq!(PieceKind::Settlement.cost().total(), 4);
        assert_eq!(PieceKind::City.cost().amount(ResourceKind::Ore), 3);
        assert_eq!(PieceKind::City.cost().amount(ResourceKind::Wheat), 2);
        assert_eq!(PieceKind::Card.cost().amount(ResourceKind::Sheep), 1);
    }

    #[test]
    fn card_has_no_coordinate() {
        let card = PossiblePiece::card();
        assert_eq!(card.coord, None);
        assert_eq!(card.cost(), PieceKind::Card.cost());
        assert_eq!(PossiblePiece::at(PieceKind::City, 0x67).coord, Some(0x67));
    }

    #[test]
    fn json_form() {
        let piece: PossiblePiece = serde_json::from_str(r#"{"kind": "road", "coord": 42}"#).unwrap();
        assert_eq!(piece, PossiblePiece::at(PieceKind::Road, 42));
        let card: PossiblePiece = serde_json::from_str(r#"{"kind": "card"}"#).unwrap();
        assert_eq!(card, PossiblePiece::card());
    }
}
