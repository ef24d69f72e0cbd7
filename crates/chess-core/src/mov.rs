//! Committed move records.

use crate::{CastleSide, CastlingRights, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A move as it was played, kept in a game's history.
///
/// `piece` is the mover as it stood before the move, so a promoting pawn is
/// recorded as a pawn with `promotion` set. The `*_before` fields snapshot the
/// position's state prior to the move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    /// Occupant of `to` that was taken.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub captured: Option<Piece>,
    /// Pawn removed from behind `to` by an en-passant capture.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub en_passant_captured: Option<Piece>,
    pub notation: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub castle: Option<CastleSide>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub promotion: Option<PieceKind>,
    pub en_passant_before: Option<Square>,
    pub castling_before: CastlingRights,
}

impl MoveRecord {
    /// The piece taken by this move, whether on `to` or by en passant.
    pub fn captured_piece(&self) -> Option<Piece> {
        self.captured.or(self.en_passant_captured)
    }

    pub fn is_capture(&self) -> bool {
        self.captured_piece().is_some()
    }

    /// Coordinate form, e.g. `"e2e4"`.
    pub fn to_coordinate(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation)
    }
}
