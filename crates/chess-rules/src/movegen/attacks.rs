//! Attack detection.
//!
//! A square is attacked by a color when any piece of that color could move
//! onto it. Every generator call here passes `include_castling = false`:
//! castling never captures, and generating it would recurse back into attack
//! detection for the other side.

use super::pseudo_legal_moves;
use crate::Position;
use chess_core::{Color, Piece, PieceKind, Square};

/// Squares `piece` on `from` threatens.
///
/// Pawns threaten their two forward diagonals whether or not anything stands
/// there; their pushes never capture, so they are left out. Every other piece
/// threatens exactly its pseudo-legal destinations.
pub fn attacked_squares(position: &Position, from: Square, piece: Piece) -> Vec<Square> {
    match piece.kind {
        PieceKind::Pawn => {
            let dir = piece.color.pawn_direction();
            [-1, 1]
                .into_iter()
                .filter_map(|df| from.offset(df, dir))
                .collect()
        }
        _ => pseudo_legal_moves(position, from, piece, false),
    }
}

/// Returns true if any piece of `by_color` threatens `sq`.
pub fn is_square_attacked(position: &Position, sq: Square, by_color: Color) -> bool {
    position
        .board
        .pieces_of(by_color)
        .any(|(from, piece)| attacked_squares(position, from, piece).contains(&sq))
}

/// Returns true if the king of `color` is attacked.
///
/// A missing king is never in check.
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    match position.board.find_king(color) {
        Some(king_sq) => is_square_attacked(position, king_sq, color.opposite()),
        None => false,
    }
}
