//! Legality filtering.
//!
//! Each pseudo-legal candidate is played on a copy of the position with
//! [`apply_move`](crate::apply::apply_move), including its secondary effects
//! (rook hop, en-passant removal). The candidate survives if the mover's king
//! is not attacked afterwards. The original position is never touched, so
//! there is nothing to revert.

use super::{attacks::is_king_in_check, pseudo_legal_moves};
use crate::apply::apply_move;
use crate::Position;
use chess_core::{Color, Square};

/// Legal destinations for whatever stands on `from`, regardless of whose turn
/// it is. Empty when the square is empty.
pub fn legal_destinations(position: &Position, from: Square) -> Vec<Square> {
    let Some(piece) = position.piece_at(from) else {
        return Vec::new();
    };

    let mut moves = pseudo_legal_moves(position, from, piece, true);
    moves.retain(|&to| {
        apply_move(position, from, to)
            .map(|outcome| !is_king_in_check(&outcome.position, piece.color))
            .unwrap_or(false)
    });
    moves
}

/// Legal destinations for the piece on `from`.
///
/// Empty when the square is empty or holds a piece of the side not to move.
pub fn legal_moves(position: &Position, from: Square) -> Vec<Square> {
    match position.piece_at(from) {
        Some(piece) if piece.color == position.side_to_move => legal_destinations(position, from),
        _ => Vec::new(),
    }
}

/// Every legal (from, to) pair for `color`, as if it were `color`'s turn.
pub fn legal_moves_for_color(position: &Position, color: Color) -> Vec<(Square, Square)> {
    position
        .board
        .pieces_of(color)
        .flat_map(|(from, _)| {
            legal_destinations(position, from)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

/// Returns true if any piece of `color` has a legal move.
pub fn has_any_legal_move(position: &Position, color: Color) -> bool {
    position
        .board
        .pieces_of(color)
        .any(|(from, _)| !legal_destinations(position, from).is_empty())
}
