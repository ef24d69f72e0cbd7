//! Applying a move to a position.
//!
//! [`apply_move`] is a pure function from a position to its successor. It
//! carries out every side effect of the move: en-passant removal, the rook hop
//! when castling, castling-right invalidation, queen promotion, the
//! en-passant target lifecycle, and both clocks. The legality filter uses the
//! same function on a copy of the position, so nothing is ever reverted.

use crate::movegen::rook_home;
use crate::Position;
use chess_core::{CastleSide, Color, Piece, PieceKind, Square};

/// The successor position and what happened on the way there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub position: Position,
    /// The piece that moved, as it stood on the source square.
    pub piece: Piece,
    /// Occupant of the destination square that was taken.
    pub captured: Option<Piece>,
    /// Pawn taken en passant from behind the destination.
    pub en_passant_captured: Option<Piece>,
    pub castle: Option<CastleSide>,
    pub promotion: Option<PieceKind>,
}

impl MoveOutcome {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some() || self.en_passant_captured.is_some()
    }
}

/// Moves whatever stands on `from` to `to` and returns the resulting position.
///
/// No legality checking happens here. Returns `None` only when `from` is empty.
pub fn apply_move(position: &Position, from: Square, to: Square) -> Option<MoveOutcome> {
    let mut next = *position;
    let board = &mut next.board;

    let piece = board.take(from)?;
    let color = piece.color;
    let captured = board.take(to);

    let mut en_passant_captured = None;
    if piece.kind == PieceKind::Pawn && captured.is_none() && position.en_passant == Some(to) {
        if let Some(behind) = to.offset(0, -color.pawn_direction()) {
            en_passant_captured = board.take(behind);
        }
    }

    let mut castle = None;
    if piece.kind == PieceKind::King && from.file_index().abs_diff(to.file_index()) == 2 {
        let side = if to.file_index() > from.file_index() {
            CastleSide::Kingside
        } else {
            CastleSide::Queenside
        };
        let rook_from = rook_home(color, side);
        if let Some(rook_to) = Square::from_coords(side.rook_target_file(), color.back_rank()) {
            let rook = board.take(rook_from);
            board.set(rook_to, rook);
        }
        castle = Some(side);
    }

    let promotion = (piece.kind == PieceKind::Pawn && to.rank_index() == color.promotion_rank())
        .then_some(PieceKind::Queen);
    let placed = match promotion {
        Some(kind) => Piece::new(kind, color),
        None => piece,
    };
    board.set(to, Some(placed));

    update_castling_rights(&mut next, piece, from, to);

    next.en_passant = if piece.kind == PieceKind::Pawn
        && from.rank_index().abs_diff(to.rank_index()) == 2
    {
        let skipped = from.offset(0, color.pawn_direction());
        skipped.filter(|_| enemy_pawn_beside(&next, to, color))
    } else {
        None
    };

    if piece.kind == PieceKind::Pawn || captured.is_some() || en_passant_captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }
    next.side_to_move = color.opposite();

    Some(MoveOutcome {
        position: next,
        piece,
        captured,
        en_passant_captured,
        castle,
        promotion,
    })
}

/// Clears rights whenever a king or a corner rook leaves home, or a corner
/// rook is captured where it stands.
fn update_castling_rights(next: &mut Position, piece: Piece, from: Square, to: Square) {
    if piece.kind == PieceKind::King {
        next.castling.clear_color(piece.color);
    }
    for color in Color::BOTH {
        for side in CastleSide::BOTH {
            let corner = rook_home(color, side);
            if from == corner || to == corner {
                next.castling.clear(color, side);
            }
        }
    }
}

/// Returns true if a pawn hostile to `mover` stands beside `sq` on its rank,
/// i.e. a double step onto `sq` can be taken en passant.
fn enemy_pawn_beside(position: &Position, sq: Square, mover: Color) -> bool {
    let enemy_pawn = Piece::new(PieceKind::Pawn, mover.opposite());
    [-1, 1]
        .into_iter()
        .filter_map(|df| sq.offset(df, 0))
        .any(|side| position.board.get(side) == Some(enemy_pawn))
}
