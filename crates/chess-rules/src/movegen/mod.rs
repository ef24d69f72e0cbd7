//! Move generation.
//!
//! Pseudo-legal destinations are produced per piece by stepping and
//! ray-casting over the board. [`legal`] filters them down to moves that do not
//! leave the mover's king in check, and [`attacks`] answers "is this square
//! threatened" on top of the same generators.

pub mod attacks;
pub mod legal;
pub mod perft;

use crate::Position;
use chess_core::{CastleSide, Color, Piece, PieceKind, Square};

pub use attacks::{is_king_in_check, is_square_attacked};
pub use legal::{has_any_legal_move, legal_destinations, legal_moves, legal_moves_for_color};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Generates pseudo-legal destinations for `piece` standing on `from`.
///
/// Destinations obey movement and occupancy rules but may leave the mover's
/// own king in check. Castling destinations are only produced when
/// `include_castling` is set; attack detection always passes `false` so that
/// checking a castle never recurses into the opponent's castling.
pub fn pseudo_legal_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    include_castling: bool,
) -> Vec<Square> {
    let mut moves = Vec::with_capacity(28);
    match piece.kind {
        PieceKind::Pawn => pawn_moves(position, from, piece.color, &mut moves),
        PieceKind::Knight => step_moves(position, from, piece.color, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => ray_moves(position, from, piece.color, &BISHOP_DIRECTIONS, &mut moves),
        PieceKind::Rook => ray_moves(position, from, piece.color, &ROOK_DIRECTIONS, &mut moves),
        PieceKind::Queen => {
            ray_moves(position, from, piece.color, &ROOK_DIRECTIONS, &mut moves);
            ray_moves(position, from, piece.color, &BISHOP_DIRECTIONS, &mut moves);
        }
        PieceKind::King => {
            step_moves(position, from, piece.color, &KING_OFFSETS, &mut moves);
            if include_castling {
                castling_moves(position, from, piece.color, &mut moves);
            }
        }
    }
    moves
}

fn pawn_moves(position: &Position, from: Square, color: Color, moves: &mut Vec<Square>) {
    let board = &position.board;
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(0, dir).filter(|&sq| board.is_empty_at(sq)) {
        moves.push(one);
        if from.rank_index() == color.pawn_rank() {
            if let Some(two) = from.offset(0, 2 * dir).filter(|&sq| board.is_empty_at(sq)) {
                moves.push(two);
            }
        }
    }

    // A target left by our own double step sits behind us, never ahead
    let en_passant = position
        .en_passant
        .filter(|target| target.rank_index() as i8 == color.promotion_rank() as i8 - 2 * dir);

    for file_delta in [-1, 1] {
        if let Some(to) = from.offset(file_delta, dir) {
            if board.is_color_at(to, color.opposite()) || en_passant == Some(to) {
                moves.push(to);
            }
        }
    }
}

fn step_moves(
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Square>,
) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            if !position.board.is_color_at(to, color) {
                moves.push(to);
            }
        }
    }
}

fn ray_moves(
    position: &Position,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<Square>,
) {
    for &(df, dr) in directions {
        let mut cursor = from;
        while let Some(to) = cursor.offset(df, dr) {
            match position.board.get(to) {
                None => moves.push(to),
                Some(occupant) => {
                    if occupant.color != color {
                        moves.push(to);
                    }
                    break;
                }
            }
            cursor = to;
        }
    }
}

fn castling_moves(position: &Position, from: Square, color: Color, moves: &mut Vec<Square>) {
    if from != king_home(color) {
        return;
    }
    for side in CastleSide::BOTH {
        if can_castle(position, color, side) {
            if let Some(to) = Square::from_coords(side.king_target_file(), color.back_rank()) {
                moves.push(to);
            }
        }
    }
}

/// Square the king of `color` starts on.
pub const fn king_home(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}

/// Square the castling rook of `color` starts on for `side`.
pub const fn rook_home(color: Color, side: CastleSide) -> Square {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => Square::H1,
        (Color::White, CastleSide::Queenside) => Square::A1,
        (Color::Black, CastleSide::Kingside) => Square::H8,
        (Color::Black, CastleSide::Queenside) => Square::A8,
    }
}

/// Returns true if `color` may castle towards `side` right now.
///
/// Checked in order, stopping at the first failure: the right is still held
/// (with king and rook on their home squares), the king is not in check, every
/// square between king and rook is empty, and no square the king crosses or
/// lands on is attacked.
pub fn can_castle(position: &Position, color: Color, side: CastleSide) -> bool {
    let board = &position.board;
    let rank = color.back_rank();
    let king = Piece::new(PieceKind::King, color);
    let rook = Piece::new(PieceKind::Rook, color);

    if !position.castling.has(color, side)
        || board.get(king_home(color)) != Some(king)
        || board.get(rook_home(color, side)) != Some(rook)
    {
        return false;
    }

    if is_king_in_check(position, color) {
        return false;
    }

    let (between, king_path): (&[u8], &[u8]) = match side {
        CastleSide::Kingside => (&[5, 6], &[5, 6]),
        CastleSide::Queenside => (&[1, 2, 3], &[3, 2]),
    };

    let on_rank = |file: u8| Square::from_coords(file, rank);

    if !between
        .iter()
        .filter_map(|&f| on_rank(f))
        .all(|sq| board.is_empty_at(sq))
    {
        return false;
    }

    king_path
        .iter()
        .filter_map(|&f| on_rank(f))
        .all(|sq| !is_square_attacked(position, sq, color.opposite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(label: &str) -> Square {
        Square::from_algebraic(label).unwrap()
    }

    fn sorted_labels(mut squares: Vec<Square>) -> Vec<String> {
        squares.sort();
        squares.into_iter().map(|s| s.to_algebraic()).collect()
    }

    fn moves_at(position: &Position, label: &str) -> Vec<String> {
        let from = sq(label);
        let piece = position.piece_at(from).unwrap();
        sorted_labels(pseudo_legal_moves(position, from, piece, true))
    }

    #[test]
    fn pawn_single_and_double_push() {
        let pos = Position::startpos();
        assert_eq!(moves_at(&pos, "e2"), vec!["e3", "e4"]);
        assert_eq!(moves_at(&pos, "d7"), vec!["d5", "d6"]);
    }

    #[test]
    fn pawn_double_push_blocked() {
        // Piece directly in front blocks both pushes
        let pos = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(moves_at(&pos, "e2").is_empty());

        // Piece two squares ahead blocks only the double step
        let pos = Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(moves_at(&pos, "e2"), vec!["e3"]);
    }

    #[test]
    fn pawn_no_double_push_off_start_rank() {
        let pos = Position::from_fen("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").unwrap();
        assert_eq!(moves_at(&pos, "e3"), vec!["e4"]);
    }

    #[test]
    fn pawn_captures_and_en_passant() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(moves_at(&pos, "e5"), vec!["d6", "e6"]);

        let pos = Position::from_fen("4k3/8/8/8/8/3p1N2/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(moves_at(&pos, "e2"), vec!["d3", "e3", "e4"]);
    }

    #[test]
    fn own_double_step_target_is_not_capturable() {
        // e3 was left by White's own push; the d2 pawn must not treat it as en passant
        let pos = Position::from_fen("4k3/8/8/8/3pP3/8/3P4/4K3 b - e3 0 1").unwrap();
        assert_eq!(moves_at(&pos, "d2"), vec!["d3"]);
        assert_eq!(moves_at(&pos, "d4"), vec!["d3", "e3"]);
    }

    #[test]
    fn knight_moves_corner_and_friendly_block() {
        let pos = Position::startpos();
        assert_eq!(moves_at(&pos, "g1"), vec!["f3", "h3"]);

        let pos = Position::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
        assert_eq!(moves_at(&pos, "a1"), vec!["c2", "b3"]);
    }

    #[test]
    fn rook_rays_stop_at_pieces() {
        let pos = Position::from_fen("4k3/8/8/8/R2p4/8/P7/4K3 w - - 0 1").unwrap();
        assert_eq!(
            moves_at(&pos, "a4"),
            vec!["a3", "b4", "c4", "d4", "a5", "a6", "a7", "a8"]
        );
    }

    #[test]
    fn bishop_and_queen_rays() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
        assert_eq!(
            moves_at(&pos, "c1"),
            vec!["b2", "d2", "a3", "e3", "f4", "g5", "h6"]
        );

        let pos = Position::from_fen("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(moves_at(&pos, "d4").len(), 27);
    }

    #[test]
    fn king_steps_without_castling() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let from = Square::E1;
        let king = pos.piece_at(from).unwrap();
        let no_castle = sorted_labels(pseudo_legal_moves(&pos, from, king, false));
        assert_eq!(no_castle, vec!["d1", "f1", "d2", "e2", "f2"]);

        let with_castle = sorted_labels(pseudo_legal_moves(&pos, from, king, true));
        assert_eq!(with_castle, vec!["c1", "d1", "f1", "g1", "d2", "e2", "f2"]);
    }

    #[test]
    fn can_castle_requires_empty_between() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(can_castle(&pos, Color::White, CastleSide::Kingside));
        assert!(can_castle(&pos, Color::White, CastleSide::Queenside));
        assert!(can_castle(&pos, Color::Black, CastleSide::Kingside));

        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3KN1R w KQkq - 0 1").unwrap();
        assert!(!can_castle(&pos, Color::White, CastleSide::Kingside));

        // b1 is not on the king's path but still has to be empty
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1").unwrap();
        assert!(!can_castle(&pos, Color::White, CastleSide::Queenside));
    }

    #[test]
    fn can_castle_requires_right() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1").unwrap();
        assert!(!can_castle(&pos, Color::White, CastleSide::Kingside));
        assert!(can_castle(&pos, Color::White, CastleSide::Queenside));
    }

    #[test]
    fn cannot_castle_out_of_or_through_check() {
        // Rook on e5 gives check
        let pos = Position::from_fen("4k3/8/8/4r3/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(!can_castle(&pos, Color::White, CastleSide::Kingside));
        assert!(!can_castle(&pos, Color::White, CastleSide::Queenside));

        // Rook on f5 covers f1
        let pos = Position::from_fen("4k3/8/8/5r2/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(!can_castle(&pos, Color::White, CastleSide::Kingside));
        assert!(can_castle(&pos, Color::White, CastleSide::Queenside));

        // Rook on b5 attacks only b1, which the king never crosses
        let pos = Position::from_fen("4k3/8/8/1r6/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(can_castle(&pos, Color::White, CastleSide::Queenside));

        // Pawn on e2 covers d1 and f1 without giving check
        let pos = Position::from_fen("4k3/8/8/8/8/8/4p3/R3K2R w KQ - 0 1").unwrap();
        assert!(!can_castle(&pos, Color::White, CastleSide::Kingside));
        assert!(!can_castle(&pos, Color::White, CastleSide::Queenside));
    }

    #[test]
    fn can_castle_needs_rook_on_home_square() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w KQ - 0 1").unwrap();
        assert!(!can_castle(&pos, Color::White, CastleSide::Kingside));
        assert!(!can_castle(&pos, Color::White, CastleSide::Queenside));
    }
}
