//! Short algebraic move notation.
//!
//! Pawn pushes render as the destination (`e4`), pawn captures as
//! `<file>x<destination>` (`exd5`) and piece moves as
//! `<letter>[x]<destination>` (`Nf3`, `Bxc6`). Castling is written as the
//! king's move (`Kg1`). Check and mate are not marked, and promotion is
//! implicit since it is always to a queen.
//!
//! When another piece of the same kind and color could also legally reach the
//! destination, the source file, rank, or both are inserted after the letter
//! (`Nbd2`, `R1e2`, `Qh4e1`).

use crate::movegen::legal_destinations;
use crate::Position;
use chess_core::{PieceKind, Square};

/// Renders the move `from` -> `to` as played from `position`.
///
/// `position` must be the state before the move. Returns `None` when `from`
/// is empty.
pub fn move_notation(position: &Position, from: Square, to: Square) -> Option<String> {
    let piece = position.piece_at(from)?;
    let mut text = String::with_capacity(6);

    match piece.kind.notation_letter() {
        None => {
            // A pawn changing file is always capturing, en passant included
            if from.file() != to.file() {
                text.push(from.file().to_char());
                text.push('x');
            }
        }
        Some(letter) => {
            text.push(letter);
            text.push_str(&disambiguation(position, from, to, piece.kind));
            if position.piece_at(to).is_some() {
                text.push('x');
            }
        }
    }

    text.push_str(&to.to_algebraic());
    Some(text)
}

fn disambiguation(position: &Position, from: Square, to: Square, kind: PieceKind) -> String {
    let Some(mover) = position.piece_at(from) else {
        return String::new();
    };

    let rivals: Vec<Square> = position
        .board
        .pieces_of(mover.color)
        .filter(|&(sq, piece)| sq != from && piece.kind == kind)
        .filter(|&(sq, _)| legal_destinations(position, sq).contains(&to))
        .map(|(sq, _)| sq)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|sq| sq.file() != from.file()) {
        return from.file().to_char().to_string();
    }
    if rivals.iter().all(|sq| sq.rank() != from.rank()) {
        return from.rank().to_char().to_string();
    }
    from.to_algebraic()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notation(fen: &str, from: &str, to: &str) -> String {
        let position = Position::from_fen(fen).unwrap();
        move_notation(
            &position,
            Square::from_algebraic(from).unwrap(),
            Square::from_algebraic(to).unwrap(),
        )
        .unwrap()
    }

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn pawn_push() {
        assert_eq!(notation(START, "e2", "e4"), "e4");
    }

    #[test]
    fn knight_move() {
        assert_eq!(notation(START, "g1", "f3"), "Nf3");
    }

    #[test]
    fn pawn_capture() {
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
        assert_eq!(notation(fen, "e4", "d5"), "exd5");
    }

    #[test]
    fn en_passant_reads_as_capture() {
        assert_eq!(notation("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5", "d6"), "exd6");
    }

    #[test]
    fn piece_capture() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
        assert_eq!(notation(fen, "b5", "c6"), "Bxc6");
    }

    #[test]
    fn castling_is_a_king_move() {
        let fen = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";
        assert_eq!(notation(fen, "e1", "g1"), "Kg1");
        assert_eq!(notation(fen, "e1", "c1"), "Kc1");
    }

    #[test]
    fn promotion_has_no_suffix() {
        assert_eq!(notation("8/P7/8/8/8/8/8/4K1k1 w - - 0 1", "a7", "a8"), "a8");
        assert_eq!(notation("1r6/P7/8/8/8/8/8/4K1k1 w - - 0 1", "a7", "b8"), "axb8");
    }

    #[test]
    fn check_is_not_marked() {
        assert_eq!(notation("6k1/5ppp/8/8/8/8/8/R3K3 w Q - 0 1", "a1", "a8"), "Ra8");
    }

    #[test]
    fn knights_disambiguated_by_file() {
        let fen = "7k/8/8/8/8/8/8/1N1K1N2 w - - 0 1";
        assert_eq!(notation(fen, "b1", "d2"), "Nbd2");
        assert_eq!(notation(fen, "f1", "d2"), "Nfd2");
    }

    #[test]
    fn rooks_disambiguated_by_rank() {
        let fen = "7k/8/8/8/4R3/8/8/4R2K w - - 0 1";
        assert_eq!(notation(fen, "e1", "e2"), "R1e2");
        assert_eq!(notation(fen, "e4", "e2"), "R4e2");
    }

    #[test]
    fn queens_need_full_square() {
        // Queens on h4, e4 and h1 all reach e1
        let fen = "1k6/8/8/8/4Q2Q/8/8/2K4Q w - - 0 1";
        assert_eq!(notation(fen, "h4", "e1"), "Qh4e1");
    }

    #[test]
    fn pinned_rival_needs_no_disambiguation() {
        // The c3 knight is pinned by the a5 bishop, so only the g1 knight reaches e2
        let fen = "4k3/8/8/b7/8/2N5/8/4K1N1 w - - 0 1";
        assert_eq!(notation(fen, "g1", "e2"), "Ne2");
    }

    #[test]
    fn empty_source() {
        let position = Position::startpos();
        let e4 = Square::from_algebraic("e4").unwrap();
        assert!(move_notation(&position, e4, Square::E1).is_none());
    }
}
