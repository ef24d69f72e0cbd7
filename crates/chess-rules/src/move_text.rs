//! Resolving free-form move text onto a legal move.
//!
//! Move suggestions arrive as loosely formatted text: `12. Nf3`, `...e5`,
//! `O-O`, `e7e8q`, `Qxf7#`. [`resolve_move_text`] strips the decoration and
//! matches what is left against the legal moves of the side to move. Input
//! that fits more than one legal move is reported as ambiguous, never guessed.

use crate::movegen::{king_home, legal_moves, legal_moves_for_color};
use crate::Position;
use chess_core::{CastleSide, File, PieceKind, Rank, Square};
use thiserror::Error;
use tracing::trace;

/// Why a piece of move text could not be turned into a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveTextError {
    #[error("empty move text")]
    Empty,
    #[error("unrecognized move text: '{0}'")]
    Unrecognized(String),
    #[error("no legal move matches '{0}'")]
    NoMatch(String),
    #[error("'{text}' is ambiguous between {}", .candidates.join(", "))]
    Ambiguous {
        text: String,
        /// Matching moves in coordinate form.
        candidates: Vec<String>,
    },
}

/// Maps `text` onto a single legal `(from, to)` pair for the side to move.
pub fn resolve_move_text(position: &Position, text: &str) -> Result<(Square, Square), MoveTextError> {
    let cleaned = strip_decorations(text);
    if cleaned.is_empty() {
        return Err(MoveTextError::Empty);
    }

    let resolved = match castle_token(cleaned) {
        Some(side) => resolve_castle(position, cleaned, side),
        None => strip_promotion(cleaned).and_then(|body| match parse_coordinates(body) {
            Some((from, to)) => resolve_coordinates(position, cleaned, from, to),
            None => resolve_algebraic(position, cleaned, body),
        }),
    };

    match &resolved {
        Ok((from, to)) => trace!(text, %from, %to, "resolved move text"),
        Err(err) => trace!(text, %err, "move text did not resolve"),
    }
    resolved
}

/// Drops move numbers, ellipses, surrounding whitespace and trailing
/// annotation marks.
fn strip_decorations(text: &str) -> &str {
    let mut s = text.trim();

    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && s[digits..].starts_with('.') {
        s = &s[digits..];
    }
    s = s.trim_start_matches(&['.', '…'][..]).trim_start();

    s.trim_end_matches(&['+', '#', '!', '?'][..]).trim_end()
}

fn castle_token(text: &str) -> Option<CastleSide> {
    let normalized: String = text
        .chars()
        .map(|c| match c {
            '0' | 'o' => 'O',
            other => other,
        })
        .collect();
    match normalized.as_str() {
        "O-O" => Some(CastleSide::Kingside),
        "O-O-O" => Some(CastleSide::Queenside),
        _ => None,
    }
}

/// Removes a queen promotion suffix (`=Q`, `Q`, `q`). Any other promotion
/// piece is refused since only queen promotion exists.
fn strip_promotion(text: &str) -> Result<&str, MoveTextError> {
    let body = text.strip_suffix(&['=', '/'][..]).unwrap_or(text);
    let Some(last) = body.chars().last() else {
        return Err(MoveTextError::Unrecognized(text.to_string()));
    };

    let before_last = body[..body.len() - last.len_utf8()].trim_end_matches(&['=', '/'][..]);
    let follows_rank = before_last
        .chars()
        .last()
        .is_some_and(|c| Rank::from_char(c).is_some());
    if !follows_rank || last.is_ascii_digit() {
        return Ok(body);
    }

    match last {
        'Q' | 'q' => Ok(before_last),
        'N' | 'n' | 'B' | 'b' | 'R' | 'r' => Err(MoveTextError::NoMatch(text.to_string())),
        _ => Err(MoveTextError::Unrecognized(text.to_string())),
    }
}

/// `e2e4`, `e2-e4` or `e2xe4`.
fn parse_coordinates(text: &str) -> Option<(Square, Square)> {
    let compact: String = text.chars().filter(|&c| c != '-' && c != 'x').collect();
    if compact.len() != 4 || !compact.is_ascii() {
        return None;
    }
    let from = Square::from_algebraic(&compact[..2])?;
    let to = Square::from_algebraic(&compact[2..])?;
    Some((from, to))
}

fn resolve_castle(
    position: &Position,
    text: &str,
    side: CastleSide,
) -> Result<(Square, Square), MoveTextError> {
    let color = position.side_to_move;
    let from = king_home(color);
    let to = Square::from_coords(side.king_target_file(), color.back_rank())
        .ok_or_else(|| MoveTextError::Unrecognized(text.to_string()))?;
    resolve_coordinates(position, text, from, to)
}

fn resolve_coordinates(
    position: &Position,
    text: &str,
    from: Square,
    to: Square,
) -> Result<(Square, Square), MoveTextError> {
    if legal_moves(position, from).contains(&to) {
        Ok((from, to))
    } else {
        Err(MoveTextError::NoMatch(text.to_string()))
    }
}

/// Parsed pieces of `[letter][file][rank][x]<square>`.
#[derive(Debug)]
struct AlgebraicMove {
    kind: PieceKind,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    to: Square,
}

fn parse_algebraic(text: &str) -> Option<AlgebraicMove> {
    let mut chars: Vec<char> = text.chars().collect();

    let kind = match chars.first().copied() {
        Some(c) if c.is_ascii_uppercase() => {
            chars.remove(0);
            PieceKind::from_notation_letter(c)?
        }
        _ => PieceKind::Pawn,
    };

    if chars.len() < 2 {
        return None;
    }
    let to_rank = Rank::from_char(chars.pop()?)?;
    let to_file = File::from_char(chars.pop()?)?;

    if chars.last() == Some(&'x') {
        chars.pop();
    }

    let (from_file, from_rank) = match chars.as_slice() {
        [] => (None, None),
        [c] => match (File::from_char(*c), Rank::from_char(*c)) {
            (Some(f), _) => (Some(f), None),
            (None, Some(r)) => (None, Some(r)),
            (None, None) => return None,
        },
        [f, r] => (Some(File::from_char(*f)?), Some(Rank::from_char(*r)?)),
        _ => return None,
    };

    Some(AlgebraicMove {
        kind,
        from_file,
        from_rank,
        to: Square::new(to_file, to_rank),
    })
}

fn resolve_algebraic(
    position: &Position,
    text: &str,
    body: &str,
) -> Result<(Square, Square), MoveTextError> {
    let parsed =
        parse_algebraic(body).ok_or_else(|| MoveTextError::Unrecognized(text.to_string()))?;

    let candidates: Vec<(Square, Square)> =
        legal_moves_for_color(position, position.side_to_move)
            .into_iter()
            .filter(|&(from, to)| {
                to == parsed.to
                    && position.piece_at(from).map(|p| p.kind) == Some(parsed.kind)
                    && parsed.from_file.map_or(true, |f| from.file() == f)
                    && parsed.from_rank.map_or(true, |r| from.rank() == r)
                    // A bare pawn destination is a push, never a capture
                    && (parsed.kind != PieceKind::Pawn
                        || parsed.from_file.is_some()
                        || from.file() == to.file())
            })
            .collect();

    match candidates.as_slice() {
        [] => Err(MoveTextError::NoMatch(text.to_string())),
        [single] => Ok(*single),
        many => Err(MoveTextError::Ambiguous {
            text: text.to_string(),
            candidates: many.iter().map(|(f, t)| format!("{}{}", f, t)).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(label: &str) -> Square {
        Square::from_algebraic(label).unwrap()
    }

    fn resolve(fen: &str, text: &str) -> Result<(Square, Square), MoveTextError> {
        resolve_move_text(&Position::from_fen(fen).unwrap(), text)
    }

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn plain_notation() {
        assert_eq!(resolve(START, "e4"), Ok((sq("e2"), sq("e4"))));
        assert_eq!(resolve(START, "Nf3"), Ok((sq("g1"), sq("f3"))));
    }

    #[test]
    fn move_numbers_and_ellipses() {
        assert_eq!(resolve(START, "1. e4"), Ok((sq("e2"), sq("e4"))));
        assert_eq!(resolve(START, "1.e4"), Ok((sq("e2"), sq("e4"))));
        assert_eq!(resolve(START, "  12.Nc3  "), Ok((sq("b1"), sq("c3"))));

        let black = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
        assert_eq!(resolve(black, "1...e5"), Ok((sq("e7"), sq("e5"))));
        assert_eq!(resolve(black, "... Nf6"), Ok((sq("g8"), sq("f6"))));
        assert_eq!(resolve(black, "…c5"), Ok((sq("c7"), sq("c5"))));
    }

    #[test]
    fn annotation_suffixes() {
        let fen = "6k1/5ppp/8/8/8/8/8/R3K3 w Q - 0 1";
        assert_eq!(resolve(fen, "Ra8#"), Ok((sq("a1"), sq("a8"))));
        assert_eq!(resolve(fen, "Ra8+!?"), Ok((sq("a1"), sq("a8"))));
    }

    #[test]
    fn coordinate_forms() {
        assert_eq!(resolve(START, "e2e4"), Ok((sq("e2"), sq("e4"))));
        assert_eq!(resolve(START, "e2-e4"), Ok((sq("e2"), sq("e4"))));
        assert_eq!(resolve(START, "g1f3"), Ok((sq("g1"), sq("f3"))));
        assert_eq!(
            resolve(START, "e2e5"),
            Err(MoveTextError::NoMatch("e2e5".to_string()))
        );
    }

    #[test]
    fn castling_tokens() {
        let fen = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";
        assert_eq!(resolve(fen, "O-O"), Ok((Square::E1, Square::G1)));
        assert_eq!(resolve(fen, "0-0-0"), Ok((Square::E1, Square::C1)));
        assert_eq!(resolve(fen, "Kg1"), Ok((Square::E1, Square::G1)));

        let black = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1";
        assert_eq!(resolve(black, "O-O+"), Ok((Square::E8, Square::G8)));

        let no_rights = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 1";
        assert!(matches!(resolve(no_rights, "O-O"), Err(MoveTextError::NoMatch(_))));
    }

    #[test]
    fn captures() {
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
        assert_eq!(resolve(fen, "exd5"), Ok((sq("e4"), sq("d5"))));
        assert_eq!(resolve(fen, "e4xd5"), Ok((sq("e4"), sq("d5"))));
        // Bare destination of a capture is not a pawn push
        assert!(matches!(resolve(fen, "d5"), Err(MoveTextError::NoMatch(_))));
    }

    #[test]
    fn promotion_suffixes() {
        let fen = "8/P7/8/8/8/8/8/4K1k1 w - - 0 1";
        for text in ["a8", "a8=Q", "a8Q", "a7a8q", "a7a8=Q", "a8=Q+"] {
            assert_eq!(resolve(fen, text), Ok((sq("a7"), sq("a8"))), "{}", text);
        }
        assert!(matches!(resolve(fen, "a8=N"), Err(MoveTextError::NoMatch(_))));
        assert!(matches!(resolve(fen, "a7a8r"), Err(MoveTextError::NoMatch(_))));
        assert!(matches!(resolve(fen, "a7a8b"), Err(MoveTextError::NoMatch(_))));
        assert!(matches!(resolve(fen, "a7a8n"), Err(MoveTextError::NoMatch(_))));
    }

    #[test]
    fn ambiguity_is_reported() {
        let fen = "7k/8/8/8/8/8/8/1N1K1N2 w - - 0 1";
        match resolve(fen, "Nd2") {
            Err(MoveTextError::Ambiguous { candidates, .. }) => {
                assert_eq!(candidates, vec!["b1d2".to_string(), "f1d2".to_string()]);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
        assert_eq!(resolve(fen, "Nbd2"), Ok((sq("b1"), sq("d2"))));
        assert_eq!(resolve(fen, "Nfd2"), Ok((sq("f1"), sq("d2"))));
        assert_eq!(resolve(fen, "Nf1d2"), Ok((sq("f1"), sq("d2"))));
    }

    #[test]
    fn rank_disambiguation() {
        let fen = "7k/8/8/8/4R3/8/8/4R2K w - - 0 1";
        assert_eq!(resolve(fen, "R1e2"), Ok((sq("e1"), sq("e2"))));
        assert_eq!(resolve(fen, "R4xe2"), Ok((sq("e4"), sq("e2"))));
    }

    #[test]
    fn garbage() {
        assert_eq!(resolve(START, ""), Err(MoveTextError::Empty));
        assert_eq!(resolve(START, "  1. "), Err(MoveTextError::Empty));
        assert!(matches!(resolve(START, "hello"), Err(MoveTextError::Unrecognized(_))));
        assert!(matches!(resolve(START, "Zf3"), Err(MoveTextError::Unrecognized(_))));
        assert!(matches!(resolve(START, "Ke4"), Err(MoveTextError::NoMatch(_))));
    }

    #[test]
    fn error_messages() {
        let err = MoveTextError::Ambiguous {
            text: "Nd2".to_string(),
            candidates: vec!["b1d2".to_string(), "f1d2".to_string()],
        };
        assert_eq!(err.to_string(), "'Nd2' is ambiguous between b1d2, f1d2");
        assert_eq!(MoveTextError::Empty.to_string(), "empty move text");
    }
}
