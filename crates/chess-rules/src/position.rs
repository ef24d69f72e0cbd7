//! Chess position: the board plus the state that travels with it.

use chess_core::{CastlingRights, Color, Fen, FenError, Piece, Square};

use crate::Board;

/// Complete position state.
///
/// Castling rights and the en-passant target are kept denormalized here; the
/// engine never re-derives them from history when checking legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    pub castling: CastlingRights,

    /// Square skipped by the previous move's pawn double-step, if capturable.
    pub en_passant: Option<Square>,

    /// Half-moves since the last pawn move or capture.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates an empty position with White to move.
    pub fn empty() -> Self {
        Position {
            board: Board::empty(),
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen_record(&Fen::default())
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_fen_record(&Fen::parse(fen)?))
    }

    pub fn from_fen_record(fen: &Fen) -> Self {
        Position {
            board: Board::from_placement(fen.placement),
            side_to_move: fen.side_to_move,
            castling: fen.castling,
            en_passant: fen.en_passant,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
        }
    }

    pub fn to_fen_record(&self) -> Fen {
        Fen {
            placement: self.board.placement(),
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        self.to_fen_record().to_string()
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
