//! The board store: an 8x8 grid of optional pieces.
//!
//! The board performs no validation. It is a plain container that the rest of
//! the engine reads and writes; all chess knowledge lives elsewhere.

use chess_core::{Color, Fen, Piece, PieceKind, Square};
use std::fmt;

/// Occupants of the 64 squares, indexed by [`Square::index`].
///
/// `Board` is `Copy`, so simulating a move is a matter of copying the board and
/// mutating the copy.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// A board with no pieces on it.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// The standard starting arrangement.
    pub fn standard() -> Self {
        Board::from_placement(Fen::default().placement)
    }

    pub const fn from_placement(squares: [Option<Piece>; 64]) -> Self {
        Board { squares }
    }

    pub const fn placement(&self) -> [Option<Piece>; 64] {
        self.squares
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index() as usize] = piece;
    }

    /// Empties a square and returns what stood there.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize].take()
    }

    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Returns true if `sq` holds a piece of `color`.
    #[inline]
    pub fn is_color_at(&self, sq: Square, color: Color) -> bool {
        matches!(self.get(sq), Some(p) if p.color == color)
    }

    /// Linear scan for the king of `color`.
    ///
    /// `None` when the king is missing; callers treat that as "not in check".
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.occupied()
            .find(|&(_, piece)| piece == king)
            .map(|(sq, _)| sq)
    }

    /// Iterates occupied squares from a1 to h8.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Iterates the pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// Draws the board from White's side, rank 8 at the top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = Square::from_coords(file, rank)
                    .and_then(|sq| self.get(sq))
                    .map_or('.', |p| p.to_fen_char());
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board(")?;
        writeln!(f, "{}", self)?;
        write!(f, ")")
    }
}
