//! Core value types for the chess rules engine.
//!
//! This crate provides the plain data shared by the engine and its callers:
//! - [`Color`], [`PieceKind`] and [`Piece`] for occupants of the board
//! - [`Square`], [`File`], and [`Rank`] for board coordinates and labels
//! - [`CastlingRights`] and [`CastleSide`] for castling bookkeeping
//! - [`MoveRecord`] for committed moves in a game history
//! - [`Fen`] for parsing and rendering Forsyth-Edwards Notation

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::{CastleSide, CastlingRights};
pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::MoveRecord;
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square};
