//! Chess rules engine on a mailbox board.
//!
//! This crate provides:
//! - [`Board`] - the 8x8 store of optional pieces
//! - [`Position`] - board plus side to move, castling rights, en-passant
//!   target and clocks
//! - [`Game`] - game management with validation, history and undo
//! - Move generation, attack detection and legality filtering ([`movegen`])
//! - [`apply_move`] - the pure successor function used both for committing
//!   moves and for checking their legality
//! - Game-state classification, notation, move-text resolution and material
//!
//! # Architecture
//!
//! `Board` and `Position` are `Copy`. A candidate move is tested by applying it
//! to a copy of the position and asking whether the mover's king is attacked
//! in the copy; the live position is never mutated speculatively.
//!
//! # Example
//!
//! ```
//! use chess_rules::{Game, GameState};
//! use chess_core::Color;
//!
//! let mut game = Game::new();
//! game.make_move_text("e4").unwrap();
//! game.make_move_text("1... e5").unwrap();
//! assert_eq!(game.state(), GameState::Playing);
//! assert_eq!(game.legal_moves_for_color(Color::White).len(), 29);
//! println!("Position after 1.e4 e5: {}", game.fen());
//! ```

mod apply;
mod board;
mod game;
mod material;
mod move_text;
pub mod movegen;
mod notation;
mod position;
pub mod rules;

pub use apply::{apply_move, MoveOutcome};
pub use board::Board;
pub use game::{Game, GameError};
pub use material::{material_balance, Material};
pub use move_text::{resolve_move_text, MoveTextError};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    can_castle, has_any_legal_move, is_king_in_check, is_square_attacked, legal_destinations,
    legal_moves, legal_moves_for_color, pseudo_legal_moves,
};
pub use notation::move_notation;
pub use position::Position;
pub use rules::{classify, GameState};
