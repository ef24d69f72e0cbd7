//! Game management: the live position, its history, and its state.
//!
//! [`Game`] is the surface external collaborators talk to. It validates every
//! move before touching anything, so a rejected move leaves the game exactly
//! as it was. History is append-only while playing; [`Game::undo`] rebuilds
//! the position by replaying the remaining moves from the start.

use crate::apply::apply_move;
use crate::material::{material_balance, Material};
use crate::move_text::{resolve_move_text, MoveTextError};
use crate::movegen::{self, legal_moves_for_color};
use crate::notation::move_notation;
use crate::rules::{classify, GameState};
use crate::Position;
use chess_core::{CastleSide, Color, FenError, MoveRecord, Square};
use thiserror::Error;
use tracing::debug;

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no piece on {0}")]
    NoPieceAtSource(Square),
    #[error("piece on {square} belongs to {found}, but it is {to_move}'s turn")]
    WrongSideToMove {
        square: Square,
        found: Color,
        to_move: Color,
    },
    #[error("illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },
    #[error("game is over ({0})")]
    GameOver(GameState),
    #[error(transparent)]
    InvalidFen(#[from] FenError),
    #[error(transparent)]
    MoveText(#[from] MoveTextError),
}

/// A chess game with history tracking.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    /// Position the history is replayed from.
    start: Position,
    history: Vec<MoveRecord>,
    state: GameState,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Creates a game from a custom starting position.
    ///
    /// The position is classified right away, so a position that is already
    /// mate starts out terminal.
    pub fn from_position(position: Position) -> Self {
        Game {
            position,
            start: position,
            history: Vec::new(),
            state: classify(&position),
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Restores the standard starting position and clears the history.
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("game reset");
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn start_position(&self) -> &Position {
        &self.start
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Committed moves, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Number of half-moves played since the start position.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the current position as a FEN string.
    pub fn fen(&self) -> String {
        self.position.to_fen()
    }

    /// Legal destinations for the piece on `from`; empty for an empty square
    /// or a piece of the side not to move.
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        movegen::legal_moves(&self.position, from)
    }

    /// Every legal move of `color` in notation, sorted lexicographically.
    ///
    /// `color` need not be the side to move; the answer is then what that
    /// side could play if it were its turn.
    pub fn legal_moves_for_color(&self, color: Color) -> Vec<String> {
        let mut moves: Vec<String> = legal_moves_for_color(&self.position, color)
            .into_iter()
            .filter_map(|(from, to)| move_notation(&self.position, from, to))
            .collect();
        moves.sort();
        moves
    }

    pub fn is_king_in_check(&self, color: Color) -> bool {
        movegen::is_king_in_check(&self.position, color)
    }

    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        movegen::can_castle(&self.position, color, side)
    }

    pub fn material_balance(&self) -> Material {
        material_balance(&self.position.board)
    }

    /// Plays `from` -> `to` for the side to move.
    ///
    /// Errors are checked in order: finished game, empty source, wrong side,
    /// illegal destination. Nothing changes unless the move is committed.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, GameError> {
        self.commit(from, to).map_err(|err| {
            debug!(%from, %to, %err, "move rejected");
            err
        })
    }

    /// Resolves free-form move text (see [`resolve_move_text`]) and plays it.
    pub fn make_move_text(&mut self, text: &str) -> Result<MoveRecord, GameError> {
        if self.state.is_terminal() {
            return Err(GameError::GameOver(self.state));
        }
        let (from, to) = resolve_move_text(&self.position, text).map_err(|err| {
            debug!(text, %err, "move text rejected");
            err
        })?;
        self.make_move(from, to)
    }

    /// Takes back the last move, returning it.
    ///
    /// The position is rebuilt by replaying the remaining history from the
    /// start position, so castling rights and the en-passant target follow
    /// from the moves played rather than from where the pieces stand.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let undone = self.history.pop()?;

        let mut position = self.start;
        for record in &self.history {
            match apply_move(&position, record.from, record.to) {
                Some(outcome) => position = outcome.position,
                None => break,
            }
        }
        self.position = position;
        self.state = classify(&self.position);

        debug!(notation = %undone.notation, state = %self.state, "move undone");
        Some(undone)
    }

    fn commit(&mut self, from: Square, to: Square) -> Result<MoveRecord, GameError> {
        if self.state.is_terminal() {
            return Err(GameError::GameOver(self.state));
        }

        let piece = self
            .position
            .piece_at(from)
            .ok_or(GameError::NoPieceAtSource(from))?;
        let to_move = self.position.side_to_move;
        if piece.color != to_move {
            return Err(GameError::WrongSideToMove {
                square: from,
                found: piece.color,
                to_move,
            });
        }
        if !self.legal_moves(from).contains(&to) {
            return Err(GameError::IllegalMove { from, to });
        }

        let notation =
            move_notation(&self.position, from, to).ok_or(GameError::NoPieceAtSource(from))?;
        let outcome =
            apply_move(&self.position, from, to).ok_or(GameError::NoPieceAtSource(from))?;

        let record = MoveRecord {
            from,
            to,
            piece: outcome.piece,
            captured: outcome.captured,
            en_passant_captured: outcome.en_passant_captured,
            notation,
            castle: outcome.castle,
            promotion: outcome.promotion,
            en_passant_before: self.position.en_passant,
            castling_before: self.position.castling,
        };

        self.position = outcome.position;
        self.history.push(record.clone());

        let previous = self.state;
        self.state = classify(&self.position);

        debug!(%from, %to, notation = %record.notation, "move committed");
        if self.state != previous {
            debug!(%previous, current = %self.state, "game state changed");
        }

        Ok(record)
    }
}
