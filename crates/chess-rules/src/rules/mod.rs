//! Game-state classification.
//!
//! The state of a game is never stored independently: it is derived from the
//! position (board, side to move, halfmove clock) after every committed move.

use crate::movegen::{has_any_legal_move, is_king_in_check};
use crate::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-moves without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

/// Status of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Playing,
    Check,
    Checkmate,
    Stalemate,
    /// Fifty-move rule.
    Draw,
}

impl GameState {
    /// Returns true if no further moves may be made.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameState::Checkmate | GameState::Stalemate | GameState::Draw
        )
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameState::Playing => "playing",
            GameState::Check => "check",
            GameState::Checkmate => "checkmate",
            GameState::Stalemate => "stalemate",
            GameState::Draw => "draw",
        };
        f.write_str(s)
    }
}

/// Classifies `position` from the point of view of its side to move.
///
/// Having no legal move outranks the halfmove clock: a mate delivered on the
/// hundredth half-move is still mate.
pub fn classify(position: &Position) -> GameState {
    let side = position.side_to_move;
    let in_check = is_king_in_check(position, side);
    let has_moves = has_any_legal_move(position, side);

    match (in_check, has_moves) {
        (true, false) => GameState::Checkmate,
        (false, false) => GameState::Stalemate,
        _ if position.halfmove_clock >= FIFTY_MOVE_LIMIT => GameState::Draw,
        (true, true) => GameState::Check,
        (false, true) => GameState::Playing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_fen(fen: &str) -> GameState {
        classify(&Position::from_fen(fen).unwrap())
    }

    #[test]
    fn startpos_is_playing() {
        assert_eq!(classify(&Position::startpos()), GameState::Playing);
    }

    #[test]
    fn check_with_escape() {
        assert_eq!(
            classify_fen("4k3/8/8/8/8/8/8/4RK2 b - - 0 1"),
            GameState::Check
        );
    }

    #[test]
    fn back_rank_mate() {
        assert_eq!(
            classify_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"),
            GameState::Checkmate
        );
    }

    #[test]
    fn lone_king_mate_and_stalemate() {
        // Queen on g7 protected by the king on f6
        assert_eq!(
            classify_fen("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1"),
            GameState::Checkmate
        );
        // Same idea with the queen on f7: no check, no moves
        assert_eq!(
            classify_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"),
            GameState::Stalemate
        );
    }

    #[test]
    fn fifty_move_threshold() {
        assert_eq!(
            classify_fen("4k3/8/8/8/8/8/8/R3K3 b - - 99 80"),
            GameState::Playing
        );
        assert_eq!(
            classify_fen("4k3/8/8/8/8/8/8/R3K3 b - - 100 80"),
            GameState::Draw
        );
        // Check does not prevent the draw
        assert_eq!(
            classify_fen("4k3/8/8/8/8/8/8/4RK2 b - - 100 80"),
            GameState::Draw
        );
    }

    #[test]
    fn mate_outranks_fifty_moves() {
        assert_eq!(
            classify_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 120 90"),
            GameState::Checkmate
        );
    }

    #[test]
    fn terminal_states() {
        assert!(!GameState::Playing.is_terminal());
        assert!(!GameState::Check.is_terminal());
        assert!(GameState::Checkmate.is_terminal());
        assert!(GameState::Stalemate.is_terminal());
        assert!(GameState::Draw.is_terminal());
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&GameState::Checkmate).unwrap();
        assert_eq!(json, "\"checkmate\"");
        assert_eq!(GameState::Stalemate.to_string(), "stalemate");
    }
}
