//! JSON documents printed by `--json` mode.

use chess_core::{Color, MoveRecord};
use chess_rules::{Game, GameState, Material};
use serde::Serialize;
use std::io::Write;

/// Snapshot of a game: where it stands and how it got there.
#[derive(Debug, Serialize)]
pub struct GameSummary<'a> {
    pub fen: String,
    pub side_to_move: Color,
    pub state: GameState,
    pub in_check: bool,
    pub material: Material,
    pub history: &'a [MoveRecord],
}

impl<'a> GameSummary<'a> {
    pub fn of(game: &'a Game) -> Self {
        GameSummary {
            fen: game.fen(),
            side_to_move: game.side_to_move(),
            state: game.state(),
            in_check: game.is_king_in_check(game.side_to_move()),
            material: game.material_balance(),
            history: game.history(),
        }
    }
}

/// Legal moves of one side, in notation, sorted.
#[derive(Debug, Serialize)]
pub struct MoveListing {
    pub color: Color,
    pub moves: Vec<String>,
}

/// Result of a perft run.
#[derive(Debug, Serialize)]
pub struct PerftReport {
    pub fen: String,
    pub depth: u32,
    pub nodes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divide: Option<Vec<DivideEntry>>,
}

#[derive(Debug, Serialize)]
pub struct DivideEntry {
    #[serde(rename = "move")]
    pub mov: String,
    pub nodes: u64,
}

/// Writes `value` as one line of JSON.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
