//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a fixed depth. The
//! counts can be compared against published values as long as no promotion
//! occurs within the searched depth, since every promotion here is to a queen.

use super::legal_moves_for_color;
use crate::apply::apply_move;
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves_for_color(position, position.side_to_move);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .filter_map(|&(from, to)| apply_move(position, from, to))
        .map(|outcome| perft(&outcome.position, depth - 1))
        .sum()
}

/// Perft with divide: node count below each root move, keyed by coordinate
/// text such as `e2e4`, sorted by that text.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let moves = legal_moves_for_color(position, position.side_to_move);
    let mut results = Vec::with_capacity(moves.len());

    for (from, to) in moves {
        let Some(outcome) = apply_move(position, from, to) else {
            continue;
        };
        let nodes = if depth > 1 {
            perft(&outcome.position, depth - 1)
        } else {
            1
        };
        results.push((format!("{}{}", from, to), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
