//! Material count.

use crate::Board;
use chess_core::Color;
use serde::{Deserialize, Serialize};

/// Total material per side: pawn 1, knight 3, bishop 3, rook 5, queen 9.
/// Kings are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Material {
    pub white: u32,
    pub black: u32,
}

impl Material {
    pub fn of(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// White's total minus Black's.
    pub fn difference(&self) -> i64 {
        i64::from(self.white) - i64::from(self.black)
    }
}

pub fn material_balance(board: &Board) -> Material {
    board
        .occupied()
        .fold(Material::default(), |mut total, (_, piece)| {
            let value = piece.kind.material_value();
            match piece.color {
                Color::White => total.white += value,
                Color::Black => total.black += value,
            }
            total
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn starting_material() {
        let material = material_balance(&Board::standard());
        assert_eq!(material, Material { white: 39, black: 39 });
        assert_eq!(material.difference(), 0);
    }

    #[test]
    fn kings_only() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(material_balance(&position.board), Material::default());
    }

    #[test]
    fn uneven_material() {
        let position = Position::from_fen("4k3/pp6/8/8/8/8/8/R2QK3 w - - 0 1").unwrap();
        let material = material_balance(&position.board);
        assert_eq!(material.of(Color::White), 14);
        assert_eq!(material.of(Color::Black), 2);
        assert_eq!(material.difference(), 12);
    }

    #[test]
    fn serializes_as_object() {
        let json = serde_json::to_string(&Material { white: 10, black: 7 }).unwrap();
        assert_eq!(json, r#"{"white":10,"black":7}"#);
    }
}
