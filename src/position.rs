use std::fmt::{self, Display, Formatter};

use crate::color::Color;

/// Zero-based grid coordinate. Row 0 is the top of the board as printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: u8,
    pub column: u8,
}
impl Position {
    pub fn new(row: u8, column: u8) -> Self {
        Position { row, column }
    }
    /// Returns `None` only when the offset would go below zero. The upper bound depends on the
    /// board and is checked by `Board::position_exists`.
    pub fn offset(self, movement: Vector) -> Option<Self> {
        Some(Position {
            row: self.row.checked_add_signed(movement.row)?,
            column: self.column.checked_add_signed(movement.column)?,
        })
    }
}
impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)?;
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub row: i8,
    pub column: i8,
}
impl Vector {
    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector { row: -2, column: -1 },
        Vector { row: -2, column: 1 },
        Vector { row: 2, column: -1 },
        Vector { row: 2, column: 1 },
        Vector { row: -1, column: -2 },
        Vector { row: -1, column: 2 },
        Vector { row: 1, column: -2 },
        Vector { row: 1, column: 2 },
    ];
    pub const KING_MOVES: [Self; 8] = [
        Vector { row: -1, column: -1 },
        Vector { row: -1, column: 0 },
        Vector { row: -1, column: 1 },
        Vector { row: 0, column: -1 },
        Vector { row: 0, column: 1 },
        Vector { row: 1, column: -1 },
        Vector { row: 1, column: 0 },
        Vector { row: 1, column: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { row: -1, column: 0 },
        Vector { row: 1, column: 0 },
        Vector { row: 0, column: -1 },
        Vector { row: 0, column: 1 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { row: -1, column: -1 },
        Vector { row: -1, column: 1 },
        Vector { row: 1, column: -1 },
        Vector { row: 1, column: 1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = Vector::KING_MOVES;

    pub fn pawn_single_move(color: Color) -> Self {
        Vector {
            row: color.pawn_direction(),
            column: 0,
        }
    }
    pub fn pawn_attacks(color: Color) -> [Self; 2] {
        [-1, 1].map(|column| Vector {
            row: color.pawn_direction(),
            column,
        })
    }
}
