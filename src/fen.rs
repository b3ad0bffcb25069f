use std::{
    fmt::{self, Display, Formatter},
    iter::{once, repeat},
};

use crate::chess_match::Match;

/// FEN export of a match. Castling and en passant are not part of these rules, so those fields
/// are always `-`.
#[derive(Debug, Clone, Copy)]
pub struct Fen<'a>(pub &'a Match);

impl Display for Fen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let grid = self.0.piece_grid();
        for (row, first) in (0..grid.rows()).zip(once(true).chain(repeat(false))) {
            if !first {
                write!(f, "/")?;
            }
            let mut pieces = grid.row(row).iter().peekable();
            while let Some(piece) = pieces.next() {
                if let Some(piece) = piece {
                    write!(f, "{}", piece.fen())?;
                } else {
                    let mut count = 1;
                    while pieces.peek().is_some_and(|piece| piece.is_none()) {
                        pieces.next();
                        count += 1;
                    }
                    write!(f, "{count}")?;
                }
            }
        }
        write!(f, " {}", self.0.current_player().lowercase())?;
        write!(f, " - - 0 {}", self.0.turn().div_ceil(2))?;
        Ok(())
    }
}
