use std::fmt::{self, Display, Formatter, Write};

use crate::{
    chess_match::Match, color::Color, grid::Grid, piece::ColoredPieceKind, position::Position,
};

const WHITE_PIECE: &str = "\x1b[37m";
const BLACK_PIECE: &str = "\x1b[33m";
const HIGHLIGHTED: &str = "\x1b[44m";
const RESET: &str = "\x1b[0m";

/// Board with the match status printed to its right.
pub struct BoardDisplay<'a, 'b> {
    pub chess_match: &'a Match,
    pub highlighted: Option<&'b Grid<bool>>,
}
impl<'a> BoardDisplay<'a, '_> {
    pub fn new(chess_match: &'a Match) -> Self {
        BoardDisplay {
            chess_match,
            highlighted: None,
        }
    }
    fn info(&self) -> Result<String, fmt::Error> {
        let mut info = String::new();
        writeln!(info, "Captured pieces:")?;
        for color in Color::ALL {
            let captured: Vec<_> = self
                .chess_match
                .captured_pieces()
                .filter(|piece| piece.color == color)
                .map(|piece| piece.kind.uppercase().to_string())
                .collect();
            writeln!(
                info,
                "{color}: {}[{}]{RESET}",
                piece_color(color),
                captured.join(", ")
            )?;
        }
        writeln!(info)?;
        writeln!(info, "Turn: {}", self.chess_match.turn())?;
        if self.chess_match.checkmate() {
            writeln!(info, "CHECKMATE!")?;
            writeln!(info, "Winner: {}", !self.chess_match.current_player())?;
        } else {
            writeln!(
                info,
                "Waiting player: {}",
                self.chess_match.current_player()
            )?;
            if self.chess_match.check() {
                writeln!(info, "CHECK!")?;
            }
        }
        Ok(info)
    }
}
fn piece_color(color: Color) -> &'static str {
    match color {
        Color::White => WHITE_PIECE,
        Color::Black => BLACK_PIECE,
    }
}
fn write_piece(f: &mut Formatter<'_>, piece: Option<ColoredPieceKind>) -> fmt::Result {
    match piece {
        Some(piece) => write!(f, "{}{}", piece_color(piece.color), piece.kind.uppercase())?,
        None => write!(f, "-")?,
    }
    Ok(())
}
impl Display for BoardDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let grid = self.chess_match.piece_grid();
        let info = self.info()?;
        let mut lines = info.lines().fuse();
        writeln!(f, "  a b c d e f g h")?;
        for row in 0..grid.rows() {
            let rank = grid.rows() - row;
            write!(f, "{rank} ")?;
            for (column, piece) in (0..).zip(grid.row(row)) {
                let highlighted = self
                    .highlighted
                    .is_some_and(|highlighted| highlighted[Position { row, column }]);
                if highlighted {
                    write!(f, "{HIGHLIGHTED}")?;
                }
                write_piece(f, *piece)?;
                write!(f, "{RESET} ")?;
            }
            write!(f, "{rank}")?;
            if let Some(line) = lines.next() {
                write!(f, "   {line}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")?;
        if let Some(line) = lines.next() {
            write!(f, "    {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                    {line}")?;
        }
        Ok(())
    }
}
