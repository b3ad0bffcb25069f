use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::position::Position;

pub const COLUMNS: u8 = 8;
pub const ROWS: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidCoordinate {
    pub column: char,
    pub row: u8,
}
impl Display for InvalidCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}{}` is not on the board, valid values are from `a1` to `h8`",
            self.column, self.row
        )?;
        Ok(())
    }
}
impl Error for InvalidCoordinate {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseChessPositionError {
    InvalidColumn(char),
    InvalidRow(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseChessPositionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseChessPositionError::InvalidColumn(column) => write!(
                f,
                "found `{column}`, characters from `a` to `h` were expected instead"
            )?,
            ParseChessPositionError::InvalidRow(row) => write!(
                f,
                "found `{row}`, characters from `1` to `8` were expected instead"
            )?,
            ParseChessPositionError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseChessPositionError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseChessPositionError {}

/// Square in algebraic notation: column letter `a` to `h`, row number 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessPosition {
    column: char,
    row: u8,
}
impl ChessPosition {
    pub fn new(column: char, row: u8) -> Result<Self, InvalidCoordinate> {
        if ('a'..='h').contains(&column) && (1..=ROWS).contains(&row) {
            Ok(ChessPosition { column, row })
        } else {
            Err(InvalidCoordinate { column, row })
        }
    }
    pub fn column(self) -> char {
        self.column
    }
    pub fn row(self) -> u8 {
        self.row
    }
    pub fn to_position(self) -> Position {
        Position {
            row: ROWS - self.row,
            column: self.column as u8 - b'a',
        }
    }
    pub fn from_position(position: Position) -> Option<Self> {
        if position.row < ROWS && position.column < COLUMNS {
            Some(ChessPosition {
                column: (b'a' + position.column) as char,
                row: ROWS - position.row,
            })
        } else {
            None
        }
    }
}
impl Display for ChessPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)?;
        Ok(())
    }
}
impl FromStr for ChessPosition {
    type Err = ParseChessPositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(column) = chars.next() else {
            return Err(ParseChessPositionError::NotEnoughCharacter(0));
        };
        let Some(row) = chars.next() else {
            return Err(ParseChessPositionError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseChessPositionError::Unexpected(c));
        }
        if !('a'..='h').contains(&column) {
            return Err(ParseChessPositionError::InvalidColumn(column));
        }
        let row = match row {
            '1'..='8' => row as u8 - b'0',
            _ => return Err(ParseChessPositionError::InvalidRow(row)),
        };
        Ok(ChessPosition { column, row })
    }
}
