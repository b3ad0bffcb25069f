use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    board::BoardError,
    chess_position::{COLUMNS, ChessPosition, ROWS},
    color::Color,
    piece::{ColoredPieceKind, InvalidFenPiece, PieceKind},
    position::Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidLayout {
    NoKing(Color),
    ExceededKings(Color),
    NonPlayerInCheck,
    Board(BoardError),
    InvalidFenPiece(InvalidFenPiece),
    NotEnoughSquaresOnRow,
    ExceedingSquaresOnRow,
    NotEnoughRows,
    ExceedingRows,
}
impl From<BoardError> for InvalidLayout {
    fn from(value: BoardError) -> Self {
        InvalidLayout::Board(value)
    }
}
impl From<InvalidFenPiece> for InvalidLayout {
    fn from(value: InvalidFenPiece) -> Self {
        InvalidLayout::InvalidFenPiece(value)
    }
}
impl Display for InvalidLayout {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidLayout::NoKing(color) => write!(f, "no {color} king found")?,
            InvalidLayout::ExceededKings(color) => write!(f, "found more than 1 {color} king")?,
            InvalidLayout::NonPlayerInCheck => {
                write!(f, "the player who is not to move starts in check")?;
            }
            InvalidLayout::Board(err) => write!(f, "{err}")?,
            InvalidLayout::InvalidFenPiece(err) => write!(f, "{err}")?,
            InvalidLayout::NotEnoughSquaresOnRow => write!(f, "a row has less than 8 squares")?,
            InvalidLayout::ExceedingSquaresOnRow => write!(f, "a row has more than 8 squares")?,
            InvalidLayout::NotEnoughRows => write!(f, "found less than 8 rows")?,
            InvalidLayout::ExceedingRows => write!(f, "found more than 8 rows")?,
        }
        Ok(())
    }
}
impl Error for InvalidLayout {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InvalidLayout::Board(err) => Some(err),
            InvalidLayout::InvalidFenPiece(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub piece: ColoredPieceKind,
    pub position: ChessPosition,
}
impl Placement {
    pub fn new(color: Color, kind: PieceKind, position: ChessPosition) -> Self {
        Placement {
            piece: ColoredPieceKind::new(color, kind),
            position,
        }
    }
}
/// Pieces a match starts with. Only the king count is checked here; occupied cells are reported
/// when the layout is placed on a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Layout(pub Vec<Placement>);

impl Layout {
    pub fn standard() -> Self {
        let mut placements = Vec::with_capacity(32);
        for (color, home_row, pawn_row) in [(Color::White, 7, 6), (Color::Black, 0, 1)] {
            for (column, kind) in (0..).zip(PieceKind::STARTING_CONFIGURATION) {
                placements.push(Placement {
                    piece: ColoredPieceKind::new(color, kind),
                    position: chess_position(home_row, column),
                });
                placements.push(Placement {
                    piece: ColoredPieceKind::new(color, PieceKind::Pawn),
                    position: chess_position(pawn_row, column),
                });
            }
        }
        Layout(placements)
    }
    pub fn push(&mut self, color: Color, kind: PieceKind, position: ChessPosition) {
        self.0.push(Placement::new(color, kind, position));
    }
    pub fn validate(&self) -> Result<(), InvalidLayout> {
        for color in Color::ALL {
            let kings = self
                .0
                .iter()
                .filter(|placement| placement.piece == ColoredPieceKind::new(color, PieceKind::King))
                .count();
            match kings {
                0 => return Err(InvalidLayout::NoKing(color)),
                1 => (),
                _ => return Err(InvalidLayout::ExceededKings(color)),
            }
        }
        Ok(())
    }
}
fn chess_position(row: u8, column: u8) -> ChessPosition {
    ChessPosition::from_position(Position { row, column })
        .expect("row and column are within the 8x8 board")
}
impl FromStr for Layout {
    type Err = InvalidLayout;

    /// Parses the piece placement field of FEN, e.g. `4k3/8/8/8/8/8/8/4K3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut placements = Vec::new();
        let mut row: u8 = 0;
        for line in s.split('/') {
            if row >= ROWS {
                return Err(InvalidLayout::ExceedingRows);
            }
            let mut column: u8 = 0;
            for c in line.chars() {
                if let '1'..='8' = c {
                    column += c as u8 - b'0';
                    if column > COLUMNS {
                        return Err(InvalidLayout::ExceedingSquaresOnRow);
                    }
                } else {
                    if column >= COLUMNS {
                        return Err(InvalidLayout::ExceedingSquaresOnRow);
                    }
                    placements.push(Placement {
                        piece: ColoredPieceKind::from_fen(c)?,
                        position: chess_position(row, column),
                    });
                    column += 1;
                }
            }
            if column < COLUMNS {
                return Err(InvalidLayout::NotEnoughSquaresOnRow);
            }
            row += 1;
        }
        if row < ROWS {
            return Err(InvalidLayout::NotEnoughRows);
        }
        Ok(Layout(placements))
    }
}
#[cfg(test)]
mod test {
    use crate::{
        chess_position::ChessPosition,
        color::Color,
        layout::{InvalidLayout, Layout, Placement},
        piece::{InvalidFenPiece, PieceKind},
    };

    #[test]
    fn standard_layout() {
        let layout = Layout::standard();
        assert_eq!(layout.0.len(), 32);
        assert_eq!(layout.validate(), Ok(()));
        assert!(layout.0.contains(&Placement::new(
            Color::White,
            PieceKind::King,
            ChessPosition::new('e', 1).unwrap()
        )));
        assert!(layout.0.contains(&Placement::new(
            Color::Black,
            PieceKind::Queen,
            ChessPosition::new('d', 8).unwrap()
        )));
        assert!(layout.0.contains(&Placement::new(
            Color::Black,
            PieceKind::Pawn,
            ChessPosition::new('h', 7).unwrap()
        )));
    }
    #[test]
    fn standard_layout_matches_fen() {
        let layout: Layout = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".parse().unwrap();
        let mut parsed = layout.0;
        let mut standard = Layout::standard().0;
        let key = |placement: &Placement| placement.position.to_string();
        parsed.sort_by_key(key);
        standard.sort_by_key(key);
        assert_eq!(parsed, standard);
    }
    #[test]
    fn parse_errors() {
        assert_eq!(
            "4k3/8/8/8/8/8/8".parse::<Layout>(),
            Err(InvalidLayout::NotEnoughRows)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/8/4K3".parse::<Layout>(),
            Err(InvalidLayout::ExceedingRows)
        );
        assert_eq!(
            "4k2/8/8/8/8/8/8/4K3".parse::<Layout>(),
            Err(InvalidLayout::NotEnoughSquaresOnRow)
        );
        assert_eq!(
            "4k4/8/8/8/8/8/8/4K3".parse::<Layout>(),
            Err(InvalidLayout::ExceedingSquaresOnRow)
        );
        assert_eq!(
            "4x3/8/8/8/8/8/8/4K3".parse::<Layout>(),
            Err(InvalidLayout::InvalidFenPiece(InvalidFenPiece('x')))
        );
    }
    #[test]
    fn check_error_refers_to_player_not_to_move() {
        let message = InvalidLayout::NonPlayerInCheck.to_string();
        assert_eq!(message, "the player who is not to move starts in check");
    }
    #[test]
    fn king_count_is_validated() {
        let layout: Layout = "8/8/8/8/8/8/8/4K3".parse().unwrap();
        assert_eq!(layout.validate(), Err(InvalidLayout::NoKing(Color::Black)));
        let layout: Layout = "k6k/8/8/8/8/8/8/4K3".parse().unwrap();
        assert_eq!(
            layout.validate(),
            Err(InvalidLayout::ExceededKings(Color::Black))
        );
    }
}
