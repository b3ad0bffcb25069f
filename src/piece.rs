use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    iter::successors,
};

use crate::{
    board::Board,
    color::Color,
    grid::Grid,
    position::{Position, Vector},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    pub fn uppercase(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
    pub fn lowercase(self) -> char {
        self.uppercase().to_ascii_lowercase()
    }
    pub fn from_fen(c: char) -> Result<Self, InvalidFenPiece> {
        let piece = match c {
            'p' | 'P' => PieceKind::Pawn,
            'n' | 'N' => PieceKind::Knight,
            'b' | 'B' => PieceKind::Bishop,
            'r' | 'R' => PieceKind::Rook,
            'q' | 'Q' => PieceKind::Queen,
            'k' | 'K' => PieceKind::King,
            c => return Err(InvalidFenPiece(c)),
        };
        Ok(piece)
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}
/// What the outside sees of a piece: no identity, no position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColoredPieceKind {
    pub color: Color,
    pub kind: PieceKind,
}
impl ColoredPieceKind {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        ColoredPieceKind { color, kind }
    }
    pub fn fen(self) -> char {
        match self.color {
            Color::White => self.kind.uppercase(),
            Color::Black => self.kind.lowercase(),
        }
    }
    pub fn from_fen(c: char) -> Result<Self, InvalidFenPiece> {
        let kind = PieceKind::from_fen(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(ColoredPieceKind::new(color, kind))
    }
}
impl Display for ColoredPieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)?;
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidFenPiece(pub char);
impl Display for InvalidFenPiece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found `{}`, expected one of `p`, `n`, `b`, `r`, `k`, `q`, or uppercase forms of these letters",
            self.0
        )?;
        Ok(())
    }
}
impl Error for InvalidFenPiece {}

/// A piece and its bookkeeping. The position is owned by [`Board`]: it is set by
/// `Board::place_piece`, cleared by `Board::remove_piece`, and nothing else touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    move_count: u32,
    position: Option<Position>,
}
impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Piece {
            kind,
            color,
            move_count: 0,
            position: None,
        }
    }
    pub fn kind(self) -> PieceKind {
        self.kind
    }
    pub fn color(self) -> Color {
        self.color
    }
    pub fn colored_kind(self) -> ColoredPieceKind {
        ColoredPieceKind::new(self.color, self.kind)
    }
    pub fn move_count(self) -> u32 {
        self.move_count
    }
    pub fn position(self) -> Option<Position> {
        self.position
    }
    pub(crate) fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
    pub(crate) fn increase_move_count(&mut self) {
        self.move_count += 1;
    }
    pub(crate) fn decrease_move_count(&mut self) {
        debug_assert!(self.move_count > 0, "{self} has never moved");
        self.move_count -= 1;
    }
    /// Squares this piece may move to right now. A piece that is not on the board has none.
    pub fn possible_moves(self, board: &Board) -> Grid<bool> {
        let mut moves = Grid::new(board.rows(), board.columns());
        for destination in self.destinations(board) {
            moves[destination] = true;
        }
        moves
    }
    pub fn possible_move(self, board: &Board, target: Position) -> bool {
        self.destinations(board).any(|destination| destination == target)
    }
    pub fn is_there_any_possible_move(self, board: &Board) -> bool {
        self.destinations(board).next().is_some()
    }
    fn destinations(self, board: &Board) -> Box<dyn Iterator<Item = Position> + '_> {
        let Some(origin) = self.position else {
            return Box::new(std::iter::empty());
        };
        match self.kind {
            PieceKind::Pawn => Box::new(self.pawn_moves(origin, board)),
            PieceKind::Knight => Box::new(self.step_moves(origin, board, &Vector::KNIGHT_MOVES)),
            PieceKind::Bishop => Box::new(self.all_directional_moves(
                origin,
                board,
                &Vector::BISHOP_DIRECTIONS,
            )),
            PieceKind::Rook => Box::new(self.all_directional_moves(
                origin,
                board,
                &Vector::ROOK_DIRECTIONS,
            )),
            PieceKind::Queen => Box::new(self.all_directional_moves(
                origin,
                board,
                &Vector::QUEEN_DIRECTIONS,
            )),
            PieceKind::King => Box::new(self.step_moves(origin, board, &Vector::KING_MOVES)),
        }
    }
    fn step_moves(
        self,
        origin: Position,
        board: &Board,
        moves: &'static [Vector],
    ) -> impl Iterator<Item = Position> {
        moves
            .iter()
            .copied()
            .filter_map(move |movement| origin.offset(movement))
            .filter(move |destination| {
                board.is_empty(*destination) || board.is_opponent_piece(*destination, self.color)
            })
    }
    fn directional_moves(
        self,
        origin: Position,
        board: &Board,
        direction: Vector,
    ) -> impl Iterator<Item = Position> {
        let mut resume = true;
        successors(origin.offset(direction), move |position| {
            position.offset(direction)
        })
        .map_while(move |destination| {
            if !resume {
                None
            } else if board.is_empty(destination) {
                Some(destination)
            } else {
                resume = false;
                board
                    .is_opponent_piece(destination, self.color)
                    .then_some(destination)
            }
        })
    }
    fn all_directional_moves(
        self,
        origin: Position,
        board: &Board,
        directions: &'static [Vector],
    ) -> impl Iterator<Item = Position> {
        directions
            .iter()
            .copied()
            .flat_map(move |direction| self.directional_moves(origin, board, direction))
    }
    fn pawn_moves(self, origin: Position, board: &Board) -> impl Iterator<Item = Position> {
        let forward = Vector::pawn_single_move(self.color);
        let forward_jumps = if self.move_count == 0 { 2 } else { 1 };
        successors(origin.offset(forward), move |position| {
            position.offset(forward)
        })
        .take(forward_jumps)
        .take_while(move |destination| board.is_empty(*destination))
        .chain(
            Vector::pawn_attacks(self.color)
                .into_iter()
                .filter_map(move |movement| origin.offset(movement))
                .filter(move |destination| board.is_opponent_piece(*destination, self.color)),
        )
    }
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.colored_kind())?;
        if let Some(position) = self.position {
            write!(f, " on {position}")?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        grid::Grid,
        piece::{ColoredPieceKind, Piece, PieceKind},
        position::Position,
    };

    fn board_with(pieces: &[(Color, PieceKind, Position)]) -> Board {
        let mut board = Board::new(8, 8).unwrap();
        for (color, kind, position) in pieces.iter().copied() {
            let id = board.create_piece(color, kind);
            board.place_piece(id, position).unwrap();
        }
        board
    }
    fn moves_at(board: &Board, position: Position) -> Grid<bool> {
        let id = board.piece(position).unwrap().unwrap();
        board[id].possible_moves(board)
    }
    fn marked(moves: &Grid<bool>) -> Vec<Position> {
        moves.marked().collect()
    }

    #[test]
    fn rook_covers_its_row_and_column() {
        let board = board_with(&[(Color::White, PieceKind::Rook, Position::new(4, 4))]);
        let moves = moves_at(&board, Position::new(4, 4));
        let marked = marked(&moves);
        assert_eq!(marked.len(), 14);
        assert!(
            marked
                .iter()
                .all(|position| (position.row == 4) != (position.column == 4))
        );
    }
    #[test]
    fn bishop_in_corner_has_one_diagonal() {
        let board = board_with(&[(Color::White, PieceKind::Bishop, Position::new(0, 0))]);
        let moves = moves_at(&board, Position::new(0, 0));
        let expected: Vec<_> = (1..8).map(|i| Position::new(i, i)).collect();
        assert_eq!(marked(&moves), expected);
    }
    #[test]
    fn queen_is_rook_and_bishop() {
        let origin = Position::new(3, 2);
        let queen = board_with(&[(Color::Black, PieceKind::Queen, origin)]);
        let rook = board_with(&[(Color::Black, PieceKind::Rook, origin)]);
        let bishop = board_with(&[(Color::Black, PieceKind::Bishop, origin)]);
        let queen = moves_at(&queen, origin);
        let rook = moves_at(&rook, origin);
        let bishop = moves_at(&bishop, origin);
        for (position, cell) in queen.positioned_values() {
            assert_eq!(*cell, rook[position] || bishop[position], "{position}");
        }
    }
    #[test]
    fn sliding_stops_at_first_piece() {
        let board = board_with(&[
            (Color::White, PieceKind::Rook, Position::new(4, 4)),
            (Color::Black, PieceKind::Pawn, Position::new(4, 6)),
            (Color::White, PieceKind::Pawn, Position::new(2, 4)),
        ]);
        let moves = moves_at(&board, Position::new(4, 4));
        assert!(moves[Position::new(4, 5)]);
        assert!(moves[Position::new(4, 6)]);
        assert!(!moves[Position::new(4, 7)]);
        assert!(moves[Position::new(3, 4)]);
        assert!(!moves[Position::new(2, 4)]);
        assert!(!moves[Position::new(1, 4)]);
        assert!(!moves[Position::new(0, 4)]);
    }
    #[test]
    fn knight_jumps_over_pieces() {
        let board = board_with(&[
            (Color::White, PieceKind::Knight, Position::new(7, 1)),
            (Color::White, PieceKind::Pawn, Position::new(6, 0)),
            (Color::White, PieceKind::Pawn, Position::new(6, 1)),
            (Color::White, PieceKind::Pawn, Position::new(6, 2)),
            (Color::White, PieceKind::Pawn, Position::new(6, 3)),
        ]);
        let moves = moves_at(&board, Position::new(7, 1));
        assert_eq!(
            marked(&moves),
            [Position::new(5, 0), Position::new(5, 2)]
        );
    }
    #[test]
    fn king_takes_opponent_but_not_own() {
        let board = board_with(&[
            (Color::White, PieceKind::King, Position::new(7, 4)),
            (Color::White, PieceKind::Queen, Position::new(7, 3)),
            (Color::Black, PieceKind::Rook, Position::new(7, 5)),
        ]);
        let moves = moves_at(&board, Position::new(7, 4));
        assert!(!moves[Position::new(7, 3)]);
        assert!(moves[Position::new(7, 5)]);
        assert_eq!(marked(&moves).len(), 4);
    }
    #[test]
    fn pawn_double_step_only_before_moving() {
        let mut board = board_with(&[(Color::White, PieceKind::Pawn, Position::new(6, 4))]);
        let moves = moves_at(&board, Position::new(6, 4));
        assert_eq!(
            marked(&moves),
            [Position::new(4, 4), Position::new(5, 4)]
        );

        let id = board.remove_piece(Position::new(6, 4)).unwrap().unwrap();
        board.place_piece(id, Position::new(5, 4)).unwrap();
        board.increase_move_count(id);
        let moves = moves_at(&board, Position::new(5, 4));
        assert_eq!(marked(&moves), [Position::new(4, 4)]);
    }
    #[test]
    fn pawn_cannot_jump_over_a_piece() {
        let board = board_with(&[
            (Color::Black, PieceKind::Pawn, Position::new(1, 4)),
            (Color::White, PieceKind::Knight, Position::new(2, 4)),
        ]);
        let moves = moves_at(&board, Position::new(1, 4));
        assert!(!moves.any());
    }
    #[test]
    fn pawn_captures_diagonally_only() {
        let board = board_with(&[
            (Color::White, PieceKind::Pawn, Position::new(4, 4)),
            (Color::Black, PieceKind::Pawn, Position::new(3, 4)),
            (Color::Black, PieceKind::Knight, Position::new(3, 5)),
            (Color::White, PieceKind::Knight, Position::new(3, 3)),
        ]);
        let moves = moves_at(&board, Position::new(4, 4));
        assert_eq!(marked(&moves), [Position::new(3, 5)]);
    }
    #[test]
    fn matrix_has_board_dimensions() {
        let board = board_with(&[
            (Color::White, PieceKind::Queen, Position::new(0, 7)),
            (Color::Black, PieceKind::Knight, Position::new(7, 0)),
            (Color::Black, PieceKind::King, Position::new(0, 0)),
        ]);
        for position in [
            Position::new(0, 7),
            Position::new(7, 0),
            Position::new(0, 0),
        ] {
            let moves = moves_at(&board, position);
            assert_eq!((moves.rows(), moves.columns()), (8, 8));
            assert!(moves.marked().all(|position| board.position_exists(position)));
        }
    }
    #[test]
    fn unplaced_piece_cannot_move() {
        let board = Board::new(8, 8).unwrap();
        let piece = Piece::new(Color::White, PieceKind::Queen);
        assert!(!piece.possible_moves(&board).any());
        assert!(!piece.is_there_any_possible_move(&board));
    }
    #[test]
    fn fen_letters() {
        let piece = ColoredPieceKind::from_fen('n').unwrap();
        assert_eq!(piece, ColoredPieceKind::new(Color::Black, PieceKind::Knight));
        assert_eq!(piece.fen(), 'n');
        assert!(ColoredPieceKind::from_fen('x').is_err());
    }
}
