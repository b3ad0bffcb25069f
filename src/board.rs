use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::Index,
};

use crate::{
    color::Color,
    grid::Grid,
    piece::{Piece, PieceKind},
    position::Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardError {
    NoCells,
    OutOfBounds(Position),
    CellOccupied(Position),
    AlreadyPlaced(Position),
}
impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::NoCells => write!(f, "there must be at least 1 row and 1 column")?,
            BoardError::OutOfBounds(position) => write!(f, "{position} is not on the board")?,
            BoardError::CellOccupied(position) => {
                write!(f, "there is already a piece on {position}")?;
            }
            BoardError::AlreadyPlaced(position) => {
                write!(f, "the piece is already placed on {position}")?;
            }
        }
        Ok(())
    }
}
impl Error for BoardError {}

/// Handle to a piece created by [`Board::create_piece`]. Stays valid after the piece is removed
/// from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(usize);

/// Grid of cells plus every piece ever created on it. Cells hold [`PieceId`]s, and each placed
/// piece records the cell that holds it; `place_piece` and `remove_piece` keep both sides in
/// sync.
#[derive(Debug, Clone)]
pub struct Board {
    cells: Grid<Option<PieceId>>,
    pieces: Vec<Piece>,
}
impl Board {
    pub fn new(rows: u8, columns: u8) -> Result<Self, BoardError> {
        if rows == 0 || columns == 0 {
            return Err(BoardError::NoCells);
        }
        Ok(Board {
            cells: Grid::new(rows, columns),
            pieces: Vec::new(),
        })
    }
    pub fn rows(&self) -> u8 {
        self.cells.rows()
    }
    pub fn columns(&self) -> u8 {
        self.cells.columns()
    }
    /// Creates a piece that is not yet on any cell.
    pub fn create_piece(&mut self, color: Color, kind: PieceKind) -> PieceId {
        self.pieces.push(Piece::new(color, kind));
        PieceId(self.pieces.len() - 1)
    }
    pub fn position_exists(&self, position: Position) -> bool {
        self.cells.contains(position)
    }
    fn check_bounds(&self, position: Position) -> Result<(), BoardError> {
        if self.position_exists(position) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds(position))
        }
    }
    pub fn piece(&self, position: Position) -> Result<Option<PieceId>, BoardError> {
        self.check_bounds(position)?;
        Ok(self.cells[position])
    }
    pub fn there_is_a_piece(&self, position: Position) -> Result<bool, BoardError> {
        Ok(self.piece(position)?.is_some())
    }
    /// A piece sits on at most one cell, so it has to be removed before it is placed again.
    pub fn place_piece(&mut self, id: PieceId, position: Position) -> Result<(), BoardError> {
        if self.there_is_a_piece(position)? {
            return Err(BoardError::CellOccupied(position));
        }
        let piece = &mut self.pieces[id.0];
        if let Some(placed) = piece.position() {
            return Err(BoardError::AlreadyPlaced(placed));
        }
        piece.set_position(Some(position));
        self.cells[position] = Some(id);
        Ok(())
    }
    pub fn remove_piece(&mut self, position: Position) -> Result<Option<PieceId>, BoardError> {
        self.check_bounds(position)?;
        let id = self.cells[position].take();
        if let Some(id) = id {
            self.pieces[id.0].set_position(None);
        }
        Ok(id)
    }
    /// `false` for positions off the board.
    pub fn is_empty(&self, position: Position) -> bool {
        self.position_exists(position) && self.cells[position].is_none()
    }
    /// `false` for positions off the board.
    pub fn is_opponent_piece(&self, position: Position, color: Color) -> bool {
        self.position_exists(position)
            && self.cells[position].is_some_and(|id| self[id].color() != color)
    }
    pub(crate) fn increase_move_count(&mut self, id: PieceId) {
        self.pieces[id.0].increase_move_count();
    }
    pub(crate) fn decrease_move_count(&mut self, id: PieceId) {
        self.pieces[id.0].decrease_move_count();
    }
    pub fn cells(&self) -> &Grid<Option<PieceId>> {
        &self.cells
    }
}
impl Index<PieceId> for Board {
    type Output = Piece;

    fn index(&self, index: PieceId) -> &Self::Output {
        &self.pieces[index.0]
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::{Board, BoardError},
        color::Color,
        piece::PieceKind,
        position::Position,
    };

    #[test]
    fn position_exists_is_bounds_check() {
        let board = Board::new(3, 5).unwrap();
        for row in 0..10 {
            for column in 0..10 {
                assert_eq!(
                    board.position_exists(Position::new(row, column)),
                    row < 3 && column < 5
                );
            }
        }
    }
    #[test]
    fn empty_board_is_rejected() {
        assert_eq!(Board::new(0, 8).unwrap_err(), BoardError::NoCells);
        assert_eq!(Board::new(8, 0).unwrap_err(), BoardError::NoCells);
    }
    #[test]
    fn out_of_bounds_queries_fail() {
        let mut board = Board::new(8, 8).unwrap();
        let outside = Position::new(8, 2);
        assert_eq!(board.piece(outside), Err(BoardError::OutOfBounds(outside)));
        assert_eq!(
            board.there_is_a_piece(outside),
            Err(BoardError::OutOfBounds(outside))
        );
        assert_eq!(
            board.remove_piece(outside),
            Err(BoardError::OutOfBounds(outside))
        );
        let id = board.create_piece(Color::White, PieceKind::Rook);
        assert_eq!(
            board.place_piece(id, outside),
            Err(BoardError::OutOfBounds(outside))
        );
        assert_eq!(board[id].position(), None);
        assert!(!board.is_empty(outside));
        assert!(!board.is_opponent_piece(outside, Color::Black));
    }
    #[test]
    fn placement_keeps_both_sides_in_sync() {
        let mut board = Board::new(8, 8).unwrap();
        let id = board.create_piece(Color::White, PieceKind::Knight);
        let position = Position::new(7, 1);
        board.place_piece(id, position).unwrap();
        assert_eq!(board.piece(position), Ok(Some(id)));
        assert_eq!(board[id].position(), Some(position));

        assert_eq!(board.remove_piece(position), Ok(Some(id)));
        assert_eq!(board.piece(position), Ok(None));
        assert_eq!(board[id].position(), None);
        assert_eq!(board[id].kind(), PieceKind::Knight);
    }
    #[test]
    fn occupied_cell_rejects_placement() {
        let mut board = Board::new(8, 8).unwrap();
        let first = board.create_piece(Color::White, PieceKind::Knight);
        let second = board.create_piece(Color::Black, PieceKind::Bishop);
        let position = Position::new(4, 4);
        board.place_piece(first, position).unwrap();
        assert_eq!(
            board.place_piece(second, position),
            Err(BoardError::CellOccupied(position))
        );
        assert_eq!(board.piece(position), Ok(Some(first)));
        assert_eq!(board[second].position(), None);
    }
    #[test]
    fn placed_piece_cannot_be_placed_twice() {
        let mut board = Board::new(8, 8).unwrap();
        let id = board.create_piece(Color::White, PieceKind::Queen);
        let first = Position::new(7, 3);
        let second = Position::new(4, 3);
        board.place_piece(id, first).unwrap();
        assert_eq!(
            board.place_piece(id, second),
            Err(BoardError::AlreadyPlaced(first))
        );
        assert_eq!(board.piece(second), Ok(None));
        assert_eq!(board[id].position(), Some(first));

        board.remove_piece(first).unwrap();
        assert_eq!(board.place_piece(id, second), Ok(()));
        assert_eq!(board[id].position(), Some(second));
    }
    #[test]
    fn removing_from_empty_cell_is_not_an_error() {
        let mut board = Board::new(8, 8).unwrap();
        assert_eq!(board.remove_piece(Position::new(0, 0)), Ok(None));
    }
    #[test]
    fn opponent_test_uses_color() {
        let mut board = Board::new(8, 8).unwrap();
        let id = board.create_piece(Color::Black, PieceKind::Pawn);
        let position = Position::new(1, 1);
        board.place_piece(id, position).unwrap();
        assert!(board.is_opponent_piece(position, Color::White));
        assert!(!board.is_opponent_piece(position, Color::Black));
        assert!(!board.is_empty(position));
        assert!(!board.is_opponent_piece(Position::new(1, 2), Color::White));
    }
}
