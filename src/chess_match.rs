use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use rustc_hash::FxHashSet;

use crate::{
    board::{Board, BoardError, PieceId},
    chess_position::{COLUMNS, ChessPosition, ROWS},
    color::Color,
    grid::Grid,
    layout::{InvalidLayout, Layout},
    piece::{ColoredPieceKind, PieceKind},
    position::Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveError {
    NoPieceAtSource(ChessPosition),
    NoLegalMoves(ChessPosition),
    NotYourPiece(ChessPosition, Color),
    IllegalTarget {
        source: ChessPosition,
        target: ChessPosition,
    },
    SelfCheck {
        source: ChessPosition,
        target: ChessPosition,
    },
    Board(BoardError),
}
impl From<BoardError> for MoveError {
    fn from(value: BoardError) -> Self {
        MoveError::Board(value)
    }
}
impl Display for MoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::NoPieceAtSource(position) => write!(f, "no piece found on {position}")?,
            MoveError::NoLegalMoves(position) => {
                write!(f, "the piece on {position} has no possible moves")?;
            }
            MoveError::NotYourPiece(position, color) => {
                write!(f, "the piece on {position} is not {color}")?;
            }
            MoveError::IllegalTarget { source, target } => {
                write!(f, "the piece on {source} can't move to {target}")?;
            }
            MoveError::SelfCheck { source, target } => {
                write!(f, "{source}{target} would leave your own king in check")?;
            }
            MoveError::Board(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for MoveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MoveError::Board(err) => Some(err),
            _ => None,
        }
    }
}

/// A game in progress: the board, whose turn it is, and which pieces have been captured.
///
/// Every failed operation leaves the match exactly as it was.
#[derive(Debug, Clone)]
pub struct Match {
    turn: u32,
    current_player: Color,
    check: bool,
    checkmate: bool,
    board: Board,
    pieces_on_board: FxHashSet<PieceId>,
    captured_pieces: Vec<PieceId>,
}
impl Default for Match {
    fn default() -> Self {
        Match::new()
    }
}
impl Match {
    pub fn new() -> Self {
        Match::with_layout(&Layout::standard()).expect("standard layout is valid")
    }
    pub fn with_layout(layout: &Layout) -> Result<Self, InvalidLayout> {
        layout.validate()?;
        let mut chess_match = Match {
            turn: 1,
            current_player: Color::White,
            check: false,
            checkmate: false,
            board: Board::new(ROWS, COLUMNS)?,
            pieces_on_board: FxHashSet::default(),
            captured_pieces: Vec::new(),
        };
        for placement in &layout.0 {
            chess_match.place_new_piece(
                placement.piece.color,
                placement.piece.kind,
                placement.position,
            )?;
        }
        if chess_match.is_in_check(!chess_match.current_player) {
            return Err(InvalidLayout::NonPlayerInCheck);
        }
        chess_match.check = chess_match.is_in_check(chess_match.current_player);
        chess_match.checkmate = chess_match.check && !chess_match.has_legal_move();
        Ok(chess_match)
    }
    fn place_new_piece(
        &mut self,
        color: Color,
        kind: PieceKind,
        position: ChessPosition,
    ) -> Result<(), BoardError> {
        let id = self.board.create_piece(color, kind);
        self.board.place_piece(id, position.to_position())?;
        self.pieces_on_board.insert(id);
        Ok(())
    }
    pub fn turn(&self) -> u32 {
        self.turn
    }
    pub fn current_player(&self) -> Color {
        self.current_player
    }
    /// Whether the current player is in check.
    pub fn check(&self) -> bool {
        self.check
    }
    /// Whether the current player is in check and has no move that gets out of it.
    pub fn checkmate(&self) -> bool {
        self.checkmate
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn piece_grid(&self) -> Grid<Option<ColoredPieceKind>> {
        self.board
            .cells()
            .map(|cell| cell.map(|id| self.board[id].colored_kind()))
    }
    pub fn captured_pieces(&self) -> impl Iterator<Item = ColoredPieceKind> {
        self.captured_pieces
            .iter()
            .map(|id| self.board[*id].colored_kind())
    }
    pub fn pieces_on_board(&self) -> impl Iterator<Item = ColoredPieceKind> {
        self.pieces_on_board
            .iter()
            .map(|id| self.board[*id].colored_kind())
    }
    pub fn possible_moves(&self, source: ChessPosition) -> Result<Grid<bool>, MoveError> {
        let id = self.validate_source_position(source)?;
        Ok(self.board[id].possible_moves(&self.board))
    }
    pub fn perform_move(
        &mut self,
        source: ChessPosition,
        target: ChessPosition,
    ) -> Result<Option<ColoredPieceKind>, MoveError> {
        let id = self.validate_source_position(source)?;
        if !self.board[id].possible_move(&self.board, target.to_position()) {
            return Err(MoveError::IllegalTarget { source, target });
        }
        let captured = self.make_move(id, source.to_position(), target.to_position())?;
        if self.is_in_check(self.current_player) {
            self.undo_move(id, source.to_position(), target.to_position(), captured)?;
            return Err(MoveError::SelfCheck { source, target });
        }
        self.next_turn();
        self.check = self.is_in_check(self.current_player);
        self.checkmate = self.check && !self.has_legal_move();
        Ok(captured.map(|id| self.board[id].colored_kind()))
    }
    /// Every move the current player can perform.
    pub fn legal_moves(&self) -> Vec<(ChessPosition, ChessPosition)> {
        let mut trial = self.clone();
        trial.legal_moves_of(self.current_player)
    }
    fn validate_source_position(&self, source: ChessPosition) -> Result<PieceId, MoveError> {
        let Some(id) = self.board.piece(source.to_position())? else {
            return Err(MoveError::NoPieceAtSource(source));
        };
        let piece = self.board[id];
        if !piece.is_there_any_possible_move(&self.board) {
            return Err(MoveError::NoLegalMoves(source));
        }
        if piece.color() != self.current_player {
            return Err(MoveError::NotYourPiece(source, self.current_player));
        }
        Ok(id)
    }
    fn make_move(
        &mut self,
        moved: PieceId,
        source: Position,
        target: Position,
    ) -> Result<Option<PieceId>, BoardError> {
        self.board.remove_piece(source)?;
        let captured = self.board.remove_piece(target)?;
        self.board.place_piece(moved, target)?;
        self.board.increase_move_count(moved);
        if let Some(captured) = captured {
            self.pieces_on_board.remove(&captured);
            self.captured_pieces.push(captured);
        }
        Ok(captured)
    }
    fn undo_move(
        &mut self,
        moved: PieceId,
        source: Position,
        target: Position,
        captured: Option<PieceId>,
    ) -> Result<(), BoardError> {
        self.board.remove_piece(target)?;
        self.board.decrease_move_count(moved);
        self.board.place_piece(moved, source)?;
        if let Some(captured) = captured {
            self.board.place_piece(captured, target)?;
            let popped = self.captured_pieces.pop();
            debug_assert_eq!(popped, Some(captured));
            self.pieces_on_board.insert(captured);
        }
        Ok(())
    }
    fn next_turn(&mut self) {
        self.turn += 1;
        self.current_player = !self.current_player;
    }
    fn king(&self, color: Color) -> Position {
        self.pieces_on_board
            .iter()
            .map(|id| self.board[*id])
            .find(|piece| piece.color() == color && piece.kind() == PieceKind::King)
            .and_then(|piece| piece.position())
            .unwrap_or_else(|| panic!("there is no {color} king on the board"))
    }
    /// Whether any piece of the other color can move onto the king of `color`.
    ///
    /// # Panics
    ///
    /// Panics if `color` has no king on the board.
    pub fn is_in_check(&self, color: Color) -> bool {
        let king = self.king(color);
        self.pieces_on_board
            .iter()
            .map(|id| self.board[*id])
            .filter(|piece| piece.color() != color)
            .any(|piece| piece.possible_moves(&self.board)[king])
    }
    fn has_legal_move(&mut self) -> bool {
        !self.legal_moves_of(self.current_player).is_empty()
    }
    /// Tries every move of `color` on this board and takes it back again.
    fn legal_moves_of(&mut self, color: Color) -> Vec<(ChessPosition, ChessPosition)> {
        let candidates: Vec<_> = self
            .pieces_on_board
            .iter()
            .copied()
            .filter(|id| self.board[*id].color() == color)
            .filter_map(|id| {
                let piece = self.board[id];
                let source = piece.position()?;
                Some(
                    piece
                        .possible_moves(&self.board)
                        .marked()
                        .map(move |target| (id, source, target))
                        .collect::<Vec<_>>(),
                )
            })
            .flatten()
            .collect();
        candidates
            .into_iter()
            .filter(|(id, source, target)| self.is_safe(*id, *source, *target))
            .filter_map(|(_, source, target)| {
                Some((
                    ChessPosition::from_position(source)?,
                    ChessPosition::from_position(target)?,
                ))
            })
            .collect()
    }
    fn is_safe(&mut self, id: PieceId, source: Position, target: Position) -> bool {
        let color = self.board[id].color();
        let Ok(captured) = self.make_move(id, source, target) else {
            return false;
        };
        let safe = !self.is_in_check(color);
        let undone = self.undo_move(id, source, target, captured);
        debug_assert!(undone.is_ok());
        safe
    }
}
