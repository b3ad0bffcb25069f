#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    reason = "every fallible function returns a single error type named after what failed"
)]

pub mod board;
pub mod board_display;
pub mod chess_match;
pub mod chess_position;
pub mod color;
pub mod fen;
pub mod fuzz;
pub mod grid;
pub mod layout;
pub mod piece;
pub mod position;

pub use crate::{
    chess_match::{Match, MoveError},
    chess_position::ChessPosition,
    color::Color,
    layout::Layout,
    piece::{ColoredPieceKind, PieceKind},
};
