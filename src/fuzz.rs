//! Differential testing against the `chess` crate. Games start from the standard layout, so
//! castling rights and en passant never come up in the exported FEN, and a game is cut short
//! once a pawn reaches the last row since promotion is not part of these rules.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use chess::{BoardStatus, MoveGen};
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::{
    chess_match::{Match, MoveError},
    chess_position::{ChessPosition, ROWS},
    fen::Fen,
    piece::PieceKind,
};

const MAX_PLIES: u32 = 300;

impl From<chess::Square> for ChessPosition {
    fn from(value: chess::Square) -> Self {
        let column = u8::try_from(value.get_file().to_index()).expect("file index is below 8");
        let row = u8::try_from(value.get_rank().to_index()).expect("rank index is below 8");
        ChessPosition::new((b'a' + column) as char, row + 1)
            .expect("every `chess` square is on the 8x8 board")
    }
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    UnparsableFen(String),
    ExtraMove(String, ChessPosition, ChessPosition),
    MissingMove(String, ChessPosition, ChessPosition),
    Check(String),
    Checkmate(String),
    Rejected(String, MoveError),
}
impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::UnparsableFen(fen) => write!(f, "`chess` rejected {fen}")?,
            Mismatch::ExtraMove(fen, source, target) => {
                write!(f, "found {source}{target} but it's not a legal move in {fen}")?;
            }
            Mismatch::MissingMove(fen, source, target) => {
                write!(f, "{source}{target} not found in {fen}")?;
            }
            Mismatch::Check(fen) => write!(f, "check status differs in {fen}")?,
            Mismatch::Checkmate(fen) => write!(f, "checkmate status differs in {fen}")?,
            Mismatch::Rejected(fen, err) => write!(f, "{err} in {fen}")?,
        }
        Ok(())
    }
}
impl Error for Mismatch {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Mismatch::Rejected(_, err) => Some(err),
            _ => None,
        }
    }
}
/// Plays `games` random games and returns the number of plies checked.
pub fn fuzz(games: u32, rng: &mut impl Rng) -> Result<u32, Mismatch> {
    let mut plies = 0;
    for _ in 0..games {
        let (_, game_plies) = play_game(rng)?;
        plies += game_plies;
    }
    Ok(plies)
}
/// Plays one random game, checking every position on the way. Returns the final position and
/// its number of plies.
pub fn play_game(rng: &mut impl Rng) -> Result<(Match, u32), Mismatch> {
    let mut chess_match = Match::new();
    let mut plies = 0;
    while plies < MAX_PLIES {
        let Some((source, target)) = compare(&chess_match, rng)? else {
            break;
        };
        chess_match
            .perform_move(source, target)
            .map_err(|err| Mismatch::Rejected(Fen(&chess_match).to_string(), err))?;
        plies += 1;
        if reached_last_row(&chess_match, target) {
            break;
        }
    }
    Ok((chess_match, plies))
}
/// Checks the current position and picks the next move, `None` when the game is over.
fn compare(
    chess_match: &Match,
    rng: &mut impl Rng,
) -> Result<Option<(ChessPosition, ChessPosition)>, Mismatch> {
    let fen = Fen(chess_match).to_string();
    let reference: chess::Board = fen
        .parse()
        .map_err(|_| Mismatch::UnparsableFen(fen.clone()))?;

    let moves: FxHashSet<_> = chess_match.legal_moves().into_iter().collect();
    let expected: FxHashSet<(ChessPosition, ChessPosition)> = MoveGen::new_legal(&reference)
        .map(|movement| (movement.get_source().into(), movement.get_dest().into()))
        .collect();
    if let Some((source, target)) = moves.difference(&expected).next() {
        return Err(Mismatch::ExtraMove(fen, *source, *target));
    }
    if let Some((source, target)) = expected.difference(&moves).next() {
        return Err(Mismatch::MissingMove(fen, *source, *target));
    }
    if chess_match.check() != (reference.checkers().popcnt() > 0) {
        return Err(Mismatch::Check(fen));
    }
    if chess_match.checkmate() != (reference.status() == BoardStatus::Checkmate) {
        return Err(Mismatch::Checkmate(fen));
    }
    if moves.is_empty() {
        return Ok(None);
    }
    let moves: Box<[_]> = moves.into_iter().collect();
    Ok(Some(moves[rng.random_range(0..moves.len())]))
}
fn reached_last_row(chess_match: &Match, target: ChessPosition) -> bool {
    (target.row() == 1 || target.row() == ROWS)
        && chess_match.piece_grid()[target.to_position()]
            .is_some_and(|piece| piece.kind == PieceKind::Pawn)
}
#[cfg(test)]
mod test {
    use rand::{SeedableRng, rngs::SmallRng};

    use rustc_hash::FxHashSet;

    use crate::{chess_position::ChessPosition, fuzz::fuzz};

    #[test]
    fn square_conversion() {
        assert_eq!(
            ChessPosition::from(chess::Square::E2),
            ChessPosition::new('e', 2).unwrap()
        );
        assert_eq!(
            ChessPosition::from(chess::Square::H8),
            ChessPosition::new('h', 8).unwrap()
        );
    }
    #[test]
    fn every_square_converts() {
        let converted: FxHashSet<_> = chess::ALL_SQUARES
            .into_iter()
            .map(|square| {
                let position = ChessPosition::from(square);
                assert_eq!(position.to_string(), square.to_string());
                position
            })
            .collect();
        assert_eq!(converted.len(), 64);
    }
    #[test]
    fn agrees_with_chess_crate() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let plies = fuzz(4, &mut rng).unwrap();
        assert!(plies > 0);
    }
}
