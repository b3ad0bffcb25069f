#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{
    env::args,
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    process::ExitCode,
    str::FromStr,
};

use chessmatch::{
    ChessPosition, Layout, Match,
    board_display::BoardDisplay,
    chess_position::ParseChessPositionError,
    fen::Fen,
    fuzz::play_game,
};
use rand::{SeedableRng, rngs::SmallRng};

const DEFAULT_FUZZ_GAMES: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Input {
    Quit,
    Fen,
    Position(ChessPosition),
}
impl FromStr for Input {
    type Err = ParseChessPositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quit" | "exit" => Ok(Input::Quit),
            "fen" => Ok(Input::Fen),
            s => Ok(Input::Position(s.parse()?)),
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct InvalidGameCount;
impl Display for InvalidGameCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "the number of games must be a positive integer")?;
        Ok(())
    }
}
impl Error for InvalidGameCount {}

fn main() -> ExitCode {
    let mut args = args().skip(1);
    let result = match args.next().as_deref() {
        Some("fuzz") => fuzz(args.next().as_deref()),
        Some(layout) => start(layout),
        None => repl(Match::new()).map_err(Into::into),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
fn start(layout: &str) -> Result<(), Box<dyn Error>> {
    let layout: Layout = layout.parse()?;
    repl(Match::with_layout(&layout)?)?;
    Ok(())
}
fn fuzz(games: Option<&str>) -> Result<(), Box<dyn Error>> {
    let games = match games {
        Some(games) => games
            .parse()
            .ok()
            .filter(|games| *games > 0)
            .ok_or(InvalidGameCount)?,
        None => DEFAULT_FUZZ_GAMES,
    };
    let mut rng = SmallRng::from_os_rng();
    let mut output = stdout().lock();
    for game in 1..=games {
        let (chess_match, plies) = play_game(&mut rng)?;
        writeln!(output, "game {game}: {plies} plies, {}", Fen(&chess_match))?;
    }
    Ok(())
}
/// Reads the next command, `None` at end of input.
fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    output: &mut impl Write,
    text: &str,
) -> io::Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    lines.next().transpose()
}
fn repl(mut chess_match: Match) -> io::Result<()> {
    let input = stdin().lock();
    let mut output = stdout().lock();
    let mut error = stderr().lock();

    let mut lines = input.lines();
    writeln!(output, "type a square like `e2` to move its piece, `fen` to export, or `quit`")?;
    loop {
        write!(output, "{}", BoardDisplay::new(&chess_match))?;
        if chess_match.checkmate() {
            return Ok(());
        }
        let Some(line) = prompt(&mut lines, &mut output, "Source: ")? else {
            return Ok(());
        };
        let source = match line.trim().parse() {
            Ok(Input::Quit) => return Ok(()),
            Ok(Input::Fen) => {
                writeln!(output, "{}", Fen(&chess_match))?;
                continue;
            }
            Ok(Input::Position(source)) => source,
            Err(err) => {
                writeln!(error, "Error: {err}")?;
                continue;
            }
        };
        let moves = match chess_match.possible_moves(source) {
            Ok(moves) => moves,
            Err(err) => {
                writeln!(error, "Error: {err}")?;
                continue;
            }
        };
        write!(
            output,
            "{}",
            BoardDisplay {
                chess_match: &chess_match,
                highlighted: Some(&moves),
            }
        )?;
        let Some(line) = prompt(&mut lines, &mut output, "Target: ")? else {
            return Ok(());
        };
        let target = match line.trim().parse() {
            Ok(Input::Quit) => return Ok(()),
            Ok(Input::Fen) => {
                writeln!(output, "{}", Fen(&chess_match))?;
                continue;
            }
            Ok(Input::Position(target)) => target,
            Err(err) => {
                writeln!(error, "Error: {err}")?;
                continue;
            }
        };
        match chess_match.perform_move(source, target) {
            Ok(Some(captured)) => writeln!(output, "captured {captured}")?,
            Ok(None) => (),
            Err(err) => writeln!(error, "Error: {err}")?,
        }
    }
}
