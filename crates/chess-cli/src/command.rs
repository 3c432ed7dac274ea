//! Parsing of the lines typed at the prompt.

use chess_core::{PieceKind, Square};
use thiserror::Error;

/// A parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Coordinate notation such as `e2e4` or `e7e8n`.
    Move {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },
    /// Four raw numbers `src_row src_col dst_row dst_col`, passed through
    /// unchecked so the game can judge the range itself.
    Raw {
        src_row: usize,
        src_col: usize,
        dst_row: usize,
        dst_col: usize,
    },
    /// Print the board.
    Board,
    /// Print whose turn it is and the game status.
    Status,
    /// List the moves played so far.
    History,
    /// List the legal moves.
    Moves,
    /// Start a new game.
    Reset,
    /// Show the command summary.
    Help,
    /// Leave the program.
    Quit,
}

/// Why an input line could not be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("invalid square: {0}")]
    InvalidSquare(String),
    #[error("invalid promotion piece: {0}")]
    InvalidPromotion(char),
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("expected 4 numbers, got {0}")]
    WrongArity(usize),
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let first = line.split_whitespace().next().ok_or(CommandError::Empty)?;

        if first.starts_with(|c: char| c.is_ascii_digit()) {
            return parse_raw(line);
        }

        match first.to_ascii_lowercase().as_str() {
            "board" | "b" => Ok(Command::Board),
            "status" | "s" => Ok(Command::Status),
            "history" | "h" => Ok(Command::History),
            "moves" | "m" => Ok(Command::Moves),
            "reset" | "new" => Ok(Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            word if word.len() == 4 || word.len() == 5 => parse_coordinate_move(word),
            word => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

fn parse_coordinate_move(word: &str) -> Result<Command, CommandError> {
    let square = |s: &str| {
        Square::from_algebraic(s).ok_or_else(|| CommandError::InvalidSquare(s.to_string()))
    };
    if !word.is_ascii() {
        return Err(CommandError::Unknown(word.to_string()));
    }

    let from = square(&word[0..2])?;
    let to = square(&word[2..4])?;
    let promotion = match word[4..].chars().next() {
        None => None,
        Some(c) => Some(
            PieceKind::from_letter(c)
                .filter(|kind| PieceKind::PROMOTIONS.contains(kind))
                .ok_or(CommandError::InvalidPromotion(c))?,
        ),
    };
    Ok(Command::Move {
        from,
        to,
        promotion,
    })
}

fn parse_raw(line: &str) -> Result<Command, CommandError> {
    let numbers = line
        .split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| CommandError::InvalidNumber(token.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match numbers[..] {
        [src_row, src_col, dst_row, dst_col] => Ok(Command::Raw {
            src_row,
            src_col,
            dst_row,
            dst_col,
        }),
        _ => Err(CommandError::WrongArity(numbers.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn parses_coordinate_moves() {
        assert_eq!(
            Command::parse("e2e4"),
            Ok(Command::Move {
                from: sq("e2"),
                to: sq("e4"),
                promotion: None
            })
        );
        assert_eq!(
            Command::parse("  E7E8N "),
            Ok(Command::Move {
                from: sq("e7"),
                to: sq("e8"),
                promotion: Some(PieceKind::Knight)
            })
        );
    }

    #[test]
    fn parses_raw_quadruples() {
        assert_eq!(
            Command::parse("6 4 4 4"),
            Ok(Command::Raw {
                src_row: 6,
                src_col: 4,
                dst_row: 4,
                dst_col: 4
            })
        );
        // Range is the game's business, not the parser's
        assert!(matches!(Command::parse("9 9 0 0"), Ok(Command::Raw { src_row: 9, .. })));
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(Command::parse("board"), Ok(Command::Board));
        assert_eq!(Command::parse("STATUS"), Ok(Command::Status));
        assert_eq!(Command::parse("history"), Ok(Command::History));
        assert_eq!(Command::parse("moves"), Ok(Command::Moves));
        assert_eq!(Command::parse("reset"), Ok(Command::Reset));
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("castle"),
            Err(CommandError::Unknown("castle".to_string()))
        );
        assert_eq!(
            Command::parse("e2z4"),
            Err(CommandError::InvalidSquare("z4".to_string()))
        );
        assert_eq!(
            Command::parse("e7e8k"),
            Err(CommandError::InvalidPromotion('k'))
        );
        assert_eq!(
            Command::parse("6 4 4"),
            Err(CommandError::WrongArity(3))
        );
        assert_eq!(
            Command::parse("6 4 x 4"),
            Err(CommandError::InvalidNumber("x".to_string()))
        );
    }
}
