//! Parsing of console commands
//!
//! A command is either `EXIT` or a move written as two squares separated by whitespace, like
//! `E2 E4`. A move may carry a promotion letter as the third token (`E7 E8 N`), which is read
//! with [`PromotePiece::from_choice()`], so anything except `Q`, `R`, `B` or `N` means a queen.
//! Everything is case-insensitive.

use crate::player::PromotePiece;
use crate::types::{Position, PositionParseError};

use std::str::FromStr;

use thiserror::Error;

/// Error parsing a console command
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("expected two squares, got {0} tokens")]
    WrongTokenCount(usize),
    #[error("bad square {token:?}: {source}")]
    BadPosition {
        token: String,
        source: PositionParseError,
    },
}

/// Parsed console command
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    Move {
        from: Position,
        to: Position,
        promote: Option<PromotePiece>,
    },
    Exit,
}

fn parse_position(token: &str) -> Result<Position, CommandParseError> {
    token
        .parse()
        .map_err(|source| CommandParseError::BadPosition {
            token: token.to_string(),
            source,
        })
}

/// Parses a single line of console input
pub fn parse_command(line: &str) -> Result<Command, CommandParseError> {
    let line = line.trim().to_ascii_uppercase();
    if line.is_empty() {
        return Err(CommandParseError::Empty);
    }
    if line == "EXIT" {
        return Ok(Command::Exit);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [from, to] => Ok(Command::Move {
            from: parse_position(from)?,
            to: parse_position(to)?,
            promote: None,
        }),
        [from, to, promote] => Ok(Command::Move {
            from: parse_position(from)?,
            to: parse_position(to)?,
            promote: Some(PromotePiece::from_choice(promote)),
        }),
        _ => Err(CommandParseError::WrongTokenCount(tokens.len())),
    }
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_command(s)
    }
}
