//! Core types
//!
//! Re-exports the plain value types from the base crate and adds the ones which only make sense
//! for a game in progress.

pub use rookwise_base::types::*;

use std::fmt;

/// Source and destination of a single move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    #[inline]
    pub const fn new(from: Position, to: Position) -> Move {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.from, self.to)
    }
}

/// Reason for a game to end with a win
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WinReason {
    /// The losing side is checkmated
    Checkmate,
}

/// Reason for a game to end in a draw
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// The side to move is not in check but has no legal moves
    Stalemate,
}

/// Final result of a game
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win { side: Color, reason: WinReason },
    Draw(DrawReason),
}

impl Outcome {
    /// Returns the winning side, or `None` for a draw
    #[inline]
    pub fn winner(&self) -> Option<Color> {
        match self {
            Self::Win { side, .. } => Some(*side),
            Self::Draw(_) => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::Win {
                side,
                reason: WinReason::Checkmate,
            } => write!(f, "{} wins by checkmate", side),
            Self::Draw(DrawReason::Stalemate) => write!(f, "draw by stalemate"),
        }
    }
}
