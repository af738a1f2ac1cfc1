//! Turn-taking game driver

use crate::board::Board;
use crate::notation::{self, Command, CommandParseError};
use crate::player::{MoveError, MoveStatus, PendingPromotion, Player, PromotePiece};
use crate::types::{Cell, Color, DrawReason, Outcome, Position, WinReason};

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

/// Error applying a move to a [`Game`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum GameError {
    /// The game already has an outcome
    #[error("game is already finished")]
    Finished,
    /// The move was rejected by the player
    #[error("bad move: {0}")]
    Move(#[from] MoveError),
    /// The move text cannot be parsed
    #[error("cannot parse move: {0}")]
    Parse(#[from] CommandParseError),
    /// The text is a valid command, but not a move
    #[error("command is not a move")]
    NotAMove,
}

/// Entry of the game history
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    /// Piece which made the move, before promotion
    pub moved: Cell,
    /// Contents of the destination square before the move
    pub captured: Cell,
    pub promote: Option<PromotePiece>,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.from, self.to)?;
        if let Some(p) = self.promote {
            write!(f, " {}", p)?;
        }
        Ok(())
    }
}

/// Result of [`Game::try_push()`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PushStatus {
    Done(MoveRecord),
    /// Resolve with [`Game::finish_promotion()`]
    PromotionPending(PendingPromotion),
}

/// Chess game
///
/// Keeps the board, the side to move, the history of moves and the outcome. After every move,
/// the side which is about to move is checked for checkmate and stalemate.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side: Color,
    stack: Vec<(MoveRecord, Board)>,
    outcome: Option<Outcome>,
}

impl Game {
    /// Starts a game from the initial position with White to move
    pub fn new() -> Game {
        Game::from_board(Board::initial(), Color::White)
    }

    /// Starts a game from an arbitrary position with `side` to move
    ///
    /// The outcome is calculated immediately, so a game may be finished from the very start.
    pub fn from_board(board: Board, side: Color) -> Game {
        let mut res = Game {
            board,
            side,
            stack: Vec::new(),
            outcome: None,
        };
        res.outcome = res.calc_outcome();
        res
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Returns the moves made so far, oldest first
    pub fn history(&self) -> impl Iterator<Item = &MoveRecord> + '_ {
        self.stack.iter().map(|(r, _)| r)
    }

    /// Returns the outcome of the current position for the side to move
    pub fn calc_outcome(&self) -> Option<Outcome> {
        if self.board.is_checkmate(self.side) {
            return Some(Outcome::Win {
                side: self.side.inv(),
                reason: WinReason::Checkmate,
            });
        }
        if self.board.is_stalemate(self.side) {
            return Some(Outcome::Draw(DrawReason::Stalemate));
        }
        None
    }

    fn player(&self) -> Player {
        Player::new(self.side)
    }

    fn record(&self, from: Position, to: Position, promote: Option<PromotePiece>) -> MoveRecord {
        MoveRecord {
            from,
            to,
            moved: self.board.get(from),
            captured: self.board.get(to),
            promote,
        }
    }

    fn finish_push(&mut self, record: MoveRecord, before: Board) {
        debug!(side = %self.side, mv = %record, "move pushed");
        self.stack.push((record, before));
        self.side = self.side.inv();
        self.outcome = self.calc_outcome();
        if let Some(outcome) = self.outcome {
            info!(%outcome, "game finished");
        } else if self.board.is_check(self.side) {
            debug!(side = %self.side, "check");
        }
    }

    /// Tries to make a move for the side to move
    ///
    /// A promotion is not applied but returned as [`PushStatus::PromotionPending`], so the
    /// caller may ask which piece to promote to.
    pub fn try_push(&mut self, from: Position, to: Position) -> Result<PushStatus, GameError> {
        if self.is_finished() {
            return Err(GameError::Finished);
        }
        let record = self.record(from, to, None);
        let before = self.board.clone();
        match self.player().make_move(&mut self.board, from, to)? {
            MoveStatus::Applied => {
                self.finish_push(record, before);
                Ok(PushStatus::Done(record))
            }
            MoveStatus::PromotionPending(pending) => Ok(PushStatus::PromotionPending(pending)),
        }
    }

    /// Completes a promotion returned by [`Game::try_push()`]
    pub fn finish_promotion(
        &mut self,
        pending: PendingPromotion,
        choice: PromotePiece,
    ) -> Result<MoveRecord, GameError> {
        if self.is_finished() {
            return Err(GameError::Finished);
        }
        let record = self.record(pending.from(), pending.to(), Some(choice));
        let before = self.board.clone();
        self.player()
            .finish_promotion(&mut self.board, pending, choice)?;
        self.finish_push(record, before);
        Ok(record)
    }

    /// Makes a move for the side to move
    ///
    /// If the move is a promotion, the pawn becomes `promote`, or a queen if it is `None`.
    pub fn push(
        &mut self,
        from: Position,
        to: Position,
        promote: Option<PromotePiece>,
    ) -> Result<MoveRecord, GameError> {
        match self.try_push(from, to)? {
            PushStatus::Done(record) => Ok(record),
            PushStatus::PromotionPending(pending) => {
                self.finish_promotion(pending, promote.unwrap_or_default())
            }
        }
    }

    /// Parses a move like `E2 E4` or `E7 E8 N` and makes it
    pub fn push_str(&mut self, s: &str) -> Result<MoveRecord, GameError> {
        match notation::parse_command(s)? {
            Command::Move { from, to, promote } => self.push(from, to, promote),
            Command::Exit => Err(GameError::NotAMove),
        }
    }

    /// Parses and makes all the moves from `moves`, separated by `;`
    pub fn push_str_list(&mut self, moves: &str) -> Result<(), GameError> {
        for mv in moves.split(';').filter(|s| !s.trim().is_empty()) {
            self.push_str(mv)?;
        }
        Ok(())
    }

    /// Takes back the last move
    ///
    /// The board, the side to move and the outcome become the same as before the move.
    pub fn pop(&mut self) -> Option<MoveRecord> {
        let (record, before) = self.stack.pop()?;
        self.board = before;
        self.side = self.side.inv();
        self.outcome = None;
        debug!(mv = %record, "move taken back");
        Some(record)
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
