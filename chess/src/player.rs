//! Single move attempts on behalf of one side

use crate::board::Board;
use crate::geometry;
use crate::types::{Cell, Color, Piece, Position};

use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

/// Target piece for promotion
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotePiece {
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl PromotePiece {
    /// Interprets a user's promotion choice
    ///
    /// Accepts one of `Q`, `R`, `B`, `N` in any case, surrounded by optional whitespace. Any other
    /// input, including an empty string, means [`PromotePiece::Queen`].
    pub fn from_choice(s: &str) -> PromotePiece {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => PromotePiece::from_char(c).unwrap_or(PromotePiece::Queen),
            _ => PromotePiece::Queen,
        }
    }

    pub fn from_char(c: char) -> Option<PromotePiece> {
        match c.to_ascii_uppercase() {
            'N' => Some(PromotePiece::Knight),
            'B' => Some(PromotePiece::Bishop),
            'R' => Some(PromotePiece::Rook),
            'Q' => Some(PromotePiece::Queen),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            PromotePiece::Knight => 'N',
            PromotePiece::Bishop => 'B',
            PromotePiece::Rook => 'R',
            PromotePiece::Queen => 'Q',
        }
    }
}

impl Default for PromotePiece {
    #[inline]
    fn default() -> Self {
        PromotePiece::Queen
    }
}

impl fmt::Display for PromotePiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl From<PromotePiece> for Piece {
    #[inline]
    fn from(p: PromotePiece) -> Self {
        match p {
            PromotePiece::Knight => Piece::Knight,
            PromotePiece::Bishop => Piece::Bishop,
            PromotePiece::Rook => Piece::Rook,
            PromotePiece::Queen => Piece::Queen,
        }
    }
}

impl TryFrom<Piece> for PromotePiece {
    type Error = ();

    #[inline]
    fn try_from(p: Piece) -> Result<Self, Self::Error> {
        match p {
            Piece::Knight => Ok(PromotePiece::Knight),
            Piece::Bishop => Ok(PromotePiece::Bishop),
            Piece::Rook => Ok(PromotePiece::Rook),
            Piece::Queen => Ok(PromotePiece::Queen),
            _ => Err(()),
        }
    }
}

/// Error indicating that a move attempt was rejected
///
/// The board is never modified when an error is returned.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    #[error("no piece on {0}")]
    NoPiece(Position),
    #[error("piece on {0} doesn't belong to {1}")]
    NotYourPiece(Position, Color),
    #[error("move {from} {to} is not legal")]
    IllegalMove { from: Position, to: Position },
    #[error("pending promotion doesn't apply to the board anymore")]
    StalePromotion,
}

/// Pawn move to the last rank which waits for the choice of the new piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PendingPromotion {
    from: Position,
    to: Position,
    color: Color,
}

impl PendingPromotion {
    #[inline]
    pub fn from(&self) -> Position {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Position {
        self.to
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
}

/// Result of a successful [`Player::make_move()`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveStatus {
    /// The move is on the board
    Applied,
    /// The move is a promotion and the board is not changed yet
    ///
    /// Pass the value to [`Player::finish_promotion()`] to complete the move.
    PromotionPending(PendingPromotion),
}

/// One side of the game
///
/// A player is only allowed to move its own pieces, and only along the destinations returned by
/// [`Board::possible_moves()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    color: Color,
}

impl Player {
    #[inline]
    pub fn new(color: Color) -> Player {
        Player { color }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    fn validate(&self, board: &Board, from: Position, to: Position) -> Result<Piece, MoveError> {
        let (color, piece) = board.get_piece(from).ok_or(MoveError::NoPiece(from))?;
        if color != self.color {
            return Err(MoveError::NotYourPiece(from, self.color));
        }
        if !board.possible_moves(from).has(to) {
            return Err(MoveError::IllegalMove { from, to });
        }
        Ok(piece)
    }

    fn is_promotion(&self, piece: Piece, to: Position) -> bool {
        piece == Piece::Pawn && to.rank() == geometry::promote_dst_rank(self.color)
    }

    /// Tries to move the piece from `from` to `to`
    ///
    /// If the move is a pawn promotion, the board is left untouched and
    /// [`MoveStatus::PromotionPending`] is returned. Otherwise, the move is applied.
    pub fn make_move(
        &self,
        board: &mut Board,
        from: Position,
        to: Position,
    ) -> Result<MoveStatus, MoveError> {
        let piece = self.validate(board, from, to).map_err(|e| {
            trace!(color = %self.color, %from, %to, error = %e, "move rejected");
            e
        })?;
        if self.is_promotion(piece, to) {
            debug!(color = %self.color, %from, %to, "promotion pending");
            return Ok(MoveStatus::PromotionPending(PendingPromotion {
                from,
                to,
                color: self.color,
            }));
        }
        board.move_piece(from, to);
        debug!(color = %self.color, %from, %to, piece = %piece, "move applied");
        Ok(MoveStatus::Applied)
    }

    /// Completes a promotion returned by [`Player::make_move()`]
    ///
    /// The move is checked again against the current board, so a promotion which became
    /// impossible since then is rejected with [`MoveError::StalePromotion`].
    pub fn finish_promotion(
        &self,
        board: &mut Board,
        pending: PendingPromotion,
        choice: PromotePiece,
    ) -> Result<(), MoveError> {
        let PendingPromotion { from, to, color } = pending;
        let still_valid = color == self.color
            && matches!(self.validate(board, from, to), Ok(piece) if self.is_promotion(piece, to));
        if !still_valid {
            trace!(color = %self.color, %from, %to, "stale promotion");
            return Err(MoveError::StalePromotion);
        }
        board.move_piece(from, to);
        board.set_piece(to, Cell::from_parts(color, choice.into()));
        debug!(color = %color, %from, %to, promote = %choice, "promotion applied");
        Ok(())
    }

    /// Makes the move and resolves a promotion with `choice` immediately
    ///
    /// Returns the promotion that took place, if any.
    pub fn make_move_with(
        &self,
        board: &mut Board,
        from: Position,
        to: Position,
        choice: PromotePiece,
    ) -> Result<Option<PromotePiece>, MoveError> {
        match self.make_move(board, from, to)? {
            MoveStatus::Applied => Ok(None),
            MoveStatus::PromotionPending(pending) => {
                self.finish_promotion(board, pending, choice)?;
                Ok(Some(choice))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::board_with;

    fn pos(s: &str) -> Position {
        Position::from_notation(s).unwrap()
    }

    #[test]
    fn test_from_choice() {
        assert_eq!(PromotePiece::from_choice("R"), PromotePiece::Rook);
        assert_eq!(PromotePiece::from_choice(" n "), PromotePiece::Knight);
        assert_eq!(PromotePiece::from_choice("b"), PromotePiece::Bishop);
        assert_eq!(PromotePiece::from_choice("Q"), PromotePiece::Queen);
        assert_eq!(PromotePiece::from_choice(""), PromotePiece::Queen);
        assert_eq!(PromotePiece::from_choice("x"), PromotePiece::Queen);
        assert_eq!(PromotePiece::from_choice("RR"), PromotePiece::Queen);
        assert_eq!(PromotePiece::from_choice("K"), PromotePiece::Queen);
        assert_eq!(Piece::from(PromotePiece::Bishop), Piece::Bishop);
        assert_eq!(PromotePiece::try_from(Piece::Pawn), Err(()));
    }

    #[test]
    fn test_simple_move() {
        let mut b = Board::initial();
        let white = Player::new(Color::White);
        assert_eq!(
            white.make_move(&mut b, pos("E2"), pos("E4")),
            Ok(MoveStatus::Applied)
        );
        assert_eq!(b.get_piece(pos("E4")), Some((Color::White, Piece::Pawn)));
        assert!(b.get(pos("E2")).is_empty());
    }

    #[test]
    fn test_rejected() {
        let mut b = Board::initial();
        let before = b.clone();
        let white = Player::new(Color::White);
        assert_eq!(
            white.make_move(&mut b, pos("E7"), pos("E5")),
            Err(MoveError::NotYourPiece(pos("E7"), Color::White))
        );
        assert_eq!(
            white.make_move(&mut b, pos("E4"), pos("E5")),
            Err(MoveError::NoPiece(pos("E4")))
        );
        assert_eq!(
            white.make_move(&mut b, pos("E2"), pos("E5")),
            Err(MoveError::IllegalMove {
                from: pos("E2"),
                to: pos("E5")
            })
        );
        assert_eq!(b, before);
    }

    #[test]
    fn test_promotion() {
        let mut b = board_with(&[("A7", 'P'), ("E1", 'K'), ("H5", 'k')]);
        let white = Player::new(Color::White);
        let before = b.clone();

        let pending = match white.make_move(&mut b, pos("A7"), pos("A8")) {
            Ok(MoveStatus::PromotionPending(p)) => p,
            other => panic!("unexpected result {:?}", other),
        };
        assert_eq!(pending.from(), pos("A7"));
        assert_eq!(pending.to(), pos("A8"));
        assert_eq!(pending.color(), Color::White);
        assert_eq!(b, before);

        white
            .finish_promotion(&mut b, pending, PromotePiece::from_choice("R"))
            .unwrap();
        assert_eq!(b.get_piece(pos("A8")), Some((Color::White, Piece::Rook)));
        assert!(b.get(pos("A7")).is_empty());
    }

    #[test]
    fn test_stale_promotion() {
        let mut b = board_with(&[("A7", 'P'), ("E1", 'K'), ("H5", 'k')]);
        let white = Player::new(Color::White);
        let pending = match white.make_move(&mut b, pos("A7"), pos("A8")) {
            Ok(MoveStatus::PromotionPending(p)) => p,
            other => panic!("unexpected result {:?}", other),
        };

        let mut blocked = b.clone();
        blocked.set_piece(pos("A8"), Cell::from_parts(Color::Black, Piece::Knight));
        let before = blocked.clone();
        assert_eq!(
            white.finish_promotion(&mut blocked, pending, PromotePiece::Queen),
            Err(MoveError::StalePromotion)
        );
        assert_eq!(blocked, before);

        let black = Player::new(Color::Black);
        assert_eq!(
            black.finish_promotion(&mut b, pending, PromotePiece::Queen),
            Err(MoveError::StalePromotion)
        );
    }

    #[test]
    fn test_promotion_with_capture() {
        let mut b = board_with(&[("B2", 'p'), ("A1", 'R'), ("E1", 'K'), ("E8", 'k')]);
        let black = Player::new(Color::Black);
        assert_eq!(
            black.make_move_with(&mut b, pos("B2"), pos("A1"), PromotePiece::Knight),
            Ok(Some(PromotePiece::Knight))
        );
        assert_eq!(b.get_piece(pos("A1")), Some((Color::Black, Piece::Knight)));
        assert_eq!(
            b.captured(Color::White),
            &[Cell::from_parts(Color::White, Piece::Rook)]
        );

        let mut b = board_with(&[("H2", 'p'), ("E1", 'K'), ("E8", 'k')]);
        assert_eq!(
            black.make_move_with(&mut b, pos("H2"), pos("H1"), PromotePiece::default()),
            Ok(Some(PromotePiece::Queen))
        );
        assert_eq!(b.get_piece(pos("H1")), Some((Color::Black, Piece::Queen)));
        assert!(b.is_check(Color::White));
    }
}
