//! # Rookwise
//!
//! Chess rules engine: board model, legal move generation, check, checkmate and stalemate
//! detection, castling and pawn promotion, plus a small turn-taking [`Game`] driver.
//!
//! ```
//! use rookwise::{Color, Game, Outcome, WinReason};
//!
//! let mut game = Game::new();
//! game.push_str_list("F2 F3; E7 E5; G2 G4; D8 H4").unwrap();
//! assert_eq!(
//!     game.outcome(),
//!     Some(Outcome::Win { side: Color::Black, reason: WinReason::Checkmate }),
//! );
//! ```

pub mod attack;
pub mod board;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod player;
pub mod types;

pub use rookwise_base::{bitboard, geometry};

pub use bitboard::Bitboard;
pub use board::{Board, RawBoard};
pub use game::{Game, GameError, MoveRecord, PushStatus};
pub use movegen::MoveList;
pub use player::{MoveError, MoveStatus, PendingPromotion, Player, PromotePiece};
pub use types::{
    CastlingRights, CastlingSide, Cell, Color, DrawReason, File, Move, Outcome, Piece, Position,
    Rank, WinReason,
};
