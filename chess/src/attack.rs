//! Attack reach of pieces
//!
//! A piece attacks a square if it could capture on it were an enemy piece standing there. Reach
//! only depends on the piece geometry and on blockers between the piece and the target: the
//! contents of the target square, the side to move and the safety of the own king are ignored.
//! This is what check detection is built on.

use crate::bitboard::Bitboard;
use crate::board::RawBoard;
use crate::geometry;
use crate::types::{Color, Piece, Position};

pub(crate) const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub(crate) const KING_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn delta(from: Position, to: Position) -> (isize, isize) {
    (
        to.row() as isize - from.row() as isize,
        to.col() as isize - from.col() as isize,
    )
}

/// Returns `true` if every square strictly between `from` and `to` is empty
///
/// `from` and `to` must lie on the same rank, file or diagonal.
fn is_path_clear(b: &RawBoard, from: Position, to: Position) -> bool {
    let (dr, dc) = delta(from, to);
    let (step_r, step_c) = (dr.signum(), dc.signum());
    let mut cur = from;
    loop {
        cur = match cur.try_shift(step_r, step_c) {
            Some(p) => p,
            None => return false,
        };
        if cur == to {
            return true;
        }
        if b.get(cur).is_occupied() {
            return false;
        }
    }
}

#[inline]
pub fn pawn(c: Color, from: Position, target: Position) -> bool {
    let (dr, dc) = delta(from, target);
    dr == geometry::pawn_forward_delta(c) && dc.abs() == 1
}

#[inline]
pub fn knight(from: Position, target: Position) -> bool {
    let (dr, dc) = delta(from, target);
    matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1))
}

#[inline]
pub fn king(from: Position, target: Position) -> bool {
    let (dr, dc) = delta(from, target);
    from != target && dr.abs() <= 1 && dc.abs() <= 1
}

pub fn bishop(b: &RawBoard, from: Position, target: Position) -> bool {
    let (dr, dc) = delta(from, target);
    dr != 0 && dr.abs() == dc.abs() && is_path_clear(b, from, target)
}

pub fn rook(b: &RawBoard, from: Position, target: Position) -> bool {
    let (dr, dc) = delta(from, target);
    from != target && (dr == 0 || dc == 0) && is_path_clear(b, from, target)
}

pub fn queen(b: &RawBoard, from: Position, target: Position) -> bool {
    rook(b, from, target) || bishop(b, from, target)
}

/// Returns `true` if the piece standing on `from` reaches `target`
///
/// Returns `false` if `from` is empty.
pub fn can_attack(b: &RawBoard, from: Position, target: Position) -> bool {
    let (color, piece) = match b.get(from).parts() {
        Some(parts) => parts,
        None => return false,
    };
    match piece {
        Piece::Pawn => pawn(color, from, target),
        Piece::Knight => knight(from, target),
        Piece::King => king(from, target),
        Piece::Bishop => bishop(b, from, target),
        Piece::Rook => rook(b, from, target),
        Piece::Queen => queen(b, from, target),
    }
}

/// Returns all the pieces of color `by` which reach `target`
pub fn attackers(b: &RawBoard, target: Position, by: Color) -> Bitboard {
    Position::iter()
        .filter(|&p| b.get(p).color() == Some(by) && can_attack(b, p, target))
        .collect()
}

/// Returns `true` if any piece of color `by` reaches `target`
pub fn is_attacked(b: &RawBoard, target: Position, by: Color) -> bool {
    Position::iter().any(|p| b.get(p).color() == Some(by) && can_attack(b, p, target))
}
