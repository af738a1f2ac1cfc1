//! Move generation
//!
//! Destinations are produced in two layers. [`pseudo_legal()`] only looks at piece geometry and
//! occupancy, and [`possible_moves()`] drops the destinations which leave the own king in check.
//! The check filter lives only in [`possible_moves()`], everything else builds on it.

use crate::attack::{KING_OFFSETS, KNIGHT_OFFSETS};
use crate::bitboard::Bitboard;
use crate::board::RawBoard;
use crate::geometry;
use crate::types::{CastlingSide, Color, Move, Piece, Position};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

const DIAG_DIRS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const LINE_DIRS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// List of moves with fixed capacity
///
/// No legal chess position has more than 218 moves, so 256 is enough to hold all of them.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 256>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a mut MoveList {
    type Item = &'a mut Move;
    type IntoIter = slice::IterMut<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

/// Sink for generated moves
pub trait MovePush {
    fn push(&mut self, m: Move);
}

impl MovePush for MoveList {
    fn push(&mut self, m: Move) {
        self.0.push(m);
    }
}

impl MovePush for Vec<Move> {
    fn push(&mut self, m: Move) {
        Vec::push(self, m);
    }
}

fn can_land(b: &RawBoard, c: Color, dst: Position) -> bool {
    b.get(dst).color() != Some(c)
}

fn add_offsets(b: &RawBoard, c: Color, from: Position, offsets: &[(isize, isize)]) -> Bitboard {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.try_shift(dr, dc))
        .filter(|&dst| can_land(b, c, dst))
        .collect()
}

fn add_rays(b: &RawBoard, c: Color, from: Position, dirs: &[(isize, isize)]) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    for &(dr, dc) in dirs {
        let mut cur = from;
        while let Some(dst) = cur.try_shift(dr, dc) {
            match b.get(dst).color() {
                None => res.set(dst),
                Some(other) => {
                    if other != c {
                        res.set(dst);
                    }
                    break;
                }
            }
            cur = dst;
        }
    }
    res
}

fn pawn(b: &RawBoard, c: Color, from: Position) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    let fwd = geometry::pawn_forward_delta(c);

    if let Some(one) = from.try_shift(fwd, 0) {
        if b.get(one).is_empty() {
            res.set(one);
            if from.rank() == geometry::double_move_src_rank(c) {
                if let Some(two) = one.try_shift(fwd, 0) {
                    if b.get(two).is_empty() {
                        res.set(two);
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(dst) = from.try_shift(fwd, dc) {
            if b.get(dst).color() == Some(c.inv()) {
                res.set(dst);
            }
        }
    }
    res
}

fn king(b: &RawBoard, c: Color, from: Position) -> Bitboard {
    let mut res = add_offsets(b, c, from, &KING_OFFSETS);
    if from == geometry::king_src(c) && b.castling.has_color(c) {
        for s in [CastlingSide::King, CastlingSide::Queen] {
            if b.can_castle(c, s) {
                res.set(geometry::king_dst(c, s));
            }
        }
    }
    res
}

/// Returns the destinations of the piece on `from`, ignoring the safety of its own king
///
/// Castling destinations are included when [`RawBoard::can_castle()`] holds. Returns an empty
/// set if `from` is empty.
pub fn pseudo_legal(b: &RawBoard, from: Position) -> Bitboard {
    let (c, piece) = match b.get(from).parts() {
        Some(parts) => parts,
        None => return Bitboard::EMPTY,
    };
    match piece {
        Piece::Pawn => pawn(b, c, from),
        Piece::Knight => add_offsets(b, c, from, &KNIGHT_OFFSETS),
        Piece::King => king(b, c, from),
        Piece::Bishop => add_rays(b, c, from, &DIAG_DIRS),
        Piece::Rook => add_rays(b, c, from, &LINE_DIRS),
        Piece::Queen => add_rays(b, c, from, &DIAG_DIRS) | add_rays(b, c, from, &LINE_DIRS),
    }
}

/// Returns the destinations of the piece on `from` which don't leave its own king in check
pub fn possible_moves(b: &RawBoard, from: Position) -> Bitboard {
    pseudo_legal(b, from)
        .into_iter()
        .filter(|&dst| !b.would_be_in_check(from, dst))
        .collect()
}

/// Pushes all the legal moves of color `c` into `dst`
pub fn legal_moves_into<P: MovePush>(b: &RawBoard, c: Color, dst: &mut P) {
    for from in b.color(c) {
        for to in possible_moves(b, from) {
            dst.push(Move::new(from, to));
        }
    }
}

/// Returns all the legal moves of color `c`
pub fn legal_moves(b: &RawBoard, c: Color) -> MoveList {
    let mut res = MoveList::new();
    legal_moves_into(b, c, &mut res);
    res
}

/// Returns `true` if color `c` has at least one legal move
///
/// Stops on the first piece which can move, so it is faster than checking that
/// [`legal_moves()`] is non-empty.
pub fn has_legal_moves(b: &RawBoard, c: Color) -> bool {
    b.color(c)
        .into_iter()
        .any(|from| possible_moves(b, from).is_nonempty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack;
    use crate::board::tests::board_with;
    use crate::board::Board;
    use crate::types::Cell;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn pos(s: &str) -> Position {
        Position::from_notation(s).unwrap()
    }

    fn names(bb: Bitboard) -> Vec<String> {
        bb.into_iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_initial() {
        let b = Board::initial();
        assert_eq!(legal_moves(b.raw(), Color::White).len(), 20);
        assert_eq!(legal_moves(b.raw(), Color::Black).len(), 20);
        assert_eq!(names(b.possible_moves(pos("E2"))), vec!["E4", "E3"]);
        assert_eq!(names(b.possible_moves(pos("G1"))), vec!["F3", "H3"]);
        assert!(b.possible_moves(pos("E1")).is_empty());
        assert!(b.possible_moves(pos("E4")).is_empty());
    }

    #[test]
    fn test_pawn() {
        let b = board_with(&[("E3", 'P'), ("E4", 'n'), ("D4", 'p'), ("F4", 'P'), ("B7", 'p')]);
        let r = b.raw();
        assert_eq!(names(pseudo_legal(r, pos("E3"))), vec!["D4"]);
        assert_eq!(names(pseudo_legal(r, pos("B7"))), vec!["B6", "B5"]);
        assert_eq!(names(pseudo_legal(r, pos("D4"))), vec!["D3", "E3"]);

        // Double step needs both squares empty
        let b = board_with(&[("C2", 'P'), ("C4", 'p'), ("G2", 'P'), ("G3", 'N')]);
        assert_eq!(names(pseudo_legal(b.raw(), pos("C2"))), vec!["C3"]);
        assert!(pseudo_legal(b.raw(), pos("G2")).is_empty());
    }

    #[test]
    fn test_sliders() {
        let b = board_with(&[("D4", 'Q'), ("D6", 'p'), ("D2", 'P'), ("F6", 'P')]);
        let r = b.raw();
        let moves = pseudo_legal(r, pos("D4"));
        assert!(moves.has(pos("D6")));
        assert!(!moves.has(pos("D7")));
        assert!(moves.has(pos("D3")));
        assert!(!moves.has(pos("D2")));
        assert!(moves.has(pos("E5")));
        assert!(!moves.has(pos("F6")));
        assert!(moves.has(pos("A1")));
        assert!(moves.has(pos("H4")));
        assert_eq!(moves.len(), 2 + 1 + 3 + 4 + 1 + 3 + 3 + 3);

        let b = board_with(&[("A1", 'R'), ("A2", 'P'), ("B1", 'n')]);
        assert_eq!(names(pseudo_legal(b.raw(), pos("A1"))), vec!["B1"]);
    }

    #[test]
    fn test_castling_destinations() {
        let b = board_with(&[("E1", 'K'), ("H1", 'R'), ("A1", 'R'), ("E8", 'k'), ("D5", 'r')]);
        let moves = b.possible_moves(pos("E1"));
        assert!(moves.has(pos("G1")));
        assert!(!moves.has(pos("C1")));
        assert!(!moves.has(pos("D1")));
        assert!(!moves.has(pos("D2")));
        assert!(moves.has(pos("F1")));
    }

    #[test]
    fn test_pinned_piece() {
        let b = board_with(&[("E1", 'K'), ("E2", 'N'), ("E8", 'r'), ("A8", 'k')]);
        assert!(pseudo_legal(b.raw(), pos("E2")).is_nonempty());
        assert!(b.possible_moves(pos("E2")).is_empty());
        assert!(b.has_any_valid_moves(Color::White));
    }

    #[test]
    fn test_checkmate_and_stalemate() {
        let mate = board_with(&[("G8", 'k'), ("F7", 'p'), ("G7", 'p'), ("H7", 'p'), ("A8", 'R'), ("E1", 'K')]);
        assert!(mate.is_check(Color::Black));
        assert!(mate.is_checkmate(Color::Black));
        assert!(!mate.is_stalemate(Color::Black));
        assert!(legal_moves(mate.raw(), Color::Black).is_empty());

        let stale = board_with(&[("H8", 'k'), ("G6", 'Q'), ("F7", 'K')]);
        assert!(!stale.is_check(Color::Black));
        assert!(stale.is_stalemate(Color::Black));
        assert!(!stale.is_checkmate(Color::Black));
        assert!(!stale.is_stalemate(Color::White));

        let bare = board_with(&[("E1", 'K')]);
        assert!(bare.is_stalemate(Color::Black));
    }

    #[test]
    fn test_move_list_sinks() {
        let b = Board::initial();
        let mut vec = Vec::new();
        legal_moves_into(b.raw(), Color::White, &mut vec);
        let list = legal_moves(b.raw(), Color::White);
        assert_eq!(vec.as_slice(), list.as_slice());
        assert!((&list).into_iter().all(|mv| b.get(mv.from).color() == Some(Color::White)));
    }

    fn check_invariants(b: &Board) {
        for c in [Color::White, Color::Black] {
            let king = Cell::from_parts(c, Piece::King);
            assert!(Position::iter().filter(|&p| b.get(p) == king).count() <= 1);

            let by_attack = match b.find_king(c) {
                Some(k) => Position::iter().any(|p| {
                    b.get(p).color() == Some(c.inv()) && attack::can_attack(b.raw(), p, k)
                }),
                None => false,
            };
            assert_eq!(b.is_check(c), by_attack);
            assert_eq!(b.checkers(c).is_nonempty(), b.is_check(c));
            assert!(!(b.is_checkmate(c) && b.is_stalemate(c)));
            if b.has_any_valid_moves(c) {
                assert!(!b.is_checkmate(c) && !b.is_stalemate(c));
            }

            for mv in &legal_moves(b.raw(), c) {
                let before = b.clone();
                assert!(!b.would_be_in_check(mv.from, mv.to));
                assert_eq!(*b, before);

                let mut after = b.clone();
                after.move_piece(mv.from, mv.to);
                assert!(!after.is_check(c), "{} leaves king in check", mv);
            }
        }
    }

    #[test]
    fn test_random_playouts() {
        let mut rng = StdRng::seed_from_u64(0x5eed_c4e5);
        for _ in 0..8 {
            let mut b = Board::initial();
            let mut side = Color::White;
            for _ in 0..80 {
                check_invariants(&b);
                let moves = legal_moves(b.raw(), side);
                if moves.is_empty() {
                    break;
                }
                let mv = moves[rng.gen_range(0..moves.len())];
                b.move_piece(mv.from, mv.to);
                if b.get(mv.to).is(side, Piece::Pawn)
                    && mv.to.rank() == geometry::promote_dst_rank(side)
                {
                    b.set_piece(mv.to, Cell::from_parts(side, Piece::Queen));
                }
                side = side.inv();
            }
        }
    }
}
