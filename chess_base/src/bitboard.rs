use crate::types::Position;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::fmt;

/// Set of board positions
///
/// Bit `i` is set iff the position with index `i` belongs to the set. Iteration yields positions
/// in index order, i.e. from A8 to H1 row by row.
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    pub const fn from_position(pos: Position) -> Bitboard {
        Bitboard(1_u64 << pos.index())
    }

    pub const fn with(self, pos: Position) -> Bitboard {
        Bitboard(self.0 | (1_u64 << pos.index()))
    }

    pub const fn without(self, pos: Position) -> Bitboard {
        Bitboard(self.0 & !(1_u64 << pos.index()))
    }

    pub fn set(&mut self, pos: Position) {
        *self = self.with(pos);
    }

    pub fn unset(&mut self, pos: Position) {
        *self = self.without(pos);
    }

    pub const fn has(&self, pos: Position) -> bool {
        ((self.0 >> pos.index()) & 1) != 0
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Bitboard({})", self)
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in 0..8 {
            if row != 0 {
                write!(f, "/")?;
            }
            let byte = ((self.0 >> (row * 8)) & 0xff) as u8;
            write!(f, "{:08b}", byte.reverse_bits())?;
        }
        Ok(())
    }
}

pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros();
        self.0 &= self.0.wrapping_sub(1_u64);
        unsafe { Some(Position::from_index_unchecked(bit as usize)) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for Bitboard {
    type Item = Position;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}

impl FromIterator<Position> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut res = Bitboard::EMPTY;
        for pos in iter {
            res.set(pos);
        }
        res
    }
}

impl Extend<Position> for Bitboard {
    fn extend<I: IntoIterator<Item = Position>>(&mut self, iter: I) {
        for pos in iter {
            self.set(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Position, Rank};

    #[test]
    fn test_iter() {
        let bb = Bitboard::EMPTY
            .with(Position::from_parts(File::A, Rank::R4))
            .with(Position::from_parts(File::E, Rank::R2))
            .with(Position::from_parts(File::F, Rank::R3));
        assert_eq!(
            bb.into_iter().collect::<Vec<_>>(),
            vec![
                Position::from_parts(File::A, Rank::R4),
                Position::from_parts(File::F, Rank::R3),
                Position::from_parts(File::E, Rank::R2)
            ],
        );
        assert_eq!(bb.into_iter().len(), 3);
        assert_eq!(bb.into_iter().collect::<Bitboard>(), bb);
    }

    #[test]
    fn test_bitops() {
        let ca = Position::from_parts(File::A, Rank::R4);
        let cb = Position::from_parts(File::E, Rank::R2);
        let cc = Position::from_parts(File::F, Rank::R3);

        let bb1 = Bitboard::EMPTY.with(ca).with(cb);
        let bb2 = Bitboard::EMPTY.with(cb).with(cc);
        assert_eq!(bb1 & bb2, Bitboard::EMPTY.with(cb));
        assert_eq!(bb1 | bb2, Bitboard::EMPTY.with(ca).with(cb).with(cc));
        assert_eq!(bb1 ^ bb2, Bitboard::EMPTY.with(ca).with(cc));
        assert!(bb1.has(ca));
        assert!(!bb1.has(cc));
        assert_eq!(bb1.without(ca), Bitboard::from_position(cb));

        assert_eq!((!bb1).into_iter().count(), 62);
        assert_eq!((!bb1).len(), 62);
    }

    #[test]
    fn test_format() {
        let bb = Bitboard::EMPTY
            .with(Position::from_parts(File::A, Rank::R4))
            .with(Position::from_parts(File::E, Rank::R2))
            .with(Position::from_parts(File::F, Rank::R3))
            .with(Position::from_parts(File::H, Rank::R8));
        assert_eq!(
            bb.to_string(),
            "00000001/00000000/00000000/00000000/10000000/00000100/00001000/00000000"
        );
    }
}
