use crate::types::{CastlingSide, Color, File, Position, Rank};

/// Rank on which the king and rooks of color `c` start
pub const fn castling_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

pub const fn double_move_src_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

/// Rank on which a pawn of color `c` gets promoted
pub const fn promote_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}

/// Row delta of a single pawn step
pub const fn pawn_forward_delta(c: Color) -> isize {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

pub const fn king_src(c: Color) -> Position {
    Position::from_parts(File::E, castling_rank(c))
}

pub const fn king_dst(c: Color, s: CastlingSide) -> Position {
    let file = match s {
        CastlingSide::King => File::G,
        CastlingSide::Queen => File::C,
    };
    Position::from_parts(file, castling_rank(c))
}

pub const fn rook_src(c: Color, s: CastlingSide) -> Position {
    let file = match s {
        CastlingSide::King => File::H,
        CastlingSide::Queen => File::A,
    };
    Position::from_parts(file, castling_rank(c))
}

pub const fn rook_dst(c: Color, s: CastlingSide) -> Position {
    let file = match s {
        CastlingSide::King => File::F,
        CastlingSide::Queen => File::D,
    };
    Position::from_parts(file, castling_rank(c))
}

/// Square the king crosses while castling
pub const fn king_transit(c: Color, s: CastlingSide) -> Position {
    rook_dst(c, s)
}
