//! Board and related things

use crate::bitboard::Bitboard;
use crate::types::{CastlingRights, CastlingSide, Cell, Color, File, Piece, Position, Rank};
use crate::{attack, geometry, movegen};

use std::fmt;

/// Raw chess board
///
/// Contains the placement of pieces and the castling rights. Unlike [`Board`], it doesn't keep
/// the capture lists, so it is cheap to copy. All the rule queries (check detection, castling
/// eligibility, simulation of moves) are implemented on `RawBoard` and work on a copy when they
/// need to try out a move, so they never modify the board they are called on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawBoard {
    /// Contents of the board
    ///
    /// The indices in this array are the indices of positions. You might probably want to use
    /// the functions like [`RawBoard::get()`] or [`RawBoard::put()`] instead of indexing this array
    /// directly.
    pub cells: [Cell; 64],
    /// Castling rights
    pub castling: CastlingRights,
}

impl RawBoard {
    /// Returns an empty `RawBoard`
    ///
    /// All the castling rights are set, so a king and a rook put on their home squares may
    /// castle, as if they have never moved.
    #[inline]
    pub const fn empty() -> RawBoard {
        RawBoard {
            cells: [Cell::EMPTY; 64],
            castling: CastlingRights::FULL,
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> RawBoard {
        let mut res = RawBoard::empty();
        for file in File::iter() {
            res.put2(file, Rank::R2, Cell::from_parts(Color::White, Piece::Pawn));
            res.put2(file, Rank::R7, Cell::from_parts(Color::Black, Piece::Pawn));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R8)] {
            res.put2(File::A, rank, Cell::from_parts(color, Piece::Rook));
            res.put2(File::B, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::C, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::D, rank, Cell::from_parts(color, Piece::Queen));
            res.put2(File::E, rank, Cell::from_parts(color, Piece::King));
            res.put2(File::F, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::G, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::H, rank, Cell::from_parts(color, Piece::Rook));
        }
        res
    }

    /// Returns the contents of the square with position `p`
    #[inline]
    pub fn get(&self, p: Position) -> Cell {
        self.cells[p.index()]
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Position::from_parts(file, rank))
    }

    /// Puts `cell` to the square with position `p`
    #[inline]
    pub fn put(&mut self, p: Position, cell: Cell) {
        self.cells[p.index()] = cell;
    }

    /// Puts `cell` to the square with file `file` and rank `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Position::from_parts(file, rank), cell);
    }

    /// Returns all the squares occupied by pieces of color `c`
    pub fn color(&self, c: Color) -> Bitboard {
        Position::iter()
            .filter(|&p| self.get(p).color() == Some(c))
            .collect()
    }

    /// Returns the position of the king of color `c`, or `None` if there is no such king
    pub fn find_king(&self, c: Color) -> Option<Position> {
        let king = Cell::from_parts(c, Piece::King);
        Position::iter().find(|&p| self.get(p) == king)
    }

    /// Returns `true` if the king of color `c` is attacked by any opponent's piece
    ///
    /// A side without a king is never in check.
    pub fn is_check(&self, c: Color) -> bool {
        match self.find_king(c) {
            Some(king) => attack::is_attacked(self, king, c.inv()),
            None => false,
        }
    }

    /// Returns all the pieces that give check to the king of color `c`
    pub fn checkers(&self, c: Color) -> Bitboard {
        match self.find_king(c) {
            Some(king) => attack::attackers(self, king, c.inv()),
            None => Bitboard::EMPTY,
        }
    }

    /// Returns `true` if moving the piece from `from` to `to` leaves its own king in check
    ///
    /// The move is tried on a copy, so this board stays untouched. Returns `false` if `from`
    /// is empty.
    pub fn would_be_in_check(&self, from: Position, to: Position) -> bool {
        let cell = self.get(from);
        let color = match cell.color() {
            Some(c) => c,
            None => return false,
        };
        let mut tmp = *self;
        tmp.put(from, Cell::EMPTY);
        tmp.put(to, cell);
        tmp.is_check(color)
    }

    /// Returns `true` if the side `c` may castle to the side `s` right now
    ///
    /// This holds iff the king and the rook stand on their home squares, the corresponding
    /// castling right is still present, the squares between them are empty, the king is not
    /// in check and doesn't cross or land on an attacked square.
    pub fn can_castle(&self, c: Color, s: CastlingSide) -> bool {
        let king = geometry::king_src(c);
        let rook = geometry::rook_src(c, s);
        if !self.castling.has(c, s)
            || !self.get(king).is(c, Piece::King)
            || !self.get(rook).is(c, Piece::Rook)
        {
            return false;
        }

        let row = king.row() as isize;
        let (lo, hi) = if king.col() < rook.col() {
            (king.col(), rook.col())
        } else {
            (rook.col(), king.col())
        };
        let blocked = (lo + 1..hi)
            .filter_map(|col| Position::try_new(row, col as isize))
            .any(|p| self.get(p).is_occupied());
        if blocked {
            return false;
        }

        !self.is_check(c)
            && !self.would_be_in_check(king, geometry::king_transit(c, s))
            && !self.would_be_in_check(king, geometry::king_dst(c, s))
    }

    #[inline]
    pub fn can_castle_kingside(&self, c: Color) -> bool {
        self.can_castle(c, CastlingSide::King)
    }

    #[inline]
    pub fn can_castle_queenside(&self, c: Color) -> bool {
        self.can_castle(c, CastlingSide::Queen)
    }

    /// Clears the castling rights which are lost after something moves from `from` to `to`
    ///
    /// A right is lost if the king or the rook leaves its home square, or if any piece lands
    /// on it, which means that the rook is captured.
    fn revoke_castling(&mut self, from: Position, to: Position) {
        for c in [Color::White, Color::Black] {
            let king = geometry::king_src(c);
            if from == king || to == king {
                self.castling.unset_color(c);
            }
            for s in [CastlingSide::King, CastlingSide::Queen] {
                let rook = geometry::rook_src(c, s);
                if from == rook || to == rook {
                    self.castling.unset(c, s);
                }
            }
        }
    }

    #[cfg(feature = "selftest")]
    fn selftest(&self) {
        for c in [Color::White, Color::Black] {
            let king = Cell::from_parts(c, Piece::King);
            let kings = self.cells.iter().filter(|&&cell| cell == king).count();
            assert!(kings <= 1, "more than one king of color {:?}", c);
        }
    }
}

impl Default for RawBoard {
    #[inline]
    fn default() -> RawBoard {
        RawBoard::empty()
    }
}

/// Chess board
///
/// Holds the [`RawBoard`] together with the lists of captured pieces. This is the board which is
/// used by [`Player`](crate::player::Player) and [`Game`](crate::game::Game): it is the only
/// place where moves are applied.
///
/// The board doesn't validate anything on mutation. [`Board::set_piece()`] and
/// [`Board::move_piece()`] do exactly what they are asked to do, and it is the caller's
/// responsibility to check legality before (see [`Board::possible_moves()`]).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    pub(crate) r: RawBoard,
    captured: [Vec<Cell>; 2],
}

impl Board {
    /// Returns a board with the initial position
    pub fn initial() -> Board {
        Board {
            r: RawBoard::initial(),
            captured: Default::default(),
        }
    }

    /// Same as [`Board::initial()`]
    #[inline]
    pub fn new() -> Board {
        Board::initial()
    }

    /// Returns a board without any pieces
    pub fn empty() -> Board {
        Board {
            r: RawBoard::empty(),
            captured: Default::default(),
        }
    }

    /// Removes all the pieces and captures, and restores all the castling rights
    pub fn clear(&mut self) {
        self.r = RawBoard::empty();
        for list in &mut self.captured {
            list.clear();
        }
    }

    /// Returns a view over the raw board
    #[inline]
    pub fn raw(&self) -> &RawBoard {
        &self.r
    }

    /// Returns `true` if `(row, col)` lies on the board
    #[inline]
    pub fn is_in_bounds(row: isize, col: isize) -> bool {
        Position::try_new(row, col).is_some()
    }

    /// Returns the contents of the square with position `p`
    #[inline]
    pub fn get(&self, p: Position) -> Cell {
        self.r.get(p)
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.r.get2(file, rank)
    }

    /// Returns the contents of the square `(row, col)`, or an empty cell if it is out of bounds
    #[inline]
    pub fn get_at(&self, row: isize, col: isize) -> Cell {
        Position::try_new(row, col)
            .map(|p| self.get(p))
            .unwrap_or(Cell::EMPTY)
    }

    /// Returns color and kind of the piece on `p`, or `None` if the square is empty
    #[inline]
    pub fn get_piece(&self, p: Position) -> Option<(Color, Piece)> {
        self.get(p).parts()
    }

    /// Puts `cell` to the square with position `p`, replacing whatever was there
    ///
    /// Doesn't change the castling rights and the capture lists.
    #[inline]
    pub fn set_piece(&mut self, p: Position, cell: Cell) {
        self.r.put(p, cell);
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.r.castling
    }

    #[inline]
    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.r.castling = rights;
    }

    /// Returns the pieces of color `c` which were captured, in capture order
    #[inline]
    pub fn captured(&self, c: Color) -> &[Cell] {
        &self.captured[c.index()]
    }

    /// Moves the piece from `from` to `to` without any legality checks
    ///
    /// If `to` is occupied, its contents goes to the capture list. Castling rights are updated
    /// for kings and rooks leaving their home squares or for rooks captured there. If the piece
    /// is a king which moves by two files, the rook from the corresponding corner of the same
    /// rank is moved to the square the king has crossed.
    ///
    /// Does nothing if `from` is empty.
    pub fn move_piece(&mut self, from: Position, to: Position) {
        let moving = self.r.get(from);
        let (color, piece) = match moving.parts() {
            Some(parts) => parts,
            None => return,
        };

        let target = self.r.get(to);
        if let Some(c) = target.color() {
            self.captured[c.index()].push(target);
        }

        self.r.put(from, Cell::EMPTY);
        self.r.put(to, moving);
        self.r.revoke_castling(from, to);

        if piece == Piece::King && from.row() == to.row() && from.col().abs_diff(to.col()) == 2 {
            let (rook_col, rook_dst_col) = if to.col() > from.col() {
                (File::H, File::F)
            } else {
                (File::A, File::D)
            };
            let rook_src = Position::from_parts(rook_col, from.rank());
            let rook_dst = Position::from_parts(rook_dst_col, from.rank());
            let rook = self.r.get(rook_src);
            if rook.is(color, Piece::Rook) {
                self.r.put(rook_src, Cell::EMPTY);
                self.r.put(rook_dst, rook);
                self.r.revoke_castling(rook_src, rook_dst);
            }
        }

        #[cfg(feature = "selftest")]
        self.r.selftest();
    }

    #[inline]
    pub fn find_king(&self, c: Color) -> Option<Position> {
        self.r.find_king(c)
    }

    #[inline]
    pub fn is_check(&self, c: Color) -> bool {
        self.r.is_check(c)
    }

    #[inline]
    pub fn checkers(&self, c: Color) -> Bitboard {
        self.r.checkers(c)
    }

    /// See [`RawBoard::would_be_in_check()`]
    #[inline]
    pub fn would_be_in_check(&self, from: Position, to: Position) -> bool {
        self.r.would_be_in_check(from, to)
    }

    #[inline]
    pub fn can_castle_kingside(&self, c: Color) -> bool {
        self.r.can_castle_kingside(c)
    }

    #[inline]
    pub fn can_castle_queenside(&self, c: Color) -> bool {
        self.r.can_castle_queenside(c)
    }

    /// Returns the destinations of the piece on `from` which don't leave its king in check
    #[inline]
    pub fn possible_moves(&self, from: Position) -> Bitboard {
        movegen::possible_moves(&self.r, from)
    }

    /// Returns `true` if side `c` has at least one legal move
    #[inline]
    pub fn has_any_valid_moves(&self, c: Color) -> bool {
        movegen::has_legal_moves(&self.r, c)
    }

    /// Returns `true` if side `c` is in check and cannot escape it
    ///
    /// This function can be computationally expensive, as it calls [`movegen::has_legal_moves`].
    #[inline]
    pub fn is_checkmate(&self, c: Color) -> bool {
        self.is_check(c) && !self.has_any_valid_moves(c)
    }

    /// Returns `true` if side `c` is not in check but has no legal moves
    #[inline]
    pub fn is_stalemate(&self, c: Color) -> bool {
        !self.is_check(c) && !self.has_any_valid_moves(c)
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use rookwise::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    ///  |ABCDEFGH
    /// White captured:
    /// Black captured:
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::initial()
    }
}

impl From<RawBoard> for Board {
    fn from(r: RawBoard) -> Board {
        Board {
            r,
            captured: Default::default(),
        }
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;

    fn cell(c: Cell) -> char;

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                write!(f, "{}", Self::cell(b.get2(file, rank)))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, " {}", Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        for c in [Color::White, Color::Black] {
            write!(f, "{} captured:", c)?;
            for &cell in b.captured(c) {
                write!(f, " {}", Self::cell(cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';

    fn cell(c: Cell) -> char {
        c.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';

    fn cell(c: Cell) -> char {
        c.as_utf8_char()
    }
}

impl<'a> fmt::Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}
