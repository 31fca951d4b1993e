//! Board representation and FEN support

use crate::geometry;
use crate::movegen::{self, MoveList};
use crate::moves::{self, MakeMoveError, Move};
use crate::types::{
    CastlingRights, CastlingRightsParseError, CastlingSide, Cell, Color, ColorParseError, Coord,
    CoordParseError, DrawReason, File, Outcome, Piece, Rank, WinReason,
};
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Number of halfmoves on the halfmove clock after which the game is drawn
const HALFMOVE_DRAW_LIMIT: u16 = 50;

/// Error indicating that the raw board is invalid
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// En passant target square is located on an invalid rank
    #[error("invalid enpassant target {0}")]
    InvalidEnpassant(Coord),
    /// One of the sides has more than 16 pieces
    #[error("too many pieces of color {0:?}")]
    TooManyPieces(Color),
    /// One of the sides has no king
    #[error("no king of color {0:?}")]
    NoKing(Color),
    /// One of the sides has more than one king
    #[error("more than one king of color {0:?}")]
    TooManyKings(Color),
    /// There is a pawn on rank 1 or rank 8
    #[error("invalid pawn position {0}")]
    InvalidPawn(Coord),
    /// Side that doesn't move now is under check
    #[error("opponent king must not be under check")]
    OpponentKingAttacked,
}

/// Error parsing the cells part of FEN
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum CellsParseError {
    /// Too many items in rank
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Not enough items in rank
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing [`RawBoard`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawFenParseError {
    /// FEN contains non-ASCII data
    #[error("non-ASCII data in FEN")]
    NonAscii,
    /// FEN has an unexpected number of fields (must be either 4 or 6)
    #[error("FEN must consist of either 4 or 6 fields, got {0}")]
    FieldCount(usize),
    /// Error parsing the cells part
    #[error("cannot parse board: {0}")]
    Cells(#[from] CellsParseError),
    /// Error parsing the move side part
    #[error("cannot parse move side: {0}")]
    MoveSide(#[from] ColorParseError),
    /// Error parsing the castling part
    #[error("cannot parse castling: {0}")]
    Castling(#[from] CastlingRightsParseError),
    /// Error parsing the en passant part
    #[error("cannot parse enpassant: {0}")]
    Enpassant(#[from] CoordParseError),
    /// En passant target square is located on an invalid rank
    #[error("invalid enpassant rank {0}")]
    InvalidEnpassantRank(Rank),
    /// Error parsing the halfmove clock part
    #[error("cannot parse move counter: {0}")]
    MoveCounter(ParseIntError),
    /// Error parsing the fullmove number part
    #[error("cannot parse move number: {0}")]
    MoveNumber(ParseIntError),
}

/// Error parsing [`Board`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// Cannot parse raw board from FEN
    #[error("cannot parse FEN: {0}")]
    Fen(#[from] RawFenParseError),
    /// Parsed position is invalid
    #[error("invalid position: {0}")]
    Valid(#[from] ValidateError),
}

/// Raw chess board
///
/// This board contains only the piece placement and the necessary
/// metadata. It is not validated in any way, so it can contain positions
/// that cannot occur in a real game.
///
/// # Example
///
/// ```
/// # use padchess::{Board, Cell, Color, Piece, RawBoard};
/// let mut raw = RawBoard::empty();
/// raw.put("b2".parse().unwrap(), Cell::from_parts(Color::White, Piece::King));
/// raw.put("d5".parse().unwrap(), Cell::from_parts(Color::Black, Piece::King));
/// raw.move_counter = 10;
/// raw.move_number = 42;
///
/// let board: Board = raw.try_into().unwrap();
/// assert_eq!(board.as_fen(), "8/8/8/3k4/8/8/1K6/8 w - - 10 42");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawBoard {
    /// Piece placement in the 10x12 grid
    ///
    /// Only the squares reachable via [`Coord`] are meaningful. The border
    /// items must stay empty.
    pub cells: [Cell; 120],
    /// Side to move
    pub side: Color,
    /// Castling rights
    pub castling: CastlingRights,
    /// En passant target square (i.e. the square skipped by the double pawn
    /// push on the previous move), if any
    pub ep_target: Option<Coord>,
    /// Halfmove clock, the number of halfmoves since the last capture or
    /// pawn move
    pub move_counter: u16,
    /// Fullmove number, starting from 1
    pub move_number: u16,
}

impl RawBoard {
    /// Creates an empty board
    ///
    /// White is the side to move, and both sides have no castling rights.
    #[inline]
    pub const fn empty() -> RawBoard {
        RawBoard {
            cells: [Cell::EMPTY; 120],
            side: Color::White,
            castling: CastlingRights::EMPTY,
            ep_target: None,
            move_counter: 0,
            move_number: 1,
        }
    }

    /// Creates a board with the initial position
    pub fn initial() -> RawBoard {
        let pieces = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        let mut res = RawBoard::empty();
        for (file, piece) in File::iter().zip(pieces) {
            res.put2(file, Rank::R1, Cell::from_parts(Color::White, piece));
            res.put2(file, Rank::R2, Cell::from_parts(Color::White, Piece::Pawn));
            res.put2(file, Rank::R7, Cell::from_parts(Color::Black, Piece::Pawn));
            res.put2(file, Rank::R8, Cell::from_parts(Color::Black, piece));
        }
        res.castling = CastlingRights::FULL;
        res
    }

    /// Creates a board from FEN
    #[inline]
    pub fn from_fen(fen: &str) -> Result<RawBoard, RawFenParseError> {
        fen.parse()
    }

    /// Returns the contents of the square `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.cells[c.index()]
    }

    /// Returns the contents of the square with given file and rank
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Coord::from_parts(file, rank))
    }

    /// Puts `cell` into the square `c`
    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        self.cells[c.index()] = cell;
    }

    /// Puts `cell` into the square with given file and rank
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Coord::from_parts(file, rank), cell);
    }

    /// Returns a wrapper to pretty-print the board
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used
    /// with `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use padchess::{board::PrettyStyle, RawBoard};
    /// #
    /// let r = RawBoard::initial();
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
    /// W|abcdefgh
    /// "#;
    /// assert_eq!(r.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { raw: self, style }
    }

    /// Converts the board into a FEN string
    ///
    /// Does the same as `RawBoard::to_string()`.
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

/// Chess board
///
/// Unlike [`RawBoard`], it is always valid and keeps track of the king
/// positions of both sides. The entire game logic works on this type.
#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) r: RawBoard,
    pub(crate) kings: [Coord; 2],
}

impl Board {
    /// Creates a board with the initial position
    pub fn initial() -> Board {
        RawBoard::initial().try_into().unwrap()
    }

    /// Creates a board from FEN
    #[inline]
    pub fn from_fen(fen: &str) -> Result<Board, FenParseError> {
        fen.parse()
    }

    /// Returns the underlying raw board
    #[inline]
    pub fn raw(&self) -> &RawBoard {
        &self.r
    }

    /// Returns the contents of the square `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.r.get(c)
    }

    /// Returns the contents of the square with given file and rank
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.r.get2(file, rank)
    }

    /// Returns the side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.r.side
    }

    /// Returns the castling rights
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.r.castling
    }

    /// Returns the en passant target square, if any
    #[inline]
    pub fn ep_target(&self) -> Option<Coord> {
        self.r.ep_target
    }

    /// Returns the halfmove clock
    #[inline]
    pub fn move_counter(&self) -> u16 {
        self.r.move_counter
    }

    /// Returns the fullmove number
    #[inline]
    pub fn move_number(&self) -> u16 {
        self.r.move_number
    }

    /// Returns the position of the king of color `c`
    #[inline]
    pub fn king_pos(&self, c: Color) -> Coord {
        self.kings[c.index()]
    }

    /// Returns `true` if the side to move is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        let side = self.r.side;
        movegen::is_cell_attacked(self, self.king_pos(side), side.inv())
    }

    /// Generates all the legal moves in the position
    #[inline]
    pub fn legal_moves(&self) -> MoveList {
        movegen::legal_moves(self)
    }

    /// Returns `true` if the side to move has at least one legal move
    #[inline]
    pub fn has_legal_moves(&self) -> bool {
        !movegen::legal_moves(self).is_empty()
    }

    /// Applies the move `mv` and returns the resulting board
    ///
    /// The board itself is left unchanged. If `mv` is not legal in the
    /// position, an error is returned.
    pub fn make_move(&self, mv: Move) -> Result<Board, MakeMoveError> {
        if !self.legal_moves().contains(&mv) {
            return Err(MakeMoveError::NotLegal(mv));
        }
        let mut next = self.clone();
        moves::apply_full(&mut next, mv);
        Ok(next)
    }

    /// Returns `true` if the side to move is checkmated
    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_moves()
    }

    /// Returns `true` if the side to move is stalemated
    #[inline]
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_moves()
    }

    /// Returns `true` if the game is drawn, either by stalemate or by the
    /// halfmove clock
    #[inline]
    pub fn is_draw(&self) -> bool {
        self.is_stalemate()
            || (!self.is_checkmate() && self.r.move_counter >= HALFMOVE_DRAW_LIMIT)
    }

    /// Returns `true` if the game is finished
    #[inline]
    pub fn is_game_over(&self) -> bool {
        !self.has_legal_moves() || self.r.move_counter >= HALFMOVE_DRAW_LIMIT
    }

    /// Calculates the game outcome, or returns `None` if the game is not
    /// finished yet
    pub fn calc_outcome(&self) -> Option<Outcome> {
        if !self.has_legal_moves() {
            let outcome = if self.is_check() {
                Outcome::Win {
                    side: self.r.side.inv(),
                    reason: WinReason::Checkmate,
                }
            } else {
                Outcome::Draw(DrawReason::Stalemate)
            };
            return Some(outcome);
        }
        if self.r.move_counter >= HALFMOVE_DRAW_LIMIT {
            return Some(Outcome::Draw(DrawReason::Moves50));
        }
        None
    }

    /// Returns a wrapper to pretty-print the board
    ///
    /// See docs for [`RawBoard::pretty()`] for more details.
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        self.r.pretty(style)
    }

    /// Converts the board into a FEN string
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl TryFrom<RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(mut raw: RawBoard) -> Result<Board, ValidateError> {
        // En passant target must lie on the proper rank. It is silently
        // dropped when there is no matching double-pushed pawn next to it.
        if let Some(p) = raw.ep_target {
            if p.rank() != geometry::enpassant_rank(raw.side) {
                return Err(ValidateError::InvalidEnpassant(p));
            }
            let their_pawn = Cell::from_parts(raw.side.inv(), Piece::Pawn);
            match p.add(-geometry::pawn_forward_delta(raw.side)) {
                Some(sq) if raw.get(p).is_empty() && raw.get(sq) == their_pawn => {}
                _ => raw.ep_target = None,
            }
        }

        // Castling rights are silently dropped if the king or the matching
        // rook is not on its home square.
        for color in [Color::White, Color::Black] {
            if !raw.castling.has_color(color) {
                continue;
            }
            let rank = geometry::home_rank(color);
            if raw.get2(File::E, rank) != Cell::from_parts(color, Piece::King) {
                raw.castling.unset_color(color);
                continue;
            }
            let rook = Cell::from_parts(color, Piece::Rook);
            if raw.get2(File::A, rank) != rook {
                raw.castling.unset(color, CastlingSide::Queen);
            }
            if raw.get2(File::H, rank) != rook {
                raw.castling.unset(color, CastlingSide::King);
            }
        }

        let mut counts = [0_usize; 2];
        let mut kings: [Option<Coord>; 2] = [None; 2];
        for coord in Coord::iter() {
            let cell = raw.get(coord);
            let color = match cell.color() {
                Some(color) => color,
                None => continue,
            };
            counts[color.index()] += 1;
            match cell.piece() {
                Some(Piece::King) => {
                    if kings[color.index()].is_some() {
                        return Err(ValidateError::TooManyKings(color));
                    }
                    kings[color.index()] = Some(coord);
                }
                Some(Piece::Pawn) if matches!(coord.rank(), Rank::R1 | Rank::R8) => {
                    return Err(ValidateError::InvalidPawn(coord));
                }
                _ => {}
            }
        }

        let mut king_pos = [Coord::from_parts(File::A, Rank::R8); 2];
        for color in [Color::White, Color::Black] {
            if counts[color.index()] > 16 {
                return Err(ValidateError::TooManyPieces(color));
            }
            king_pos[color.index()] = kings[color.index()].ok_or(ValidateError::NoKing(color))?;
        }

        let res = Board {
            r: raw,
            kings: king_pos,
        };
        if movegen::is_cell_attacked(&res, res.king_pos(raw.side.inv()), raw.side) {
            return Err(ValidateError::OpponentKingAttacked);
        }
        Ok(res)
    }
}

impl From<Board> for RawBoard {
    #[inline]
    fn from(b: Board) -> RawBoard {
        b.r
    }
}

impl PartialEq for Board {
    #[inline]
    fn eq(&self, other: &Board) -> bool {
        self.r == other.r
    }
}

impl Eq for Board {}

impl Hash for Board {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.r.hash(state);
    }
}

fn parse_cells(s: &str) -> Result<[Cell; 120], CellsParseError> {
    type Error = CellsParseError;

    let mut cells = [Cell::EMPTY; 120];
    let mut file = 0_usize;
    let mut rank = 0_usize;
    for c in s.chars() {
        match c {
            '1'..='8' => {
                let add = c as usize - '0' as usize;
                if file + add > 8 {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                file += add;
            }
            '/' => {
                if file < 8 {
                    return Err(Error::RankUnderflow(Rank::from_index(rank)));
                }
                rank += 1;
                file = 0;
                if rank > 7 {
                    return Err(Error::Overflow);
                }
            }
            _ => {
                if file >= 8 {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                let cell = Cell::from_char(c).ok_or(Error::UnexpectedChar(c))?;
                let coord = Coord::from_parts(File::from_index(file), Rank::from_index(rank));
                cells[coord.index()] = cell;
                file += 1;
            }
        }
    }
    if file < 8 {
        return Err(Error::RankUnderflow(Rank::from_index(rank)));
    }
    if rank != 7 {
        return Err(Error::Underflow);
    }
    Ok(cells)
}

fn format_cells(cells: &[Cell; 120], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for rank in Rank::iter() {
        if rank != Rank::R8 {
            write!(f, "/")?;
        }
        let mut empty = 0;
        for file in File::iter() {
            let cell = cells[Coord::from_parts(file, rank).index()];
            if cell.is_empty() {
                empty += 1;
                continue;
            }
            if empty != 0 {
                write!(f, "{}", empty)?;
                empty = 0;
            }
            write!(f, "{}", cell)?;
        }
        if empty != 0 {
            write!(f, "{}", empty)?;
        }
    }
    Ok(())
}

impl FromStr for RawBoard {
    type Err = RawFenParseError;

    fn from_str(s: &str) -> Result<RawBoard, Self::Err> {
        type Error = RawFenParseError;

        if !s.is_ascii() {
            return Err(Error::NonAscii);
        }
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(Error::FieldCount(fields.len()));
        }

        let cells = parse_cells(fields[0])?;
        let side = Color::from_str(fields[1])?;
        let castling = CastlingRights::from_str(fields[2])?;
        let ep_target = match fields[3] {
            "-" => None,
            val => {
                let p = Coord::from_str(val)?;
                if p.rank() != geometry::enpassant_rank(side) {
                    return Err(Error::InvalidEnpassantRank(p.rank()));
                }
                Some(p)
            }
        };
        let (move_counter, move_number) = if fields.len() == 6 {
            (
                u16::from_str(fields[4]).map_err(Error::MoveCounter)?,
                u16::from_str(fields[5]).map_err(Error::MoveNumber)?,
            )
        } else {
            (0, 1)
        };

        Ok(RawBoard {
            cells,
            side,
            castling,
            ep_target,
            move_counter,
            move_number,
        })
    }
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        Ok(RawBoard::from_str(s)?.try_into()?)
    }
}

impl Display for RawBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_cells(&self.cells, f)?;
        write!(f, " {} {}", self.side, self.castling)?;
        match self.ep_target {
            Some(p) => write!(f, " {}", p)?,
            None => write!(f, " -")?,
        };
        write!(f, " {} {}", self.move_counter, self.move_number)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.r.fmt(f)
    }
}

/// Style for [`RawBoard::pretty()`] and [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`RawBoard::pretty()`] for more details.
pub struct Pretty<'a> {
    raw: &'a RawBoard,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const WHITE_INDICATOR: char;
    const BLACK_INDICATOR: char;

    fn cell(c: Cell) -> char;

    fn indicator(c: Color) -> char {
        match c {
            Color::White => Self::WHITE_INDICATOR,
            Color::Black => Self::BLACK_INDICATOR,
        }
    }

    fn fmt(r: &RawBoard, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                write!(f, "{}", Self::cell(r.get2(file, rank)))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, "{}{}", Self::indicator(r.side), Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';
    const WHITE_INDICATOR: char = 'W';
    const BLACK_INDICATOR: char = 'B';

    fn cell(c: Cell) -> char {
        c.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const WHITE_INDICATOR: char = '○';
    const BLACK_INDICATOR: char = '●';

    fn cell(c: Cell) -> char {
        c.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.raw, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.raw, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial() {
        for board in [
            Board::initial().raw().to_owned(),
            RawBoard::initial(),
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                .unwrap(),
        ] {
            assert_eq!(
                board.get2(File::A, Rank::R8),
                Cell::from_parts(Color::Black, Piece::Rook)
            );
            assert_eq!(
                board.get2(File::E, Rank::R1),
                Cell::from_parts(Color::White, Piece::King)
            );
            assert_eq!(
                board.get2(File::B, Rank::R2),
                Cell::from_parts(Color::White, Piece::Pawn)
            );
            assert_eq!(board.get2(File::D, Rank::R4), Cell::EMPTY);
            assert_eq!(board.side, Color::White);
            assert_eq!(board.castling, CastlingRights::FULL);
            assert_eq!(board.ep_target, None);
            assert_eq!(board.move_counter, 0);
            assert_eq!(board.move_number, 1);
            assert_eq!(
                board.as_fen(),
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            );
        }
    }

    #[test]
    fn test_midgame() {
        let fen = "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R4RK1 w - - 0 21";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.as_fen(), fen);
        assert_eq!(board.side(), Color::White);
        assert_eq!(board.castling(), CastlingRights::EMPTY);
        assert_eq!(board.move_counter(), 0);
        assert_eq!(board.move_number(), 21);
        assert_eq!(board.king_pos(Color::White), "g1".parse().unwrap());
        assert_eq!(board.king_pos(Color::Black), "g8".parse().unwrap());
    }

    #[test]
    fn test_incomplete_fen() {
        let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -")
            .unwrap();
        assert_eq!(board.move_counter(), 0);
        assert_eq!(board.move_number(), 1);
        assert_eq!(
            board.as_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );

        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0"),
            Err(RawFenParseError::FieldCount(5)),
        );
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq"),
            Err(RawFenParseError::FieldCount(3)),
        );
        assert_eq!(
            RawBoard::from_fen(""),
            Err(RawFenParseError::FieldCount(0)),
        );
    }

    #[test]
    fn test_bad_cells() {
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1"),
            Err(RawFenParseError::Cells(CellsParseError::Underflow)),
        );
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(RawFenParseError::Cells(CellsParseError::Overflow)),
        );
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(RawFenParseError::Cells(CellsParseError::RankUnderflow(
                Rank::R7
            ))),
        );
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(RawFenParseError::Cells(CellsParseError::RankOverflow(
                Rank::R7
            ))),
        );
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNT w KQkq - 0 1"),
            Err(RawFenParseError::Cells(CellsParseError::UnexpectedChar(
                'T'
            ))),
        );
    }

    #[test]
    fn test_enpassant_parse() {
        let board =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        assert_eq!(board.ep_target(), "e3".parse().ok());

        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e4 0 1"),
            Err(RawFenParseError::InvalidEnpassantRank(Rank::R4)),
        );
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq x3 0 1"),
            Err(RawFenParseError::Enpassant(
                CoordParseError::InvalidFileChar('x')
            )),
        );
    }

    #[test]
    fn test_fixes() {
        // Both the bogus en passant target and the castling rights without
        // matching rooks must be dropped during validation.
        let fen = "r1bq1b1r/ppppkppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK1R1 w KQkq c6 6 5";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.ep_target(), None);
        assert_eq!(
            board.castling(),
            CastlingRights::EMPTY.with(Color::White, CastlingSide::Queen)
        );
        assert_eq!(
            board.as_fen(),
            "r1bq1b1r/ppppkppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK1R1 w Q - 6 5"
        );
    }

    #[test]
    fn test_validate_kings() {
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::Valid(ValidateError::NoKing(Color::White))),
        );
        assert_eq!(
            Board::from_fen("7k/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::Valid(ValidateError::NoKing(Color::White))),
        );
        assert_eq!(
            Board::from_fen("K6k/8/8/8/8/8/8/K7 w - - 0 1"),
            Err(FenParseError::Valid(ValidateError::TooManyKings(
                Color::White
            ))),
        );
        assert_eq!(
            Board::from_fen("K5kk/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::Valid(ValidateError::TooManyKings(
                Color::Black
            ))),
        );
        assert!(Board::from_fen("K6k/8/8/8/8/8/8/8 w - - 0 1").is_ok());
    }

    #[test]
    fn test_validate_pieces() {
        assert_eq!(
            Board::from_fen("P6k/8/8/8/8/8/8/K7 w - - 0 1"),
            Err(FenParseError::Valid(ValidateError::InvalidPawn(
                "a8".parse().unwrap()
            ))),
        );
        assert_eq!(
            Board::from_fen(
                "k6K/pppppppp/pppppppp/1ppppppp/8/8/8/8 w - - 0 1"
            ),
            Err(FenParseError::Valid(ValidateError::TooManyPieces(
                Color::Black
            ))),
        );
        assert_eq!(
            Board::from_fen("k6R/8/8/8/8/8/8/K7 w - - 0 1"),
            Err(FenParseError::Valid(ValidateError::OpponentKingAttacked)),
        );
    }

    #[test]
    fn test_outcome() {
        for (fen, outcome) in [
            (
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
                None,
            ),
            (
                "R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1",
                Some(Outcome::Win {
                    side: Color::White,
                    reason: WinReason::Checkmate,
                }),
            ),
            (
                "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
                Some(Outcome::Draw(DrawReason::Stalemate)),
            ),
            (
                "NNK4k/8/8/8/8/8/8/8 w - - 50 80",
                Some(Outcome::Draw(DrawReason::Moves50)),
            ),
            ("NNK4k/8/8/8/8/8/8/8 w - - 49 80", None),
        ] {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.calc_outcome(), outcome, "unexpected outcome: {}", fen);
            assert_eq!(board.is_game_over(), outcome.is_some());
        }
    }

    #[test]
    fn test_terminal_predicates() {
        let mate = Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1").unwrap();
        assert!(mate.is_check());
        assert!(mate.is_checkmate());
        assert!(!mate.is_stalemate());
        assert!(!mate.is_draw());
        assert!(mate.is_game_over());

        let stalemate = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!stalemate.is_check());
        assert!(!stalemate.is_checkmate());
        assert!(stalemate.is_stalemate());
        assert!(stalemate.is_draw());
        assert!(stalemate.is_game_over());

        let clock = Board::from_fen("NNK4k/8/8/8/8/8/8/8 w - - 50 80").unwrap();
        assert!(!clock.is_checkmate());
        assert!(!clock.is_stalemate());
        assert!(clock.is_draw());
        assert!(clock.is_game_over());

        let running = Board::initial();
        assert!(!running.is_check());
        assert!(!running.is_draw());
        assert!(!running.is_game_over());
    }

    #[test]
    fn test_pretty() {
        let board =
            Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
                .unwrap();
        assert_eq!(
            board.pretty(PrettyStyle::Ascii).to_string(),
            "8|r.bqkbnr\n\
             7|pppp.ppp\n\
             6|..n.....\n\
             5|....p...\n\
             4|....P...\n\
             3|.....N..\n\
             2|PPPP.PPP\n\
             1|RNBQKB.R\n\
             -+--------\n\
             W|abcdefgh\n",
        );
        assert_eq!(
            board.pretty(PrettyStyle::Utf8).to_string(),
            "8│♜.♝♛♚♝♞♜\n\
             7│♟♟♟♟.♟♟♟\n\
             6│..♞.....\n\
             5│....♟...\n\
             4│....♙...\n\
             3│.....♘..\n\
             2│♙♙♙♙.♙♙♙\n\
             1│♖♘♗♕♔♗.♖\n\
             ─┼────────\n\
             ○│abcdefgh\n",
        );
    }

    #[test]
    fn test_board_eq_hash() {
        use std::collections::HashSet;

        let b1 = Board::initial();
        let b2 = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap();
        let b3 = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1")
            .unwrap();
        assert_eq!(b1, b2);
        assert_ne!(b1, b3);

        let mut set = HashSet::new();
        set.insert(b1);
        set.insert(b2);
        set.insert(b3);
        assert_eq!(set.len(), 2);
    }
}
