//! Basic type definitions: coordinates, colors, pieces, cells and castling
//! rights

use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing [`Coord`] from string
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum CoordParseError {
    /// String length is not equal to two
    #[error("string length must be equal to 2")]
    BadLength,
    /// Invalid file character
    #[error("invalid file char {0:?}")]
    InvalidFileChar(char),
    /// Invalid rank character
    #[error("invalid rank char {0:?}")]
    InvalidRankChar(char),
}

/// Errors that can occur when parsing [`Cell`] from string
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum CellParseError {
    /// String length is not equal to one
    #[error("string length must be equal to 1")]
    BadLength,
    /// Invalid character
    #[error("invalid cell char {0:?}")]
    BadChar(char),
}

/// Errors that can occur when parsing [`Color`] from string
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum ColorParseError {
    /// String length is not equal to one
    #[error("string length must be equal to 1")]
    BadLength,
    /// Invalid character
    #[error("invalid color char {0:?}")]
    BadChar(char),
}

/// Errors that can occur when parsing [`CastlingRights`] from string
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum CastlingRightsParseError {
    /// String is empty
    #[error("string is empty")]
    EmptyString,
    /// Invalid character
    #[error("invalid castling char {0:?}")]
    BadChar(char),
    /// The same castling flag occurs twice
    #[error("duplicate castling char {0:?}")]
    DuplicateChar(char),
}

/// File (i.e. a vertical line) on the chess board
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum File {
    /// File A
    A = 0,
    /// File B
    B = 1,
    /// File C
    C = 2,
    /// File D
    D = 3,
    /// File E
    E = 4,
    /// File F
    F = 5,
    /// File G
    G = 6,
    /// File H
    H = 7,
}

impl File {
    /// Returns the index of the file, a number from 0 (for file A) to 7 (for
    /// file H)
    #[inline]
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    /// Returns the file with index `val`
    ///
    /// # Panics
    ///
    /// The function panics if `val` is greater than 7.
    #[inline]
    pub const fn from_index(val: usize) -> Self {
        match val {
            0 => File::A,
            1 => File::B,
            2 => File::C,
            3 => File::D,
            4 => File::E,
            5 => File::F,
            6 => File::G,
            7 => File::H,
            _ => panic!("file index must be between 0 and 7"),
        }
    }

    /// Converts a character `c` into a file
    ///
    /// `'a'` becomes file A, `'b'` becomes file B, etc. If the character
    /// doesn't correspond to any file, `None` is returned.
    pub fn from_char(c: char) -> Option<File> {
        if ('a'..='h').contains(&c) {
            Some(File::from_index(c as usize - 'a' as usize))
        } else {
            None
        }
    }

    /// Converts the file into a character
    #[inline]
    pub fn as_char(&self) -> char {
        (b'a' + self.index() as u8) as char
    }

    /// Iterates over all the files in ascending order
    #[inline]
    pub fn iter() -> impl Iterator<Item = File> {
        (0..8).map(File::from_index)
    }
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Rank (i.e. a horizontal line) on the chess board
///
/// Ranks are numbered from the Black's point of view, so rank 8 has index
/// zero.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum Rank {
    /// Rank 8
    R8 = 0,
    /// Rank 7
    R7 = 1,
    /// Rank 6
    R6 = 2,
    /// Rank 5
    R5 = 3,
    /// Rank 4
    R4 = 4,
    /// Rank 3
    R3 = 5,
    /// Rank 2
    R2 = 6,
    /// Rank 1
    R1 = 7,
}

impl Rank {
    /// Returns the index of the rank, a number from 0 (for rank 8) to 7 (for
    /// rank 1)
    #[inline]
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    /// Returns the rank with index `val`
    ///
    /// # Panics
    ///
    /// The function panics if `val` is greater than 7.
    #[inline]
    pub const fn from_index(val: usize) -> Self {
        match val {
            0 => Rank::R8,
            1 => Rank::R7,
            2 => Rank::R6,
            3 => Rank::R5,
            4 => Rank::R4,
            5 => Rank::R3,
            6 => Rank::R2,
            7 => Rank::R1,
            _ => panic!("rank index must be between 0 and 7"),
        }
    }

    /// Converts a character `c` into a rank
    ///
    /// `'1'` becomes rank 1, `'2'` becomes rank 2, etc. If the character
    /// doesn't correspond to any rank, `None` is returned.
    pub fn from_char(c: char) -> Option<Rank> {
        if ('1'..='8').contains(&c) {
            Some(Rank::from_index('8' as usize - c as usize))
        } else {
            None
        }
    }

    /// Converts the rank into a character
    #[inline]
    pub fn as_char(&self) -> char {
        (b'8' - self.index() as u8) as char
    }

    /// Iterates over all the ranks from rank 8 to rank 1
    #[inline]
    pub fn iter() -> impl Iterator<Item = Rank> {
        (0..8).map(Rank::from_index)
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Coordinate of a square on the chess board
///
/// The board is stored as a 10x12 grid, where the real squares occupy
/// columns 1 through 8 of rows 2 through 9. Everything else is a sentinel
/// border which makes off-board detection a simple range check. The
/// coordinate wraps an index into this grid, so square a8 has index 21 and
/// square h1 has index 98. Coordinates always point to a real square, never
/// to the border.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Coord(u8);

impl Coord {
    /// Creates a coordinate from file and rank
    #[inline]
    pub const fn from_parts(file: File, rank: Rank) -> Coord {
        Coord(((rank.index() + 2) * 10 + file.index() + 1) as u8)
    }

    /// Creates a coordinate from a raw grid index `val`
    ///
    /// Returns `None` if `val` doesn't point to a real square.
    #[inline]
    pub const fn from_grid(val: isize) -> Option<Coord> {
        if val < 21 || val > 98 {
            return None;
        }
        let file = val % 10;
        if file < 1 || file > 8 {
            return None;
        }
        Some(Coord(val as u8))
    }

    /// Returns the index of the coordinate in the 10x12 grid
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the file on which the square is located
    #[inline]
    pub const fn file(&self) -> File {
        File::from_index(self.0 as usize % 10 - 1)
    }

    /// Returns the rank on which the square is located
    #[inline]
    pub const fn rank(&self) -> Rank {
        Rank::from_index(self.0 as usize / 10 - 2)
    }

    /// Adds a grid offset `delta` to the coordinate
    ///
    /// Returns `None` if the result lands on the sentinel border.
    #[inline]
    pub const fn add(self, delta: isize) -> Option<Coord> {
        Coord::from_grid(self.0 as isize + delta)
    }

    /// Iterates over all the squares in grid index order (rank 8 to rank 1,
    /// file A to file H inside each rank)
    #[inline]
    pub fn iter() -> impl Iterator<Item = Coord> {
        Rank::iter().flat_map(|rank| File::iter().map(move |file| Coord::from_parts(file, rank)))
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().as_char(), self.rank().as_char())
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self)
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Coord, Self::Err> {
        let mut iter = s.chars();
        let (file_ch, rank_ch) = match (iter.next(), iter.next(), iter.next()) {
            (Some(f), Some(r), None) => (f, r),
            _ => return Err(CoordParseError::BadLength),
        };
        let file = File::from_char(file_ch).ok_or(CoordParseError::InvalidFileChar(file_ch))?;
        let rank = Rank::from_char(rank_ch).ok_or(CoordParseError::InvalidRankChar(rank_ch))?;
        Ok(Coord::from_parts(file, rank))
    }
}

/// Color of the side
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum Color {
    /// White
    White = 0,
    /// Black
    Black = 1,
}

impl Color {
    /// Returns the opposite color
    #[inline]
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the index of the color, either 0 or 1
    #[inline]
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    /// Converts the color into a character, either `'w'` or `'b'`
    #[inline]
    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Converts a character `c` into a color
    ///
    /// If the character is neither `'w'` nor `'b'`, `None` is returned.
    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Color, Self::Err> {
        let mut iter = s.chars();
        match (iter.next(), iter.next()) {
            (Some(c), None) => Color::from_char(c).ok_or(ColorParseError::BadChar(c)),
            _ => Err(ColorParseError::BadLength),
        }
    }
}

/// Piece kind (without a color)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum Piece {
    /// Pawn
    Pawn = 0,
    /// Knight
    Knight = 1,
    /// Bishop
    Bishop = 2,
    /// Rook
    Rook = 3,
    /// Queen
    Queen = 4,
    /// King
    King = 5,
}

impl Piece {
    /// All the piece kinds
    pub const KINDS: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Converts the piece kind into an uppercase English letter
    #[inline]
    pub fn as_char(&self) -> char {
        match *self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        }
    }
}

/// Square contents: either an empty square or a square occupied by a piece
/// of some color
///
/// The contents are packed into a single byte.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Cell(u8);

impl Cell {
    /// Empty cell
    pub const EMPTY: Cell = Cell(0);

    /// Number of distinct cell values
    pub const COUNT: usize = 13;

    /// Creates an occupied cell from color and piece kind
    #[inline]
    pub const fn from_parts(color: Color, piece: Piece) -> Cell {
        match color {
            Color::White => Cell(1 + piece as u8),
            Color::Black => Cell(7 + piece as u8),
        }
    }

    /// Returns the index of the cell, a number from 0 to [`Cell::COUNT`]` - 1`
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the cell with index `val`
    ///
    /// # Panics
    ///
    /// The function panics if `val` is not less than [`Cell::COUNT`].
    #[inline]
    pub const fn from_index(val: usize) -> Cell {
        assert!(val < Cell::COUNT, "cell index must be less than Cell::COUNT");
        Cell(val as u8)
    }

    /// Returns `true` if the cell is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the cell contains a piece
    #[inline]
    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    /// Returns the color of the piece in the cell, or `None` for an empty
    /// cell
    #[inline]
    pub const fn color(&self) -> Option<Color> {
        match self.0 {
            0 => None,
            1..=6 => Some(Color::White),
            _ => Some(Color::Black),
        }
    }

    /// Returns the kind of the piece in the cell, or `None` for an empty
    /// cell
    #[inline]
    pub const fn piece(&self) -> Option<Piece> {
        match self.0 {
            1 | 7 => Some(Piece::Pawn),
            2 | 8 => Some(Piece::Knight),
            3 | 9 => Some(Piece::Bishop),
            4 | 10 => Some(Piece::Rook),
            5 | 11 => Some(Piece::Queen),
            6 | 12 => Some(Piece::King),
            _ => None,
        }
    }

    /// Converts the cell into a character, as in FEN board notation
    ///
    /// Empty cell becomes `'.'`, white pieces become uppercase letters, and
    /// black pieces become lowercase ones.
    #[inline]
    pub fn as_char(&self) -> char {
        b".PNBRQKpnbrqk"[self.index()] as char
    }

    /// Converts the cell into a fancy Unicode character
    #[inline]
    pub fn as_utf8_char(&self) -> char {
        ['.', '♙', '♘', '♗', '♖', '♕', '♔', '♟', '♞', '♝', '♜', '♛', '♚'][self.index()]
    }

    /// Converts a character `c` into a cell
    ///
    /// If the character doesn't correspond to any cell, `None` is returned.
    pub fn from_char(c: char) -> Option<Cell> {
        if c == '.' {
            return Some(Cell::EMPTY);
        }
        let color = if c.is_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some(Cell::from_parts(color, piece))
    }

    /// Iterates over all the distinct cell values
    #[inline]
    pub fn iter() -> impl Iterator<Item = Cell> {
        (0..Cell::COUNT).map(Cell::from_index)
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Cell {
        Cell::EMPTY
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Cell, Self::Err> {
        let mut iter = s.chars();
        match (iter.next(), iter.next()) {
            (Some(c), None) => Cell::from_char(c).ok_or(CellParseError::BadChar(c)),
            _ => Err(CellParseError::BadLength),
        }
    }
}

/// Castling side
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    /// Queenside castling
    Queen = 0,
    /// Kingside castling
    King = 1,
}

/// Castling rights of both sides
///
/// The rights are stored as a bitmask with four significant bits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No sides can castle
    pub const EMPTY: CastlingRights = CastlingRights(0);

    /// All sides can castle
    pub const FULL: CastlingRights = CastlingRights(15);

    #[inline]
    const fn bit(color: Color, side: CastlingSide) -> u8 {
        1 << ((color.index() << 1) | side as usize)
    }

    /// Returns `true` if the side `color` can castle to the side `side`
    #[inline]
    pub const fn has(&self, color: Color, side: CastlingSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }

    /// Returns `true` if the side `color` can castle anywhere
    #[inline]
    pub const fn has_color(&self, color: Color) -> bool {
        self.0 & (Self::bit(color, CastlingSide::Queen) | Self::bit(color, CastlingSide::King)) != 0
    }

    /// Returns the castling rights with the flag `(color, side)` added
    #[inline]
    pub const fn with(self, color: Color, side: CastlingSide) -> CastlingRights {
        CastlingRights(self.0 | Self::bit(color, side))
    }

    /// Adds the flag `(color, side)` to the castling rights
    #[inline]
    pub fn set(&mut self, color: Color, side: CastlingSide) {
        self.0 |= Self::bit(color, side);
    }

    /// Removes the flag `(color, side)` from the castling rights
    #[inline]
    pub fn unset(&mut self, color: Color, side: CastlingSide) {
        self.0 &= !Self::bit(color, side);
    }

    /// Removes both flags of the side `color` from the castling rights
    #[inline]
    pub fn unset_color(&mut self, color: Color) {
        self.unset(color, CastlingSide::Queen);
        self.unset(color, CastlingSide::King);
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == CastlingRights::EMPTY {
            return write!(f, "-");
        }
        if self.has(Color::White, CastlingSide::King) {
            write!(f, "K")?;
        }
        if self.has(Color::White, CastlingSide::Queen) {
            write!(f, "Q")?;
        }
        if self.has(Color::Black, CastlingSide::King) {
            write!(f, "k")?;
        }
        if self.has(Color::Black, CastlingSide::Queen) {
            write!(f, "q")?;
        }
        Ok(())
    }
}

impl FromStr for CastlingRights {
    type Err = CastlingRightsParseError;

    fn from_str(s: &str) -> Result<CastlingRights, Self::Err> {
        if s.is_empty() {
            return Err(CastlingRightsParseError::EmptyString);
        }
        if s == "-" {
            return Ok(CastlingRights::EMPTY);
        }
        let mut res = CastlingRights::EMPTY;
        for c in s.chars() {
            let (color, side) = match c {
                'K' => (Color::White, CastlingSide::King),
                'Q' => (Color::White, CastlingSide::Queen),
                'k' => (Color::Black, CastlingSide::King),
                'q' => (Color::Black, CastlingSide::Queen),
                _ => return Err(CastlingRightsParseError::BadChar(c)),
            };
            if res.has(color, side) {
                return Err(CastlingRightsParseError::DuplicateChar(c));
            }
            res.set(color, side);
        }
        Ok(res)
    }
}

/// Reason for the win of one of the sides
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WinReason {
    /// Checkmate
    Checkmate,
}

/// Reason for the draw
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DrawReason {
    /// Stalemate
    Stalemate,
    /// Halfmove clock reached its limit
    Moves50,
}

/// Game outcome
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Outcome {
    /// One of the sides won
    Win {
        /// Winning side
        side: Color,
        /// Reason for the win
        reason: WinReason,
    },
    /// The game ended with a draw
    Draw(DrawReason),
}

impl Outcome {
    /// Returns the winning side, or `None` in case of draw
    #[inline]
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Win { side, .. } => Some(side),
            Outcome::Draw(_) => None,
        }
    }
}
