//! Moves and their application

pub mod san;

pub use san::San;

use crate::board::Board;
use crate::geometry;
use crate::types::{CastlingSide, Cell, Color, Coord, CoordParseError, File, Piece};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Piece kind into which a pawn can promote
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PromotePiece {
    /// Knight
    Knight,
    /// Bishop
    Bishop,
    /// Rook
    Rook,
    /// Queen
    Queen,
}

impl PromotePiece {
    /// All the promotion pieces, in move generation order
    pub const ALL: [PromotePiece; 4] = [
        PromotePiece::Queen,
        PromotePiece::Knight,
        PromotePiece::Rook,
        PromotePiece::Bishop,
    ];

    /// Converts the promotion piece into a lowercase English letter
    #[inline]
    pub fn as_char(&self) -> char {
        match *self {
            PromotePiece::Knight => 'n',
            PromotePiece::Bishop => 'b',
            PromotePiece::Rook => 'r',
            PromotePiece::Queen => 'q',
        }
    }

    /// Converts a character `c` into a promotion piece
    ///
    /// If the character doesn't correspond to any promotion piece, `None`
    /// is returned.
    pub fn from_char(c: char) -> Option<PromotePiece> {
        match c {
            'n' => Some(PromotePiece::Knight),
            'b' => Some(PromotePiece::Bishop),
            'r' => Some(PromotePiece::Rook),
            'q' => Some(PromotePiece::Queen),
            _ => None,
        }
    }
}

impl From<PromotePiece> for Piece {
    #[inline]
    fn from(p: PromotePiece) -> Piece {
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

    fn try_from(p: Piece) -> Result<PromotePiece, Self::Error> {
        match p {
            Piece::Knight => Ok(PromotePiece::Knight),
            Piece::Bishop => Ok(PromotePiece::Bishop),
            Piece::Rook => Ok(PromotePiece::Rook),
            Piece::Queen => Ok(PromotePiece::Queen),
            _ => Err(()),
        }
    }
}

/// Errors that can occur when parsing [`Move`] from string
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum MoveParseError {
    /// String length must be either 4 or 5
    #[error("bad string length")]
    BadLength,
    /// Invalid source square
    #[error("bad source: {0}")]
    BadSrc(CoordParseError),
    /// Invalid destination square
    #[error("bad destination: {0}")]
    BadDst(CoordParseError),
    /// Invalid promotion character
    #[error("bad promote char {0:?}")]
    BadPromote(char),
}

/// Error indicating that the move cannot be applied to the position
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum MakeMoveError {
    /// The move is not among the legal moves of the position
    #[error("move {0} is not legal")]
    NotLegal(Move),
}

/// Chess move
///
/// The move is represented as a pair of squares plus an optional promotion
/// piece, matching the pure coordinate notation ("e2e4", "e7e8q"). The move
/// doesn't know which position it belongs to, so the same value can be
/// legal on one board and illegal on another.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    src: Coord,
    dst: Coord,
    promote: Option<PromotePiece>,
}

impl Move {
    /// Creates a move from source square, destination square and promotion
    /// piece
    #[inline]
    pub const fn new(src: Coord, dst: Coord, promote: Option<PromotePiece>) -> Move {
        Move { src, dst, promote }
    }

    /// Returns the source square
    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    /// Returns the destination square
    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    /// Returns the promotion piece, if any
    #[inline]
    pub const fn promote(&self) -> Option<PromotePiece> {
        self.promote
    }

    /// Renders the move in the standard algebraic notation on the board `b`
    ///
    /// If the move is not legal in the position, an error is returned.
    pub fn san(&self, b: &Board) -> Result<San, MakeMoveError> {
        if !b.legal_moves().contains(self) {
            return Err(MakeMoveError::NotLegal(*self));
        }
        Ok(San::from_move(*self, b))
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.src, self.dst)?;
        if let Some(promote) = self.promote {
            write!(f, "{}", promote.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if !matches!(s.len(), 4 | 5) || !s.is_ascii() {
            return Err(MoveParseError::BadLength);
        }
        let src = Coord::from_str(&s[0..2]).map_err(MoveParseError::BadSrc)?;
        let dst = Coord::from_str(&s[2..4]).map_err(MoveParseError::BadDst)?;
        let promote = match s[4..].chars().next() {
            Some(c) => Some(PromotePiece::from_char(c).ok_or(MoveParseError::BadPromote(c))?),
            None => None,
        };
        Ok(Move::new(src, dst, promote))
    }
}

/// Relocates the pieces for the move `mv`, without touching the castling
/// rights, the clocks or the move side
///
/// The king position cache is kept up to date. This partial application is
/// exactly what the legality filter needs to probe a move for a king left
/// under attack.
pub(crate) fn apply_pieces(b: &mut Board, mv: Move) {
    let side = b.r.side;
    let piece = b.get(mv.src);
    let is_enpassant =
        piece.piece() == Some(Piece::Pawn) && Some(mv.dst) == b.r.ep_target;

    let placed = match mv.promote {
        Some(p) => Cell::from_parts(side, Piece::from(p)),
        None => piece,
    };
    b.r.put(mv.dst, placed);
    b.r.put(mv.src, Cell::EMPTY);
    if is_enpassant {
        if let Some(taken) = mv.dst.add(-geometry::pawn_forward_delta(side)) {
            b.r.put(taken, Cell::EMPTY);
        }
    }

    if piece.piece() == Some(Piece::King) {
        b.kings[side.index()] = mv.dst;
        let rank = geometry::home_rank(side);
        let rook = Cell::from_parts(side, Piece::Rook);
        match mv.dst.index() as isize - mv.src.index() as isize {
            2 => {
                b.r.put2(File::H, rank, Cell::EMPTY);
                b.r.put2(File::F, rank, rook);
            }
            -2 => {
                b.r.put2(File::A, rank, Cell::EMPTY);
                b.r.put2(File::D, rank, rook);
            }
            _ => {}
        }
    }
}

/// Fully applies the move `mv`: relocates the pieces and updates the
/// castling rights, the en passant target, the clocks and the move side
pub(crate) fn apply_full(b: &mut Board, mv: Move) {
    let side = b.r.side;
    let piece = b.get(mv.src);
    let is_pawn = piece.piece() == Some(Piece::Pawn);
    let is_enpassant = is_pawn && Some(mv.dst) == b.r.ep_target;
    let is_capture = b.get(mv.dst).is_occupied() || is_enpassant;

    apply_pieces(b, mv);

    // A move from or to a home square of a king or a rook revokes the
    // matching right, no matter which piece actually moved.
    for color in [Color::White, Color::Black] {
        let rank = geometry::home_rank(color);
        let king_home = Coord::from_parts(File::E, rank);
        let rook_short = Coord::from_parts(File::H, rank);
        let rook_long = Coord::from_parts(File::A, rank);
        if mv.src == rook_short || mv.dst == rook_short {
            b.r.castling.unset(color, CastlingSide::King);
        }
        if mv.src == rook_long || mv.dst == rook_long {
            b.r.castling.unset(color, CastlingSide::Queen);
        }
        if mv.src == king_home || mv.dst == king_home {
            b.r.castling.unset_color(color);
        }
    }

    let is_double_push =
        is_pawn && (mv.dst.index() as isize - mv.src.index() as isize).abs() == 20;
    b.r.ep_target = if is_double_push {
        Coord::from_grid((mv.src.index() + mv.dst.index()) as isize / 2)
    } else {
        None
    };

    if is_pawn || is_capture {
        b.r.move_counter = 0;
    } else {
        b.r.move_counter += 1;
    }
    if side == Color::Black {
        b.r.move_number += 1;
    }
    b.r.side = side.inv();
}
