//! Rendering moves in the standard algebraic notation

use super::{Move, PromotePiece};
use crate::board::Board;
use crate::movegen::{self, OriginBuf};
use crate::types::{CastlingSide, Coord, File, Piece, Rank};
use std::fmt::{self, Display};

/// Move in the standard algebraic notation
///
/// The check and checkmate suffixes are never attached. The disambiguation
/// part is chosen over all the semilegal origins of the moved piece kind,
/// so a pinned piece still forces its file or rank into the result.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum San {
    /// Castling
    Castling(CastlingSide),
    /// Pawn move, either quiet or capture
    Pawn {
        /// Source file, present for captures
        src_file: Option<File>,
        /// Whether the move captures something
        is_capture: bool,
        /// Destination square
        dst: Coord,
        /// Promotion piece, if any
        promote: Option<PromotePiece>,
    },
    /// Move of a non-pawn piece
    Simple {
        /// Moved piece kind
        piece: Piece,
        /// Source file, present if needed for disambiguation
        file: Option<File>,
        /// Source rank, present if needed for disambiguation
        rank: Option<Rank>,
        /// Whether the move captures something
        is_capture: bool,
        /// Destination square
        dst: Coord,
    },
}

impl San {
    /// Builds the notation for the move `mv` on the board `b`
    ///
    /// The move must be legal in the position, see [`Move::san()`].
    pub(crate) fn from_move(mv: Move, b: &Board) -> San {
        let piece = b.get(mv.src()).piece().unwrap();
        let delta = mv.dst().index() as isize - mv.src().index() as isize;
        if piece == Piece::King && delta == 2 {
            return San::Castling(CastlingSide::King);
        }
        if piece == Piece::King && delta == -2 {
            return San::Castling(CastlingSide::Queen);
        }

        let is_enpassant = piece == Piece::Pawn && Some(mv.dst()) == b.ep_target();
        let is_capture = b.get(mv.dst()).is_occupied() || is_enpassant;
        if piece == Piece::Pawn {
            return San::Pawn {
                src_file: is_capture.then(|| mv.src().file()),
                is_capture,
                dst: mv.dst(),
                promote: mv.promote(),
            };
        }

        let mut origins = OriginBuf::new();
        movegen::origins_into(b, b.side(), piece, mv.dst(), false, &mut origins);
        let src = mv.src();
        let (file, rank) = if origins.len() <= 1 {
            (None, None)
        } else if origins.iter().filter(|c| c.file() == src.file()).count() == 1 {
            (Some(src.file()), None)
        } else if origins.iter().filter(|c| c.rank() == src.rank()).count() == 1 {
            (None, Some(src.rank()))
        } else {
            (Some(src.file()), Some(src.rank()))
        };

        San::Simple {
            piece,
            file,
            rank,
            is_capture,
            dst: mv.dst(),
        }
    }
}

impl Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            San::Castling(CastlingSide::King) => write!(f, "O-O"),
            San::Castling(CastlingSide::Queen) => write!(f, "O-O-O"),
            San::Pawn {
                src_file,
                is_capture,
                dst,
                promote,
            } => {
                if let Some(file) = src_file {
                    write!(f, "{}", file)?;
                }
                if is_capture {
                    write!(f, "x")?;
                }
                write!(f, "{}", dst)?;
                if let Some(promote) = promote {
                    write!(f, "={}", Piece::from(promote).as_char())?;
                }
                Ok(())
            }
            San::Simple {
                piece,
                file,
                rank,
                is_capture,
                dst,
            } => {
                write!(f, "{}", piece.as_char())?;
                if let Some(file) = file {
                    write!(f, "{}", file)?;
                }
                if let Some(rank) = rank {
                    write!(f, "{}", rank)?;
                }
                if is_capture {
                    write!(f, "x")?;
                }
                write!(f, "{}", dst)
            }
        }
    }
}
