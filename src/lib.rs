//! # padchess
//!
//! A chess rules library built on the classic 10x12 padded board. It covers
//! position representation, FEN parsing and formatting, legal move
//! generation, move application, game outcome detection and rendering moves
//! in the standard algebraic notation.
//!
//! ## Example
//!
//! ```
//! use padchess::{Board, Move};
//!
//! let board = Board::initial();
//! assert_eq!(board.legal_moves().len(), 20);
//!
//! let mv: Move = "e2e4".parse().unwrap();
//! assert_eq!(mv.san(&board).unwrap().to_string(), "e4");
//!
//! let board = board.make_move(mv).unwrap();
//! assert_eq!(
//!     board.as_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
//! );
//! ```

pub mod board;
pub mod geometry;
pub mod movegen;
pub mod moves;
pub mod types;

pub use board::{Board, RawBoard};
pub use movegen::MoveList;
pub use moves::{Move, PromotePiece, San};
pub use types::{
    CastlingRights, CastlingSide, Cell, Color, Coord, DrawReason, File, Outcome, Piece, Rank,
    WinReason,
};
