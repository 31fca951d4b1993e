//! Move generation
//!
//! The generator works backwards: for every target square it searches for
//! the origin squares from which a piece of the given kind could arrive
//! there. Running this search for all the piece kinds of one color answers
//! both "which moves are possible" and "is this square attacked".

use crate::board::Board;
use crate::geometry;
use crate::moves::{self, Move, PromotePiece};
use crate::types::{CastlingSide, Cell, Color, Coord, File, Piece};
use arrayvec::ArrayVec;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::slice;

/// Buffer for origin squares found for a single target square
///
/// A single target can have at most 27 origins over all the piece kinds, so
/// the capacity is never exceeded.
pub(crate) type OriginBuf = ArrayVec<Coord, 32>;

/// List of moves
///
/// The list is backed by [`ArrayVec`], so it is allocated on stack and can
/// hold up to 256 moves, which is enough for any legal position.
#[derive(Default, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 256>);

impl MoveList {
    /// Creates an empty move list
    #[inline]
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = <ArrayVec<Move, 256> as IntoIterator>::IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn push_sliding(b: &Board, cell: Cell, target: Coord, dirs: &[isize], out: &mut OriginBuf) {
    for &dir in dirs {
        let mut next = target.add(dir);
        while let Some(src) = next {
            let found = b.get(src);
            if found == cell {
                out.push(src);
            }
            if found.is_occupied() {
                break;
            }
            next = src.add(dir);
        }
    }
}

fn push_steps(b: &Board, cell: Cell, target: Coord, dirs: &[isize], out: &mut OriginBuf) {
    for &dir in dirs {
        if let Some(src) = target.add(dir) {
            if b.get(src) == cell {
                out.push(src);
            }
        }
    }
}

fn push_pawn_origins(b: &Board, color: Color, target: Coord, out: &mut OriginBuf) {
    let pawn = Cell::from_parts(color, Piece::Pawn);
    let forward = geometry::pawn_forward_delta(color);
    if b.get(target).is_occupied() || Some(target) == b.ep_target() {
        for side in [-1, 1] {
            if let Some(src) = target.add(-forward + side) {
                if b.get(src) == pawn {
                    out.push(src);
                }
            }
        }
        return;
    }
    if let Some(src) = target.add(-forward) {
        if b.get(src) == pawn {
            out.push(src);
        } else if b.get(src).is_empty() && target.rank() == geometry::double_move_dst_rank(color) {
            if let Some(src2) = src.add(-forward) {
                if b.get(src2) == pawn {
                    out.push(src2);
                }
            }
        }
    }
}

fn push_castling_origin(b: &Board, color: Color, target: Coord, out: &mut OriginBuf) {
    if b.get(target).is_occupied() {
        return;
    }
    let rank = geometry::home_rank(color);
    let home = Coord::from_parts(File::E, rank);
    if b.king_pos(color) != home {
        return;
    }
    let inv = color.inv();
    if target == Coord::from_parts(File::G, rank) && b.castling().has(color, CastlingSide::King) {
        let pass = Coord::from_parts(File::F, rank);
        if b.get(pass).is_empty()
            && !is_cell_attacked(b, pass, inv)
            && !is_cell_attacked(b, target, inv)
        {
            out.push(home);
        }
    } else if target == Coord::from_parts(File::C, rank)
        && b.castling().has(color, CastlingSide::Queen)
    {
        let pass = Coord::from_parts(File::D, rank);
        let knight_home = Coord::from_parts(File::B, rank);
        if b.get(pass).is_empty()
            && b.get(knight_home).is_empty()
            && !is_cell_attacked(b, pass, inv)
            && !is_cell_attacked(b, target, inv)
        {
            out.push(home);
        }
    }
}

/// Finds all the squares from which a piece `piece` of color `color` could
/// move to `target`, and appends them to `out`
///
/// Castling is considered only when `include_castling` is set. Attack
/// queries must not include it, both because castling doesn't attack
/// anything and because its transit checks would otherwise recurse into
/// this function forever.
pub(crate) fn origins_into(
    b: &Board,
    color: Color,
    piece: Piece,
    target: Coord,
    include_castling: bool,
    out: &mut OriginBuf,
) {
    if b.get(target).color() == Some(color) {
        return;
    }
    let cell = Cell::from_parts(color, piece);
    match piece {
        Piece::Pawn => push_pawn_origins(b, color, target, out),
        Piece::Knight => push_steps(b, cell, target, &geometry::KNIGHT_JUMPS, out),
        Piece::Bishop => push_sliding(b, cell, target, &geometry::BISHOP_DIRS, out),
        Piece::Rook => push_sliding(b, cell, target, &geometry::ROOK_DIRS, out),
        Piece::Queen => push_sliding(b, cell, target, &geometry::QUEEN_DIRS, out),
        Piece::King => {
            push_steps(b, cell, target, &geometry::KING_DIRS, out);
            if include_castling {
                push_castling_origin(b, color, target, out);
            }
        }
    }
}

/// Returns `true` if the square `target` is attacked by the pieces of color
/// `color`
pub fn is_cell_attacked(b: &Board, target: Coord, color: Color) -> bool {
    let mut buf = OriginBuf::new();
    for piece in Piece::KINDS {
        origins_into(b, color, piece, target, false, &mut buf);
        if !buf.is_empty() {
            return true;
        }
    }
    false
}

fn is_castling_move(b: &Board, mv: Move) -> bool {
    b.get(mv.src()).piece() == Some(Piece::King)
        && (mv.dst().index() as isize - mv.src().index() as isize).abs() == 2
}

/// Generates all the semilegal moves (i.e. the moves which can leave the
/// king under attack) and appends them to `out`
///
/// The moves are ordered by target square first and by origin square
/// second, both in grid index order. Promotions to all the four pieces are
/// emitted next to each other.
pub fn semilegal_moves_into(b: &Board, out: &mut MoveList) {
    let side = b.side();
    for target in Coord::iter() {
        let mut batch = OriginBuf::new();
        for piece in Piece::KINDS {
            origins_into(b, side, piece, target, true, &mut batch);
        }
        batch.sort_unstable();
        for src in batch {
            if b.get(src).piece() == Some(Piece::Pawn)
                && target.rank() == geometry::promote_dst_rank(side)
            {
                for promote in PromotePiece::ALL {
                    out.push(Move::new(src, target, Some(promote)));
                }
            } else {
                out.push(Move::new(src, target, None));
            }
        }
    }
}

/// Generates all the semilegal moves in the position
#[inline]
pub fn semilegal_moves(b: &Board) -> MoveList {
    let mut res = MoveList::new();
    semilegal_moves_into(b, &mut res);
    res
}

/// Generates all the legal moves in the position
///
/// A semilegal move is legal if it doesn't leave the own king under attack
/// and, in case of castling, doesn't start while the king is in check.
pub fn legal_moves(b: &Board) -> MoveList {
    let mut res = semilegal_moves(b);
    let side = b.side();
    let in_check = b.is_check();
    res.retain(|&mut mv| {
        if in_check && is_castling_move(b, mv) {
            return false;
        }
        let mut probe = b.clone();
        moves::apply_pieces(&mut probe, mv);
        !is_cell_attacked(&probe, probe.king_pos(side), side.inv())
    });
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn move_strs(b: &Board) -> Vec<String> {
        legal_moves(b).iter().map(|mv| mv.to_string()).collect()
    }

    fn perft(b: &Board, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let mut res = 0;
        for &mv in &legal_moves(b) {
            let mut next = b.clone();
            moves::apply_full(&mut next, mv);
            res += perft(&next, depth - 1);
        }
        res
    }

    #[test]
    fn test_initial_moves() {
        let board = Board::initial();
        let moves = move_strs(&board);
        assert_eq!(moves.len(), 20);
        for mv in ["e2e4", "e2e3", "g1f3", "b1a3", "h2h4"] {
            assert!(moves.iter().any(|m| m == mv), "missing move: {}", mv);
        }
        assert!(!moves.iter().any(|m| m == "e1g1"));
    }

    #[test]
    fn test_move_order() {
        let board = Board::initial();
        let moves = legal_moves(&board);
        let mut sorted: Vec<_> = moves
            .iter()
            .map(|mv| (mv.dst().index(), mv.src().index()))
            .collect();
        sorted.sort();
        let actual: Vec<_> = moves
            .iter()
            .map(|mv| (mv.dst().index(), mv.src().index()))
            .collect();
        assert_eq!(actual, sorted);
    }

    #[test]
    fn test_promote_order() {
        let board = Board::from_fen("8/2P5/8/8/8/8/4k1K1/8 w - - 0 1").unwrap();
        let moves = move_strs(&board);
        let promotes: Vec<_> = moves.iter().filter(|m| m.starts_with("c7")).collect();
        assert_eq!(promotes, vec!["c7c8q", "c7c8n", "c7c8r", "c7c8b"]);
    }

    #[test]
    fn test_perft_initial() {
        let board = Board::initial();
        assert_eq!(perft(&board, 1), 20);
        assert_eq!(perft(&board, 2), 400);
        assert_eq!(perft(&board, 3), 8902);
    }

    #[test]
    fn test_perft_kiwipete() {
        let board = Board::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(perft(&board, 1), 48);
        assert_eq!(perft(&board, 2), 2039);
    }

    #[test]
    fn test_attacked() {
        let board = Board::initial();
        assert!(is_cell_attacked(
            &board,
            "f3".parse().unwrap(),
            Color::White
        ));
        assert!(!is_cell_attacked(
            &board,
            "e5".parse().unwrap(),
            Color::White
        ));
        assert!(is_cell_attacked(
            &board,
            "f6".parse().unwrap(),
            Color::Black
        ));
        assert!(!is_cell_attacked(
            &board,
            "f3".parse().unwrap(),
            Color::Black
        ));
    }

    #[test]
    fn test_castling_available() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = move_strs(&board);
        assert!(moves.iter().any(|m| m == "e1g1"));
        assert!(moves.iter().any(|m| m == "e1c1"));

        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let moves = move_strs(&board);
        assert!(moves.iter().any(|m| m == "e8g8"));
        assert!(moves.iter().any(|m| m == "e8c8"));
    }

    #[test]
    fn test_castling_no_rights() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        let moves = move_strs(&board);
        assert!(!moves.iter().any(|m| m == "e1g1"));
        assert!(!moves.iter().any(|m| m == "e1c1"));
    }

    #[test]
    fn test_castling_transit_attacked() {
        // The f8 rook keeps an eye on f1, so only queenside castling works.
        let board = Board::from_fen("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1").unwrap();
        let moves = move_strs(&board);
        assert!(!moves.iter().any(|m| m == "e1g1"));
        assert!(moves.iter().any(|m| m == "e1c1"));
    }

    #[test]
    fn test_castling_in_check() {
        let board = Board::from_fen("r3k2r/8/8/8/4r3/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(board.is_check());
        let moves = move_strs(&board);
        assert!(!moves.iter().any(|m| m == "e1g1"));
        assert!(!moves.iter().any(|m| m == "e1c1"));
    }

    #[test]
    fn test_castling_blocked() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/Rn2K1nR w KQkq - 0 1").unwrap();
        let moves = move_strs(&board);
        assert!(!moves.iter().any(|m| m == "e1g1"));
        assert!(!moves.iter().any(|m| m == "e1c1"));
    }

    #[test]
    fn test_pinned_piece() {
        // The d2 knight is pinned by the d8 rook and cannot move, so only
        // the king moves remain.
        let board = Board::from_fen("3r3k/8/8/8/8/8/3N4/3K4 w - - 0 1").unwrap();
        let moves = move_strs(&board);
        assert!(!moves.iter().any(|m| m.starts_with("d2")));
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn test_enpassant_moves() {
        let board =
            Board::from_fen("rnbqkbnr/1pp1pppp/8/p2pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .unwrap();
        let moves = move_strs(&board);
        assert!(moves.iter().any(|m| m == "e5d6"));
        assert!(moves.iter().any(|m| m == "e5e6"));
        assert!(!moves.iter().any(|m| m == "e5f6"));
    }
}
