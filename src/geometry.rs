//! Board geometry: grid offsets and color-dependent ranks
//!
//! All the offsets here are offsets in the 10x12 grid, so moving one rank up
//! from White's point of view means adding -10.

use crate::types::{Color, Rank};

/// Grid offsets for rook moves
pub const ROOK_DIRS: [isize; 4] = [-10, -1, 1, 10];

/// Grid offsets for bishop moves
pub const BISHOP_DIRS: [isize; 4] = [-11, -9, 9, 11];

/// Grid offsets for queen moves
pub const QUEEN_DIRS: [isize; 8] = [-11, -10, -9, -1, 1, 9, 10, 11];

/// Grid offsets for king moves (excluding castling)
pub const KING_DIRS: [isize; 8] = QUEEN_DIRS;

/// Grid offsets for knight jumps
pub const KNIGHT_JUMPS: [isize; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];

/// Grid offset for a single pawn push of color `c`
#[inline]
pub const fn pawn_forward_delta(c: Color) -> isize {
    match c {
        Color::White => -10,
        Color::Black => 10,
    }
}

/// Returns the rank on which the pieces of color `c` start the game
#[inline]
pub const fn home_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

/// Returns the rank on which a pawn of color `c` lands after a double push
#[inline]
pub const fn double_move_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R4,
        Color::Black => Rank::R5,
    }
}

/// Returns the rank on which a pawn of color `c` promotes
#[inline]
pub const fn promote_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}

/// Returns the rank on which an en passant target square must be located
/// when `c` is the side to move
#[inline]
pub const fn enpassant_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R6,
        Color::Black => Rank::R3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    #[test]
    fn test_pawn_deltas() {
        let e2: Coord = "e2".parse().unwrap();
        assert_eq!(
            e2.add(pawn_forward_delta(Color::White)),
            "e3".parse().ok()
        );
        let e7: Coord = "e7".parse().unwrap();
        assert_eq!(
            e7.add(pawn_forward_delta(Color::Black)),
            "e6".parse().ok()
        );
    }

    #[test]
    fn test_ranks() {
        assert_eq!(home_rank(Color::White), Rank::R1);
        assert_eq!(home_rank(Color::Black), Rank::R8);
        assert_eq!(double_move_dst_rank(Color::White), Rank::R4);
        assert_eq!(double_move_dst_rank(Color::Black), Rank::R5);
        assert_eq!(promote_dst_rank(Color::White), Rank::R8);
        assert_eq!(promote_dst_rank(Color::Black), Rank::R1);
        assert_eq!(enpassant_rank(Color::White), Rank::R6);
        assert_eq!(enpassant_rank(Color::Black), Rank::R3);
    }

    #[test]
    fn test_knight_jumps() {
        let e4: Coord = "e4".parse().unwrap();
        let mut targets: Vec<_> = KNIGHT_JUMPS
            .iter()
            .filter_map(|&d| e4.add(d))
            .map(|c| c.to_string())
            .collect();
        targets.sort();
        assert_eq!(
            targets,
            vec!["c3", "c5", "d2", "d6", "f2", "f6", "g3", "g5"]
        );

        let a1: Coord = "a1".parse().unwrap();
        let reachable = KNIGHT_JUMPS.iter().filter_map(|&d| a1.add(d)).count();
        assert_eq!(reachable, 2);
    }
}
