//! Attack and check detection.
//!
//! Attacks are found by looking outward from the target square: a square is
//! attacked by a piece exactly when that piece, standing where it does, could
//! reach the target by its capture geometry. Pawns only attack diagonally
//! forward; sliders stop at the first occupied square on each ray.

use crate::board::BoardState;
use crate::types::*;

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl BoardState {
    /// Is `target` attacked by any piece of color `by`?
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        !self.attackers(target, by).is_empty()
    }

    /// `true` when `c`'s king is on the board and attacked. A board without
    /// that king is never in check.
    pub fn in_check(&self, c: Color) -> bool {
        match self.king_square(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    /// Every square holding a piece of `by` that attacks `target`.
    pub fn attackers(&self, target: Square, by: Color) -> Vec<Square> {
        let mut found = Vec::new();
        let is = |sq: Square, kinds: &[PieceKind]| {
            self.piece_at(sq)
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // A pawn of `by` attacks `target` from one rank behind it, relative
        // to the pawn's direction of travel.
        let behind = -by.forward();
        for df in [-1, 1] {
            if let Some(s) = target.offset(behind, df)
                && is(s, &[PieceKind::Pawn])
            {
                found.push(s);
            }
        }

        for (dr, df) in KNIGHT_DELTAS {
            if let Some(s) = target.offset(dr, df)
                && is(s, &[PieceKind::Knight])
            {
                found.push(s);
            }
        }

        for (dr, df) in KING_DELTAS {
            if let Some(s) = target.offset(dr, df)
                && is(s, &[PieceKind::King])
            {
                found.push(s);
            }
        }

        let rays = DIAGONALS
            .iter()
            .map(|&d| (d, [PieceKind::Bishop, PieceKind::Queen]))
            .chain(
                ORTHOGONALS
                    .iter()
                    .map(|&d| (d, [PieceKind::Rook, PieceKind::Queen])),
            );
        for ((dr, df), sliders) in rays {
            let mut cur = target.offset(dr, df);
            while let Some(s) = cur {
                if self.piece_at(s).is_some() {
                    if is(s, &sliders) {
                        found.push(s);
                    }
                    break;
                }
                cur = s.offset(dr, df);
            }
        }

        found
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
