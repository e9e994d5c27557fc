//! Legal move filtering.
//!
//! A pseudo-legal move is legal when playing it on a copy of the board does
//! not leave the mover's king attacked. Castling has extra preconditions that
//! are checked before the copy is made.

use crate::board::BoardState;
use crate::error::{ChessError, ChessResult};
use crate::movegen::{castle_path_clear, check_pseudo_legal, generate_moves, pseudo_legal_moves};
use crate::types::*;

/// Check `mv` for the side to move, reporting why it is rejected.
pub fn check_legal(pos: &BoardState, mv: Move) -> ChessResult<()> {
    match castle_side_of(pos, mv) {
        Some(side) => check_castle(pos, mv, pos.side_to_move, side)?,
        None => check_pseudo_legal(pos, mv)?,
    }

    if !king_safe_after(pos, mv)? {
        return Err(ChessError::IllegalMove {
            mv,
            reason: "move leaves the king in check",
        });
    }
    Ok(())
}

/// Play `mv` on a copy and report whether the mover's king is safe there.
fn king_safe_after(pos: &BoardState, mv: Move) -> ChessResult<bool> {
    let mover = pos.side_to_move;
    let mut next = pos.clone();
    next.apply_move(mv)?;
    Ok(!next.in_check(mover))
}

/// Legality of a move already known to be pseudo-legal.
fn pseudo_move_is_legal(pos: &BoardState, mv: Move) -> bool {
    if let Some(side) = castle_side_of(pos, mv)
        && check_castle(pos, mv, pos.side_to_move, side).is_err()
    {
        return false;
    }
    king_safe_after(pos, mv).unwrap_or(false)
}

pub fn is_legal_move(pos: &BoardState, mv: Move) -> bool {
    check_legal(pos, mv).is_ok()
}

/// The castling side `mv` attempts, if it is a two-file step of the king of
/// the side to move from its home square. Other two-file king steps are
/// plain geometry errors.
fn castle_side_of(pos: &BoardState, mv: Move) -> Option<CastleSide> {
    let pc = pos.piece_at(mv.from)?;
    if pc.kind != PieceKind::King
        || pc.color != pos.side_to_move
        || mv.rank_delta() != 0
        || mv.from != king_home(pc.color)
    {
        return None;
    }
    CastleSide::from_king_step(mv.file_delta())
}

fn check_castle(pos: &BoardState, mv: Move, c: Color, side: CastleSide) -> ChessResult<()> {
    let illegal = |reason: &'static str| -> ChessResult<()> {
        Err(ChessError::IllegalMove { mv, reason })
    };
    if !castle_path_clear(pos, c, side) {
        return illegal("castling right, rook or clear path is missing");
    }
    if pos.piece_at(mv.to).is_some() {
        return illegal("castling destination is occupied");
    }
    let enemy = c.other();
    if pos.is_square_attacked(mv.from, enemy) {
        return illegal("cannot castle out of check");
    }
    // Every square the king crosses, destination included, must be safe.
    let step: i8 = mv.file_delta().signum();
    let mut file = mv.from.file() as i8;
    while file != mv.to.file() as i8 {
        file += step;
        let Some(sq) = Square::new(mv.from.rank() as i8, file) else {
            break;
        };
        if pos.is_square_attacked(sq, enemy) {
            return illegal("cannot castle through or into an attacked square");
        }
    }
    Ok(())
}

/// Legal moves for the side to move.
pub fn legal_moves(pos: &BoardState) -> Vec<Move> {
    let mut moves = pseudo_legal_moves(pos, pos.side_to_move);
    moves.retain(|&mv| pseudo_move_is_legal(pos, mv));
    moves
}

/// Legal moves `color` would have on this board.
///
/// When `color` is not the side to move the question is asked of a copy with
/// the turn handed over and the en-passant target cleared, since that target
/// only ever belongs to the side to move.
pub fn legal_moves_for(pos: &BoardState, color: Color) -> Vec<Move> {
    if pos.side_to_move == color {
        return legal_moves(pos);
    }
    let mut turned = pos.clone();
    turned.side_to_move = color;
    turned.en_passant = None;
    legal_moves(&turned)
}

/// Legal moves of the piece on `from` (empty when it is not that side's turn).
pub fn legal_moves_from(pos: &BoardState, from: Square) -> Vec<Move> {
    let mut moves = generate_moves(pos, from);
    moves.retain(|&mv| pseudo_move_is_legal(pos, mv));
    moves
}

impl BoardState {
    /// Apply `mv` only if it is legal for the side to move.
    pub fn apply_legal_move(&mut self, mv: Move) -> ChessResult<()> {
        check_legal(self, mv)?;
        self.apply_move(mv)
    }
}

#[cfg(test)]
#[path = "legal_tests.rs"]
mod legal_tests;
