//! Pseudo-legal move generation.
//!
//! Each piece kind implements [`PieceRules`]; [`rules_for`] picks the
//! implementation for a kind. Moves produced here respect piece geometry and
//! occupancy but may leave the mover's king in check; see [`crate::legal`]
//! for the filter.

use crate::attacks::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS};
use crate::board::BoardState;
use crate::error::{ChessError, ChessResult};
use crate::types::*;

/// Movement rules of one piece kind.
pub trait PieceRules {
    /// Push every pseudo-legal move of the `color` piece standing on `from`.
    fn generate_moves(&self, pos: &BoardState, from: Square, color: Color, out: &mut Vec<Move>);

    /// Does `mv` fit this piece's movement rules on `pos`?
    fn is_valid_move(&self, pos: &BoardState, mv: Move, color: Color) -> bool {
        let mut moves = Vec::with_capacity(32);
        self.generate_moves(pos, mv.from, color, &mut moves);
        moves.contains(&mv)
    }
}

pub struct PawnRules;
pub struct KnightRules;
pub struct BishopRules;
pub struct RookRules;
pub struct QueenRules;
pub struct KingRules;

pub fn rules_for(kind: PieceKind) -> &'static dyn PieceRules {
    match kind {
        PieceKind::Pawn => &PawnRules,
        PieceKind::Knight => &KnightRules,
        PieceKind::Bishop => &BishopRules,
        PieceKind::Rook => &RookRules,
        PieceKind::Queen => &QueenRules,
        PieceKind::King => &KingRules,
    }
}

/// Pseudo-legal moves of the piece on `from`. Empty when the square is
/// empty or holds a piece of the side not to move.
pub fn generate_moves(pos: &BoardState, from: Square) -> Vec<Move> {
    let mut out = Vec::new();
    if let Some(pc) = pos.piece_at(from)
        && pc.color == pos.side_to_move
    {
        rules_for(pc.kind).generate_moves(pos, from, pc.color, &mut out);
    }
    out
}

/// Pseudo-legal moves of every `color` piece, whoever is to move.
pub fn pseudo_legal_moves(pos: &BoardState, color: Color) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for (sq, pc) in pos.pieces() {
        if pc.color == color {
            rules_for(pc.kind).generate_moves(pos, sq, color, &mut out);
        }
    }
    out
}

/// Explain why `mv` is not pseudo-legal for the side to move, if it isn't.
pub fn check_pseudo_legal(pos: &BoardState, mv: Move) -> ChessResult<()> {
    let invalid = |reason: &'static str| -> ChessResult<()> {
        Err(ChessError::InvalidMove { mv, reason })
    };
    let Some(pc) = pos.piece_at(mv.from) else {
        return invalid("no piece on the origin square");
    };
    if pc.color != pos.side_to_move {
        return invalid("it is not this side's turn");
    }
    if let Some(target) = pos.piece_at(mv.to)
        && target.color == pc.color
    {
        return invalid("destination is occupied by a friendly piece");
    }
    if !rules_for(pc.kind).is_valid_move(pos, mv, pc.color) {
        return invalid("the piece cannot move that way from here");
    }
    Ok(())
}

pub fn is_pseudo_legal(pos: &BoardState, mv: Move) -> bool {
    check_pseudo_legal(pos, mv).is_ok()
}

impl PieceRules for PawnRules {
    fn generate_moves(&self, pos: &BoardState, from: Square, c: Color, out: &mut Vec<Move>) {
        let dir = c.forward();

        // forward 1
        if let Some(to) = from.offset(dir, 0)
            && pos.piece_at(to).is_none()
        {
            push_pawn_move(from, to, c, out);

            // forward 2 from start
            if from.rank() == c.pawn_start_rank()
                && let Some(to2) = from.offset(2 * dir, 0)
                && pos.piece_at(to2).is_none()
            {
                out.push(Move::new(from, to2));
            }
        }

        // captures + en-passant
        for df in [-1, 1] {
            let Some(to) = from.offset(dir, df) else {
                continue;
            };
            match pos.piece_at(to) {
                Some(tpc) if tpc.color != c => push_pawn_move(from, to, c, out),
                Some(_) => {}
                None if pos.en_passant == Some(to)
                    && from
                        .offset(0, df)
                        .and_then(|beside| pos.piece_at(beside))
                        == Some(Piece::new(c.other(), PieceKind::Pawn)) =>
                {
                    out.push(Move::new(from, to))
                }
                None => {}
            }
        }
    }
}

fn push_pawn_move(from: Square, to: Square, c: Color, out: &mut Vec<Move>) {
    if to.rank() == c.promotion_rank() {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move::with_promotion(from, to, pk));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

impl PieceRules for KnightRules {
    fn generate_moves(&self, pos: &BoardState, from: Square, c: Color, out: &mut Vec<Move>) {
        gen_steps(pos, from, c, &KNIGHT_DELTAS, out);
    }
}

impl PieceRules for BishopRules {
    fn generate_moves(&self, pos: &BoardState, from: Square, c: Color, out: &mut Vec<Move>) {
        gen_slider(pos, from, c, &DIAGONALS, out);
    }
}

impl PieceRules for RookRules {
    fn generate_moves(&self, pos: &BoardState, from: Square, c: Color, out: &mut Vec<Move>) {
        gen_slider(pos, from, c, &ORTHOGONALS, out);
    }
}

impl PieceRules for QueenRules {
    fn generate_moves(&self, pos: &BoardState, from: Square, c: Color, out: &mut Vec<Move>) {
        gen_slider(pos, from, c, &DIAGONALS, out);
        gen_slider(pos, from, c, &ORTHOGONALS, out);
    }
}

impl PieceRules for KingRules {
    fn generate_moves(&self, pos: &BoardState, from: Square, c: Color, out: &mut Vec<Move>) {
        gen_steps(pos, from, c, &KING_DELTAS, out);
        gen_castle(pos, from, c, out);
    }
}

fn gen_steps(pos: &BoardState, from: Square, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(dr, df) in deltas {
        if let Some(to) = from.offset(dr, df) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &BoardState, from: Square, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(dr, df) in dirs {
        let mut cur = from.offset(dr, df);
        while let Some(to) = cur {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            cur = to.offset(dr, df);
        }
    }
}

// Occupancy-only castling; attack checks belong to the legality filter.
fn gen_castle(pos: &BoardState, from: Square, c: Color, out: &mut Vec<Move>) {
    if from != king_home(c) {
        return;
    }
    for side in CastleSide::ALL {
        if castle_path_clear(pos, c, side) {
            let to = Square::new(from.rank() as i8, side.king_target_file() as i8);
            if let Some(to) = to {
                out.push(Move::new(from, to));
            }
        }
    }
}

/// Right held, rook at home, and every square between king and rook empty.
pub(crate) fn castle_path_clear(pos: &BoardState, c: Color, side: CastleSide) -> bool {
    if !pos.castling.has(c, side) {
        return false;
    }
    let rook_sq = rook_home(c, side);
    if pos.piece_at(rook_sq) != Some(Piece::new(c, PieceKind::Rook)) {
        return false;
    }
    let king_file = king_home(c).file();
    let (lo, hi) = if rook_sq.file() < king_file {
        (rook_sq.file() + 1, king_file)
    } else {
        (king_file + 1, rook_sq.file())
    };
    (lo..hi).all(|f| pos.piece_at_coords(c.back_rank() as i8, f as i8).is_none())
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
