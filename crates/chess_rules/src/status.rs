//! Game status classification: mate, stalemate and the draw rules.
//!
//! Status is never stored. It is recomputed from the board and the FEN
//! history each time it is asked for.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::fen::repetition_key_of;
use crate::legal::{legal_moves, legal_moves_for};
use crate::types::*;

/// Halfmove clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of one position that make a repetition draw.
pub const REPETITION_LIMIT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    InCheck,
    WhiteWins,
    BlackWins,
    DrawStalemate,
    DrawInsufficientMaterial,
    DrawFiftyMove,
    DrawRepetition,
}

impl GameStatus {
    /// `true` once no further moves should be played.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::InCheck)
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::DrawStalemate
                | GameStatus::DrawInsufficientMaterial
                | GameStatus::DrawFiftyMove
                | GameStatus::DrawRepetition
        )
    }

    /// The decisive result in which `color` wins.
    pub fn win_for(color: Color) -> GameStatus {
        match color {
            Color::White => GameStatus::WhiteWins,
            Color::Black => GameStatus::BlackWins,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::InCheck => "in check",
            GameStatus::WhiteWins => "white wins",
            GameStatus::BlackWins => "black wins",
            GameStatus::DrawStalemate => "draw by stalemate",
            GameStatus::DrawInsufficientMaterial => "draw by insufficient material",
            GameStatus::DrawFiftyMove => "draw by fifty-move rule",
            GameStatus::DrawRepetition => "draw by threefold repetition",
        };
        f.write_str(s)
    }
}

/// Classify the position for the side to move.
///
/// `history` holds FEN snapshots of the game so far, the current position
/// included. Only the first four FEN fields are compared, so positions that
/// differ in their clocks still count as repetitions.
pub fn game_status(pos: &BoardState, history: &[String]) -> GameStatus {
    let side = pos.side_to_move;
    let in_check = pos.in_check(side);

    if legal_moves(pos).is_empty() {
        return if in_check {
            GameStatus::win_for(side.other())
        } else {
            GameStatus::DrawStalemate
        };
    }

    if pos.is_insufficient_material() {
        GameStatus::DrawInsufficientMaterial
    } else if pos.is_fifty_move_draw() {
        GameStatus::DrawFiftyMove
    } else if repetition_count(pos, history) >= REPETITION_LIMIT {
        GameStatus::DrawRepetition
    } else if in_check {
        GameStatus::InCheck
    } else {
        GameStatus::Ongoing
    }
}

/// How many entries of `history` are the same position as `pos`.
pub fn repetition_count(pos: &BoardState, history: &[String]) -> usize {
    let key = pos.repetition_key();
    history
        .iter()
        .filter(|fen| repetition_key_of(fen) == key)
        .count()
}

impl BoardState {
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.in_check(color) && legal_moves_for(self, color).is_empty()
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.in_check(color) && legal_moves_for(self, color).is_empty()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    /// Dead positions recognised here: K v K, K+B v K, K+N v K, and K+B v K+B
    /// with both bishops on the same square color. Anything else, including
    /// K+N v K+N and K+N+N v K, is treated as playable.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors: Vec<(Piece, Square)> = Vec::new();
        for (sq, pc) in self.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Bishop | PieceKind::Knight => minors.push((pc, sq)),
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }

        match minors.as_slice() {
            [] | [_] => true,
            [(a, sa), (b, sb)] => {
                a.kind == PieceKind::Bishop
                    && b.kind == PieceKind::Bishop
                    && a.color != b.color
                    && sa.is_light() == sb.is_light()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod status_tests;
