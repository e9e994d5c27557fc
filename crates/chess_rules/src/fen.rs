//! Forsyth-Edwards Notation for [`BoardState`].

use std::fmt;
use std::str::FromStr;

use crate::board::{BoardState, CastlingRights};
use crate::error::{ChessError, ChessResult};
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl BoardState {
    pub fn to_fen(&self) -> String {
        let mut fen = self.placement_fen();
        fen.push(' ');
        fen.push(self.side_to_move.fen_char());
        fen.push(' ');
        fen.push_str(&self.castling_fen());
        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }
        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }

    /// FEN fields 1-4 (placement, side, castling, en passant). Two positions
    /// with the same key are the same position for repetition purposes.
    pub fn repetition_key(&self) -> String {
        repetition_key_of(&self.to_fen())
    }

    fn placement_fen(&self) -> String {
        let mut out = String::with_capacity(64);
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                match self.piece_at_coords(rank, file) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    fn castling_fen(&self) -> String {
        let c = &self.castling;
        let mut s = String::new();
        for (flag, ch) in [(c.wk, 'K'), (c.wq, 'Q'), (c.bk, 'k'), (c.bq, 'q')] {
            if flag {
                s.push(ch);
            }
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }

    /// Parse a FEN record into a fresh board.
    ///
    /// The halfmove and fullmove fields may be omitted (defaulting to 0 and
    /// 1); all other fields are required.
    pub fn from_fen(fen: &str) -> ChessResult<BoardState> {
        let bad = |reason: &str| ChessError::malformed("FEN", fen, reason);

        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 || parts.len() > 6 {
            return Err(bad("expected 4 to 6 space-separated fields"));
        }

        let mut board = BoardState::empty();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(bad("board section must have 8 ranks"));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if d == 0 || d > 8 {
                        return Err(bad("empty-square run must be 1-8"));
                    }
                    file += d as i8;
                } else {
                    let pc = Piece::from_fen_char(ch).ok_or_else(|| bad("unknown piece letter"))?;
                    let sq = Square::new(rank, file).ok_or_else(|| bad("too many files in a rank"))?;
                    board.set_piece(sq, Some(pc));
                    file += 1;
                }
                if file > 8 {
                    return Err(bad("too many files in a rank"));
                }
            }
            if file != 8 {
                return Err(bad("not enough files in a rank"));
            }
        }

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(bad("side to move must be `w` or `b`")),
        };

        board.castling = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                let (color, side) = match c {
                    'K' => (Color::White, CastleSide::Kingside),
                    'Q' => (Color::White, CastleSide::Queenside),
                    'k' => (Color::Black, CastleSide::Kingside),
                    'q' => (Color::Black, CastleSide::Queenside),
                    _ => return Err(bad("castling field must be a subset of KQkq or -")),
                };
                if board.castling.has(color, side) {
                    return Err(bad("repeated castling letter"));
                }
                set_right(&mut board.castling, color, side);
            }
        }

        board.en_passant = if parts[3] == "-" {
            None
        } else {
            let sq: Square = parts[3]
                .parse()
                .map_err(|_| bad("en-passant target is not a square"))?;
            // The target sits behind a pawn of the side that just moved.
            let expected_rank = match board.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if sq.rank() != expected_rank {
                return Err(bad("en-passant target must be on rank 6 with white to move, rank 3 with black"));
            }
            Some(sq)
        };

        board.halfmove_clock = match parts.get(4) {
            Some(s) => s.parse().map_err(|_| bad("halfmove clock is not a number"))?,
            None => 0,
        };
        let fullmove: u32 = match parts.get(5) {
            Some(s) => s.parse().map_err(|_| bad("fullmove number is not a number"))?,
            None => 1,
        };
        board.fullmove_number = fullmove.max(1);

        Ok(board)
    }

    /// Replace this board with the position in `fen`. On error the board is
    /// left as it was.
    pub fn load_fen(&mut self, fen: &str) -> ChessResult<()> {
        *self = BoardState::from_fen(fen)?;
        Ok(())
    }
}

fn set_right(rights: &mut CastlingRights, color: Color, side: CastleSide) {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => rights.wk = true,
        (Color::White, CastleSide::Queenside) => rights.wq = true,
        (Color::Black, CastleSide::Kingside) => rights.bk = true,
        (Color::Black, CastleSide::Queenside) => rights.bq = true,
    }
}

/// The first four fields of a FEN string, whitespace-normalised.
pub fn repetition_key_of(fen: &str) -> String {
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

impl FromStr for BoardState {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardState::from_fen(s)
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
