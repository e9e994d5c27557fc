use serde::{Deserialize, Serialize};

use crate::error::{ChessError, ChessResult};
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const fn all() -> Self {
        CastlingRights {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    pub const fn none() -> Self {
        CastlingRights {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        }
    }

    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.wk,
            (Color::White, CastleSide::Queenside) => self.wq,
            (Color::Black, CastleSide::Kingside) => self.bk,
            (Color::Black, CastleSide::Queenside) => self.bq,
        }
    }

    /// Rights only ever go from `true` to `false` during play.
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.wk = false,
            (Color::White, CastleSide::Queenside) => self.wq = false,
            (Color::Black, CastleSide::Kingside) => self.bk = false,
            (Color::Black, CastleSide::Queenside) => self.bq = false,
        }
    }

    pub fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::Kingside);
        self.revoke(color, CastleSide::Queenside);
    }

    pub fn is_empty(&self) -> bool {
        !(self.wk || self.wq || self.bk || self.bq)
    }
}

/// Full game position: piece placement plus the side state FEN records.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    grid: [[Option<Piece>; 8]; 8], // [rank][file]
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::startpos()
    }
}

impl BoardState {
    /// Board with no pieces, White to move and no castling rights.
    pub fn empty() -> Self {
        BoardState {
            grid: [[None; 8]; 8],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = BoardState::empty();
        p.castling = CastlingRights::all();

        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.grid[0][f] = Some(Piece::new(Color::White, kind));
            p.grid[1][f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.grid[6][f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            p.grid[7][f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.rank() as usize][sq.file() as usize]
    }

    /// Raw-coordinate lookup; anything off the board reads as empty.
    pub fn piece_at_coords(&self, rank: i8, file: i8) -> Option<Piece> {
        Square::new(rank, file).and_then(|sq| self.piece_at(sq))
    }

    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.grid[sq.rank() as usize][sq.file() as usize] = pc;
    }

    /// Raw-coordinate store; a no-op for coordinates off the board.
    pub fn set_piece_at_coords(&mut self, rank: i8, file: i8, pc: Option<Piece>) {
        if let Some(sq) = Square::new(rank, file) {
            self.set_piece(sq, pc);
        }
    }

    /// Every occupied square with its piece, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Apply `mv` in place without checking legality.
    ///
    /// The move is classified from the moving piece and its geometry: a king
    /// stepping two files castles, a pawn moving diagonally onto the empty
    /// en-passant target captures en passant, anything else is a plain move
    /// (with promotion when given). Side state is then brought up to date.
    pub fn apply_move(&mut self, mv: Move) -> ChessResult<()> {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).ok_or(ChessError::InvalidMove {
            mv,
            reason: "no piece on the origin square",
        })?;
        if from == to {
            return Err(ChessError::InvalidMove {
                mv,
                reason: "origin and destination are the same square",
            });
        }
        if let Some(promo) = mv.promotion {
            if moved.kind != PieceKind::Pawn {
                return Err(ChessError::InvalidMove {
                    mv,
                    reason: "only pawns can promote",
                });
            }
            if !promo.is_promotion_target() {
                return Err(ChessError::InvalidMove {
                    mv,
                    reason: "pawns promote to a queen, rook, bishop or knight",
                });
            }
        }

        let mut captured = self.piece_at(to);
        let castle = if moved.kind == PieceKind::King {
            CastleSide::from_king_step(mv.file_delta()).filter(|_| mv.rank_delta() == 0)
        } else {
            None
        };
        let is_en_passant = moved.kind == PieceKind::Pawn
            && mv.file_delta() != 0
            && captured.is_none()
            && self.en_passant == Some(to);

        if let Some(side) = castle {
            self.set_piece(from, None);
            self.set_piece(to, Some(moved));
            let rank = from.rank() as i8;
            let rook_from = Square::new(rank, side.rook_file() as i8);
            let rook_to = Square::new(rank, side.rook_target_file() as i8);
            if let (Some(rf), Some(rt)) = (rook_from, rook_to)
                && let Some(rook) = self.piece_at(rf)
                && rook.kind == PieceKind::Rook
                && rook.color == moved.color
            {
                self.set_piece(rf, None);
                self.set_piece(rt, Some(rook));
            }
        } else if is_en_passant {
            // The captured pawn stands beside the origin, on the target's file.
            let victim = Square::new(from.rank() as i8, to.file() as i8);
            let enemy_pawn = Piece::new(moved.color.other(), PieceKind::Pawn);
            if let Some(vs) = victim
                && self.piece_at(vs) == Some(enemy_pawn)
            {
                captured = Some(enemy_pawn);
                self.set_piece(vs, None);
            }
            self.set_piece(from, None);
            self.set_piece(to, Some(moved));
        } else {
            let placed = match mv.promotion {
                Some(kind) => Piece::new(moved.color, kind),
                None if moved.kind == PieceKind::Pawn
                    && to.rank() == moved.color.promotion_rank() =>
                {
                    Piece::new(moved.color, PieceKind::Queen)
                }
                None => moved,
            };
            self.set_piece(from, None);
            self.set_piece(to, Some(placed));
        }

        // Castling rights: king moves, rook leaves home, rook captured at home.
        if moved.kind == PieceKind::King {
            self.castling.revoke_all(moved.color);
        }
        for side in CastleSide::ALL {
            if moved.kind == PieceKind::Rook && from == rook_home(moved.color, side) {
                self.castling.revoke(moved.color, side);
            }
            if let Some(cp) = captured
                && cp.kind == PieceKind::Rook
                && to == rook_home(cp.color, side)
            {
                self.castling.revoke(cp.color, side);
            }
        }

        // Double pawn push sets en-passant square
        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && mv.file_delta() == 0 && mv.rank_delta().abs() == 2 {
            self.en_passant = from.offset(moved.color.forward(), 0);
        }

        if moved.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        if moved.color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = moved.color.other();

        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
