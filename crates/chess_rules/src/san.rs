//! Standard Algebraic Notation.

use crate::board::BoardState;
use crate::error::{ChessError, ChessResult};
use crate::legal::{check_legal, legal_moves};
use crate::status::{GameStatus, game_status};
use crate::types::*;

/// SAN for `mv` played from `pos`, without check or mate suffix.
///
/// `mv` should be legal; disambiguation is computed against the other legal
/// moves of the side to move.
pub fn move_to_san(pos: &BoardState, mv: Move) -> String {
    san_among(pos, mv, &legal_moves(pos))
}

// SAN of `mv` given the full legal move list of `pos`.
fn san_among(pos: &BoardState, mv: Move, legal: &[Move]) -> String {
    let Some(piece) = pos.piece_at(mv.from) else {
        return mv.to_string();
    };

    if piece.kind == PieceKind::King
        && mv.rank_delta() == 0
        && let Some(side) = CastleSide::from_king_step(mv.file_delta())
    {
        return side.san().to_string();
    }

    let is_capture = pos.piece_at(mv.to).is_some()
        || (piece.kind == PieceKind::Pawn && mv.file_delta() != 0);

    let mut san = String::new();
    if piece.kind == PieceKind::Pawn {
        if is_capture {
            san.push(mv.from.file_char());
        }
    } else {
        san.push(piece.kind.letter());
        san.push_str(&disambiguation(pos, mv, piece, legal));
    }

    if is_capture {
        san.push('x');
    }
    san.push_str(&mv.to.to_string());

    if let Some(promo) = mv.promotion {
        san.push('=');
        san.push(promo.letter());
    }
    san
}

/// SAN with `+` appended for check and `#` for mate.
pub fn move_to_san_with_suffix(pos: &BoardState, mv: Move) -> String {
    let mut san = move_to_san(pos, mv);
    let mut next = pos.clone();
    if next.apply_move(mv).is_err() {
        return san;
    }
    match game_status(&next, &[]) {
        GameStatus::WhiteWins | GameStatus::BlackWins => san.push('#'),
        _ if next.in_check(next.side_to_move) => san.push('+'),
        _ => {}
    }
    san
}

// Empty, origin file, origin rank, or the full origin square, whichever is
// the first that singles `mv` out among same-kind moves to the same square.
fn disambiguation(pos: &BoardState, mv: Move, piece: Piece, legal: &[Move]) -> String {
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|other| {
            other.to == mv.to
                && other.from != mv.from
                && pos.piece_at(other.from) == Some(piece)
        })
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
        mv.from.file_char().to_string()
    } else if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
        mv.from.rank_char().to_string()
    } else {
        mv.from.to_string()
    }
}

/// Strip check, mate and annotation marks from a SAN token.
pub fn clean_san_token(token: &str) -> &str {
    token.trim().trim_end_matches(['+', '#', '!', '?'])
}

/// Resolve a single SAN token against the legal moves of `pos`.
pub fn parse_san(pos: &BoardState, token: &str) -> ChessResult<Move> {
    let san = clean_san_token(token);
    if san.is_empty() {
        return Err(ChessError::malformed("SAN", token, "empty move token"));
    }

    let castle = match san {
        "O-O" | "0-0" => Some(CastleSide::Kingside),
        "O-O-O" | "0-0-0" => Some(CastleSide::Queenside),
        _ => None,
    };
    if let Some(side) = castle {
        let from = king_home(pos.side_to_move);
        let to = Square::new(from.rank() as i8, side.king_target_file() as i8)
            .ok_or_else(|| ChessError::malformed("SAN", token, "castling off the board"))?;
        let mv = Move::new(from, to);
        check_legal(pos, mv)?;
        return Ok(mv);
    }

    let wanted = normalise_promotion(san);
    let legal = legal_moves(pos);
    legal
        .iter()
        .copied()
        .find(|&mv| san_among(pos, mv, &legal) == wanted)
        .or_else(|| loose_match(pos, &wanted, &legal))
        .ok_or_else(|| ChessError::malformed("SAN", token, "no legal move matches"))
}

// Accepts over-disambiguated or capture-less spellings such as `Ngf3` or
// `Qh4e1` when exactly one legal move fits them.
fn loose_match(pos: &BoardState, san: &str, legal: &[Move]) -> Option<Move> {
    let (body, promotion) = match san.split_once('=') {
        Some((body, promo)) => {
            let mut it = promo.chars();
            let kind = PieceKind::from_letter(it.next()?)?;
            if it.next().is_some() {
                return None;
            }
            (body, Some(kind))
        }
        None => (san, None),
    };

    let mut chars: Vec<char> = body.chars().filter(|&c| c != 'x').collect();
    let kind = match chars.first() {
        Some(&c) if c.is_ascii_uppercase() => {
            chars.remove(0);
            PieceKind::from_letter(c)?
        }
        _ => PieceKind::Pawn,
    };
    if chars.len() < 2 || chars.len() > 4 {
        return None;
    }
    let dest: String = chars[chars.len() - 2..].iter().collect();
    let to: Square = dest.parse().ok()?;
    let mut file_hint = None;
    let mut rank_hint = None;
    for &c in &chars[..chars.len() - 2] {
        match c {
            'a'..='h' if file_hint.is_none() => file_hint = Some(c as u8 - b'a'),
            '1'..='8' if rank_hint.is_none() => rank_hint = Some(c as u8 - b'1'),
            _ => return None,
        }
    }

    let mut fits = legal.iter().copied().filter(|mv| {
        mv.to == to
            && mv.promotion == promotion
            && pos.piece_at(mv.from).is_some_and(|pc| pc.kind == kind)
            && !(kind == PieceKind::King && mv.file_delta().abs() == 2)
            && file_hint.is_none_or(|f| mv.from.file() == f)
            && rank_hint.is_none_or(|r| mv.from.rank() == r)
    });
    let first = fits.next()?;
    match fits.next() {
        None => Some(first),
        Some(_) => None,
    }
}

// `e8Q` -> `e8=Q`
fn normalise_promotion(san: &str) -> String {
    let mut chars: Vec<char> = san.chars().collect();
    let n = chars.len();
    if n >= 3
        && !san.contains('=')
        && PieceKind::from_letter(chars[n - 1]).is_some_and(|k| k.is_promotion_target())
        && chars[n - 1].is_ascii_uppercase()
        && chars[n - 2].is_ascii_digit()
        && matches!(chars[0], 'a'..='h')
    {
        chars.insert(n - 1, '=');
    }
    chars.into_iter().collect()
}

#[cfg(test)]
#[path = "san_tests.rs"]
mod san_tests;
