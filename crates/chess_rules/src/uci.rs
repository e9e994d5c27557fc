//! Algebraic wire format for moves (`e2e4`, `e7e8q`) and UCI `position`
//! argument handling.

use std::str::FromStr;

use crate::board::BoardState;
use crate::error::{ChessError, ChessResult};
use crate::game::Game;
use crate::legal::check_legal;
use crate::types::*;

pub fn move_to_uci(mv: Move) -> String {
    mv.to_string()
}

impl FromStr for Move {
    type Err = ChessError;

    /// Structural parse only; whether the move can be played is a question
    /// for the board.
    fn from_str(txt: &str) -> Result<Self, Self::Err> {
        let bad = |reason: &str| ChessError::malformed("move", txt, reason);
        if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
            return Err(bad("expected 4 or 5 characters"));
        }
        let from: Square = txt[0..2].parse().map_err(|_| bad("bad origin square"))?;
        let to: Square = txt[2..4].parse().map_err(|_| bad("bad destination square"))?;
        let promotion = match txt[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_letter(c) {
                Some(kind) if kind.is_promotion_target() => Some(kind),
                _ => return Err(bad("promotion must be one of q, r, b, n")),
            },
        };
        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

/// Parse `txt` and require it to be legal on `pos`.
pub fn parse_uci_move(pos: &BoardState, txt: &str) -> ChessResult<Move> {
    let mv: Move = txt.trim().parse()?;
    check_legal(pos, mv)?;
    Ok(mv)
}

/// Build a game from the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
pub fn game_from_uci_position(args: &[&str]) -> ChessResult<Game> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&args[..i], &args[i + 1..]),
        None => (args, &[][..]),
    };

    let mut game = match setup {
        [] | ["startpos"] => Game::new(),
        ["fen", fields @ ..] => Game::from_fen(&fields.join(" "))?,
        _ => {
            return Err(ChessError::malformed(
                "UCI position",
                &args.join(" "),
                "expected `startpos` or `fen <fields>`",
            ));
        }
    };

    for txt in moves {
        game.play_uci(txt)?;
    }
    Ok(game)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
