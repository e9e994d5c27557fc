//! Portable Game Notation: reading game collections and writing games.
//!
//! Reading is forgiving. A game whose starting position cannot be built is
//! dropped with a warning, and a move token that cannot be played is logged,
//! recorded in [`PgnGame::skipped`] and passed over; the rest of the game is
//! still replayed.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::BoardState;
use crate::error::{ChessError, ChessResult};
use crate::fen::START_FEN;
use crate::game::Game;
use crate::san::{clean_san_token, move_to_san_with_suffix};
use crate::status::GameStatus;
use crate::types::Color;

/// Movetext wraps before this column when writing.
const LINE_WIDTH: usize = 80;

/// Game termination marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PgnResult {
    WhiteWins,
    BlackWins,
    Draw,
    Unknown,
}

impl PgnResult {
    pub fn as_str(self) -> &'static str {
        match self {
            PgnResult::WhiteWins => "1-0",
            PgnResult::BlackWins => "0-1",
            PgnResult::Draw => "1/2-1/2",
            PgnResult::Unknown => "*",
        }
    }

    pub fn from_token(token: &str) -> Option<PgnResult> {
        match token {
            "1-0" => Some(PgnResult::WhiteWins),
            "0-1" => Some(PgnResult::BlackWins),
            "1/2-1/2" => Some(PgnResult::Draw),
            "*" => Some(PgnResult::Unknown),
            _ => None,
        }
    }

    /// Result implied by a game status; unfinished games are `*`.
    pub fn from_status(status: GameStatus) -> PgnResult {
        match status {
            GameStatus::WhiteWins => PgnResult::WhiteWins,
            GameStatus::BlackWins => PgnResult::BlackWins,
            s if s.is_draw() => PgnResult::Draw,
            _ => PgnResult::Unknown,
        }
    }
}

impl fmt::Display for PgnResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One game read from PGN text.
#[derive(Debug, Clone)]
pub struct PgnGame {
    /// Tag pairs in the order they appeared.
    pub headers: Vec<(String, String)>,
    /// The replayed game, including its FEN history.
    pub game: Game,
    /// Result token from the movetext, else from the `Result` tag.
    pub result: PgnResult,
    /// Move tokens that could not be played.
    pub skipped: Vec<String>,
}

impl PgnGame {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Read every game in `text`. Games that fail to parse are logged and left
/// out.
pub fn parse_pgn(text: &str) -> Vec<PgnGame> {
    let mut games = Vec::new();
    for (idx, chunk) in split_games(text).iter().enumerate() {
        match parse_pgn_game(chunk) {
            Ok(game) => games.push(game),
            Err(e) => warn!(game = idx + 1, error = %e, "skipping unreadable PGN game"),
        }
    }
    games
}

/// Read a single game (tag section plus movetext).
pub fn parse_pgn_game(text: &str) -> ChessResult<PgnGame> {
    let mut headers = Vec::new();
    let mut movetext = String::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') && movetext.trim().is_empty() {
            match parse_header_line(trimmed) {
                Some(tag) => headers.push(tag),
                None => warn!(line = trimmed, "ignoring malformed PGN tag"),
            }
        } else {
            movetext.push_str(line);
            movetext.push('\n');
        }
    }

    let fen = headers
        .iter()
        .find(|(k, _)| k == "FEN")
        .map(|(_, v)| v.as_str());
    let mut game = match fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    };

    let mut result = None;
    let mut skipped = Vec::new();
    for token in movetext_tokens(&movetext) {
        if let Some(r) = PgnResult::from_token(&token) {
            result = Some(r);
            continue;
        }
        if let Err(e) = game.play_san(&token) {
            warn!(token = %token, error = %e, "skipping unplayable move token");
            skipped.push(token);
        }
    }

    let result = result
        .or_else(|| {
            headers
                .iter()
                .find(|(k, _)| k == "Result")
                .and_then(|(_, v)| PgnResult::from_token(v))
        })
        .unwrap_or(PgnResult::Unknown);

    debug!(
        plies = game.moves().len(),
        skipped = skipped.len(),
        result = %result,
        "replayed PGN game"
    );

    Ok(PgnGame {
        headers,
        game,
        result,
        skipped,
    })
}

/// `[Key "Value"]` with `\"` and `\\` escapes in the value.
fn parse_header_line(line: &str) -> Option<(String, String)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    let (key, rest) = inner.split_once(char::is_whitespace)?;
    let quoted = rest.trim().strip_prefix('"')?.strip_suffix('"')?;

    let mut value = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            value.push(chars.next()?);
        } else {
            value.push(c);
        }
    }
    Some((key.to_string(), value))
}

/// Split a PGN collection into per-game chunks.
///
/// A game ends at the first blank line after its movetext, or where a tag
/// line follows movetext. Blank lines between tags and movetext stay inside
/// the game.
pub fn split_games(text: &str) -> Vec<String> {
    let mut games = Vec::new();
    let mut current = String::new();
    let mut in_movetext = false;

    let mut flush = |current: &mut String, in_movetext: &mut bool| {
        if !current.trim().is_empty() {
            games.push(std::mem::take(current));
        }
        current.clear();
        *in_movetext = false;
    };

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if in_movetext {
                flush(&mut current, &mut in_movetext);
            }
            continue;
        }
        if trimmed.starts_with('[') && in_movetext {
            flush(&mut current, &mut in_movetext);
        }
        if !trimmed.starts_with('[') {
            in_movetext = true;
        }
        current.push_str(line);
        current.push('\n');
    }
    flush(&mut current, &mut in_movetext);
    games
}

/// Remove `{comments}`, `; line comments`, `(variations)` (nested) and `$n`
/// NAGs from movetext.
pub fn strip_movetext(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' => {
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                }
                out.push(' ');
            }
            ';' => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
                out.push(' ');
            }
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                out.push(' ');
            }
            '$' => {
                while chars.next_if(|d| d.is_ascii_digit()).is_some() {}
                out.push(' ');
            }
            _ if depth > 0 => {}
            _ => out.push(c),
        }
    }
    out
}

/// Move and result tokens of movetext, with move numbers and annotation-only
/// tokens removed.
pub fn movetext_tokens(text: &str) -> Vec<String> {
    strip_movetext(text)
        .split_whitespace()
        .filter_map(|raw| {
            if PgnResult::from_token(raw).is_some() {
                return Some(raw.to_string());
            }
            // "12." / "12..." / "12.e4"
            let token = match raw.trim_start_matches(|c: char| c.is_ascii_digit()) {
                rest if rest.starts_with('.') => rest.trim_start_matches('.'),
                _ => raw,
            };
            (!clean_san_token(token).is_empty()).then(|| token.to_string())
        })
        .collect()
}

/// Render `game` as PGN. The seven-tag roster is always written (filled
/// with `?` placeholders unless `headers` provides a value); other tags in
/// `headers` follow in the order given. `Result` comes from the game's
/// status, and `SetUp`/`FEN` are added for non-standard starting positions.
pub fn write_pgn(game: &Game, headers: &[(String, String)]) -> String {
    let result = PgnResult::from_status(game.status());
    let lookup = |key: &str| {
        headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };

    let roster = [
        ("Event", "?"),
        ("Site", "?"),
        ("Date", "????.??.??"),
        ("Round", "?"),
        ("White", "?"),
        ("Black", "?"),
    ];
    let mut out = String::new();
    for (key, default) in roster {
        let value = lookup(key).unwrap_or_else(|| default.to_string());
        push_tag(&mut out, key, &value);
    }
    push_tag(&mut out, "Result", result.as_str());
    let standard_start = game.initial_fen() == START_FEN;
    if !standard_start {
        push_tag(&mut out, "SetUp", "1");
        push_tag(&mut out, "FEN", game.initial_fen());
    }
    for (key, value) in headers {
        let reserved = roster.iter().any(|(k, _)| k == key)
            || matches!(key.as_str(), "Result" | "SetUp" | "FEN");
        if !reserved {
            push_tag(&mut out, key, value);
        }
    }
    out.push('\n');

    let mut tokens = Vec::with_capacity(game.moves().len() * 2);
    if let Ok(mut board) = BoardState::from_fen(game.initial_fen()) {
        for (ply, record) in game.moves().iter().enumerate() {
            if board.side_to_move == Color::White {
                tokens.push(format!("{}.", board.fullmove_number));
            } else if ply == 0 {
                tokens.push(format!("{}...", board.fullmove_number));
            }
            tokens.push(move_to_san_with_suffix(&board, record.mv));
            if board.apply_move(record.mv).is_err() {
                break;
            }
        }
    }
    tokens.push(result.as_str().to_string());

    let mut line_len = 0;
    for token in tokens {
        if line_len > 0 && line_len + 1 + token.len() > LINE_WIDTH {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        line_len += token.len();
        out.push_str(&token);
    }
    out.push('\n');
    out
}

fn push_tag(out: &mut String, key: &str, value: &str) {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    out.push_str(&format!("[{key} \"{escaped}\"]\n"));
}

/// Read the first game of `text`, failing if there is none.
pub fn parse_single_pgn(text: &str) -> ChessResult<PgnGame> {
    split_games(text)
        .first()
        .ok_or_else(|| ChessError::malformed("PGN", text, "no game found"))
        .and_then(|chunk| parse_pgn_game(chunk))
}

#[cfg(test)]
#[path = "pgn_tests.rs"]
mod pgn_tests;
