//! The work behind each subcommand. Every command returns a report that can
//! be printed as text (`Display`) or as JSON (`Serialize`).

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info};

use chess_rules::{
    BoardState, ChessResult, Color, Game, GameStatus, PgnResult, START_FEN, legal_moves,
    move_to_san, parse_pgn, perft_divide,
};

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub games: Vec<GameReport>,
}

#[derive(Debug, Serialize)]
pub struct GameReport {
    pub index: usize,
    pub white: Option<String>,
    pub black: Option<String>,
    pub plies: usize,
    pub declared: PgnResult,
    pub status: GameStatus,
    /// False when the game ends in mate or a draw that the declared result
    /// contradicts.
    pub result_matches: bool,
    pub final_fen: String,
    pub skipped: Vec<String>,
}

/// Replay every game in a PGN collection.
pub fn replay(text: &str) -> ReplayReport {
    let games = parse_pgn(text)
        .into_iter()
        .enumerate()
        .map(|(idx, pgn)| {
            let status = pgn.game.status();
            let result_matches =
                !status.is_terminal() || PgnResult::from_status(status) == pgn.result;
            GameReport {
                index: idx + 1,
                white: pgn.header("White").map(str::to_string),
                black: pgn.header("Black").map(str::to_string),
                plies: pgn.game.moves().len(),
                declared: pgn.result,
                status,
                result_matches,
                final_fen: pgn.game.board().to_fen(),
                skipped: pgn.skipped,
            }
        })
        .collect();
    ReplayReport { games }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for game in &self.games {
            writeln!(
                f,
                "#{} {} - {}: {} plies, {} ({})",
                game.index,
                game.white.as_deref().unwrap_or("?"),
                game.black.as_deref().unwrap_or("?"),
                game.plies,
                game.declared,
                game.status
            )?;
            if !game.skipped.is_empty() {
                writeln!(f, "  skipped: {}", game.skipped.join(" "))?;
            }
            if !game.result_matches {
                writeln!(f, "  declared result contradicts the final position")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct PositionReport {
    pub fen: String,
    pub side_to_move: Color,
    pub in_check: bool,
    pub status: GameStatus,
    pub legal_moves: Vec<String>,
}

/// Status and legal moves (in SAN) of a single position.
pub fn inspect(fen: &str) -> ChessResult<PositionReport> {
    let board = BoardState::from_fen(fen)?;
    let game = Game::from_board(board.clone());
    let mut moves: Vec<String> = legal_moves(&board)
        .into_iter()
        .map(|mv| move_to_san(&board, mv))
        .collect();
    moves.sort();
    Ok(PositionReport {
        fen: board.to_fen(),
        side_to_move: board.side_to_move,
        in_check: board.in_check(board.side_to_move),
        status: game.status(),
        legal_moves: moves,
    })
}

impl fmt::Display for PositionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.fen)?;
        writeln!(f, "to move: {}, status: {}", self.side_to_move, self.status)?;
        writeln!(f, "{} legal moves: {}", self.legal_moves.len(), self.legal_moves.join(" "))
    }
}

#[derive(Debug, Serialize)]
pub struct PlayoutReport {
    pub seed: u64,
    pub games: Vec<PlayoutGame>,
}

#[derive(Debug, Serialize)]
pub struct PlayoutGame {
    pub plies: usize,
    pub status: GameStatus,
    pub pgn: String,
}

/// Play `games` random legal games from the start position, stopping each
/// at a terminal status or after `max_plies`.
pub fn playout(games: usize, seed: u64, max_plies: usize) -> PlayoutReport {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut played = Vec::with_capacity(games);
    for round in 1..=games {
        let mut game = Game::new();
        while game.moves().len() < max_plies && !game.status().is_terminal() {
            let moves = game.legal_moves();
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            // Drawn from the legal list, so it always plays.
            if game.play(mv).is_err() {
                break;
            }
        }
        let status = game.status();
        debug!(round, plies = game.moves().len(), %status, "playout finished");

        let headers = vec![
            ("Event".to_string(), "Random playout".to_string()),
            ("Round".to_string(), round.to_string()),
        ];
        played.push(PlayoutGame {
            plies: game.moves().len(),
            status,
            pgn: game.to_pgn(&headers),
        });
    }
    info!(games, seed, "playouts complete");
    PlayoutReport {
        seed,
        games: played,
    }
}

impl fmt::Display for PlayoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for game in &self.games {
            writeln!(f, "{}", game.pgn)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct PerftReport {
    pub fen: String,
    pub depth: u8,
    pub nodes: u64,
    pub divide: Vec<(String, u64)>,
}

pub fn perft(fen: Option<&str>, depth: u8) -> ChessResult<PerftReport> {
    let board = BoardState::from_fen(fen.unwrap_or(START_FEN))?;
    let mut divide: Vec<(String, u64)> = perft_divide(&board, depth)
        .into_iter()
        .map(|(mv, nodes)| (mv.to_string(), nodes))
        .collect();
    divide.sort();
    let nodes = if depth == 0 {
        1
    } else {
        divide.iter().map(|(_, n)| n).sum()
    };
    Ok(PerftReport {
        fen: board.to_fen(),
        depth,
        nodes,
        divide,
    })
}

impl fmt::Display for PerftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (mv, nodes) in &self.divide {
            writeln!(f, "{mv}: {nodes}")?;
        }
        writeln!(f)?;
        writeln!(f, "Nodes searched: {}", self.nodes)
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
