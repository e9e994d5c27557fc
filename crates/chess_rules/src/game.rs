//! A game in progress: the current board plus everything needed to judge
//! repetitions and write the game out again.

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::error::{ChessError, ChessResult};
use crate::legal::{check_legal, legal_moves};
use crate::pgn::write_pgn;
use crate::san::{move_to_san, parse_san};
use crate::status::{GameStatus, game_status};
use crate::types::Move;
use crate::uci::parse_uci_move;

/// A move as it was played, with its SAN computed on the board before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub san: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameRecord")]
pub struct Game {
    board: BoardState,
    /// FEN after every ply, starting with the initial position.
    history: Vec<String>,
    moves: Vec<MoveRecord>,
}

/// Serialized form of [`Game`], checked before it becomes one.
#[derive(Deserialize)]
struct GameRecord {
    board: BoardState,
    history: Vec<String>,
    moves: Vec<MoveRecord>,
}

impl TryFrom<GameRecord> for Game {
    type Error = ChessError;

    fn try_from(record: GameRecord) -> ChessResult<Self> {
        let bad = |reason: &str| ChessError::malformed("game record", "", reason);
        let Some(current) = record.history.last() else {
            return Err(bad("history has no initial position"));
        };
        if record.history.len() != record.moves.len() + 1 {
            return Err(bad("history and move list lengths disagree"));
        }
        if *current != record.board.to_fen() {
            return Err(bad("board does not match the last history entry"));
        }
        BoardState::from_fen(&record.history[0])?;
        Ok(Game {
            board: record.board,
            history: record.history,
            moves: record.moves,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(BoardState::startpos())
    }

    pub fn from_board(board: BoardState) -> Self {
        let history = vec![board.to_fen()];
        Self {
            board,
            history,
            moves: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Ok(Self::from_board(BoardState::from_fen(fen)?))
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// FEN of the position the game started from.
    pub fn initial_fen(&self) -> &str {
        &self.history[0]
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.board)
    }

    pub fn status(&self) -> GameStatus {
        game_status(&self.board, &self.history)
    }

    /// Play a legal move, recording its SAN and the resulting FEN.
    pub fn play(&mut self, mv: Move) -> ChessResult<()> {
        check_legal(&self.board, mv)?;
        let san = move_to_san(&self.board, mv);
        self.board.apply_move(mv)?;
        self.history.push(self.board.to_fen());
        self.moves.push(MoveRecord { mv, san });
        Ok(())
    }

    pub fn play_san(&mut self, token: &str) -> ChessResult<Move> {
        let mv = parse_san(&self.board, token)?;
        self.play(mv)?;
        Ok(mv)
    }

    pub fn play_uci(&mut self, txt: &str) -> ChessResult<Move> {
        let mv = parse_uci_move(&self.board, txt)?;
        self.play(mv)?;
        Ok(mv)
    }

    /// The game as PGN text. See [`write_pgn`] for how `headers` are used.
    pub fn to_pgn(&self, headers: &[(String, String)]) -> String {
        write_pgn(self, headers)
    }

    /// Take back the last move, restoring the previous snapshot.
    pub fn undo(&mut self) -> Option<Move> {
        let record = self.moves.pop()?;
        self.history.pop();
        let fen = self.history.last()?;
        // Every snapshot was produced by `to_fen`, so it parses back.
        if let Ok(board) = BoardState::from_fen(fen) {
            self.board = board;
        }
        Some(record.mv)
    }

    /// Start over from this game's initial position.
    pub fn reset(&mut self) {
        self.history.truncate(1);
        self.moves.clear();
        if let Ok(board) = BoardState::from_fen(&self.history[0]) {
            self.board = board;
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
