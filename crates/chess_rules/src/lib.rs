//! Chess rules core.
//!
//! Board state and FEN I/O, pseudo-legal move generation, attack and check
//! detection, legal move filtering, game status (mate, stalemate and the draw
//! rules) and the SAN, PGN and algebraic move codecs.
//!
//! Everything here is synchronous plain data. A [`BoardState`] is cloned
//! whenever a hypothetical position is needed, and game history is kept as
//! FEN strings rather than live boards.
//!
//! ```
//! use chess_rules::{BoardState, GameStatus, Game, legal_moves};
//!
//! let board = BoardState::startpos();
//! assert_eq!(legal_moves(&board).len(), 20);
//!
//! let mut game = Game::new();
//! for san in ["f3", "e5", "g4", "Qh4"] {
//!     game.play_san(san).unwrap();
//! }
//! assert_eq!(game.status(), GameStatus::BlackWins);
//! ```

pub mod attacks;
pub mod board;
pub mod error;
pub mod fen;
pub mod game;
pub mod legal;
pub mod movegen;
pub mod perft;
pub mod pgn;
pub mod san;
pub mod status;
pub mod types;
pub mod uci;

pub use board::*;
pub use error::*;
pub use fen::*;
pub use game::*;
pub use legal::*;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use pgn::*;
pub use san::*;
pub use status::*;
pub use types::*;
pub use uci::*;
