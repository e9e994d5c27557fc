use super::*;
use crate::error::ChessError;
use crate::fen::START_FEN;

#[test]
fn test_play_records_san_and_history() {
    let mut game = Game::new();
    game.play_san("e4").unwrap();
    game.play_uci("c7c5").unwrap();
    game.play_san("Nf3").unwrap();

    let sans: Vec<&str> = game.moves().iter().map(|r| r.san.as_str()).collect();
    assert_eq!(sans, ["e4", "c5", "Nf3"]);
    assert_eq!(game.history().len(), 4);
    assert_eq!(game.history()[0], START_FEN);
    assert_eq!(game.history().last().unwrap(), &game.board().to_fen());
    assert_eq!(game.initial_fen(), START_FEN);
}

#[test]
fn test_illegal_move_leaves_game_untouched() {
    let mut game = Game::new();
    game.play_san("e4").unwrap();
    let before = game.clone();

    assert!(matches!(
        game.play_uci("e4e5"),
        Err(ChessError::InvalidMove { .. })
    ));
    assert!(game.play_san("Qh5").is_err());
    assert_eq!(game, before);
}

#[test]
fn test_undo_and_reset() {
    let mut game = Game::new();
    let first = game.play_san("d4").unwrap();
    game.play_san("d5").unwrap();
    let after_first = game.history()[1].clone();

    let undone = game.undo().unwrap();
    assert_eq!(undone.to_string(), "d7d5");
    assert_eq!(game.board().to_fen(), after_first);
    assert_eq!(game.moves().len(), 1);
    assert_eq!(game.moves()[0].mv, first);

    game.reset();
    assert_eq!(game, Game::new());
    assert_eq!(game.undo(), None);
}

#[test]
fn test_threefold_by_knight_shuffle() {
    let mut game = Game::new();
    for san in ["Nf3", "Nf6", "Ng1", "Ng8"] {
        game.play_san(san).unwrap();
    }
    assert_eq!(game.status(), GameStatus::Ongoing);

    for san in ["Nf3", "Nf6", "Ng1", "Ng8"] {
        game.play_san(san).unwrap();
    }
    assert_eq!(game.status(), GameStatus::DrawRepetition);
}

#[test]
fn test_game_from_fen() {
    let game = Game::from_fen("8/8/8/8/8/7p/5k1P/7K w - - 0 1").unwrap();
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.status(), GameStatus::DrawStalemate);
    assert!(Game::from_fen("8/8 w").is_err());
}

#[test]
fn test_to_pgn() {
    let mut game = Game::new();
    for san in ["e4", "e5", "Qh5", "Nc6", "Bc4", "Nf6", "Qxf7"] {
        game.play_san(san).unwrap();
    }
    assert_eq!(game.status(), GameStatus::WhiteWins);
    let pgn = game.to_pgn(&[]);
    assert!(pgn.contains("[Result \"1-0\"]"));
    assert!(pgn.ends_with("4. Qxf7# 1-0\n"));
}

#[test]
fn test_deserialize_rejects_inconsistent_records() {
    let mut game = Game::new();
    game.play_san("e4").unwrap();
    let json = serde_json::to_value(&game).unwrap();
    let back: Game = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(back, game);

    let mut empty = json.clone();
    empty["history"] = serde_json::json!([]);
    assert!(serde_json::from_value::<Game>(empty).is_err());

    let mut short = json.clone();
    short["moves"] = serde_json::json!([]);
    assert!(serde_json::from_value::<Game>(short).is_err());

    let mut stale = json;
    stale["history"] = serde_json::json!([START_FEN, START_FEN]);
    assert!(serde_json::from_value::<Game>(stale).is_err());
}
