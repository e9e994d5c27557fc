use super::*;

const OPERA_GAME: &str = r#"[Event "Paris"]
[Site "Paris FRA"]
[Date "1858.??.??"]
[Round "?"]
[White "Paul Morphy"]
[Black "Duke Karl / Count Isouard"]
[Result "1-0"]

1. e4 e5 2. Nf3 d6 3. d4 Bg4 {This is a weak move already.} 4. dxe5 Bxf3 5. Qxf3
dxe5 6. Bc4 Nf6 7. Qb3 Qe7 8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5 11. Bxb5+ Nbd7 12.
O-O-O Rd8 13. Rxd7 Rxd7 14. Rd1 Qe6 15. Bxd7+ Nxd7 16. Qb8+ Nxb8 17. Rd8# 1-0
"#;

#[test]
fn test_strip_movetext() {
    let text = "1. e4 {best by test} e5 (1... c5 2. Nf3 (2. c3)) 2. Nf3 $1 ; a comment\nNc6";
    let tokens: Vec<String> = strip_movetext(text)
        .split_whitespace()
        .map(str::to_string)
        .collect();
    assert_eq!(tokens, ["1.", "e4", "e5", "2.", "Nf3", "Nc6"]);
}

#[test]
fn test_movetext_tokens() {
    let tokens = movetext_tokens("1.e4 e5 2. Nf3 2... Nc6 3.Bb5 a6 1/2-1/2");
    assert_eq!(tokens, ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "1/2-1/2"]);
}

#[test]
fn test_parse_opera_game() {
    let game = parse_single_pgn(OPERA_GAME).unwrap();
    assert_eq!(game.header("White"), Some("Paul Morphy"));
    assert_eq!(game.header("Black"), Some("Duke Karl / Count Isouard"));
    assert_eq!(game.result, PgnResult::WhiteWins);
    assert!(game.skipped.is_empty());
    assert_eq!(game.game.moves().len(), 33);
    assert_eq!(game.game.status(), GameStatus::WhiteWins);
    assert_eq!(game.game.moves()[22].san, "O-O-O");
}

#[test]
fn test_unplayable_tokens_are_skipped() {
    let game = parse_pgn_game("1. e4 e5 2. Qxf7 Nc6 *").unwrap();
    assert_eq!(game.skipped, ["Qxf7", "Nc6"]);
    assert_eq!(game.game.moves().len(), 2);
    assert_eq!(game.result, PgnResult::Unknown);
}

#[test]
fn test_result_falls_back_to_header() {
    let game = parse_pgn_game("[Result \"0-1\"]\n\n1. f3 e5 2. g4 Qh4#").unwrap();
    assert_eq!(game.result, PgnResult::BlackWins);
    assert_eq!(game.game.status(), GameStatus::BlackWins);
}

#[test]
fn test_fen_header_sets_start() {
    let text = "[SetUp \"1\"]\n[FEN \"4k3/8/8/8/8/8/4P3/4K3 b - - 0 1\"]\n\n1... Kd7 2. e4 *";
    let game = parse_pgn_game(text).unwrap();
    assert!(game.skipped.is_empty());
    assert_eq!(game.game.board().to_fen(), "8/3k4/8/8/4P3/8/8/4K3 b - e3 0 2");
}

#[test]
fn test_header_escapes() {
    let game = parse_pgn_game("[Event \"The \\\"Immortal\\\" \\\\ Game\"]\n\n*").unwrap();
    assert_eq!(game.header("Event"), Some("The \"Immortal\" \\ Game"));
}

#[test]
fn test_split_collection() {
    let text = format!(
        "{OPERA_GAME}\n[Event \"Second\"]\n\n1. d4 d5 *\n\n1. c4 e5 0-1\n\n1. Nf3 1/2-1/2\n"
    );
    let chunks = split_games(&text);
    assert_eq!(chunks.len(), 4);

    let games = parse_pgn(&text);
    assert_eq!(games.len(), 4);
    assert_eq!(games[1].header("Event"), Some("Second"));
    assert_eq!(games[2].result, PgnResult::BlackWins);
    assert_eq!(games[3].game.moves().len(), 1);
}

#[test]
fn test_blank_line_ends_headerless_game() {
    let games = parse_pgn("1. e4 e5\n\n1. d4 d5\n");
    assert_eq!(games.len(), 2);
    for game in &games {
        assert_eq!(game.game.moves().len(), 2);
        assert!(game.skipped.is_empty());
        assert_eq!(game.result, PgnResult::Unknown);
    }
    assert_eq!(games[1].game.moves()[0].san, "d4");

    // Several blank lines count as one separator
    assert_eq!(split_games("1. e4 *\n\n\n\n1. d4 *\n").len(), 2);
}

#[test]
fn test_bad_start_position_drops_game() {
    let text = "[FEN \"not a fen\"]\n\n1. e4 *\n\n[Event \"ok\"]\n\n1. e4 *\n";
    let games = parse_pgn(text);
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].header("Event"), Some("ok"));
    assert!(parse_single_pgn("").is_err());
}

#[test]
fn test_write_fools_mate() {
    let mut game = Game::new();
    for san in ["f3", "e5", "g4", "Qh4"] {
        game.play_san(san).unwrap();
    }
    let headers = vec![
        ("White".to_string(), "Fool".to_string()),
        ("Annotator".to_string(), "nobody".to_string()),
    ];
    let text = write_pgn(&game, &headers);

    assert!(text.starts_with("[Event \"?\"]\n[Site \"?\"]\n[Date \"????.??.??\"]\n"));
    assert!(text.contains("[White \"Fool\"]\n[Black \"?\"]\n[Result \"0-1\"]\n[Annotator \"nobody\"]\n"));
    assert!(!text.contains("[FEN"));
    assert!(text.ends_with("\n1. f3 e5 2. g4 Qh4# 0-1\n"));
}

#[test]
fn test_write_from_setup_position() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 1").unwrap();
    game.play_san("Kd7").unwrap();
    game.play_san("e4").unwrap();
    let text = write_pgn(&game, &[]);
    assert!(text.contains("[SetUp \"1\"]\n[FEN \"4k3/8/8/8/8/8/4P3/4K3 b - - 0 1\"]\n"));
    assert!(text.contains("1... Kd7 2. e4 *"));
}

#[test]
fn test_write_then_read_back() {
    let original = parse_single_pgn(OPERA_GAME).unwrap();
    let text = write_pgn(&original.game, &original.headers);
    assert!(text.lines().all(|line| line.len() <= LINE_WIDTH));

    let reread = parse_single_pgn(&text).unwrap();
    assert_eq!(reread.game.moves(), original.game.moves());
    assert_eq!(reread.header("Black"), original.header("Black"));
    assert_eq!(reread.result, PgnResult::WhiteWins);
}
