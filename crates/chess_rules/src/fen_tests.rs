use super::*;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn assert_malformed(fen: &str) {
    match BoardState::from_fen(fen) {
        Err(ChessError::MalformedNotation { notation, .. }) => assert_eq!(notation, "FEN"),
        other => panic!("expected a FEN error for {fen:?}, got {other:?}"),
    }
}

#[test]
fn test_startpos_fen() {
    assert_eq!(BoardState::startpos().to_fen(), START_FEN);
    assert_eq!(BoardState::from_fen(START_FEN).unwrap(), BoardState::startpos());
}

#[test]
fn test_fen_round_trip() {
    for fen in [
        KIWIPETE,
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 12 47",
        "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
    ] {
        let board = BoardState::from_fen(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
        assert_eq!(board.to_string(), fen);
    }
}

#[test]
fn test_fen_fields_are_read() {
    let board: BoardState = "r3k2r/8/8/8/8/8/8/R3K2R b Kq e3 7 31".parse().unwrap();
    assert_eq!(board.side_to_move, Color::Black);
    assert!(board.castling.wk && !board.castling.wq);
    assert!(!board.castling.bk && board.castling.bq);
    assert_eq!(board.en_passant, Some("e3".parse().unwrap()));
    assert_eq!(board.halfmove_clock, 7);
    assert_eq!(board.fullmove_number, 31);
}

#[test]
fn test_clock_fields_are_optional() {
    let err = BoardState::from_fen("4k3/8/8/8/8/8/8/4K3 w -").unwrap_err();
    assert!(matches!(err, ChessError::MalformedNotation { .. }));

    let board = BoardState::from_fen("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
    assert_eq!(board.halfmove_clock, 0);
    assert_eq!(board.fullmove_number, 1);

    let board = BoardState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 3 0").unwrap();
    assert_eq!(board.fullmove_number, 1);
}

#[test]
fn test_malformed_fens() {
    // seven ranks
    assert_malformed("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    // nine files
    assert_malformed("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert_malformed("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    // seven files
    assert_malformed("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert_malformed("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1");
    assert_malformed("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1");
    assert_malformed("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KX - 0 1");
    assert_malformed("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KK - 0 1");
    assert_malformed("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e5 0 1");
    assert_malformed("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1");
    assert_malformed("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1");
    assert_malformed("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra");
    assert_malformed("");
}

#[test]
fn test_en_passant_rank_must_match_side_to_move() {
    // White to move: the target is behind a black pawn, on rank 6
    assert_malformed("4k3/8/8/8/8/8/3PP3/4K3 w - e3 0 1");
    // Black to move: the target is behind a white pawn, on rank 3
    assert_malformed("4k3/8/8/3pp3/8/8/8/4K3 b - e6 0 1");

    let board = BoardState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").unwrap();
    assert_eq!(board.en_passant, Some("e3".parse().unwrap()));
}

#[test]
fn test_load_fen_keeps_board_on_error() {
    let mut board = BoardState::from_fen(KIWIPETE).unwrap();
    assert!(board.load_fen("not a fen").is_err());
    assert_eq!(board.to_fen(), KIWIPETE);

    board.load_fen(START_FEN).unwrap();
    assert_eq!(board, BoardState::startpos());
}

#[test]
fn test_repetition_key_ignores_clocks() {
    let a = BoardState::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let b = BoardState::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 9 14").unwrap();
    assert_eq!(a.repetition_key(), b.repetition_key());
    assert_eq!(a.repetition_key(), "4k3/8/8/8/8/8/8/4K2R w K -");
    assert_eq!(repetition_key_of("4k3/8/8/8/8/8/8/4K2R  w K -  9 14"), a.repetition_key());

    // Castling rights are part of the key
    let c = BoardState::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1").unwrap();
    assert_ne!(a.repetition_key(), c.repetition_key());
}
