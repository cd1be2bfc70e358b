//! End-to-end rule scenarios played through the public `Board` API.

use chess_rules::{
    Board, BoardFactory, CastlingType, MoveError, Piece, PieceKind, Position, ResolveError, Side,
    State, ValidationError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

fn pos(s: &str) -> Position {
    Position::from_algebraic(s).unwrap()
}

fn board(turn: Side, pieces: &[(&str, PieceKind, Side)]) -> Board {
    BoardFactory::standard()
        .create(
            turn,
            pieces
                .iter()
                .map(|(s, kind, side)| (pos(s), Piece::new(*kind, *side))),
        )
        .unwrap()
}

fn kind_at(board: &Board, s: &str) -> Option<(PieceKind, Side)> {
    board.squares().get(pos(s)).map(|p| (p.kind(), p.side()))
}

#[test]
fn short_castling() {
    init_tracing();
    let mut board = board(
        Side::White,
        &[
            ("e1", PieceKind::King, Side::White),
            ("h1", PieceKind::Rook, Side::White),
            ("e8", PieceKind::King, Side::Black),
        ],
    );

    let result = board.make_move("O-O").unwrap().unwrap();
    assert_eq!(result.to_string(), "O-O");
    let king = board.squares().get(pos("g1")).copied().unwrap();
    let rook = board.squares().get(pos("f1")).copied().unwrap();
    assert_eq!(king.kind(), PieceKind::King);
    assert_eq!(rook.kind(), PieceKind::Rook);
    assert!(king.is_moved());
    assert!(rook.is_moved());
    assert_eq!(board.turn(), Side::Black);
}

#[test]
fn blocked_castling() {
    init_tracing();
    let mut board = board(
        Side::White,
        &[
            ("e1", PieceKind::King, Side::White),
            ("h1", PieceKind::Rook, Side::White),
            ("f1", PieceKind::Knight, Side::White),
            ("e8", PieceKind::King, Side::Black),
        ],
    );
    let before = board.squares().clone();

    assert_eq!(
        board.make_move("O-O"),
        Err(MoveError::Validation(ValidationError::CastlingObstructed(
            CastlingType::Short
        )))
    );
    assert_eq!(board.squares(), &before);
    assert_eq!(board.turn(), Side::White);
}

#[test]
fn en_passant_window() {
    init_tracing();
    let setup = || {
        board(
            Side::Black,
            &[
                ("e1", PieceKind::King, Side::White),
                ("e5", PieceKind::Pawn, Side::White),
                ("d7", PieceKind::Pawn, Side::Black),
                ("h7", PieceKind::Pawn, Side::Black),
                ("e8", PieceKind::King, Side::Black),
            ],
        )
    };

    let mut board = setup();
    board.make_move("d5").unwrap();
    assert_eq!(board.en_passant_target(), Some(pos("d6")));
    let result = board.make_move("exd6").unwrap().unwrap();
    assert_eq!(result.to_string(), "exd6");
    assert_eq!(kind_at(&board, "d5"), None);
    assert_eq!(kind_at(&board, "d6"), Some((PieceKind::Pawn, Side::White)));
    assert_eq!(board.captured_pieces().len(), 1);

    board.undo_last_move().unwrap();
    assert_eq!(kind_at(&board, "d5"), Some((PieceKind::Pawn, Side::Black)));
    assert_eq!(kind_at(&board, "e5"), Some((PieceKind::Pawn, Side::White)));
    assert!(board.captured_pieces().is_empty());

    let mut board = setup();
    board.make_move("d5").unwrap();
    board.make_move("Kd2").unwrap();
    board.make_move("h6").unwrap();
    assert_eq!(board.en_passant_target(), None);
    assert!(board.make_move("exd6").is_err());
    assert_eq!(kind_at(&board, "d5"), Some((PieceKind::Pawn, Side::Black)));
}

#[test]
fn checkmate_detection() {
    init_tracing();
    let mut board = board(
        Side::White,
        &[
            ("a1", PieceKind::King, Side::White),
            ("a8", PieceKind::Rook, Side::Black),
            ("b8", PieceKind::Rook, Side::Black),
        ],
    );
    assert_eq!(board.state(), State::Checkmate);
    assert!(board.moves(Side::White).is_empty());
    let king = board.squares().get(pos("a1")).copied().unwrap();
    assert!(board.legal_moves(&king).is_empty());
    assert_eq!(board.make_move("Kb1"), Ok(None));
}

#[test]
fn stalemate_is_not_checkmate() {
    init_tracing();
    let mut board = board(
        Side::White,
        &[
            ("a8", PieceKind::King, Side::White),
            ("b6", PieceKind::King, Side::Black),
            ("c7", PieceKind::Queen, Side::Black),
        ],
    );
    assert!(!board.is_in_check(Side::White));
    assert_eq!(board.state(), State::Stalemate);
    assert!(board.state().is_terminal());
}

#[test]
fn mate_delivered_by_a_move() {
    init_tracing();
    let mut board = board(
        Side::Black,
        &[
            ("a1", PieceKind::King, Side::White),
            ("h2", PieceKind::Rook, Side::Black),
            ("g7", PieceKind::Rook, Side::Black),
            ("e8", PieceKind::King, Side::Black),
        ],
    );
    let result = board.make_move("Rg1").unwrap().unwrap();
    assert_eq!(result.state(), State::Checkmate);
    assert_eq!(result.to_string(), "Rg1#");
    assert_eq!(board.turn(), Side::White);
    assert!(board.moves(Side::White).is_empty());
}

#[test]
fn disambiguation_round_trip() {
    init_tracing();
    let mut board = board(
        Side::Black,
        &[
            ("g1", PieceKind::King, Side::White),
            ("d8", PieceKind::Rook, Side::Black),
            ("h8", PieceKind::Rook, Side::Black),
            ("a6", PieceKind::King, Side::Black),
        ],
    );
    assert!(matches!(
        board.make_move("Rf8"),
        Err(MoveError::Resolve(ResolveError::Ambiguous { .. }))
    ));
    let result = board.make_move("Rdf8").unwrap().unwrap();
    assert_eq!(result.to_string(), "Rdf8");
    assert_eq!(kind_at(&board, "f8"), Some((PieceKind::Rook, Side::Black)));
    assert_eq!(kind_at(&board, "d8"), None);
}

#[test]
fn turn_alternation() {
    init_tracing();
    let mut board = Board::standard();
    board.make_move("Nf3").unwrap();
    assert_eq!(board.turn(), Side::Black);
    assert!(board.make_move("Nf3").is_err());
    assert_eq!(board.turn(), Side::Black);
    board.undo_last_move().unwrap();
    assert_eq!(board.turn(), Side::White);
    assert_eq!(board.undo_last_move(), Ok(None));
    assert_eq!(board.turn(), Side::White);
}

#[test]
fn promotion_and_undo_in_a_game() {
    init_tracing();
    let mut board = board(
        Side::White,
        &[
            ("e1", PieceKind::King, Side::White),
            ("b7", PieceKind::Pawn, Side::White),
            ("a8", PieceKind::Rook, Side::Black),
            ("g6", PieceKind::King, Side::Black),
        ],
    );
    let before = board.squares().clone();

    let result = board.make_move("bxa8=Q").unwrap().unwrap();
    assert_eq!(result.to_string(), "bxa8=Q");
    assert_eq!(kind_at(&board, "a8"), Some((PieceKind::Queen, Side::White)));
    assert_eq!(board.captured_pieces()[0].kind(), PieceKind::Rook);

    board.undo_last_move().unwrap();
    assert_eq!(board.squares(), &before);
}

#[test]
fn scholars_mate_replay() {
    init_tracing();
    let mut board = BoardFactory::standard()
        .create_from_moves(["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"])
        .unwrap();
    assert_eq!(board.state(), State::Checkmate);
    let last = board.move_history().last().unwrap();
    assert_eq!(last.to_string(), "Qxf7#");
    assert_eq!(board.halfmove_clock(), 0);
}
