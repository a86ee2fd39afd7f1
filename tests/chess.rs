use gambit::chess::attacks::{check_info, CheckStatus, KingError};
use gambit::chess::board::Board;
use gambit::chess::codec::{self, DecodeError};
use gambit::chess::core::{Piece, PieceKind, Player, Square};
use gambit::chess::game::{Game, Phase};
use gambit::chess::history::MoveFlags;
use pretty_assertions::assert_eq;

fn play_all(game: &mut Game, moves: &[&str]) {
    for uci in moves {
        let from = Square::try_from(&uci[..2]).expect("valid square");
        let to = Square::try_from(&uci[2..]).expect("valid square");
        assert!(game.play(from, to).is_some(), "{uci} should be accepted");
    }
}

#[test]
fn scripted_game() {
    let mut game = Game::new();
    play_all(
        &mut game,
        &[
            "e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6", "b1c3", "a7a6",
        ],
    );
    assert_eq!(
        game.history().to_notation(),
        "1. e4 c5 2. Nf3 d6 3. d4 d4 4. Nd4 Nf6 5. Nc3 a6"
    );
    assert_eq!(
        game.board().to_string(),
        "rnbqkb1r/1p2pppp/p2p1n2/8/3NP3/2N5/PPP2PPP/R1BQKB1R"
    );
    let captures: Vec<_> = game
        .history()
        .iter()
        .filter_map(|entry| entry.captured)
        .collect();
    assert_eq!(captures, vec![PieceKind::Pawn, PieceKind::Pawn]);
    assert_eq!(game.side_to_move(), Player::White);
    assert_eq!(CheckStatus::of(game.board()), Ok(CheckStatus::Neither));
}

#[test]
fn check_is_recorded() {
    let mut game = Game::new();
    play_all(&mut game, &["e2e4", "d7d5", "f1b5"]);
    let last = game.history().last().expect("three moves were played");
    assert_eq!(last.flags, MoveFlags::CHECK);
    assert_eq!(game.history().to_notation(), "1. e4 d5 2. Bb5+");

    let info = check_info(game.board(), Player::Black).expect("both kings are present");
    assert_eq!(info.king, Square::E8);
    assert_eq!(info.checkers.len(), 1);
    assert_eq!(info.checkers[0].square, Square::B5);
    assert_eq!(CheckStatus::of(game.board()), Ok(CheckStatus::Black));
}

#[test]
fn moving_into_check_is_not_prevented() {
    let mut game = Game::new();
    play_all(&mut game, &["e2e4", "d7d5", "f1b5"]);
    // Black ignores the check.
    play_all(&mut game, &["a7a6"]);
    // And the bishop takes the king.
    let ply = game
        .play(Square::B5, Square::E8)
        .expect("capturing the king is a valid destination");
    assert_eq!(
        ply.captured,
        Some(Piece::new(Player::Black, PieceKind::King))
    );
    assert_eq!(
        CheckStatus::of(game.board()),
        Err(KingError::Missing(Player::Black))
    );
}

#[test]
fn interaction_flow() {
    let mut game = Game::new();
    assert!(!game.select(Square::D7));
    assert!(game.select(Square::B1));
    assert!(matches!(
        game.phase(),
        Phase::AwaitingDestination {
            from: Square::B1,
            ..
        }
    ));
    // Own piece is not a valid destination.
    assert_eq!(game.choose_destination(Square::D2), None);
    assert_eq!(game.phase(), Phase::AwaitingPiece);
    assert!(game.select(Square::B1));
    let ply = game.choose_destination(Square::C3).expect("c3 is a knight jump");
    assert_eq!(ply.entry.kind, PieceKind::Knight);
    assert_eq!(game.side_to_move(), Player::Black);
}

#[test]
fn save_and_restore() {
    let mut game = Game::new();
    play_all(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6"]);
    let encoded = game.encode();
    assert!(encoded.ends_with('\n'));
    let (side_to_move, board) = codec::decode(&encoded).expect("encoded game is valid");
    assert_eq!(side_to_move, Player::White);
    assert_eq!(&board, game.board());

    let mut resumed = Game::from_position(side_to_move, board);
    play_all(&mut resumed, &["f1c4"]);
    assert_eq!(resumed.history().to_notation(), "1. Bc4");
}

#[test]
fn corrupted_saves() {
    let encoded = Game::new().encode();
    assert_eq!(
        codec::decode(&encoded[..encoded.len() - 2]),
        Err(DecodeError::InvalidLength(128))
    );
    assert_eq!(
        codec::decode(&encoded.replace('5', "7")),
        Err(DecodeError::InvalidPieceKind {
            offset: 18,
            digit: 7
        })
    );
    assert!(matches!(
        codec::decode("1garbage"),
        Err(DecodeError::NotADigit { offset: 1, .. })
    ));
}

#[test]
fn custom_board() {
    let mut board = Board::empty();
    let _ = board.place(Square::E1, Piece::new(Player::White, PieceKind::King));
    let _ = board.place(Square::E8, Piece::new(Player::Black, PieceKind::King));
    let _ = board.place(Square::A7, Piece::new(Player::White, PieceKind::Pawn));
    let mut game = Game::from_position(Player::White, board);
    // Promotion is not performed: the pawn stays a pawn on the last rank.
    play_all(&mut game, &["a7a8"]);
    assert_eq!(
        game.board().at(Square::A8),
        Some(Piece::new(Player::White, PieceKind::Pawn))
    );
    assert!(!game.select(Square::A8));
    assert_eq!(game.history().to_notation(), "1. a8");
}
