use gambit::chess::attacks::is_in_check;
use gambit::chess::board::Board;
use gambit::chess::core::{PieceKind, Player};
use gambit::chess::movegen::destinations_from;
use itertools::Itertools;
use pretty_assertions::assert_eq;
use shakmaty::{CastlingMode, Chess, Position as ShakmatyPosition};

/// Positions where every non-king piece of the side to move can move freely:
/// the king is not attacked, nothing is pinned and en passant is not
/// available. Pseudo-legal destinations match the legal ones there.
const QUIET_POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2",
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    "r2qkb1r/1pp1pp1p/p1np1np1/1B6/3PP1b1/2N1BN2/PPP2PPP/R2QK2R w KQkq - 0 7",
    "2r3r1/p3k3/1p3pp1/1B5p/5P2/2P1p1P1/PP4KP/3R4 w - - 0 34",
    "r3k3/5p2/2p5/p7/P3r3/2N2n2/1PP2P2/2K2B2 w q - 0 24",
    "r3k3/5p2/2p5/p7/P3r3/2N2n2/1PP2P2/2K2B2 b q - 0 24",
];

fn setup(input: &str) -> (Player, Board) {
    let mut fields = input.split_whitespace();
    let board = Board::try_from(fields.next().expect("placement should be present"))
        .unwrap_or_else(|e| panic!("parsing legal position {input}: {e}"));
    let player = Player::try_from(fields.next().expect("side to move should be present"))
        .unwrap_or_else(|e| panic!("parsing legal position {input}: {e}"));
    (player, board)
}

fn reference(input: &str) -> Chess {
    let fen: shakmaty::fen::Fen = input.parse().expect("shakmaty should accept the FEN");
    fen.into_position(CastlingMode::Standard)
        .expect("shakmaty should accept the position")
}

/// Destinations of every non-king piece of the side to move as "from-to"
/// strings.
fn get_destinations(input: &str) -> Vec<String> {
    let (player, board) = setup(input);
    board
        .iter()
        .filter(|(_, piece)| piece.owner == player && piece.kind != PieceKind::King)
        .flat_map(|(from, _)| {
            destinations_from(&board, from)
                .iter()
                .map(move |to| format!("{from}{to}"))
        })
        .sorted()
        .collect()
}

/// The same set computed by shakmaty. Promotions to different pieces collapse
/// into one destination.
fn get_reference_destinations(input: &str) -> Vec<String> {
    reference(input)
        .legal_moves()
        .iter()
        .filter(|m| m.role() != shakmaty::Role::King)
        .filter_map(|m| m.from().map(|from| format!("{from}{}", m.to())))
        .sorted()
        .dedup()
        .collect()
}

#[test]
fn starting_destinations() {
    assert_eq!(
        get_destinations(QUIET_POSITIONS[0]),
        vec![
            "a2a3", "a2a4", "b1a3", "b1c3", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4", "e2e3",
            "e2e4", "f2f3", "f2f4", "g1f3", "g1h3", "g2g3", "g2g4", "h2h3", "h2h4"
        ]
    );
}

#[test]
fn matches_reference_in_quiet_positions() {
    for position in QUIET_POSITIONS {
        assert_eq!(
            get_destinations(position),
            get_reference_destinations(position),
            "{position}"
        );
    }
}

#[test]
fn promotion_square_is_a_destination() {
    let input = "2n4k/1P6/8/8/8/8/8/K7 w - - 0 1";
    assert_eq!(get_destinations(input), vec!["b7b8", "b7c8"]);
    assert_eq!(get_destinations(input), get_reference_destinations(input));
}

#[test]
fn pseudo_legal_moves_ignore_pins() {
    // The knight on e2 is pinned by the rook on e8: legally it can not move at
    // all, but the generator still reports its jumps.
    let input = "4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1";
    assert_eq!(
        get_destinations(input),
        vec!["e2c1", "e2c3", "e2d4", "e2f4", "e2g1", "e2g3"]
    );
    assert!(get_reference_destinations(input).is_empty());
}

#[test]
fn check_detection_matches_reference() {
    for input in QUIET_POSITIONS.iter().chain(&[
        "3kn3/R2p4/8/6B1/8/6K1/3R4/8 b - - 0 1",
        "3kn3/R2p1N2/8/8/7B/6K1/3R4/8 b - - 0 1",
        "8/5Nk1/7p/4Bp2/3q4/8/8/5KR1 b - - 0 1",
        "2R5/8/6k1/8/8/8/PPn5/KR6 w - - 0 1",
        "rnb1kbnr/pppp1ppp/8/4p3/5PPq/8/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    ]) {
        let (player, board) = setup(input);
        assert_eq!(
            is_in_check(&board, player),
            Ok(reference(input).is_check()),
            "{input}"
        );
        assert_eq!(is_in_check(&board, player.opponent()), Ok(false), "{input}");
    }
}
