//! Criterion benchmarks measure time of the clearly separated pieces of code.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gambit::chess::attacks::CheckStatus;
use gambit::chess::board::Board;
use gambit::chess::codec;
use gambit::chess::core::Player;
use gambit::chess::movegen::destinations_from;
use shakmaty::{CastlingMode, Chess, Position as ShakmatyPosition};

const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    "r2qkb1r/1pp1pp1p/p1np1np1/1B6/3PP1b1/2N1BN2/PPP2PPP/R2QK2R w KQkq - 0 7",
    "r1b1qrk1/ppp2pbp/n2p1np1/4p1B1/2PPP3/2NB1N1P/PP3PP1/R2QK2R w KQ - 0 9",
    "rnbq1rk1/pp4pp/1b1ppn2/2p2p2/2PP4/1P2PN2/PB2BPPP/RN1Q1RK1 w - - 0 9",
    "2r3r1/p3k3/1p3pp1/1B5p/5P2/2P1p1P1/PP4KP/3R4 w - - 0 34",
    "r3k3/5p2/2p5/p7/P3r3/2N2n2/1PP2P2/2K2B2 w q - 0 24",
    "8/8/8/8/2P5/3k4/8/KB6 b - - 0 1",
];

fn boards() -> Vec<(Player, Board)> {
    POSITIONS
        .iter()
        .map(|input| {
            let mut fields = input.split_whitespace();
            let board = Board::try_from(fields.next().unwrap()).unwrap();
            let player = Player::try_from(fields.next().unwrap()).unwrap();
            (player, board)
        })
        .collect()
}

fn generate_destinations(positions: &[(Player, Board)]) {
    for (player, board) in positions {
        for square in board.pieces(*player) {
            criterion::black_box(destinations_from(board, square));
        }
    }
}

fn movegen_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Move generation");
    let positions = boards();
    group.bench_with_input(
        BenchmarkId::new("gambit", format!("{} positions", positions.len())),
        &positions,
        |b, positions| {
            b.iter(|| generate_destinations(positions));
        },
    );
    // shakmaty generates fully legal moves, so it does more work. It is still a
    // useful reference point.
    let shakmaty_positions: Vec<Chess> = POSITIONS
        .iter()
        .map(|input| {
            let setup: shakmaty::fen::Fen = input.parse().unwrap();
            setup.into_position(CastlingMode::Standard).unwrap()
        })
        .collect();
    group.bench_with_input(
        BenchmarkId::new(
            "reference implementation: shakmaty",
            format!("{} positions", shakmaty_positions.len()),
        ),
        &shakmaty_positions,
        |b, positions| {
            b.iter(|| {
                for position in positions {
                    criterion::black_box(position.legal_moves());
                }
            });
        },
    );
    group.finish();
}

fn check_bench(c: &mut Criterion) {
    let positions = boards();
    c.bench_with_input(
        BenchmarkId::new("check status", format!("{} positions", positions.len())),
        &positions,
        |b, positions| {
            b.iter(|| {
                for (_, board) in positions {
                    criterion::black_box(CheckStatus::of(board).unwrap());
                }
            });
        },
    );
}

fn codec_bench(c: &mut Criterion) {
    let encoded: Vec<String> = boards()
        .iter()
        .map(|(player, board)| codec::encode(*player, board))
        .collect();
    c.bench_with_input(
        BenchmarkId::new("decode", format!("{} saved games", encoded.len())),
        &encoded,
        |b, encoded| {
            b.iter(|| {
                for input in encoded {
                    criterion::black_box(codec::decode(input).unwrap());
                }
            });
        },
    );
}

criterion_group! {
    name = movegen;
    config = Criterion::default().sample_size(100);
    targets = movegen_bench, check_bench
}

criterion_group! {
    name = persistence;
    config = Criterion::default().sample_size(10);
    targets = codec_bench
}

criterion_main!(movegen, persistence);
