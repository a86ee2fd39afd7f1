#![no_main]
use gambit::chess::board::Board;
use gambit::chess::movegen::destinations_from;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(board) = Board::try_from(input) else {
        return;
    };
    for (from, piece) in board.iter() {
        let destinations = destinations_from(&board, from);
        assert!(!destinations.contains(from));
        for to in destinations {
            assert_ne!(board.at(to).map(|target| target.owner), Some(piece.owner));
        }
    }
});
