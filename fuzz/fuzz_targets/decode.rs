#![no_main]
use gambit::chess::codec;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok((side_to_move, board)) = codec::decode(input) {
        let encoded = codec::encode(side_to_move, &board);
        assert_eq!(codec::decode(&encoded), Ok((side_to_move, board)));
    }
});
