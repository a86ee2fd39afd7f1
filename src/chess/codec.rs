//! Compact digit encoding of a game for saving and restoring it.
//!
//! The format is a single line of decimal digits:
//!
//! - One digit for the side to move: `0` for White, `1` for Black.
//! - Then, for every piece on the board, a run of four digits: piece color
//!   (`0`/`1`), piece kind (see [`PieceKind`] discriminants), rank (`1`-`8`)
//!   and file (`1`-`8`).
//!
//! There are no delimiters, header or version field. The encoder writes pieces
//! in square order (a1, b1, ..., h8) and terminates the line with a newline.
//! The decoder accepts runs in any order and ignores everything after the
//! first newline.

use std::fmt::Write;

use thiserror::Error;

use crate::chess::board::Board;
use crate::chess::core::{File, Piece, PieceKind, Player, Rank, Square};

const RUN_LENGTH: usize = 4;

/// Reasons a saved game can not be restored. Offsets are zero-based character
/// indices in the input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[allow(missing_docs)]
    #[error("saved game is empty")]
    Empty,
    #[allow(missing_docs)]
    #[error("side to move should be '0' or '1', got '{0}'")]
    InvalidSideToMove(char),
    #[allow(missing_docs)]
    #[error("saved game should have 1 + 4k digits, got {0}")]
    InvalidLength(usize),
    #[allow(missing_docs)]
    #[error("expected a digit at offset {offset}, got '{found}'")]
    NotADigit { offset: usize, found: char },
    #[allow(missing_docs)]
    #[error("piece color should be 0 or 1, got {digit} at offset {offset}")]
    InvalidPieceColor { offset: usize, digit: u8 },
    #[allow(missing_docs)]
    #[error("piece kind should be within 0..=5, got {digit} at offset {offset}")]
    InvalidPieceKind { offset: usize, digit: u8 },
    #[allow(missing_docs)]
    #[error("rank should be within 1..=8, got {digit} at offset {offset}")]
    InvalidRank { offset: usize, digit: u8 },
    #[allow(missing_docs)]
    #[error("file should be within 1..=8, got {digit} at offset {offset}")]
    InvalidFile { offset: usize, digit: u8 },
    #[allow(missing_docs)]
    #[error("square {0} is occupied by more than one piece")]
    DuplicateSquare(Square),
}

/// Serializes the position.
///
/// ```
/// use gambit::chess::board::Board;
/// use gambit::chess::codec::encode;
/// use gambit::chess::core::{Piece, PieceKind, Player, Square};
///
/// let mut board = Board::empty();
/// let _ = board.place(Square::E1, Piece::new(Player::White, PieceKind::King));
/// let _ = board.place(Square::C7, Piece::new(Player::Black, PieceKind::Rook));
/// assert_eq!(encode(Player::Black, &board), "105151173\n");
/// ```
#[must_use]
pub fn encode(side_to_move: Player, board: &Board) -> String {
    let mut result = String::with_capacity(1 + board.len() * RUN_LENGTH + 1);
    result.push(player_digit(side_to_move));
    for (square, piece) in board.iter() {
        // Writing into a String never fails.
        let _ = write!(
            result,
            "{}{}{}{}",
            player_digit(piece.owner),
            piece.kind as u8,
            square.rank() as u8 + 1,
            square.file() as u8 + 1,
        );
    }
    result.push('\n');
    result
}

/// Restores the side to move and the board from the encoded line.
///
/// # Errors
///
/// Returns [`DecodeError`] describing the first problem found in the input.
/// Non-digit characters are reported first, then the length of the line, then
/// the contents of the runs from left to right.
pub fn decode(input: &str) -> Result<(Player, Board), DecodeError> {
    let line = input.split('\n').next().unwrap_or_default();
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut chars = line.chars();
    let side_to_move = match chars.next() {
        None => return Err(DecodeError::Empty),
        Some('0') => Player::White,
        Some('1') => Player::Black,
        Some(found) => return Err(DecodeError::InvalidSideToMove(found)),
    };

    let mut digits = Vec::with_capacity(line.len());
    for (index, found) in chars.enumerate() {
        match found.to_digit(10) {
            Some(digit) => digits.push(digit as u8),
            None => {
                return Err(DecodeError::NotADigit {
                    offset: index + 1,
                    found,
                })
            },
        }
    }
    if digits.len() % RUN_LENGTH != 0 {
        return Err(DecodeError::InvalidLength(digits.len() + 1));
    }

    let mut board = Board::empty();
    for (run_index, run) in digits.chunks_exact(RUN_LENGTH).enumerate() {
        let offset = 1 + run_index * RUN_LENGTH;
        let (square, piece) = decode_run(run, offset)?;
        if board.place(square, piece).is_some() {
            return Err(DecodeError::DuplicateSquare(square));
        }
    }
    Ok((side_to_move, board))
}

fn decode_run(run: &[u8], offset: usize) -> Result<(Square, Piece), DecodeError> {
    let owner = match run[0] {
        0 => Player::White,
        1 => Player::Black,
        digit => return Err(DecodeError::InvalidPieceColor { offset, digit }),
    };
    let kind = PieceKind::from_repr(run[1]).ok_or(DecodeError::InvalidPieceKind {
        offset: offset + 1,
        digit: run[1],
    })?;
    let rank = run[2]
        .checked_sub(1)
        .and_then(Rank::from_repr)
        .ok_or(DecodeError::InvalidRank {
            offset: offset + 2,
            digit: run[2],
        })?;
    let file = run[3]
        .checked_sub(1)
        .and_then(File::from_repr)
        .ok_or(DecodeError::InvalidFile {
            offset: offset + 3,
            digit: run[3],
        })?;
    Ok((Square::new(file, rank), Piece::new(owner, kind)))
}

const fn player_digit(player: Player) -> char {
    match player {
        Player::White => '0',
        Player::Black => '1',
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Initial position saved by an earlier version of the program. Runs are
    /// not in square order.
    const SAVED_STARTING_POSITION: &str = "004140515002811811077002214840111002111880212107100261585031310740118002400251383031602171076107800230027128213861075128710721073";

    #[test]
    fn starting_position() {
        let encoded = encode(Player::White, &Board::starting());
        assert_eq!(encoded.len(), 1 + 32 * 4 + 1);
        assert!(encoded.starts_with("0011102120313"));
        assert!(encoded.ends_with("1188\n"));
        assert_eq!(decode(&encoded), Ok((Player::White, Board::starting())));
    }

    #[test]
    fn saved_fixture() {
        assert_eq!(
            decode(SAVED_STARTING_POSITION),
            Ok((Player::White, Board::starting()))
        );
        assert_eq!(
            decode(&format!("{SAVED_STARTING_POSITION}\n")),
            Ok((Player::White, Board::starting()))
        );
    }

    #[test]
    fn empty_board() {
        assert_eq!(encode(Player::Black, &Board::empty()), "1\n");
        assert_eq!(decode("1\n"), Ok((Player::Black, Board::empty())));
        assert_eq!(decode("0"), Ok((Player::White, Board::empty())));
    }

    #[test]
    fn stops_at_newline() {
        assert_eq!(
            decode("10511\r\ngarbage"),
            Ok((
                Player::Black,
                Board::try_from("8/8/8/8/8/8/8/K7").unwrap()
            ))
        );
        assert_eq!(decode("\n0051"), Err(DecodeError::Empty));
    }

    #[test]
    fn errors() {
        assert_eq!(decode(""), Err(DecodeError::Empty));
        assert_eq!(decode("2"), Err(DecodeError::InvalidSideToMove('2')));
        assert_eq!(decode("w0051"), Err(DecodeError::InvalidSideToMove('w')));
        assert_eq!(decode("0005"), Err(DecodeError::InvalidLength(4)));
        assert_eq!(
            decode("000x1"),
            Err(DecodeError::NotADigit {
                offset: 3,
                found: 'x'
            })
        );
        assert_eq!(
            decode("00051 0051"),
            Err(DecodeError::NotADigit {
                offset: 5,
                found: ' '
            })
        );
        assert_eq!(
            decode("02511"),
            Err(DecodeError::InvalidPieceColor {
                offset: 1,
                digit: 2
            })
        );
        assert_eq!(
            decode("000510611"),
            Err(DecodeError::InvalidPieceKind {
                offset: 6,
                digit: 6
            })
        );
        assert_eq!(
            decode("00501"),
            Err(DecodeError::InvalidRank {
                offset: 3,
                digit: 0
            })
        );
        assert_eq!(
            decode("00591"),
            Err(DecodeError::InvalidRank {
                offset: 3,
                digit: 9
            })
        );
        assert_eq!(
            decode("00519"),
            Err(DecodeError::InvalidFile {
                offset: 4,
                digit: 9
            })
        );
        assert_eq!(
            decode("005110511"),
            Err(DecodeError::DuplicateSquare(Square::A1))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            DecodeError::InvalidLength(4).to_string(),
            "saved game should have 1 + 4k digits, got 4"
        );
        assert_eq!(
            DecodeError::DuplicateSquare(Square::E4).to_string(),
            "square e4 is occupied by more than one piece"
        );
    }

    #[test]
    fn arbitrary_position() {
        let board =
            Board::try_from("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR").unwrap();
        for player in [Player::White, Player::Black] {
            let encoded = encode(player, &board);
            assert_eq!(decode(&encoded), Ok((player, board)));
        }
    }
}
