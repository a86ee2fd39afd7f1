//! Destination [generation] for a single piece.
//!
//! The generator is pseudo-legal: it follows the movement and capture patterns
//! of each piece kind and the occupancy of the board, but it does not check
//! whether the move leaves the mover's own king attacked. Castling and en
//! passant are not generated.
//!
//! [generation]: https://www.chessprogramming.org/Move_Generation

use crate::chess::bitboard::Bitboard;
use crate::chess::board::Board;
use crate::chess::core::{Direction, PieceKind, Player, Rank, Square, BOARD_WIDTH};

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Computes the squares a piece of `kind` owned by `player` can move to from
/// `origin`.
///
/// The piece does not have to actually stand on `origin`: the board is only
/// consulted for the occupancy of the destination squares and the squares in
/// between.
///
/// ```
/// use gambit::chess::board::Board;
/// use gambit::chess::core::{PieceKind, Player, Square};
/// use gambit::chess::movegen::legal_destinations;
///
/// let board = Board::starting();
/// let destinations = legal_destinations(&board, Player::White, PieceKind::Knight, Square::G1);
/// assert_eq!(destinations.to_string(), "f3 h3");
/// ```
#[must_use]
pub fn legal_destinations(
    board: &Board,
    player: Player,
    kind: PieceKind,
    origin: Square,
) -> Bitboard {
    match kind {
        PieceKind::Pawn => pawn_destinations(board, player, origin),
        PieceKind::Knight => KNIGHT_JUMPS
            .iter()
            .filter_map(|&(delta_rank, delta_file)| origin.offset(delta_rank, delta_file))
            .filter(|&square| is_destination_valid(board, player, square))
            .collect(),
        PieceKind::King => Direction::ORTHOGONAL
            .iter()
            .chain(Direction::DIAGONAL.iter())
            .filter_map(|&direction| origin.shift(direction))
            .filter(|&square| is_destination_valid(board, player, square))
            .collect(),
        PieceKind::Rook => slide(board, player, origin, Direction::ORTHOGONAL),
        PieceKind::Bishop => slide(board, player, origin, Direction::DIAGONAL),
        PieceKind::Queen => {
            slide(board, player, origin, Direction::ORTHOGONAL)
                | slide(board, player, origin, Direction::DIAGONAL)
        },
    }
}

/// Destinations of whatever piece stands on `origin`. Empty set if the square
/// is empty.
#[must_use]
pub fn destinations_from(board: &Board, origin: Square) -> Bitboard {
    match board.at(origin) {
        Some(piece) => legal_destinations(board, piece.owner, piece.kind, origin),
        None => Bitboard::empty(),
    }
}

/// A square can be moved onto if it is empty or holds an opponent's piece.
fn is_destination_valid(board: &Board, player: Player, square: Square) -> bool {
    board.occupant(square) != Some(player)
}

fn pawn_destinations(board: &Board, player: Player, origin: Square) -> Bitboard {
    let mut destinations = Bitboard::empty();
    let push = player.push_direction();
    if let Some(single) = origin.shift(push) {
        if !board.is_occupied(single) {
            destinations.insert(single);
            if origin.rank() == Rank::pawns_starting(player) {
                if let Some(double) = single.shift(push) {
                    if !board.is_occupied(double) {
                        destinations.insert(double);
                    }
                }
            }
        }
    }
    let (delta_rank, _) = push.delta();
    for delta_file in [-1, 1] {
        if let Some(target) = origin.offset(delta_rank, delta_file) {
            if board.occupant(target) == Some(player.opponent()) {
                destinations.insert(target);
            }
        }
    }
    destinations
}

/// Walks each direction until the first occupied square. Opponent's piece on
/// that square can be captured, own piece blocks.
fn slide(board: &Board, player: Player, origin: Square, directions: [Direction; 4]) -> Bitboard {
    let mut destinations = Bitboard::empty();
    for direction in directions {
        let (delta_rank, delta_file) = direction.delta();
        for square in origin.ray(delta_rank, delta_file, BOARD_WIDTH) {
            match board.occupant(square) {
                None => destinations.insert(square),
                Some(owner) => {
                    if owner != player {
                        destinations.insert(square);
                    }
                    break;
                },
            }
        }
    }
    destinations
}
