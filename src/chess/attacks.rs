//! Check detection: finds the pieces attacking a player's king.
//!
//! An attack is any destination the move generator would produce for an
//! opponent's piece, so the detector inherits its rules: pawns attack
//! diagonally forward only, sliding pieces are blocked by the first occupied
//! square. The opponent's king is never considered a checker.

use std::fmt;

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::chess::board::Board;
use crate::chess::core::{Piece, PieceKind, Player, Square};
use crate::chess::movegen::legal_destinations;

/// The king of a player can not be located unambiguously.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum KingError {
    #[allow(missing_docs)]
    #[error("{} king is missing from the board", player_name(.0))]
    Missing(Player),
    #[allow(missing_docs)]
    #[error("{} has {count} kings on the board", player_name(.player))]
    Ambiguous { player: Player, count: u32 },
}

/// Opponent's piece attacking the king.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checker {
    #[allow(missing_docs)]
    pub piece: Piece,
    #[allow(missing_docs)]
    pub square: Square,
}

/// Pieces attacking the king of one player. There are at most 15 non-king
/// pieces per side; the extra slot covers malformed boards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckInfo {
    /// Square of the king under consideration.
    pub king: Square,
    /// Opponent's pieces attacking the king, in a1 to h8 order of their
    /// squares.
    pub checkers: ArrayVec<Checker, 16>,
}

impl CheckInfo {
    /// The king is in check if at least one piece attacks it.
    #[must_use]
    pub fn is_check(&self) -> bool {
        !self.checkers.is_empty()
    }
}

/// Which kings are attacked in a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckStatus {
    /// No king is attacked.
    Neither,
    /// White king is attacked.
    White,
    /// Black king is attacked.
    Black,
    /// Both kings are attacked. Reachable because moving into check is not
    /// prevented.
    Both,
}

impl CheckStatus {
    /// Runs the detector for each side independently.
    ///
    /// # Errors
    ///
    /// Returns [`KingError`] if any of the kings can not be located.
    pub fn of(board: &Board) -> Result<Self, KingError> {
        let white = is_in_check(board, Player::White)?;
        let black = is_in_check(board, Player::Black)?;
        Ok(match (white, black) {
            (false, false) => Self::Neither,
            (true, false) => Self::White,
            (false, true) => Self::Black,
            (true, true) => Self::Both,
        })
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Neither => "no check",
            Self::White => "white is in check",
            Self::Black => "black is in check",
            Self::Both => "both kings are in check",
        })
    }
}

/// Locates the player's king.
///
/// # Errors
///
/// [`KingError::Missing`] when the player has no king,
/// [`KingError::Ambiguous`] when there is more than one.
pub fn king_square(board: &Board, player: Player) -> Result<Square, KingError> {
    let kings = board.kings(player);
    match kings.len() {
        0 => Err(KingError::Missing(player)),
        1 => kings.iter().next().ok_or(KingError::Missing(player)),
        count => Err(KingError::Ambiguous { player, count }),
    }
}

/// Collects the opponent's pieces attacking the player's king.
///
/// ```
/// use gambit::chess::attacks::check_info;
/// use gambit::chess::board::Board;
/// use gambit::chess::core::{Player, Square};
///
/// let board = Board::try_from("4k3/8/8/8/8/8/8/4R1K1").unwrap();
/// let info = check_info(&board, Player::Black).unwrap();
/// assert_eq!(info.king, Square::E8);
/// assert_eq!(info.checkers[0].square, Square::E1);
/// ```
///
/// # Errors
///
/// Propagates [`KingError`] from [`king_square`].
pub fn check_info(board: &Board, player: Player) -> Result<CheckInfo, KingError> {
    let king = king_square(board, player)?;
    let mut checkers = ArrayVec::new();
    for (square, piece) in board.iter() {
        if piece.owner == player || piece.kind == PieceKind::King {
            continue;
        }
        if legal_destinations(board, piece.owner, piece.kind, square).contains(king) {
            // Overflow would only be possible on a board with more than 16
            // opponent pieces attacking the same square.
            if checkers.try_push(Checker { piece, square }).is_err() {
                break;
            }
        }
    }
    Ok(CheckInfo { king, checkers })
}

/// Returns true if any of the opponent's non-king pieces attacks the player's
/// king.
///
/// # Errors
///
/// Propagates [`KingError`] from [`king_square`].
pub fn is_in_check(board: &Board, player: Player) -> Result<bool, KingError> {
    Ok(check_info(board, player)?.is_check())
}

/// Human-readable player name for error messages.
const fn player_name(player: &Player) -> &'static str {
    match player {
        Player::White => "White",
        Player::Black => "Black",
    }
}
