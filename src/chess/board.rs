//! Square-centric [`Board`]: a table mapping each of the 64 squares to the
//! piece standing on it. The move generator and the check detector only ever
//! ask "what stands on this square", which this representation answers in
//! constant time.

use std::fmt::{self, Write};

use anyhow::bail;
use strum::IntoEnumIterator;

use crate::chess::bitboard::{Bitboard, LINE_SEPARATOR, SQUARE_SEPARATOR};
use crate::chess::core::{File, Piece, PieceKind, Player, Rank, Square, BOARD_SIZE, BOARD_WIDTH};

/// Mapping from squares to pieces. Each square holds at most one piece, which
/// is enforced by construction.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE as usize],
}

impl Board {
    /// Board with no pieces on it.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE as usize],
        }
    }

    /// Standard initial setup: the back rank pieces in
    /// rook-knight-bishop-queen-king-bishop-knight-rook order and a full rank
    /// of pawns in front of them, mirrored for both players.
    ///
    /// ```
    /// use gambit::chess::board::Board;
    ///
    /// assert_eq!(
    ///     Board::starting().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        const BACKRANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Self::empty();
        for player in [Player::White, Player::Black] {
            for (file, kind) in File::iter().zip(BACKRANK) {
                board.squares[Square::new(file, Rank::backrank(player)) as usize] =
                    Some(Piece::new(player, kind));
                board.squares[Square::new(file, Rank::pawns_starting(player)) as usize] =
                    Some(Piece::new(player, PieceKind::Pawn));
            }
        }
        board
    }

    /// Returns the piece standing on the square, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_occupied(&self, square: Square) -> bool {
        self.at(square).is_some()
    }

    /// Owner of the piece standing on the square, if any.
    #[must_use]
    pub fn occupant(&self, square: Square) -> Option<Player> {
        self.at(square).map(|piece| piece.owner)
    }

    /// Puts the piece on the square and returns whatever stood there before.
    pub fn place(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.squares[square as usize].replace(piece)
    }

    /// Clears the square and returns the piece that stood there.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square as usize].take()
    }

    /// Relocates the piece from `from` to `to`, capturing whatever stood on
    /// the destination. Returns the captured piece.
    ///
    /// No legality checks are performed. Moving from an empty square does not
    /// change the board.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Option<Piece> {
        if from == to {
            return None;
        }
        let piece = self.remove(from)?;
        self.place(to, piece)
    }

    /// Iterates over occupied squares from A1 to H8.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.at(square).map(|piece| (square, piece)))
    }

    /// Number of pieces on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.squares.iter().flatten().count()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.squares.iter().all(Option::is_none)
    }

    /// Squares occupied by the player's pieces.
    #[must_use]
    pub fn pieces(&self, player: Player) -> Bitboard {
        self.iter()
            .filter(|(_, piece)| piece.owner == player)
            .map(|(square, _)| square)
            .collect()
    }

    /// Squares occupied by the player's kings. A well-formed game has exactly
    /// one, but hand-crafted and loaded boards might not.
    #[must_use]
    pub fn kings(&self, player: Player) -> Bitboard {
        let king = Piece::new(player, PieceKind::King);
        self.iter()
            .filter(|(_, piece)| *piece == king)
            .map(|(square, _)| square)
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl TryFrom<&str> for Board {
    type Error = anyhow::Error;

    /// Parses piece placement part of FEN: ranks from eighth to first
    /// separated by '/', digits for runs of empty squares.
    fn try_from(placement: &str) -> anyhow::Result<Self> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != BOARD_WIDTH as usize {
            bail!(
                "placement should have 8 ranks separated by '/', got {}",
                ranks.len()
            );
        }
        let mut board = Self::empty();
        for (rank_str, rank) in ranks.iter().zip(Rank::iter().rev()) {
            let mut file: u8 = 0;
            for symbol in rank_str.chars() {
                if let Some(skip) = symbol.to_digit(10) {
                    file = file.saturating_add(skip as u8);
                    continue;
                }
                let piece = Piece::try_from(symbol)?;
                let square = Square::new(File::try_from(file)?, rank);
                let _ = board.place(square, piece);
                file = file.saturating_add(1);
            }
            if file != BOARD_WIDTH {
                bail!("rank {rank} should have 8 squares, got {file}: \"{rank_str}\"");
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    /// Prints board representation in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut empty_squares = 0i32;
            for file in File::iter() {
                let square = Square::new(file, rank);
                if let Some(piece) = self.at(square) {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                const RANK_SEPARATOR: char = '/';
                write!(f, "{RANK_SEPARATOR}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) a-la Stockfish "debug" command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if file != File::H {
                    write!(f, "{SQUARE_SEPARATOR}")?;
                }
            }
            if rank != Rank::One {
                write!(f, "{LINE_SEPARATOR}")?;
            }
        }
        Ok(())
    }
}
