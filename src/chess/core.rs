//! Chess primitives commonly used within [`crate::chess`]: squares and their
//! geometry, players and pieces.

use std::fmt::{self, Write};

use anyhow::bail;
use itertools::Itertools;
use strum::{EnumIter, FromRepr};

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Board squares: from left to right, from bottom to the top:
///
/// ```
/// use gambit::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A4 as u8, 8 * 3);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// Only the 64 squares of the board are representable: every translation that
/// could leave the board returns [`Option<Square>`] instead.
///
/// ```
/// use gambit::chess::core::Square;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// assert_eq!(std::mem::size_of::<Option<Square>>(), 1);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, FromRepr)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub fn new(file: File, rank: Rank) -> Self {
        match Self::from_repr(file as u8 + (rank as u8) * BOARD_WIDTH) {
            Some(square) => square,
            None => unreachable!("file and rank are both within 0..BOARD_WIDTH"),
        }
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub fn file(self) -> File {
        match File::from_repr(self as u8 % BOARD_WIDTH) {
            Some(file) => file,
            None => unreachable!("remainder is always within 0..BOARD_WIDTH"),
        }
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub fn rank(self) -> Rank {
        match Rank::from_repr(self as u8 / BOARD_WIDTH) {
            Some(rank) => rank,
            None => unreachable!("quotient is always within 0..BOARD_WIDTH"),
        }
    }

    /// Zero-based grid position: file maps to `x`, rank maps to `y`.
    ///
    /// ```
    /// use gambit::chess::core::Square;
    ///
    /// assert_eq!(Square::A1.to_grid(), (0, 0));
    /// assert_eq!(Square::C7.to_grid(), (2, 6));
    /// ```
    #[must_use]
    pub fn to_grid(self) -> (u8, u8) {
        (self.file() as u8, self.rank() as u8)
    }

    /// Inverse of [`Square::to_grid`]. Returns `None` if either coordinate is
    /// outside `0..BOARD_WIDTH`.
    #[must_use]
    pub fn from_grid(x: u8, y: u8) -> Option<Self> {
        Some(Self::new(File::from_repr(x)?, Rank::from_repr(y)?))
    }

    /// Moves the square by an arbitrary slope. Returns `None` when the result
    /// leaves the board.
    #[must_use]
    pub fn offset(self, delta_rank: i8, delta_file: i8) -> Option<Self> {
        let (x, y) = self.to_grid();
        Self::from_grid(
            x.checked_add_signed(delta_file)?,
            y.checked_add_signed(delta_rank)?,
        )
    }

    /// Neighbouring square in given direction, if it exists.
    #[must_use]
    pub fn shift(self, direction: Direction) -> Option<Self> {
        let (delta_rank, delta_file) = direction.delta();
        self.offset(delta_rank, delta_file)
    }

    /// The square `distance` steps away in given direction, if it is still on
    /// the board.
    #[must_use]
    pub fn walk(self, direction: Direction, distance: u8) -> Option<Self> {
        let (delta_rank, delta_file) = direction.delta();
        let distance = i8::try_from(distance).ok()?;
        self.offset(
            delta_rank.checked_mul(distance)?,
            delta_file.checked_mul(distance)?,
        )
    }

    /// Squares along the slope starting next to this square, nearest first.
    /// The walk stops after `max_distance` squares or at the board edge,
    /// whichever comes first. Occupancy is not taken into account.
    ///
    /// ```
    /// use gambit::chess::core::Square;
    ///
    /// assert_eq!(
    ///     Square::F6.ray(1, 1, 7).collect::<Vec<_>>(),
    ///     vec![Square::G7, Square::H8]
    /// );
    /// assert_eq!(
    ///     Square::D4.ray(0, -1, 2).collect::<Vec<_>>(),
    ///     vec![Square::C4, Square::B4]
    /// );
    /// ```
    #[must_use]
    pub const fn ray(self, delta_rank: i8, delta_file: i8, max_distance: u8) -> Ray {
        Ray {
            current: self,
            delta_rank,
            delta_file,
            remaining: if delta_rank == 0 && delta_file == 0 {
                0
            } else {
                max_distance
            },
        }
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its position on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        match Self::from_repr(square_index) {
            Some(square) => Ok(square),
            None => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            ),
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Lazily walks the board along a fixed slope. Produced by [`Square::ray`].
#[derive(Clone, Debug)]
pub struct Ray {
    current: Square,
    delta_rank: i8,
    delta_file: i8,
    remaining: u8,
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let Some(next) = self.current.offset(self.delta_rank, self.delta_file) else {
            // Board edge: nothing further along this slope.
            self.remaining = 0;
            return None;
        };
        self.remaining -= 1;
        self.current = next;
        Some(next)
    }
}

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, FromRepr)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Self::try_from(file as u8 - b'a'),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match Self::from_repr(column) {
            Some(file) => Ok(file),
            None => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, FromRepr)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    pub(super) const fn backrank(player: Player) -> Self {
        match player {
            Player::White => Self::One,
            Player::Black => Self::Eight,
        }
    }

    pub(super) const fn pawns_starting(player: Player) -> Self {
        match player {
            Player::White => Self::Two,
            Player::Black => Self::Seven,
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Self::try_from(rank as u8 - b'1'),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match Self::from_repr(row) {
            Some(rank) => Ok(rank),
            None => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub(super) const fn push_direction(self) -> Direction {
        match self {
            Self::White => Direction::Up,
            Self::Black => Direction::Down,
        }
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("player should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// The discriminants are the piece digits of the saved game format (see
/// [`crate::chess::codec`]).
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, FromRepr)]
pub enum PieceKind {
    Pawn = 0,
    Rook = 1,
    Knight = 2,
    Bishop = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Uppercase letter used in algebraic notation. Pawns don't have one.
    #[must_use]
    pub const fn algebraic_symbol(self) -> Option<char> {
        match self {
            Self::Pawn => None,
            Self::Rook => Some('R'),
            Self::Knight => Some('N'),
            Self::Bishop => Some('B'),
            Self::Queen => Some('Q'),
            Self::King => Some('K'),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// Represents a specific piece owned by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    /// Parses FEN piece symbol: uppercase for White, lowercase for Black.
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let owner = if symbol.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        Ok(Self { owner, kind })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        f.write_char(match self.owner {
            // White player: uppercase symbols.
            Player::White => symbol.to_ascii_uppercase(),
            // Black player: lowercase symbols.
            Player::Black => symbol,
        })
    }
}

/// Directions on the board from a perspective of White player.
///
/// Traditionally those are North (Up), West (Left), East (Right), South (Down)
/// and their combinations. However, using cardinal directions is confusing,
/// hence they are replaced by relative directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter)]
pub enum Direction {
    /// Also known as North.
    Up,
    /// Also known as NorthEast.
    UpRight,
    /// Also known as East.
    Right,
    /// Also known as SouthEast.
    DownRight,
    /// Also known as South.
    Down,
    /// Also known as SouthWest.
    DownLeft,
    /// Also known as West.
    Left,
    /// Also known as NorthWest.
    UpLeft,
}

impl Direction {
    /// Directions a rook slides in.
    pub const ORTHOGONAL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];
    /// Directions a bishop slides in.
    pub const DIAGONAL: [Self; 4] = [Self::UpRight, Self::DownRight, Self::DownLeft, Self::UpLeft];

    /// One step in this direction as `(delta_rank, delta_file)`.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (1, 0),
            Self::UpRight => (1, 1),
            Self::Right => (0, 1),
            Self::DownRight => (-1, 1),
            Self::Down => (-1, 0),
            Self::DownLeft => (-1, -1),
            Self::Left => (0, -1),
            Self::UpLeft => (1, -1),
        }
    }
}
