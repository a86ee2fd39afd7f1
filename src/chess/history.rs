//! Append-only log of the applied moves and its transcript in (short)
//! [algebraic notation].
//!
//! [algebraic notation]: https://en.wikipedia.org/wiki/Algebraic_notation_(chess)

use std::fmt;

use itertools::Itertools;

use crate::chess::core::{PieceKind, Player, Square};

bitflags::bitflags! {
    /// Facts about a move that are only known once it has been applied and
    /// that show up in its notation.
    ///
    /// Castling and checkmate are never detected by the rules of this crate,
    /// but the history can still record them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MoveFlags: u8 {
        /// The move attacks the opponent's king ("+").
        const CHECK = 0b0001;
        /// The move ends the game ("#").
        const CHECKMATE = 0b0010;
        /// Short castle ("O-O").
        const KINGSIDE_CASTLE = 0b0100;
        /// Long castle ("O-O-O").
        const QUEENSIDE_CASTLE = 0b1000;
    }
}

/// One applied ply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The player who made the move.
    pub player: Player,
    /// Kind of the moved piece.
    pub kind: PieceKind,
    #[allow(missing_docs)]
    pub from: Square,
    #[allow(missing_docs)]
    pub to: Square,
    /// Kind of the piece that stood on the destination, if any.
    pub captured: Option<PieceKind>,
    #[allow(missing_docs)]
    pub promotion: Option<PieceKind>,
    #[allow(missing_docs)]
    pub flags: MoveFlags,
}

impl HistoryEntry {
    /// A move without capture, promotion or flags.
    #[must_use]
    pub fn new(player: Player, kind: PieceKind, from: Square, to: Square) -> Self {
        Self {
            player,
            kind,
            from,
            to,
            captured: None,
            promotion: None,
            flags: MoveFlags::empty(),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for HistoryEntry {
    /// Writes the move in Standard Algebraic Notation without disambiguation
    /// and capture marks: "Nf3", "e4", "e8=Q+", "O-O".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flags.contains(MoveFlags::KINGSIDE_CASTLE) {
            write!(f, "O-O")?;
        } else if self.flags.contains(MoveFlags::QUEENSIDE_CASTLE) {
            write!(f, "O-O-O")?;
        } else {
            if let Some(symbol) = self.kind.algebraic_symbol() {
                write!(f, "{symbol}")?;
            }
            write!(f, "{}", self.to)?;
            if let Some(symbol) = self.promotion.and_then(PieceKind::algebraic_symbol) {
                write!(f, "={symbol}")?;
            }
        }
        if self.flags.contains(MoveFlags::CHECKMATE) {
            write!(f, "#")
        } else if self.flags.contains(MoveFlags::CHECK) {
            write!(f, "+")
        } else {
            Ok(())
        }
    }
}

/// Ordered record of the game. Entries are only ever appended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends the entry to the log.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently applied move.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    #[allow(missing_docs)]
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// Transcript of the game with numbered full turns.
    ///
    /// ```
    /// use gambit::chess::core::{PieceKind, Player, Square};
    /// use gambit::chess::history::{History, HistoryEntry};
    ///
    /// let mut history = History::new();
    /// history.record(HistoryEntry::new(Player::White, PieceKind::Pawn, Square::E2, Square::E4));
    /// history.record(HistoryEntry::new(Player::Black, PieceKind::Pawn, Square::E7, Square::E5));
    /// history.record(HistoryEntry::new(Player::White, PieceKind::Knight, Square::G1, Square::F3));
    /// assert_eq!(history.to_notation(), "1. e4 e5 2. Nf3");
    /// ```
    #[must_use]
    pub fn to_notation(&self) -> String {
        let mut tokens = Vec::with_capacity(self.entries.len() * 3 / 2 + 1);
        let mut turn = 1;
        let mut previous: Option<Player> = None;
        for entry in &self.entries {
            match (entry.player, previous) {
                (Player::White, Some(Player::White)) => {
                    turn += 1;
                    tokens.push(format!("{turn}."));
                },
                (Player::White, _) => tokens.push(format!("{turn}.")),
                (Player::Black, Some(Player::White)) => (),
                (Player::Black, _) => tokens.push(format!("{turn}...")),
            }
            tokens.push(entry.to_string());
            if entry.player == Player::Black {
                turn += 1;
            }
            if entry.flags.contains(MoveFlags::CHECKMATE) {
                break;
            }
            previous = Some(entry.player);
        }
        tokens.iter().join(" ")
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

impl<'a> IntoIterator for &'a History {
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;
    type Item = &'a HistoryEntry;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
