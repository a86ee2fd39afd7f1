//! Turn controller: the two-step "select a piece, then choose its destination"
//! interaction that drives a game.
//!
//! [`Game`] owns the board, the side to move and the history. Every input is
//! validated against the rules and invalid ones are silently dropped: the
//! caller can always inspect [`Game::phase`] to find out what is expected
//! next.

use tracing::{debug, warn};

use crate::chess::attacks;
use crate::chess::bitboard::Bitboard;
use crate::chess::board::Board;
use crate::chess::codec;
use crate::chess::core::{Piece, Player, Square};
use crate::chess::history::{History, HistoryEntry, MoveFlags};
use crate::chess::movegen::legal_destinations;

/// What the controller is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// A piece of the side to move should be selected.
    AwaitingPiece,
    /// A piece is selected, one of its destinations should be chosen.
    AwaitingDestination {
        /// Square of the selected piece.
        from: Square,
        #[allow(missing_docs)]
        piece: Piece,
        /// Squares the piece can move to, computed at selection time.
        destinations: Bitboard,
    },
}

/// Result of an applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ply {
    /// The entry appended to the history.
    pub entry: HistoryEntry,
    /// The piece removed from the destination square.
    pub captured: Option<Piece>,
}

/// A game in progress.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Player,
    phase: Phase,
    history: History,
}

impl Game {
    /// Standard initial position with White to move.
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Player::White, Board::starting())
    }

    /// Resumes a game from an arbitrary position, e.g. one restored by
    /// [`codec::decode`]. The history starts empty.
    #[must_use]
    pub const fn from_position(side_to_move: Player, board: Board) -> Self {
        Self {
            board,
            side_to_move,
            phase: Phase::AwaitingPiece,
            history: History::new(),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Destinations of the selected piece. Empty unless a destination is
    /// awaited.
    #[must_use]
    pub const fn valid_destinations(&self) -> Bitboard {
        match self.phase {
            Phase::AwaitingDestination { destinations, .. } => destinations,
            Phase::AwaitingPiece => Bitboard::empty(),
        }
    }

    /// Selects the piece on the square. The selection is accepted only if the
    /// square holds a piece of the side to move that has at least one
    /// destination. Any previous selection is discarded either way.
    ///
    /// Returns true if the piece has been selected.
    pub fn select(&mut self, square: Square) -> bool {
        self.phase = Phase::AwaitingPiece;
        let Some(piece) = self.board.at(square) else {
            debug!(%square, "selection rejected: empty square");
            return false;
        };
        if piece.owner != self.side_to_move {
            debug!(%square, %piece, "selection rejected: not the side to move");
            return false;
        }
        let destinations = legal_destinations(&self.board, piece.owner, piece.kind, square);
        if destinations.is_empty() {
            debug!(%square, %piece, "selection rejected: no destinations");
            return false;
        }
        debug!(%square, %piece, %destinations, "piece selected");
        self.phase = Phase::AwaitingDestination {
            from: square,
            piece,
            destinations,
        };
        true
    }

    /// Moves the selected piece to the square if it is one of its
    /// destinations.
    ///
    /// On success the move is applied and recorded, the turn passes to the
    /// opponent and the applied [`Ply`] is returned. Either way the selection
    /// is cleared.
    pub fn choose_destination(&mut self, square: Square) -> Option<Ply> {
        let phase = self.phase;
        self.phase = Phase::AwaitingPiece;
        let Phase::AwaitingDestination {
            from,
            piece,
            destinations,
        } = phase
        else {
            debug!(%square, "destination rejected: no piece selected");
            return None;
        };
        if !destinations.contains(square) || self.board.occupant(square) == Some(piece.owner) {
            debug!(%from, %square, "destination rejected: not a valid destination");
            return None;
        }

        let captured = self.board.apply_move(from, square);
        let mut entry = HistoryEntry::new(piece.owner, piece.kind, from, square);
        entry.captured = captured.map(|captured| captured.kind);
        match attacks::is_in_check(&self.board, piece.owner.opponent()) {
            Ok(true) => entry.flags |= MoveFlags::CHECK,
            Ok(false) => (),
            // Kings can be captured: moving into check is not prevented.
            Err(error) => warn!(%error, "check detection skipped"),
        }
        self.history.record(entry);
        self.side_to_move = self.side_to_move.opponent();
        debug!(%from, to = %square, notation = %entry, "move applied");
        Some(Ply { entry, captured })
    }

    /// Selects the piece on `from` and moves it to `to`.
    pub fn play(&mut self, from: Square, to: Square) -> Option<Ply> {
        if !self.select(from) {
            return None;
        }
        self.choose_destination(to)
    }

    /// Drops the current selection, if any.
    pub fn cancel(&mut self) {
        self.phase = Phase::AwaitingPiece;
    }

    /// Saved game representation of the current position.
    #[must_use]
    pub fn encode(&self) -> String {
        codec::encode(self.side_to_move, &self.board)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
