//! Implementation of the chess rules: board, move generation, check detection,
//! turn handling, history and saved games.

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod codec;
pub mod core;
pub mod game;
pub mod history;
pub mod movegen;
