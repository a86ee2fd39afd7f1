//! Line-oriented front-end for a [`Game`]: reads commands from the input
//! stream, drives the turn controller and writes the responses to the output
//! stream. It is what a GUI would do with mouse clicks and sprites, expressed
//! with square names and text.
//!
//! [`Engine::run`] is the "main loop" of the engine.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::chess::attacks::CheckStatus;
use crate::chess::codec;
use crate::chess::core::Square;
use crate::chess::game::{Game, Ply};
use crate::chess::movegen::destinations_from;
use crate::engine::command::Command;

mod command;

const HELP: &str = "\
Commands:
  select <square>       select a piece of the side to move
  to <square>           move the selected piece
  move <from><to>       select and move in one step, e.g. `move e2e4`
  moves                 list destinations of every piece of the side to move
  d                     print the board
  history               print the game transcript
  check                 report which kings are attacked
  encode                print the saved game representation
  decode <digits>       restore the game from its saved representation
  save [path]           write the saved game to a file
  load <path>           restore the game from a file
  new                   start a new game
  help                  print this message
  quit                  exit";

/// The Engine connects the rules with the user: it handles commands, including
/// I/O.
pub struct Engine<'a, R: BufRead, W: Write> {
    game: Game,
    save_path: Option<PathBuf>,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Engine<'a, R, W> {
    /// Creates a new instance of the engine with starting position and provided
    /// I/O.
    #[must_use]
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            game: Game::new(),
            save_path: None,
            input,
            output,
        }
    }

    /// Replaces the game the engine starts with.
    #[must_use]
    pub fn with_game(mut self, game: Game) -> Self {
        self.game = game;
        self
    }

    /// Sets the file `save` writes to when no path is given.
    #[must_use]
    pub fn with_save_path(mut self, path: PathBuf) -> Self {
        self.save_path = Some(path);
        self
    }

    /// Continuously reads the input stream and executes the commands until
    /// "quit" is sent or the input ends.
    ///
    /// Invalid commands and rejected moves are reported to the output and
    /// skipped, they never stop the loop.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading the input or writing the output
    /// fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("reading from input")?;
            if read == 0 {
                break;
            }
            let command = Command::parse(&line);
            debug!(?command, "received command");
            match command {
                Command::Select(square) => self.handle_select(square)?,
                Command::Destination(square) => {
                    let ply = self.game.choose_destination(square);
                    self.report_ply(ply, square)?;
                },
                Command::Move { from, to } => {
                    if self.game.select(from) {
                        let ply = self.game.choose_destination(to);
                        self.report_ply(ply, to)?;
                    } else {
                        writeln!(self.output, "info string Selection rejected: {from}")?;
                    }
                },
                Command::Moves => self.handle_moves()?,
                Command::Display => self.handle_display()?,
                Command::History => writeln!(self.output, "{}", self.game.history())?,
                Command::Check => self.handle_check()?,
                Command::Encode => write!(self.output, "{}", self.game.encode())?,
                Command::Decode(digits) => self.handle_decode(&digits)?,
                Command::Save(path) => self.handle_save(path)?,
                Command::Load(path) => self.handle_load(&path)?,
                Command::NewGame => {
                    self.game = Game::new();
                    info!("new game started");
                },
                Command::Help => writeln!(self.output, "{HELP}")?,
                Command::Quit => break,
                Command::Empty => {},
                Command::Unknown(command) => {
                    writeln!(self.output, "info string Unsupported command: {command}")?;
                },
            }
            self.output.flush()?;
        }
        Ok(())
    }

    fn handle_select(&mut self, square: Square) -> anyhow::Result<()> {
        if self.game.select(square) {
            writeln!(
                self.output,
                "destinations {}",
                self.game.valid_destinations()
            )?;
        } else {
            writeln!(self.output, "info string Selection rejected: {square}")?;
        }
        Ok(())
    }

    fn report_ply(&mut self, ply: Option<Ply>, destination: Square) -> anyhow::Result<()> {
        match ply {
            Some(ply) => writeln!(self.output, "played {}", ply.entry)?,
            None => writeln!(
                self.output,
                "info string Destination rejected: {destination}"
            )?,
        }
        Ok(())
    }

    /// Lists every piece of the side to move that has somewhere to go.
    fn handle_moves(&mut self) -> anyhow::Result<()> {
        let board = self.game.board();
        let side_to_move = self.game.side_to_move();
        for (square, piece) in board.iter() {
            if piece.owner != side_to_move {
                continue;
            }
            let destinations = destinations_from(board, square);
            if !destinations.is_empty() {
                writeln!(self.output, "{piece} {square}: {destinations}")?;
            }
        }
        Ok(())
    }

    fn handle_display(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "{:?}", self.game.board())?;
        writeln!(self.output, "side to move: {}", self.game.side_to_move())?;
        Ok(())
    }

    fn handle_check(&mut self) -> anyhow::Result<()> {
        match CheckStatus::of(self.game.board()) {
            Ok(status) => writeln!(self.output, "{status}")?,
            Err(error) => writeln!(self.output, "info string {error}")?,
        }
        Ok(())
    }

    fn handle_decode(&mut self, digits: &str) -> anyhow::Result<()> {
        match codec::decode(digits) {
            Ok((side_to_move, board)) => {
                self.game = Game::from_position(side_to_move, board);
                writeln!(self.output, "info string Position restored")?;
            },
            Err(error) => writeln!(self.output, "info string Invalid saved game: {error}")?,
        }
        Ok(())
    }

    fn handle_save(&mut self, path: Option<PathBuf>) -> anyhow::Result<()> {
        let Some(path) = path.or_else(|| self.save_path.clone()) else {
            writeln!(self.output, "info string No save path given")?;
            return Ok(());
        };
        match std::fs::write(&path, self.game.encode())
            .with_context(|| format!("writing saved game to {}", path.display()))
        {
            Ok(()) => writeln!(self.output, "info string Saved to {}", path.display())?,
            Err(error) => writeln!(self.output, "info string {error:#}")?,
        }
        Ok(())
    }

    fn handle_load(&mut self, path: &Path) -> anyhow::Result<()> {
        match load_game(path) {
            Ok(game) => {
                self.game = game;
                writeln!(self.output, "info string Loaded {}", path.display())?;
            },
            Err(error) => writeln!(self.output, "info string {error:#}")?,
        }
        Ok(())
    }
}

/// Reads a saved game from the file.
///
/// # Errors
///
/// Returns an error if the file can not be read or does not contain a valid
/// saved game.
pub fn load_game(path: &Path) -> anyhow::Result<Game> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading saved game from {}", path.display()))?;
    let (side_to_move, board) = codec::decode(&contents)
        .with_context(|| format!("parsing saved game from {}", path.display()))?;
    Ok(Game::from_position(side_to_move, board))
}
