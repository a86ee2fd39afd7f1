use std::path::PathBuf;

use crate::chess::core::Square;

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    Select(Square),
    Destination(Square),
    Move { from: Square, to: Square },
    Moves,
    Display,
    History,
    Check,
    Encode,
    Decode(String),
    Save(Option<PathBuf>),
    Load(PathBuf),
    NewGame,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Accepts both "e2e4" and "e2 e4".
fn parse_move(arguments: &[&str]) -> Option<(Square, Square)> {
    let (from, to) = match arguments {
        [joined] if joined.len() == 4 => (joined.get(..2)?, joined.get(2..)?),
        [from, to] => (*from, *to),
        _ => return None,
    };
    Some((Square::try_from(from).ok()?, Square::try_from(to).ok()?))
}

fn parse_square(arguments: &[&str]) -> Option<Square> {
    match arguments {
        [square] => Square::try_from(*square).ok(),
        _ => None,
    }
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some((&name, arguments)) = parts.split_first() else {
            return Self::Empty;
        };
        let unknown = || Self::Unknown(input.trim().to_string());

        match name {
            "select" => parse_square(arguments).map_or_else(unknown, Self::Select),
            "to" => parse_square(arguments).map_or_else(unknown, Self::Destination),
            "move" => parse_move(arguments).map_or_else(unknown, |(from, to)| Self::Move { from, to }),
            "moves" => Self::Moves,
            "d" => Self::Display,
            "history" => Self::History,
            "check" => Self::Check,
            "encode" => Self::Encode,
            "decode" if arguments.len() == 1 => Self::Decode(arguments[0].to_string()),
            "save" if arguments.len() <= 1 => Self::Save(arguments.first().map(PathBuf::from)),
            "load" if arguments.len() == 1 => Self::Load(PathBuf::from(arguments[0])),
            "new" => Self::NewGame,
            "help" => Self::Help,
            "quit" => Self::Quit,
            _ => unknown(),
        }
    }
}
