//! Text commands accepted by the game loop.

use std::str::FromStr;

use crate::engine::{ship_kind_by_name, Coordinate, Orientation, ShipKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place one player ship.
    Place {
        kind: ShipKind,
        start: Coordinate,
        orientation: Orientation,
    },
    /// Randomly place every remaining player ship.
    AutoPlace,
    /// Start the match, or begin a fresh one after a finished match.
    Start,
    /// Discard the current session.
    NewGame,
    Attack(Coordinate),
    Save,
    Load,
    ClearSave,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  place <ship> <coord> <h|v>   place a ship, e.g. `place carrier A1 h`
  auto                         place your remaining ships at random
  start                        start the game once all ships are placed
  attack <coord>               fire at the computer grid (or just type `B7`)
  new                          abandon this game and start over
  save | load | clear          manage the saved game
  show                         redraw both grids
  help | quit";

fn parse_orientation(s: &str) -> Result<Orientation, String> {
    match s.to_ascii_lowercase().as_str() {
        "h" | "horizontal" => Ok(Orientation::Horizontal),
        "v" | "vertical" => Ok(Orientation::Vertical),
        other => Err(format!("Invalid direction '{}' - use h or v", other)),
    }
}

fn parse_coord(s: &str) -> Result<Coordinate, String> {
    s.parse::<Coordinate>().map_err(|e| e.to_string())
}

impl FromStr for Command {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = input.split_whitespace().collect();
        let Some((&verb, args)) = words.split_first() else {
            return Err("Empty input".to_string());
        };
        let verb = verb.to_ascii_lowercase();
        let command = match (verb.as_str(), args) {
            ("place", [ship, coord, dir]) => Command::Place {
                kind: ship_kind_by_name(ship).ok_or_else(|| format!("Unknown ship '{}'", ship))?,
                start: parse_coord(coord)?,
                orientation: parse_orientation(dir)?,
            },
            ("place", _) => return Err("Usage: place <ship> <coord> <h|v>".to_string()),
            ("auto", []) => Command::AutoPlace,
            ("start", []) => Command::Start,
            ("new" | "restart", []) => Command::NewGame,
            ("attack" | "fire", [coord]) => Command::Attack(parse_coord(coord)?),
            ("attack" | "fire", _) => return Err("Usage: attack <coord>".to_string()),
            ("save", []) => Command::Save,
            ("load", []) => Command::Load,
            ("clear", []) => Command::ClearSave,
            ("show", []) => Command::Show,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            (_, []) => match verb.parse::<Coordinate>() {
                Ok(coord) => Command::Attack(coord),
                Err(_) => return Err(format!("Unknown command '{}' - type `help`", verb)),
            },
            _ => return Err(format!("Unknown command '{}' - type `help`", verb)),
        };
        Ok(command)
    }
}
