//! Common types for the game core: coordinates, sides, attack outcomes and
//! the error type shared by every command.

use core::fmt;
use core::str::FromStr;

use super::config::BOARD_SIZE;
use super::ship::ShipKind;

/// A cell on the grid, `(col, row)`, both in `0..BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(u8, u8)", into = "(u8, u8)")
)]
pub struct Coordinate {
    col: u8,
    row: u8,
}

impl Coordinate {
    /// Checked constructor.
    pub fn new(col: u8, row: u8) -> Result<Self, GameError> {
        if col >= BOARD_SIZE || row >= BOARD_SIZE {
            return Err(GameError::OutOfBounds);
        }
        Ok(Self { col, row })
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    /// Index into a row-major `BOARD_SIZE * BOARD_SIZE` array.
    pub fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    /// Neighbour offset by `(dc, dr)`, or `None` when it leaves the grid.
    pub fn offset(&self, dc: i8, dr: i8) -> Option<Self> {
        let col = self.col as i16 + dc as i16;
        let row = self.row as i16 + dr as i16;
        if !(0..BOARD_SIZE as i16).contains(&col) || !(0..BOARD_SIZE as i16).contains(&row) {
            return None;
        }
        Some(Self {
            col: col as u8,
            row: row as u8,
        })
    }

    /// Every coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> + Clone {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coordinate { col, row }))
    }
}

impl TryFrom<(u8, u8)> for Coordinate {
    type Error = GameError;

    fn try_from((col, row): (u8, u8)) -> Result<Self, Self::Error> {
        Coordinate::new(col, row)
    }
}

impl From<Coordinate> for (u8, u8) {
    fn from(c: Coordinate) -> Self {
        (c.col, c.row)
    }
}

/// Column letter followed by the 1-based row, e.g. `B7`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}

/// Reasons a textual coordinate could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCoordinateError {
    Empty,
    /// First character is not a column letter on this board.
    BadColumn(char),
    /// Remainder is not a row number in `1..=BOARD_SIZE`.
    BadRow,
}

impl fmt::Display for ParseCoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = (b'A' + BOARD_SIZE - 1) as char;
        match self {
            ParseCoordinateError::Empty => write!(f, "Empty coordinate"),
            ParseCoordinateError::BadColumn(c) => {
                write!(f, "Invalid column '{}' - must be a letter A-{}", c, last)
            }
            ParseCoordinateError::BadRow => {
                write!(f, "Invalid row - must be a number 1-{}", BOARD_SIZE)
            }
        }
    }
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let col_ch = chars
            .next()
            .ok_or(ParseCoordinateError::Empty)?
            .to_ascii_uppercase();
        if !col_ch.is_ascii_uppercase() || (col_ch as u8 - b'A') >= BOARD_SIZE {
            return Err(ParseCoordinateError::BadColumn(col_ch));
        }
        let row: u8 = chars
            .as_str()
            .parse()
            .map_err(|_| ParseCoordinateError::BadRow)?;
        if row == 0 || row > BOARD_SIZE {
            return Err(ParseCoordinateError::BadRow);
        }
        Ok(Coordinate {
            col: col_ch as u8 - b'A',
            row: row - 1,
        })
    }
}

/// The two participants of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }
}

/// Result of resolving one attack against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// A ship segment was struck for the first time.
    Hit { kind: ShipKind, just_sunk: bool },
    /// Open water (or a cell already marked as a miss).
    Miss,
    /// The cell was already hit; nothing changed.
    NoOp,
}

/// Errors returned by placement and turn commands. None of them is fatal:
/// the session is left untouched and the caller may retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate or ship extent falls outside the grid.
    OutOfBounds,
    /// The ship already has coordinates.
    AlreadyPlaced,
    /// Ship placement overlaps another ship.
    Overlap,
    /// Ship coordinates are not a straight run of the ship's length.
    BadShape,
    /// Random placement found no free spot.
    UnableToPlace,
    /// Attack or start attempted before every ship is placed.
    NotYetStarted,
    /// Placement or start attempted after the match began.
    AlreadyStarted,
    /// The other side is due to move.
    OutOfTurn,
    /// The match has a winner already.
    GameOver,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OutOfBounds => write!(f, "You cannot place a ship out of bounds."),
            GameError::AlreadyPlaced => write!(f, "That ship has already been placed"),
            GameError::Overlap => write!(f, "Ship placement overlaps with another ship"),
            GameError::BadShape => write!(f, "A ship must lie in one straight, unbroken line"),
            GameError::UnableToPlace => write!(f, "Unable to find room for the ship"),
            GameError::NotYetStarted => {
                write!(f, "You must place all your ships before you can play.")
            }
            GameError::AlreadyStarted => write!(f, "The game has already started"),
            GameError::OutOfTurn => write!(f, "Wait for the computer to make its move"),
            GameError::GameOver => write!(f, "The game is over. Start a new game to play again"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
