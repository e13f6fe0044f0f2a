//! Per-side grid of cell states and its text rendering.

use alloc::string::String;
use core::fmt::{self, Write as _};

use super::common::Coordinate;
use super::config::BOARD_SIZE;
use super::ship::ShipKind;

const N: usize = BOARD_SIZE as usize;

/// What a single cell currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    /// Intact ship segment, visible to its owner.
    Ship(ShipKind),
    /// Intact ship segment as seen by the opponent.
    HiddenShip(ShipKind),
    Hit,
    Miss,
}

impl CellState {
    /// Owning ship of an intact segment.
    pub fn ship_kind(self) -> Option<ShipKind> {
        match self {
            CellState::Ship(kind) | CellState::HiddenShip(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Ship(_) => 'S',
            CellState::HiddenShip(_) => '~',
            CellState::Hit => 'X',
            CellState::Miss => 'o',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: [[CellState; N]; N],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty `BOARD_SIZE` x `BOARD_SIZE` board.
    pub fn new() -> Self {
        Self {
            cells: [[CellState::Empty; N]; N],
        }
    }

    pub fn cell(&self, coord: Coordinate) -> CellState {
        self.cells[coord.row() as usize][coord.col() as usize]
    }

    pub fn set_cell(&mut self, coord: Coordinate, state: CellState) {
        self.cells[coord.row() as usize][coord.col() as usize] = state;
    }

    /// Every cell with its coordinate, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, CellState)> + '_ {
        Coordinate::all().map(move |c| (c, self.cell(c)))
    }

    /// Number of cells matching `pred`.
    pub fn count(&self, pred: impl Fn(CellState) -> bool) -> usize {
        self.cells().filter(|&(_, s)| pred(s)).count()
    }

    /// The board as the opponent may see it: intact ships become hidden.
    pub fn masked(&self) -> Board {
        let mut out = self.clone();
        for row in out.cells.iter_mut() {
            for cell in row.iter_mut() {
                if let CellState::Ship(kind) = *cell {
                    *cell = CellState::HiddenShip(kind);
                }
            }
        }
        out
    }

    /// Labelled text grid, one line per item: a column header `A..`, then
    /// each row prefixed with its 1-based number.
    pub fn render(&self) -> Render<'_> {
        Render {
            board: self,
            line: 0,
        }
    }
}

/// Lazy line iterator over a board. Cloning restarts from the current line.
#[derive(Clone)]
pub struct Render<'a> {
    board: &'a Board,
    line: usize,
}

impl Iterator for Render<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.line > N {
            return None;
        }
        let mut out = String::new();
        if self.line == 0 {
            out.push_str("   ");
            for c in 0..N {
                let _ = write!(out, " {}", (b'A' + c as u8) as char);
            }
        } else {
            let r = self.line - 1;
            let _ = write!(out, "{:>2} ", r + 1);
            for c in 0..N {
                let _ = write!(out, " {}", self.board.cells[r][c].glyph());
            }
        }
        self.line += 1;
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (N + 1).saturating_sub(self.line);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Render<'_> {}

impl fmt::Display for Render<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.clone().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&line)?;
        }
        Ok(())
    }
}
