//! Ship kinds and per-ship damage tracking.

use alloc::vec::Vec;
use core::fmt;

use super::common::Coordinate;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Column and row step between consecutive segments.
    pub fn step(self) -> (u8, u8) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// The five ships every fleet carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipKind {
    /// Number of cells the ship covers.
    pub const fn size(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser => 3,
            ShipKind::Submarine => 3,
            ShipKind::Destroyer => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
        }
    }

    /// Position of this kind inside a fleet.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A ship of one fleet. Coordinates are assigned once by placement and the
/// hit counter never exceeds the ship's size.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    kind: ShipKind,
    coords: Vec<Coordinate>,
    hits: u8,
}

impl Ship {
    /// Unplaced, undamaged ship.
    pub fn new(kind: ShipKind) -> Self {
        Self {
            kind,
            coords: Vec::new(),
            hits: 0,
        }
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.kind.size()
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn is_placed(&self) -> bool {
        !self.coords.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits as usize
    }

    pub fn is_sunk(&self) -> bool {
        self.hits() == self.size()
    }

    pub fn occupies(&self, coord: Coordinate) -> bool {
        self.coords.contains(&coord)
    }

    pub(crate) fn set_coords(&mut self, coords: Vec<Coordinate>) {
        self.coords = coords;
    }

    /// Adds one point of damage. Returns `true` on the hit that sinks it;
    /// a sunk ship takes no further damage.
    pub(crate) fn take_hit(&mut self) -> bool {
        if self.is_sunk() {
            return false;
        }
        self.hits += 1;
        self.is_sunk()
    }
}
