//! The five ships owned by one side.

use alloc::vec::Vec;

use super::common::{Coordinate, GameError, Side};
use super::config::{FLEET, NUM_SHIPS};
use super::placement::line_orientation;
use super::ship::{Ship, ShipKind};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    side: Side,
    ships: [Ship; NUM_SHIPS],
    sunk_count: usize,
    placed_count: usize,
}

impl Fleet {
    /// Five unplaced ships in the standard order.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            ships: core::array::from_fn(|i| Ship::new(FLEET[i])),
            sunk_count: 0,
            placed_count: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, kind: ShipKind) -> &Ship {
        &self.ships[kind.index()]
    }

    /// Ship covering `coord`, if any.
    pub fn ship_at(&self, coord: Coordinate) -> Option<&Ship> {
        self.ships.iter().find(|s| s.occupies(coord))
    }

    pub fn sunk_count(&self) -> usize {
        self.sunk_count
    }

    pub fn placed_count(&self) -> usize {
        self.placed_count
    }

    pub fn all_placed(&self) -> bool {
        self.placed_count == NUM_SHIPS
    }

    /// Kinds still waiting for coordinates.
    pub fn unplaced(&self) -> impl Iterator<Item = ShipKind> + '_ {
        self.ships.iter().filter(|s| !s.is_placed()).map(Ship::kind)
    }

    /// Assign coordinates to `kind`. Fails if it was placed before or if
    /// `coords` is not a straight run of the ship's length.
    pub fn place_ship(&mut self, kind: ShipKind, coords: Vec<Coordinate>) -> Result<(), GameError> {
        let ship = &mut self.ships[kind.index()];
        if ship.is_placed() {
            return Err(GameError::AlreadyPlaced);
        }
        if line_orientation(&coords, kind.size()).is_none() {
            return Err(GameError::BadShape);
        }
        ship.set_coords(coords);
        self.placed_count += 1;
        Ok(())
    }

    /// Record one point of damage on `kind`. Returns `true` if this hit sank
    /// it. Hits on an already sunk ship are ignored.
    pub fn register_hit(&mut self, kind: ShipKind) -> bool {
        let just_sunk = self.ships[kind.index()].take_hit();
        if just_sunk {
            self.sunk_count += 1;
            log::debug!("{:?} {} sunk ({}/{})", self.side, kind, self.sunk_count, NUM_SHIPS);
        }
        just_sunk
    }

    pub fn is_defeated(&self) -> bool {
        self.sunk_count == NUM_SHIPS
    }

    /// Counters agree with the ships they summarise.
    pub fn is_consistent(&self) -> bool {
        let ships_ok = self.ships.iter().enumerate().all(|(i, s)| {
            s.kind() == FLEET[i]
                && s.hits() <= s.size()
                && (!s.is_placed() || s.coords().len() == s.size())
                && (s.is_placed() || s.hits() == 0)
        });
        ships_ok
            && self.sunk_count == self.ships.iter().filter(|s| s.is_sunk()).count()
            && self.placed_count == self.ships.iter().filter(|s| s.is_placed()).count()
    }
}
