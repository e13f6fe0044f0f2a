//! Ship placement checks and random deployment.

use alloc::vec::Vec;
use rand::Rng;

use super::board::Board;
use super::common::{Coordinate, GameError};
use super::config::BOARD_SIZE;
use super::ship::{Orientation, Ship};

const MAX_RANDOM_ATTEMPTS: usize = 100;

/// Check that `ship` can be laid from `start` along `orientation` on `board`
/// and return the cells it would occupy, starting at `start`.
///
/// Fails with `AlreadyPlaced` if the ship has coordinates, `OutOfBounds` if
/// the far end leaves the grid, and `Overlap` if any cell already holds a
/// ship. Does not modify anything.
pub fn validate(
    board: &Board,
    ship: &Ship,
    start: Coordinate,
    orientation: Orientation,
) -> Result<Vec<Coordinate>, GameError> {
    if ship.is_placed() {
        return Err(GameError::AlreadyPlaced);
    }
    let size = ship.size();
    let (dc, dr) = orientation.step();
    let far_col = start.col() as usize + dc as usize * (size - 1);
    let far_row = start.row() as usize + dr as usize * (size - 1);
    if far_col >= BOARD_SIZE as usize || far_row >= BOARD_SIZE as usize {
        return Err(GameError::OutOfBounds);
    }

    let mut coords = Vec::with_capacity(size);
    for i in 0..size {
        let coord = Coordinate::new(
            start.col() + dc * i as u8,
            start.row() + dr * i as u8,
        )?;
        if board.cell(coord).ship_kind().is_some() {
            return Err(GameError::Overlap);
        }
        coords.push(coord);
    }
    Ok(coords)
}

/// Orientation of `coords` if they are exactly `size` cells running in a
/// straight line from the first one, in order.
pub fn line_orientation(coords: &[Coordinate], size: usize) -> Option<Orientation> {
    let &start = coords.first()?;
    if coords.len() != size {
        return None;
    }
    [Orientation::Horizontal, Orientation::Vertical]
        .into_iter()
        .find(|orientation| {
            let (dc, dr) = orientation.step();
            coords.iter().enumerate().all(|(i, &c)| {
                start.offset((dc as usize * i) as i8, (dr as usize * i) as i8) == Some(c)
            })
        })
}

/// Pick a random legal `(start, orientation)` for `ship` on `board`.
pub fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    board: &Board,
    ship: &Ship,
) -> Result<(Coordinate, Orientation), GameError> {
    if ship.is_placed() {
        return Err(GameError::AlreadyPlaced);
    }
    let span = BOARD_SIZE - ship.size() as u8;
    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_col, max_row) = match orientation {
            Orientation::Horizontal => (span, BOARD_SIZE - 1),
            Orientation::Vertical => (BOARD_SIZE - 1, span),
        };
        let start = Coordinate::new(
            rng.random_range(0..=max_col),
            rng.random_range(0..=max_row),
        )?;
        if validate(board, ship, start, orientation).is_ok() {
            return Ok((start, orientation));
        }
    }
    Err(GameError::UnableToPlace)
}
