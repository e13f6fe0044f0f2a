//! Resolution of a single guess against one side's board and fleet.

use super::board::{Board, CellState};
use super::common::{AttackOutcome, Coordinate};
use super::fleet::Fleet;

/// Apply a guess at `coord`.
///
/// At most one cell changes and at most one hit is registered. Repeating an
/// attack on a `Hit` cell is a `NoOp`; repeating one on a `Miss` cell
/// reports `Miss` again without changing anything. The caller checks
/// `fleet.is_defeated()` afterwards.
pub fn resolve_attack(board: &mut Board, fleet: &mut Fleet, coord: Coordinate) -> AttackOutcome {
    let outcome = match board.cell(coord) {
        CellState::Ship(kind) | CellState::HiddenShip(kind) => {
            if fleet.ship(kind).is_sunk() {
                log::warn!("{} still shows an intact {} segment after it sank", coord, kind);
                AttackOutcome::NoOp
            } else {
                board.set_cell(coord, CellState::Hit);
                let just_sunk = fleet.register_hit(kind);
                AttackOutcome::Hit { kind, just_sunk }
            }
        }
        CellState::Hit => AttackOutcome::NoOp,
        CellState::Empty | CellState::Miss => {
            board.set_cell(coord, CellState::Miss);
            AttackOutcome::Miss
        }
    };
    log::debug!("{:?} attack at {}: {:?}", fleet.side().opponent(), coord, outcome);
    outcome
}
