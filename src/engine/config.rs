use super::ship::ShipKind;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;

/// Fleet composition shared by both sides, in placement order.
pub const FLEET: [ShipKind; NUM_SHIPS] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Submarine,
    ShipKind::Destroyer,
];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Look up a ship kind by name, case-insensitively. Accepts the short
/// `sub` alias used by the placement form.
pub fn ship_kind_by_name(name: &str) -> Option<ShipKind> {
    if name.eq_ignore_ascii_case("sub") {
        return Some(ShipKind::Submarine);
    }
    FLEET
        .iter()
        .copied()
        .find(|kind| kind.name().eq_ignore_ascii_case(name))
}
