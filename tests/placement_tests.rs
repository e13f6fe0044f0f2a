use battleship_solo::{
    line_orientation, random_placement, validate, Board, CellState, Coordinate, GameError, Orientation, Ship,
    ShipKind, BOARD_SIZE, FLEET,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn c(col: u8, row: u8) -> Coordinate {
    Coordinate::new(col, row).unwrap()
}

fn kind_strategy() -> impl Strategy<Value = ShipKind> {
    prop::sample::select(FLEET.to_vec())
}

#[test]
fn test_cells_follow_orientation() {
    let board = Board::new();
    let ship = Ship::new(ShipKind::Cruiser);
    let h = validate(&board, &ship, c(2, 3), Orientation::Horizontal).unwrap();
    assert_eq!(h, vec![c(2, 3), c(3, 3), c(4, 3)]);
    let v = validate(&board, &ship, c(2, 3), Orientation::Vertical).unwrap();
    assert_eq!(v, vec![c(2, 3), c(2, 4), c(2, 5)]);
}

#[test]
fn test_far_edge_fits_exactly() {
    let board = Board::new();
    let ship = Ship::new(ShipKind::Carrier);
    assert!(validate(&board, &ship, c(5, 0), Orientation::Horizontal).is_ok());
    assert_eq!(
        validate(&board, &ship, c(6, 0), Orientation::Horizontal),
        Err(GameError::OutOfBounds)
    );
    assert!(validate(&board, &ship, c(9, 5), Orientation::Vertical).is_ok());
    assert_eq!(
        validate(&board, &ship, c(9, 6), Orientation::Vertical),
        Err(GameError::OutOfBounds)
    );
}

#[test]
fn test_overlap_rejected() {
    let mut board = Board::new();
    board.set_cell(c(4, 4), CellState::Ship(ShipKind::Destroyer));
    let ship = Ship::new(ShipKind::Battleship);
    assert_eq!(
        validate(&board, &ship, c(4, 1), Orientation::Vertical),
        Err(GameError::Overlap)
    );
    assert_eq!(
        validate(&board, &ship, c(1, 4), Orientation::Horizontal),
        Err(GameError::Overlap)
    );
    // hits and misses do not block placement
    board.set_cell(c(0, 0), CellState::Miss);
    board.set_cell(c(1, 0), CellState::Hit);
    assert!(validate(&board, &ship, c(0, 0), Orientation::Horizontal).is_ok());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn out_of_bounds_iff_far_end_leaves_grid(
        kind in kind_strategy(),
        col in 0..BOARD_SIZE,
        row in 0..BOARD_SIZE,
        vertical in any::<bool>(),
    ) {
        let board = Board::new();
        let ship = Ship::new(kind);
        let (orientation, lead) = if vertical {
            (Orientation::Vertical, row)
        } else {
            (Orientation::Horizontal, col)
        };
        let result = validate(&board, &ship, c(col, row), orientation);
        let leaves = lead as usize + kind.size() > BOARD_SIZE as usize;
        prop_assert_eq!(result == Err(GameError::OutOfBounds), leaves);
        if !leaves {
            let cells = result.unwrap();
            prop_assert_eq!(cells.len(), kind.size());
            prop_assert_eq!(cells[0], c(col, row));
            prop_assert_eq!(line_orientation(&cells, kind.size()), Some(orientation));
        }
    }

    #[test]
    fn random_placement_always_valid(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        for kind in FLEET {
            let ship = Ship::new(kind);
            let (start, orientation) = random_placement(&mut rng, &board, &ship).unwrap();
            let cells = validate(&board, &ship, start, orientation).unwrap();
            for cell in cells {
                board.set_cell(cell, CellState::Ship(kind));
            }
        }
        prop_assert_eq!(board.count(|s| s.ship_kind().is_some()), 17);
    }
}
