use battleship_solo::{
    autoplay, AttackOutcome, AttackReport, CellState, Coordinate, GameError, GameSession,
    OpponentPolicy, Orientation, Phase, ShipKind, Side, FLEET,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn c(col: u8, row: u8) -> Coordinate {
    Coordinate::new(col, row).unwrap()
}

/// Session with every player ship laid out horizontally, one per row.
fn placed_session(rng: &mut SmallRng) -> GameSession {
    let mut session = GameSession::new(rng).unwrap();
    for (row, kind) in FLEET.iter().enumerate() {
        session
            .place_ship(*kind, c(0, row as u8), Orientation::Horizontal)
            .unwrap();
    }
    session
}

#[test]
fn test_new_session() {
    let mut rng = SmallRng::seed_from_u64(1);
    let session = GameSession::new(&mut rng).unwrap();
    assert_eq!(session.phase(), Phase::Placement);
    assert!(session.computer_fleet().all_placed());
    assert_eq!(session.player_fleet().placed_count(), 0);
    assert_eq!(session.computer_board().count(|s| s.ship_kind().is_some()), 17);
    // the player only sees water
    assert_eq!(session.computer_view().count(|s| matches!(s, CellState::Ship(_))), 0);
    assert_eq!(session.computer_view().count(|s| matches!(s, CellState::HiddenShip(_))), 17);
}

#[test]
fn test_place_ship_report() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut session = GameSession::new(&mut rng).unwrap();
    let report = session
        .place_ship(ShipKind::Carrier, c(0, 0), Orientation::Horizontal)
        .unwrap();
    assert_eq!(report.remaining, 4);
    assert_eq!(report.coords.len(), 5);
    assert_eq!(
        report.to_string(),
        "Carrier placed at A1 horizontally. 4 ships left to place."
    );
    assert_eq!(session.player_board().cell(c(4, 0)), CellState::Ship(ShipKind::Carrier));
}

#[test]
fn test_rejected_placement_changes_nothing() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut session = GameSession::new(&mut rng).unwrap();
    session
        .place_ship(ShipKind::Carrier, c(0, 0), Orientation::Horizontal)
        .unwrap();
    let before = session.clone();

    assert_eq!(
        session.place_ship(ShipKind::Carrier, c(0, 5), Orientation::Horizontal),
        Err(GameError::AlreadyPlaced)
    );
    assert_eq!(
        session.place_ship(ShipKind::Battleship, c(7, 2), Orientation::Horizontal),
        Err(GameError::OutOfBounds)
    );
    assert_eq!(
        session.place_ship(ShipKind::Battleship, c(2, 0), Orientation::Vertical),
        Err(GameError::Overlap)
    );
    assert_eq!(session, before);
}

#[test]
fn test_attack_before_start() {
    let mut rng = SmallRng::seed_from_u64(4);
    let mut session = GameSession::new(&mut rng).unwrap();
    assert_eq!(session.player_attack(c(0, 0)), Err(GameError::NotYetStarted));
    assert_eq!(session.start(&mut rng), Err(GameError::NotYetStarted));
    session
        .place_ship(ShipKind::Carrier, c(0, 0), Orientation::Horizontal)
        .unwrap();
    assert_eq!(session.start(&mut rng), Err(GameError::NotYetStarted));
}

#[test]
fn test_computer_fires_first() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut session = placed_session(&mut rng);
    let report = session.start(&mut rng).unwrap();
    assert_eq!(report.attacker, Side::Computer);
    assert_eq!(session.rounds(), 1);
    assert_eq!(session.opponent().guesses().len(), 1);
    assert_eq!(session.phase(), Phase::InProgress { turn: Side::Player });
    assert_eq!(
        session.player_board().count(|s| matches!(s, CellState::Hit | CellState::Miss)),
        1
    );

    assert_eq!(session.start(&mut rng), Err(GameError::AlreadyStarted));
    assert_eq!(
        session.place_ship(ShipKind::Carrier, c(0, 9), Orientation::Horizontal),
        Err(GameError::AlreadyStarted)
    );
    assert!(matches!(session.auto_place(&mut rng), Err(GameError::AlreadyStarted)));
}

#[test]
fn test_turns_alternate() {
    let mut rng = SmallRng::seed_from_u64(6);
    let mut session = placed_session(&mut rng);
    session.start(&mut rng).unwrap();
    assert_eq!(session.computer_turn(&mut rng), Err(GameError::OutOfTurn));

    session.player_attack(c(0, 0)).unwrap();
    assert_eq!(session.phase(), Phase::InProgress { turn: Side::Computer });
    assert_eq!(session.player_shots(), 1);
    assert_eq!(session.player_attack(c(1, 1)), Err(GameError::OutOfTurn));

    session.computer_turn(&mut rng).unwrap();
    assert_eq!(session.rounds(), 2);
    assert_eq!(session.phase(), Phase::InProgress { turn: Side::Player });
}

#[test]
fn test_repeat_shot_keeps_turn() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut session = placed_session(&mut rng);
    session.start(&mut rng).unwrap();

    // find a ship cell so the first shot lands as a hit
    let target = session
        .computer_board()
        .cells()
        .find(|(_, s)| s.ship_kind().is_some())
        .map(|(c, _)| c)
        .unwrap();
    let report = session.player_attack(target).unwrap();
    assert!(matches!(report.outcome, AttackOutcome::Hit { .. }));
    session.computer_turn(&mut rng).unwrap();

    let report = session.player_attack(target).unwrap();
    assert_eq!(report.outcome, AttackOutcome::NoOp);
    assert_eq!(report.to_string(), format!("{} was already hit.", target));
    assert_eq!(session.player_shots(), 1);
    assert_eq!(session.phase(), Phase::InProgress { turn: Side::Player });
}

#[test]
fn test_report_messages() {
    let coord = c(1, 2);
    let report = |attacker: Side, outcome: AttackOutcome, winner: Option<Side>| AttackReport {
        attacker,
        coord,
        outcome,
        winner,
    };
    let hit = AttackOutcome::Hit {
        kind: ShipKind::Cruiser,
        just_sunk: false,
    };
    let sunk = AttackOutcome::Hit {
        kind: ShipKind::Cruiser,
        just_sunk: true,
    };
    assert_eq!(report(Side::Player, hit, None).to_string(), "B3 was a hit!");
    assert_eq!(report(Side::Player, AttackOutcome::Miss, None).to_string(), "B3 was a miss!");
    assert_eq!(report(Side::Player, sunk, None).to_string(), "Cruiser was sunk!");
    assert_eq!(report(Side::Player, sunk, Some(Side::Player)).to_string(), "You win!!");
    assert_eq!(report(Side::Computer, hit, None).to_string(), "The computer hit Cruiser");
    assert_eq!(report(Side::Computer, AttackOutcome::Miss, None).to_string(), "The computer missed!");
    assert_eq!(
        report(Side::Computer, sunk, Some(Side::Computer)).to_string(),
        "The computer wins..."
    );
}

#[test]
fn test_finished_game_rejects_moves() {
    let mut rng = SmallRng::seed_from_u64(8);
    let (mut session, summary) = autoplay(&mut rng).unwrap();
    assert_eq!(session.winner(), Some(summary.winner));
    assert_eq!(session.player_attack(c(0, 0)), Err(GameError::GameOver));
    assert_eq!(session.computer_turn(&mut rng), Err(GameError::GameOver));
    assert_eq!(session.start(&mut rng), Err(GameError::GameOver));
}

#[test]
fn test_player_can_win() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut session = placed_session(&mut rng);
    session.start(&mut rng).unwrap();
    let targets: Vec<Coordinate> = session
        .computer_board()
        .cells()
        .filter(|(_, s)| s.ship_kind().is_some())
        .map(|(c, _)| c)
        .collect();
    let mut last = None;
    for coord in targets {
        if session.is_over() {
            break;
        }
        last = Some(session.player_attack(coord).unwrap());
        if !session.is_over() {
            session.computer_turn(&mut rng).unwrap();
        }
    }
    // only a flawless computer can win this race
    if session.winner() == Some(Side::Player) {
        let last = last.unwrap();
        assert_eq!(last.winner, Some(Side::Player));
        assert_eq!(last.to_string(), "You win!!");
        assert_eq!(session.player_shots(), 17);
        assert!(session.computer_fleet().is_defeated());
    } else {
        assert!(session.player_fleet().is_defeated());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn autoplay_reaches_a_winner(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (session, summary) = autoplay(&mut rng).unwrap();
        let loser = match summary.winner {
            Side::Player => session.computer_fleet(),
            Side::Computer => session.player_fleet(),
        };
        prop_assert!(loser.is_defeated());
        prop_assert_eq!(session.phase(), Phase::Finished { winner: summary.winner });
        prop_assert!(summary.rounds <= 100);
        prop_assert!(summary.player_shots <= 100);
        prop_assert_eq!(session.opponent().guesses().len(), summary.rounds as usize);
    }

    #[test]
    fn player_view_never_shows_ships(seed in any::<u64>(), shots in 0usize..60) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut session = GameSession::new(&mut rng).unwrap();
        session.auto_place(&mut rng).unwrap();
        session.start(&mut rng).unwrap();
        let mut shooter = OpponentPolicy::new();
        for _ in 0..shots {
            if session.is_over() {
                break;
            }
            let coord = shooter.next_guess(&mut rng).unwrap();
            session.player_attack(coord).unwrap();
            if !session.is_over() {
                session.computer_turn(&mut rng).unwrap();
            }
        }
        let view = session.computer_view();
        prop_assert_eq!(view.count(|s| matches!(s, CellState::Ship(_))), 0);
        prop_assert!(session.player_fleet().is_consistent());
        prop_assert!(session.computer_fleet().is_consistent());
    }
}
