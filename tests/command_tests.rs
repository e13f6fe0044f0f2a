use battleship_solo::{Command, Coordinate, Orientation, ShipKind};

fn c(col: u8, row: u8) -> Coordinate {
    Coordinate::new(col, row).unwrap()
}

#[test]
fn test_parse_place() {
    assert_eq!(
        "place carrier A1 h".parse::<Command>(),
        Ok(Command::Place {
            kind: ShipKind::Carrier,
            start: c(0, 0),
            orientation: Orientation::Horizontal,
        })
    );
    assert_eq!(
        "PLACE sub j7 vertical".parse::<Command>(),
        Ok(Command::Place {
            kind: ShipKind::Submarine,
            start: c(9, 6),
            orientation: Orientation::Vertical,
        })
    );
}

#[test]
fn test_parse_place_errors() {
    assert_eq!(
        "place carrier A1".parse::<Command>(),
        Err("Usage: place <ship> <coord> <h|v>".to_string())
    );
    assert_eq!(
        "place canoe A1 h".parse::<Command>(),
        Err("Unknown ship 'canoe'".to_string())
    );
    assert!("place carrier A1 d".parse::<Command>().is_err());
    assert!("place carrier K1 h".parse::<Command>().is_err());
}

#[test]
fn test_parse_attack() {
    assert_eq!("attack B7".parse::<Command>(), Ok(Command::Attack(c(1, 6))));
    assert_eq!("fire j10".parse::<Command>(), Ok(Command::Attack(c(9, 9))));
    assert_eq!("  c3  ".parse::<Command>(), Ok(Command::Attack(c(2, 2))));
    assert!("attack".parse::<Command>().is_err());
    assert!("attack A11".parse::<Command>().is_err());
    assert!("attack A0".parse::<Command>().is_err());
}

#[test]
fn test_parse_simple_verbs() {
    let cases = [
        ("auto", Command::AutoPlace),
        ("start", Command::Start),
        ("new", Command::NewGame),
        ("restart", Command::NewGame),
        ("save", Command::Save),
        ("load", Command::Load),
        ("clear", Command::ClearSave),
        ("show", Command::Show),
        ("help", Command::Help),
        ("?", Command::Help),
        ("quit", Command::Quit),
        ("Exit", Command::Quit),
    ];
    for (text, expected) in cases {
        assert_eq!(text.parse::<Command>(), Ok(expected), "{}", text);
    }
}

#[test]
fn test_parse_unknown() {
    assert_eq!("".parse::<Command>(), Err("Empty input".to_string()));
    assert_eq!(
        "dance".parse::<Command>(),
        Err("Unknown command 'dance' - type `help`".to_string())
    );
    assert!("save now".parse::<Command>().is_err());
}

#[test]
fn test_coordinate_display_roundtrip() {
    for coord in Coordinate::all() {
        assert_eq!(coord.to_string().parse::<Coordinate>(), Ok(coord));
    }
    assert_eq!(c(1, 6).to_string(), "B7");
    assert_eq!(c(9, 9).to_string(), "J10");
}
