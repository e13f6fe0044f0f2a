//! A single match: placement, the alternating turn loop and the win check.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use super::attack::resolve_attack;
use super::bitboard::GuessSet;
use super::board::{Board, CellState};
use super::common::{AttackOutcome, Coordinate, GameError, Side};
use super::config::NUM_SHIPS;
use super::fleet::Fleet;
use super::opponent::{OpponentPolicy, PendingProbe};
use super::placement;
use super::ship::{Orientation, ShipKind};

/// Where the match currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// The player is laying out ships.
    Placement,
    /// Shots are being exchanged; `turn` is due to fire next.
    InProgress { turn: Side },
    Finished { winner: Side },
}

/// Accepted placement of one ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementReport {
    pub kind: ShipKind,
    pub orientation: Orientation,
    pub coords: Vec<Coordinate>,
    /// Player ships still unplaced.
    pub remaining: usize,
}

impl fmt::Display for PlacementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.orientation {
            Orientation::Horizontal => "horizontally",
            Orientation::Vertical => "vertically",
        };
        write!(f, "{} placed at {} {}.", self.kind, self.coords[0], dir)?;
        match self.remaining {
            0 => write!(f, " All ships placed, start the game when ready."),
            1 => write!(f, " 1 ship left to place."),
            n => write!(f, " {} ships left to place.", n),
        }
    }
}

/// One resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: Side,
    pub coord: Coordinate,
    pub outcome: AttackOutcome,
    /// Set when this shot ended the match.
    pub winner: Option<Side>,
}

impl fmt::Display for AttackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.attacker, self.winner, self.outcome) {
            (Side::Player, Some(_), _) => write!(f, "You win!!"),
            (Side::Computer, Some(_), _) => write!(f, "The computer wins..."),
            (_, None, AttackOutcome::Hit { kind, just_sunk: true }) => write!(f, "{} was sunk!", kind),
            (Side::Player, None, AttackOutcome::Hit { .. }) => write!(f, "{} was a hit!", self.coord),
            (Side::Player, None, AttackOutcome::Miss) => write!(f, "{} was a miss!", self.coord),
            (Side::Player, None, AttackOutcome::NoOp) => write!(f, "{} was already hit.", self.coord),
            (Side::Computer, None, AttackOutcome::Hit { kind, .. }) => {
                write!(f, "The computer hit {}", kind)
            }
            (Side::Computer, None, AttackOutcome::Miss) => write!(f, "The computer missed!"),
            (Side::Computer, None, AttackOutcome::NoOp) => {
                write!(f, "The computer fired at {} again", self.coord)
            }
        }
    }
}

/// Full state of one match. Replaced wholesale on "new game".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    player_board: Board,
    computer_board: Board,
    player_fleet: Fleet,
    computer_fleet: Fleet,
    opponent: OpponentPolicy,
    phase: Phase,
    rounds: u32,
    player_shots: u32,
}

impl GameSession {
    /// Fresh match with the computer fleet deployed at random and the
    /// player's fleet waiting for placement.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, GameError> {
        let mut computer_board = Board::new();
        let mut computer_fleet = Fleet::new(Side::Computer);
        for i in 0..NUM_SHIPS {
            let ship = &computer_fleet.ships()[i];
            let kind = ship.kind();
            let (start, orientation) = placement::random_placement(rng, &computer_board, ship)?;
            deploy(&mut computer_board, &mut computer_fleet, kind, start, orientation)?;
        }
        log::debug!("computer fleet deployed");
        Ok(Self {
            player_board: Board::new(),
            computer_board,
            player_fleet: Fleet::new(Side::Player),
            computer_fleet,
            opponent: OpponentPolicy::new(),
            phase: Phase::Placement,
            rounds: 0,
            player_shots: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    /// Internal truth of the computer board, ships included.
    pub fn computer_board(&self) -> &Board {
        &self.computer_board
    }

    /// The computer board as the player is allowed to see it.
    pub fn computer_view(&self) -> Board {
        self.computer_board.masked()
    }

    pub fn player_fleet(&self) -> &Fleet {
        &self.player_fleet
    }

    pub fn computer_fleet(&self) -> &Fleet {
        &self.computer_fleet
    }

    pub fn opponent(&self) -> &OpponentPolicy {
        &self.opponent
    }

    /// Number of computer shots fired so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn player_shots(&self) -> u32 {
        self.player_shots
    }

    /// Place one of the player's ships.
    pub fn place_ship(
        &mut self,
        kind: ShipKind,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<PlacementReport, GameError> {
        if self.phase != Phase::Placement {
            return Err(GameError::AlreadyStarted);
        }
        let coords = deploy(
            &mut self.player_board,
            &mut self.player_fleet,
            kind,
            start,
            orientation,
        )?;
        Ok(PlacementReport {
            kind,
            orientation,
            coords,
            remaining: NUM_SHIPS - self.player_fleet.placed_count(),
        })
    }

    /// Randomly place every player ship not yet on the board.
    pub fn auto_place<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<PlacementReport>, GameError> {
        if self.phase != Phase::Placement {
            return Err(GameError::AlreadyStarted);
        }
        let pending: Vec<ShipKind> = self.player_fleet.unplaced().collect();
        let mut reports = Vec::with_capacity(pending.len());
        for kind in pending {
            let (start, orientation) =
                placement::random_placement(rng, &self.player_board, self.player_fleet.ship(kind))?;
            reports.push(self.place_ship(kind, start, orientation)?);
        }
        Ok(reports)
    }

    /// Begin the match. The computer fires the opening shot.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<AttackReport, GameError> {
        match self.phase {
            Phase::Placement => {}
            Phase::InProgress { .. } => return Err(GameError::AlreadyStarted),
            Phase::Finished { .. } => return Err(GameError::GameOver),
        }
        if !self.player_fleet.all_placed() {
            return Err(GameError::NotYetStarted);
        }
        log::info!("match started");
        self.phase = Phase::InProgress { turn: Side::Computer };
        self.computer_turn(rng)
    }

    /// The player fires at `coord` on the computer board. Firing at a cell
    /// that is already hit changes nothing and keeps the turn.
    pub fn player_attack(&mut self, coord: Coordinate) -> Result<AttackReport, GameError> {
        self.expect_turn(Side::Player)?;
        let outcome = resolve_attack(&mut self.computer_board, &mut self.computer_fleet, coord);
        if outcome == AttackOutcome::NoOp {
            return Ok(AttackReport {
                attacker: Side::Player,
                coord,
                outcome,
                winner: None,
            });
        }
        self.player_shots += 1;
        Ok(self.finish_turn(Side::Player, coord, outcome))
    }

    /// The computer fires its next guess at the player board.
    pub fn computer_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<AttackReport, GameError> {
        self.expect_turn(Side::Computer)?;
        let coord = self.opponent.next_guess(rng).ok_or(GameError::GameOver)?;
        let outcome = resolve_attack(&mut self.player_board, &mut self.player_fleet, coord);
        self.opponent.observe(coord, outcome, &self.player_board);
        self.rounds += 1;
        Ok(self.finish_turn(Side::Computer, coord, outcome))
    }

    fn expect_turn(&self, side: Side) -> Result<(), GameError> {
        match self.phase {
            Phase::Placement => Err(GameError::NotYetStarted),
            Phase::Finished { .. } => Err(GameError::GameOver),
            Phase::InProgress { turn } if turn == side => Ok(()),
            Phase::InProgress { .. } => Err(GameError::OutOfTurn),
        }
    }

    fn finish_turn(&mut self, attacker: Side, coord: Coordinate, outcome: AttackOutcome) -> AttackReport {
        let defender = match attacker {
            Side::Player => &self.computer_fleet,
            Side::Computer => &self.player_fleet,
        };
        let winner = defender.is_defeated().then_some(attacker);
        self.phase = match winner {
            Some(winner) => {
                log::info!("{:?} wins after {} rounds", winner, self.rounds);
                Phase::Finished { winner }
            }
            None => Phase::InProgress {
                turn: attacker.opponent(),
            },
        };
        AttackReport {
            attacker,
            coord,
            outcome,
            winner,
        }
    }
}

/// Validate and write one ship onto a board and its fleet.
fn deploy(
    board: &mut Board,
    fleet: &mut Fleet,
    kind: ShipKind,
    start: Coordinate,
    orientation: Orientation,
) -> Result<Vec<Coordinate>, GameError> {
    let coords = placement::validate(board, fleet.ship(kind), start, orientation)?;
    fleet.place_ship(kind, coords.clone())?;
    for &c in &coords {
        board.set_cell(c, CellState::Ship(kind));
    }
    log::debug!("{:?} {} placed at {} {:?}", fleet.side(), kind, start, orientation);
    Ok(coords)
}

/// Plain-data form of a session, suitable for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub player_board: Board,
    pub computer_board: Board,
    pub player_fleet: Fleet,
    pub computer_fleet: Fleet,
    pub computer_guesses: Vec<Coordinate>,
    pub probe_col: Option<u8>,
    pub probe_row: Option<u8>,
    pub phase: Phase,
    pub rounds: u32,
    pub player_shots: u32,
}

/// A `SessionState` that no reachable game could have produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSession(pub &'static str);

impl fmt::Display for InvalidSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inconsistent session: {}", self.0)
    }
}

impl From<&GameSession> for SessionState {
    fn from(s: &GameSession) -> Self {
        let pending = s.opponent.pending();
        SessionState {
            player_board: s.player_board.clone(),
            computer_board: s.computer_board.clone(),
            player_fleet: s.player_fleet.clone(),
            computer_fleet: s.computer_fleet.clone(),
            computer_guesses: s.opponent.guesses().iter().collect(),
            probe_col: pending.col,
            probe_row: pending.row,
            phase: s.phase,
            rounds: s.rounds,
            player_shots: s.player_shots,
        }
    }
}

impl TryFrom<SessionState> for GameSession {
    type Error = InvalidSession;

    fn try_from(state: SessionState) -> Result<Self, Self::Error> {
        if state.player_fleet.side() != Side::Player || state.computer_fleet.side() != Side::Computer {
            return Err(InvalidSession("fleet sides swapped"));
        }
        check_side(&state.player_board, &state.player_fleet)?;
        check_side(&state.computer_board, &state.computer_fleet)?;
        if !state.computer_fleet.all_placed() {
            return Err(InvalidSession("computer fleet not deployed"));
        }

        let player_defeated = state.player_fleet.is_defeated();
        let computer_defeated = state.computer_fleet.is_defeated();
        let phase_ok = match state.phase {
            Phase::Placement => {
                state.computer_guesses.is_empty() && !player_defeated && !computer_defeated
            }
            Phase::InProgress { .. } => {
                state.player_fleet.all_placed() && !player_defeated && !computer_defeated
            }
            Phase::Finished { winner: Side::Player } => computer_defeated,
            Phase::Finished { winner: Side::Computer } => player_defeated,
        };
        if !phase_ok {
            return Err(InvalidSession("phase disagrees with fleets"));
        }

        let guesses: GuessSet = state.computer_guesses.iter().copied().collect();
        if guesses.len() != state.computer_guesses.len() {
            return Err(InvalidSession("duplicate computer guess"));
        }
        let untracked = state
            .player_board
            .cells()
            .any(|(c, s)| matches!(s, CellState::Hit | CellState::Miss) && !guesses.contains(c));
        if untracked {
            return Err(InvalidSession("player board shot not in guess history"));
        }
        let unmarked = guesses
            .iter()
            .any(|c| !matches!(state.player_board.cell(c), CellState::Hit | CellState::Miss));
        if unmarked {
            return Err(InvalidSession("computer guess left no mark on the board"));
        }
        let pending = PendingProbe {
            col: state.probe_col,
            row: state.probe_row,
        };
        if !pending.is_valid() {
            return Err(InvalidSession("probe outside the grid"));
        }

        Ok(GameSession {
            player_board: state.player_board,
            computer_board: state.computer_board,
            player_fleet: state.player_fleet,
            computer_fleet: state.computer_fleet,
            opponent: OpponentPolicy::from_parts(guesses, pending),
            phase: state.phase,
            rounds: state.rounds,
            player_shots: state.player_shots,
        })
    }
}

/// Board cells and fleet must describe the same ships and damage.
fn check_side(board: &Board, fleet: &Fleet) -> Result<(), InvalidSession> {
    if !fleet.is_consistent() {
        return Err(InvalidSession("fleet counters disagree with ships"));
    }
    let mut occupied = GuessSet::new();
    let mut total_hits = 0;
    for ship in fleet.ships().iter().filter(|s| s.is_placed()) {
        if placement::line_orientation(ship.coords(), ship.size()).is_none() {
            return Err(InvalidSession("ship is not a straight run"));
        }
        if !ship.coords().iter().all(|&c| occupied.insert(c)) {
            return Err(InvalidSession("ships share a cell"));
        }
        let mut hit_cells = 0;
        for &c in ship.coords() {
            match board.cell(c) {
                CellState::Hit => hit_cells += 1,
                state if state.ship_kind() == Some(ship.kind()) => {}
                _ => return Err(InvalidSession("ship cell missing from board")),
            }
        }
        if hit_cells != ship.hits() {
            return Err(InvalidSession("hit count disagrees with board"));
        }
        total_hits += hit_cells;
    }
    let stray_ship = board
        .cells()
        .any(|(c, s)| s.ship_kind().is_some_and(|k| !fleet.ship(k).occupies(c)));
    if stray_ship {
        return Err(InvalidSession("board shows a ship the fleet does not own"));
    }
    if board.count(|s| s == CellState::Hit) != total_hits {
        return Err(InvalidSession("stray hit on board"));
    }
    Ok(())
}
