//! Computer targeting: random hunting, with a single forced probe next to
//! the last non-sinking hit.

use rand::Rng;

use super::bitboard::GuessSet;
use super::board::Board;
use super::common::{AttackOutcome, Coordinate};
use super::config::BOARD_SIZE;

/// Neighbour probe order after a hit: down, up, right, left.
const PROBE_ORDER: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyMode {
    /// No forced coordinate queued; guesses are random.
    Hunting,
    /// A probe next to the last hit is queued for the next guess.
    Targeting,
}

/// Forced coordinate for the next guess. Each axis is consumed and cleared
/// on its own when the next guess is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingProbe {
    pub col: Option<u8>,
    pub row: Option<u8>,
}

impl PendingProbe {
    pub fn at(coord: Coordinate) -> Self {
        Self {
            col: Some(coord.col()),
            row: Some(coord.row()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.col.is_none() && self.row.is_none()
    }

    pub fn is_valid(&self) -> bool {
        self.col.map_or(true, |c| c < BOARD_SIZE) && self.row.map_or(true, |r| r < BOARD_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpponentPolicy {
    guesses: GuessSet,
    pending: PendingProbe,
}

impl OpponentPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a policy from saved parts.
    pub fn from_parts(guesses: GuessSet, pending: PendingProbe) -> Self {
        Self { guesses, pending }
    }

    pub fn mode(&self) -> PolicyMode {
        if self.pending.is_empty() {
            PolicyMode::Hunting
        } else {
            PolicyMode::Targeting
        }
    }

    pub fn guesses(&self) -> &GuessSet {
        &self.guesses
    }

    pub fn pending(&self) -> PendingProbe {
        self.pending
    }

    /// Draw and record the next guess. A queued probe axis overrides the
    /// random draw for that axis; a coordinate already tried is replaced by
    /// fresh random draws until an unused one turns up. `None` once every
    /// cell has been tried.
    pub fn next_guess<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coordinate> {
        if self.guesses.is_full() {
            return None;
        }
        let mut col = rng.random_range(0..BOARD_SIZE);
        let mut row = rng.random_range(0..BOARD_SIZE);
        if let Some(c) = self.pending.col.take() {
            col = c;
        }
        if let Some(r) = self.pending.row.take() {
            row = r;
        }
        let mut guess = Coordinate::new(col, row).ok()?;
        while self.guesses.contains(guess) {
            guess = Coordinate::new(
                rng.random_range(0..BOARD_SIZE),
                rng.random_range(0..BOARD_SIZE),
            )
            .ok()?;
        }
        self.guesses.insert(guess);
        log::trace!("computer guess {} ({} tried)", guess, self.guesses.len());
        Some(guess)
    }

    /// Feed back the outcome of the guess at `coord`. A hit that did not sink
    /// its ship queues the first neighbour still showing a ship on `target`.
    /// A neighbour off the grid falls back onto the hit cell itself, which is
    /// never a candidate.
    pub fn observe(&mut self, coord: Coordinate, outcome: AttackOutcome, target: &Board) {
        if !matches!(outcome, AttackOutcome::Hit { just_sunk: false, .. }) {
            return;
        }
        let probe = PROBE_ORDER
            .iter()
            .map(|&(dc, dr)| coord.offset(dc, dr).unwrap_or(coord))
            .find(|c| target.cell(*c).ship_kind().is_some());
        if let Some(next) = probe {
            log::debug!("computer targeting {} after hit at {}", next, coord);
            self.pending = PendingProbe::at(next);
        }
    }
}
