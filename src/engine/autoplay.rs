//! Computer-vs-computer matches, used by the `sim` binary and for
//! reproducible full-game runs.

use rand::Rng;

use super::common::{GameError, Side};
use super::opponent::OpponentPolicy;
use super::session::GameSession;

/// Result of a finished automatic match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSummary {
    pub winner: Side,
    pub rounds: u32,
    pub player_shots: u32,
}

/// Play a whole match with a stand-in policy firing for the player.
/// Returns the finished session alongside its summary.
pub fn autoplay<R: Rng + ?Sized>(rng: &mut R) -> Result<(GameSession, MatchSummary), GameError> {
    let mut session = GameSession::new(rng)?;
    session.auto_place(rng)?;
    let mut stand_in = OpponentPolicy::new();

    session.start(rng)?;
    while !session.is_over() {
        let coord = stand_in.next_guess(rng).ok_or(GameError::GameOver)?;
        let report = session.player_attack(coord)?;
        stand_in.observe(coord, report.outcome, session.computer_board());
        if session.is_over() {
            break;
        }
        session.computer_turn(rng)?;
    }

    let winner = session.winner().ok_or(GameError::GameOver)?;
    let summary = MatchSummary {
        winner,
        rounds: session.rounds(),
        player_shots: session.player_shots(),
    };
    Ok((session, summary))
}
