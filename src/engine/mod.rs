//! Core battleship game engine (no_std compatible)
//!
//! Pure game logic: boards, fleets, placement, attack resolution, the
//! computer's targeting policy and the session that sequences a match. It
//! needs only `alloc`, `rand` and `num-traits`.

pub mod attack;
pub mod autoplay;
pub mod bitboard;
pub mod board;
pub mod common;
pub mod config;
pub mod fleet;
pub mod opponent;
pub mod placement;
pub mod session;
pub mod ship;

pub use attack::resolve_attack;
pub use autoplay::{autoplay, MatchSummary};
pub use bitboard::{BitBoard, BitBoardError, GuessSet};
pub use board::{Board, CellState, Render};
pub use common::{AttackOutcome, Coordinate, GameError, ParseCoordinateError, Side};
pub use config::*;
pub use fleet::Fleet;
pub use opponent::{OpponentPolicy, PendingProbe, PolicyMode};
pub use placement::{line_orientation, random_placement, validate};
pub use session::{AttackReport, GameSession, InvalidSession, Phase, PlacementReport, SessionState};
pub use ship::{Orientation, Ship, ShipKind};
