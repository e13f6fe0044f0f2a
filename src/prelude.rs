//! Commonly used types and utilities for ease of import.

pub use crate::{
    autoplay, Coordinate, GameError, GameSession, Orientation, Phase, ShipKind, Side,
};

#[cfg(feature = "std")]
pub use crate::{Command, Event, GameDriver, MemoryStore, ScriptedSource, Settings, SnapshotFormat};
