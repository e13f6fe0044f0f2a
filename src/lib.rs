#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod engine;
pub mod prelude;
#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub mod command;
#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
pub mod driver;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod snapshot;
#[cfg(feature = "std")]
pub mod storage;

pub use engine::*;
#[cfg(feature = "std")]
pub use command::Command;
#[cfg(feature = "std")]
pub use config::Settings;
#[cfg(feature = "std")]
pub use driver::{CommandSource, Event, GameDriver, ReplyTimer, ScriptedSource};
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from};
#[cfg(feature = "std")]
pub use snapshot::{SaveError, SnapshotFormat};
#[cfg(feature = "std")]
pub use storage::{FileStore, MemoryStore, SnapshotStore};
