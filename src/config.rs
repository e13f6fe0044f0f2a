//! Runtime settings for the interactive game and the simulator.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::snapshot::SnapshotFormat;

/// Key the saved game is stored under.
pub const DEFAULT_SAVE_KEY: &str = "save-game";
/// Pause before the computer answers a player shot.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_SAVE_DIR: &str = ".battleship";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub reply_delay: Duration,
    pub save_dir: PathBuf,
    pub save_key: String,
    pub format: SnapshotFormat,
    /// Fixed RNG seed for reproducible games.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            save_key: DEFAULT_SAVE_KEY.to_string(),
            format: SnapshotFormat::default(),
            seed: None,
        }
    }
}

impl Settings {
    /// Defaults overlaid with `BATTLESHIP_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().overlay(|name| env::var(name).ok())
    }

    /// Apply overrides from `lookup`. Unparsable values are logged and
    /// ignored.
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(ms) = lookup("BATTLESHIP_REPLY_DELAY_MS") {
            match ms.trim().parse::<u64>() {
                Ok(ms) => self.reply_delay = Duration::from_millis(ms),
                Err(_) => log::warn!("ignoring BATTLESHIP_REPLY_DELAY_MS={:?}", ms),
            }
        }
        if let Some(dir) = lookup("BATTLESHIP_SAVE_DIR") {
            self.save_dir = PathBuf::from(dir);
        }
        if let Some(fmt) = lookup("BATTLESHIP_SAVE_FORMAT") {
            match fmt.parse() {
                Ok(format) => self.format = format,
                Err(e) => log::warn!("ignoring BATTLESHIP_SAVE_FORMAT: {}", e),
            }
        }
        if let Some(seed) = lookup("BATTLESHIP_SEED") {
            match seed.trim().parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("ignoring BATTLESHIP_SEED={:?}", seed),
            }
        }
        self
    }
}
