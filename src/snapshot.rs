//! Save, load and clear the one persisted game.

use std::fmt;
use std::io;
use std::str::FromStr;

use bincode::Options;

use crate::engine::{GameSession, SessionState};
use crate::storage::SnapshotStore;

/// Upper bound on an encoded snapshot; anything larger is treated as corrupt.
pub const MAX_SNAPSHOT_BYTES: u64 = 64 * 1024;

/// Encoding used for the stored blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotFormat {
    /// Human-readable text, the default.
    #[default]
    Json,
    /// Compact binary.
    Bincode,
}

impl FromStr for SnapshotFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(SnapshotFormat::Json),
            "bincode" | "binary" => Ok(SnapshotFormat::Bincode),
            other => Err(format!("unknown snapshot format '{}' (expected json or bincode)", other)),
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotFormat::Json => f.write_str("json"),
            SnapshotFormat::Bincode => f.write_str("bincode"),
        }
    }
}

/// Errors from the save slot. The running session is never touched when
/// one of these is returned.
#[derive(Debug)]
pub enum SaveError {
    /// Nothing stored under the save key.
    NoSavedGame,
    /// Stored data could not be decoded or describes an impossible game.
    CorruptSave(String),
    /// The store itself failed.
    Storage(io::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::NoSavedGame => write!(f, "There is no saved game to load."),
            SaveError::CorruptSave(reason) => write!(f, "The saved game is corrupt: {}", reason),
            SaveError::Storage(e) => write!(f, "Save storage failed: {}", e),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SaveError {
    fn from(e: io::Error) -> Self {
        SaveError::Storage(e)
    }
}

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_SNAPSHOT_BYTES)
}

/// Serialize the whole session.
pub fn encode(session: &GameSession, format: SnapshotFormat) -> Result<Vec<u8>, SaveError> {
    let state = SessionState::from(session);
    let blob = match format {
        SnapshotFormat::Json => serde_json::to_vec(&state)
            .map_err(|e| SaveError::Storage(io::Error::new(io::ErrorKind::InvalidData, e)))?,
        SnapshotFormat::Bincode => bincode_options()
            .serialize(&state)
            .map_err(|e| SaveError::Storage(io::Error::new(io::ErrorKind::InvalidData, e)))?,
    };
    Ok(blob)
}

/// Decode and validate a blob produced by [`encode`].
pub fn decode(blob: &[u8], format: SnapshotFormat) -> Result<GameSession, SaveError> {
    if blob.len() as u64 > MAX_SNAPSHOT_BYTES {
        return Err(SaveError::CorruptSave(format!("{} bytes exceeds the size limit", blob.len())));
    }
    let state: SessionState = match format {
        SnapshotFormat::Json => {
            serde_json::from_slice(blob).map_err(|e| SaveError::CorruptSave(e.to_string()))?
        }
        SnapshotFormat::Bincode => bincode_options()
            .deserialize(blob)
            .map_err(|e| SaveError::CorruptSave(e.to_string()))?,
    };
    GameSession::try_from(state).map_err(|e| SaveError::CorruptSave(e.to_string()))
}

/// Overwrite the slot under `key` with `session`.
pub fn save_game(
    store: &mut dyn SnapshotStore,
    key: &str,
    format: SnapshotFormat,
    session: &GameSession,
) -> Result<(), SaveError> {
    let blob = encode(session, format)?;
    store.write(key, &blob)?;
    log::info!("saved game under '{}' ({} bytes, {})", key, blob.len(), format);
    Ok(())
}

/// Read back the session stored under `key`.
pub fn load_game(
    store: &dyn SnapshotStore,
    key: &str,
    format: SnapshotFormat,
) -> Result<GameSession, SaveError> {
    let blob = store.read(key)?.ok_or(SaveError::NoSavedGame)?;
    let session = decode(&blob, format).map_err(|e| {
        log::warn!("rejected saved game under '{}': {}", key, e);
        e
    })?;
    log::info!("loaded game from '{}'", key);
    Ok(session)
}

/// Remove the slot under `key`.
pub fn clear_save(store: &mut dyn SnapshotStore, key: &str) -> Result<(), SaveError> {
    store.remove(key)?;
    log::info!("cleared saved game '{}'", key);
    Ok(())
}
