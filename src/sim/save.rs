/// Save and load a game in progress: one named JSON slot.
///
/// ## File format
///
/// ```json
/// {"speed":200,"gridSize":45,"score":3,"highScore":12,
///  "snake":[{"x":11,"y":10},{"x":10,"y":10}],
///  "direction":{"x":1,"y":0},"food":{"x":5,"y":5}}
/// ```
///
/// No schema version. Anything missing, unreadable or malformed loads as
/// "no saved session". Whether the snapshot fits the current grid is
/// checked by the session on restore, not here.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::direction::Direction;
use crate::domain::grid::Coord;

pub const DEFAULT_SAVE_FILE: &str = "snake_save.json";

/// Snapshot of a running game as plain data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    /// Tick period in milliseconds.
    pub speed: u64,
    /// Grid density the grid was derived with.
    pub grid_size: u32,
    pub score: u32,
    pub high_score: u32,
    /// Head first.
    pub snake: Vec<Coord>,
    pub direction: Direction,
    pub food: Coord,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn encode(session: &SavedSession) -> Result<String, SaveError> {
    Ok(serde_json::to_string(session)?)
}

pub fn decode(text: &str) -> Result<SavedSession, SaveError> {
    Ok(serde_json::from_str(text)?)
}

// ══════════════════════════════════════════════════════════════
// Slot
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct SaveSlot {
    path: PathBuf,
}

impl SaveSlot {
    /// Slot named `file_name` inside the first usable save directory.
    pub fn locate(file_name: &str) -> Self {
        let name = Path::new(file_name);
        if name.is_absolute() {
            return SaveSlot::at(name);
        }
        SaveSlot::at(data_dir().join(name))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        SaveSlot { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn write(&self, session: &SavedSession) -> Result<(), SaveError> {
        let text = encode(session)?;
        std::fs::write(&self.path, text).map_err(|source| SaveError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!("saved session to {}", self.path.display());
        Ok(())
    }

    pub fn read(&self) -> Result<SavedSession, SaveError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| SaveError::Io {
            path: self.path.clone(),
            source,
        })?;
        decode(&text)
    }

    /// Read, mapping every failure to `None`.
    pub fn load(&self) -> Option<SavedSession> {
        match self.read() {
            Ok(s) => Some(s),
            Err(SaveError::Io { ref source, .. }) if source.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("ignoring saved session: {e}");
                None
            }
        }
    }
}

/// First usable directory for the save slot and the log file.
pub fn data_dir() -> PathBuf {
    // 1. Exe directory, when writable (portable installs)
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            let probe = parent.join(".write_test_snake");
            if std::fs::write(&probe, "").is_ok() {
                let _ = std::fs::remove_file(&probe);
                return parent.to_path_buf();
            }
        }
    }

    // 2. XDG data home for system installs
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/snake");
        if std::fs::create_dir_all(&xdg).is_ok() {
            return xdg;
        }
    }

    // 3. CWD
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
