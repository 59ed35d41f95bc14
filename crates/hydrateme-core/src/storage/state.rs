//! Persistence gateway for the tracker's two key-value slots.
//!
//! - `hydrateMeState`: the whole [`HydrationState`] as one JSON blob
//! - `hydrateMeTheme`: `"dark"` or `"light"`
//!
//! Reads never fail: an absent, unreadable or corrupt slot is logged and
//! reported as "no prior state" so the caller starts fresh.

use serde::{Deserialize, Serialize};

use super::database::Database;
use crate::error::{CoreError, PersistenceError};
use crate::tracker::HydrationState;

pub const STATE_KEY: &str = "hydrateMeState";
pub const THEME_KEY: &str = "hydrateMeTheme";

/// Display theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Reads and writes the tracker's slots.
pub struct StateStore {
    db: Database,
}

impl StateStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Store at the default data directory.
    pub fn open() -> Result<Self, CoreError> {
        Ok(Self::new(Database::open()?))
    }

    /// In-memory store (for tests).
    pub fn open_memory() -> Result<Self, CoreError> {
        Ok(Self::new(Database::open_memory()?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Load the state record, or `None` if there is nothing usable.
    pub fn load_state(&self) -> Option<HydrationState> {
        match self.try_load_state() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("discarding stored state: {e}");
                None
            }
        }
    }

    /// Load the state record, surfacing why it could not be read.
    pub fn try_load_state(&self) -> Result<Option<HydrationState>, PersistenceError> {
        let raw = self
            .db
            .kv_get(STATE_KEY)
            .map_err(|e| PersistenceError::ReadFailed {
                key: STATE_KEY.to_string(),
                message: e.to_string(),
            })?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let state = serde_json::from_str(&raw).map_err(|source| PersistenceError::Corrupt {
            key: STATE_KEY.to_string(),
            source,
        })?;
        Ok(Some(state))
    }

    pub fn save_state(&self, state: &HydrationState) -> Result<(), PersistenceError> {
        let write_failed = |message: String| PersistenceError::WriteFailed {
            key: STATE_KEY.to_string(),
            message,
        };
        let json = serde_json::to_string(state).map_err(|e| write_failed(e.to_string()))?;
        self.db
            .kv_set(STATE_KEY, &json)
            .map_err(|e| write_failed(e.to_string()))
    }

    /// Remove the state record so the next start onboards again.
    pub fn clear_state(&self) -> Result<(), PersistenceError> {
        self.db
            .kv_delete(STATE_KEY)
            .map_err(|e| PersistenceError::WriteFailed {
                key: STATE_KEY.to_string(),
                message: e.to_string(),
            })
    }

    /// Stored theme, defaulting to light when unset or unreadable.
    pub fn load_theme(&self) -> Theme {
        match self.db.kv_get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("ignoring stored theme: {e}");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!("failed to read theme: {e}");
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), PersistenceError> {
        self.db
            .kv_set(THEME_KEY, theme.as_str())
            .map_err(|e| PersistenceError::WriteFailed {
                key: THEME_KEY.to_string(),
                message: e.to_string(),
            })
    }
}
