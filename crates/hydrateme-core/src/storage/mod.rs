mod config;
pub mod database;
mod state;

pub use config::{AppConfig, NotificationsConfig, OnboardingConfig, QuickAddConfig, TipsConfig};
pub use database::Database;
pub use state::{StateStore, Theme, STATE_KEY, THEME_KEY};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/hydrateme[-dev]/` based on HYDRATEME_ENV.
///
/// Set HYDRATEME_ENV=dev to use development data directory, or
/// HYDRATEME_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("HYDRATEME_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HYDRATEME_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("hydrateme-dev")
            } else {
                base_dir.join("hydrateme")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
