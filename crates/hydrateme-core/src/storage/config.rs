//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Quick-add button amounts
//! - Onboarding defaults
//! - Notification toggles
//! - Hydration tips
//!
//! Configuration is stored at `~/.config/hydrateme/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Quick-add buttons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickAddConfig {
    #[serde(default = "default_quick_amounts")]
    pub amounts: Vec<u32>,
}

/// Onboarding defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingConfig {
    #[serde(default = "default_goal_ml")]
    pub default_goal_ml: u32,
    #[serde(default = "default_name")]
    pub default_name: String,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub goal_reached: bool,
    #[serde(default = "default_true")]
    pub badges: bool,
}

/// Hydration tips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/hydrateme/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub quick_add: QuickAddConfig,
    #[serde(default)]
    pub onboarding: OnboardingConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub tips: TipsConfig,
}

fn default_quick_amounts() -> Vec<u32> {
    vec![250, 500, 750]
}
fn default_goal_ml() -> u32 {
    2000
}
fn default_name() -> String {
    crate::goal::DEFAULT_NAME.into()
}
fn default_true() -> bool {
    true
}

impl Default for QuickAddConfig {
    fn default() -> Self {
        Self {
            amounts: default_quick_amounts(),
        }
    }
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            default_goal_ml: default_goal_ml(),
            default_name: default_name(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            goal_reached: true,
            badges: true,
        }
    }
}

impl Default for TipsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.clone(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// as the key's type.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Quick-add amounts with non-positive entries dropped.
    pub fn quick_amounts(&self) -> Vec<u32> {
        self.quick_add
            .amounts
            .iter()
            .copied()
            .filter(|a| *a > 0)
            .collect()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("using default config: {e}");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = AppConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.quick_add.amounts, vec![250, 500, 750]);
        assert_eq!(parsed.onboarding.default_goal_ml, 2000);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: AppConfig = toml::from_str("[notifications]\nbadges = false\n").unwrap();
        assert!(!parsed.notifications.badges);
        assert!(parsed.notifications.enabled);
        assert!(parsed.tips.enabled);
        assert_eq!(parsed.onboarding.default_name, "Hydration Hero");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("tips.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("onboarding.default_goal_ml").as_deref(), Some("2000"));
        assert_eq!(cfg.get("quick_add.amounts").as_deref(), Some("[250,500,750]"));
        assert!(cfg.get("tips.missing_key").is_none());
    }

    #[test]
    fn apply_updates_typed_values() {
        let mut cfg = AppConfig::default();
        cfg.apply("notifications.goal_reached", "false").unwrap();
        cfg.apply("onboarding.default_goal_ml", "2400").unwrap();
        cfg.apply("onboarding.default_name", "Otter").unwrap();
        cfg.apply("quick_add.amounts", "[100, 330]").unwrap();

        assert!(!cfg.notifications.goal_reached);
        assert_eq!(cfg.onboarding.default_goal_ml, 2400);
        assert_eq!(cfg.onboarding.default_name, "Otter");
        assert_eq!(cfg.quick_add.amounts, vec![100, 330]);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = AppConfig::default();
        assert!(matches!(
            cfg.apply("tips.nonexistent", "true"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.apply("", "true"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = AppConfig::default();
        assert!(matches!(
            cfg.apply("tips.enabled", "sometimes"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.apply("onboarding.default_goal_ml", "-5").is_err());
        assert!(cfg.tips.enabled);
    }

    #[test]
    fn quick_amounts_skip_zero() {
        let mut cfg = AppConfig::default();
        cfg.quick_add.amounts = vec![0, 250];
        assert_eq!(cfg.quick_amounts(), vec![250]);
    }
}
