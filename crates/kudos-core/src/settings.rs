//! Configuration for the scoring engine, loaded in layers.
//!
//! Loading flow:
//! 1. Start with compiled [`KudosSettings::default()`]
//! 2. If a settings file exists, merge its values over the defaults
//! 3. Apply `KUDOS_*` environment variable overrides (highest priority)
//!
//! Invalid environment values are silently ignored, falling back to the
//! file value or default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors from settings loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read.
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file contained invalid JSON.
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience type alias for settings results.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Configuration values consumed by the scoring core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KudosSettings {
    /// Bot identity name; also the wallet key.
    pub bot_name: String,
    /// Rolling rate-limit window, in minutes.
    pub spam_window_minutes: i64,
    /// User-visible notice sent to a rate-limited sender.
    pub spam_message: String,
    /// Attribution threshold: suggest peer feedback every N points given
    /// to the same receiver.
    pub further_feedback_suggested_score: i64,
    /// Peer feedback channel embedded in the suggestion text.
    pub peer_feedback_url: String,
}

impl Default for KudosSettings {
    fn default() -> Self {
        Self {
            bot_name: "kudos".to_owned(),
            spam_window_minutes: 5,
            spam_message: "Looks like you hit the spam filter. Please slow your roll.".to_owned(),
            further_feedback_suggested_score: 10,
            peer_feedback_url: "https://feedback.example.com".to_owned(),
        }
    }
}

impl KudosSettings {
    /// Load settings from the default path with env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&settings_path())
    }

    /// Load settings from a specific path with env var overrides.
    ///
    /// If the file does not exist, returns defaults (plus env overrides).
    /// If the file contains invalid JSON, returns an error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let defaults = serde_json::to_value(Self::default())?;

        let merged = if path.exists() {
            debug!(?path, "loading settings from file");
            let content = std::fs::read_to_string(path)?;
            let user: Value = serde_json::from_str(&content)?;
            merge(defaults, user)
        } else {
            debug!(?path, "settings file not found, using defaults");
            defaults
        };

        let mut settings: Self = serde_json::from_value(merged)?;
        apply_env_overrides(&mut settings);
        Ok(settings)
    }
}

/// Resolve the path to the settings file (`~/.kudos/settings.json`).
#[must_use]
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_owned());
    PathBuf::from(home).join(".kudos").join("settings.json")
}

/// Merge two JSON objects, source keys overriding target per-key.
/// Null values in source are skipped, preserving the target value.
fn merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let _ = target_map.insert(key, source_val);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `KUDOS_*` environment variable overrides.
fn apply_env_overrides(settings: &mut KudosSettings) {
    if let Some(v) = read_env_string("KUDOS_BOT_NAME") {
        settings.bot_name = v;
    }
    if let Some(v) = read_env_i64("KUDOS_SPAM_WINDOW_MINUTES", 1, 1440) {
        settings.spam_window_minutes = v;
    }
    if let Some(v) = read_env_string("KUDOS_SPAM_MESSAGE") {
        settings.spam_message = v;
    }
    if let Some(v) = read_env_i64("KUDOS_FEEDBACK_EVERY", 1, 10_000) {
        settings.further_feedback_suggested_score = v;
    }
    if let Some(v) = read_env_string("KUDOS_PEER_FEEDBACK_URL") {
        settings.peer_feedback_url = v;
    }
}

fn read_env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn read_env_i64(key: &str, min: i64, max: i64) -> Option<i64> {
    std::env::var(key)
        .ok()?
        .parse::<i64>()
        .ok()
        .filter(|v| (min..=max).contains(v))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = KudosSettings::default();
        assert_eq!(settings.bot_name, "kudos");
        assert_eq!(settings.spam_window_minutes, 5);
        assert_eq!(settings.further_feedback_suggested_score, 10);
        assert!(!settings.spam_message.is_empty());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let settings = KudosSettings::load_from_path(&path).unwrap();
        assert_eq!(settings, KudosSettings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"bot_name": "karma", "spam_window_minutes": 15}"#,
        )
        .unwrap();
        let settings = KudosSettings::load_from_path(&path).unwrap();
        assert_eq!(settings.bot_name, "karma");
        assert_eq!(settings.spam_window_minutes, 15);
        // Untouched keys keep their defaults.
        assert_eq!(settings.further_feedback_suggested_score, 10);
    }

    #[test]
    fn null_file_values_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"bot_name": null}"#).unwrap();
        let settings = KudosSettings::load_from_path(&path).unwrap();
        assert_eq!(settings.bot_name, "kudos");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(KudosSettings::load_from_path(&path).is_err());
    }

    #[test]
    fn env_parse_rules() {
        // Parsing helpers enforce range and numeric validity without
        // touching process-global env state in tests.
        assert_eq!("15".parse::<i64>().ok().filter(|v| (1..=1440).contains(v)), Some(15));
        assert_eq!("0".parse::<i64>().ok().filter(|v| (1..=1440).contains(v)), None);
        assert_eq!("abc".parse::<i64>().ok(), None);
    }
}
