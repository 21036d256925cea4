//! Engine configuration loaded from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Application version
    #[serde(default = "default_version")]
    pub version: String,
    /// Rep engine timing settings
    #[serde(default)]
    pub timing: TimingSettings,
    /// Shadow provider settings
    #[serde(default)]
    pub shadow: ShadowSettings,
    /// Analytics settings
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            timing: TimingSettings::default(),
            shadow: ShadowSettings::default(),
            analysis: AnalysisSettings::default(),
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Rep engine timing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingSettings {
    /// Consecutive lost-tracking frames before an open rep is abandoned
    pub abandon_streak: u32,
    /// Size of the recent rep duration window
    pub recent_window: usize,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            abandon_streak: 15,
            recent_window: 8,
        }
    }
}

/// Shadow provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadowSettings {
    /// Maximum tolerated timestamp skew in seconds
    pub max_skew_sec: f64,
    /// Minimum proxy hold inside an active rep, in seconds
    pub sticky_window_sec: f64,
    /// Sample count of the disagreement window
    pub disagreement_window: usize,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            max_skew_sec: crate::shadow::MAX_SKEW_SEC,
            sticky_window_sec: crate::shadow::ACTIVE_REP_STICKY_WINDOW_SEC,
            disagreement_window: 30,
        }
    }
}

/// Analytics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Prior sessions considered for trend context
    pub trend_sessions: usize,
    /// Trailing days used for the heart-rate baseline
    pub heart_rate_window_days: u32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            trend_sessions: 8,
            heart_rate_window_days: 7,
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "repsense", "RepSense")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load configuration from the default location.
///
/// A missing file yields the defaults.
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load configuration from an explicit path.
pub fn load_config_from(path: &Path) -> Result<EngineConfig, ConfigError> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Save configuration to the default location.
pub fn save_config(config: &EngineConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save configuration to an explicit path.
pub fn save_config_to(config: &EngineConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.timing.abandon_streak, 15);
        assert_eq!(config.timing.recent_window, 8);
        assert_eq!(config.shadow.max_skew_sec, 0.4);
        assert_eq!(config.shadow.sticky_window_sec, 0.15);
        assert_eq!(config.shadow.disagreement_window, 30);
        assert_eq!(config.analysis.trend_sessions, 8);
        assert_eq!(config.analysis.heart_rate_window_days, 7);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = EngineConfig::default();
        config.timing.abandon_streak = 20;
        config.shadow.max_skew_sec = 0.25;

        save_config_to(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.timing.abandon_streak, 20);
        assert_eq!(loaded.shadow.max_skew_sec, 0.25);
        assert_eq!(loaded.analysis.trend_sessions, 8);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.timing.abandon_streak, 15);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timing]\nabandon_streak = 9\nrecent_window = 4\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.timing.abandon_streak, 9);
        assert_eq!(config.shadow.disagreement_window, 30);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timing = not toml").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
