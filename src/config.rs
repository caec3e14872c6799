use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::ancestry_gen::{DocumentPaths, HeritageRules};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "ANCESTRY_ROLLER_DATA_DIR";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
    pub generation: GenerationConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Show the "Rolled Details" panel at startup.
    pub show_debug: bool,
}

/// Where the input documents come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
    /// Fetch documents over HTTP from this base URL instead of the data directory.
    pub base_url: Option<String>,
    pub paths: DocumentPaths,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Fixed RNG seed for reproducible rolls.
    pub seed: Option<u64>,
    pub heritage: HeritageRules,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            show_debug: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/ancestry-roller/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved data directory: environment, then config, then XDG default.
    pub fn data_dir(&self) -> PathBuf {
        self.resolve_data_dir(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    fn resolve_data_dir(&self, env_override: Option<PathBuf>) -> PathBuf {
        env_override
            .or_else(|| self.data.data_dir.clone())
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .map(|d| d.join("ancestry-roller"))
                    .unwrap_or_else(|| PathBuf::from("data"))
            })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("ancestry-roller").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tui.tick_rate_ms, 50);
        assert!(!config.tui.show_debug);
        assert!(config.data.data_dir.is_none());
        assert!(config.data.base_url.is_none());
        assert_eq!(config.data.paths.races, "data/races.json");
        assert!(config.generation.seed.is_none());
        assert!(!config.generation.heritage.enabled);
    }

    #[test]
    fn test_config_load_missing_file() {
        // Should return defaults without panicking
        let config = AppConfig::load();
        assert!(config.tui.tick_rate_ms > 0);
    }

    #[test]
    fn test_data_dir_default() {
        let config = AppConfig::default();
        let dir = config.resolve_data_dir(None);
        assert!(dir.to_string_lossy().contains("ancestry-roller") || dir == PathBuf::from("data"));
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = AppConfig::default();
        config.data.data_dir = Some(PathBuf::from("/tmp/custom"));
        assert_eq!(config.resolve_data_dir(None), PathBuf::from("/tmp/custom"));
    }

    #[test]
    fn test_env_beats_config() {
        let mut config = AppConfig::default();
        config.data.data_dir = Some(PathBuf::from("/tmp/custom"));
        assert_eq!(
            config.resolve_data_dir(Some(PathBuf::from("/srv/tables"))),
            PathBuf::from("/srv/tables")
        );
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [data]
            base_url = "https://example.org/roller"

            [data.paths]
            races = "core/races.json"

            [generation]
            seed = 7

            [generation.heritage]
            enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(config.data.base_url.as_deref(), Some("https://example.org/roller"));
        assert_eq!(config.data.paths.races, "core/races.json");
        assert_eq!(config.data.paths.features, "features.json");
        assert_eq!(config.generation.seed, Some(7));
        assert!(config.generation.heritage.enabled);
        assert_eq!(config.generation.heritage.half_heritage_chance, 0.10);
        assert_eq!(config.tui.tick_rate_ms, 50);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.tui.tick_rate_ms, config.tui.tick_rate_ms);
        assert_eq!(deserialized.data.paths, config.data.paths);
    }
}
