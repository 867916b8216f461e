use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::entries::DEFAULT_EXTENSION;
use crate::pager::{DEFAULT_AUTO_INTERVAL, PagerMode};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "factdeck";
pub const MIN_AUTO_INTERVAL_MS: u64 = 500;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Pager mode opened from the home screen: `manual` or `auto`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_interval_ms: Option<u64>,

    /// Directory holding the `<Category>.<ext>` files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `factdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# factdeck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let defaults = self.defaults.get_or_insert_with(DefaultsConfig::default);
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                defaults.theme = Some(value.to_string());
            }
            "defaults.mode" => {
                match value {
                    "manual" | "auto" => {}
                    _ => anyhow::bail!("Invalid mode: {value}. Must be 'manual' or 'auto'."),
                }
                defaults.mode = Some(value.to_string());
            }
            "defaults.auto_interval_ms" => {
                let ms: u64 = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid auto_interval_ms: {value}. Must be a number.")
                })?;
                if ms < MIN_AUTO_INTERVAL_MS {
                    anyhow::bail!(
                        "Invalid auto_interval_ms: {ms}. Must be at least {MIN_AUTO_INTERVAL_MS}."
                    );
                }
                defaults.auto_interval_ms = Some(ms);
            }
            "defaults.data_dir" => {
                defaults.data_dir = Some(PathBuf::from(value));
            }
            "defaults.extension" => {
                let ext = value.trim_start_matches('.');
                if ext.is_empty() || ext.contains(['/', '\\']) {
                    anyhow::bail!("Invalid extension: {value}.");
                }
                defaults.extension = Some(ext.to_string());
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.mode, defaults.auto_interval_ms, defaults.data_dir, defaults.extension"
            ),
        }
        Ok(())
    }
}

/// Values given on the command line; `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub theme: Option<String>,
    pub mode: Option<PagerMode>,
    pub auto_interval_ms: Option<u64>,
    pub data_dir: Option<PathBuf>,
}

/// Effective settings: built-in defaults, then the config file, then CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub theme: String,
    pub mode: PagerMode,
    pub auto_interval: Duration,
    pub data_dir: PathBuf,
    pub extension: String,
}

impl Settings {
    pub fn resolve(config: &Config, overrides: &Overrides) -> Self {
        let defaults = config.defaults.clone().unwrap_or_default();

        let theme = overrides
            .theme
            .clone()
            .or(defaults.theme)
            .unwrap_or_else(|| "light".to_string());
        let mode = overrides
            .mode
            .or_else(|| defaults.mode.as_deref().map(PagerMode::from_name))
            .unwrap_or(PagerMode::Manual);
        let auto_interval = overrides
            .auto_interval_ms
            .or(defaults.auto_interval_ms)
            .map(|ms| Duration::from_millis(ms.max(MIN_AUTO_INTERVAL_MS)))
            .unwrap_or(DEFAULT_AUTO_INTERVAL);
        let data_dir = overrides
            .data_dir
            .clone()
            .or(defaults.data_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let extension = defaults
            .extension
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        Self {
            theme,
            mode,
            auto_interval,
            data_dir,
            extension,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_validates_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "dark").is_ok());
        assert!(config.set("defaults.theme", "blue").is_err());
        assert!(config.set("defaults.mode", "auto").is_ok());
        assert!(config.set("defaults.mode", "sometimes").is_err());
        assert!(config.set("defaults.auto_interval_ms", "2500").is_ok());
        assert!(config.set("defaults.auto_interval_ms", "100").is_err());
        assert!(config.set("defaults.auto_interval_ms", "soon").is_err());
        assert!(config.set("defaults.extension", ".txt").is_ok());
        assert!(config.set("defaults.extension", "a/b").is_err());
        assert!(config.set("defaults.colour", "red").is_err());

        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.theme.as_deref(), Some("dark"));
        assert_eq!(defaults.mode.as_deref(), Some("auto"));
        assert_eq!(defaults.auto_interval_ms, Some(2500));
        assert_eq!(defaults.extension.as_deref(), Some("txt"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILENAME);
        let mut config = Config::default();
        config.set("defaults.data_dir", "/srv/facts").unwrap();
        config.set("defaults.mode", "auto").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        let defaults = loaded.defaults.unwrap();
        assert_eq!(defaults.data_dir, Some(PathBuf::from("/srv/facts")));
        assert_eq!(defaults.mode.as_deref(), Some("auto"));
        assert_eq!(defaults.theme, None);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join(FILENAME)).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(&Config::default(), &Overrides::default());
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.mode, PagerMode::Manual);
        assert_eq!(settings.auto_interval, DEFAULT_AUTO_INTERVAL);
        assert_eq!(settings.data_dir, PathBuf::from("."));
        assert_eq!(settings.extension, "csv");
    }

    #[test]
    fn test_cli_overrides_config() {
        let config: Config = serde_yaml::from_str(
            "defaults:\n  theme: dark\n  mode: auto\n  auto_interval_ms: 2000\n  data_dir: facts\n",
        )
        .unwrap();
        let from_file = Settings::resolve(&config, &Overrides::default());
        assert_eq!(from_file.theme, "dark");
        assert_eq!(from_file.mode, PagerMode::Auto);
        assert_eq!(from_file.auto_interval, Duration::from_millis(2000));
        assert_eq!(from_file.data_dir, PathBuf::from("facts"));

        let overrides = Overrides {
            theme: Some("light".to_string()),
            mode: Some(PagerMode::Manual),
            auto_interval_ms: Some(10),
            data_dir: Some(PathBuf::from("elsewhere")),
        };
        let merged = Settings::resolve(&config, &overrides);
        assert_eq!(merged.theme, "light");
        assert_eq!(merged.mode, PagerMode::Manual);
        assert_eq!(
            merged.auto_interval,
            Duration::from_millis(MIN_AUTO_INTERVAL_MS)
        );
        assert_eq!(merged.data_dir, PathBuf::from("elsewhere"));
    }
}
