//! Loading the calendar configuration from disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::CalendarConfig;

/// Environment variable that points at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "SIMPLE_CALENDAR_CONFIG";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Where the config file is looked up when no path is given.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    ProjectDirs::from("com", "SimpleCalendar", "SimpleCalendar")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Read and validate a TOML config file; a missing file yields defaults.
pub fn load_config(path: &Path) -> Result<CalendarConfig> {
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return Ok(CalendarConfig::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    parse_config(&data).with_context(|| format!("invalid config in {}", path.display()))
}

pub fn parse_config(data: &str) -> Result<CalendarConfig> {
    let config: CalendarConfig = toml::from_str(data)?;
    config
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;
    Ok(config)
}

/// Write `config` as TOML, creating parent directories as needed.
pub fn save_config(path: &Path, config: &CalendarConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = toml::to_string_pretty(config)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{GridMode, OverflowPolicy};
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CalendarConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "startOfWeek = 1\nmode = \"6weeks\"\nshowEventTime = false\ntimeFormat = \"hh:mm A\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.start_of_week, 1);
        assert_eq!(config.mode, GridMode::SixWeeks);
        assert!(!config.show_event_time);
        assert_eq!(config.time_format, "hh:mm A");
        assert_eq!(config.refresh_interval_ms, 600_000);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = parse_config("startOfWeek = 8").unwrap_err();
        assert!(format!("{:#}", err).contains("startOfWeek"));

        let err = parse_config("mode = \"weekly\"").unwrap_err();
        assert!(format!("{:#}", err).contains("unknown mode"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = CalendarConfig {
            start_of_week: 6,
            overflow_policy: OverflowPolicy::Silent,
            ..CalendarConfig::default()
        };

        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    #[serial]
    fn test_env_override_for_config_path() {
        std::env::set_var(CONFIG_PATH_ENV, "/tmp/custom-calendar.toml");
        let path = default_config_path();
        std::env::remove_var(CONFIG_PATH_ENV);
        assert_eq!(path, Some(PathBuf::from("/tmp/custom-calendar.toml")));
    }
}
