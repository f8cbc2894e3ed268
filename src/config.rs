/// TOML configuration: profile defaults, storage location and log level.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clock::{self, BUFFER_RANGE, LIFESPAN_RANGE};
use crate::types::Profile;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Quoted `YYYY-MM-DD`.
    #[serde(default = "default_date_of_birth")]
    pub date_of_birth: String,
    #[serde(default = "default_lifespan_years")]
    pub lifespan_years: u32,
    #[serde(default = "default_buffer_years")]
    pub buffer_years: u32,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            date_of_birth: default_date_of_birth(),
            lifespan_years: default_lifespan_years(),
            buffer_years: default_buffer_years(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Custom path for the SQLite database. Defaults to the user's data dir.
    #[serde(default)]
    pub path: Option<String>,
    /// Keep events for this session only.
    #[serde(default)]
    pub in_memory: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_date_of_birth() -> String {
    clock::default_date_of_birth().format(DATE_FORMAT).to_string()
}
fn default_lifespan_years() -> u32 {
    clock::DEFAULT_LIFESPAN_YEARS
}
fn default_buffer_years() -> u32 {
    clock::DEFAULT_BUFFER_YEARS
}
fn default_log_level() -> String {
    "info".to_string()
}

/// Returns `<config_dir>/lifeweeks/config.toml`, or `./lifeweeks.toml` when
/// the platform has no config dir.
pub fn default_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("lifeweeks").join("config.toml"),
        None => PathBuf::from("lifeweeks.toml"),
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .with_context(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

impl Config {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.profile()?;
        Ok(config)
    }

    /// The validated profile this config describes.
    pub fn profile(&self) -> Result<Profile> {
        let profile = Profile {
            date_of_birth: parse_date(&self.profile.date_of_birth)?,
            lifespan_years: self.profile.lifespan_years,
            buffer_years: self.profile.buffer_years,
        };
        validate_profile(&profile)?;
        Ok(profile)
    }
}

pub fn validate_profile(profile: &Profile) -> Result<()> {
    if !LIFESPAN_RANGE.contains(&profile.lifespan_years) {
        bail!(
            "lifespan must be between {} and {} years, got {}",
            LIFESPAN_RANGE.start(),
            LIFESPAN_RANGE.end(),
            profile.lifespan_years
        );
    }
    if !BUFFER_RANGE.contains(&profile.buffer_years) {
        bail!(
            "future preview must be between {} and {} years, got {}",
            BUFFER_RANGE.start(),
            BUFFER_RANGE.end(),
            profile.buffer_years
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        let profile = config.profile().unwrap();
        assert_eq!(profile, Profile::default());
        assert_eq!(config.logging.level, "info");
        assert!(!config.storage.in_memory);
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn reads_all_sections() {
        let config = Config::from_toml(
            r#"
            [profile]
            date_of_birth = "1990-05-17"
            lifespan_years = 80
            buffer_years = 5

            [storage]
            path = "/tmp/weeks.db"
            in_memory = true

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        let profile = config.profile().unwrap();
        assert_eq!(profile.date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
        assert_eq!(profile.lifespan_years, 80);
        assert_eq!(profile.buffer_years, 5);
        assert_eq!(config.storage.path.as_deref(), Some("/tmp/weeks.db"));
        assert!(config.storage.in_memory);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn rejects_out_of_range_profile() {
        assert!(Config::from_toml("[profile]\nlifespan_years = 49\n").is_err());
        assert!(Config::from_toml("[profile]\nlifespan_years = 101\n").is_err());
        assert!(Config::from_toml("[profile]\nbuffer_years = 11\n").is_err());
        assert!(Config::from_toml("[profile]\ndate_of_birth = \"01/08/2007\"\n").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let config = Config::load(Path::new("/definitely/not/here/config.toml")).unwrap();
        assert_eq!(config.profile.lifespan_years, clock::DEFAULT_LIFESPAN_YEARS);
    }
}
