use crate::cli::Cli;
use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub application_name: String,
    pub default_style: Option<String>,
    pub preferences_file: Option<PathBuf>,
    /// Base URL serving `snapshot`; the built-in mock data is used when unset.
    pub data_source_url: Option<String>,
    pub refresh_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            application_name: "FinGallery".to_string(),
            default_style: None,
            preferences_file: None,
            data_source_url: None,
            refresh_interval_secs: 30,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppConfig {
    pub fn load(cli: &Cli) -> Result<Self, AppConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("application_name", defaults.application_name.clone())?
            .set_default("refresh_interval_secs", defaults.refresh_interval_secs)?;

        if let Some(profile) = &cli.profile {
            let profile_file_name = format!("fingallery.{profile}.toml");
            if let Some(path) = Self::config_dir_path(&profile_file_name) {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        if let Some(config_path) = &cli.config {
            builder = builder.add_source(File::from(config_path.clone()).required(true));
        } else if let Some(path) = Self::config_dir_path("fingallery.toml") {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(Environment::with_prefix("FINGALLERY").separator("__"));

        let built = builder.build()?;
        Ok(built.try_deserialize::<AppConfig>()?)
    }

    /// Polling never runs faster than every five seconds.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(5))
    }

    fn config_dir_path(file_name: &str) -> Option<PathBuf> {
        ProjectDirs::from("com", "FinGallery", "FinGallery")
            .map(|dirs| dirs.config_dir().join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_config_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            "default_style = \"retro\"\nrefresh_interval_secs = 2\ndata_source_url = \"http://localhost:9000/\"\n",
        )
        .unwrap();

        let cli = Cli::parse_from(["fingallery", "--config", path.to_str().unwrap()]);
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.application_name, "FinGallery");
        assert_eq!(config.default_style.as_deref(), Some("retro"));
        assert_eq!(config.data_source_url.as_deref(), Some("http://localhost:9000/"));
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let cli = Cli::parse_from(["fingallery", "--config", "/nonexistent/fingallery.toml"]);
        assert!(AppConfig::load(&cli).is_err());
    }
}
