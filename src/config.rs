//! Source configuration
//!
//! Reads the `[migrations]` table of an application's `config.toml`:
//!
//! ```toml
//! [migrations]
//! source = "file://db/migrations"
//! ```
//!
//! `RUSTF_MIGRATIONS_SOURCE` overrides the configured location.

use crate::error::{Error, Result};
use crate::source::Location;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding [`SourceConfig::url`]
pub const SOURCE_ENV_VAR: &str = "RUSTF_MIGRATIONS_SOURCE";

/// Where migrations are loaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Location string, e.g. `file://migrations`
    #[serde(rename = "source", default = "default_source")]
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    migrations: Option<SourceConfig>,
}

fn default_source() -> String {
    "file://migrations".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source(),
        }
    }
}

impl SourceConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Parse the `[migrations]` table from TOML text.
    /// A missing table or key falls back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.migrations.unwrap_or_default())
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let content = fs::read_to_string(path_ref).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file '{}': {}. Make sure the file exists and is readable.",
                path_ref.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| {
            e.with_context(format!(
                "Failed to parse config file '{}'",
                path_ref.display()
            ))
        })?;

        log::debug!(
            "Loaded migration source configuration from: {}",
            path_ref.display()
        );
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(SOURCE_ENV_VAR) {
            if !url.trim().is_empty() {
                log::debug!("Migration source overridden by {}", SOURCE_ENV_VAR);
                self.url = url;
            }
        }
    }

    /// Check that the location is usable
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::configuration("Migration source location is empty"));
        }

        Location::parse(&self.url)
            .map_err(|e| e.with_context("Invalid migration source configuration"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SourceConfig::default();
        assert_eq!(config.url, "file://migrations");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_str() {
        let config = SourceConfig::from_toml_str(
            r#"
[server]
port = 8000

[migrations]
source = "file:///srv/app/migrations"
"#,
        )
        .unwrap();
        assert_eq!(config.url, "file:///srv/app/migrations");
    }

    #[test]
    fn test_missing_table_uses_defaults() {
        let config = SourceConfig::from_toml_str("[server]\nport = 8000\n").unwrap();
        assert_eq!(config, SourceConfig::default());

        let config = SourceConfig::from_toml_str("[migrations]\n").unwrap();
        assert_eq!(config, SourceConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = SourceConfig::from_toml_str("[migrations\nsource = ").unwrap_err();
        assert_eq!(err.error_code(), "E_TOML");
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[migrations]\nsource = \"file://db/migrations\"\n").unwrap();

        let config = SourceConfig::from_file(&path).unwrap();
        assert_eq!(config.url, "file://db/migrations");

        let err = SourceConfig::from_file(temp_dir.path().join("missing.toml")).unwrap_err();
        assert_eq!(err.error_code(), "E_CONFIGURATION");
    }

    #[test]
    fn test_validate() {
        assert!(SourceConfig::new("").validate().is_err());
        let err = SourceConfig::new("no-scheme").validate().unwrap_err();
        assert_eq!(err.error_code(), "E_INVALID_LOCATION");
    }
}
