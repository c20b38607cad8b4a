// Client configuration: config file with environment override

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the configured API base URL
pub const API_URL_ENV: &str = "MEMBERSTORE_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the membership service
    pub api_url: String,
    /// Page size used when the caller does not pass one
    pub default_page_size: usize,
    /// Request timeout for API calls
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            default_page_size: 10,
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load from `~/.config/memberstore/config.yaml` when present
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    /// `MEMBERSTORE_API_URL` overrides the file either way.
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_url_override(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("memberstore").join("config.yaml"))
    }

    fn apply_url_override(&mut self, url: Option<String>) {
        if let Some(url) = url {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_url: https://club.example.com").unwrap();
        writeln!(file, "default_page_size: 20").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_url, "https://club.example.com");
        assert_eq!(config.default_page_size, 20);
        // Unset keys keep their defaults
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_url: [not, a, string").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Config::from_file(Path::new("/nonexistent/config.yaml")).is_err());
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        config.apply_url_override(Some("http://10.0.0.5:8080".to_string()));
        assert_eq!(config.api_url, "http://10.0.0.5:8080");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let mut config = Config::default();
        config.apply_url_override(Some("  ".to_string()));
        assert_eq!(config.api_url, "http://localhost:8080");
        config.apply_url_override(None);
        assert_eq!(config.api_url, "http://localhost:8080");
    }
}
