//! Configuration management for haulboard
//!
//! Config stored at: ~/.config/haulboard/config.json
//!
//! Environment variables override the file:
//! `HAULBOARD_DATA_DIR`, `HAULBOARD_PAGE_SIZE`, `HAULBOARD_FETCH_TIMEOUT_MS`,
//! `HAULBOARD_DATE_POLICY`.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use haulboard_domain::service::{DatePolicy, PageState, DEFAULT_PAGE_SIZE};
use haulboard_types::{ConfigError, OutputFormat, Result, ValidationError};
use serde::{Deserialize, Serialize};

pub const ENV_DATA_DIR: &str = "HAULBOARD_DATA_DIR";
pub const ENV_PAGE_SIZE: &str = "HAULBOARD_PAGE_SIZE";
pub const ENV_FETCH_TIMEOUT_MS: &str = "HAULBOARD_FETCH_TIMEOUT_MS";
pub const ENV_DATE_POLICY: &str = "HAULBOARD_DATE_POLICY";

/// A back-office account allowed to sign in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding JSON/CSV snapshots; the built-in sample data is
    /// used when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Rows per page in list views
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Record store fetch timeout
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Handling of unparsable filter dates (lenient, strict)
    #[serde(default)]
    pub date_policy: DatePolicy,

    /// Name of the environment variable holding the backend API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default)]
    pub accounts: Vec<Account>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE.get()
}

fn default_fetch_timeout_ms() -> u64 {
    10_000
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_api_key_env() -> String {
    "HAULBOARD_API_KEY".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            page_size: default_page_size(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            output_format: default_output_format(),
            date_policy: DatePolicy::default(),
            api_key_env: default_api_key_env(),
            accounts: Vec::new(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("haulboard");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from the default path with environment overrides applied
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load config from a file, or the defaults when it does not exist
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)).into())
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Apply `HAULBOARD_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            self.page_size = parse_env(ENV_PAGE_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_FETCH_TIMEOUT_MS) {
            self.fetch_timeout_ms = parse_env(ENV_FETCH_TIMEOUT_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_DATE_POLICY) {
            self.date_policy = match raw.trim().to_ascii_lowercase().as_str() {
                "lenient" => DatePolicy::Lenient,
                "strict" => DatePolicy::Strict,
                other => {
                    return Err(ConfigError::ParseError(format!(
                        "{}: unknown date policy '{}'",
                        ENV_DATE_POLICY, other
                    ))
                    .into())
                }
            };
        }
        Ok(())
    }

    /// Initial paging state for list views
    pub fn page_state(&self) -> Result<PageState> {
        Ok(PageState::with_page_size(self.page_size)?)
    }

    pub fn page_size(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.page_size).ok_or_else(|| ValidationError::ZeroPageSize.into())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Read the backend API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingSecret(self.api_key_env.clone()).into())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::ParseError(format!("{}: invalid value '{}'", key, raw)).into())
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Haulboard Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:       {}",
            self.data_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in sample data)".to_string())
        )?;
        writeln!(f, "Page size:      {}", self.page_size)?;
        writeln!(f, "Fetch timeout:  {} ms", self.fetch_timeout_ms)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(
            f,
            "Date policy:    {}",
            match self.date_policy {
                DatePolicy::Lenient => "lenient",
                DatePolicy::Strict => "strict",
            }
        )?;
        writeln!(f, "API key env:    {}", self.api_key_env)?;
        writeln!(f, "Accounts:       {}", self.accounts.len())?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
