use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

/// Production `plzDetail` endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://app-prod-ws.meteoswiss-app.ch/v1/plzDetail";

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the `plzDetail` endpoint. Only worth overriding for a
    /// proxy or a test server.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in milliseconds; 0 disables the timeout.
    #[serde(default)]
    pub timeout_ms: u64,

    /// Postal code used when none is given on the command line.
    pub default_postal_code: Option<u32>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: 0,
            default_postal_code: None,
        }
    }
}

impl Config {
    /// Resolve the postal code for a query: an explicit one wins, otherwise
    /// fall back to the configured default.
    pub fn resolve_postal_code(&self, explicit: Option<u32>) -> Result<u32> {
        explicit.or(self.default_postal_code).ok_or_else(|| {
            anyhow!(
                "No postal code given and no default configured.\n\
                 Hint: run `meteoswiss configure` first, or pass the postal code directly."
            )
        })
    }

    /// Per-request timeout; `None` when timeouts are disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Load config from disk; a missing file means first run and yields
    /// defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read config file: {}", path.display()));
            }
        };

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        let parent = path
            .parent()
            .context("Config path has no parent directory")?;

        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;

        let contents =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("ch", "meteoswiss", "meteoswiss-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
