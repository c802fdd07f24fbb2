use crate::error::{AppError, Result};
use crate::ignore_list::IgnoreSet;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILENAME: &str = "treepick.toml";
pub const DEFAULT_PORT: u16 = 3000;
pub const PORT_ENV_VAR: &str = "PORT";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IgnoreConfig {
    /// Whether the built-in ignored directory names are applied.
    #[serde(default = "default_true")]
    pub use_defaults: bool,
    /// Additional directory bare-names to ignore.
    #[serde(default)]
    pub extra: Vec<String>,
}

fn default_true() -> bool {
    true
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            use_defaults: true,
            extra: Vec::new(),
        }
    }
}

impl Config {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        log::debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| AppError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| {
            AppError::TomlParse(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Resolves which config file to use, if any: an explicit override must
    /// exist; otherwise `treepick.toml` in `dir` is used when present.
    pub fn resolve_config_path(
        dir: &Path,
        explicit: Option<&PathBuf>,
        disabled: bool,
    ) -> Result<Option<PathBuf>> {
        if disabled {
            return Ok(None);
        }
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(AppError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Some(path.clone()));
        }
        let default = dir.join(DEFAULT_CONFIG_FILENAME);
        Ok(default.is_file().then_some(default))
    }

    /// Server port precedence: CLI flag, then the PORT environment variable,
    /// then the config file, then 3000.
    pub fn effective_port(&self, cli_override: Option<u16>) -> u16 {
        if let Some(port) = cli_override {
            return port;
        }
        if let Ok(value) = env::var(PORT_ENV_VAR) {
            match value.parse() {
                Ok(port) => return port,
                Err(_) => log::warn!("Ignoring unparseable {PORT_ENV_VAR} value: '{value}'"),
            }
        }
        self.server.port
    }

    /// The ignore set for the next build: defaults (unless disabled here or
    /// by the caller), plus config extras, plus caller extras.
    pub fn ignore_set(&self, cli_extra: &[String], cli_no_defaults: bool) -> IgnoreSet {
        let mut set = if self.ignore.use_defaults && !cli_no_defaults {
            IgnoreSet::with_defaults()
        } else {
            IgnoreSet::new()
        };
        set.extend(self.ignore.extra.iter().cloned());
        set.extend(cli_extra.iter().cloned());
        set
    }
}
