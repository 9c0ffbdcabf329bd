use std::fmt;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "mdk.toml";

#[derive(Debug)]
pub enum ConfigError {
    Missing {
        path: PathBuf,
    },
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    InvalidLogLevel {
        path: PathBuf,
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing { path } => {
                write!(f, "config file '{}' does not exist", path.display())
            }
            ConfigError::Read { path, source } => {
                write!(f, "cannot read config file '{}': {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config file '{}': {}", path.display(), source)
            }
            ConfigError::InvalidLogLevel { path, value } => write!(
                f,
                "invalid log_level '{}' in '{}' (expected off, error, warn, info, debug or trace)",
                value,
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings read from `mdk.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Extension given to extensionless include paths.
    pub default_extension: Option<String>,

    /// Disable colored output, as `--no-color` does.
    pub no_color: bool,

    /// Log level used when `-v` is not given.
    pub log_level: Option<String>,

    #[serde(skip)]
    log_filter: Option<LevelFilter>,
}

impl Config {
    /// Load `path`, returning `None` if it does not exist.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(value) = &config.log_level {
            let filter = value
                .parse::<LevelFilter>()
                .map_err(|_| ConfigError::InvalidLogLevel {
                    path: path.to_path_buf(),
                    value: value.clone(),
                })?;
            config.log_filter = Some(filter);
        }

        Ok(Some(config))
    }

    /// Load the explicitly named file, which must exist, or else the optional
    /// `mdk.toml` in the working directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path)?.ok_or_else(|| ConfigError::Missing {
                path: path.to_path_buf(),
            }),
            None => Ok(Self::load_from_path(DEFAULT_CONFIG_FILE)?.unwrap_or_default()),
        }
    }

    pub fn log_filter(&self) -> Option<LevelFilter> {
        self.log_filter
    }
}
