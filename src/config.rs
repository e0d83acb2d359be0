//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config`, or the platform config directory)
//! 3. Environment variables prefixed with `CSVDEDUP_`
//! 4. Command-line flags
//!
//! ```toml
//! delimiter = ";"
//! deduped_suffix = "_clean"
//! duplicates_suffix = "_removed"
//! annotate_duplicates = false
//! color = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;
use crate::output::csv::{DEFAULT_DEDUPED_SUFFIX, DEFAULT_DUPLICATES_SUFFIX};

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "CSVDEDUP_";

/// Keys accepted in the config file.
const KNOWN_KEYS: &[&str] = &[
    "delimiter",
    "deduped_suffix",
    "duplicates_suffix",
    "annotate_duplicates",
    "color",
];

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// A provider failed or a value has the wrong type.
    #[error("Invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// The delimiter is not ASCII, or is the quote or a line terminator.
    #[error("Invalid delimiter {0:?}: must be a single ASCII character other than '\"', CR or LF")]
    InvalidDelimiter(char),

    /// An output suffix is empty or both suffixes are equal.
    #[error("Invalid output suffixes: {0}")]
    InvalidSuffix(&'static str),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Field delimiter for input and output
    pub delimiter: char,
    /// Suffix appended to the input stem for the deduplicated file
    pub deduped_suffix: String,
    /// Suffix appended to the input stem for the duplicates file
    pub duplicates_suffix: String,
    /// Prefix duplicate rows with source_line and first_seen_line columns
    pub annotate_duplicates: bool,
    /// Use colored terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: ',',
            deduped_suffix: DEFAULT_DEDUPED_SUFFIX.to_string(),
            duplicates_suffix: DEFAULT_DUPLICATES_SUFFIX.to_string(),
            annotate_duplicates: true,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// `path` overrides the default config location. A missing default file
    /// is not an error. The result is not validated, since CLI flags may
    /// still override it; call [`Config::validate`] after [`Config::apply_cli`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit file is missing or a value
    /// cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(explicit) if !explicit.exists() => {
                return Err(ConfigError::NotFound(explicit.to_path_buf()));
            }
            Some(explicit) => Some(explicit.to_path_buf()),
            None => Self::default_path(),
        };

        if let Some(ref file) = file {
            warn_unknown_keys(file);
        }

        let config: Self = Self::figment(file.as_deref())
            .extract()
            .map_err(Box::new)?;

        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Build the layered figment for an optional config file.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "csvdedup", "csvdedup")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(delimiter) = cli.delimiter {
            self.delimiter = delimiter;
        }
        if cli.no_annotate {
            self.annotate_duplicates = false;
        }
        if cli.no_color {
            self.color = false;
        }
    }

    /// Check that the configuration can be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDelimiter`] or
    /// [`ConfigError::InvalidSuffix`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ConfigError::InvalidDelimiter(self.delimiter));
        }
        if self.deduped_suffix.is_empty() || self.duplicates_suffix.is_empty() {
            return Err(ConfigError::InvalidSuffix("suffixes cannot be empty"));
        }
        if self.deduped_suffix == self.duplicates_suffix {
            return Err(ConfigError::InvalidSuffix(
                "deduped and duplicates suffixes must differ",
            ));
        }
        Ok(())
    }

    /// Delimiter as a byte for the CSV reader and writer.
    ///
    /// Only meaningful after [`Config::validate`] has accepted the delimiter.
    #[must_use]
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b',')
    }
}

/// Unknown top-level keys in `content`, each with the closest known key.
#[must_use]
pub fn unknown_keys(content: &str) -> Vec<(String, Option<&'static str>)> {
    let Ok(table) = content.parse::<toml::Table>() else {
        return Vec::new();
    };

    table
        .keys()
        .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|key| (key.clone(), suggest_key(key)))
        .collect()
}

fn suggest_key(key: &str) -> Option<&'static str> {
    KNOWN_KEYS
        .iter()
        .map(|known| (*known, strsim::jaro_winkler(key, known)))
        .filter(|(_, score)| *score >= 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(known, _)| known)
}

fn warn_unknown_keys(file: &Path) {
    let Ok(content) = fs::read_to_string(file) else {
        return;
    };
    for (key, suggestion) in unknown_keys(&content) {
        match suggestion {
            Some(known) => log::warn!(
                "Unknown config key '{}' in {} (did you mean '{}'?)",
                key,
                file.display(),
                known
            ),
            None => log::warn!("Unknown config key '{}' in {}", key, file.display()),
        }
    }
}
