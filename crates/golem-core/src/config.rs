//! Service configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! tree_path = "data/nucc_tree.json"
//! roster_path = "data/hcp_data.csv"
//! default_columns = ["Full Name", "License State"]
//! export_delimiter = ";"
//! log_filter = "golem=debug"
//! ```

use golem_roster::Column;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors reading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`GolemConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// FastGolem configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GolemConfig {
    /// Taxonomy JSON file
    pub tree_path: Option<PathBuf>,
    /// Practitioner roster CSV file
    pub roster_path: Option<PathBuf>,
    /// Columns shown before any user-chosen column, by display name
    pub default_columns: Vec<String>,
    /// Export field delimiter
    pub export_delimiter: char,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Selection key used by the command line
    pub cli_user: String,
}

impl Default for GolemConfig {
    fn default() -> Self {
        Self {
            tree_path: None,
            roster_path: None,
            default_columns: Column::DEFAULT_DISPLAY
                .iter()
                .map(|c| c.display_name().to_string())
                .collect(),
            export_delimiter: ',',
            log_filter: "info".to_string(),
            cli_user: "cli".to_string(),
        }
    }
}

impl GolemConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on invalid TOML or unknown value types.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if unreadable, otherwise as [`from_toml`](Self::from_toml).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// With taxonomy file
    #[inline]
    #[must_use]
    pub fn with_tree_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tree_path = Some(path.into());
        self
    }

    /// With roster file
    #[inline]
    #[must_use]
    pub fn with_roster_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.roster_path = Some(path.into());
        self
    }

    /// With default display columns
    #[must_use]
    pub fn with_default_columns<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.default_columns = names.into_iter().map(Into::into).collect();
        self
    }

    /// With export delimiter
    #[inline]
    #[must_use]
    pub fn with_export_delimiter(mut self, delimiter: char) -> Self {
        self.export_delimiter = delimiter;
        self
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// With command-line user
    #[inline]
    #[must_use]
    pub fn with_cli_user(mut self, user: impl Into<String>) -> Self {
        self.cli_user = user.into();
        self
    }

    /// Export delimiter as a byte
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] unless the delimiter is a single
    /// ASCII character other than a quote or newline.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match u8::try_from(self.export_delimiter) {
            Ok(byte) if byte.is_ascii() && !matches!(byte, b'"' | b'\n' | b'\r') => Ok(byte),
            _ => Err(ConfigError::InvalidValue(format!(
                "export_delimiter {:?} must be a single ASCII character",
                self.export_delimiter
            ))),
        }
    }

    /// Default display columns
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for an unknown column name.
    pub fn default_column_set(&self) -> Result<Vec<Column>, ConfigError> {
        self.default_columns
            .iter()
            .map(|name| {
                Column::from_name(name)
                    .ok_or_else(|| ConfigError::InvalidValue(format!("unknown default column '{name}'")))
            })
            .collect()
    }
}
