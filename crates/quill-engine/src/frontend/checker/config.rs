//! Checker configuration, loaded from the `[check]` table of `quill.toml`.

use super::error::WarningConfig;
use super::symbols::RedeclarationPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Options controlling semantic analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CheckerOptions {
    /// Name of the entry method on the root class
    pub entry_point: String,
    /// Redeclaring a name in a later case of one switch
    pub switch_redeclaration: RedeclarationPolicy,
    /// Accept integral constants into narrower integral types when they fit
    pub constant_narrowing: bool,
    /// Analyse method bodies on worker threads
    pub parallel: bool,
    pub warnings: WarningConfig,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            entry_point: "main".to_string(),
            switch_redeclaration: RedeclarationPolicy::Reject,
            constant_narrowing: true,
            parallel: false,
            warnings: WarningConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    check: CheckerOptions,
}

impl CheckerOptions {
    /// Parse the `[check]` table of a TOML document; a missing table yields
    /// the defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.check.validate()?;
        Ok(file.check)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_identifier = self
            .entry_point
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && self
                .entry_point
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_identifier {
            return Err(ConfigError::ValidationError(format!(
                "entry-point '{}' is not a valid method name",
                self.entry_point
            )));
        }
        Ok(())
    }
}
