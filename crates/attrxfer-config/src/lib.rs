//! Configuration for attribute copy requests.
//!
//! Describe a copy in TOML or YAML instead of building settings in code:
//! which selector to read, where to write it, and how to pair records.
//!
//! # Examples
//!
//! Load a positional copy from a TOML string:
//!
//! ```
//! use attrxfer_config::CopyAttributeConfig;
//!
//! let config = CopyAttributeConfig::from_toml_str(r#"
//!     source = "height"
//!     target = "$Position.Z"
//!     match_by_attribute = false
//! "#).unwrap();
//!
//! assert_eq!(config.source, "height");
//! assert!(!config.match_by_attribute);
//! assert_eq!(config.chunk_size, 256);
//! ```
//!
//! Pair records by a shared key instead of by index:
//!
//! ```
//! use attrxfer_config::{CopyAttributeConfig, UnmatchedPolicy};
//!
//! let config = CopyAttributeConfig::from_yaml_str(r#"
//!     source: color
//!     target: tint
//!     source_match: id
//!     target_match: id
//!     unmatched: skip
//! "#).unwrap();
//!
//! assert!(config.match_by_attribute);
//! assert_eq!(config.unmatched, UnmatchedPolicy::Skip);
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use attrxfer_config::CopyAttributeConfig;
//!
//! let config = CopyAttributeConfig::load("copy.toml").unwrap_or_default();
//! assert_eq!(config.source, "@Last");
//! ```

use std::path::Path;

use attrxfer_core::AttributeSelector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chunk size used when none is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// What a source record without an equal match key receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    /// Reuse the most recently matched target record.
    #[default]
    Sticky,

    /// Leave the record unwritten.
    Skip,
}

/// Labels of the input and output pins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct PinConfig {
    pub source: String,
    pub target: String,
    pub output: String,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            source: "Source".to_string(),
            target: "Target".to_string(),
            output: "Out".to_string(),
        }
    }
}

/// Attribute copy configuration.
///
/// Selector fields use the selector text syntax, e.g. `height`,
/// `$Position.Z`, `$Index`, `@Last` or `@Source`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CopyAttributeConfig {
    /// Field read from the source collection.
    #[serde(default = "default_source")]
    pub source: String,

    /// Field written on the target collection.
    #[serde(default = "default_target")]
    pub target: String,

    /// Pair records by match key instead of by index.
    #[serde(default = "default_match_by_attribute")]
    pub match_by_attribute: bool,

    /// Match key read from the source collection.
    #[serde(default = "default_source")]
    pub source_match: String,

    /// Match key read from the target collection.
    #[serde(default = "default_source")]
    pub target_match: String,

    #[serde(default)]
    pub unmatched: UnmatchedPolicy,

    /// Records moved per batch by the generic transfer loop.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default)]
    pub pins: PinConfig,
}

fn default_source() -> String {
    AttributeSelector::last().display_text()
}

fn default_target() -> String {
    AttributeSelector::source().display_text()
}

fn default_match_by_attribute() -> bool {
    true
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for CopyAttributeConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            target: default_target(),
            match_by_attribute: default_match_by_attribute(),
            source_match: default_source(),
            target_match: default_source(),
            unmatched: UnmatchedPolicy::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            pins: PinConfig::default(),
        }
    }
}

impl CopyAttributeConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the source selector text.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the target selector text.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Enables matching on the given source and target keys.
    pub fn with_match(mut self, source_match: impl Into<String>, target_match: impl Into<String>) -> Self {
        self.match_by_attribute = true;
        self.source_match = source_match.into();
        self.target_match = target_match.into();
        self
    }

    /// Pairs records by index.
    pub fn positional(mut self) -> Self {
        self.match_by_attribute = false;
        self
    }

    pub fn with_unmatched(mut self, unmatched: UnmatchedPolicy) -> Self {
        self.unmatched = unmatched;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_pins(mut self, pins: PinConfig) -> Self {
        self.pins = pins;
        self
    }

    /// Parses every selector field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first field that does not
    /// parse or when the chunk size is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use attrxfer_config::CopyAttributeConfig;
    ///
    /// let config = CopyAttributeConfig::new().with_source("$Density").with_chunk_size(0);
    /// assert!(config.selectors().is_err());
    ///
    /// let selectors = config.with_chunk_size(64).selectors().unwrap();
    /// assert_eq!(selectors.source.display_text(), "$Density");
    /// ```
    pub fn selectors(&self) -> Result<ParsedSelectors, ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::Invalid("chunk_size must be at least 1".to_string()));
        }

        let parse = |field: &str, text: &str| {
            AttributeSelector::parse(text)
                .map_err(|err| ConfigError::Invalid(format!("{field}: {err}")))
        };

        Ok(ParsedSelectors {
            source: parse("source", &self.source)?,
            target: parse("target", &self.target)?,
            source_match: parse("source_match", &self.source_match)?,
            target_match: parse("target_match", &self.target_match)?,
        })
    }
}

/// Selector fields of a [`CopyAttributeConfig`], parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSelectors {
    pub source: AttributeSelector,
    pub target: AttributeSelector,
    pub source_match: AttributeSelector,
    pub target_match: AttributeSelector,
}

#[cfg(test)]
mod tests;
