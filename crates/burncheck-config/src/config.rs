// burncheck-config/src/config.rs
// ============================================================================
// Module: Burncheck Configuration
// Description: Configuration loading and validation for burncheck.
// Purpose: Provide strict, fail-closed reference-table parsing with hard limits.
// Dependencies: burncheck-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Entries override the built-in fleet baselines target by target; duplicate
//! targets within one file are rejected. Invalid configuration fails closed:
//! no entry of a rejected file is applied.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use burncheck_core::ReferenceEntry;
use burncheck_core::ReferenceTable;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "burncheck.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "BURNCHECK_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of reference entries in one file.
pub(crate) const MAX_REFERENCE_ENTRIES: usize = 1024;
/// Maximum length of a `system:partition` target name.
pub(crate) const MAX_TARGET_LENGTH: usize = 128;
/// Maximum length of a display unit string.
pub(crate) const MAX_UNIT_LENGTH: usize = 32;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Burncheck configuration: the throughput reference table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BurncheckConfig {
    /// Reference entries, one per fleet target.
    #[serde(default)]
    pub reference: Vec<ReferenceEntryConfig>,
}

/// One configured reference baseline.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceEntryConfig {
    /// Target in `system:partition` form.
    pub target: String,
    /// Expected worst-GPU throughput.
    pub baseline: f64,
    /// Fractional lower tolerance, conventionally negative.
    pub lower_tolerance: f64,
    /// Fractional upper tolerance; absent leaves the band open above.
    #[serde(default)]
    pub upper_tolerance: Option<f64>,
    /// Display unit.
    pub unit: String,
}

impl BurncheckConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path is taken from the argument, then the `BURNCHECK_CONFIG`
    /// environment variable, then the default filename in the working
    /// directory. The resolved file must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        Self::load_file(&resolved)
    }

    /// Loads configuration when present, or the empty default when neither
    /// an explicit path nor the environment override is set and the default
    /// filename does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a file was designated but cannot be
    /// loaded, or when validation fails.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        let designated = path.is_some() || env::var(CONFIG_ENV_VAR).is_ok();
        let resolved = resolve_path(path)?;
        if !designated && !resolved.exists() {
            return Ok(Self::default());
        }
        Self::load_file(&resolved)
    }

    /// Loads and validates one configuration file.
    fn load_file(resolved: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reference.len() > MAX_REFERENCE_ENTRIES {
            return Err(ConfigError::Invalid("reference entry count exceeds limit".to_string()));
        }
        let mut seen = BTreeSet::new();
        for entry in &self.reference {
            entry.validate()?;
            if !seen.insert(entry.target.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate reference target: {}",
                    entry.target
                )));
            }
        }
        Ok(())
    }

    /// Builds the effective reference table: built-in fleet baselines with
    /// configured entries layered on top.
    #[must_use]
    pub fn reference_table(&self) -> ReferenceTable {
        let mut table = ReferenceTable::builtin();
        for entry in &self.reference {
            table.insert(
                entry.target.clone(),
                ReferenceEntry {
                    baseline: entry.baseline,
                    lower_tolerance: entry.lower_tolerance,
                    upper_tolerance: entry.upper_tolerance,
                    unit: entry.unit.clone(),
                },
            );
        }
        table
    }
}

impl ReferenceEntryConfig {
    /// Validates one reference entry.
    fn validate(&self) -> Result<(), ConfigError> {
        let target = self.target.trim();
        if target.is_empty() {
            return Err(ConfigError::Invalid("reference.target must be non-empty".to_string()));
        }
        if target.len() > MAX_TARGET_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "reference.target exceeds max length: {target}"
            )));
        }
        let Some((system, partition)) = target.split_once(':') else {
            return Err(ConfigError::Invalid(format!(
                "reference.target must use system:partition form: {target}"
            )));
        };
        if system.is_empty() || partition.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "reference.target must name both system and partition: {target}"
            )));
        }

        if !self.baseline.is_finite() || self.baseline <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "reference.baseline must be finite and positive for {target}"
            )));
        }
        if !self.lower_tolerance.is_finite()
            || self.lower_tolerance <= -1.0
            || self.lower_tolerance > 0.0
        {
            return Err(ConfigError::Invalid(format!(
                "reference.lower_tolerance must lie in (-1, 0] for {target}"
            )));
        }
        if let Some(upper) = self.upper_tolerance {
            if !upper.is_finite() || upper < self.lower_tolerance {
                return Err(ConfigError::Invalid(format!(
                    "reference.upper_tolerance must be finite and not below the \
                     lower tolerance for {target}"
                )));
            }
        }

        let unit = self.unit.trim();
        if unit.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "reference.unit must be non-empty for {target}"
            )));
        }
        if unit.len() > MAX_UNIT_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "reference.unit exceeds max length for {target}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}
