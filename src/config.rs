//! Configuration module.
//!
//! Handles loading, validating, and merging a `config.toml`. Stock defaults
//! are overridden by whatever the user file sets; everything is optional.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [encoding]
//! jpeg_quality = 100        # Quality for JPEG strips (1-100)
//!
//! [decode]
//! timeout_secs = 30         # Give up on a decode after this long
//!
//! [export]
//! pacing_delay_ms = 100     # Pause between saves of a batch export
//!
//! [share]
//! # command = ["my-share-tool", "--quiet"]   # argv; the file path is appended
//!
//! [processing]
//! # max_processes = 4       # Max parallel strip encoders (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Quality;
use crate::split::SplitSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
///
/// All fields have defaults. A user file need only specify the values it
/// wants to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitConfig {
    /// Strip encoding settings.
    pub encoding: EncodingConfig,
    /// Decoder limits.
    pub decode: DecodeConfig,
    /// Batch export pacing.
    pub export: ExportConfig,
    /// Share surface for `--share`.
    pub share: ShareConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SplitConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.encoding.jpeg_quality) {
            return Err(ConfigError::Validation(
                "encoding.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.decode.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "decode.timeout_secs must be greater than 0".into(),
            ));
        }
        if let Some(command) = &self.share.command {
            if command.first().is_none_or(|program| program.trim().is_empty()) {
                return Err(ConfigError::Validation(
                    "share.command must name a program".into(),
                ));
            }
        }
        Ok(())
    }

    /// Settings for the split pipeline.
    pub fn split_settings(&self) -> SplitSettings {
        SplitSettings {
            jpeg_quality: Quality::new(self.encoding.jpeg_quality),
            decode_timeout: Duration::from_secs(self.decode.timeout_secs),
        }
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.export.pacing_delay_ms)
    }
}

/// Strip encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingConfig {
    /// Quality for JPEG strips. PNG and WebP strips are always lossless.
    pub jpeg_quality: u32,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self { jpeg_quality: 100 }
    }
}

/// Decoder limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeConfig {
    pub timeout_secs: u64,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Batch export pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Pause between two saves of one batch, in milliseconds.
    pub pacing_delay_ms: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pacing_delay_ms: 100,
        }
    }
}

/// Share surface settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShareConfig {
    /// Program and arguments to share a file with; the file path is appended.
    /// When absent there is no share surface and sharing falls back to saving.
    pub command: Option<Vec<String>>,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel strip encoders.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SplitConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SplitConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SplitConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from an optional file.
///
/// No path means stock defaults. A path that doesn't exist is an error: the
/// user asked for that file explicitly.
pub fn load_config(path: Option<&Path>) -> Result<SplitConfig, ConfigError> {
    let overlay = path.map(load_raw_config).transpose()?;
    resolve_config(stock_defaults_value()?, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Split Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Strip encoding
# ---------------------------------------------------------------------------
[encoding]
# Quality for JPEG strips (1 = worst, 100 = best).
# PNG and WebP strips are always written lossless.
jpeg_quality = 100

# ---------------------------------------------------------------------------
# Decoding
# ---------------------------------------------------------------------------
[decode]
# Give up on an image that takes longer than this to decode.
timeout_secs = 30

# ---------------------------------------------------------------------------
# Export
# ---------------------------------------------------------------------------
[export]
# Pause between saves when exporting all four strips, in milliseconds.
pacing_delay_ms = 100

# ---------------------------------------------------------------------------
# Sharing
# ---------------------------------------------------------------------------
[share]
# Program used by `split --share`, as an argv list. The strip's file path is
# appended as the last argument and its title is passed in the
# SIMPLE_SPLIT_SHARE_TITLE environment variable. Exit status 130 counts as
# "cancelled"; any other failure falls back to saving the file.
# Without a command, sharing always falls back to saving.
# command = ["my-share-tool"]

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel strip encoders.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
