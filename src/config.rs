//! Run configuration module.
//!
//! Handles loading, validating, and merging `roundel.toml`. Stock defaults
//! reproduce the classic PWA icon set; a config file only needs the keys it
//! wants to change, and CLI flags override both.
//!
//! ## Config File Location
//!
//! `roundel.toml` is read from the current directory when present. Pass
//! `--config <FILE>` to use another file; an explicit file that does not
//! exist is an error rather than a silent fallback to defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source = "public/icon.png"   # Image to turn into icons
//! border_ratio = 0.0           # White ring width as a fraction of the side, [0, 0.5)
//! on_write_error = "abort"     # "abort" or "continue"
//!
//! [[targets]]
//! path = "public/icon.png"     # Size from filename: capped at 512
//!
//! [[targets]]
//! path = "public/pwa-192x192.png"
//!
//! [[targets]]
//! path = "public/pwa-512x512.png"
//! # size = 512                # Optional exact size, overrides the filename hint
//!
//! [processing]
//! max_processes = 4            # Max parallel writers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::compose::{IconOptions, WritePolicy};
use crate::imaging::{BorderRatio, Resolution};
use crate::targets::OutputTarget;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "roundel.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Icon configuration loaded from `roundel.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconConfig {
    /// Source image path.
    pub source: PathBuf,
    /// Border width as a fraction of the square side. 0 disables the border.
    pub border_ratio: f64,
    /// Whether a failed write stops the run or lets the other targets finish.
    pub on_write_error: WritePolicy,
    /// Output files, written in order.
    pub targets: Vec<TargetConfig>,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("public/icon.png"),
            border_ratio: 0.0,
            on_write_error: WritePolicy::Abort,
            targets: vec![
                TargetConfig::hinted("public/icon.png"),
                TargetConfig::hinted("public/pwa-192x192.png"),
                TargetConfig::hinted("public/pwa-512x512.png"),
            ],
            processing: ProcessingConfig::default(),
        }
    }
}

impl IconConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        BorderRatio::new(self.border_ratio)
            .map_err(|e| ConfigError::Validation(format!("border_ratio: {e}")))?;
        if self.targets.is_empty() {
            return Err(ConfigError::Validation("targets must not be empty".into()));
        }
        if let Some(t) = self.targets.iter().find(|t| t.size == Some(0)) {
            return Err(ConfigError::Validation(format!(
                "targets.size must be non-zero ({})",
                t.path.display()
            )));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Pipeline options. Call [`validate`](Self::validate) first.
    pub fn icon_options(&self) -> Result<IconOptions, ConfigError> {
        let border = BorderRatio::new(self.border_ratio)
            .map_err(|e| ConfigError::Validation(format!("border_ratio: {e}")))?;
        Ok(IconOptions {
            border,
            on_write_error: self.on_write_error,
        })
    }

    /// Resolved output targets, in config order.
    pub fn output_targets(&self) -> Vec<OutputTarget> {
        self.targets.iter().map(TargetConfig::to_target).collect()
    }
}

/// One output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub path: PathBuf,
    /// Exact square size. When absent the size comes from the filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl TargetConfig {
    pub fn hinted(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: None,
        }
    }

    pub fn to_target(&self) -> OutputTarget {
        match self.size {
            Some(size) => OutputTarget::new(&self.path, Resolution::square(size)),
            None => OutputTarget::from_path_hint(&self.path),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel writers.
    /// When absent, defaults to the number of CPU cores.
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
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Used as the base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(IconConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a user
///   `[[targets]]` list replaces the stock list rather than extending it.
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

/// Parse config text, merge it over the stock defaults and validate.
pub fn parse_config(content: &str) -> Result<IconConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(content)?;
    let merged = merge_toml(stock_defaults_value()?, overlay);
    let config: IconConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the run configuration.
///
/// - `Some(path)`: the file must exist.
/// - `None`: `roundel.toml` in `dir` if present, otherwise stock defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<IconConfig, ConfigError> {
    let path = match explicit {
        Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if !candidate.exists() {
                return Ok(IconConfig::default());
            }
            candidate
        }
    };
    let content = fs::read_to_string(&path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `roundel.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Roundel Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# Image to turn into icons. Any JPEG, PNG, TIFF or WebP file.
# It is read fully before any output is written, so it may also be a target.
source = "public/icon.png"

# Width of a white ring around the icon, as a fraction of the square side.
# 0.0 draws no border. Must be at least 0.0 and below 0.5.
# Example: 0.05 on a 768px source gives a 38px ring.
border_ratio = 0.0

# What to do when a target cannot be written:
#   "abort"    - stop at the first failure (earlier files stay written)
#   "continue" - write every other target, then report all failures
on_write_error = "abort"

# ---------------------------------------------------------------------------
# Output targets
# ---------------------------------------------------------------------------
# Each target is a PNG file. Without an explicit size, the filename decides:
#   contains "192x192" -> 192x192
#   contains "512x512" -> 512x512
#   anything else      -> the icon's own size, capped at 512x512
# Set `size = N` for an exact NxN output regardless of the name.
# Parent directories must already exist. Existing files are overwritten.

[[targets]]
path = "public/icon.png"

[[targets]]
path = "public/pwa-192x192.png"

[[targets]]
path = "public/pwa-512x512.png"

# ---------------------------------------------------------------------------
# Parallel processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel writers when on_write_error = "continue".
# Omit to use all CPU cores. Values above the core count are clamped.
# max_processes = 4
"##
}
