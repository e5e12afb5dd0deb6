//! Configuration parsing for proxylauncher.
//!
//! The configuration is a flat `key=value` text file with `#` comments:
//!
//! ```text
//! target=<path, required>
//! extraArgs=<string, optional>
//! extraArgsOrder=before|after
//! hideTarget=true|false|yes|no|on|off
//! ```
//!
//! Keys are case-insensitive, values may be wrapped in one pair of double
//! quotes, and a key may appear only once.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::default_config_text;
use crate::executor::FileProbe;
use crate::planner::resolve_target;

// ============================================================================
// Types
// ============================================================================

/// Where the configured extra arguments go relative to the received ones.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ExtraArgsOrder {
    Before,
    After,
}

impl ExtraArgsOrder {
    /// Canonical lowercase spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            ExtraArgsOrder::Before => "before",
            ExtraArgsOrder::After => "after",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "before" => Some(ExtraArgsOrder::Before),
            "after" => Some(ExtraArgsOrder::After),
            _ => None,
        }
    }
}

impl fmt::Display for ExtraArgsOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated launcher configuration.
///
/// Records returned by [`parse_config`] always have a non-empty `target` and
/// an order whenever `extra_args` is non-empty.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConfigRecord {
    pub target: String,
    pub extra_args: String,
    pub extra_args_order: Option<ExtraArgsOrder>,
    pub hide_target: bool,
}

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("target executable not specified in config")]
    MissingTarget,

    #[error("duplicate key in config: {0}")]
    DuplicateKey(String),

    #[error("invalid {key} value {value:?}, must be {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("extraArgsOrder must be specified when extraArgs is set")]
    MissingOrderForExtraArgs,

    #[error("error opening config file {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("target executable not found: {}", .0.display())]
    TargetNotFound(PathBuf),
}

// ============================================================================
// Parsing
// ============================================================================

const TRUTHY: [&str; 3] = ["true", "yes", "on"];
const FALSY: [&str; 3] = ["false", "no", "off"];

fn parse_bool(value: &str) -> Option<bool> {
    let lower = value.to_ascii_lowercase();
    if TRUTHY.contains(&lower.as_str()) {
        Some(true)
    } else if FALSY.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Strip exactly one pair of surrounding double quotes, if present.
fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parse configuration lines into a validated [`ConfigRecord`].
///
/// Blank lines, `#` comments, lines without `=`, and unknown keys are
/// skipped. The first error aborts the whole parse.
pub fn parse_config<I, S>(lines: I) -> Result<ConfigRecord, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut config = ConfigRecord::default();
    let mut seen: HashSet<String> = HashSet::new();

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let folded = key.to_ascii_lowercase();

        if !seen.insert(folded.clone()) {
            return Err(ConfigError::DuplicateKey(key.to_string()));
        }

        let value = unquote(value.trim());

        match folded.as_str() {
            "target" => config.target = value.to_string(),
            "extraargs" => config.extra_args = value.to_string(),
            "extraargsorder" => {
                let order =
                    ExtraArgsOrder::parse(value).ok_or_else(|| ConfigError::InvalidValue {
                        key: "extraArgsOrder",
                        value: value.to_string(),
                        expected: "'before' or 'after'",
                    })?;
                config.extra_args_order = Some(order);
            }
            "hidetarget" => {
                config.hide_target = parse_bool(value).ok_or_else(|| ConfigError::InvalidValue {
                    key: "hideTarget",
                    value: value.to_string(),
                    expected: "'true/yes/on' or 'false/no/off'",
                })?;
            }
            _ => {}
        }
    }

    if config.target.is_empty() {
        return Err(ConfigError::MissingTarget);
    }

    if !config.extra_args.is_empty() && config.extra_args_order.is_none() {
        return Err(ConfigError::MissingOrderForExtraArgs);
    }

    Ok(config)
}

/// Parse a whole configuration text.
pub fn parse_config_str(text: &str) -> Result<ConfigRecord, ConfigError> {
    parse_config(text.lines())
}

// ============================================================================
// File Loading
// ============================================================================

/// Directory that relative `target` paths are resolved against.
pub fn config_base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Read, parse, and check a configuration file.
///
/// The target is resolved against the file's directory and must exist as a
/// regular file according to `probe`.
pub fn load_config(path: &Path, probe: &dyn FileProbe) -> Result<ConfigRecord, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config_str(&text)?;

    let resolved = resolve_target(&config.target, &config_base_dir(path));
    if !probe.is_file(&resolved) {
        return Err(ConfigError::TargetNotFound(resolved));
    }

    Ok(config)
}

/// Write the commented default configuration to `path`.
pub fn write_default_config(path: &Path) -> Result<()> {
    std::fs::write(path, default_config_text())
        .with_context(|| format!("failed to write default config at {}", path.display()))
}

// ============================================================================
// Tests
// ============================================================================
