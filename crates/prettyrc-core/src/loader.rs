//! Configuration files
//!
//! Reads and writes [`FormatterConfiguration`]s as JSON (`.prettierrc`,
//! `.prettierrc.json`), TOML (`.prettierrc.toml`) or the `prettier` key of a
//! `package.json`, and finds the file that governs a directory.
//!
//! # Discovery
//!
//! Starting at a directory and walking up to the filesystem root, each
//! directory is checked for, in order:
//!
//! 1. `package.json` with a `prettier` object
//! 2. `.prettierrc`
//! 3. `.prettierrc.json`
//! 4. `.prettierrc.toml`
//!
//! The first hit wins. JavaScript configuration files are noticed and logged
//! but never evaluated.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::FormatterConfiguration;
use crate::error::{ConfigError, Result};
use crate::options::FormatOptions;

/// File names checked in every directory, in priority order
pub const SEARCH_ORDER: &[&str] = &[
    "package.json",
    ".prettierrc",
    ".prettierrc.json",
    ".prettierrc.toml",
];

/// Configuration files that need a JavaScript runtime
pub const SCRIPT_CONFIGS: &[&str] = &[
    "prettier.config.js",
    "prettier.config.mjs",
    "prettier.config.cjs",
    ".prettierrc.js",
    ".prettierrc.mjs",
    ".prettierrc.cjs",
];

/// Serialization format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// A JSON object holding the configuration
    Json,
    /// A TOML document holding the configuration
    Toml,
    /// The `prettier` key of a `package.json`
    PackageJson,
}

impl ConfigFormat {
    /// Pick the format from a file name
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

        match name {
            "package.json" => Ok(ConfigFormat::PackageJson),
            ".prettierrc" => Ok(ConfigFormat::Json),
            _ if name.ends_with(".json") => Ok(ConfigFormat::Json),
            _ if name.ends_with(".toml") => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Parse a JSON configuration
pub fn from_json_str(content: &str) -> Result<FormatterConfiguration> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a TOML configuration
pub fn from_toml_str(content: &str) -> Result<FormatterConfiguration> {
    Ok(toml::from_str(content)?)
}

/// Serialize as pretty-printed JSON with a trailing newline
pub fn to_json_string(config: &FormatterConfiguration) -> Result<String> {
    let mut out = serde_json::to_string_pretty(config)?;
    out.push('\n');
    Ok(out)
}

/// Serialize as TOML
pub fn to_toml_string(config: &FormatterConfiguration) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

/// Parse `content` as the given format, as raw JSON
///
/// Validators work on this shape; it does not enforce any invariant.
pub fn parse_value(content: &str, format: ConfigFormat) -> Result<Option<serde_json::Value>> {
    match format {
        ConfigFormat::Json => Ok(Some(serde_json::from_str(content)?)),
        ConfigFormat::Toml => Ok(Some(toml::from_str(content)?)),
        ConfigFormat::PackageJson => {
            let mut manifest: serde_json::Value = serde_json::from_str(content)?;
            Ok(manifest
                .get_mut("prettier")
                .filter(|section| section.is_object())
                .map(serde_json::Value::take))
        }
    }
}

/// Parse `content` as the given format
///
/// Returns `None` for a `package.json` without a `prettier` object.
pub fn parse_str(content: &str, format: ConfigFormat) -> Result<Option<FormatterConfiguration>> {
    match format {
        ConfigFormat::Json => from_json_str(content).map(Some),
        ConfigFormat::Toml => from_toml_str(content).map(Some),
        ConfigFormat::PackageJson => parse_value(content, format)?
            .map(|section| serde_json::from_value(section).map_err(ConfigError::from))
            .transpose(),
    }
}

/// A configuration together with the file it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    /// The configuration file
    pub path: PathBuf,
    /// Its format
    pub format: ConfigFormat,
    /// The parsed configuration
    pub config: FormatterConfiguration,
}

impl LoadedConfig {
    /// Directory override patterns are relative to
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// `file` relative to [`dir`](Self::dir), or unchanged if it lies elsewhere
    pub fn relative_path<'a>(&self, file: &'a Path) -> &'a Path {
        match file.strip_prefix(self.dir()) {
            Ok(relative) => relative,
            Err(_) => {
                if file.is_absolute() {
                    debug!(file = %file.display(), dir = %self.dir().display(), "file outside config directory");
                }
                file
            }
        }
    }

    /// Options for `file` from this configuration
    pub fn resolve_file(&self, file: &Path) -> FormatOptions {
        self.config.resolve(self.relative_path(file))
    }
}

/// Load a configuration file, picking the format from its name
pub fn load_file(path: &Path) -> Result<LoadedConfig> {
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let config = parse_str(&content, format)?
        .ok_or_else(|| ConfigError::NoConfigFound(path.to_path_buf()))?;

    info!(path = %path.display(), overrides = config.overrides().len(), "loaded configuration");
    Ok(LoadedConfig {
        path: path.to_path_buf(),
        format,
        config,
    })
}

/// Path of the configuration file governing `start_dir`, if any
pub fn find_config_file(start_dir: &Path) -> Result<Option<PathBuf>> {
    for dir in start_dir.ancestors() {
        for name in SEARCH_ORDER {
            let candidate = dir.join(name);
            if !candidate.is_file() {
                continue;
            }
            if *name == "package.json" && !has_prettier_key(&candidate)? {
                debug!(path = %candidate.display(), "package.json without prettier key");
                continue;
            }
            debug!(path = %candidate.display(), "found configuration");
            return Ok(Some(candidate));
        }

        for name in SCRIPT_CONFIGS {
            let script = dir.join(name);
            if script.is_file() {
                warn!(path = %script.display(), "JavaScript configuration is not evaluated");
            }
        }
    }
    Ok(None)
}

/// Find and load the configuration governing `start_dir`
pub fn discover(start_dir: &Path) -> Result<LoadedConfig> {
    match find_config_file(start_dir)? {
        Some(path) => load_file(&path),
        None => Err(ConfigError::NoConfigFound(start_dir.to_path_buf())),
    }
}

fn has_prettier_key(manifest: &Path) -> Result<bool> {
    let content = fs::read_to_string(manifest).map_err(|e| ConfigError::io(manifest, e))?;
    Ok(parse_value(&content, ConfigFormat::PackageJson)?.is_some())
}
