//! The formatter configuration record
//!
//! A [`FormatterConfiguration`] is built once, through
//! [`FormatterConfigurationBuilder`] or by deserializing a file, and is
//! read-only afterwards. Construction enforces the structural invariants:
//!
//! - every override lists at least one file pattern
//! - every pattern is a valid glob
//! - no plugin is listed twice
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use prettyrc_core::{FilePatterns, FormatOptions, FormatterConfiguration, Override};
//!
//! let config = FormatterConfiguration::builder()
//!     .options(FormatOptions { print_width: Some(100), ..Default::default() })
//!     .add_override(Override::new(
//!         FilePatterns::new(["*.md"]),
//!         FormatOptions { print_width: Some(72), ..Default::default() },
//!     ))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.resolve(Path::new("README.md")).print_width, Some(72));
//! assert_eq!(config.resolve(Path::new("main.ts")).print_width, Some(100));
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::options::FormatOptions;
use crate::overrides::{Override, OverrideMatcher};
use crate::parsers::infer_parser;
use crate::plugins::{PluginId, PluginRegistry};

/// On-disk shape of a configuration, before invariants are checked
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct RawConfiguration {
    #[serde(flatten)]
    options: FormatOptions,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    plugins: Vec<PluginId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    overrides: Vec<Override>,
}

/// Formatting preferences handed to the formatter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConfiguration", into = "RawConfiguration")]
pub struct FormatterConfiguration {
    options: FormatOptions,
    plugins: Vec<PluginId>,
    overrides: Vec<Override>,
    matchers: Vec<OverrideMatcher>,
}

impl TryFrom<RawConfiguration> for FormatterConfiguration {
    type Error = ConfigError;

    fn try_from(raw: RawConfiguration) -> Result<Self> {
        let mut seen = HashSet::new();
        for plugin in &raw.plugins {
            if !seen.insert(plugin.as_str()) {
                return Err(ConfigError::DuplicatePlugin(plugin.to_string()));
            }
        }

        let matchers = raw
            .overrides
            .iter()
            .enumerate()
            .map(|(index, entry)| OverrideMatcher::compile(index, entry))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            options: raw.options,
            plugins: raw.plugins,
            overrides: raw.overrides,
            matchers,
        })
    }
}

impl From<FormatterConfiguration> for RawConfiguration {
    fn from(config: FormatterConfiguration) -> Self {
        Self {
            options: config.options,
            plugins: config.plugins,
            overrides: config.overrides,
        }
    }
}

impl FormatterConfiguration {
    /// Start building a configuration
    pub fn builder() -> FormatterConfigurationBuilder {
        FormatterConfigurationBuilder::default()
    }

    /// Base options, before any override
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Plugins in load order
    pub fn plugins(&self) -> &[PluginId] {
        &self.plugins
    }

    /// Overrides in declaration order
    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    /// Check whether `id` is among the loaded plugins
    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.iter().any(|p| p.as_str() == id)
    }

    /// Indices of the overrides that apply to `path`
    pub fn matching_overrides(&self, path: &Path) -> Vec<usize> {
        self.matchers
            .iter()
            .enumerate()
            .filter(|(_, matcher)| matcher.matches(path))
            .map(|(index, _)| index)
            .collect()
    }

    /// Options for `path` (relative to the configuration's directory)
    ///
    /// Base options first, then each matching override in order; a key set by
    /// a later override replaces the same key from an earlier one.
    pub fn resolve(&self, path: &Path) -> FormatOptions {
        let mut resolved = self.options.clone();
        for index in self.matching_overrides(path) {
            debug!(path = %path.display(), index, "applying override");
            resolved.merge_from(&self.overrides[index].options);
        }
        resolved
    }

    /// Like [`resolve`](Self::resolve), layered over the formatter defaults,
    /// with `parser` inferred from the file name when nothing sets it
    pub fn resolve_with_defaults(&self, path: &Path, registry: &PluginRegistry) -> FormatOptions {
        let mut resolved = FormatOptions::defaults().merged(&self.resolve(path));
        if resolved.parser.is_none() {
            let loaded = registry.subset(&self.plugins);
            resolved.parser = infer_parser(path, &loaded).map(str::to_string);
        }
        resolved
    }

    /// The configuration as a JSON value, the shape validators consume
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Builder for [`FormatterConfiguration`]
#[derive(Debug, Clone, Default)]
pub struct FormatterConfigurationBuilder {
    raw: RawConfiguration,
}

impl FormatterConfigurationBuilder {
    /// Set the base options
    pub fn options(mut self, options: FormatOptions) -> Self {
        self.raw.options = options;
        self
    }

    /// Append a plugin
    pub fn plugin(mut self, id: impl Into<PluginId>) -> Self {
        self.raw.plugins.push(id.into());
        self
    }

    /// Append several plugins, keeping their order
    pub fn plugins<I, P>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PluginId>,
    {
        self.raw.plugins.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Append an override
    pub fn add_override(mut self, entry: Override) -> Self {
        self.raw.overrides.push(entry);
        self
    }

    /// Check invariants and freeze the configuration
    pub fn build(self) -> Result<FormatterConfiguration> {
        FormatterConfiguration::try_from(self.raw)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::overrides::FilePatterns;

    #[test]
    fn test_default_is_empty() {
        let config = FormatterConfiguration::default();
        assert!(config.options().is_empty());
        assert!(config.plugins().is_empty());
        assert_eq!(config.to_json_value().unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_builder_rejects_duplicate_plugin() {
        let err = FormatterConfiguration::builder()
            .plugins(["prettier-plugin-sh", "prettier-plugin-pkg", "prettier-plugin-sh"])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePlugin(id) if id == "prettier-plugin-sh"));
    }

    #[test]
    fn test_builder_rejects_invalid_glob() {
        let err = FormatterConfiguration::builder()
            .add_override(Override::new(
                FilePatterns::new(["*.{js"]),
                FormatOptions::new(),
            ))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGlob { .. }));
    }

    #[test]
    fn test_deserialize_enforces_invariants() {
        let result: std::result::Result<FormatterConfiguration, _> =
            serde_json::from_str(r#"{ "overrides": [{ "files": [], "options": {} }] }"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("empty `files` list"), "{}", message);
    }

    #[test]
    fn test_has_plugin() {
        let config = FormatterConfiguration::builder()
            .plugin("prettier-plugin-pkg")
            .build()
            .unwrap();
        assert!(config.has_plugin("prettier-plugin-pkg"));
        assert!(!config.has_plugin("prettier-plugin-sh"));
    }
}
