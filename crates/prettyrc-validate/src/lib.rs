//! prettyrc-validate - Configuration validation engine
//!
//! This crate checks the shape of a formatter configuration and reports
//! diagnostics instead of failing on the first problem.
//!
//! # Architecture
//!
//! Individual validators implement the [`Validator`] trait and inspect a
//! [`ConfigDocument`], the raw JSON form of a configuration. The
//! [`ValidationEngine`] runs every registered validator and collects their
//! diagnostics.
//!
//! # Example
//!
//! ```
//! use prettyrc_core::Preset;
//! use prettyrc_validate::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let config = Preset::Workspace.config().unwrap();
//!
//! let diagnostics = engine.validate_config(&config).unwrap();
//! assert!(diagnostics.is_empty());
//! ```

pub mod document;
pub mod keys;
pub mod overrides;
pub mod plugins;
pub mod values;

use tracing::debug;

use prettyrc_core::diagnostics::Diagnostic;
use prettyrc_core::loader::{self, ConfigFormat};
use prettyrc_core::plugins::PluginRegistry;
use prettyrc_core::{FormatterConfiguration, Result};

pub use document::ConfigDocument;
pub use keys::OptionKeyValidator;
pub use overrides::OverrideValidator;
pub use plugins::PluginListValidator;
pub use values::OptionValueValidator;

/// Trait for configuration validators
///
/// Validators inspect a document and return a list of diagnostics
/// for any issues found. Each validator has a unique code prefix
/// for its diagnostics.
pub trait Validator: Send + Sync {
    /// Get the validator's unique code prefix (e.g., "PRC1" for overrides)
    fn code(&self) -> &'static str;

    /// Get a human-readable name for this validator
    fn name(&self) -> &'static str {
        "unnamed"
    }

    /// Validate the document and return any diagnostics
    fn validate(&self, doc: &ConfigDocument<'_>) -> Vec<Diagnostic>;
}

/// Validation engine that orchestrates multiple validators
pub struct ValidationEngine {
    /// Registered validators
    validators: Vec<Box<dyn Validator>>,
    /// Plugins whose options and parsers are recognized
    registry: PluginRegistry,
    /// Code prefixes whose diagnostics are suppressed
    ignored: Vec<String>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationEngine {
    /// Create an engine with no validators that knows the built-in plugins
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
            registry: PluginRegistry::with_builtins(),
            ignored: Vec::new(),
        }
    }

    /// Create an engine with default validators
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_validator(Box::new(PluginListValidator));
        engine.add_validator(Box::new(OverrideValidator));
        engine.add_validator(Box::new(OptionKeyValidator));
        engine.add_validator(Box::new(OptionValueValidator));
        engine
    }

    /// Replace the plugin registry
    pub fn with_registry(mut self, registry: PluginRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Suppress diagnostics whose code starts with `code`
    ///
    /// A prefix that covers a validator's own code (e.g. `PRC2`) skips that
    /// validator entirely.
    pub fn ignore(mut self, code: impl Into<String>) -> Self {
        self.ignored.push(code.into());
        self
    }

    fn is_ignored(&self, code: &str) -> bool {
        self.ignored.iter().any(|prefix| code.starts_with(prefix.as_str()))
    }

    /// Add a validator to the engine
    pub fn add_validator(&mut self, validator: Box<dyn Validator>) {
        self.validators.push(validator);
    }

    /// Get the number of registered validators
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Get the names of all registered validators
    pub fn validator_names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Validate a raw configuration document
    pub fn validate_value(&self, value: &serde_json::Value) -> Vec<Diagnostic> {
        if !value.is_object() {
            let diagnostic = Diagnostic::error("A configuration must be an object")
                .with_code("PRC000")
                .with_help("Wrap the options in `{ ... }`");
            return self.retain(vec![diagnostic]);
        }

        let doc = ConfigDocument::new(value, &self.registry);
        let mut diagnostics = Vec::new();
        for validator in &self.validators {
            if self.is_ignored(validator.code()) {
                debug!(validator = validator.name(), "validator skipped");
                continue;
            }
            let found = validator.validate(&doc);
            debug!(validator = validator.name(), count = found.len(), "validator finished");
            diagnostics.extend(found);
        }
        self.retain(diagnostics)
    }

    fn retain(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        diagnostics
            .into_iter()
            .filter(|d| !d.code.as_deref().is_some_and(|code| self.is_ignored(code)))
            .collect()
    }

    /// Validate an already-built configuration
    pub fn validate_config(&self, config: &FormatterConfiguration) -> Result<Vec<Diagnostic>> {
        Ok(self.validate_value(&config.to_json_value()?))
    }

    /// Parse `content` in the given format and validate it
    ///
    /// Syntax errors are returned as `Err`. A `package.json` without a
    /// `prettier` section yields a single `PRC003` info.
    pub fn validate_str(&self, content: &str, format: ConfigFormat) -> Result<Vec<Diagnostic>> {
        match loader::parse_value(content, format)? {
            Some(value) => Ok(self.validate_value(&value)),
            None => Ok(self.retain(vec![Diagnostic::info(
                "No `prettier` section; the formatter will look further up",
            )
            .with_code("PRC003")
            .with_key("prettier")])),
        }
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
