//! prettyrc-core - Prettier configuration as typed data
//!
//! Models the configuration record a Prettier-compatible formatter consumes:
//! base options, an ordered plugin list and an ordered list of per-path
//! overrides. The record is immutable once built.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use prettyrc_core::{loader, Preset};
//!
//! let config = Preset::Workspace.config().unwrap();
//!
//! let json = loader::to_json_string(&config).unwrap();
//! assert_eq!(loader::from_json_str(&json).unwrap(), config);
//!
//! let opts = config.resolve(Path::new("package.json"));
//! assert_eq!(opts.parser.as_deref(), Some("json-stringify"));
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod options;
pub mod overrides;
pub mod parsers;
pub mod plugins;
pub mod presets;
pub mod schema;


// Re-export main types and functions
pub use config::{FormatterConfiguration, FormatterConfigurationBuilder};
pub use error::{ConfigError, Result};
pub use loader::{discover, load_file, ConfigFormat, LoadedConfig};
pub use options::{
    ArrowParens, EmbeddedLanguageFormatting, EndOfLine, FormatOptions, HtmlWhitespaceSensitivity,
    ObjectWrap, ProseWrap, QuoteProps, TrailingComma,
};
pub use overrides::{FilePatterns, Override};
pub use parsers::infer_parser;
pub use plugins::{PluginId, PluginRegistry, PluginSpec};
pub use presets::Preset;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
