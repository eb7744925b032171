//! prettyrc CLI - Command-line interface library
//!
//! This library provides the CLI functionality for prettyrc, including:
//! - Check: Validate a configuration file
//! - Show / Init: Print or write a built-in preset
//! - Resolve: Compute the options that apply to one file
//! - Ls-files: List the files each override reaches
//!
//! # Binary Usage
//!
//! ```bash
//! # Validate the configuration governing the current directory
//! prettyrc check --strict
//!
//! # Start a project from the workspace preset
//! prettyrc init workspace --format toml
//!
//! # Which options will package.json be formatted with?
//! prettyrc resolve package.json --defaults
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{
    check_command, check_file, collect_matches, init_command, ls_files_command, presets_command,
    render_preset, resolve_command, resolve_options, show_command,
};
pub use app::{run_cli, FileFormat, OutputFormat};
