//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::{glob, Pattern};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use prettyrc_core::diagnostics::Diagnostic;
use prettyrc_core::loader::{self, ConfigFormat, LoadedConfig};
use prettyrc_core::{FormatOptions, PluginRegistry, Preset};
use prettyrc_validate::ValidationEngine;

/// Directories never descended into when listing files
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

/// File format for generated configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FileFormat {
    /// `.prettierrc.json`
    #[default]
    Json,
    /// `.prettierrc.toml`
    Toml,
}

impl FileFormat {
    /// Conventional file name for this format
    pub fn default_file_name(self) -> &'static str {
        match self {
            FileFormat::Json => ".prettierrc.json",
            FileFormat::Toml => ".prettierrc.toml",
        }
    }
}

#[derive(Parser)]
#[command(name = "prettyrc")]
#[command(author, version, about = "Check, generate and resolve Prettier configuration", long_about = None)]
struct Cli {
    /// Log what the tool is doing to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Check {
        /// Configuration file (defaults to the one governing the current directory)
        input: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Fail on warnings as well as errors
        #[arg(long)]
        strict: bool,

        /// Suppress diagnostics by code or code prefix (repeatable)
        #[arg(long, value_name = "CODE")]
        ignore: Vec<String>,
    },

    /// Print a built-in preset
    Show {
        /// Preset name
        preset: String,

        /// Serialization format
        #[arg(short, long, value_enum, default_value = "json")]
        format: FileFormat,
    },

    /// List the built-in presets
    Presets,

    /// Write a built-in preset to a configuration file
    Init {
        /// Preset name
        preset: String,

        /// Serialization format
        #[arg(short, long, value_enum, default_value = "json")]
        format: FileFormat,

        /// Output file (defaults to .prettierrc.json or .prettierrc.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the options that apply to a file
    Resolve {
        /// File to resolve options for (need not exist)
        file: PathBuf,

        /// Configuration file (defaults to the one governing the file)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Fill in the formatter defaults and the inferred parser
        #[arg(long)]
        defaults: bool,
    },

    /// List files matched by at least one override
    LsFiles {
        /// Directory to scan
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Configuration file (defaults to the one governing the directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check {
            input,
            format,
            strict,
            ignore,
        } => {
            check_command(input.as_deref(), format, strict, &ignore)?;
        }
        Commands::Show { preset, format } => {
            show_command(&preset, format)?;
        }
        Commands::Presets => {
            presets_command();
        }
        Commands::Init {
            preset,
            format,
            output,
            force,
        } => {
            init_command(&preset, format, output.as_deref(), force)?;
        }
        Commands::Resolve {
            file,
            config,
            defaults,
        } => {
            resolve_command(&file, config.as_deref(), defaults)?;
        }
        Commands::LsFiles { dir, config } => {
            ls_files_command(&dir, config.as_deref())?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        debug!("tracing subscriber not installed: {}", e);
    }
}

/// Validate the configuration file at `path`, dropping diagnostics matched by `ignore`
pub fn check_file(path: &Path, ignore: &[String]) -> Result<Vec<Diagnostic>> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
    }

    let format = ConfigFormat::from_path(path)
        .with_context(|| format!("Cannot tell the format of {}", path.display()))?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    let engine = ignore
        .iter()
        .fold(ValidationEngine::with_defaults(), |engine, code| engine.ignore(code.as_str()));
    let diagnostics = engine
        .validate_str(&content, format)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;

    Ok(diagnostics
        .into_iter()
        .map(|d| d.with_file(path.display().to_string()))
        .collect())
}

/// Execute the check command
pub fn check_command(
    input: Option<&Path>,
    format: OutputFormat,
    strict: bool,
    ignore: &[String],
) -> Result<()> {
    let path = match input {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            loader::find_config_file(&cwd)
                .context("Failed to search for a configuration file")?
                .ok_or_else(|| {
                    anyhow::anyhow!("No configuration file found from {}", cwd.display())
                })?
        }
    };

    let diagnostics = check_file(&path, ignore)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&diagnostics)
                .context("Failed to serialize diagnostics to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if diagnostics.is_empty() {
                println!("✓ No issues found in {}", path.display());
            } else {
                for diag in &diagnostics {
                    println!("{}", diag);
                    println!();
                }
            }
        }
    }

    let error_count = diagnostics.iter().filter(|d| d.is_error()).count();
    let warning_count = diagnostics.iter().filter(|d| d.is_warning()).count();
    if error_count > 0 || (strict && warning_count > 0) {
        anyhow::bail!(
            "Found {} error(s) and {} warning(s) in {}",
            error_count,
            warning_count,
            path.display()
        );
    }

    Ok(())
}

/// Serialize the named preset
pub fn render_preset(name: &str, format: FileFormat) -> Result<String> {
    let preset = Preset::from_name(name).with_context(|| {
        let names: Vec<_> = Preset::all().iter().map(|p| p.name()).collect();
        format!("Available presets: {}", names.join(", "))
    })?;
    let config = preset
        .config()
        .with_context(|| format!("Failed to build preset: {}", preset))?;

    let text = match format {
        FileFormat::Json => loader::to_json_string(&config),
        FileFormat::Toml => loader::to_toml_string(&config),
    }
    .with_context(|| format!("Failed to serialize preset: {}", preset))?;
    Ok(text)
}

/// Execute the show command
pub fn show_command(name: &str, format: FileFormat) -> Result<()> {
    print!("{}", render_preset(name, format)?);
    Ok(())
}

/// Execute the presets command
pub fn presets_command() {
    for preset in Preset::all() {
        println!("{:<12} {}", preset.name(), preset.description());
    }
}

/// Execute the init command, returning the written path
pub fn init_command(
    name: &str,
    format: FileFormat,
    output: Option<&Path>,
    force: bool,
) -> Result<PathBuf> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format.default_file_name()));

    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            output.display()
        );
    }

    let content = render_preset(name, format)?;
    fs::write(&output, content)
        .with_context(|| format!("Failed to write config file: {}", output.display()))?;
    println!("Created: {}", output.display());

    Ok(output)
}

/// Load `config`, or discover the configuration governing `start_dir`
fn load_config(config: Option<&Path>, start_dir: &Path) -> Result<LoadedConfig> {
    match config {
        Some(path) => {
            let path = absolute(path)?;
            loader::load_file(&path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        }
        None => loader::discover(start_dir).with_context(|| {
            format!("Failed to find a configuration for {}", start_dir.display())
        }),
    }
}

/// Options that apply to `file`
pub fn resolve_options(file: &Path, config: Option<&Path>, defaults: bool) -> Result<FormatOptions> {
    let file = absolute(file)?;
    let start_dir = file.parent().unwrap_or_else(|| Path::new("/"));
    let loaded = load_config(config, start_dir)?;
    let relative = loaded.relative_path(&file);
    debug!(config = %loaded.path.display(), file = %relative.display(), "resolving");

    Ok(if defaults {
        loaded
            .config
            .resolve_with_defaults(relative, &PluginRegistry::with_builtins())
    } else {
        loaded.config.resolve(relative)
    })
}

/// Execute the resolve command
pub fn resolve_command(file: &Path, config: Option<&Path>, defaults: bool) -> Result<()> {
    let options = resolve_options(file, config, defaults)?;
    let json = serde_json::to_string_pretty(&options).context("Failed to serialize options")?;
    println!("{}", json);
    Ok(())
}

/// Files under `dir` matched by at least one override, with the override indices
pub fn collect_matches(dir: &Path, config: Option<&Path>) -> Result<Vec<(PathBuf, Vec<usize>)>> {
    let dir = absolute(dir)?;
    if !dir.is_dir() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }
    let loaded = load_config(config, &dir)?;

    let pattern = format!("{}/**/*", Pattern::escape(&dir.display().to_string()));
    let mut matches = Vec::new();
    for entry in glob(&pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Could not read {}", e);
                continue;
            }
        };
        if !path.is_file() || is_skipped(&path) {
            continue;
        }

        let relative = loaded.relative_path(&path);
        let indices = loaded.config.matching_overrides(relative);
        if !indices.is_empty() {
            matches.push((relative.to_path_buf(), indices));
        }
    }

    Ok(matches)
}

/// Execute the ls-files command
pub fn ls_files_command(dir: &Path, config: Option<&Path>) -> Result<()> {
    let matches = collect_matches(dir, config)?;
    for (path, indices) in &matches {
        let list: Vec<_> = indices.iter().map(|i| i.to_string()).collect();
        println!("{}  [{}]", path.display(), list.join(", "));
    }
    println!();
    println!("{} file(s) matched", matches.len());
    Ok(())
}

fn is_skipped(path: &Path) -> bool {
    path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
    })
}

/// `path` made absolute against the current directory, with `.` and `..` folded away
fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to read current directory")?
            .join(path)
    };
    Ok(normalize(&joined))
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
