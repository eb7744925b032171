//! Built-in configuration presets
//!
//! Two variants of the project configuration exist. Both share the base
//! formatting preferences and differ in their plugin lists and override sets:
//!
//! - `workspace`: repositories that also carry shell tooling; loads the shell
//!   plugin and formats scripts with tabs
//! - `package`: JavaScript/TypeScript packages without shell scripts

use std::fmt;
use std::str::FromStr;

use crate::config::FormatterConfiguration;
use crate::error::{ConfigError, Result};
use crate::options::{
    ArrowParens, EmbeddedLanguageFormatting, FormatOptions, HtmlWhitespaceSensitivity, ProseWrap,
    TrailingComma,
};
use crate::overrides::{FilePatterns, Override};
use crate::plugins::{ORGANIZE_IMPORTS, PKG, SH};

/// A named, built-in configuration variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Full variant with shell script support
    Workspace,
    /// Variant for packages without shell scripts
    Package,
}

impl Preset {
    /// Every preset, in display order
    pub fn all() -> &'static [Preset] {
        &[Preset::Workspace, Preset::Package]
    }

    /// Name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            Preset::Workspace => "workspace",
            Preset::Package => "package",
        }
    }

    /// One-line summary
    pub fn description(self) -> &'static str {
        match self {
            Preset::Workspace => "Base style plus import sorting, package.json ordering and shell scripts",
            Preset::Package => "Base style plus import sorting and package.json ordering",
        }
    }

    /// Look a preset up by name
    pub fn from_name(name: &str) -> Result<Preset> {
        Preset::all()
            .iter()
            .copied()
            .find(|preset| preset.name() == name)
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
    }

    /// Build the configuration
    pub fn config(self) -> Result<FormatterConfiguration> {
        match self {
            Preset::Workspace => workspace(),
            Preset::Package => package(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Preset::from_name(s)
    }
}

/// Preferences shared by every preset
fn base_options() -> FormatOptions {
    FormatOptions {
        print_width: Some(100),
        tab_width: Some(2),
        semi: Some(false),
        single_quote: Some(false),
        trailing_comma: Some(TrailingComma::All),
        bracket_spacing: Some(true),
        bracket_same_line: Some(false),
        arrow_parens: Some(ArrowParens::Always),
        prose_wrap: Some(ProseWrap::Always),
        html_whitespace_sensitivity: Some(HtmlWhitespaceSensitivity::Ignore),
        embedded_language_formatting: Some(EmbeddedLanguageFormatting::Auto),
        ..Default::default()
    }
}

fn parser(name: &str) -> FormatOptions {
    FormatOptions {
        parser: Some(name.to_string()),
        ..Default::default()
    }
}

fn narrow_tabs() -> FormatOptions {
    FormatOptions {
        print_width: Some(98),
        use_tabs: Some(true),
        ..Default::default()
    }
}

/// JSON handling common to both presets
fn json_overrides() -> [Override; 2] {
    [
        Override::new(
            FilePatterns::new(["*.json"]),
            FormatOptions {
                trailing_comma: Some(TrailingComma::None),
                ..parser("jsonc")
            },
        ),
        Override::new(FilePatterns::new(["package.json"]), parser("json-stringify")),
    ]
}

fn workspace() -> Result<FormatterConfiguration> {
    let options = FormatOptions {
        keep_comments: Some(true),
        binary_next_line: Some(true),
        switch_case_indent: Some(false),
        space_redirects: Some(false),
        keep_padding: Some(false),
        minify: Some(false),
        function_next_line: Some(false),
        experimental_wasm: Some(true),
        ..base_options()
    };
    let [json, package_json] = json_overrides();

    FormatterConfiguration::builder()
        .options(options)
        .plugins([ORGANIZE_IMPORTS.id, PKG.id, SH.id])
        .add_override(Override::new(
            FilePatterns::new(["*.{css,js,ts,sh,bash}"]),
            narrow_tabs(),
        ))
        .add_override(Override::new(FilePatterns::new(["*.{js,ts}"]), parser("typescript")))
        .add_override(json)
        .add_override(package_json)
        .build()
}

fn package() -> Result<FormatterConfiguration> {
    let [json, package_json] = json_overrides();

    FormatterConfiguration::builder()
        .options(base_options())
        .plugins([ORGANIZE_IMPORTS.id, PKG.id])
        .add_override(Override::new(FilePatterns::new(["*.{css,js,ts}"]), narrow_tabs()))
        .add_override(Override::new(FilePatterns::new(["*.{js,ts}"]), parser("typescript")))
        .add_override(json)
        .add_override(package_json)
        .build()
}
