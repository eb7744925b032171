//! Option schema
//!
//! The table of option keys the formatter accepts and the value domain of
//! each. Plugin-contributed keys live with their plugin in
//! [`crate::plugins`]; [`lookup`] consults both.

use crate::options::{
    ArrowParens, EmbeddedLanguageFormatting, EndOfLine, HtmlWhitespaceSensitivity, ObjectWrap,
    ProseWrap, QuoteProps, TrailingComma,
};
use crate::plugins::PluginRegistry;

/// Value domain of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Non-negative integer no smaller than `min`
    Integer { min: u64 },
    /// `true` or `false`
    Boolean,
    /// One of a fixed set of strings
    Choice(&'static [&'static str]),
    /// Name of a parser known to the formatter or one of the loaded plugins
    Parser,
}

impl ValueKind {
    /// Short human description used in diagnostics
    pub fn describe(&self) -> String {
        match self {
            ValueKind::Integer { min } => format!("an integer >= {}", min),
            ValueKind::Boolean => "a boolean".to_string(),
            ValueKind::Choice(values) => format!("one of: {}", values.join(", ")),
            ValueKind::Parser => "a parser name".to_string(),
        }
    }
}

/// A recognized option key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Key as written in configuration files
    pub name: &'static str,
    /// Accepted values
    pub kind: ValueKind,
    /// What the option controls
    pub description: &'static str,
}

impl OptionSpec {
    const fn new(name: &'static str, kind: ValueKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
        }
    }
}

/// Keys only meaningful at the top level of a configuration file
pub const STRUCTURAL_KEYS: &[&str] = &["plugins", "overrides", "$schema"];

/// Parsers that ship with the formatter itself
pub const BUILTIN_PARSERS: &[&str] = &[
    "babel",
    "babel-flow",
    "babel-ts",
    "flow",
    "typescript",
    "espree",
    "meriyah",
    "acorn",
    "css",
    "less",
    "scss",
    "json",
    "json5",
    "jsonc",
    "json-stringify",
    "graphql",
    "markdown",
    "mdx",
    "vue",
    "yaml",
    "glimmer",
    "html",
    "angular",
    "lwc",
];

const BOOL: ValueKind = ValueKind::Boolean;

/// Options the formatter understands without any plugin
pub const CORE_OPTIONS: &[OptionSpec] = &[
    OptionSpec::new(
        "printWidth",
        ValueKind::Integer { min: 0 },
        "Line length the printer wraps on",
    ),
    OptionSpec::new(
        "tabWidth",
        ValueKind::Integer { min: 0 },
        "Spaces per indentation level",
    ),
    OptionSpec::new("useTabs", BOOL, "Indent with tabs instead of spaces"),
    OptionSpec::new("semi", BOOL, "Print semicolons at the ends of statements"),
    OptionSpec::new("singleQuote", BOOL, "Use single instead of double quotes"),
    OptionSpec::new("jsxSingleQuote", BOOL, "Use single quotes in JSX"),
    OptionSpec::new(
        "quoteProps",
        ValueKind::Choice(QuoteProps::VALUES),
        "When to quote object property names",
    ),
    OptionSpec::new(
        "trailingComma",
        ValueKind::Choice(TrailingComma::VALUES),
        "Print trailing commas wherever possible in multi-line lists",
    ),
    OptionSpec::new("bracketSpacing", BOOL, "Spaces between brackets in object literals"),
    OptionSpec::new(
        "objectWrap",
        ValueKind::Choice(ObjectWrap::VALUES),
        "How to wrap object literals",
    ),
    OptionSpec::new(
        "bracketSameLine",
        BOOL,
        "Put the `>` of a multi-line element at the end of the last line",
    ),
    OptionSpec::new(
        "arrowParens",
        ValueKind::Choice(ArrowParens::VALUES),
        "Parentheses around a sole arrow function parameter",
    ),
    OptionSpec::new(
        "proseWrap",
        ValueKind::Choice(ProseWrap::VALUES),
        "How to wrap prose",
    ),
    OptionSpec::new(
        "htmlWhitespaceSensitivity",
        ValueKind::Choice(HtmlWhitespaceSensitivity::VALUES),
        "How to handle whitespace in markup",
    ),
    OptionSpec::new(
        "vueIndentScriptAndStyle",
        BOOL,
        "Indent script and style tags in Vue files",
    ),
    OptionSpec::new(
        "endOfLine",
        ValueKind::Choice(EndOfLine::VALUES),
        "Which end of line characters to apply",
    ),
    OptionSpec::new(
        "embeddedLanguageFormatting",
        ValueKind::Choice(EmbeddedLanguageFormatting::VALUES),
        "Format code embedded in another language",
    ),
    OptionSpec::new(
        "singleAttributePerLine",
        BOOL,
        "Enforce a single attribute per line in markup",
    ),
    OptionSpec::new(
        "experimentalTernaries",
        BOOL,
        "Use the alternative ternary formatting",
    ),
    OptionSpec::new("requirePragma", BOOL, "Only format files carrying a pragma"),
    OptionSpec::new("insertPragma", BOOL, "Insert a pragma into formatted files"),
    OptionSpec::new("parser", ValueKind::Parser, "Parser to use"),
];

/// Find the spec for `key`, looking at core options first, then plugins
pub fn lookup<'a>(key: &str, registry: &'a PluginRegistry) -> Option<&'a OptionSpec> {
    CORE_OPTIONS
        .iter()
        .find(|spec| spec.name == key)
        .or_else(|| registry.option(key).map(|(_, spec)| spec))
}

/// Every option key known to the formatter and the registered plugins
pub fn known_keys(registry: &PluginRegistry) -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = CORE_OPTIONS.iter().map(|spec| spec.name).collect();
    for plugin in registry.plugins() {
        keys.extend(plugin.options.iter().map(|spec| spec.name));
    }
    keys
}
