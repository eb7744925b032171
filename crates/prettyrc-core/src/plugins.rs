//! Plugin Registry
//!
//! Knows which formatter plugins exist, which option keys each contributes
//! and which parsers each adds. Plugins are identified by the module name the
//! formatter resolves at startup.

use serde::{Deserialize, Serialize};

use crate::schema::{OptionSpec, ValueKind};

/// Identifier of a formatter plugin, as listed in `plugins`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginId(String);

impl PluginId {
    /// Create an identifier from a module name
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The module name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PluginId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PluginId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Static description of a plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginSpec {
    /// Module name
    pub id: &'static str,
    /// One-line summary
    pub description: &'static str,
    /// Option keys the plugin adds
    pub options: &'static [OptionSpec],
    /// Parser names the plugin adds
    pub parsers: &'static [&'static str],
    /// File names or `.extension`s the plugin claims, mapped to its parser
    pub files: &'static [(&'static str, &'static str)],
}

pub const ORGANIZE_IMPORTS: PluginSpec = PluginSpec {
    id: "prettier-plugin-organize-imports",
    description: "Sorts and removes unused imports in JavaScript and TypeScript",
    options: &[OptionSpec {
        name: "organizeImportsSkipDestructiveCodeActions",
        kind: ValueKind::Boolean,
        description: "Keep unused imports",
    }],
    parsers: &[],
    files: &[],
};

pub const PKG: PluginSpec = PluginSpec {
    id: "prettier-plugin-pkg",
    description: "Orders the fields of package.json",
    options: &[],
    parsers: &[],
    files: &[],
};

pub const SH: PluginSpec = PluginSpec {
    id: "prettier-plugin-sh",
    description: "Formats shell scripts, Dockerfiles and dotenv files",
    options: &[
        OptionSpec {
            name: "keepComments",
            kind: ValueKind::Boolean,
            description: "Keep comments when minifying",
        },
        OptionSpec {
            name: "binaryNextLine",
            kind: ValueKind::Boolean,
            description: "Binary operators may start a line",
        },
        OptionSpec {
            name: "switchCaseIndent",
            kind: ValueKind::Boolean,
            description: "Indent switch cases",
        },
        OptionSpec {
            name: "spaceRedirects",
            kind: ValueKind::Boolean,
            description: "Put a space after redirect operators",
        },
        OptionSpec {
            name: "keepPadding",
            kind: ValueKind::Boolean,
            description: "Keep column alignment padding",
        },
        OptionSpec {
            name: "minify",
            kind: ValueKind::Boolean,
            description: "Minify the script",
        },
        OptionSpec {
            name: "functionNextLine",
            kind: ValueKind::Boolean,
            description: "Put a function's opening brace on the next line",
        },
        OptionSpec {
            name: "experimentalWasm",
            kind: ValueKind::Boolean,
            description: "Use the WebAssembly build of the shell formatter",
        },
    ],
    parsers: &["sh"],
    files: &[
        (".sh", "sh"),
        (".bash", "sh"),
        (".zsh", "sh"),
        ("Dockerfile", "sh"),
        (".env", "sh"),
    ],
};

/// Plugins known to this crate
pub const BUILTIN_PLUGINS: &[PluginSpec] = &[ORGANIZE_IMPORTS, PKG, SH];

/// The plugin registry holds every plugin whose options and parsers
/// should be recognized
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: Vec<PluginSpec>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding [`BUILTIN_PLUGINS`]
    pub fn with_builtins() -> Self {
        Self {
            plugins: BUILTIN_PLUGINS.to_vec(),
        }
    }

    /// Register another plugin; a later entry with the same id replaces the earlier one
    pub fn register(&mut self, plugin: PluginSpec) {
        self.plugins.retain(|p| p.id != plugin.id);
        self.plugins.push(plugin);
    }

    /// Look up a plugin by id
    pub fn get(&self, id: &str) -> Option<&PluginSpec> {
        self.plugins.iter().find(|p| p.id == id)
    }

    /// Check whether a plugin is registered
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All registered plugins
    pub fn plugins(&self) -> &[PluginSpec] {
        &self.plugins
    }

    /// Find the plugin that contributes `key`, with the key's spec
    pub fn option(&self, key: &str) -> Option<(&PluginSpec, &OptionSpec)> {
        self.plugins.iter().find_map(|plugin| {
            plugin
                .options
                .iter()
                .find(|spec| spec.name == key)
                .map(|spec| (plugin, spec))
        })
    }

    /// Registry restricted to the plugins a configuration actually loads
    pub fn subset(&self, ids: &[PluginId]) -> PluginRegistry {
        PluginRegistry {
            plugins: ids
                .iter()
                .filter_map(|id| self.get(id.as_str()).copied())
                .collect(),
        }
    }

    /// Parser names added by the registered plugins
    pub fn parsers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.plugins.iter().flat_map(|p| p.parsers.iter().copied())
    }
}
