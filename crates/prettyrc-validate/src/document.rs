//! The raw configuration as validators see it
//!
//! Validators inspect the JSON shape of a configuration rather than the typed
//! record, so that values the typed model would reject outright (a misspelled
//! enum, a duplicate plugin) still produce precise diagnostics.

use serde_json::{Map, Value};

use prettyrc_core::plugins::PluginRegistry;

/// A block of option keys: the base configuration or one override's `options`
pub struct OptionSection<'a> {
    /// Key path prefix, empty for the base section
    pub prefix: String,
    /// Whether this is the top level, where `plugins`/`overrides` are allowed
    pub top_level: bool,
    /// The options
    pub options: &'a Map<String, Value>,
}

impl OptionSection<'_> {
    /// Full key path of `key` inside this section
    pub fn key_path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }
}

/// A configuration document under validation
pub struct ConfigDocument<'a> {
    value: &'a Value,
    registry: &'a PluginRegistry,
}

impl<'a> ConfigDocument<'a> {
    /// Wrap a parsed document; `registry` lists every plugin the validator knows
    pub fn new(value: &'a Value, registry: &'a PluginRegistry) -> Self {
        Self { value, registry }
    }

    /// The raw document
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Every plugin the validator knows about
    pub fn registry(&self) -> &'a PluginRegistry {
        self.registry
    }

    /// The top-level object, if the document is one
    pub fn root(&self) -> Option<&'a Map<String, Value>> {
        self.value.as_object()
    }

    /// Plugin identifiers listed in `plugins`, ignoring non-string entries
    pub fn declared_plugins(&self) -> Vec<&'a str> {
        self.root()
            .and_then(|root| root.get("plugins"))
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Known plugins the document actually loads
    pub fn loaded_registry(&self) -> PluginRegistry {
        let ids: Vec<_> = self
            .declared_plugins()
            .into_iter()
            .map(prettyrc_core::PluginId::from)
            .collect();
        self.registry.subset(&ids)
    }

    /// Entries of `overrides` with their index, ignoring a non-array value
    pub fn overrides(&self) -> Vec<(usize, &'a Value)> {
        self.root()
            .and_then(|root| root.get("overrides"))
            .and_then(Value::as_array)
            .map(|list| list.iter().enumerate().collect())
            .unwrap_or_default()
    }

    /// The base section followed by every override's `options` object
    pub fn option_sections(&self) -> Vec<OptionSection<'a>> {
        let Some(root) = self.root() else {
            return Vec::new();
        };

        let mut sections = vec![OptionSection {
            prefix: String::new(),
            top_level: true,
            options: root,
        }];

        for (index, entry) in self.overrides() {
            if let Some(options) = entry.get("options").and_then(Value::as_object) {
                sections.push(OptionSection {
                    prefix: format!("overrides[{}].options", index),
                    top_level: false,
                    options,
                });
            }
        }

        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sections() {
        let value = json!({
            "semi": false,
            "overrides": [
                { "files": "*.md", "options": { "proseWrap": "never" } },
                { "files": "*.json" },
                { "files": "*.css", "options": { "printWidth": 80 } }
            ]
        });
        let registry = PluginRegistry::with_builtins();
        let doc = ConfigDocument::new(&value, &registry);

        let sections = doc.option_sections();
        let prefixes: Vec<_> = sections.iter().map(|s| s.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["", "overrides[0].options", "overrides[2].options"]);
        assert_eq!(sections[0].key_path("semi"), "semi");
        assert_eq!(sections[2].key_path("printWidth"), "overrides[2].options.printWidth");
    }

    #[test]
    fn test_declared_plugins_skips_non_strings() {
        let value = json!({ "plugins": ["prettier-plugin-sh", 3, "x"] });
        let registry = PluginRegistry::with_builtins();
        let doc = ConfigDocument::new(&value, &registry);

        assert_eq!(doc.declared_plugins(), vec!["prettier-plugin-sh", "x"]);
        assert_eq!(doc.loaded_registry().plugins().len(), 1);
    }

    #[test]
    fn test_non_object_document() {
        let value = json!([1, 2]);
        let registry = PluginRegistry::new();
        let doc = ConfigDocument::new(&value, &registry);
        assert!(doc.option_sections().is_empty());
        assert!(doc.overrides().is_empty());
    }
}
