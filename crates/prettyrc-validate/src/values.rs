//! Option value validator
//!
//! Checks each recognized option against its value domain.

use serde_json::Value;

use prettyrc_core::diagnostics::Diagnostic;
use prettyrc_core::schema::{self, ValueKind, BUILTIN_PARSERS};

use crate::document::ConfigDocument;
use crate::Validator;

/// Validates option values
///
/// # Diagnostic Codes
///
/// - `PRC301`: value outside the option's domain
/// - `PRC302`: parser name not provided by the formatter or a loaded plugin
pub struct OptionValueValidator;

impl Validator for OptionValueValidator {
    fn code(&self) -> &'static str {
        "PRC3"
    }

    fn name(&self) -> &'static str {
        "option-values"
    }

    fn validate(&self, doc: &ConfigDocument<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let registry = doc.registry();
        let loaded = doc.loaded_registry();

        for section in doc.option_sections() {
            for (key, value) in section.options {
                let Some(spec) = schema::lookup(key, registry) else {
                    continue;
                };

                let valid = match spec.kind {
                    ValueKind::Integer { min } => value.as_u64().is_some_and(|n| n >= min),
                    ValueKind::Boolean => value.is_boolean(),
                    ValueKind::Choice(values) => {
                        value.as_str().is_some_and(|s| values.contains(&s))
                    }
                    ValueKind::Parser => {
                        if let Some(name) = value.as_str() {
                            if !BUILTIN_PARSERS.contains(&name) && !loaded.parsers().any(|p| p == name) {
                                diagnostics.push(unknown_parser(doc, name, section.key_path(key)));
                            }
                            true
                        } else {
                            false
                        }
                    }
                };

                if !valid {
                    diagnostics.push(
                        Diagnostic::error(format!(
                            "Invalid value {} for `{}`",
                            value, key
                        ))
                        .with_code("PRC301")
                        .with_key(section.key_path(key))
                        .with_help(format!("Expected {}", spec.kind.describe())),
                    );
                }
            }
        }

        diagnostics
    }
}

fn unknown_parser(doc: &ConfigDocument<'_>, name: &str, key: String) -> Diagnostic {
    let diagnostic = Diagnostic::warning(format!("Unknown parser `{}`", name))
        .with_code("PRC302")
        .with_key(key);

    let provider = doc
        .registry()
        .plugins()
        .iter()
        .find(|plugin| plugin.parsers.contains(&name));
    match provider {
        Some(plugin) => diagnostic.with_help(format!(
            "`{}` is provided by `{}`; add it to `plugins`",
            name, plugin.id
        )),
        None => diagnostic.with_note(format!("Built-in parsers: {}", BUILTIN_PARSERS.join(", "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prettyrc_core::plugins::PluginRegistry;
    use serde_json::json;

    fn run(value: Value) -> Vec<Diagnostic> {
        let registry = PluginRegistry::with_builtins();
        OptionValueValidator.validate(&ConfigDocument::new(&value, &registry))
    }

    #[test]
    fn test_valid_values() {
        let diagnostics = run(json!({
            "printWidth": 100,
            "useTabs": false,
            "trailingComma": "es5",
            "quoteProps": "as-needed",
            "overrides": [{ "files": "*.json", "options": { "parser": "jsonc", "trailingComma": "none" } }]
        }));
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    }

    #[test]
    fn test_enum_outside_domain() {
        let diagnostics = run(json!({
            "overrides": [{ "files": "*.md", "options": { "proseWrap": "sometimes" } }]
        }));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code.as_deref(), Some("PRC301"));
        assert_eq!(diagnostics[0].key.as_deref(), Some("overrides[0].options.proseWrap"));
        assert_eq!(
            diagnostics[0].help.as_deref(),
            Some("Expected one of: always, never, preserve")
        );
    }

    #[test]
    fn test_type_mismatches() {
        let diagnostics = run(json!({
            "printWidth": -5,
            "tabWidth": 2.5,
            "semi": "false",
            "endOfLine": 1
        }));
        assert_eq!(diagnostics.len(), 4);
        assert!(diagnostics.iter().all(|d| d.is_error()));
    }

    #[test]
    fn test_plugin_parser_requires_plugin() {
        let diagnostics = run(json!({
            "overrides": [{ "files": "*.sh", "options": { "parser": "sh" } }]
        }));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code.as_deref(), Some("PRC302"));
        assert!(diagnostics[0].help.as_deref().unwrap().contains("prettier-plugin-sh"));

        let diagnostics = run(json!({
            "plugins": ["prettier-plugin-sh"],
            "overrides": [{ "files": "*.sh", "options": { "parser": "sh" } }]
        }));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_plugin_option_values_checked() {
        let diagnostics = run(json!({ "plugins": ["prettier-plugin-sh"], "minify": "yes" }));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].key.as_deref(), Some("minify"));
    }
}
