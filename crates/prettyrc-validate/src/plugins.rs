//! Plugin list validator

use std::collections::HashMap;

use serde_json::Value;

use prettyrc_core::diagnostics::Diagnostic;

use crate::document::ConfigDocument;
use crate::Validator;

/// Validates `plugins`
///
/// # Diagnostic Codes
///
/// - `PRC200`: `plugins` is not a list of strings
/// - `PRC201`: a plugin is listed more than once
/// - `PRC202`: a plugin this tool knows nothing about
pub struct PluginListValidator;

impl Validator for PluginListValidator {
    fn code(&self) -> &'static str {
        "PRC2"
    }

    fn name(&self) -> &'static str {
        "plugins"
    }

    fn validate(&self, doc: &ConfigDocument<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        let Some(raw) = doc.root().and_then(|root| root.get("plugins")) else {
            return diagnostics;
        };
        let Some(list) = raw.as_array() else {
            diagnostics.push(
                Diagnostic::error("`plugins` must be a list")
                    .with_code("PRC200")
                    .with_key("plugins"),
            );
            return diagnostics;
        };

        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        for (index, entry) in list.iter().enumerate() {
            let key = format!("plugins[{}]", index);
            let Value::String(id) = entry else {
                diagnostics.push(
                    Diagnostic::error("Plugin entries must be strings")
                        .with_code("PRC200")
                        .with_key(key),
                );
                continue;
            };

            if let Some(first) = first_seen.get(id.as_str()) {
                diagnostics.push(
                    Diagnostic::error(format!("Duplicate plugin `{}`", id))
                        .with_code("PRC201")
                        .with_key(key)
                        .with_note(format!("First listed at plugins[{}]", first)),
                );
                continue;
            }
            first_seen.insert(id.as_str(), index);

            if !doc.registry().contains(id) {
                diagnostics.push(
                    Diagnostic::warning(format!("Unknown plugin `{}`", id))
                        .with_code("PRC202")
                        .with_key(key)
                        .with_help("Its options and parsers will be reported as unknown"),
                );
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prettyrc_core::plugins::PluginRegistry;
    use serde_json::json;

    fn run(value: Value) -> Vec<Diagnostic> {
        let registry = PluginRegistry::with_builtins();
        PluginListValidator.validate(&ConfigDocument::new(&value, &registry))
    }

    #[test]
    fn test_known_plugins() {
        let diagnostics = run(json!({
            "plugins": ["prettier-plugin-organize-imports", "prettier-plugin-pkg", "prettier-plugin-sh"]
        }));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_duplicate_reported_once_per_repeat() {
        let diagnostics = run(json!({
            "plugins": ["prettier-plugin-sh", "prettier-plugin-pkg", "prettier-plugin-sh"]
        }));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code.as_deref(), Some("PRC201"));
        assert_eq!(diagnostics[0].key.as_deref(), Some("plugins[2]"));
        assert_eq!(diagnostics[0].notes, vec!["First listed at plugins[0]".to_string()]);
    }

    #[test]
    fn test_unknown_plugin_is_warning() {
        let diagnostics = run(json!({ "plugins": ["prettier-plugin-tailwindcss"] }));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_warning());
    }

    #[test]
    fn test_not_a_list() {
        let diagnostics = run(json!({ "plugins": "prettier-plugin-sh" }));
        assert_eq!(diagnostics[0].code.as_deref(), Some("PRC200"));

        let diagnostics = run(json!({ "plugins": [true] }));
        assert_eq!(diagnostics[0].key.as_deref(), Some("plugins[0]"));
    }
}
