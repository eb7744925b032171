//! Option key validator
//!
//! Every key must be an option the formatter or a loaded plugin understands.

use strsim::levenshtein;

use prettyrc_core::diagnostics::Diagnostic;
use prettyrc_core::schema::{self, STRUCTURAL_KEYS};

use crate::document::ConfigDocument;
use crate::Validator;

/// Keys allowed in an override entry besides `options`
const OVERRIDE_KEYS: &[&str] = &["files", "excludeFiles", "options"];

/// Validates that every option key is recognized
///
/// # Diagnostic Codes
///
/// - `PRC001`: unknown option key
/// - `PRC002`: plugin option used without listing its plugin
pub struct OptionKeyValidator;

impl Validator for OptionKeyValidator {
    fn code(&self) -> &'static str {
        "PRC0"
    }

    fn name(&self) -> &'static str {
        "option-keys"
    }

    fn validate(&self, doc: &ConfigDocument<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let registry = doc.registry();
        let declared = doc.declared_plugins();
        let known = schema::known_keys(registry);

        for section in doc.option_sections() {
            for key in section.options.keys() {
                if section.top_level && STRUCTURAL_KEYS.contains(&key.as_str()) {
                    continue;
                }

                if let Some((plugin, _)) = registry.option(key) {
                    if !declared.contains(&plugin.id) {
                        diagnostics.push(
                            Diagnostic::warning(format!(
                                "Option `{}` belongs to `{}`, which is not in `plugins`",
                                key, plugin.id
                            ))
                            .with_code("PRC002")
                            .with_key(section.key_path(key))
                            .with_help(format!(
                                "Add \"{}\" to `plugins` or remove the option",
                                plugin.id
                            )),
                        );
                    }
                    continue;
                }

                if schema::lookup(key, registry).is_some() {
                    continue;
                }

                let mut diagnostic = Diagnostic::warning(format!("Unknown option `{}`", key))
                    .with_code("PRC001")
                    .with_key(section.key_path(key));
                if let Some(suggestion) = closest(key, &known) {
                    diagnostic = diagnostic.with_help(format!("Did you mean `{}`?", suggestion));
                } else {
                    diagnostic = diagnostic
                        .with_note("It may come from a plugin this tool does not know about");
                }
                diagnostics.push(diagnostic);
            }
        }

        for (index, entry) in doc.overrides() {
            let Some(entry) = entry.as_object() else {
                continue;
            };
            for key in entry.keys() {
                if !OVERRIDE_KEYS.contains(&key.as_str()) {
                    diagnostics.push(
                        Diagnostic::warning(format!("Unknown override field `{}`", key))
                            .with_code("PRC001")
                            .with_key(format!("overrides[{}].{}", index, key))
                            .with_help("Override entries hold `files`, `excludeFiles` and `options`"),
                    );
                }
            }
        }

        diagnostics
    }
}

/// The known key closest to `key`, if it is plausibly a typo
fn closest<'k>(key: &str, known: &[&'k str]) -> Option<&'k str> {
    let lowered = key.to_ascii_lowercase();
    known
        .iter()
        .map(|candidate| (*candidate, levenshtein(&lowered, &candidate.to_ascii_lowercase())))
        .filter(|(_, distance)| *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prettyrc_core::plugins::PluginRegistry;
    use serde_json::json;

    fn run(value: serde_json::Value) -> Vec<Diagnostic> {
        let registry = PluginRegistry::with_builtins();
        OptionKeyValidator.validate(&ConfigDocument::new(&value, &registry))
    }

    #[test]
    fn test_known_keys_pass() {
        let diagnostics = run(json!({
            "printWidth": 100,
            "plugins": ["prettier-plugin-sh"],
            "keepComments": true,
            "overrides": [{ "files": "*.ts", "options": { "parser": "typescript" } }]
        }));
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    }

    #[test]
    fn test_unknown_key_with_suggestion() {
        let diagnostics = run(json!({ "printwidth": 100 }));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code.as_deref(), Some("PRC001"));
        assert_eq!(diagnostics[0].help.as_deref(), Some("Did you mean `printWidth`?"));
    }

    #[test]
    fn test_unknown_key_without_suggestion() {
        let diagnostics = run(json!({ "overrides": [{ "files": "*.vue", "options": { "tailwindConfig": "x" } }] }));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].key.as_deref(), Some("overrides[0].options.tailwindConfig"));
        assert!(diagnostics[0].help.is_none());
        assert_eq!(diagnostics[0].notes.len(), 1);
    }

    #[test]
    fn test_plugin_option_without_plugin() {
        let diagnostics = run(json!({ "binaryNextLine": true }));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code.as_deref(), Some("PRC002"));
        assert!(diagnostics[0].message.contains("prettier-plugin-sh"));
    }

    #[test]
    fn test_structural_keys_only_at_top_level() {
        let diagnostics = run(json!({
            "overrides": [{ "files": "*.md", "options": { "overrides": [] } }]
        }));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].key.as_deref(), Some("overrides[0].options.overrides"));
    }

    #[test]
    fn test_unknown_override_field() {
        let diagnostics = run(json!({ "overrides": [{ "files": "*.md", "option": {} }] }));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].key.as_deref(), Some("overrides[0].option"));
    }

    #[test]
    fn test_closest_ignores_case_and_distance_limit() {
        let known = ["printWidth", "tabWidth", "semi"];
        assert_eq!(closest("TABWIDTH", &known), Some("tabWidth"));
        assert_eq!(closest("semicolon", &known), None);
        assert_eq!(closest("sem", &known), Some("semi"));
        assert_eq!(closest("printWidht", &known), Some("printWidth"));
    }
}
