//! Override shape validator
//!
//! Each override must name at least one valid glob in `files`.

use serde_json::Value;

use prettyrc_core::diagnostics::Diagnostic;
use prettyrc_core::overrides::{FilePatterns, PatternSet};
use prettyrc_core::ConfigError;

use crate::document::ConfigDocument;
use crate::Validator;

/// Validates the `overrides` list
///
/// # Diagnostic Codes
///
/// - `PRC100`: `overrides` or one of its entries has the wrong type
/// - `PRC101`: missing or empty `files`
/// - `PRC102`: invalid glob in `files` or `excludeFiles`
/// - `PRC103`: override without any option
pub struct OverrideValidator;

impl Validator for OverrideValidator {
    fn code(&self) -> &'static str {
        "PRC1"
    }

    fn name(&self) -> &'static str {
        "overrides"
    }

    fn validate(&self, doc: &ConfigDocument<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        let Some(raw) = doc.root().and_then(|root| root.get("overrides")) else {
            return diagnostics;
        };
        if !raw.is_array() {
            diagnostics.push(
                Diagnostic::error("`overrides` must be a list")
                    .with_code("PRC100")
                    .with_key("overrides"),
            );
            return diagnostics;
        }

        for (index, entry) in doc.overrides() {
            let prefix = format!("overrides[{}]", index);
            let Some(entry) = entry.as_object() else {
                diagnostics.push(
                    Diagnostic::error("Override entries must be objects")
                        .with_code("PRC100")
                        .with_key(prefix),
                );
                continue;
            };

            match entry.get("files") {
                None => diagnostics.push(
                    Diagnostic::error("Override has no `files`")
                        .with_code("PRC101")
                        .with_key(format!("{}.files", prefix))
                        .with_help("List the globs this override applies to"),
                ),
                Some(files) => {
                    check_patterns(files, &format!("{}.files", prefix), true, &mut diagnostics)
                }
            }

            if let Some(exclude) = entry.get("excludeFiles") {
                check_patterns(
                    exclude,
                    &format!("{}.excludeFiles", prefix),
                    false,
                    &mut diagnostics,
                );
            }

            match entry.get("options") {
                Some(Value::Object(options)) if !options.is_empty() => {}
                Some(Value::Object(_)) | None => diagnostics.push(
                    Diagnostic::warning("Override sets no options")
                        .with_code("PRC103")
                        .with_key(format!("{}.options", prefix)),
                ),
                Some(_) => diagnostics.push(
                    Diagnostic::error("Override `options` must be an object")
                        .with_code("PRC100")
                        .with_key(format!("{}.options", prefix)),
                ),
            }
        }

        diagnostics
    }
}

fn check_patterns(
    value: &Value,
    key: &str,
    required: bool,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let patterns: Option<Vec<String>> = match value {
        Value::String(single) => Some(vec![single.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    };

    let Some(patterns) = patterns else {
        diagnostics.push(
            Diagnostic::error("Expected a glob or a list of globs")
                .with_code("PRC100")
                .with_key(key),
        );
        return;
    };

    if patterns.is_empty() {
        if required {
            diagnostics.push(
                Diagnostic::error("Override `files` is empty; it would never apply")
                    .with_code("PRC101")
                    .with_key(key),
            );
        }
        return;
    }

    // Compile one at a time so every bad pattern is reported
    for (position, pattern) in patterns.iter().enumerate() {
        if let Err(ConfigError::InvalidGlob { reason, .. }) =
            PatternSet::compile(&FilePatterns::new([pattern.as_str()]))
        {
            diagnostics.push(
                Diagnostic::error(format!("Invalid glob `{}`: {}", pattern, reason))
                    .with_code("PRC102")
                    .with_key(format!("{}[{}]", key, position)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prettyrc_core::plugins::PluginRegistry;
    use serde_json::json;

    fn run(value: Value) -> Vec<Diagnostic> {
        let registry = PluginRegistry::new();
        OverrideValidator.validate(&ConfigDocument::new(&value, &registry))
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().filter_map(|d| d.code.as_deref()).collect()
    }

    #[test]
    fn test_valid_overrides() {
        let diagnostics = run(json!({
            "overrides": [
                { "files": ["*.{css,js,ts,sh,bash}"], "options": { "useTabs": true } },
                { "files": "package.json", "excludeFiles": [], "options": { "parser": "json-stringify" } }
            ]
        }));
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    }

    #[test]
    fn test_missing_and_empty_files() {
        let diagnostics = run(json!({
            "overrides": [
                { "options": { "semi": true } },
                { "files": [], "options": { "semi": true } }
            ]
        }));
        assert_eq!(codes(&diagnostics), vec!["PRC101", "PRC101"]);
        assert_eq!(diagnostics[1].key.as_deref(), Some("overrides[1].files"));
    }

    #[test]
    fn test_every_invalid_glob_reported() {
        let diagnostics = run(json!({
            "overrides": [{ "files": ["*.{js", "ok/*.ts", "[z-"], "options": { "semi": true } }]
        }));
        assert_eq!(codes(&diagnostics), vec!["PRC102", "PRC102"]);
        assert_eq!(diagnostics[0].key.as_deref(), Some("overrides[0].files[0]"));
        assert_eq!(diagnostics[1].key.as_deref(), Some("overrides[0].files[2]"));
    }

    #[test]
    fn test_wrong_types() {
        let diagnostics = run(json!({ "overrides": { "files": "*.js" } }));
        assert_eq!(codes(&diagnostics), vec!["PRC100"]);

        let diagnostics = run(json!({
            "overrides": ["*.js", { "files": [1], "options": "semi" }]
        }));
        assert_eq!(codes(&diagnostics), vec!["PRC100", "PRC100", "PRC100"]);
    }

    #[test]
    fn test_override_without_options_is_a_warning() {
        let diagnostics = run(json!({ "overrides": [{ "files": "*.md" }] }));
        assert_eq!(codes(&diagnostics), vec!["PRC103"]);
        assert!(diagnostics[0].is_warning());
    }
}
