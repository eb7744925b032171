//! Parser inference from file names

use std::path::Path;

use crate::plugins::PluginRegistry;

/// Exact file names with a fixed parser
const FILE_NAMES: &[(&str, &str)] = &[
    ("package.json", "json-stringify"),
    ("package-lock.json", "json-stringify"),
    ("composer.json", "json-stringify"),
    (".prettierrc", "json"),
    (".babelrc", "json5"),
    (".jshintrc", "json"),
    (".eslintrc", "json"),
];

/// Extensions (without the dot) and their parser
const EXTENSIONS: &[(&str, &str)] = &[
    ("js", "babel"),
    ("mjs", "babel"),
    ("cjs", "babel"),
    ("jsx", "babel"),
    ("ts", "typescript"),
    ("mts", "typescript"),
    ("cts", "typescript"),
    ("tsx", "typescript"),
    ("json", "json"),
    ("jsonc", "jsonc"),
    ("json5", "json5"),
    ("css", "css"),
    ("scss", "scss"),
    ("less", "less"),
    ("md", "markdown"),
    ("markdown", "markdown"),
    ("mdx", "mdx"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("html", "html"),
    ("htm", "html"),
    ("vue", "vue"),
    ("graphql", "graphql"),
    ("gql", "graphql"),
    ("hbs", "glimmer"),
    ("handlebars", "glimmer"),
];

/// Parser the formatter would pick for `path` given the loaded `plugins`
///
/// Exact file names win over extensions. Plugin entries are consulted after
/// the built-in tables.
pub fn infer_parser(path: &Path, plugins: &PluginRegistry) -> Option<&'static str> {
    let file_name = path.file_name()?.to_str()?;

    let by_name = FILE_NAMES
        .iter()
        .copied()
        .chain(plugins.plugins().iter().flat_map(|p| p.files.iter().copied()))
        .find(|(name, _)| *name == file_name)
        .map(|(_, parser)| parser);
    if by_name.is_some() {
        return by_name;
    }

    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    EXTENSIONS
        .iter()
        .copied()
        .find(|(ext, _)| *ext == extension)
        .or_else(|| {
            plugins
                .plugins()
                .iter()
                .flat_map(|p| p.files.iter().copied())
                .find(|(pattern, _)| pattern.strip_prefix('.') == Some(extension.as_str()))
        })
        .map(|(_, parser)| parser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_extensions() {
        let none = PluginRegistry::new();
        assert_eq!(infer_parser(Path::new("src/app.ts"), &none), Some("typescript"));
        assert_eq!(infer_parser(Path::new("index.JS"), &none), Some("babel"));
        assert_eq!(infer_parser(Path::new("README.md"), &none), Some("markdown"));
        assert_eq!(infer_parser(Path::new("Cargo.lock"), &none), None);
    }

    #[test]
    fn test_file_name_beats_extension() {
        let none = PluginRegistry::new();
        assert_eq!(
            infer_parser(Path::new("web/package.json"), &none),
            Some("json-stringify")
        );
        assert_eq!(infer_parser(Path::new("tsconfig.json"), &none), Some("json"));
    }

    #[test]
    fn test_shell_needs_plugin() {
        let none = PluginRegistry::new();
        let builtins = PluginRegistry::with_builtins();

        assert_eq!(infer_parser(Path::new("scripts/build.sh"), &none), None);
        assert_eq!(infer_parser(Path::new("scripts/build.sh"), &builtins), Some("sh"));
        assert_eq!(infer_parser(Path::new("Dockerfile"), &builtins), Some("sh"));
    }
}
