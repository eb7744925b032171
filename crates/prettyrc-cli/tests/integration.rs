//! Integration tests for the prettyrc CLI
//!
//! These tests drive the command functions against configurations written
//! into temporary project directories.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use prettyrc_cli::{
    check_command, check_file, collect_matches, init_command, render_preset, resolve_options,
    FileFormat, OutputFormat,
};
use prettyrc_core::loader;
use tempfile::TempDir;

/// Write `content` to `dir/name`, creating parent directories
fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// A project initialized from the workspace preset
fn workspace_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    init_command(
        "workspace",
        FileFormat::Json,
        Some(temp.path().join(".prettierrc.json").as_path()),
        false,
    )
    .unwrap();
    temp
}

#[test]
fn test_init_then_check_is_clean() {
    for format in [FileFormat::Json, FileFormat::Toml] {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join(format.default_file_name());

        let written = init_command("package", format, Some(output.as_path()), false).unwrap();
        assert_eq!(written, output);

        let diagnostics = check_file(&output, &[]).unwrap();
        assert!(diagnostics.is_empty(), "{:?}: {:?}", format, diagnostics);
        check_command(Some(output.as_path()), OutputFormat::Text, true, &[]).unwrap();
    }
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();
    let output = write(temp.path(), ".prettierrc.json", "{}\n");

    let err = init_command("workspace", FileFormat::Json, Some(output.as_path()), false).unwrap_err();
    assert!(err.to_string().contains("--force"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "{}\n");

    init_command("workspace", FileFormat::Json, Some(output.as_path()), true).unwrap();
    let loaded = loader::load_file(&output).unwrap();
    assert_eq!(loaded.config.plugins().len(), 3);
}

#[test]
fn test_written_preset_loads_back_identically() {
    let temp = workspace_project();
    let loaded = loader::load_file(&temp.path().join(".prettierrc.json")).unwrap();
    let expected = prettyrc_core::Preset::Workspace.config().unwrap();
    assert_eq!(loaded.config, expected);
}

#[test]
fn test_show_toml_keeps_overrides_as_tables() {
    let toml = render_preset("workspace", FileFormat::Toml).unwrap();
    assert!(toml.contains("[[overrides]]"));
    assert!(toml.contains("printWidth = 100"));

    let json = render_preset("package", FileFormat::Json).unwrap();
    assert!(json.ends_with('\n'));
    assert!(!json.contains("prettier-plugin-sh"));
}

#[test]
fn test_check_reports_errors_and_fails() {
    let temp = TempDir::new().unwrap();
    let path = write(
        temp.path(),
        ".prettierrc.json",
        r#"{
  "plugins": ["prettier-plugin-sh", "prettier-plugin-sh"],
  "trailingComma": "sometimes",
  "overrides": [{ "files": [], "options": { "semi": false } }]
}"#,
    );

    let diagnostics = check_file(&path, &[]).unwrap();
    let codes: Vec<_> = diagnostics.iter().filter_map(|d| d.code.as_deref()).collect();
    assert!(codes.contains(&"PRC101"), "{:?}", codes);
    assert!(codes.contains(&"PRC201"), "{:?}", codes);
    assert!(codes.contains(&"PRC301"), "{:?}", codes);
    assert!(diagnostics
        .iter()
        .all(|d| d.file.as_deref() == Some(path.display().to_string().as_str())));

    assert!(check_command(Some(path.as_path()), OutputFormat::Json, false, &[]).is_err());
}

#[test]
fn test_check_strict_fails_on_warnings() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), ".prettierrc.json", r#"{ "semicolons": false }"#);

    let diagnostics = check_file(&path, &[]).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].is_warning());

    check_command(Some(path.as_path()), OutputFormat::Text, false, &[]).unwrap();
    assert!(check_command(Some(path.as_path()), OutputFormat::Text, true, &[]).is_err());

    let ignore = vec!["PRC001".to_string()];
    assert!(check_file(&path, &ignore).unwrap().is_empty());
    check_command(Some(path.as_path()), OutputFormat::Text, true, &ignore).unwrap();
}

#[test]
fn test_check_package_json_without_section() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "package.json", r#"{ "name": "demo" }"#);

    let diagnostics = check_file(&path, &[]).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code.as_deref(), Some("PRC003"));
    check_command(Some(path.as_path()), OutputFormat::Text, true, &[]).unwrap();
}

#[test]
fn test_check_syntax_error() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), ".prettierrc", "{ \"semi\": ");

    let err = check_file(&path, &[]).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_check_missing_file() {
    let temp = TempDir::new().unwrap();
    assert!(check_file(&temp.path().join(".prettierrc.json"), &[]).is_err());
}

#[test]
fn test_resolve_discovers_config_from_parent() {
    let temp = workspace_project();
    let file = temp.path().join("src/app.ts");

    let options = resolve_options(&file, None, false).unwrap();
    assert_eq!(options.print_width, Some(98));
    assert_eq!(options.use_tabs, Some(true));
    assert_eq!(options.parser.as_deref(), Some("typescript"));
    assert_eq!(options.semi, Some(false));
}

#[test]
fn test_resolve_last_override_wins() {
    let temp = workspace_project();

    let options = resolve_options(&temp.path().join("package.json"), None, false).unwrap();
    assert_eq!(options.parser.as_deref(), Some("json-stringify"));

    let options = resolve_options(&temp.path().join("tsconfig.json"), None, false).unwrap();
    assert_eq!(options.parser.as_deref(), Some("jsonc"));
}

#[test]
fn test_resolve_with_defaults_infers_plugin_parser() {
    let temp = workspace_project();
    let file = temp.path().join("scripts/build.sh");

    let options = resolve_options(&file, None, false).unwrap();
    assert!(options.parser.is_none());

    let options = resolve_options(&file, None, true).unwrap();
    assert_eq!(options.parser.as_deref(), Some("sh"));
    assert_eq!(options.use_tabs, Some(true));
    assert_eq!(options.end_of_line.map(|e| e.as_str()), Some("lf"));
}

#[test]
fn test_resolve_with_explicit_config() {
    let project = TempDir::new().unwrap();
    let configs = TempDir::new().unwrap();
    let config = configs.path().join("shared.toml");
    init_command("package", FileFormat::Toml, Some(config.as_path()), false).unwrap();

    // Relative patterns match on the file name alone
    let options =
        resolve_options(&project.path().join("lib/index.js"), Some(config.as_path()), false).unwrap();
    assert_eq!(options.parser.as_deref(), Some("typescript"));
    assert_eq!(options.use_tabs, Some(true));
}

#[test]
fn test_resolve_parent_components_leave_sibling_config_alone() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "pkgA/.prettierrc.json", r#"{ "tabWidth": 7 }"#);
    fs::create_dir_all(temp.path().join("pkgB/src")).unwrap();

    let through_sibling = temp.path().join("pkgA/../pkgB/src/x.ts");
    assert!(resolve_options(&through_sibling, None, false).is_err());

    let back_into_a = temp.path().join("pkgB/../pkgA/./src/x.ts");
    let options = resolve_options(&back_into_a, None, false).unwrap();
    assert_eq!(options.tab_width, Some(7));
}

#[test]
fn test_resolve_without_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("missing.json");
    assert!(resolve_options(&temp.path().join("a.ts"), Some(config.as_path()), false).is_err());
}

#[test]
fn test_ls_files_lists_matching_overrides() {
    let temp = workspace_project();
    let root = temp.path();
    write(root, "src/main.ts", "export {}\n");
    write(root, "data.json", "{}\n");
    write(root, "package.json", "{ \"name\": \"demo\" }\n");
    write(root, "README.md", "# demo\n");
    write(root, "node_modules/dep/index.js", "module.exports = {}\n");

    let matches: BTreeMap<PathBuf, Vec<usize>> =
        collect_matches(root, None).unwrap().into_iter().collect();

    assert_eq!(matches.get(Path::new("src/main.ts")), Some(&vec![0, 1]));
    assert_eq!(matches.get(Path::new("data.json")), Some(&vec![2]));
    assert_eq!(matches.get(Path::new("package.json")), Some(&vec![2, 3]));
    assert_eq!(matches.get(Path::new(".prettierrc.json")), Some(&vec![2]));
    assert!(!matches.contains_key(Path::new("README.md")));
    assert!(matches.keys().all(|p| !p.starts_with("node_modules")));
}

#[test]
fn test_ls_files_rejects_file_argument() {
    let temp = workspace_project();
    let file = write(temp.path(), "a.ts", "");
    assert!(collect_matches(&file, None).is_err());
}

#[test]
fn test_ls_files_in_directory_with_glob_characters() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("app[v2]");
    fs::create_dir_all(&project).unwrap();
    init_command(
        "workspace",
        FileFormat::Json,
        Some(project.join(".prettierrc.json").as_path()),
        false,
    )
    .unwrap();
    write(&project, "data.json", "{}\n");

    let matches = collect_matches(&project, None).unwrap();
    let paths: Vec<_> = matches.iter().map(|(path, _)| path.clone()).collect();
    assert_eq!(matches.len(), 2, "{:?}", paths);
    assert!(paths.contains(&PathBuf::from("data.json")));
    assert!(paths.contains(&PathBuf::from(".prettierrc.json")));
}
