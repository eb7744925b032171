//! Per-path overrides
//!
//! An [`Override`] pairs a set of file globs with an option fragment. Globs
//! follow the formatter's conventions:
//!
//! - a pattern without `/` is matched against the file name only
//!   (`*.json` hits `a/b/c.json`)
//! - a pattern with `/` is matched against the whole path relative to the
//!   configuration's directory
//! - brace groups expand before matching (`*.{js,ts}` is `*.js` or `*.ts`)
//! - dot-files are not special

use std::collections::{BTreeMap, HashSet};
use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, Result};
use crate::options::FormatOptions;

/// Ordered, non-empty list of glob patterns as written in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilePatterns(Vec<String>);

impl FilePatterns {
    /// Build from any list of patterns; emptiness is checked at compile time
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(patterns.into_iter().map(Into::into).collect())
    }

    /// The patterns in declaration order
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// Accepts `"*.json"` as shorthand for `["*.json"]`.
impl<'de> Deserialize<'de> for FilePatterns {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(String),
            Many(Vec<String>),
        }

        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(pattern) => FilePatterns(vec![pattern]),
            OneOrMany::Many(patterns) => FilePatterns(patterns),
        })
    }
}

/// Option fragment applied to the files a glob set matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Override {
    /// Files the fragment applies to
    pub files: FilePatterns,
    /// Files excluded even when `files` matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_files: Option<FilePatterns>,
    /// The fragment
    #[serde(default)]
    pub options: FormatOptions,
    /// Entry fields the model does not know, kept for round trips
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Override {
    /// Create an override for `files` with the given options
    pub fn new(files: FilePatterns, options: FormatOptions) -> Self {
        Self {
            files,
            exclude_files: None,
            options,
            extra: BTreeMap::new(),
        }
    }

    /// Add an exclusion list
    pub fn with_exclude(mut self, exclude: FilePatterns) -> Self {
        self.exclude_files = Some(exclude);
        self
    }
}

/// Upper bound on the patterns one brace expression may produce
pub const MAX_BRACE_EXPANSIONS: usize = 1024;

/// Expand brace groups in a glob pattern
///
/// Nested and repeated groups are supported; duplicates are dropped while
/// keeping first-seen order. Expressions producing more than
/// [`MAX_BRACE_EXPANSIONS`] patterns are rejected.
///
/// ```
/// use prettyrc_core::overrides::expand_braces;
///
/// let expanded = expand_braces("*.{css,js}").unwrap();
/// assert_eq!(expanded, vec!["*.css", "*.js"]);
/// ```
pub fn expand_braces(pattern: &str) -> Result<Vec<String>> {
    let mut expansion = Expansion {
        original: pattern,
        produced: 0,
        seen: HashSet::new(),
        out: Vec::new(),
    };
    expansion.expand(pattern)?;
    Ok(expansion.out)
}

struct Expansion<'a> {
    original: &'a str,
    /// Leaves visited, duplicates included
    produced: usize,
    seen: HashSet<String>,
    out: Vec<String>,
}

impl Expansion<'_> {
    fn invalid(&self, reason: &str) -> ConfigError {
        ConfigError::InvalidGlob {
            pattern: self.original.to_string(),
            reason: reason.to_string(),
        }
    }

    fn expand(&mut self, pattern: &str) -> Result<()> {
        let Some(open) = pattern.find('{') else {
            if pattern.contains('}') {
                return Err(self.invalid("unmatched `}`"));
            }
            self.produced += 1;
            if self.produced > MAX_BRACE_EXPANSIONS {
                return Err(self.invalid(&format!(
                    "brace groups expand to more than {} patterns",
                    MAX_BRACE_EXPANSIONS
                )));
            }
            if self.seen.insert(pattern.to_string()) {
                self.out.push(pattern.to_string());
            }
            return Ok(());
        };

        if pattern[..open].contains('}') {
            return Err(self.invalid("unmatched `}`"));
        }

        // Locate the matching close brace and the top-level commas between
        let mut depth = 0usize;
        let mut close = None;
        let mut splits = Vec::new();
        for (offset, ch) in pattern[open..].char_indices() {
            let index = open + offset;
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(index);
                        break;
                    }
                }
                ',' if depth == 1 => splits.push(index),
                _ => {}
            }
        }
        let close = close.ok_or_else(|| self.invalid("unclosed `{`"))?;

        let prefix = &pattern[..open];
        let suffix = &pattern[close + 1..];
        let mut bounds = vec![open];
        bounds.extend(splits);
        bounds.push(close);

        for window in bounds.windows(2) {
            let alternative = &pattern[window[0] + 1..window[1]];
            self.expand(&format!("{}{}{}", prefix, alternative, suffix))?;
        }
        Ok(())
    }
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CompiledPattern {
    pattern: Pattern,
    file_name_only: bool,
}

/// Compiled form of [`FilePatterns`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    /// Compile every pattern, expanding braces
    pub fn compile(patterns: &FilePatterns) -> Result<Self> {
        let mut compiled = Vec::new();
        for raw in patterns.as_slice() {
            let trimmed = raw.strip_prefix("./").unwrap_or(raw);
            for expanded in expand_braces(trimmed)? {
                let pattern = Pattern::new(&expanded).map_err(|e| ConfigError::InvalidGlob {
                    pattern: raw.clone(),
                    reason: e.to_string(),
                })?;
                compiled.push(CompiledPattern {
                    pattern,
                    file_name_only: !expanded.contains('/'),
                });
            }
        }
        Ok(Self { patterns: compiled })
    }

    /// Check whether any pattern matches `path` (relative to the config directory)
    pub fn matches(&self, path: &Path) -> bool {
        let relative = normalize(path);
        let file_name = relative.rsplit('/').next().unwrap_or(&relative);

        self.patterns.iter().any(|compiled| {
            let subject = if compiled.file_name_only {
                file_name
            } else {
                relative.as_str()
            };
            compiled.pattern.matches_with(subject, MATCH_OPTIONS)
        })
    }
}

/// Compiled form of an [`Override`]'s file selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideMatcher {
    files: PatternSet,
    exclude: Option<PatternSet>,
}

impl OverrideMatcher {
    /// Compile the override at position `index` of its list
    pub fn compile(index: usize, entry: &Override) -> Result<Self> {
        if entry.files.is_empty() {
            return Err(ConfigError::EmptyFilePatterns(index));
        }
        let files = PatternSet::compile(&entry.files)?;
        let exclude = entry
            .exclude_files
            .as_ref()
            .map(PatternSet::compile)
            .transpose()?;
        Ok(Self { files, exclude })
    }

    /// `files` matches and `excludeFiles` does not
    pub fn matches(&self, path: &Path) -> bool {
        self.files.matches(path) && !self.exclude.as_ref().is_some_and(|ex| ex.matches(path))
    }
}

/// Render a relative path with `/` separators, dropping `.` components
fn normalize(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
