use std::collections::HashMap;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::{filter_issues_err, Processor};
use crate::error::{LintError, Result};
use crate::issue::Issue;

const MARKER_CODE_GENERATED: &str = "code generated";
const MARKER_DO_NOT_EDIT: &str = "do not edit";
const MARKER_AUTO_FILE: &str = "autogenerated file";

/// Published convention for generated Rust-style sources, matched exactly in
/// strict mode: the line must appear before the first item in the file.
static STRICT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^// Code generated .* DO NOT EDIT\.$").unwrap());

/// Drops issues reported against machine-generated files.
///
/// The per-file verdict cache is owned by this instance and lives for one
/// run only, so repeated runs in one process never see stale state.
pub struct GeneratedFileFilter {
    strict: bool,
    /// In-memory sources from the scan; files not present are read from disk.
    sources: HashMap<PathBuf, String>,
    verdict_cache: HashMap<PathBuf, bool>,
    warnings: Vec<String>,
}

impl GeneratedFileFilter {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            sources: HashMap::new(),
            verdict_cache: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn with_sources(mut self, sources: HashMap<PathBuf, String>) -> Self {
        self.sources = sources;
        self
    }

    fn should_pass(&mut self, issue: &Issue) -> Result<bool> {
        // Never hide compile-correctness errors in generated files: users
        // expect to see why the project isn't compiling.
        if issue.checker == "typecheck" {
            return Ok(true);
        }

        if issue.module_level {
            return Ok(true);
        }

        // The dependency manifest is not a source file.
        if issue.file.file_name().is_some_and(|n| n == "Cargo.toml") {
            return Ok(true);
        }

        // This stage only judges source files.
        if !is_rust_file(&issue.file) {
            return Ok(true);
        }

        if let Some(generated) = self.verdict_cache.get(&issue.file) {
            return Ok(!generated);
        }

        let source = match self.load_source(&issue.file) {
            Ok(source) => source,
            Err(err) if self.strict => {
                return Err(LintError::parse(issue.file.clone(), err));
            }
            Err(err) => {
                // Cannot classify the file, so do not suppress its issues.
                warn!(file = %issue.file.display(), %err, "could not inspect file for generated-code markers");
                self.warnings
                    .push(format!("could not inspect {}: {err}", issue.file.display()));
                self.verdict_cache.insert(issue.file.clone(), false);
                return Ok(true);
            }
        };

        let generated = if self.strict {
            is_generated_strict(&source)
        } else {
            is_generated_lenient(&leading_comment_text(&source))
        };
        debug!(file = %issue.file.display(), generated, "generated-file verdict");
        self.verdict_cache.insert(issue.file.clone(), generated);

        Ok(!generated)
    }

    fn load_source(&self, file: &Path) -> std::result::Result<String, std::io::Error> {
        if let Some(source) = self.sources.get(file) {
            return Ok(source.clone());
        }
        std::fs::read_to_string(file)
    }
}

impl Processor for GeneratedFileFilter {
    fn name(&self) -> &'static str {
        "generated-file-filter"
    }

    fn process(&mut self, issues: Vec<Issue>) -> Result<Vec<Issue>> {
        filter_issues_err(issues, |issue| self.should_pass(issue))
    }

    fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    fn finish(&mut self) {
        self.verdict_cache.clear();
        self.sources.clear();
    }
}

fn is_rust_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "rs")
}

/// Lenient detection: the combined leading comment text, lower-cased,
/// contains any known generated-code marker. Laxer than the published
/// convention on purpose, to match more generators.
fn is_generated_lenient(doc: &str) -> bool {
    let doc = doc.to_lowercase();
    [MARKER_CODE_GENERATED, MARKER_DO_NOT_EDIT, MARKER_AUTO_FILE]
        .iter()
        .any(|marker| doc.contains(marker))
}

/// Strict detection: a comment line before the first non-comment token must
/// match the published `// Code generated .* DO NOT EDIT.` pattern exactly.
fn is_generated_strict(source: &str) -> bool {
    leading_comments(source)
        .iter()
        .any(|line| STRICT_PATTERN.is_match(line))
}

/// The combined text of all comments preceding the first non-comment token.
fn leading_comment_text(source: &str) -> String {
    leading_comments(source)
        .iter()
        .map(|line| strip_comment_syntax(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collects raw comment lines from the top of the file, stopping at the
/// first non-blank, non-comment line (the first item or inner attribute).
fn leading_comments(source: &str) -> Vec<String> {
    let mut comments = Vec::new();
    let mut in_block = false;

    for line in source.lines() {
        let trimmed = line.trim();

        if in_block {
            comments.push(trimmed.to_string());
            if trimmed.contains("*/") {
                in_block = false;
            }
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with("//") {
            comments.push(trimmed.to_string());
        } else if trimmed.starts_with("/*") {
            comments.push(trimmed.to_string());
            if !trimmed.contains("*/") {
                in_block = true;
            }
        } else {
            break;
        }
    }

    comments
}

fn strip_comment_syntax(line: &str) -> &str {
    let line = line
        .trim_start_matches("//!")
        .trim_start_matches("///")
        .trim_start_matches("//")
        .trim_start_matches("/*")
        .trim_end_matches("*/")
        .trim_start_matches('*');
    line.trim()
}
