use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Severity levels, from most to least severe.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One contiguous block of replacement text attached to a fix.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Replacement {
    pub start_line: usize,
    pub end_line: usize,
    pub new_lines: Vec<String>,
}

/// A suggested fix: a set of text replacements the presentation layer may apply.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Fix {
    pub replacements: Vec<Replacement>,
}

/// One normalized finding, ready for the processor pipeline.
///
/// Issues are immutable once built by a checker: pipeline stages filter by
/// inclusion, they never annotate or mutate issues in place.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Issue {
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Inclusive end line for range-based findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    pub message: String,
    /// Name of the checker that produced this issue, as registered —
    /// never the wrapped analyzer's internal name.
    pub checker: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
    /// Path-independent finding (e.g. a module-level verdict). Exempt from
    /// the non-empty-path invariant.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub module_level: bool,
}

impl Issue {
    pub fn new(
        file: impl Into<PathBuf>,
        line: usize,
        message: impl Into<String>,
        checker: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column: None,
            end_line: None,
            message: message.into(),
            checker: checker.into(),
            severity,
            fix: None,
            module_level: false,
        }
    }

    /// A finding not tied to any file, e.g. about the scan target as a whole.
    pub fn module_level(
        message: impl Into<String>,
        checker: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            module_level: true,
            ..Self::new(PathBuf::new(), 1, message, checker, severity)
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_end_line(mut self, end_line: usize) -> Self {
        self.end_line = Some(end_line);
        self
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file
    }

    /// Whether the issue may enter the pipeline at all: a positive line and
    /// a resolvable file path (unless explicitly path-independent).
    pub fn is_valid(&self) -> bool {
        self.line > 0 && (self.module_level || !self.file.as_os_str().is_empty())
    }

    /// The inclusive line range covered by this issue.
    pub fn line_range(&self) -> (usize, usize) {
        (self.line, self.end_line.unwrap_or(self.line))
    }

    /// Deterministic merge order: (file, line, column, checker). Applied once
    /// by the engine so pipeline behavior is reproducible across runs.
    pub fn merge_order(&self, other: &Issue) -> Ordering {
        self.file
            .cmp(&other.file)
            .then(self.line.cmp(&other.line))
            .then(self.column.cmp(&other.column))
            .then(self.checker.cmp(&other.checker))
    }
}
