use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Project-level configuration loaded from `.lintsift.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub run: RunConfig,
    #[serde(default)]
    pub checkers: HashMap<String, CheckerConfig>,
    #[serde(default)]
    pub issues: IssuesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Global deadline for the whole run, in seconds. 0 disables it.
    pub deadline_secs: u64,
    /// Parallel checker invocations. 0 means available parallelism.
    pub concurrency: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            deadline_secs: 60,
            concurrency: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub enabled: Option<bool>,
}

/// How duplicate issues are recognized by the dedup stage.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DedupMode {
    /// Identical (file, line, message).
    #[default]
    Exact,
    /// Identical (file, line range), regardless of message.
    LineRange,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssuesConfig {
    /// Glob patterns for files whose issues are dropped entirely.
    pub exclude: Vec<String>,
    /// Pipeline stages to turn off, by processor name. Unknown names are a
    /// configuration error, rejected before any checker runs. Stage order is
    /// fixed regardless of the order names appear here.
    pub disable_processors: Vec<String>,
    /// Strict generated-file detection: only the published
    /// `// Code generated .* DO NOT EDIT.` convention counts, and an
    /// unreadable file fails the run instead of passing through.
    pub strict_generated: bool,
    pub dedup_mode: DedupMode,
    /// 0 means uncapped.
    pub max_issues: usize,
    pub max_per_checker: usize,
}

impl Config {
    /// Load config from a TOML file path. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check if a checker is enabled according to config.
    pub fn is_checker_enabled(&self, name: &str) -> bool {
        self.checkers
            .get(name)
            .and_then(|c| c.enabled)
            .unwrap_or(true)
    }

    pub fn deadline(&self) -> Option<Duration> {
        match self.run.deadline_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Generate default config file content.
    pub fn default_toml() -> &'static str {
        r#"# lintsift configuration
# See: https://github.com/safestackai/lintsift

[run]
# Global deadline in seconds (0 disables it)
deadline_secs = 60
# Parallel checker invocations (0 = available parallelism)
concurrency = 0

# Per-checker overrides
# [checkers.unwrap-used]
# enabled = false

[issues]
# Glob patterns for files whose issues are dropped entirely
exclude = ["tests/**", "target/**"]
# Pipeline stages to turn off, e.g. ["generated-file-filter", "dedup"]
disable_processors = []
# Require the exact "Code generated ... DO NOT EDIT." convention
strict_generated = false
# Duplicate recognition: "exact" (file, line, message) or "line-range"
dedup_mode = "exact"
# Volume caps (0 = uncapped)
max_issues = 0
max_per_checker = 0
"#
    }
}

/// Inline suppression: parses source files for `// lintsift-ignore` comments.
/// Returns a map of (file, line) → suppressed checker names.
/// A directive on its own line guards the next line; a trailing directive
/// after code guards its own line. A bare `// lintsift-ignore` (no colon)
/// suppresses all checkers.
pub fn parse_inline_suppressions(
    source_map: &HashMap<PathBuf, String>,
) -> HashMap<(PathBuf, usize), Vec<String>> {
    let mut suppressions: HashMap<(PathBuf, usize), Vec<String>> = HashMap::new();

    for (path, source) in source_map {
        for (idx, line) in source.lines().enumerate() {
            // idx is 0-based, lines are 1-based.
            let trimmed = line.trim();
            let (rest, target_line) = if let Some(rest) = extract_suppression_comment(trimmed) {
                (rest, idx + 2)
            } else if let Some(rest) = line
                .find("//")
                .and_then(|pos| extract_suppression_comment(line[pos..].trim()))
            {
                (rest, idx + 1)
            } else {
                continue;
            };
            let checkers = if rest.is_empty() {
                vec!["*".to_string()] // wildcard = suppress all
            } else {
                rest.split(',').map(|s| s.trim().to_string()).collect()
            };
            suppressions.insert((path.clone(), target_line), checkers);
        }
    }

    suppressions
}

/// Extract the checker list from a suppression comment.
/// Returns Some("") for bare ignore, Some("chk1, chk2") for specific, None if not a suppression.
fn extract_suppression_comment(line: &str) -> Option<&str> {
    // Match: // lintsift-ignore or // lintsift-ignore: chk1, chk2
    let comment = line.strip_prefix("//")?;
    let comment = comment.trim();
    let rest = comment.strip_prefix("lintsift-ignore")?;
    let rest = rest.trim();
    if rest.is_empty() {
        Some("")
    } else {
        let rest = rest.strip_prefix(':')?;
        Some(rest.trim())
    }
}
