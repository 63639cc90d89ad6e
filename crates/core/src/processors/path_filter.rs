use std::path::{Path, PathBuf};

use tracing::debug;

use super::{filter_issues, Processor};
use crate::error::{LintError, Result};
use crate::issue::Issue;

/// Drops issues whose file matches an exclusion glob or lies outside the
/// configured scan roots. Always the first stage, so downstream stages never
/// inspect or cache excluded files.
pub struct PathFilter {
    patterns: Vec<glob::Pattern>,
    roots: Vec<PathBuf>,
}

impl PathFilter {
    pub fn new(exclude: &[String], roots: Vec<PathBuf>) -> Result<Self> {
        let mut patterns = Vec::with_capacity(exclude.len());
        for raw in exclude {
            let pattern = glob::Pattern::new(raw)
                .map_err(|e| LintError::Config(format!("invalid exclude glob {raw:?}: {e}")))?;
            patterns.push(pattern);
        }
        Ok(Self { patterns, roots })
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&path_str))
    }

    fn within_roots(&self, path: &Path) -> bool {
        if self.roots.is_empty() {
            return true;
        }
        self.roots.iter().any(|root| {
            // A "." root scopes to the working directory, which every
            // relative issue path is already inside.
            (root.as_os_str() == "." && path.is_relative()) || path.starts_with(root)
        })
    }
}

impl Processor for PathFilter {
    fn name(&self) -> &'static str {
        "path-filter"
    }

    fn process(&mut self, issues: Vec<Issue>) -> Result<Vec<Issue>> {
        Ok(filter_issues(issues, |issue| {
            if issue.module_level {
                return true;
            }
            let keep = self.within_roots(&issue.file) && !self.is_excluded(&issue.file);
            if !keep {
                debug!(file = %issue.file.display(), "issue dropped by path filter");
            }
            keep
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Severity;

    fn issue(file: &str) -> Issue {
        Issue::new(file, 3, "msg", "some-checker", Severity::Warning)
    }

    #[test]
    fn test_exclusion_glob_drops_subdirectory() {
        let mut filter =
            PathFilter::new(&["vendor/**".to_string()], vec![PathBuf::from(".")]).unwrap();
        let kept = filter
            .process(vec![issue("vendor/lib/gen.rs"), issue("src/main.rs")])
            .unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].file, PathBuf::from("src/main.rs"));
    }

    #[test]
    fn test_outside_scan_root_is_dropped() {
        let mut filter = PathFilter::new(&[], vec![PathBuf::from("crates/core")]).unwrap();
        let kept = filter
            .process(vec![issue("crates/core/src/lib.rs"), issue("crates/cli/src/main.rs")])
            .unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].file, PathBuf::from("crates/core/src/lib.rs"));
    }

    #[test]
    fn test_module_level_issue_passes() {
        let mut filter = PathFilter::new(&["**".to_string()], vec![]).unwrap();
        let module = Issue::module_level("no sources", "typecheck", Severity::Error);
        let kept = filter.process(vec![module]).unwrap();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_invalid_glob_is_config_error() {
        let err = PathFilter::new(&["[".to_string()], vec![]);
        assert!(matches!(err, Err(LintError::Config(_))));
    }
}
