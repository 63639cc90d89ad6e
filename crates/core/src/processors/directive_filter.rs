use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use super::{filter_issues, Processor};
use crate::error::Result;
use crate::issue::Issue;

/// Drops issues whose line carries an inline ignore directive.
///
/// Directive positions are parsed by a collaborator
/// ([`crate::config::parse_inline_suppressions`]) and supplied as a map of
/// (file, line) to suppressed checker names, `"*"` meaning all checkers.
/// The number of directive-suppressed issues is reported separately from
/// dedup removals so the two never get conflated in diagnostics.
pub struct DirectiveFilter {
    suppressions: HashMap<(PathBuf, usize), Vec<String>>,
    suppressed_count: usize,
}

impl DirectiveFilter {
    pub fn new(suppressions: HashMap<(PathBuf, usize), Vec<String>>) -> Self {
        Self {
            suppressions,
            suppressed_count: 0,
        }
    }

    pub fn suppressed_count(&self) -> usize {
        self.suppressed_count
    }

    fn is_suppressed(&self, issue: &Issue) -> bool {
        let key = (issue.file.clone(), issue.line);
        match self.suppressions.get(&key) {
            Some(checkers) => checkers.iter().any(|c| c == "*" || *c == issue.checker),
            None => false,
        }
    }
}

impl Processor for DirectiveFilter {
    fn name(&self) -> &'static str {
        "directive-filter"
    }

    fn process(&mut self, issues: Vec<Issue>) -> Result<Vec<Issue>> {
        Ok(filter_issues(issues, |issue| {
            if self.is_suppressed(issue) {
                debug!(file = %issue.file.display(), line = issue.line, checker = %issue.checker,
                    "issue suppressed by inline directive");
                self.suppressed_count += 1;
                return false;
            }
            true
        }))
    }

    fn finish(&mut self) {
        self.suppressions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Severity;

    fn issue_at(file: &str, line: usize, checker: &str) -> Issue {
        Issue::new(file, line, "msg", checker, Severity::Warning)
    }

    #[test]
    fn test_directive_suppresses_named_checker() {
        let mut map = HashMap::new();
        map.insert(
            (PathBuf::from("src/lib.rs"), 7),
            vec!["unwrap-used".to_string()],
        );
        let mut filter = DirectiveFilter::new(map);

        let kept = filter
            .process(vec![
                issue_at("src/lib.rs", 7, "unwrap-used"),
                issue_at("src/lib.rs", 7, "shadowing"),
                issue_at("src/lib.rs", 9, "unwrap-used"),
            ])
            .unwrap();

        assert_eq!(kept.len(), 2);
        assert_eq!(filter.suppressed_count(), 1);
    }

    #[test]
    fn test_wildcard_suppresses_all_checkers() {
        let mut map = HashMap::new();
        map.insert((PathBuf::from("src/lib.rs"), 7), vec!["*".to_string()]);
        let mut filter = DirectiveFilter::new(map);

        let kept = filter
            .process(vec![
                issue_at("src/lib.rs", 7, "unwrap-used"),
                issue_at("src/lib.rs", 7, "shadowing"),
            ])
            .unwrap();

        assert!(kept.is_empty());
        assert_eq!(filter.suppressed_count(), 2);
    }
}
