use std::collections::HashSet;
use std::path::PathBuf;

use tracing::debug;

use super::Processor;
use crate::config::DedupMode;
use crate::error::Result;
use crate::issue::Issue;

#[derive(Hash, PartialEq, Eq)]
enum DedupKey {
    Exact(PathBuf, usize, String),
    LineRange(PathBuf, usize, usize),
}

/// Collapses duplicate issues: identical (file, line, message) in exact mode,
/// identical (file, line range) in line-range mode. The first occurrence
/// wins, which is deterministic because the engine sorts the merged sequence
/// before the pipeline runs.
///
/// The seen-set is rebuilt per pass, which makes the stage idempotent.
pub struct Dedup {
    mode: DedupMode,
    removed_count: usize,
}

impl Dedup {
    pub fn new(mode: DedupMode) -> Self {
        Self {
            mode,
            removed_count: 0,
        }
    }

    pub fn removed_count(&self) -> usize {
        self.removed_count
    }

    fn key_for(&self, issue: &Issue) -> DedupKey {
        match self.mode {
            DedupMode::Exact => {
                DedupKey::Exact(issue.file.clone(), issue.line, issue.message.clone())
            }
            DedupMode::LineRange => {
                let (start, end) = issue.line_range();
                DedupKey::LineRange(issue.file.clone(), start, end)
            }
        }
    }
}

impl Processor for Dedup {
    fn name(&self) -> &'static str {
        "dedup"
    }

    fn process(&mut self, issues: Vec<Issue>) -> Result<Vec<Issue>> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(issues.len());

        for issue in issues {
            if seen.insert(self.key_for(&issue)) {
                kept.push(issue);
            } else {
                debug!(file = %issue.file.display(), line = issue.line, "duplicate issue dropped");
                self.removed_count += 1;
            }
        }
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Severity;

    fn issue(file: &str, line: usize, message: &str, checker: &str) -> Issue {
        Issue::new(file, line, message, checker, Severity::Warning)
    }

    #[test]
    fn test_same_defect_from_two_checkers_collapses() {
        let mut dedup = Dedup::new(DedupMode::Exact);
        let kept = dedup
            .process(vec![
                issue("src/lib.rs", 5, "x shadows earlier binding", "shadowing"),
                issue("src/lib.rs", 5, "x shadows earlier binding", "other-shadow"),
            ])
            .unwrap();
        assert_eq!(kept.len(), 1);
        // First occurrence in merge order wins.
        assert_eq!(kept[0].checker, "shadowing");
        assert_eq!(dedup.removed_count(), 1);
    }

    #[test]
    fn test_exact_mode_keeps_distinct_messages() {
        let mut dedup = Dedup::new(DedupMode::Exact);
        let kept = dedup
            .process(vec![
                issue("src/lib.rs", 5, "first message", "a"),
                issue("src/lib.rs", 5, "second message", "b"),
            ])
            .unwrap();
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_line_range_mode_collapses_distinct_messages() {
        let mut dedup = Dedup::new(DedupMode::LineRange);
        let kept = dedup
            .process(vec![
                issue("src/lib.rs", 5, "first message", "a"),
                issue("src/lib.rs", 5, "second message", "b"),
            ])
            .unwrap();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let mut dedup = Dedup::new(DedupMode::Exact);
        let input = vec![
            issue("a.rs", 1, "m", "x"),
            issue("a.rs", 1, "m", "y"),
            issue("b.rs", 2, "n", "x"),
        ];
        let once = dedup.process(input).unwrap();
        let twice = dedup.process(once.clone()).unwrap();
        assert_eq!(once, twice);
    }
}
