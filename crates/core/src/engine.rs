use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::checker::{CheckContext, Checker};
use crate::error::{LintError, Result};
use crate::issue::Issue;
use crate::pipeline::PipelineStats;
use crate::repr::{LazyProgram, SourceTree};

/// Cooperative cancellation shared by all in-flight checker invocations.
/// Flips either explicitly or when the run deadline passes; checkers poll it
/// and return promptly once set.
pub struct CancelToken {
    deadline: Option<Instant>,
    flag: AtomicBool,
}

impl CancelToken {
    pub fn new(deadline: Option<Duration>) -> Self {
        Self {
            deadline: deadline.map(|d| Instant::now() + d),
            flag: AtomicBool::new(false),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || self.deadline_exceeded()
    }

    pub fn deadline_exceeded(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() > d)
    }
}

/// Checker batches plus run-level warnings, before the pipeline runs.
#[derive(Debug)]
pub struct EngineOutput {
    pub issues: Vec<Issue>,
    pub warnings: Vec<String>,
    /// Whether any checker requested the shared program representation.
    pub program_built: bool,
}

/// Terminal status of a completed (non-fatal) run. Fatal conditions —
/// timeout, critical checker failure, bad configuration — surface as
/// [`LintError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    IssuesFound,
    WarningsIssued,
}

/// The final product of one run: the filtered issue sequence, non-fatal
/// warnings, and per-stage pipeline statistics.
#[derive(Debug)]
pub struct RunResult {
    pub issues: Vec<Issue>,
    pub warnings: Vec<String>,
    pub stats: PipelineStats,
}

impl RunResult {
    /// Finding issues dominates: a run with warnings still reports its
    /// issues and terminates with "found issues", not an error status.
    pub fn status(&self) -> RunStatus {
        if !self.issues.is_empty() {
            RunStatus::IssuesFound
        } else if !self.warnings.is_empty() {
            RunStatus::WarningsIssued
        } else {
            RunStatus::Success
        }
    }
}

/// Runs the active checker set with bounded parallelism, enforces the global
/// deadline, and merges per-checker batches into one deterministic sequence.
pub struct Engine<'a> {
    checkers: Vec<&'a dyn Checker>,
    concurrency: usize,
    deadline: Option<Duration>,
}

impl<'a> Engine<'a> {
    /// `concurrency` of zero means available parallelism.
    pub fn new(
        checkers: Vec<&'a dyn Checker>,
        concurrency: usize,
        deadline: Option<Duration>,
    ) -> Self {
        Self {
            checkers,
            concurrency,
            deadline,
        }
    }

    pub fn run(&self, tree: &SourceTree) -> Result<EngineOutput> {
        let cancel = CancelToken::new(self.deadline);
        let program = LazyProgram::new(tree);
        let ctx = CheckContext::new(tree, &program, &cancel);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.concurrency)
            .build()
            .map_err(|e| LintError::Config(format!("cannot build worker pool: {e}")))?;

        let results: Vec<_> = pool.install(|| {
            self.checkers
                .par_iter()
                .map(|checker| {
                    let descriptor = checker.descriptor();
                    debug!(checker = descriptor.name, "running checker");
                    let result = checker.run(&ctx);
                    (descriptor, result)
                })
                .collect()
        });

        // Partial results from an overrun deadline would paint an incomplete
        // picture, so they are discarded wholesale.
        if cancel.deadline_exceeded() {
            return Err(LintError::Timeout(
                self.deadline.unwrap_or(Duration::ZERO),
            ));
        }

        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        for (descriptor, result) in results {
            match result {
                Ok(batch) => {
                    for issue in batch {
                        if issue.is_valid() {
                            issues.push(issue);
                        } else {
                            warn!(checker = descriptor.name, "dropped issue with unresolvable position");
                            warnings.push(format!(
                                "{}: dropped issue with unresolvable position",
                                descriptor.name
                            ));
                        }
                    }
                }
                Err(e) if descriptor.critical => {
                    // Findings computed atop code that does not compile
                    // cannot be trusted.
                    return Err(LintError::checker(descriptor.name, e));
                }
                Err(e) => {
                    warn!(checker = descriptor.name, error = %e, "checker failed");
                    warnings.push(format!("checker {} failed: {e}", descriptor.name));
                }
            }
        }

        issues.sort_by(|a, b| a.merge_order(b));

        Ok(EngineOutput {
            issues,
            warnings,
            program_built: program.is_built(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::*;
    use crate::checker::CheckerDescriptor;
    use crate::issue::Severity;

    fn tree() -> SourceTree {
        let mut sources = HashMap::new();
        sources.insert(PathBuf::from("src/lib.rs"), "fn main() {}".to_string());
        SourceTree::from_sources(vec![PathBuf::from(".")], sources)
    }

    struct StaticChecker {
        name: &'static str,
        issues: Vec<(&'static str, usize, &'static str)>,
    }

    impl Checker for StaticChecker {
        fn descriptor(&self) -> CheckerDescriptor {
            CheckerDescriptor::new(self.name, "static issues for tests")
        }
        fn run(&self, _ctx: &CheckContext) -> Result<Vec<Issue>> {
            Ok(self
                .issues
                .iter()
                .map(|(file, line, msg)| {
                    Issue::new(*file, *line, *msg, self.name, Severity::Warning)
                })
                .collect())
        }
    }

    struct FailingChecker {
        critical: bool,
    }

    impl Checker for FailingChecker {
        fn descriptor(&self) -> CheckerDescriptor {
            let d = CheckerDescriptor::new("failing", "always fails");
            if self.critical {
                d.critical()
            } else {
                d
            }
        }
        fn run(&self, _ctx: &CheckContext) -> Result<Vec<Issue>> {
            Err(LintError::checker("failing", "analyzer crashed"))
        }
    }

    struct SlowChecker;

    impl Checker for SlowChecker {
        fn descriptor(&self) -> CheckerDescriptor {
            CheckerDescriptor::new("slow", "sleeps past the deadline")
        }
        fn run(&self, ctx: &CheckContext) -> Result<Vec<Issue>> {
            std::thread::sleep(Duration::from_millis(100));
            if ctx.is_cancelled() {
                return Err(LintError::checker("slow", "cancelled"));
            }
            Ok(vec![Issue::new(
                "src/lib.rs",
                1,
                "late issue",
                "slow",
                Severity::Warning,
            )])
        }
    }

    struct ProgramChecker;

    impl Checker for ProgramChecker {
        fn descriptor(&self) -> CheckerDescriptor {
            CheckerDescriptor::new("program-checker", "touches the program").needs_program()
        }
        fn run(&self, ctx: &CheckContext) -> Result<Vec<Issue>> {
            let program = ctx.program()?;
            assert_eq!(program.files.len(), 1);
            Ok(vec![])
        }
    }

    #[test]
    fn test_merge_order_is_deterministic() {
        let a = StaticChecker {
            name: "zeta",
            issues: vec![("src/b.rs", 2, "m"), ("src/a.rs", 9, "m")],
        };
        let b = StaticChecker {
            name: "alpha",
            issues: vec![("src/a.rs", 9, "m"), ("src/b.rs", 1, "m")],
        };

        let run = |checkers: Vec<&dyn Checker>| {
            Engine::new(checkers, 1, None).run(&tree()).unwrap().issues
        };

        let first = run(vec![&a, &b]);
        let second = run(vec![&b, &a]);
        assert_eq!(first, second);

        let order: Vec<_> = first
            .iter()
            .map(|i| (i.file.clone(), i.line, i.checker.clone()))
            .collect();
        assert_eq!(order[0], (PathBuf::from("src/a.rs"), 9, "alpha".into()));
        assert_eq!(order[1], (PathBuf::from("src/a.rs"), 9, "zeta".into()));
        assert_eq!(order[2], (PathBuf::from("src/b.rs"), 1, "alpha".into()));
    }

    #[test]
    fn test_non_critical_failure_becomes_warning() {
        let ok = StaticChecker {
            name: "ok",
            issues: vec![("src/a.rs", 1, "m")],
        };
        let bad = FailingChecker { critical: false };

        let out = Engine::new(vec![&ok, &bad], 2, None).run(&tree()).unwrap();
        assert_eq!(out.issues.len(), 1);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("failing"));
    }

    #[test]
    fn test_critical_failure_fails_run() {
        let ok = StaticChecker {
            name: "ok",
            issues: vec![("src/a.rs", 1, "m")],
        };
        let bad = FailingChecker { critical: true };

        let err = Engine::new(vec![&ok, &bad], 2, None).run(&tree());
        assert!(matches!(err, Err(LintError::Checker { .. })));
    }

    #[test]
    fn test_deadline_discards_all_results() {
        let fast = StaticChecker {
            name: "fast",
            issues: vec![("src/a.rs", 1, "finished in time")],
        };
        let slow = SlowChecker;

        let engine = Engine::new(vec![&fast, &slow], 2, Some(Duration::from_millis(10)));
        let err = engine.run(&tree());
        assert!(matches!(err, Err(LintError::Timeout(_))));
    }

    #[test]
    fn test_invalid_issue_is_dropped_with_warning() {
        let bad_position = StaticChecker {
            name: "bad-position",
            issues: vec![("", 1, "no file")],
        };
        let out = Engine::new(vec![&bad_position], 1, None)
            .run(&tree())
            .unwrap();
        assert!(out.issues.is_empty());
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_program_built_on_demand() {
        let checker = ProgramChecker;
        let out = Engine::new(vec![&checker], 1, None).run(&tree()).unwrap();
        assert!(out.issues.is_empty());
        assert!(out.warnings.is_empty());
        assert!(out.program_built);
    }

    #[test]
    fn test_fast_path_never_builds_program() {
        let fast = StaticChecker {
            name: "fast",
            issues: vec![("src/a.rs", 1, "m")],
        };
        let out = Engine::new(vec![&fast], 1, None).run(&tree()).unwrap();
        assert_eq!(out.issues.len(), 1);
        assert!(!out.program_built);
    }
}
