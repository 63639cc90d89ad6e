pub mod cap;
pub mod dedup;
pub mod directive_filter;
pub mod generated_filter;
pub mod path_filter;

pub use cap::Cap;
pub use dedup::Dedup;
pub use directive_filter::DirectiveFilter;
pub use generated_filter::GeneratedFileFilter;
pub use path_filter::PathFilter;

use crate::error::Result;
use crate::issue::Issue;

/// One pipeline stage. A processor is a pure function of its input sequence
/// plus its own per-run state: it must not depend on checker execution
/// order, only on the already-sorted issue sequence it receives.
pub trait Processor {
    /// Unique key, used in configuration to disable the stage.
    fn name(&self) -> &'static str;

    /// Transform the issue sequence in one pass.
    fn process(&mut self, issues: Vec<Issue>) -> Result<Vec<Issue>>;

    /// Non-fatal problems accumulated during `process`, drained by the
    /// pipeline and attached to the run result.
    fn take_warnings(&mut self) -> Vec<String> {
        Vec::new()
    }

    /// Release per-run caches. Runs exactly once per processor per run,
    /// even when a later stage fails. Cleanup problems are logged by the
    /// implementation and never fail the run.
    fn finish(&mut self) {}
}

/// Keep issues for which the predicate holds.
pub(crate) fn filter_issues(issues: Vec<Issue>, mut keep: impl FnMut(&Issue) -> bool) -> Vec<Issue> {
    issues.into_iter().filter(|issue| keep(issue)).collect()
}

/// Keep issues for which the fallible predicate holds; the first error
/// aborts the stage.
pub(crate) fn filter_issues_err(
    issues: Vec<Issue>,
    mut keep: impl FnMut(&Issue) -> Result<bool>,
) -> Result<Vec<Issue>> {
    let mut kept = Vec::with_capacity(issues.len());
    for issue in issues {
        if keep(&issue)? {
            kept.push(issue);
        }
    }
    Ok(kept)
}
