use super::context::CheckContext;
use super::descriptor::CheckerDescriptor;
use crate::error::Result;
use crate::issue::Issue;

/// Core trait for all checkers.
///
/// A checker wraps one analyzer: it receives the scan targets (and, on
/// demand, the shared program representation) and translates the analyzer's
/// native diagnostics into the canonical [`Issue`] shape — file and line from
/// the diagnostic position, message verbatim, `checker` set to the name in
/// its descriptor. Checkers must not mutate shared state.
pub trait Checker: Send + Sync {
    fn descriptor(&self) -> CheckerDescriptor;

    /// Run analysis, returning all issues found or an error.
    ///
    /// Implementations should observe `ctx.is_cancelled()` at convenient
    /// points and return promptly once the run deadline has passed.
    fn run(&self, ctx: &CheckContext) -> Result<Vec<Issue>>;
}
