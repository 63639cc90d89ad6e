pub mod json;
pub mod text;

use serde::Serialize;

use lintsift::engine::{RunResult, RunStatus};
use lintsift::issue::{Issue, Severity};

#[derive(Debug, Serialize)]
pub struct SeverityCounts {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

/// The final run report handed to the output formatters.
#[derive(Debug, Serialize)]
pub struct Report {
    pub status: &'static str,
    pub files_analyzed: usize,
    pub total_issues: usize,
    pub issues_by_severity: SeverityCounts,
    pub issues: Vec<Issue>,
    pub run_warnings: Vec<String>,
    /// Per-stage removal counts, in pipeline order.
    pub removed_by_stage: Vec<(String, usize)>,
}

impl Report {
    pub fn from_result(files_analyzed: usize, result: &RunResult) -> Self {
        let count = |severity: Severity| {
            result
                .issues
                .iter()
                .filter(|i| i.severity == severity)
                .count()
        };
        Self {
            status: match result.status() {
                RunStatus::Success => "success",
                RunStatus::IssuesFound => "issues-found",
                RunStatus::WarningsIssued => "warnings-issued",
            },
            files_analyzed,
            total_issues: result.issues.len(),
            issues_by_severity: SeverityCounts {
                errors: count(Severity::Error),
                warnings: count(Severity::Warning),
                info: count(Severity::Info),
            },
            issues: result.issues.clone(),
            run_warnings: result.warnings.clone(),
            removed_by_stage: result.stats.removed_by_stage.clone(),
        }
    }
}
