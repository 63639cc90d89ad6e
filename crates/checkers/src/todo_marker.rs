use lintsift::checker::{CheckContext, Checker, CheckerDescriptor};
use lintsift::error::Result;
use lintsift::issue::{Issue, Severity};

const MARKERS: [&str; 2] = ["TODO", "FIXME"];

/// Reports TODO/FIXME markers in comments. Works directly from raw sources,
/// so it never waits for the shared program representation.
pub struct TodoMarker;

impl Checker for TodoMarker {
    fn descriptor(&self) -> CheckerDescriptor {
        CheckerDescriptor::new("todo-marker", "Reports TODO and FIXME comment markers")
            .disabled_by_default()
            .severity(Severity::Info)
    }

    fn run(&self, ctx: &CheckContext) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        for file in &ctx.tree().files {
            if ctx.is_cancelled() {
                break;
            }
            let Some(source) = ctx.source_code(file) else {
                continue;
            };
            for (idx, line) in source.lines().enumerate() {
                let Some(comment_start) = line.find("//") else {
                    continue;
                };
                let comment = &line[comment_start..];
                for marker in MARKERS {
                    if let Some(pos) = comment.find(marker) {
                        issues.push(
                            Issue::new(
                                file.clone(),
                                idx + 1,
                                format!("{marker} marker in comment"),
                                "todo-marker",
                                Severity::Info,
                            )
                            .with_column(comment_start + pos),
                        );
                        break;
                    }
                }
            }
        }

        Ok(issues)
    }
}
