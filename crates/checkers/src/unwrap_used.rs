use lintsift::checker::{CheckContext, Checker, CheckerDescriptor};
use lintsift::error::Result;
use lintsift::issue::{Issue, Severity};

/// Reports `.unwrap()` and `.expect()` calls outside test code. Works from
/// the shared program representation, which already excludes `#[cfg(test)]`
/// modules.
pub struct UnwrapUsed;

impl Checker for UnwrapUsed {
    fn descriptor(&self) -> CheckerDescriptor {
        CheckerDescriptor::new(
            "unwrap-used",
            "Reports .unwrap() and .expect() calls that can panic",
        )
        .needs_program()
        .disabled_by_default()
    }

    fn run(&self, ctx: &CheckContext) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        for file in &ctx.program()?.files {
            if ctx.is_cancelled() {
                break;
            }
            for function in &file.functions {
                for call in &function.method_calls {
                    if call.method == "unwrap" || call.method == "expect" {
                        issues.push(
                            Issue::new(
                                file.path.clone(),
                                call.line,
                                format!(
                                    "`.{}()` may panic; use `?` or handle the error",
                                    call.method
                                ),
                                "unwrap-used",
                                Severity::Warning,
                            )
                            .with_column(call.column),
                        );
                    }
                }
            }
        }

        Ok(issues)
    }
}
