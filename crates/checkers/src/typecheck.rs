use lintsift::checker::{CheckContext, Checker, CheckerDescriptor};
use lintsift::error::Result;
use lintsift::issue::{Issue, Severity};

/// Compile-correctness checker: reports every scan target that fails to
/// parse, with the parser's position and message verbatim.
///
/// Flagged critical — a finding set computed atop code that does not parse
/// cannot be trusted — and its issues are exempt from generated-file
/// suppression downstream. Parses raw sources directly, so it never waits
/// for the shared program representation.
pub struct Typecheck;

impl Checker for Typecheck {
    fn descriptor(&self) -> CheckerDescriptor {
        CheckerDescriptor::new("typecheck", "Reports source files that fail to parse")
            .critical()
            .severity(Severity::Error)
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
            if let Err(e) = syn::parse_file(source) {
                let start = e.span().start();
                issues.push(
                    Issue::new(
                        file.clone(),
                        start.line.max(1),
                        e.to_string(),
                        "typecheck",
                        Severity::Error,
                    )
                    .with_column(start.column),
                );
            }
        }

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use lintsift::engine::CancelToken;
    use lintsift::repr::{LazyProgram, SourceTree};

    use super::*;

    fn run_on(source: &str) -> Vec<Issue> {
        let mut sources = HashMap::new();
        sources.insert(PathBuf::from("src/lib.rs"), source.to_string());
        let tree = SourceTree::from_sources(vec![PathBuf::from(".")], sources);
        let program = LazyProgram::new(&tree);
        let cancel = CancelToken::new(None);
        let ctx = CheckContext::new(&tree, &program, &cancel);
        Typecheck.run(&ctx).unwrap()
    }

    #[test]
    fn test_valid_file_has_no_issues() {
        assert!(run_on("fn main() {}").is_empty());
    }

    #[test]
    fn test_parse_failure_is_reported_at_position() {
        let issues = run_on("fn main( {}\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].checker, "typecheck");
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].line >= 1);
    }
}
