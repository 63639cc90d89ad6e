use std::collections::HashMap;

use lintsift::checker::{CheckContext, Checker, CheckerDescriptor};
use lintsift::error::Result;
use lintsift::issue::{Issue, Severity};

/// Reports `let` bindings that shadow an earlier binding of the same name
/// within one function. Works from the shared program representation.
pub struct Shadowing;

impl Checker for Shadowing {
    fn descriptor(&self) -> CheckerDescriptor {
        CheckerDescriptor::new(
            "shadowing",
            "Reports let bindings that shadow an earlier binding in the same function",
        )
        .needs_program()
    }

    fn run(&self, ctx: &CheckContext) -> Result<Vec<Issue>> {
        let program = ctx.program()?;
        let mut issues = Vec::new();

        for file in &program.files {
            if ctx.is_cancelled() {
                break;
            }
            for function in &file.functions {
                let mut first_seen: HashMap<&str, usize> = HashMap::new();
                for binding in &function.bindings {
                    if let Some(original_line) = first_seen.get(binding.name.as_str()) {
                        issues.push(
                            Issue::new(
                                file.path.clone(),
                                binding.line,
                                format!(
                                    "declaration of `{}` shadows the binding at line {}",
                                    binding.name, original_line
                                ),
                                "shadowing",
                                Severity::Warning,
                            )
                            .with_column(binding.column),
                        );
                    } else {
                        first_seen.insert(&binding.name, binding.line);
                    }
                }
            }
        }

        Ok(issues)
    }
}
