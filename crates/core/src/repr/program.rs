use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::{LintError, Result};
use crate::repr::source_tree::SourceTree;
use crate::repr::visitor::{FileVisitor, FunctionIr};

/// Plain-data view of one parsed source file.
#[derive(Debug)]
pub struct FileIr {
    pub path: PathBuf,
    pub functions: Vec<FunctionIr>,
}

/// The shared program representation: every scan target parsed and lowered
/// into thread-safe plain data. Expensive to build, so it is built at most
/// once per run and then shared read-only across all checkers that need it.
///
/// Files that fail to parse are recorded rather than failing the build —
/// the compile-correctness checker reports them, and structural checkers
/// simply see no functions for them.
#[derive(Debug)]
pub struct Program {
    pub files: Vec<FileIr>,
    pub parse_failures: Vec<(PathBuf, String)>,
}

impl Program {
    fn build(tree: &SourceTree) -> Self {
        let mut files = Vec::new();
        let mut parse_failures = Vec::new();

        for file in &tree.files {
            let Some(source) = tree.source(file) else {
                continue;
            };
            match syn::parse_file(source) {
                Ok(ast) => files.push(FileIr {
                    path: file.clone(),
                    functions: FileVisitor::extract(&ast),
                }),
                Err(e) => parse_failures.push((file.clone(), e.to_string())),
            }
        }

        debug!(
            parsed = files.len(),
            failed = parse_failures.len(),
            "built shared program representation"
        );
        Self {
            files,
            parse_failures,
        }
    }
}

/// At-most-once builder for the shared program representation.
///
/// The first checker that asks for the program builds it; concurrent callers
/// block on the same `OnceCell` and then share the immutable result. Checkers
/// that never ask never pay for the build.
pub struct LazyProgram<'a> {
    tree: &'a SourceTree,
    cell: OnceCell<Program>,
}

impl<'a> LazyProgram<'a> {
    pub fn new(tree: &'a SourceTree) -> Self {
        Self {
            tree,
            cell: OnceCell::new(),
        }
    }

    /// Get the shared program, building it on first use.
    pub fn get(&self) -> Result<&Program> {
        if self.tree.is_empty() {
            return Err(LintError::Config("no source files to analyze".to_string()));
        }
        Ok(self.cell.get_or_init(|| Program::build(self.tree)))
    }

    /// Whether the program has been built yet (used by tests and diagnostics).
    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn tree_with(source: &str) -> SourceTree {
        let mut sources = HashMap::new();
        sources.insert(PathBuf::from("src/lib.rs"), source.to_string());
        SourceTree::from_sources(vec![PathBuf::from(".")], sources)
    }

    #[test]
    fn test_build_is_lazy() {
        let tree = tree_with("fn main() {}");
        let program = LazyProgram::new(&tree);
        assert!(!program.is_built());
        program.get().unwrap();
        assert!(program.is_built());
    }

    #[test]
    fn test_build_extracts_functions() {
        let tree = tree_with("fn main() { let answer = 42; }");
        let program = LazyProgram::new(&tree);
        let built = program.get().unwrap();
        assert_eq!(built.files.len(), 1);
        assert_eq!(built.files[0].functions[0].name, "main");
    }

    #[test]
    fn test_parse_failure_is_recorded_not_fatal() {
        let tree = tree_with("fn main( {}");
        let program = LazyProgram::new(&tree);
        let built = program.get().unwrap();
        assert!(built.files.is_empty());
        assert_eq!(built.parse_failures.len(), 1);
        assert_eq!(built.parse_failures[0].0, PathBuf::from("src/lib.rs"));
    }

    #[test]
    fn test_empty_tree_is_an_error() {
        let tree = SourceTree::from_sources(vec![PathBuf::from(".")], HashMap::new());
        let program = LazyProgram::new(&tree);
        assert!(program.get().is_err());
    }
}
