use std::path::Path;

use crate::engine::CancelToken;
use crate::error::Result;
use crate::repr::{LazyProgram, Program, SourceTree};

/// Provides checkers with access to the scan targets, raw sources, and the
/// shared program representation.
pub struct CheckContext<'a> {
    tree: &'a SourceTree,
    program: &'a LazyProgram<'a>,
    cancel: &'a CancelToken,
}

impl<'a> CheckContext<'a> {
    pub fn new(
        tree: &'a SourceTree,
        program: &'a LazyProgram<'a>,
        cancel: &'a CancelToken,
    ) -> Self {
        Self {
            tree,
            program,
            cancel,
        }
    }

    pub fn tree(&self) -> &SourceTree {
        self.tree
    }

    /// Get source code for a specific file
    pub fn source_code(&self, file: &Path) -> Option<&str> {
        self.tree.source(file)
    }

    /// The shared program representation, built on first request. Checkers
    /// that never call this run without waiting for the build.
    pub fn program(&self) -> Result<&Program> {
        self.program.get()
    }

    /// Whether the run deadline has passed or the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
