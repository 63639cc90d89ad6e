use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Error taxonomy for one lint run.
///
/// Only `Timeout` and `Config` are unconditionally fatal; a `Checker` error
/// is fatal only when the failing checker is flagged critical, and a `Parse`
/// error is fatal only in strict generated-file mode.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("checker {checker} failed: {message}")]
    Checker { checker: String, message: String },

    #[error("failed to inspect {}: {message}", .file.display())]
    Parse { file: PathBuf, message: String },

    #[error("deadline of {0:?} exceeded: try increasing it with --deadline")]
    Timeout(Duration),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LintError {
    pub fn checker(checker: impl Into<String>, message: impl ToString) -> Self {
        Self::Checker {
            checker: checker.into(),
            message: message.to_string(),
        }
    }

    pub fn parse(file: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LintError>;
