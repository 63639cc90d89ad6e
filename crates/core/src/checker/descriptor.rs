use crate::issue::Severity;

/// Static metadata about one checker, independent of any run.
#[derive(Debug, Clone)]
pub struct CheckerDescriptor {
    /// Unique key, used in configuration and on reported issues.
    pub name: &'static str,
    pub description: &'static str,
    pub enabled_by_default: bool,
    /// Whether the checker needs the shared program representation. Checkers
    /// without this flag run without waiting for the program build.
    pub needs_program: bool,
    /// A critical checker failing fails the whole run: findings computed
    /// atop code that does not compile cannot be trusted.
    pub critical: bool,
    pub default_severity: Severity,
}

impl CheckerDescriptor {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            enabled_by_default: true,
            needs_program: false,
            critical: false,
            default_severity: Severity::Warning,
        }
    }

    pub fn needs_program(mut self) -> Self {
        self.needs_program = true;
        self
    }

    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }

    pub fn disabled_by_default(mut self) -> Self {
        self.enabled_by_default = false;
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.default_severity = severity;
        self
    }
}
