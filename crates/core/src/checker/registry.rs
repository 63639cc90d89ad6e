use super::traits::Checker;
use crate::error::{LintError, Result};

/// Registry holding the full checker set and resolving the active subset
/// for a run from configuration.
pub struct CheckerRegistry {
    checkers: Vec<Box<dyn Checker>>,
}

impl CheckerRegistry {
    pub fn new() -> Self {
        Self {
            checkers: Vec::new(),
        }
    }

    /// Register a checker
    pub fn register(&mut self, checker: Box<dyn Checker>) {
        self.checkers.push(checker);
    }

    /// Register multiple checkers at once
    pub fn register_all(&mut self, checkers: Vec<Box<dyn Checker>>) {
        self.checkers.extend(checkers);
    }

    /// List all registered checker names
    pub fn list_checkers(&self) -> Vec<&'static str> {
        self.checkers
            .iter()
            .map(|c| c.descriptor().name)
            .collect()
    }

    pub fn checkers(&self) -> &[Box<dyn Checker>] {
        &self.checkers
    }

    /// Resolve the active subset: enabled-by-default checkers, plus `enable`,
    /// minus `disable`. Unknown names in either list are a config error.
    pub fn select(&self, enable: &[String], disable: &[String]) -> Result<Vec<&dyn Checker>> {
        let known = self.list_checkers();
        for name in enable.iter().chain(disable) {
            if !known.contains(&name.as_str()) {
                return Err(LintError::Config(format!("unknown checker: {name}")));
            }
        }

        Ok(self
            .checkers
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| {
                let d = c.descriptor();
                if disable.iter().any(|n| n == d.name) {
                    return false;
                }
                d.enabled_by_default || enable.iter().any(|n| n == d.name)
            })
            .collect())
    }
}

impl Default for CheckerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
