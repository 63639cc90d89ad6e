use std::collections::HashMap;

use tracing::debug;

use super::Processor;
use crate::error::Result;
use crate::issue::Issue;

/// Caps the total issue count and/or the per-checker count. Runs last so the
/// caps apply to the already filtered and deduplicated set. A cap of zero
/// means uncapped.
pub struct Cap {
    max_total: usize,
    max_per_checker: usize,
}

impl Cap {
    pub fn new(max_total: usize, max_per_checker: usize) -> Self {
        Self {
            max_total,
            max_per_checker,
        }
    }
}

impl Processor for Cap {
    fn name(&self) -> &'static str {
        "cap"
    }

    fn process(&mut self, issues: Vec<Issue>) -> Result<Vec<Issue>> {
        let mut per_checker: HashMap<String, usize> = HashMap::new();
        let mut kept = Vec::with_capacity(issues.len());

        for issue in issues {
            if self.max_total != 0 && kept.len() >= self.max_total {
                debug!("total issue cap of {} reached", self.max_total);
                break;
            }
            if self.max_per_checker != 0 {
                let count = per_checker.entry(issue.checker.clone()).or_insert(0);
                if *count >= self.max_per_checker {
                    continue;
                }
                *count += 1;
            }
            kept.push(issue);
        }
        Ok(kept)
    }
}
