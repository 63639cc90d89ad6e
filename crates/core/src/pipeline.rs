use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{LintError, Result};
use crate::issue::Issue;
use crate::processors::{
    Cap, Dedup, DirectiveFilter, GeneratedFileFilter, PathFilter, Processor,
};

/// Fixed stage order. Configuration may disable stages by name but never
/// reorders them: path scoping must run before anything parses or caches
/// files, dedup after suppression, caps last.
const STAGE_ORDER: [&str; 5] = [
    "path-filter",
    "generated-file-filter",
    "directive-filter",
    "dedup",
    "cap",
];

/// Per-stage removal counts for diagnostics. Directive suppressions and
/// dedup removals are tracked under their own stage names, never conflated.
#[derive(Debug, Default)]
pub struct PipelineStats {
    pub removed_by_stage: Vec<(String, usize)>,
}

/// Owns the ordered processor chain and drives the merged issue sequence
/// through it.
pub struct Pipeline {
    processors: Vec<Box<dyn Processor>>,
    stats: PipelineStats,
    warnings: Vec<String>,
}

impl Pipeline {
    /// Build the processor chain from configuration. Unknown processor names
    /// in `disable_processors` and invalid exclusion globs are rejected here,
    /// before any checker has run.
    pub fn from_config(
        config: &Config,
        roots: Vec<PathBuf>,
        sources: HashMap<PathBuf, String>,
        suppressions: HashMap<(PathBuf, usize), Vec<String>>,
    ) -> Result<Self> {
        let disabled = &config.issues.disable_processors;
        for name in disabled {
            if !STAGE_ORDER.contains(&name.as_str()) {
                return Err(LintError::Config(format!("unknown processor: {name}")));
            }
        }
        let enabled = |name: &str| !disabled.iter().any(|d| d == name);

        let mut processors: Vec<Box<dyn Processor>> = Vec::new();
        if enabled("path-filter") {
            processors.push(Box::new(PathFilter::new(
                &config.issues.exclude,
                roots,
            )?));
        }
        if enabled("generated-file-filter") {
            processors.push(Box::new(
                GeneratedFileFilter::new(config.issues.strict_generated).with_sources(sources),
            ));
        }
        if enabled("directive-filter") {
            processors.push(Box::new(DirectiveFilter::new(suppressions)));
        }
        if enabled("dedup") {
            processors.push(Box::new(Dedup::new(config.issues.dedup_mode)));
        }
        if enabled("cap") {
            processors.push(Box::new(Cap::new(
                config.issues.max_issues,
                config.issues.max_per_checker,
            )));
        }

        Ok(Self {
            processors,
            stats: PipelineStats::default(),
            warnings: Vec::new(),
        })
    }

    /// Build a pipeline from an explicit processor list (used by tests).
    pub fn with_processors(processors: Vec<Box<dyn Processor>>) -> Self {
        Self {
            processors,
            stats: PipelineStats::default(),
            warnings: Vec::new(),
        }
    }

    /// Thread the issue sequence through every stage in order. Every
    /// processor's `finish` runs exactly once, even when a stage fails;
    /// the first `process` error aborts the run with that error.
    pub fn run(&mut self, issues: Vec<Issue>) -> Result<Vec<Issue>> {
        let mut current = issues;
        let mut failure: Option<LintError> = None;

        for processor in &mut self.processors {
            let before = current.len();
            match processor.process(std::mem::take(&mut current)) {
                Ok(filtered) => {
                    let removed = before - filtered.len();
                    debug!(stage = processor.name(), before, removed, "pipeline stage done");
                    self.stats
                        .removed_by_stage
                        .push((processor.name().to_string(), removed));
                    self.warnings.extend(processor.take_warnings());
                    current = filtered;
                }
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        // Cleanup is guaranteed for every constructed processor, including
        // the failing one and the stages it never reached.
        for processor in &mut self.processors {
            processor.finish();
        }

        match failure {
            Some(e) => {
                warn!(error = %e, "pipeline aborted");
                Err(e)
            }
            None => Ok(current),
        }
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut PipelineStats {
        &mut self.stats
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Severity;

    fn issue(file: &str, line: usize, message: &str, checker: &str) -> Issue {
        Issue::new(file, line, message, checker, Severity::Warning)
    }

    struct FailingStage {
        finished: std::rc::Rc<std::cell::Cell<usize>>,
    }

    impl Processor for FailingStage {
        fn name(&self) -> &'static str {
            "failing-stage"
        }
        fn process(&mut self, _issues: Vec<Issue>) -> Result<Vec<Issue>> {
            Err(LintError::Config("boom".to_string()))
        }
        fn finish(&mut self) {
            self.finished.set(self.finished.get() + 1);
        }
    }

    struct CountingStage {
        finished: std::rc::Rc<std::cell::Cell<usize>>,
    }

    impl Processor for CountingStage {
        fn name(&self) -> &'static str {
            "counting-stage"
        }
        fn process(&mut self, issues: Vec<Issue>) -> Result<Vec<Issue>> {
            Ok(issues)
        }
        fn finish(&mut self) {
            self.finished.set(self.finished.get() + 1);
        }
    }

    #[test]
    fn test_unknown_processor_name_is_config_error() {
        let mut config = Config::default();
        config
            .issues
            .disable_processors
            .push("no-such-stage".to_string());
        let err = Pipeline::from_config(&config, vec![], HashMap::new(), HashMap::new());
        assert!(matches!(err, Err(LintError::Config(_))));
    }

    #[test]
    fn test_stage_failure_aborts_but_all_finish() {
        let failed = std::rc::Rc::new(std::cell::Cell::new(0));
        let later = std::rc::Rc::new(std::cell::Cell::new(0));
        let mut pipeline = Pipeline::with_processors(vec![
            Box::new(FailingStage {
                finished: failed.clone(),
            }),
            Box::new(CountingStage {
                finished: later.clone(),
            }),
        ]);

        let result = pipeline.run(vec![issue("a.rs", 1, "m", "c")]);
        assert!(result.is_err());
        assert_eq!(failed.get(), 1);
        // Unreached stages are still finalized, exactly once.
        assert_eq!(later.get(), 1);
    }

    #[test]
    fn test_full_chain_from_config() {
        let config = Config::default();
        let mut sources = HashMap::new();
        sources.insert(
            PathBuf::from("gen.rs"),
            "// Code generated by tool. DO NOT EDIT.\nfn f() {}\n".to_string(),
        );
        sources.insert(PathBuf::from("src/lib.rs"), "fn g() {}\n".to_string());

        let mut pipeline =
            Pipeline::from_config(&config, vec![PathBuf::from(".")], sources, HashMap::new())
                .unwrap();

        let out = pipeline
            .run(vec![
                // Suppressed: generated file.
                issue("gen.rs", 2, "x shadows earlier binding", "shadowing"),
                // Duplicate pair: one survives.
                issue("src/lib.rs", 1, "dup message", "a"),
                issue("src/lib.rs", 1, "dup message", "b"),
            ])
            .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].checker, "a");

        let stats = pipeline.stats();
        let removed: HashMap<_, _> = stats
            .removed_by_stage
            .iter()
            .map(|(n, c)| (n.as_str(), *c))
            .collect();
        assert_eq!(removed["generated-file-filter"], 1);
        assert_eq!(removed["dedup"], 1);
        assert_eq!(removed["directive-filter"], 0);
    }

    #[test]
    fn test_disabling_generated_filter_surfaces_issue() {
        let mut config = Config::default();
        config
            .issues
            .disable_processors
            .push("generated-file-filter".to_string());

        let mut sources = HashMap::new();
        sources.insert(
            PathBuf::from("gen.rs"),
            "// Code generated by tool. DO NOT EDIT.\nfn f() {}\n".to_string(),
        );

        let mut pipeline =
            Pipeline::from_config(&config, vec![PathBuf::from(".")], sources, HashMap::new())
                .unwrap();
        let out = pipeline
            .run(vec![issue("gen.rs", 2, "x shadows earlier binding", "shadowing")])
            .unwrap();
        assert_eq!(out.len(), 1);
    }
}
