use std::path::Path;

use anyhow::Result;

use lintsift::checker::CheckerRegistry;
use lintsift::config::{parse_inline_suppressions, Config};
use lintsift::engine::{Engine, RunResult, RunStatus};
use lintsift::error::LintError;
use lintsift::pipeline::Pipeline;
use lintsift::repr::SourceTree;

use crate::output::{self, Report};
use crate::{exitcodes, OutputFormat, RunArgs};

pub fn run(args: &RunArgs) -> Result<i32> {
    let outcome = execute(args);

    let (result, files_analyzed) = match outcome {
        Ok(pair) => pair,
        Err(e) => {
            let code = match e.downcast_ref::<LintError>() {
                Some(LintError::Timeout(_)) => exitcodes::TIMEOUT,
                _ => exitcodes::FAILURE,
            };
            eprintln!("error: {e:#}");
            return Ok(code);
        }
    };

    let report = Report::from_result(files_analyzed, &result);
    match args.format {
        OutputFormat::Json => output::json::print(&report)?,
        OutputFormat::Text => output::text::print(&report, args.quiet, args.no_color)?,
    }

    Ok(match result.status() {
        RunStatus::IssuesFound => exitcodes::ISSUES_FOUND,
        RunStatus::Success | RunStatus::WarningsIssued => exitcodes::SUCCESS,
    })
}

fn execute(args: &RunArgs) -> Result<(RunResult, usize)> {
    let config = load_config(args)?;

    // 1. Discover and load the scan targets.
    let tree = SourceTree::discover(std::slice::from_ref(&args.path))?;
    if tree.is_empty() {
        anyhow::bail!("no source files to analyze in {}", args.path.display());
    }

    // 2. Resolve the active checker set.
    let mut registry = CheckerRegistry::new();
    registry.register_all(lintsift_checkers::all_checkers());

    let enable = args.enable.clone().unwrap_or_default();
    let mut disable = args.disable.clone().unwrap_or_default();
    apply_config_disables(&config, &registry.list_checkers(), &enable, &mut disable);
    let active = registry.select(&enable, &disable)?;

    // 3. Build the pipeline up front, so configuration errors surface
    //    before any checker runs.
    let suppressions = parse_inline_suppressions(tree.sources());
    let mut pipeline = Pipeline::from_config(
        &config,
        vec![args.path.clone()],
        tree.sources().clone(),
        suppressions,
    )?;

    // 4. Run the engine and thread the merged sequence through the pipeline.
    let engine = Engine::new(active, config.run.concurrency, config.deadline());
    let output = engine.run(&tree)?;

    let issues = pipeline.run(output.issues)?;
    let mut warnings = output.warnings;
    warnings.extend(pipeline.take_warnings());

    let files_analyzed = tree.files.len();
    let result = RunResult {
        issues,
        warnings,
        stats: std::mem::take(pipeline.stats_mut()),
    };
    Ok((result, files_analyzed))
}

/// Fold config-file checker disables into the disable list. An explicit
/// `--enable` on the command line outranks a disable from the config file.
fn apply_config_disables(
    config: &Config,
    known: &[&'static str],
    enable: &[String],
    disable: &mut Vec<String>,
) {
    for name in known.iter().copied() {
        if !config.is_checker_enabled(name)
            && !disable.iter().any(|d| d == name)
            && !enable.iter().any(|e| e == name)
        {
            disable.push(name.to_string());
        }
    }
}

fn load_config(args: &RunArgs) -> Result<Config> {
    let default_path = Path::new(".lintsift.toml");
    let path = args.config.as_deref().unwrap_or(default_path);
    let mut config = Config::load(path)?;

    // Command-line flags override the config file.
    if let Some(deadline) = args.deadline {
        config.run.deadline_secs = deadline;
    }
    if let Some(concurrency) = args.concurrency {
        config.run.concurrency = concurrency;
    }
    if args.strict_generated {
        config.issues.strict_generated = true;
    }
    if let Some(ref exclude) = args.exclude {
        config.issues.exclude.extend(exclude.iter().cloned());
    }
    if let Some(ref disabled) = args.disable_processors {
        config
            .issues
            .disable_processors
            .extend(disabled.iter().cloned());
    }
    if let Some(max) = args.max_issues {
        config.issues.max_issues = max;
    }
    if let Some(max) = args.max_per_checker {
        config.issues.max_per_checker = max;
    }
    Ok(config)
}
