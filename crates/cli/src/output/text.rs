use anyhow::Result;
use colored::Colorize;

use lintsift::issue::Severity;

use super::Report;

pub fn print(report: &Report, quiet: bool, no_color: bool) -> Result<()> {
    if no_color {
        colored::control::set_override(false);
    }

    if !quiet {
        println!();
        println!("{}", "  lintsift".bold());
        println!("  Files analyzed: {}", report.files_analyzed);
        println!();
    }

    for warning in &report.run_warnings {
        eprintln!("  {} {}", "warning:".yellow().bold(), warning);
    }

    if report.issues.is_empty() {
        if !quiet {
            println!("  {} No issues found.", "✓".green().bold());
            println!();
        }
        return Ok(());
    }

    for issue in &report.issues {
        let severity_label = match issue.severity {
            Severity::Error => "ERROR".red().bold(),
            Severity::Warning => "WARN".yellow().bold(),
            Severity::Info => "INFO".dimmed(),
        };
        println!("  [{}] {}", severity_label, issue);
    }

    if !quiet {
        println!();
        println!("{}", "  Summary".bold().underline());
        println!("    Errors:   {}", report.issues_by_severity.errors);
        println!("    Warnings: {}", report.issues_by_severity.warnings);
        println!("    Info:     {}", report.issues_by_severity.info);
        println!("    Total:    {}", report.total_issues);
        for (stage, removed) in &report.removed_by_stage {
            if *removed > 0 {
                println!("    Removed by {stage}: {removed}");
            }
        }
        println!();
    }

    Ok(())
}
