use anyhow::Result;

use crate::exitcodes;

pub fn run() -> Result<i32> {
    let checkers = lintsift_checkers::all_checkers();

    println!(
        "{:<16} {:<9} {:<8} {:<9} Description",
        "Name", "Severity", "Default", "Critical"
    );
    println!("{}", "-".repeat(80));

    for checker in &checkers {
        let d = checker.descriptor();
        println!(
            "{:<16} {:<9} {:<8} {:<9} {}",
            d.name,
            d.default_severity.to_string(),
            if d.enabled_by_default { "on" } else { "off" },
            if d.critical { "yes" } else { "no" },
            d.description
        );
    }

    println!("\nTotal: {} checkers", checkers.len());
    Ok(exitcodes::SUCCESS)
}
