//! Output formatting for analysis results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::Serialize;

use crate::source::Violation;

/// JSON report structure.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: String,
    pub path: String,
    pub config: String,
    pub files_scanned: usize,
    pub violations: &'a [Violation],
}

/// Write results in JSON format.
pub fn write_json(
    path: &str,
    config_path: &str,
    files_scanned: usize,
    violations: &[Violation],
) -> anyhow::Result<()> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        config: config_path.to_string(),
        files_scanned,
        violations,
    };

    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

/// Write results in pretty (human-readable) format.
pub fn write_pretty(
    path: &str,
    config_path: &str,
    files_scanned: usize,
    violations: &[Violation],
) {
    // Header
    println!();
    print!("  ");
    print!("{}", "docstyle".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Checking: ".dimmed());
    println!("{}", path);
    print!("  {}", "Config:   ".dimmed());
    println!("{}", config_path);
    println!();

    if !violations.is_empty() {
        write_violations(violations);
        println!();
    }

    write_final_status(files_scanned, violations.len());
    println!();
}

fn write_violations(violations: &[Violation]) {
    println!("  {} ({}):", "Violations".bold(), violations.len());
    println!();

    for v in violations {
        print!("    {} ", "WARN".yellow());
        print!("{:<30}", v.rule.as_str().dimmed());
        print!("{}", v.file.blue());
        if v.line > 0 {
            print!("{}", format!(":{}:{}", v.line, v.column).dimmed());
        }
        println!();

        // Message on next line, indented
        println!("           {}", v.message);
        println!();
    }
}

fn write_final_status(files_scanned: usize, violation_count: usize) {
    let plural = if files_scanned != 1 { "s" } else { "" };
    print!(
        "  {}",
        format!("{} file{} checked", files_scanned, plural).dimmed()
    );
    print!("  ");
    if violation_count == 0 {
        println!("{}", "PASSED".green());
    } else {
        let plural = if violation_count != 1 { "s" } else { "" };
        println!(
            "{}",
            format!("FAILED ({} violation{})", violation_count, plural).red()
        );
    }
}
