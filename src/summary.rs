//! Console summaries printed by the binaries once a run succeeds.

use crate::core::report::{MergeReport, ParseReport};
use crossterm::style::Stylize;
use std::fmt::Display;

pub fn print_merge_summary(report: &MergeReport) {
    for source in &report.sources {
        println!(
            "{} {} (weight {}): {} records",
            "merged".green(),
            source.path.display(),
            source.weight,
            source.parse.unique_records()
        );
    }
    println!("{} {} phrases", "total".green().bold(), report.merged_records);
    if let Some(lines) = report.snapshot_lines {
        println!("  lines written:  {lines}");
    }
    if let Some(lines) = report.export_lines {
        println!("  export lines:   {lines}");
    }
    print_problems(report.skipped_lines(), report.invalid_numbers());
}

pub fn print_parse_summary(label: impl Display, report: &ParseReport) {
    println!("{} {}: {} records", "converted".green().bold(), label, report.records);
    print_problems(report.skipped(), report.invalid_numbers);
}

fn print_problems(skipped: usize, invalid_numbers: usize) {
    if skipped > 0 {
        println!("  {} {skipped} malformed line(s) skipped", "warning:".yellow());
    }
    if invalid_numbers > 0 {
        println!("  {} {invalid_numbers} unparseable number(s) read as 0", "warning:".yellow());
    }
}

/// Prints a fatal error in the binaries' common style.
pub fn print_error(err: &dyn std::error::Error) {
    eprintln!("{} {}", "error:".red().bold(), err);
}
