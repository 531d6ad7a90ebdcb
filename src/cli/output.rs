use colored::*;
use std::io::Write;

use super::args::OutputFormat;
use crate::cleaner::{CleanReport, Notice, NoticeSink, TargetStatus};
use crate::common::format::{self, format_count, format_path};

/// Writes notices to the terminal as the cleaner emits them.
///
/// Error notices go to stderr, everything else to stdout. JSON mode keeps
/// stdout for the report, so only error notices are printed there too.
pub struct ConsoleSink {
    format: OutputFormat,
}

impl ConsoleSink {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl NoticeSink for ConsoleSink {
    fn notice(&mut self, notice: &Notice) {
        if notice.is_error() {
            eprintln!("{}", notice);
        } else if self.format == OutputFormat::Human {
            println!("{}", notice);
        }
    }
}

/// Print the end-of-run summary in human-readable format
pub fn print_summary(report: &CleanReport) {
    // An empty target list prints nothing at all
    if report.targets.is_empty() {
        return;
    }

    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  {} removed  •  {} of {} targets processed  •  {}",
        format_count(report.total_removed()).green(),
        report.completed_targets(),
        report.targets.len(),
        format::format_duration(report.duration_secs).cyan()
    );

    if report.missing_targets() > 0 {
        println!(
            "  {} {} missing",
            "●".dimmed(),
            report.missing_targets()
        );
    }

    let failed = report.total_failed();
    if failed > 0 {
        println!(
            "  {} {} could not be deleted",
            "●".red(),
            format_count(failed).red().bold()
        );
    }

    if report.total_skipped() > 0 {
        println!(
            "  {} {} left in place (not a file, link or directory)",
            "●".yellow(),
            format_count(report.total_skipped())
        );
    }

    for target in &report.targets {
        match &target.status {
            TargetStatus::Protected => println!(
                "  {} {} refused (protected)",
                "●".red(),
                format_path(&target.target)
            ),
            TargetStatus::Unreadable { error } => println!(
                "  {} {} unreadable: {}",
                "●".red(),
                format_path(&target.target),
                error
            ),
            _ => {}
        }
    }
}

/// Print the report as JSON
pub fn print_report_json(report: &CleanReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", json)?;
    Ok(())
}

