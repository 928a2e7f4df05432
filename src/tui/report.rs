use console::{style, StyledObject};

use crate::automator::{RunReport, StepOutcome, StepRecord};

/// What repository inspection found before the run
#[derive(Debug)]
pub struct RepoSummary {
    pub branch: Option<String>,
    pub pending_changes: usize,
}

/// Display the pre-run summary line
pub fn display_summary(summary: &RepoSummary, dry_run: bool) {
    let branch = match &summary.branch {
        Some(branch) => style(branch.clone()).cyan().bold(),
        None => style("(detached HEAD)".to_string()).yellow(),
    };

    println!(
        "{} {} on {}{}",
        style("📦").blue().bold(),
        pending_label(summary.pending_changes),
        branch,
        if dry_run {
            style(" (dry run)").dim().to_string()
        } else {
            String::new()
        }
    );
    println!();
}

fn pending_label(count: usize) -> String {
    match count {
        0 => "No pending changes".to_string(),
        1 => "1 pending change".to_string(),
        n => format!("{n} pending changes"),
    }
}

/// Display the outcome of every step of a run
pub fn display_report(report: &RunReport) {
    println!();
    let branch = if report.branch.is_empty() {
        style("(no branch)".to_string()).yellow()
    } else {
        style(report.branch.clone()).cyan()
    };
    println!(
        "{} {} on {}",
        style("📝").blue(),
        style(report.message.as_str()).dim(),
        branch
    );

    for record in &report.steps {
        display_step(record);
    }

    println!();
    if report.has_failures() {
        println!(
            "{} Finished with errors",
            style("⚠").yellow().bold()
        );
    } else {
        println!("{} Done", style("✨").green().bold());
    }
}

fn display_step(record: &StepRecord) {
    let (marker, detail) = match &record.outcome {
        StepOutcome::Succeeded => (style("✓").green().bold(), None),
        StepOutcome::Failed(error) => (style("✗").red().bold(), Some(style(error.clone()).red())),
        StepOutcome::Skipped(reason) => (
            style("-").dim(),
            Some(style(format!("skipped: {}", reason.describe())).dim()),
        ),
    };

    println!(
        "  {} {}{}",
        marker,
        style(record.command_line()).cyan(),
        format_detail(detail)
    );
}

fn format_detail(detail: Option<StyledObject<String>>) -> String {
    match detail {
        Some(detail) => format!(" ({detail})"),
        None => String::new(),
    }
}
