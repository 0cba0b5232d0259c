use crate::domain::{file_name_for, format_hours, MonthChoice, SummaryKind, TaskEntry};
use crate::persistence::{ensure_dir, read_log_file, unique_path, write_new_file, LINE_ENDING};
use crate::report::stats::{group_by_account, group_by_day, total_hours, AccountGroup, DayGroup};
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Days covered by the weekly summary, ending today
pub const WEEK_DAYS: i64 = 7;

fn push_line(report: &mut String, line: &str) {
    report.push_str(line);
    report.push_str(LINE_ENDING);
}

/// Read every existing daily log between `start` and `end` (inclusive), oldest first.
///
/// Days without a file are skipped. A file that exists but cannot be read is skipped with a
/// warning so one bad day doesn't block the whole report.
pub fn collect_range(logs_dir: &Path, start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, TaskEntry)> {
    let mut entries = Vec::new();

    for date in start.iter_days().take_while(|d| *d <= end) {
        let path = logs_dir.join(file_name_for(date));
        if !path.exists() {
            continue;
        }

        match read_log_file(&path) {
            Ok(tasks) => entries.extend(tasks.into_iter().map(|task| (date, task))),
            Err(e) => warn!("Skipping {} in summary: {}", date, e),
        }
    }

    entries
}

/// Render the weekly report text
pub fn render_weekly(start: NaiveDate, end: NaiveDate, groups: &[DayGroup]) -> String {
    let mut report = String::new();

    push_line(
        &mut report,
        &format!(
            "Weekly Summary ({} – {})",
            start.format("%b %d"),
            end.format("%b %d, %Y")
        ),
    );
    push_line(&mut report, "");

    for group in groups {
        push_line(&mut report, &group.date.format("%A, %b %d %Y").to_string());
        for task in &group.tasks {
            push_line(
                &mut report,
                &format!(
                    "  - [{}] {} ({}) — {}h",
                    task.check_mark(),
                    task.title,
                    task.account,
                    task.time
                ),
            );
        }
        push_line(&mut report, "");
    }

    let total = total_hours(groups.iter().flat_map(|g| g.tasks.iter()));
    push_line(
        &mut report,
        &format!("TOTAL HOURS THIS WEEK: {}h", format_hours(total)),
    );

    report
}

/// Render the account report text for the month starting at `month_start`
pub fn render_account(month_start: NaiveDate, groups: &[AccountGroup]) -> String {
    let mut report = String::new();

    push_line(
        &mut report,
        &format!("Account Summary ({})", month_start.format("%b %Y")),
    );
    push_line(&mut report, "");

    for group in groups {
        push_line(
            &mut report,
            &format!("[{}] — {}h", group.account, format_hours(group.hours)),
        );
        for task in &group.tasks {
            push_line(
                &mut report,
                &format!("  - [{}] {} — {}h", task.check_mark(), task.title, task.time),
            );
        }
        push_line(&mut report, "");
    }

    let grand_total: f64 = groups.iter().map(|g| g.hours).sum();
    push_line(
        &mut report,
        &format!("TOTAL HOURS THIS MONTH: {}h", format_hours(grand_total)),
    );

    report
}

/// Write a report into `summaries_dir` under a name that doesn't clash with an existing file
pub fn write_summary(summaries_dir: &Path, kind: SummaryKind, today: NaiveDate, report: &str) -> Result<PathBuf> {
    ensure_dir(summaries_dir)?;

    let path = unique_path(summaries_dir.join(kind.file_name(today)));
    write_new_file(&path, report)
        .with_context(|| format!("Failed to write summary: {}", path.display()))?;

    info!("Wrote {:?} summary to {}", kind, path.display());
    Ok(path)
}

/// Generate the weekly summary for the seven days ending `today`
pub fn generate_weekly_summary(logs_dir: &Path, summaries_dir: &Path, today: NaiveDate) -> Result<PathBuf> {
    ensure_dir(logs_dir)?;

    let start = today - Duration::days(WEEK_DAYS - 1);
    let groups = group_by_day(collect_range(logs_dir, start, today));
    let report = render_weekly(start, today, &groups);

    write_summary(summaries_dir, SummaryKind::Weekly, today, &report)
}

/// Generate the per-account summary for the chosen month. `Cancel` writes nothing.
pub fn generate_account_summary(
    logs_dir: &Path,
    summaries_dir: &Path,
    choice: MonthChoice,
    today: NaiveDate,
) -> Result<Option<PathBuf>> {
    let Some((month_start, month_end)) = choice.date_range(today) else {
        return Ok(None);
    };

    ensure_dir(logs_dir)?;

    let tasks = collect_range(logs_dir, month_start, month_end)
        .into_iter()
        .map(|(_, task)| task)
        .collect();
    let groups = group_by_account(tasks);
    let report = render_account(month_start, &groups);

    write_summary(summaries_dir, SummaryKind::Account, today, &report).map(Some)
}
