//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format; stage summaries as short
//! colored paragraphs. Kept apart from the core so keyfold can be used as a
//! library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{AddSummary, CommandResult, CommandSummary, InitSummary, ScanSummary};
use crate::{
    core::{
        DedupOutcome, PipelineReport, PruneReport, SourceWarning, Stage, SyncReport,
        UsageReport, ValidationReport,
    },
    issues::{Issue, Report, ReportLocation, Severity, UnreadableSourceIssue},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of keys or replacements listed per section.
const MAX_LISTED: usize = 20;

/// Print issues in cargo-style format to a writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    let max_line_width = calculate_max_line_width(&sorted);
    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

pub fn print(result: &CommandResult, verbose: bool) {
    let mut out = io::stdout().lock();
    print_to(result, verbose, &mut out);
    print_source_warnings_to(&result.warnings, verbose, &mut io::stderr().lock());
}

/// Print a command result to a custom writer (source warnings excluded).
pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Scan(summary) => print_scan(summary, writer),
        CommandSummary::Dedup(outcome) => print_dedup(outcome, result.dry_run, verbose, writer),
        CommandSummary::Prune(report) => print_prune(report, result.dry_run, verbose, writer),
        CommandSummary::Sync(report) => print_sync(report, result.dry_run, verbose, writer),
        CommandSummary::Validate(report) => print_validation(report, writer),
        CommandSummary::Run(report) => print_run(report, verbose, writer),
        CommandSummary::Add(summary) => print_add(summary, result.dry_run, writer),
        CommandSummary::Usage(report) => print_usage(report, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }

    if verbose {
        for locale in &result.written {
            let _ = writeln!(writer, "{} {}.json", "Wrote".dimmed(), locale);
        }
    }
}

/// Print skipped source files: a one-line count, or every file with `-v`.
pub fn print_source_warnings_to<W: Write>(warnings: &[SourceWarning], verbose: bool, writer: &mut W) {
    if warnings.is_empty() {
        return;
    }
    if verbose {
        let issues: Vec<Issue> = warnings
            .iter()
            .map(|w| Issue::UnreadableSource(UnreadableSourceIssue::from(w)))
            .collect();
        report_to(&issues, writer);
    } else {
        let _ = writeln!(
            writer,
            "{} {} source file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            warnings.len(),
            "-v".cyan()
        );
    }
}

// ============================================================
// Stage Summaries
// ============================================================

fn print_scan<W: Write>(summary: &ScanSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Scanned {} source {}: {} key(s) referenced by {} call(s) in {} file(s)",
            summary.files_scanned,
            plural(summary.files_scanned, "file", "files"),
            summary.keys,
            summary.occurrences,
            summary.files_with_references
        )
        .green()
    );
}

fn print_dedup<W: Write>(outcome: &DedupOutcome, dry_run: bool, verbose: bool, writer: &mut W) {
    if outcome.map.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No duplicate texts in the base catalog".green()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} {} duplicate key(s) into {} canonical key(s):",
        action(dry_run, "Merged", "Would merge"),
        outcome.map.len(),
        outcome.groups.len()
    );
    for group in &outcome.groups {
        let _ = writeln!(
            writer,
            "  {} {} {}  {}",
            group.duplicates.join(", "),
            "→".blue(),
            group.canonical.bold(),
            format!("\"{}\"", group.text).dimmed()
        );
    }

    if !outcome.replacements.is_empty() {
        let _ = writeln!(
            writer,
            "{} {} reference(s) in {} file(s):",
            action(dry_run, "Rewrote", "Would rewrite"),
            outcome.replacements.len(),
            outcome.files_changed.len()
        );
        let shown = if verbose {
            outcome.replacements.len()
        } else {
            MAX_LISTED
        };
        for replacement in outcome.replacements.iter().take(shown) {
            let _ = writeln!(
                writer,
                "  {}:{}  {} {} {}",
                replacement.file,
                replacement.offset,
                replacement.original,
                "→".blue(),
                replacement.replacement
            );
        }
        print_more(outcome.replacements.len(), shown, writer);
    }

    if !outcome.removed_from_base.is_empty() {
        let _ = writeln!(
            writer,
            "{} {} key(s) from the base catalog",
            action(dry_run, "Removed", "Would remove"),
            outcome.removed_from_base.len()
        );
    }
    if !outcome.retained.is_empty() {
        let _ = writeln!(
            writer,
            "{} kept {} in the base catalog: a file referencing it could not be rewritten",
            "warning:".bold().yellow(),
            outcome.retained.join(", ")
        );
    }
    print_dry_run_hint(dry_run, writer);
}

fn print_prune<W: Write>(report: &PruneReport, dry_run: bool, verbose: bool, writer: &mut W) {
    if report.unused.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "Every catalog key is referenced".green()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} {} unused key(s) from {} catalog(s):",
        action(dry_run, "Pruned", "Would prune"),
        report.unused.len(),
        report.removed.len()
    );
    for (locale, count) in &report.removed {
        let _ = writeln!(writer, "  - {}: {} key(s)", locale, count);
    }
    print_key_list(&report.unused, verbose, writer);
    print_dry_run_hint(dry_run, writer);
}

fn print_sync<W: Write>(report: &SyncReport, dry_run: bool, verbose: bool, writer: &mut W) {
    if report.locales.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "Dependent catalogs already match the base catalog".green()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} {} catalog(s):",
        action(dry_run, "Synchronized", "Would synchronize"),
        report.locales.len()
    );
    for (locale, change) in &report.locales {
        let _ = writeln!(
            writer,
            "  - {}: {} added, {} removed",
            locale,
            format!("+{}", change.added.len()).green(),
            format!("-{}", change.removed.len()).red()
        );
        if verbose {
            for key in &change.added {
                let _ = writeln!(writer, "      {} {}", "+".green(), key);
            }
            for key in &change.removed {
                let _ = writeln!(writer, "      {} {}", "-".red(), key);
            }
        }
    }
    print_dry_run_hint(dry_run, writer);
}

fn print_validation<W: Write>(report: &ValidationReport, writer: &mut W) {
    for check in &report.checks {
        let mark = if check.passed() {
            SUCCESS_MARK.green()
        } else {
            FAILURE_MARK.red()
        };
        let note = match &check.skipped {
            Some(reason) => format!(" (skipped: {})", reason).dimmed().to_string(),
            None if check.passed() => String::new(),
            None => format!(" ({} problem(s))", check.issues.len()).red().to_string(),
        };
        let _ = writeln!(
            writer,
            "{} {:<22} {}{}",
            mark,
            check.check.name(),
            check.check.description(),
            note
        );
    }

    let issues: Vec<Issue> = report.issues().cloned().collect();
    if !issues.is_empty() {
        let _ = writeln!(writer);
        report_to(&issues, writer);
    }
}

fn print_run<W: Write>(report: &PipelineReport, verbose: bool, writer: &mut W) {
    print_stage_header(Stage::Scan, writer);
    let _ = writeln!(
        writer,
        "{} source file(s), {} key(s) referenced",
        report.files_scanned, report.keys_referenced
    );

    // The hint is printed once, at the end
    print_stage_header(Stage::Dedup, writer);
    print_dedup(&report.dedup, false, verbose, writer);
    print_stage_header(Stage::Prune, writer);
    print_prune(&report.prune, false, verbose, writer);
    print_stage_header(Stage::Sync, writer);
    print_sync(&report.sync, false, verbose, writer);
    print_stage_header(Stage::Check, writer);
    print_validation(&report.validation, writer);

    if report.dry_run {
        let _ = writeln!(writer);
        let _ = writeln!(
            writer,
            "{} nothing was written. Run without {} to apply these changes.",
            "Dry run:".yellow().bold(),
            "--dry-run".cyan()
        );
    }
}

fn print_add<W: Write>(summary: &AddSummary, dry_run: bool, writer: &mut W) {
    let report = &summary.report;
    for locale in &report.unknown_locales {
        let _ = writeln!(
            writer,
            "{} no catalog for locale '{}', entries skipped",
            "warning:".bold().yellow(),
            locale
        );
    }
    for locale in &report.empty_keys {
        let _ = writeln!(
            writer,
            "{} empty key for locale '{}', entry skipped",
            "warning:".bold().yellow(),
            locale
        );
    }

    if report.total() == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Catalogs already contain every entry of {}", summary.source.display()).green()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} {} entry(ies) from {}:",
        action(dry_run, "Applied", "Would apply"),
        report.total(),
        summary.source.display()
    );
    for locale in report.changed_locales() {
        let added = report.added.get(locale).map_or(0, Vec::len);
        let updated = report.updated.get(locale).map_or(0, Vec::len);
        let _ = writeln!(
            writer,
            "  - {}: {} added, {} updated",
            locale, added, updated
        );
    }
    print_dry_run_hint(dry_run, writer);
}

fn print_usage<W: Write>(report: &UsageReport, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} of {} base key(s) referenced ({:.1}%)",
        report.used.to_string().bold(),
        report.declared,
        report.used_percent()
    );

    if !report.top.is_empty() {
        let _ = writeln!(writer);
        let _ = writeln!(writer, "{}", "Most referenced keys:".bold());
        let key_width = report
            .top
            .iter()
            .map(|u| UnicodeWidthStr::width(u.key.as_str()))
            .max()
            .unwrap_or(0);
        for (i, usage) in report.top.iter().enumerate() {
            let padding = key_width - UnicodeWidthStr::width(usage.key.as_str());
            let _ = writeln!(
                writer,
                "{:>3}. {}{:padding$}  {:>4} use(s) in {} file(s)",
                i + 1,
                usage.key,
                "",
                usage.count,
                usage.files,
                padding = padding
            );
        }
    }

    if !report.unreferenced.is_empty() {
        let _ = writeln!(writer);
        let _ = writeln!(
            writer,
            "{} ({}):",
            "Unreferenced keys".bold().yellow(),
            report.unreferenced.len()
        );
        for key in &report.unreferenced {
            let _ = writeln!(writer, "  - {}", key);
        }
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    );
}

fn print_stage_header<W: Write>(stage: Stage, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", "==>".blue().bold(), stage.as_str().bold());
}

fn print_key_list<W: Write>(keys: &[String], verbose: bool, writer: &mut W) {
    let shown = if verbose { keys.len() } else { MAX_LISTED };
    for key in keys.iter().take(shown) {
        let _ = writeln!(writer, "    {}", key.dimmed());
    }
    print_more(keys.len(), shown, writer);
}

fn print_more<W: Write>(total: usize, shown: usize, writer: &mut W) {
    if total > shown {
        let _ = writeln!(
            writer,
            "  ... and {} more (use {} to list all)",
            total - shown,
            "-v".cyan()
        );
    }
}

fn print_dry_run_hint<W: Write>(dry_run: bool, writer: &mut W) {
    if dry_run {
        let _ = writeln!(
            writer,
            "Run without {} to apply these changes.",
            "--dry-run".cyan()
        );
    }
}

fn action(dry_run: bool, done: &str, pending: &str) -> colored::ColoredString {
    if dry_run {
        pending.yellow().bold()
    } else {
        done.green().bold()
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

// ============================================================
// Issues
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    let severity = issue.severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path[:line:col]
    if line > 0 {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    }

    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret under the call start (col is 1-based, in characters)
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        plural(total_errors, "error", "errors").red(),
        total_warnings,
        plural(total_warnings, "warning", "warnings").yellow()
    );
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(occurrence) => (
            occurrence.file.as_str(),
            occurrence.line,
            occurrence.col,
            Some(occurrence.source_line.as_str()),
        ),
        ReportLocation::File { path } => (*path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(occurrence) => Some(occurrence.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    let a_loc = a.location();
    let b_loc = b.location();
    let (a_path, a_line, a_col, _) = extract_location_info(&a_loc);
    let (b_path, b_line, b_col, _) = extract_location_info(&b_loc);

    a_path
        .cmp(b_path)
        .then_with(|| a_line.cmp(&b_line))
        .then_with(|| a_col.cmp(&b_col))
        .then_with(|| a.rule().cmp(&b.rule()))
}
