//! Report formatting and printing utilities.
//!
//! Kept apart from the migration logic so the library can be used without
//! printing side effects. Every printer has a `_to` variant taking a writer.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use crate::{catalog::MergeSummary, migrate::FileOutcome};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print what happened to one file.
pub fn print_file_outcome(outcome: &FileOutcome, namespace: &str, dry_run: bool, verbose: bool) {
    print_file_outcome_to(
        outcome,
        namespace,
        dry_run,
        verbose,
        &mut io::stdout().lock(),
    );
}

pub fn print_file_outcome_to<W: Write>(
    outcome: &FileOutcome,
    namespace: &str,
    dry_run: bool,
    verbose: bool,
    writer: &mut W,
) {
    if !outcome.changed() {
        if verbose {
            let _ = writeln!(
                writer,
                "{} {} ({} existing key reference(s))",
                "Unchanged".dimmed(),
                outcome.path.display(),
                outcome.skipped_references
            );
        }
        return;
    }

    let label = if dry_run {
        "Would update".yellow().bold()
    } else {
        "Updated".green().bold()
    };
    let _ = writeln!(writer, "{} {}", label, outcome.path.display());

    for replacement in &outcome.replacements {
        let _ = writeln!(
            writer,
            "  {} \"{}\" {} {}.{}",
            format!("{:>4}:", replacement.line).blue(),
            replacement.literal,
            "->".dimmed(),
            namespace,
            replacement.key.cyan()
        );
    }
}

/// Report a file that could not be processed.
pub fn print_file_error(path: &Path, err: &anyhow::Error) {
    print_file_error_to(path, err, &mut io::stderr().lock());
}

pub fn print_file_error_to<W: Write>(path: &Path, err: &anyhow::Error, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}: {:#}",
        "error:".bold().red(),
        path.display(),
        err
    );
}

/// Report a source path that is neither a file nor a directory.
pub fn print_missing_source(path: &Path) {
    eprintln!(
        "{} The path {} is neither a file nor a directory. Catalog left untouched.",
        "warning:".bold().yellow(),
        path.display()
    );
}

/// Summary data for the end of a run.
pub struct RunSummary<'a> {
    pub catalog_path: &'a Path,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub minted: usize,
    pub merge: Option<&'a MergeSummary>,
    pub dry_run: bool,
}

pub fn print_summary(summary: &RunSummary<'_>) {
    print_summary_to(summary, &mut io::stdout().lock());
}

pub fn print_summary_to<W: Write>(summary: &RunSummary<'_>, writer: &mut W) {
    let _ = writeln!(writer);

    if summary.minted == 0 {
        let _ = writeln!(
            writer,
            "{} No new translation strings found in {} {}.",
            SUCCESS_MARK.green(),
            summary.files_scanned,
            if summary.files_scanned == 1 { "file" } else { "files" }
        );
    } else if summary.dry_run {
        let _ = writeln!(
            writer,
            "{} {} key(s) to {}.",
            "Would add".yellow().bold(),
            summary.minted,
            summary.catalog_path.display()
        );
        let _ = writeln!(writer, "Run without {} to apply.", "--dry-run".cyan());
    } else if let Some(merge) = summary.merge {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Added {} key(s) to {} ({} total)",
                merge.added.len(),
                summary.catalog_path.display(),
                merge.total
            )
            .green()
        );
        if !merge.kept_existing.is_empty() {
            let _ = writeln!(
                writer,
                "{} kept existing catalog value for: {}",
                "warning:".bold().yellow(),
                merge.kept_existing.join(", ")
            );
        }
    }

    if summary.files_failed > 0 {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be processed",
            FAILURE_MARK.red(),
            summary.files_failed
        );
    }
}
