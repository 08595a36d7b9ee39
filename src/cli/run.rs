//! The migration command: wire config, file discovery, the resolver and the
//! catalog together and print progress.

use std::{env, io};

use anyhow::Result;
use colored::Colorize;

use super::{
    args::Arguments,
    exit_status::ExitStatus,
    report::{self, RunSummary},
};
use crate::{
    config::load_config,
    extraction::{AcceptDefaults, KeyResolver, TerminalResolver},
    file_scanner::{SourceSet, collect_sources},
    migrate::Migration,
};

pub fn run(args: &Arguments) -> Result<ExitStatus> {
    let loaded = load_config(&env::current_dir()?)?;
    let config = loaded.config;
    if args.verbose
        && let Some(path) = &loaded.path
    {
        println!("{} {}", "Using config".dimmed(), path.display());
    }

    let function = args.function.as_deref().unwrap_or(&config.function);

    let sources = collect_sources(&args.source, &config.extensions, &config.ignores, args.verbose);
    match &sources {
        SourceSet::Missing(path) => {
            report::print_missing_source(path);
            return Ok(ExitStatus::Success);
        }
        SourceSet::Directory(result) if result.skipped_count > 0 && !args.verbose => {
            eprintln!(
                "{} {} path(s) could not be read (use {} for details)",
                "warning:".bold().yellow(),
                result.skipped_count,
                "-v".cyan()
            );
        }
        _ => {}
    }

    let mut migration = Migration::open(&args.catalog, function, args.dry_run)?;
    if args.verbose {
        println!(
            "{} {} (namespace '{}')",
            "Catalog".dimmed(),
            migration.catalog_path().display(),
            migration.namespace()
        );
    }

    let mut resolver: Box<dyn KeyResolver> = if args.yes {
        Box::new(AcceptDefaults)
    } else {
        Box::new(TerminalResolver::new(io::stdin().lock(), io::stdout()))
    };

    let files = sources.files();
    let mut files_failed = 0usize;
    for file in files {
        match migration.process_file(file, resolver.as_mut()) {
            Ok(outcome) => report::print_file_outcome(
                &outcome,
                migration.namespace(),
                args.dry_run,
                args.verbose,
            ),
            Err(err) => {
                files_failed += 1;
                report::print_file_error(file, &err);
            }
        }
    }

    let catalog_path = migration.catalog_path().to_path_buf();
    let minted = migration.new_entries().len();
    let merge = migration.finish()?;

    report::print_summary(&RunSummary {
        catalog_path: &catalog_path,
        files_scanned: files.len(),
        files_failed,
        minted,
        merge: merge.as_ref(),
        dry_run: args.dry_run,
    });

    Ok(ExitStatus::after_run(files_failed))
}
