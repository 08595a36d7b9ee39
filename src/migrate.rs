//! One migration run across any number of source files.
//!
//! The catalog is loaded once to seed the used-key set, every file is scanned
//! and rewritten in turn, and the accumulated entries are merged into the
//! catalog exactly once by [`Migration::finish`].
//!
//! A file's entries only join the run after that file was written back, so a
//! file that fails to read or write never leaves orphan catalog entries.
//! Concurrent runs against the same catalog are not supported.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    catalog::{self, Catalog, MergeSummary},
    extraction::{Extractor, KeyPrompt, KeyResolver, Replacement, UsedKeys},
};

/// What happened to one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub replacements: Vec<Replacement>,
    pub skipped_references: usize,
    /// True when the file content was rewritten on disk.
    pub written: bool,
}

impl FileOutcome {
    pub fn changed(&self) -> bool {
        !self.replacements.is_empty()
    }
}

pub struct Migration {
    catalog_path: PathBuf,
    namespace: String,
    extractor: Extractor,
    used_keys: UsedKeys,
    new_entries: Catalog,
    dry_run: bool,
}

impl Migration {
    /// Load the catalog at `catalog_path` and prepare a run.
    pub fn open(catalog_path: &Path, function: &str, dry_run: bool) -> Result<Self> {
        let namespace = catalog::namespace_for(catalog_path)?;
        let existing = catalog::load(catalog_path)?;

        Ok(Self {
            catalog_path: catalog_path.to_path_buf(),
            namespace,
            extractor: Extractor::new(function)?,
            used_keys: UsedKeys::seeded_from(&existing),
            new_entries: Catalog::new(),
            dry_run,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Entries minted so far by files that were processed successfully.
    pub fn new_entries(&self) -> &Catalog {
        &self.new_entries
    }

    /// Scan one file, write it back if anything changed, and keep its entries.
    pub fn process_file(
        &mut self,
        path: &Path,
        resolver: &mut dyn KeyResolver,
    ) -> Result<FileOutcome> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let mut located = FileResolver {
            path,
            inner: resolver,
        };
        let outcome = self.extractor.scan_and_rewrite(
            &content,
            &self.namespace,
            &mut self.used_keys,
            &mut located,
        )?;

        let written = outcome.changed() && !self.dry_run;
        if written {
            fs::write(path, &outcome.text)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }

        self.new_entries.extend(outcome.entries);

        Ok(FileOutcome {
            path: path.to_path_buf(),
            replacements: outcome.replacements,
            skipped_references: outcome.skipped_references,
            written,
        })
    }

    /// Merge everything minted in this run into the catalog.
    ///
    /// Returns `None` without touching the catalog when nothing was minted or
    /// the run is a dry run.
    pub fn finish(self) -> Result<Option<MergeSummary>> {
        if self.new_entries.is_empty() || self.dry_run {
            return Ok(None);
        }

        catalog::merge_and_persist(&self.catalog_path, &self.new_entries).map(Some)
    }
}

/// Adds the file being scanned to every prompt.
struct FileResolver<'a, 'r> {
    path: &'a Path,
    inner: &'a mut (dyn KeyResolver + 'r),
}

impl KeyResolver for FileResolver<'_, '_> {
    fn resolve(&mut self, prompt: &KeyPrompt<'_>) -> Result<String> {
        let located = KeyPrompt {
            file: Some(self.path),
            ..*prompt
        };
        self.inner.resolve(&located)
    }
}
