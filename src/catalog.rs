//! Catalog store for PHP language files.
//!
//! A catalog is a PHP file returning an array of `"key" => "value"` pairs:
//!
//! ```php
//! <?php
//!
//! return [
//!     "hello_world" => "Hello World",
//! ];
//! ```
//!
//! Reading is a lexical scan for quoted pairs, not a PHP parser: anything
//! around the pairs is ignored. Writing always emits the canonical wrapper with
//! one entry per line, sorted by key.

use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::Path,
    sync::LazyLock,
};

use anyhow::{Context, Result};
use regex::Regex;
use tempfile::NamedTempFile;

/// Key to literal mapping. Ordered so that rendering is deterministic.
pub type Catalog = BTreeMap<String, String>;

const CATALOG_HEADER: &str = "<?php\n\nreturn [\n";
const CATALOG_FOOTER: &str = "];\n";

/// `"key" => "value",` with either quote style on each side.
static ENTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')\s*=>\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)'),?"#,
    )
    .unwrap()
});

/// Result of merging new entries into the catalog on disk.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// Keys that were written for the first time.
    pub added: Vec<String>,
    /// New keys dropped because the catalog on disk already defines them.
    pub kept_existing: Vec<String>,
    /// Number of entries in the catalog after the merge.
    pub total: usize,
}

/// Namespace used in rewritten calls: the catalog's file stem.
///
/// `lang/en/messages.php` becomes `messages`.
pub fn namespace_for(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .with_context(|| format!("Cannot derive a namespace from: {}", path.display()))
}

/// Extract every `"key" => "value"` pair from catalog text.
///
/// Later duplicates of a key replace earlier ones.
pub fn parse_catalog(text: &str) -> Catalog {
    ENTRY_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let key = match (caps.get(1), caps.get(2)) {
                (Some(double), _) => unescape(double.as_str(), '"'),
                (None, Some(single)) => unescape(single.as_str(), '\''),
                (None, None) => return None,
            };
            let value = match (caps.get(3), caps.get(4)) {
                (Some(double), _) => unescape(double.as_str(), '"'),
                (None, Some(single)) => unescape(single.as_str(), '\''),
                (None, None) => return None,
            };
            Some((key, value))
        })
        .collect()
}

/// Render the canonical catalog file.
pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::from(CATALOG_HEADER);
    for (key, value) in catalog {
        out.push_str(&format!("    \"{}\" => \"{}\",\n", escape(key), escape(value)));
    }
    out.push_str(CATALOG_FOOTER);
    out
}

/// Load the catalog at `path`. A missing file is an empty catalog.
pub fn load(path: &Path) -> Result<Catalog> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(parse_catalog(&content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Catalog::new()),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read catalog: {}", path.display()))
        }
    }
}

/// Merge `new_entries` into the catalog on disk and rewrite it.
///
/// The file is read again so that edits made since the run started are kept.
/// Entries already on disk win over new entries with the same key. Nothing is
/// written when `new_entries` is empty.
pub fn merge_and_persist(path: &Path, new_entries: &Catalog) -> Result<MergeSummary> {
    let mut merged = load(path)?;

    if new_entries.is_empty() {
        return Ok(MergeSummary {
            total: merged.len(),
            ..Default::default()
        });
    }

    let mut summary = MergeSummary::default();
    for (key, value) in new_entries {
        if merged.contains_key(key) {
            summary.kept_existing.push(key.clone());
        } else {
            merged.insert(key.clone(), value.clone());
            summary.added.push(key.clone());
        }
    }
    summary.total = merged.len();

    write_atomic(path, &render_catalog(&merged))?;
    Ok(summary)
}

/// Write through a temp file in the target directory, then rename over `path`.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in: {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write catalog: {}", path.display()))?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to write catalog: {}", path.display()))?;

    Ok(())
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Undo the escapes this tool writes. Unknown escapes are kept verbatim.
fn unescape(raw: &str, quote: char) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if next == '\\' || next == quote => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}
