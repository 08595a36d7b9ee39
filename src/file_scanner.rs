use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths below the root.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning a directory.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Matching files in walk order (sorted by file name per directory).
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// What a source path argument resolved to.
#[derive(Debug)]
pub enum SourceSet {
    /// A single file, processed whatever its extension.
    File(PathBuf),
    Directory(ScanResult),
    /// Neither a file nor a directory.
    Missing(PathBuf),
}

impl SourceSet {
    pub fn files(&self) -> &[PathBuf] {
        match self {
            SourceSet::File(path) => std::slice::from_ref(path),
            SourceSet::Directory(result) => &result.files,
            SourceSet::Missing(_) => &[],
        }
    }
}

pub fn collect_sources(
    path: &Path,
    extensions: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> SourceSet {
    if path.is_file() {
        SourceSet::File(path.to_path_buf())
    } else if path.is_dir() {
        SourceSet::Directory(scan_files(path, extensions, ignore_patterns, verbose))
    } else {
        SourceSet::Missing(path.to_path_buf())
    }
}

pub fn scan_files(
    root: &Path,
    extensions: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let mut result = ScanResult::default();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(root.join(p));
        }
    }

    let suffixes: Vec<String> = extensions.iter().map(|ext| normalize_extension(ext)).collect();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();
        let path_str = path.to_string_lossy();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        if entry.file_type().is_file() && has_extension(path, &suffixes) {
            result.files.push(path.to_path_buf());
        }
    }

    result
}

fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

/// Suffix match on the file name, so `.blade.php` works as an extension.
fn has_extension(path: &Path, suffixes: &[String]) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())))
}
