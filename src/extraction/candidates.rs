//! Locating translation calls in raw source text.
//!
//! Matching is pattern based: a call is `FUNC(` followed by a single- or
//! double-quoted literal, optional extra arguments, and the first closing
//! parenthesis after them. Nested calls inside the extra arguments are not
//! understood.

use std::{ops::Range, sync::LazyLock};

use anyhow::{Context, Result};
use regex::Regex;

/// Call identifier used by Laravel's translation helper.
pub const DEFAULT_FUNCTION: &str = "__";

/// A literal containing `word.word` is treated as an existing catalog key.
static KEY_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w\.\w").unwrap());

static DEFAULT_FINDER: LazyLock<CandidateFinder> =
    LazyLock::new(|| CandidateFinder::new(DEFAULT_FUNCTION).unwrap());

/// One translation call found in a text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMatch {
    /// The full call text, e.g. `__('Hello', ['name' => $n])`.
    pub span: String,
    /// Byte range of `span` in the scanned text.
    pub range: Range<usize>,
    /// Content between the quotes, untouched.
    pub literal: String,
    pub quote: char,
    /// Everything after the literal up to the closing parenthesis, starting
    /// with the comma. Empty when the call has a single argument.
    pub trailing_args: String,
    /// True if the literal already looks like `namespace.key`.
    pub is_key_reference: bool,
    /// 1-based line of the call.
    pub line: usize,
    /// 1-based column (in characters) of the call.
    pub col: usize,
    /// The line the call starts on.
    pub source_line: String,
}

/// Compiled call pattern for one translation function name.
#[derive(Debug, Clone)]
pub struct CandidateFinder {
    function: String,
    pattern: Regex,
}

impl CandidateFinder {
    pub fn new(function: &str) -> Result<Self> {
        if function.trim().is_empty() {
            anyhow::bail!("Translation function name must not be empty");
        }

        // Identifiers get a word boundary so `my__(` or `mytrans(` are not calls.
        let boundary = if function.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            r"\b"
        } else {
            ""
        };
        let source = format!(
            r#"(?s){}{}\(\s*(?:'(.+?)'|"(.+?)")\s*(,.*?)?\)"#,
            boundary,
            regex::escape(function)
        );
        let pattern = Regex::new(&source)
            .with_context(|| format!("Invalid translation function name: \"{}\"", function))?;

        Ok(Self {
            function: function.to_string(),
            pattern,
        })
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    /// All calls in `text`, in source order.
    pub fn find(&self, text: &str) -> Vec<CandidateMatch> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let (literal, quote) = match (caps.get(1), caps.get(2)) {
                    (Some(single), _) => (single.as_str(), '\''),
                    (None, Some(double)) => (double.as_str(), '"'),
                    (None, None) => return None,
                };
                let trailing_args = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
                let (line, col, source_line) = locate(text, whole.start());

                Some(CandidateMatch {
                    span: whole.as_str().to_string(),
                    range: whole.range(),
                    literal: literal.to_string(),
                    quote,
                    trailing_args: trailing_args.to_string(),
                    is_key_reference: is_key_reference(literal),
                    line,
                    col,
                    source_line: source_line.to_string(),
                })
            })
            .collect()
    }

    /// Render the replacement call for `reference` (`namespace.key`).
    ///
    /// The reference is always double-quoted; extra arguments are copied as-is.
    pub fn render_call(&self, reference: &str, trailing_args: &str) -> String {
        format!("{}(\"{}\"{})", self.function, reference, trailing_args)
    }
}

/// Find `__(...)` calls in `text`.
pub fn find_candidates(text: &str) -> Vec<CandidateMatch> {
    DEFAULT_FINDER.find(text)
}

/// Whether a literal already references a catalog key (`auth.failed`).
pub fn is_key_reference(literal: &str) -> bool {
    KEY_REFERENCE_REGEX.is_match(literal)
}

/// Line, column and line text for a byte offset.
fn locate(text: &str, offset: usize) -> (usize, usize, &str) {
    let before = &text[..offset];
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = text[offset..]
        .find('\n')
        .map(|i| offset + i)
        .unwrap_or(text.len());

    let line = before.matches('\n').count() + 1;
    let col = text[line_start..offset].chars().count() + 1;
    let source_line = text[line_start..line_end].trim_end_matches('\r');

    (line, col, source_line)
}
