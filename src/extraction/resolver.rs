//! Choosing the final key for an extracted literal.
//!
//! The engine proposes a default key and asks a [`KeyResolver`] for the final
//! one. A blank answer means "use the default". When an answer collides with a
//! key already in use, the resolver is asked again with
//! [`PromptKind::Taken`] until it answers with a free key or a blank. Answers
//! that cannot be written into a call (quotes, backslashes, no leading word
//! character) are asked again with [`PromptKind::Invalid`].

use std::{
    io::{BufRead, Write},
    path::Path,
};

use anyhow::{Context, Result};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

/// Why the resolver is being asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind<'a> {
    /// First question for this literal.
    Initial,
    /// The previous answer is already in use.
    Taken(&'a str),
    /// The previous answer is not a usable key.
    Invalid(&'a str),
}

/// Everything a resolver may show when asking for a key.
#[derive(Debug, Clone, Copy)]
pub struct KeyPrompt<'a> {
    pub literal: &'a str,
    pub default_key: &'a str,
    pub kind: PromptKind<'a>,
    /// File being scanned, when known.
    pub file: Option<&'a Path>,
    pub line: usize,
    pub col: usize,
    pub source_line: &'a str,
}

pub trait KeyResolver {
    /// Return the chosen key, or an empty string to accept the default.
    fn resolve(&mut self, prompt: &KeyPrompt<'_>) -> Result<String>;
}

/// Accepts every default key without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptDefaults;

impl KeyResolver for AcceptDefaults {
    fn resolve(&mut self, _prompt: &KeyPrompt<'_>) -> Result<String> {
        Ok(String::new())
    }
}

/// Interactive resolver reading answers line by line.
///
/// End of input counts as a blank answer, so a closed stdin falls back to the
/// default keys instead of blocking.
pub struct TerminalResolver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn print_literal(&mut self, prompt: &KeyPrompt<'_>) -> Result<()> {
        let out = &mut self.output;
        writeln!(out)?;
        writeln!(
            out,
            "{} \"{}\"",
            "Found translation string:".bold(),
            prompt.literal
        )?;
        match prompt.file {
            Some(file) => writeln!(
                out,
                "  {} {}:{}:{}",
                "-->".blue(),
                file.display(),
                prompt.line,
                prompt.col
            )?,
            None => writeln!(out, "  {} {}:{}", "-->".blue(), prompt.line, prompt.col)?,
        }
        writeln!(out, "   {}", "|".blue())?;
        writeln!(out, "   {} {}", "|".blue(), prompt.source_line)?;

        let prefix: String = prompt
            .source_line
            .chars()
            .take(prompt.col.saturating_sub(1))
            .collect();
        let padding = UnicodeWidthStr::width(prefix.as_str());
        writeln!(
            out,
            "   {} {:>padding$}{}",
            "|".blue(),
            "",
            "^".yellow(),
            padding = padding
        )?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> KeyResolver for TerminalResolver<R, W> {
    fn resolve(&mut self, prompt: &KeyPrompt<'_>) -> Result<String> {
        match prompt.kind {
            PromptKind::Initial => {
                self.print_literal(prompt)?;
                write!(
                    self.output,
                    "Enter a key (default: {}): ",
                    prompt.default_key.cyan()
                )?;
            }
            PromptKind::Taken(key) => {
                writeln!(
                    self.output,
                    "{} The key '{}' is already in use. Please enter a unique key.",
                    "warning:".bold().yellow(),
                    key
                )?;
                write!(
                    self.output,
                    "Enter a unique key for \"{}\" (default: {}): ",
                    prompt.literal,
                    prompt.default_key.cyan()
                )?;
            }
            PromptKind::Invalid(key) => {
                writeln!(
                    self.output,
                    "{} '{}' is not a usable key. Start with a letter, digit or '_', \
                     and avoid spaces, quotes, backslashes, '$' and parentheses.",
                    "warning:".bold().yellow(),
                    key
                )?;
                write!(
                    self.output,
                    "Enter a key for \"{}\" (default: {}): ",
                    prompt.literal,
                    prompt.default_key.cyan()
                )?;
            }
        }
        self.output.flush()?;

        let mut answer = String::new();
        self.input
            .read_line(&mut answer)
            .context("Failed to read key from input")?;

        Ok(answer.trim().to_string())
    }
}
