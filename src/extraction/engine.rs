use std::collections::HashSet;

use anyhow::Result;

use super::{
    candidates::CandidateFinder,
    resolver::{KeyPrompt, KeyResolver, PromptKind},
};
use crate::{
    catalog::Catalog,
    keygen::{KeyLookup, derive_default_key, is_valid_key, uniquify},
};

/// Keys that may not be minted again in this run.
///
/// Seeded from the loaded catalog and grown with every minted key. It never
/// shrinks, so keys stay unique across all files of a run.
#[derive(Debug, Default, Clone)]
pub struct UsedKeys {
    keys: HashSet<String>,
}

impl UsedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded_from(catalog: &Catalog) -> Self {
        Self {
            keys: catalog.keys().cloned().collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyLookup for UsedKeys {
    fn is_taken(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// A literal that was moved to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub literal: String,
    pub key: String,
    pub line: usize,
}

/// Result of scanning one text buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub text: String,
    /// Entries minted while scanning this buffer.
    pub entries: Catalog,
    pub replacements: Vec<Replacement>,
    /// Calls left alone because they already reference a key.
    pub skipped_references: usize,
}

impl ScanOutcome {
    pub fn changed(&self) -> bool {
        !self.replacements.is_empty()
    }
}

/// Finds translation calls and rewrites them to catalog references.
#[derive(Debug, Clone)]
pub struct Extractor {
    finder: CandidateFinder,
}

impl Extractor {
    pub fn new(function: &str) -> Result<Self> {
        Ok(Self {
            finder: CandidateFinder::new(function)?,
        })
    }

    pub fn function(&self) -> &str {
        self.finder.function()
    }

    /// Move every literal in `text` into new catalog entries under `namespace`.
    ///
    /// Calls are handled in source order. Keys must be free and pass
    /// [`is_valid_key`]; other answers are asked for again. Each replacement
    /// rewrites every occurrence of the exact call text, so identical calls
    /// share one key; later candidates whose call text is already gone are
    /// skipped.
    pub fn scan_and_rewrite(
        &self,
        text: &str,
        namespace: &str,
        used_keys: &mut UsedKeys,
        resolver: &mut dyn KeyResolver,
    ) -> Result<ScanOutcome> {
        let candidates = self.finder.find(text);
        let mut outcome = ScanOutcome {
            text: text.to_string(),
            ..Default::default()
        };

        for candidate in candidates {
            if candidate.is_key_reference {
                outcome.skipped_references += 1;
                continue;
            }
            if !outcome.text.contains(&candidate.span) {
                continue;
            }

            let default_key = uniquify(&derive_default_key(&candidate.literal), used_keys);
            let prompt = KeyPrompt {
                literal: &candidate.literal,
                default_key: &default_key,
                kind: PromptKind::Initial,
                file: None,
                line: candidate.line,
                col: candidate.col,
                source_line: &candidate.source_line,
            };

            let mut key = or_default(resolver.resolve(&prompt)?, &default_key);
            while !is_valid_key(&key) || used_keys.contains(&key) {
                let rejected = key;
                let kind = if is_valid_key(&rejected) {
                    PromptKind::Taken(&rejected)
                } else {
                    PromptKind::Invalid(&rejected)
                };
                let retry = KeyPrompt { kind, ..prompt };
                key = or_default(resolver.resolve(&retry)?, &default_key);
            }

            used_keys.insert(key.clone());
            outcome
                .entries
                .insert(key.clone(), candidate.literal.clone());

            let reference = format!("{}.{}", namespace, key);
            let call = self
                .finder
                .render_call(&reference, &candidate.trailing_args);
            outcome.text = outcome.text.replace(&candidate.span, &call);

            outcome.replacements.push(Replacement {
                literal: candidate.literal,
                key,
                line: candidate.line,
            });
        }

        Ok(outcome)
    }
}

fn or_default(answer: String, default_key: &str) -> String {
    let answer = answer.trim();
    if answer.is_empty() {
        default_key.to_string()
    } else {
        answer.to_string()
    }
}
