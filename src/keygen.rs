//! Default key derivation for extracted literals.
//!
//! A key is built from the first few words of the literal so that a reader of
//! the rewritten source can still guess the text behind `messages.save_changes`.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of words kept in a derived key.
pub const MAX_KEY_WORDS: usize = 4;

static MARKUP_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Starts with a word character; nothing that would end or interpolate a
/// double-quoted PHP string.
static VALID_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\w[^\s"'\\$()]*$"#).unwrap());

/// Anything that can answer "is this key already taken?".
pub trait KeyLookup {
    fn is_taken(&self, key: &str) -> bool;
}

impl KeyLookup for std::collections::HashSet<String> {
    fn is_taken(&self, key: &str) -> bool {
        self.contains(key)
    }
}

impl<V> KeyLookup for std::collections::BTreeMap<String, V> {
    fn is_taken(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

/// Derives a readable key from a literal.
///
/// Markup tags are dropped, the rest is lowercased and split into runs of word
/// characters, and at most [`MAX_KEY_WORDS`] of them are joined with `_`.
/// Returns an empty string when the literal has no word characters.
///
/// # Examples
///
/// ```
/// use keyshift::keygen::derive_default_key;
///
/// assert_eq!(derive_default_key("<b>Hello World</b>"), "hello_world");
/// assert_eq!(derive_default_key("Save & Continue Now Please"), "save_continue_now_please");
/// assert_eq!(derive_default_key("..."), "");
/// ```
pub fn derive_default_key(text: &str) -> String {
    let without_tags = MARKUP_TAG_REGEX.replace_all(text, "");
    let lowered = without_tags.to_lowercase();

    WORD_REGEX
        .find_iter(&lowered)
        .take(MAX_KEY_WORDS)
        .map(|word| word.as_str())
        .collect::<Vec<_>>()
        .join("_")
}

/// Whether `key` can be written into a rewritten call and recognised as a key
/// reference on the next run.
///
/// ```
/// use keyshift::keygen::is_valid_key;
///
/// assert!(is_valid_key("save_changes"));
/// assert!(!is_valid_key("!"));
/// assert!(!is_valid_key("a\"b"));
/// ```
pub fn is_valid_key(key: &str) -> bool {
    VALID_KEY_REGEX.is_match(key)
}

/// Returns `base` if it is free, otherwise the first free `base_1`, `base_2`, ...
///
/// An empty base is never returned as is: `namespace.` would not read as a key
/// reference on the next run, so wordless literals start at `_1`.
pub fn uniquify<L: KeyLookup + ?Sized>(base: &str, used: &L) -> String {
    if !base.is_empty() && !used.is_taken(base) {
        return base.to_string();
    }

    let mut index = 1usize;
    loop {
        let candidate = format!("{}_{}", base, index);
        if !used.is_taken(&candidate) {
            return candidate;
        }
        index += 1;
    }
}
