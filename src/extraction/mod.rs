//! Moving translation literals out of source text.
//!
//! ## Module Structure
//!
//! - `candidates`: pattern-based discovery of translation calls
//! - `resolver`: choosing the final key (interactive or automatic)
//! - `engine`: key assignment and in-place rewriting of one text buffer
//!
//! ## Flow
//!
//! 1. `CandidateFinder::find` locates `__('literal', ...)` calls in source order
//! 2. Calls whose literal already looks like `namespace.key` are left alone
//! 3. A default key is derived and made unique against [`UsedKeys`]
//! 4. The [`KeyResolver`] confirms or overrides it
//! 5. The call is rewritten to `__("namespace.key", ...)`

pub mod candidates;
pub mod engine;
pub mod resolver;


pub use candidates::{CandidateFinder, CandidateMatch, DEFAULT_FUNCTION, find_candidates};
pub use engine::{Extractor, Replacement, ScanOutcome, UsedKeys};
pub use resolver::{AcceptDefaults, KeyPrompt, KeyResolver, PromptKind, TerminalResolver};
