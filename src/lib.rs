//! keyshift - move inline translation strings into a language catalog
//!
//! keyshift scans PHP/Blade sources for `__('literal')` calls, gives each
//! literal a short key derived from its words, stores the literal in a PHP
//! catalog file (`lang/en/messages.php`), and rewrites the call to
//! `__("messages.key")`. Running it again over migrated code changes nothing.
//!
//! ## Module Structure
//!
//! - `catalog`: Loading, merging and writing the catalog file
//! - `keygen`: Default key derivation and de-duplication
//! - `extraction`: Finding calls, choosing keys and rewriting text
//! - `migrate`: One run across many files with a single catalog merge
//! - `file_scanner`: Source file discovery
//! - `config`: Configuration file loading and parsing
//! - `cli`: Command-line interface layer

pub mod catalog;
pub mod cli;
pub mod config;
pub mod extraction;
pub mod file_scanner;
pub mod keygen;
pub mod migrate;
