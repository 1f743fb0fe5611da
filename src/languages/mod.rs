// src/languages/mod.rs
// =============================================================================
// This module holds the language parsing and lookup logic.
//
// Submodules:
// - entry: The Language and DirectoryEntry value types
// - extract: Pulls the language list out of the README
// - matcher: Finds one language in a bucket directory
//
// Everything in here is pure: no network, no shared state. The server and
// the CLI fetch the data and hand it to these functions.
// =============================================================================

mod entry;
mod extract;
mod matcher;

pub use entry::{DirectoryEntry, Language};
pub use extract::extract_languages;
pub use matcher::{bucket_key, find_language};
