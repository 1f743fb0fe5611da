// src/languages/extract.rs
// =============================================================================
// This module extracts the list of languages from the collection's README.
//
// The README lists every language as a markdown bullet link:
//   * [Go](g/Go.go)
//   * [0815](%23/0815.0815)
//
// The link target is "<bucket>/<file name>", where the bucket is a single
// lowercase letter or "%23" (the URL-encoded '#' used for names that don't
// start with a letter). The raw "#/" form is not matched.
//
// We can't hand this to a CommonMark parser: the README may be indented
// (which markdown reads as a code block) and we only want this one shape of
// link, so a single compiled regex does the job.
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::entry::Language;

// The bullet-link pattern, compiled once for the whole process
//
// Capture groups:
//   1: the bucket ("a".."z" or "%23")
//   2: the (still percent-encoded) file name
//
// The display name between the brackets is ignored; the file name is the
// source of truth for both the name and the extension.
//
// Regex::new only fails on an invalid pattern, and this one is constant.
static BULLET_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*\* \[[^\n]*?\]\(([a-z]|%23)/([^\n]*)\)[ \t\r]*$").unwrap()
});

// Extracts every language listed in a README
//
// Parameters:
//   readme: the raw README text
//
// Returns: languages in the order they appear in the text (possibly empty)
//
// A link whose file name has a malformed percent-escape is skipped; the
// links around it are still returned.
pub fn extract_languages(readme: &str) -> Vec<Language> {
    let mut languages = Vec::new();

    for captures in BULLET_LINK.captures_iter(readme) {
        let encoded = &captures[2];

        match decode_file_name(encoded) {
            Some(file_name) => languages.push(Language::from_file_name(&file_name)),
            None => debug!(file_name = encoded, "Skipping link with malformed encoding"),
        }
    }

    languages
}

// Percent-decodes a file name, strictly
//
// urlencoding passes a stray '%' through untouched, so we check the
// escapes ourselves first: every '%' must be followed by two hex digits.
// The decoded bytes must also be valid UTF-8.
fn decode_file_name(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3)?;
            if !escape.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(encoded).ok().map(|decoded| decoded.into_owned())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is the raw '#' bucket not matched?
//    - The character class only allows [a-z] or the literal "%23"
//    - The README always writes the '#' bucket URL-encoded, and the raw form
//      is deliberately left out of the list
//
// 2. Why the (?m) flag?
//    - It makes ^ and $ match at every line, so one link never spans lines
//
// 3. What is Lazy?
//    - once_cell::sync::Lazy runs the closure the first time it's used
//    - Every later call reuses the same compiled Regex
// -----------------------------------------------------------------------------
