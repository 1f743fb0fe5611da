// src/languages/matcher.rs
// =============================================================================
// This module finds one language inside a bucket directory.
//
// The collection stores example files in one directory per first letter:
//   g/Go.go
//   n/Node.js.js
//   #/🆒           <- anything that doesn't start with a-z
//
// To look up "go" we list the "g" directory and compare every file name
// (without its extension) against "go", ignoring case.
// =============================================================================

use super::entry::{split_extension, DirectoryEntry, Language};

// The bucket used for names that don't start with an ASCII letter
pub const OTHER_BUCKET: char = '#';

// Finds the directory entry for a language
//
// Parameters:
//   entries: the listing of one bucket directory
//   target: the language name the user asked for
//
// Returns: the first matching entry as a Language, or None
pub fn find_language(entries: &[DirectoryEntry], target: &str) -> Option<Language> {
    entries.iter().find_map(|entry| {
        let (name, extension) = split_extension(&entry.name);

        if eq_ignore_case(name, target) {
            Some(Language {
                name: name.to_string(),
                extension: extension.to_string(),
            })
        } else {
            None
        }
    })
}

// Picks the bucket directory a language lives in
//
// The first character is lowercased; a-z is its own bucket and everything
// else (digits, punctuation, other scripts, emoji) goes to '#'.
//
// Only the first char of the lowercase mapping counts, so 'İ' (which
// lowercases to 'i' + U+0307) lands in 'i' like the single-char mapping
// used when the collection was laid out.
//
// # Panics
//
// Panics if `name` is empty. Callers validate names before getting here.
pub fn bucket_key(name: &str) -> char {
    let Some(first) = name.chars().next() else {
        panic!("bucket_key called with an empty language name");
    };

    match first.to_lowercase().next() {
        Some(c) if c.is_ascii_lowercase() => c,
        _ => OTHER_BUCKET,
    }
}

// Unicode-aware case-insensitive comparison
//
// Full Unicode case folding: "straße" equals "STRASSE" and a final sigma
// equals a capital one. Scripts without case (CJK, Arabic, emoji) fold to
// themselves, so this becomes an exact comparison for them.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    caseless::default_caseless_match_str(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(names: &[&str]) -> Vec<DirectoryEntry> {
        names.iter().map(|name| DirectoryEntry::new(*name)).collect()
    }

    #[test]
    fn test_find_exact_name() {
        let entries = listing(&["Gambas.gambas", "Go.go", "Groovy.groovy"]);
        assert_eq!(
            find_language(&entries, "Go"),
            Some(Language {
                name: "Go".to_string(),
                extension: ".go".to_string(),
            })
        );
    }

    #[test]
    fn test_find_ignores_case() {
        let entries = listing(&["Go.go"]);
        let found = find_language(&entries, "go").unwrap();
        assert_eq!(found.name, "Go");
        assert_eq!(found.extension, ".go");
    }

    #[test]
    fn test_missing_language_is_none() {
        let entries = listing(&["Go.go"]);
        assert_eq!(find_language(&entries, "notalang"), None);
    }

    #[test]
    fn test_empty_listing_is_none() {
        assert_eq!(find_language(&[], "Go"), None);
    }

    #[test]
    fn test_dotted_name() {
        let entries = listing(&["Nim.nim", "Node.js.js"]);
        let found = find_language(&entries, "Node.js").unwrap();
        assert_eq!(found.name, "Node.js");
        assert_eq!(found.extension, ".js");
    }

    #[test]
    fn test_first_match_wins() {
        let entries = listing(&["GO.txt", "Go.go"]);
        let found = find_language(&entries, "go").unwrap();
        assert_eq!(found.extension, ".txt");
    }

    #[test]
    fn test_non_latin_names_match_themselves() {
        let names = [
            ("قلب", "قلب"),
            ("火星文", "火星文.martian"),
            ("μλ", "μλ"),
            ("なでしこ", "なでしこ.nako"),
            ("ᚱᚢᚾᛅᛦ", "ᚱᚢᚾᛅᛦ"),
            ("!@#$%^&∗()_+", "!@#$%^&∗()_+"),
            ("∗﹥﹤﹥", "∗﹥﹤﹥"),
            ("🆒", "🆒"),
        ];

        for (target, file_name) in names {
            let entries = listing(&["0815.0815", file_name]);
            let found = find_language(&entries, target);
            assert_eq!(
                found.map(|l| l.name),
                Some(target.to_string()),
                "{} should match {}",
                target,
                file_name
            );
        }
    }

    #[test]
    fn test_greek_ignores_case() {
        let entries = listing(&["ΜΛ"]);
        assert!(find_language(&entries, "μλ").is_some());
    }

    #[test]
    fn test_final_sigma_folds() {
        let entries = listing(&["ΟΔΟΣ"]);
        let found = find_language(&entries, "οδος").unwrap();
        assert_eq!(found.name, "ΟΔΟΣ");

        let entries = listing(&["οδος.x"]);
        assert!(find_language(&entries, "ΟΔΟΣ").is_some());
    }

    #[test]
    fn test_sharp_s_folds_to_double_s() {
        let entries = listing(&["STRASSE.x"]);
        let found = find_language(&entries, "straße").unwrap();
        assert_eq!(found.name, "STRASSE");
        assert_eq!(found.extension, ".x");
    }

    #[test]
    fn test_bucket_for_dotted_capital_i() {
        assert_eq!(bucket_key("İstanbul"), 'i');
    }

    #[test]
    fn test_bucket_for_letter() {
        assert_eq!(bucket_key("Go"), 'g');
        assert_eq!(bucket_key("zsh"), 'z');
    }

    #[test]
    fn test_bucket_for_non_letters() {
        assert_eq!(bucket_key("!@#"), '#');
        assert_eq!(bucket_key("🆒"), '#');
        assert_eq!(bucket_key("0815"), '#');
        assert_eq!(bucket_key("μλ"), '#');
    }

    #[test]
    #[should_panic]
    fn test_bucket_for_empty_name_panics() {
        bucket_key("");
    }
}
