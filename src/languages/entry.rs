// src/languages/entry.rs
// =============================================================================
// The value types shared by the extractor and the matcher.
//
// A "language" is just a name plus the extension of its example file:
//   "Go.go"      -> Language { name: "Go", extension: ".go" }
//   "Node.js.js" -> Language { name: "Node.js", extension: ".js" }
//   "μλ"         -> Language { name: "μλ", extension: "" }
// =============================================================================

use serde::{Deserialize, Serialize};

// One language found in the README or in a bucket directory
//
// #[derive(PartialEq, Eq)] gives us structural equality, which is all the
// identity a language has
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Human-readable name, without the extension
    pub name: String,
    /// File suffix including the leading dot, or "" when there is none
    pub extension: String,
}

impl Language {
    // Builds a Language from a file name by splitting off the extension
    pub fn from_file_name(file_name: &str) -> Self {
        let (name, extension) = split_extension(file_name);
        Language {
            name: name.to_string(),
            extension: extension.to_string(),
        }
    }

    // The file name this language is stored under (name + extension)
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, self.extension)
    }
}

// One entry of a remote directory listing
//
// GitHub returns a lot more fields than this; serde ignores the ones we
// don't declare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
}

#[cfg(test)]
impl DirectoryEntry {
    pub fn new(name: impl Into<String>) -> Self {
        DirectoryEntry { name: name.into() }
    }
}

// Splits a file name at its last '.'
//
// Returns (name, extension) where the extension keeps its dot.
// A name without a dot has an empty extension.
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) => file_name.split_at(idx),
        None => (file_name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_extension() {
        assert_eq!(split_extension("Go.go"), ("Go", ".go"));
    }

    #[test]
    fn test_split_keeps_inner_dots_in_name() {
        assert_eq!(split_extension("Node.js.js"), ("Node.js", ".js"));
    }

    #[test]
    fn test_split_without_extension() {
        assert_eq!(split_extension("μλ"), ("μλ", ""));
    }

    #[test]
    fn test_file_name_round_trip() {
        let language = Language::from_file_name("火星文.martian");
        assert_eq!(language.name, "火星文");
        assert_eq!(language.extension, ".martian");
        assert_eq!(language.file_name(), "火星文.martian");
    }
}
