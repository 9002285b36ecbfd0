//! Text analysis: normalize -> tokenize -> stem -> filter.
//!
//! The corpus mixes Russian and English. Normalization reduces text to
//! lowercase ASCII alphanumerics plus lowercase Cyrillic, everything else
//! becoming a space; each token is then routed to a Snowball stemmer by
//! script. Script detection is enough here because the two alphabets share
//! no codepoints in the relevant ranges.

use rust_stemmers::{Algorithm, Stemmer};

/// Stemmer routing target for a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Russian,
}

impl Language {
    /// Any non-ASCII byte means the token survived normalization as
    /// Cyrillic, so it stems as Russian.
    pub fn detect(token: &str) -> Self {
        if token.bytes().any(|b| b >= 0x80) {
            Language::Russian
        } else {
            Language::English
        }
    }
}

/// Holds one stemmer per language. One analyzer is built at startup and
/// passed down to the loader and the server, so corpus documents and
/// queries go through the same pipeline and their terms compare equal.
pub struct Analyzer {
    english: Stemmer,
    russian: Stemmer,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            english: Stemmer::create(Algorithm::English),
            russian: Stemmer::create(Algorithm::Russian),
        }
    }

    /// Turns a document or query string into stemmed terms, in input order,
    /// duplicates preserved. Tokens whose stem is 2 bytes or shorter are
    /// dropped.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let normalized = normalize(text);
        let mut terms = Vec::new();
        for token in normalized.split(' ') {
            if token.is_empty() {
                continue;
            }
            let stemmer = match Language::detect(token) {
                Language::English => &self.english,
                Language::Russian => &self.russian,
            };
            let stemmed = stemmer.stem(token);
            if stemmed.len() > 2 {
                terms.push(stemmed.into_owned());
            }
        }
        terms
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Reduces `text` to `[a-z0-9 ]` plus lowercase Cyrillic.
///
/// ASCII alphanumerics are lowercased and kept; other ASCII becomes a
/// space. Characters in U+0400..=U+047F (the two-byte Cyrillic block) are
/// kept, with А-Я and Ё folded to lowercase. Every other character becomes
/// a single space.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            if c.is_ascii_alphanumeric() {
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(' ');
            }
        } else if ('\u{0400}'..='\u{047F}').contains(&c) {
            out.push(lowercase_cyrillic(c));
        } else {
            out.push(' ');
        }
    }
    out
}

fn lowercase_cyrillic(c: char) -> char {
    match c {
        // А-Я and а-я are 0x20 apart, mirroring the ASCII case split.
        'А'..='Я' => char::from_u32(c as u32 + 0x20).unwrap_or(c),
        'Ё' => 'ё',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ascii() {
        assert_eq!(normalize("Hello, World! 42"), "hello  world  42");
        assert_eq!(normalize("a-b_c"), "a b c");
    }

    #[test]
    fn normalize_cyrillic_case_folds() {
        assert_eq!(normalize("Привет МИР"), "привет мир");
        assert_eq!(normalize("Ёлка ёж"), "ёлка ёж");
    }

    #[test]
    fn normalize_replaces_other_scripts_with_spaces() {
        assert_eq!(normalize("héllo"), "h llo");
        assert_eq!(normalize("日本語 text"), "    text");
        assert_eq!(normalize("«кавычки»"), " кавычки ");
    }

    #[test]
    fn detect_routes_by_script() {
        assert_eq!(Language::detect("running"), Language::English);
        assert_eq!(Language::detect("привет"), Language::Russian);
        assert_eq!(Language::detect("abcпр"), Language::Russian);
    }

    #[test]
    fn short_stems_are_dropped() {
        let analyzer = Analyzer::new();
        // "a" and "of" normalize to short tokens; "я" is a 2-byte stem.
        assert!(analyzer.analyze("a of я").is_empty());
    }

    #[test]
    fn duplicates_and_order_are_preserved() {
        let analyzer = Analyzer::new();
        let terms = analyzer.analyze("banana apple banana");
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0], terms[2]);
    }
}
