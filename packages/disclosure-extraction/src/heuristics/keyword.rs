//! Keyword-sentence scanning for the exports report.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use crate::text::{normalize_ws, split_sentences_loose};

/// Default cap on returned sentences.
pub const DEFAULT_MAX_SENTENCES: usize = 20;

/// Word-boundary pattern matching `word` plus any suffix, so `export`
/// also hits `exports`, `exporting` and `exporters`.
pub fn keyword_pattern(word: &str) -> Regex {
    RegexBuilder::new(&format!(r"\b{}\w*", regex::escape(word)))
        .case_insensitive(true)
        .build()
        .expect("escaped keyword is a valid pattern")
}

/// Sentences matching `pattern`, normalized, deduplicated by lowercased
/// text, in input order, at most `max`.
pub fn matching_sentences(text: &str, pattern: &Regex, max: usize) -> Vec<String> {
    let mut hits = Vec::new();
    if text.is_empty() {
        return hits;
    }
    let mut seen = HashSet::new();
    for sentence in split_sentences_loose(text) {
        let s = normalize_ws(sentence);
        if s.is_empty() || !pattern.is_match(&s) {
            continue;
        }
        if seen.insert(s.to_lowercase()) {
            hits.push(s);
            if hits.len() >= max {
                break;
            }
        }
    }
    hits
}
