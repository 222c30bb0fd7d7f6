//! Text-matching primitives shared by identity resolution, RCT detection and
//! specialty classification.

use std::collections::HashSet;

use regex::Regex;

/// Acronyms that always need whole-word matching, whatever their length.
const WORD_BOUNDARY_ACRONYMS: [&str; 19] = [
    "copd", "gerd", "ercp", "dmard", "nsaid", "ssri", "snri", "adhd", "pcos", "nicu", "mrsa",
    "ards", "hba1c", "fev1", "afib", "ptsd", "lasik", "dexa", "cpap",
];

const SHORT_TERM_MAX_CHARS: usize = 3;
const TRIGRAM: usize = 3;

/// Lowercase and keep alphanumeric characters only.
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Character-trigram Jaccard similarity of two titles after normalization.
///
/// Titles shorter than three normalized characters compare by exact equality
/// (1.0 or 0.0). An empty title is never similar to anything.
pub fn trigram_similarity(left: &str, right: &str) -> f64 {
    let left = normalize_title(left);
    let right = normalize_title(right);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();
    if left.len() < TRIGRAM || right.len() < TRIGRAM {
        return if left == right { 1.0 } else { 0.0 };
    }

    let left_grams: HashSet<&[char]> = left.windows(TRIGRAM).collect();
    let right_grams: HashSet<&[char]> = right.windows(TRIGRAM).collect();
    let intersection = left_grams.intersection(&right_grams).count();
    let union = left_grams.union(&right_grams).count();

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Last name of the first listed author: the part before the comma for
/// "Last, First", otherwise the final whitespace-delimited token.
pub fn first_author_last_name(authors: &[String]) -> Option<&str> {
    let first = authors.first()?.trim();
    if first.is_empty() {
        return None;
    }

    let last = match first.split_once(',') {
        Some((last, _)) => last.trim(),
        None => first.split_whitespace().last().unwrap_or(first),
    };
    (!last.is_empty()).then_some(last)
}

/// A single vocabulary term compiled for matching against lowercased text.
#[derive(Debug, Clone)]
pub enum TermMatcher {
    /// Short terms and acronyms: must appear as a whole word.
    Word { term: String, pattern: Regex },
    /// Longer terms: plain substring.
    Substring(String),
}

impl TermMatcher {
    pub fn new(term: &str) -> Self {
        let term = term.trim().to_lowercase();
        if needs_word_boundary(&term) {
            let source = format!(r"\b{}\b", regex::escape(&term));
            if let Ok(pattern) = Regex::new(&source) {
                return Self::Word { term, pattern };
            }
        }
        Self::Substring(term)
    }

    pub fn term(&self) -> &str {
        match self {
            Self::Word { term, .. } => term,
            Self::Substring(term) => term,
        }
    }

    /// `haystack` must already be lowercased.
    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            Self::Word { pattern, .. } => pattern.is_match(haystack),
            Self::Substring(term) => !term.is_empty() && haystack.contains(term.as_str()),
        }
    }
}

fn needs_word_boundary(term: &str) -> bool {
    term.chars().count() <= SHORT_TERM_MAX_CHARS || WORD_BOUNDARY_ACRONYMS.contains(&term)
}

/// Convenience wrapper for one-off checks; hot paths keep compiled matchers.
pub fn term_matches(term: &str, text: &str) -> bool {
    TermMatcher::new(term).is_match(&text.to_lowercase())
}

/// Cuts `text` to at most `max_chars` characters for log lines.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_title_keeps_alphanumerics_only() {
        assert_eq!(normalize_title("Effect of Drug A: An RCT!"), "effectofdrugaanrct");
        assert_eq!(normalize_title("  "), "");
    }

    #[test]
    fn similarity_ignores_case_and_punctuation() {
        let a = "Effect of Drug A: A Randomized Controlled Trial";
        let b = "Effect of drug A - a randomized controlled trial.";
        assert_eq!(trigram_similarity(a, b), 1.0);
    }

    #[test]
    fn similarity_boundary_at_ninety_percent() {
        // 9 shared trigrams out of 10 distinct.
        assert_eq!(trigram_similarity("ABCDEFGHIJK", "ABCDEFGHIJKL"), 0.9);
        // 8 shared trigrams out of 9 distinct.
        assert!(trigram_similarity("ABCDEFGHIJ", "ABCDEFGHIJK") < 0.9);
    }

    #[test]
    fn short_titles_use_exact_equality() {
        assert_eq!(trigram_similarity("Ab", "a-b"), 1.0);
        assert_eq!(trigram_similarity("Ab", "Ac"), 0.0);
        assert_eq!(trigram_similarity("", "anything"), 0.0);
    }

    #[test]
    fn first_author_last_name_formats() {
        let comma = vec!["Smith, John".to_string()];
        let plain = vec!["John A. Smith".to_string(), "Other".to_string()];
        let blank = vec!["  ".to_string()];
        assert_eq!(first_author_last_name(&comma), Some("Smith"));
        assert_eq!(first_author_last_name(&plain), Some("Smith"));
        assert_eq!(first_author_last_name(&blank), None);
        assert_eq!(first_author_last_name(&[]), None);
    }

    #[test]
    fn short_terms_need_word_boundaries() {
        assert!(!term_matches("ed", "patients were placed in groups"));
        assert!(term_matches("ed", "presenting to the ED with chest pain"));
        assert!(!term_matches("ms", "humans"));
        assert!(term_matches("copd", "Adults with COPD"));
        assert!(!term_matches("copd", "copdx"));
    }

    #[test]
    fn long_terms_match_as_substrings() {
        assert!(term_matches("cardiac", "Cardiac Surgical Procedures"));
        assert!(term_matches("neoplasm", "Breast Neoplasms"));
        assert!(!term_matches("cardiac", "cardiology"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 50), "hi");
    }
}
