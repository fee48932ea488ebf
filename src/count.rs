use std::collections::HashMap;

use regex::Regex;

use crate::vocab::Vocabulary;

/// Whole-word matcher over a vocabulary, compiled once per run.
///
/// All terms go into a single word-boundary alternation, longest alternative
/// first so a hyphenated or multi-word term wins over its own prefix
/// ("cutting-edge" before "cutting"). Matching is case-insensitive on text
/// that is already case-folded, and word boundaries keep strict substrings
/// from counting ("novel" never matches inside "novelty").
#[derive(Debug)]
pub struct TermCounter {
    re: Regex,
    terms: Vec<String>,
}

impl TermCounter {
    pub fn new(vocab: &Vocabulary) -> Self {
        let mut alternatives: Vec<&String> = vocab.terms().iter().collect();
        alternatives.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alt = alternatives
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let re = Regex::new(&format!(r"(?i)\b(?:{alt})\b")).unwrap();
        TermCounter {
            re,
            terms: vocab.terms().to_vec(),
        }
    }

    /// Count non-overlapping whole-word occurrences of every term in
    /// flattened normalized text. Every vocabulary term is present in the
    /// result, zero included, so report columns stay uniform.
    pub fn count(&self, text: &str) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> =
            self.terms.iter().map(|t| (t.clone(), 0)).collect();
        for m in self.re.find_iter(text) {
            let term = m.as_str().to_lowercase();
            if let Some(n) = counts.get_mut(&term) {
                *n += 1;
            }
        }
        counts
    }
}
