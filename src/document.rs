use std::collections::HashMap;

use serde::Serialize;

use crate::count::TermCounter;
use crate::normalize;
use crate::stats;
use crate::trim::Trimmer;
use crate::vocab::Vocabulary;

/// How a document's processing ended. A document either fully succeeds or is
/// recorded as failed; there is no partial outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    /// Zero words after normalization; score forced to 0, low confidence.
    Empty,
    Failed(String),
}

impl Outcome {
    pub fn label(&self) -> String {
        match self {
            Outcome::Ok => "ok".to_string(),
            Outcome::Empty => "empty".to_string(),
            Outcome::Failed(reason) => format!("failed: {reason}"),
        }
    }
}

/// Immutable per-document result. The full text is not retained past
/// counting; this is all the report ever needs.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    pub folder: String,
    pub file: String,
    pub counts: HashMap<String, usize>,
    pub total: usize,
    pub words: usize,
    pub score: f64,
    pub outcome: Outcome,
}

impl DocumentRecord {
    /// Run the text pipeline on raw extracted text: normalize, optionally
    /// strip back matter, count, score.
    pub fn from_text(
        folder: &str,
        file: &str,
        raw_text: &str,
        counter: &TermCounter,
        trimmer: Option<&Trimmer>,
    ) -> Self {
        let lines = normalize::normalize_lines(raw_text);
        let body = match trimmer {
            Some(t) => t.strip_back_matter(&lines),
            None => lines.as_str(),
        };
        let flat = normalize::flatten(body);
        let words = normalize::word_count(&flat);
        let counts = counter.count(&flat);
        let total = counts.values().sum();
        let outcome = if words == 0 { Outcome::Empty } else { Outcome::Ok };
        DocumentRecord {
            folder: folder.to_string(),
            file: file.to_string(),
            score: stats::normalized_score(total, words),
            counts,
            total,
            words,
            outcome,
        }
    }

    /// Record for a document that could not be extracted: zero counts for
    /// every term, so it still occupies a row in the report.
    pub fn failed(folder: &str, file: &str, vocab: &Vocabulary, reason: String) -> Self {
        DocumentRecord {
            folder: folder.to_string(),
            file: file.to_string(),
            counts: vocab.terms().iter().map(|t| (t.clone(), 0)).collect(),
            total: 0,
            words: 0,
            score: 0.0,
            outcome: Outcome::Failed(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> TermCounter {
        TermCounter::new(&"novel\nrobust".parse().unwrap())
    }

    #[test]
    fn trimming_stops_counting_after_the_header() {
        let raw = "A robust method.\nReferences\nA novel citation about robust work.";
        let trimmed =
            DocumentRecord::from_text("in", "a.pdf", raw, &counter(), Some(&Trimmer::new()));
        assert_eq!(trimmed.counts["robust"], 1);
        assert_eq!(trimmed.counts["novel"], 0);

        let full = DocumentRecord::from_text("in", "a.pdf", raw, &counter(), None);
        assert_eq!(full.counts["robust"], 2);
        assert_eq!(full.counts["novel"], 1);
    }

    #[test]
    fn empty_text_is_flagged_not_failed() {
        let rec = DocumentRecord::from_text("in", "blank.pdf", "  \n\t ", &counter(), None);
        assert_eq!(rec.outcome, Outcome::Empty);
        assert_eq!(rec.words, 0);
        assert_eq!(rec.score, 0.0);
    }

    #[test]
    fn failed_record_keeps_uniform_columns() {
        let vocab: Vocabulary = "novel\nrobust".parse().unwrap();
        let rec = DocumentRecord::failed("in", "bad.pdf", &vocab, "encrypted".into());
        assert_eq!(rec.counts.len(), 2);
        assert_eq!(rec.total, 0);
        assert!(matches!(rec.outcome, Outcome::Failed(_)));
    }
}
