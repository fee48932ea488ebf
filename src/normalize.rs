use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// A word is a maximal run of alphabetic characters, optionally joined by
/// single hyphens ("cutting-edge" is one word).
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Alphabetic}+(?:-\p{Alphabetic}+)*").unwrap());

/// Whitespace characters PDF extractors commonly emit in place of a space:
/// NBSP, narrow NBSP, figure space, plus the usual controls.
fn is_odd_whitespace(c: char) -> bool {
    matches!(c, '\u{A0}' | '\u{2007}' | '\u{202F}' | '\t' | '\r')
}

/// Zero-width artifacts that carry no text at all.
fn is_artifact(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{FEFF}' | '\u{0}')
}

/// Normalize one line: NFKC (folds ligatures like "ﬁ" to "fi"), odd
/// whitespace to plain spaces, zero-width artifacts dropped, runs of spaces
/// collapsed, lowercased.
fn normalize_line(line: &str) -> String {
    let folded: String = line
        .nfkc()
        .filter(|c| !is_artifact(*c))
        .map(|c| if is_odd_whitespace(c) { ' ' } else { c })
        .collect();
    folded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Line-preserving normalization, for the section trimmer. Each line is
/// normalized independently; line breaks survive so headers stay on their
/// own lines. Blank lines are dropped.
pub fn normalize_lines(raw: &str) -> String {
    raw.lines()
        .map(normalize_line)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Flat normalization, for matching: everything on one line, single spaces.
pub fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count words in normalized text.
pub fn word_count(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_is_idempotent() {
        let raw = "Efﬁcient\u{A0}and   ROBUST\r\n\r\nmethods\u{2019} results\n";
        let once = normalize_lines(raw);
        assert_eq!(normalize_lines(&once), once);
        let flat = flatten(&once);
        assert_eq!(flatten(&flat), flat);
    }

    #[test]
    fn folds_ligatures_and_case() {
        assert_eq!(normalize_line("Efﬁcient ﬂows"), "efficient flows");
    }

    #[test]
    fn collapses_odd_whitespace() {
        assert_eq!(normalize_line("a\u{A0}b\t c\u{200B}d"), "a b cd");
    }

    #[test]
    fn counts_hyphenated_runs_as_single_words() {
        assert_eq!(word_count("a cutting-edge method, truly state-of-the-art."), 5);
    }

    #[test]
    fn accented_words_count_as_single_words() {
        assert_eq!(word_count("a naïve estimate by müller"), 5);
        assert_eq!(word_count("the naïve-looking café of señor gödel"), 6);
    }

    #[test]
    fn scenario_sentence_has_eleven_words() {
        let text = "this is a robust and novel method. the method is robust.";
        assert_eq!(word_count(text), 11);
    }
}
