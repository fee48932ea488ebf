use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};

/// Adjectives identified as indicators, used when no custom list is supplied.
pub const DEFAULT_ADJECTIVES: &[&str] = &[
    "commendable", "innovative", "meticulous", "intricate", "notable",
    "versatile", "noteworthy", "invaluable", "pivotal", "potent",
    "fresh", "ingenious", "cogent", "ongoing", "tangible",
    "profound", "methodical", "laudable", "lucid", "appreciable",
    "fascinating", "adaptable", "admirable", "refreshing", "proficient",
    "intriguing", "thoughtful", "credible", "exceptional", "digestible",
    "prevalent", "interpretative", "remarkable", "seamless", "economical",
    "proactive", "interdisciplinary", "sustainable", "optimizable", "comprehensive",
    "vital", "pragmatic", "comprehensible", "unique", "fuller",
    "authentic", "foundational", "distinctive", "pertinent", "valuable",
    "invasive", "speedy", "inherent", "considerable", "holistic",
    "insightful", "operational", "substantial", "compelling", "technological",
    "beneficial", "excellent", "keen", "cultural", "unauthorized",
    "strategic", "expansive", "prospective", "vivid", "consequential",
    "manageable", "unprecedented", "inclusive", "asymmetrical", "cohesive",
    "replicable", "quicker", "defensive", "wider", "imaginative",
    "traditional", "competent", "contentious", "widespread", "environmental",
    "instrumental", "substantive", "creative", "academic", "sizeable",
    "extant", "demonstrable", "prudent", "practicable", "signatory",
    "continental", "unnoticed", "automotive", "minimalistic", "intelligent",
];

/// The set of target terms whose frequency is measured.
///
/// Terms are lowercase and deduplicated. Load order is preserved and fixes
/// the column order of the report, so runs with the same list are comparable.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
}

impl Vocabulary {
    /// Load from a newline-delimited file. Blank lines and lines starting
    /// with `#` are ignored. A missing file or a file with zero usable terms
    /// is a fatal configuration error, not a silent no-op.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read adjective list {}: {e}", path.display()))
        })?;
        let vocab = Self::from_lines(raw.lines());
        if vocab.is_empty() {
            return Err(Error::Config(format!(
                "adjective list {} contains no usable terms",
                path.display()
            )));
        }
        log::info!("loaded {} adjectives from {}", vocab.len(), path.display());
        Ok(vocab)
    }

    fn from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Self {
        let mut seen = HashSet::new();
        let mut terms = Vec::new();
        for line in lines {
            let term = line.trim().to_lowercase();
            if term.is_empty() || term.starts_with('#') {
                continue;
            }
            if seen.insert(term.clone()) {
                terms.push(term);
            }
        }
        Vocabulary { terms }
    }

    /// Terms in load order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl std::str::FromStr for Vocabulary {
    type Err = Error;

    /// Parse newline-delimited list content, same format as [`Vocabulary::load`].
    fn from_str(s: &str) -> Result<Self> {
        let vocab = Self::from_lines(s.lines());
        if vocab.is_empty() {
            return Err(Error::Config("adjective list contains no usable terms".into()));
        }
        Ok(vocab)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::from_lines(DEFAULT_ADJECTIVES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn skips_comments_blanks_and_duplicates() {
        let vocab = Vocabulary::from_lines(
            "# indicator adjectives\n\nRobust\nnovel\nrobust\n  \n"
                .lines(),
        );
        assert_eq!(vocab.terms(), &["robust".to_string(), "novel".to_string()]);
    }

    #[test]
    fn default_list_is_populated_and_unique() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.len(), DEFAULT_ADJECTIVES.len());
    }

    #[test]
    fn empty_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# only a comment").unwrap();
        let err = Vocabulary::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Vocabulary::load(Path::new("/no/such/list.txt")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
