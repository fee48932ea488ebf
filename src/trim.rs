use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Section headers that mark the start of trailing back matter.
pub const DEFAULT_SECTION_HEADERS: &[&str] = &[
    "references?",
    "bibliograph(?:y|ies)",
    "works\\s+cited",
    "literature\\s+cited",
    "citations?",
    "sources?",
    "references\\s+and\\s+notes",
    "notes",
    "endnotes",
    "footnotes",
    "appendix(?:es)?",
    "supplementar(?:y|ies)\\s+materials?",
    "supplemental\\s+materials?",
];

static DEFAULT_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| build_header_re(DEFAULT_SECTION_HEADERS).unwrap());

fn build_header_re(headers: &[&str]) -> std::result::Result<Regex, regex::Error> {
    // A header line may carry a section number ("7. References") and trailing
    // colon/dash punctuation, but nothing else.
    let alt = headers.join("|");
    Regex::new(&format!(
        r"^\s*(?:\d+\.?|[ivxlc]+\.?)?\s*(?:{alt})\s*[:\-\u{{2013}}\u{{2014}}]?\s*$"
    ))
}

/// Heuristic removal of trailing reference/bibliography/appendix content.
///
/// Scans the line-preserving normalized text for the first line matching a
/// section header and drops that line and everything after it. Known to miss
/// non-standard headers and to fire on body sections with coincidental
/// titles; both are accepted limitations of the heuristic.
#[derive(Debug, Clone)]
pub struct Trimmer {
    header_re: Regex,
}

impl Trimmer {
    /// Trimmer with the default header list.
    pub fn new() -> Self {
        Trimmer {
            header_re: DEFAULT_HEADER_RE.clone(),
        }
    }

    /// Trimmer with a custom header list. Each entry is a regex fragment
    /// matched against a whole trimmed line (text is already lowercased).
    /// An entry with invalid regex syntax is a configuration error.
    pub fn with_headers(headers: &[&str]) -> Result<Self> {
        let header_re = build_header_re(headers)
            .map_err(|e| Error::Config(format!("invalid section header pattern: {e}")))?;
        Ok(Trimmer { header_re })
    }

    /// Cut at the first matching header line from the top; reference
    /// sections do not recur earlier in the body. Returns the input
    /// unchanged when no header is found.
    pub fn strip_back_matter<'a>(&self, text: &'a str) -> &'a str {
        let mut offset = 0;
        for line in text.split('\n') {
            if self.header_re.is_match(line) {
                return text[..offset].trim_end_matches('\n');
            }
            offset += line.len() + 1;
        }
        text
    }
}

impl Default for Trimmer {
    fn default() -> Self {
        Self::new()
    }
}
