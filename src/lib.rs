//! Count indicator adjectives in academic PDFs.
//!
//! The pipeline is a linear pass per document: extract text, normalize it,
//! optionally strip trailing reference sections, count whole-word vocabulary
//! matches, and score matches per thousand words. Batches run on a worker
//! pool and end in a two-sheet spreadsheet report (per-document rows plus
//! per-folder statistics). This is a frequency counter for downstream human
//! analysis, not a classifier.

pub mod count;
pub mod document;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod trim;
pub mod vocab;

pub use count::TermCounter;
pub use document::{DocumentRecord, Outcome};
pub use error::{Error, Result};
pub use pipeline::{Config, Job, RunSummary};
pub use report::{FolderSummary, Report};
pub use stats::ScoreStats;
pub use trim::Trimmer;
pub use vocab::Vocabulary;
