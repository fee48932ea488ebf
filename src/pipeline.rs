use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use walkdir::WalkDir;

use crate::count::TermCounter;
use crate::document::{DocumentRecord, Outcome};
use crate::extract;
use crate::trim::Trimmer;
use crate::vocab::Vocabulary;

/// Batch options, constructed once at startup and immutable for the run.
/// Vocabulary loading and output-path handling live with the caller; this
/// carries only what the batch itself consumes.
#[derive(Debug, Clone)]
pub struct Config {
    /// Count matches inside trailing reference/appendix sections.
    pub include_refs: bool,
    /// Worker threads; 0 means available parallelism.
    pub jobs: usize,
    /// Per-document extraction timeout; `None` disables it.
    pub timeout: Option<Duration>,
}

/// One discovered input document.
#[derive(Debug, Clone)]
pub struct Job {
    /// Label of the containing folder, used for grouping in the report.
    pub folder: String,
    pub file: String,
    pub path: PathBuf,
}

/// End-of-run accounting, reported to the user after the batch.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub empty: usize,
    /// (file, reason) per failed document.
    pub failed: Vec<(String, String)>,
}

impl RunSummary {
    pub fn tally(records: &[DocumentRecord]) -> Self {
        let mut summary = RunSummary {
            attempted: records.len(),
            ..Default::default()
        };
        for rec in records {
            match &rec.outcome {
                Outcome::Ok => summary.succeeded += 1,
                Outcome::Empty => summary.empty += 1,
                Outcome::Failed(reason) => {
                    summary.failed.push((rec.file.clone(), reason.clone()))
                }
            }
        }
        summary
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Sort key that orders "paper2.pdf" before "paper10.pdf".
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Chunk {
    Num(u64),
    Text(String),
}

fn natural_key(s: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut digits = String::new();
    let mut text = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            if !text.is_empty() {
                chunks.push(Chunk::Text(std::mem::take(&mut text)));
            }
            digits.push(c);
        } else {
            if !digits.is_empty() {
                chunks.push(Chunk::Num(digits.parse().unwrap_or(u64::MAX)));
                digits.clear();
            }
            text.extend(c.to_lowercase());
        }
    }
    if !digits.is_empty() {
        chunks.push(Chunk::Num(digits.parse().unwrap_or(u64::MAX)));
    }
    if !text.is_empty() {
        chunks.push(Chunk::Text(text));
    }
    chunks
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn folder_label(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string())
}

/// Collect PDF jobs from files and directories (scanned recursively).
/// Missing paths are logged and skipped; an empty result is the caller's
/// problem to report.
pub fn discover(inputs: &[PathBuf]) -> Vec<Job> {
    let mut jobs = Vec::new();
    for input in inputs {
        if input.is_file() {
            if is_pdf(input) {
                jobs.push(job_for(input));
            } else {
                log::warn!("skipping non-PDF file {}", input.display());
            }
        } else if input.is_dir() {
            for entry in WalkDir::new(input)
                .into_iter()
                .filter_map(|e| match e {
                    Ok(e) => Some(e),
                    Err(err) => {
                        log::warn!("cannot walk {}: {err}", input.display());
                        None
                    }
                })
                .filter(|e| e.file_type().is_file() && is_pdf(e.path()))
            {
                jobs.push(job_for(entry.path()));
            }
        } else {
            log::warn!("path not found or not a PDF/folder: {}", input.display());
        }
    }
    jobs.sort_by(|a, b| {
        a.folder
            .cmp(&b.folder)
            .then_with(|| natural_key(&a.file).cmp(&natural_key(&b.file)))
    });
    jobs
}

fn job_for(path: &Path) -> Job {
    Job {
        folder: folder_label(path),
        file: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        path: path.to_path_buf(),
    }
}

// ---------------------------------------------------------------------------
// Batch processing
// ---------------------------------------------------------------------------

fn process_job(
    job: &Job,
    counter: &TermCounter,
    vocab: &Vocabulary,
    trimmer: Option<&Trimmer>,
    timeout: Option<Duration>,
) -> DocumentRecord {
    match extract::extract_text_with_timeout(&job.path, timeout) {
        Ok(text) => DocumentRecord::from_text(&job.folder, &job.file, &text, counter, trimmer),
        Err(err) => {
            log::warn!("{}: {err}", job.path.display());
            DocumentRecord::failed(&job.folder, &job.file, vocab, err.to_string())
        }
    }
}

/// Process a batch of documents on a fixed-size worker pool.
///
/// Documents are independent; the vocabulary is shared read-only and
/// completed records flow back over a channel. Setting `cancel` stops
/// workers from claiming new documents while in-flight ones finish, so every
/// claimed document still yields exactly one record. The result is sorted by
/// folder and natural file order, independent of completion order.
pub fn process_batch(
    jobs: &[Job],
    vocab: &Vocabulary,
    config: &Config,
    cancel: &AtomicBool,
) -> Vec<DocumentRecord> {
    let counter = TermCounter::new(vocab);
    let trimmer = if config.include_refs {
        None
    } else {
        Some(Trimmer::new())
    };

    let workers = match config.jobs {
        0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        n => n,
    }
    .min(jobs.len().max(1));

    let cursor = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<DocumentRecord>();
    let total = jobs.len();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let counter = &counter;
            let trimmer = trimmer.as_ref();
            let cursor = &cursor;
            scope.spawn(move || loop {
                if cancel.load(Ordering::Relaxed) {
                    break;
                }
                let i = cursor.fetch_add(1, Ordering::Relaxed);
                if i >= total {
                    break;
                }
                let job = &jobs[i];
                log::info!("[{}/{}] processing {}", i + 1, total, job.file);
                let record = process_job(job, counter, vocab, trimmer, config.timeout);
                if tx.send(record).is_err() {
                    break;
                }
            });
        }
        drop(tx);
    });

    let mut records: Vec<DocumentRecord> = rx.into_iter().collect();
    records.sort_by(|a, b| {
        a.folder
            .cmp(&b.folder)
            .then_with(|| natural_key(&a.file).cmp(&natural_key(&b.file)))
    });
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order_sorts_numbers_numerically() {
        let mut names = vec!["paper10.pdf", "paper2.pdf", "Paper1.pdf", "appendix.pdf"];
        names.sort_by_key(|n| natural_key(n));
        assert_eq!(
            names,
            vec!["appendix.pdf", "Paper1.pdf", "paper2.pdf", "paper10.pdf"]
        );
    }

    #[test]
    fn discovery_finds_nested_pdfs_and_labels_folders() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("batch_a");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("b.pdf"), b"%PDF-1.4").unwrap();
        std::fs::write(nested.join("a.PDF"), b"%PDF-1.4").unwrap();
        std::fs::write(nested.join("notes.txt"), b"ignored").unwrap();

        let jobs = discover(&[dir.path().to_path_buf()]);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].file, "a.PDF");
        assert_eq!(jobs[1].file, "b.pdf");
        assert!(jobs.iter().all(|j| j.folder == "batch_a"));
    }

    #[test]
    fn missing_input_paths_yield_no_jobs() {
        let jobs = discover(&[PathBuf::from("/no/such/place")]);
        assert!(jobs.is_empty());
    }

    #[test]
    fn cancelled_batch_claims_nothing() {
        let vocab: Vocabulary = "novel".parse().unwrap();
        let config = Config {
            include_refs: false,
            jobs: 2,
            timeout: None,
        };
        let jobs = vec![Job {
            folder: "in".into(),
            file: "a.pdf".into(),
            path: PathBuf::from("/no/such/a.pdf"),
        }];
        let cancel = AtomicBool::new(true);
        let records = process_batch(&jobs, &vocab, &config, &cancel);
        assert!(records.is_empty());
    }

    #[test]
    fn unreadable_documents_become_failed_records() {
        let vocab: Vocabulary = "novel".parse().unwrap();
        let config = Config {
            include_refs: false,
            jobs: 1,
            timeout: Some(Duration::from_secs(30)),
        };
        let jobs = vec![Job {
            folder: "in".into(),
            file: "missing.pdf".into(),
            path: PathBuf::from("/no/such/missing.pdf"),
        }];
        let records = process_batch(&jobs, &vocab, &config, &AtomicBool::new(false));
        assert_eq!(records.len(), 1);
        assert!(matches!(records[0].outcome, Outcome::Failed(_)));
        let summary = RunSummary::tally(&records);
        assert_eq!(summary.attempted, 1);
        assert_eq!(summary.failed.len(), 1);
    }
}
