use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};

/// Extract the full text of one PDF.
///
/// Every failure mode (unreadable file, encrypted or malformed PDF, a panic
/// inside the extractor) comes back as [`Error::Extraction`] so the caller
/// can record it against the document instead of aborting the batch. A
/// scanned PDF without an OCR layer extracts as an empty string and is
/// handled downstream as an empty document.
pub fn extract_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::Extraction(format!("cannot read {}: {e}", path.display())))?;
    let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes))
        .map_err(|_| Error::Extraction("extractor panicked on malformed input".into()))?;
    outcome.map_err(|e| Error::Extraction(e.to_string()))
}

/// Extraction bounded by a per-document timeout, so one pathological file
/// cannot stall the batch. The extraction runs on a helper thread; on
/// timeout the thread is abandoned and the document recorded as failed.
pub fn extract_text_with_timeout(path: &Path, timeout: Option<Duration>) -> Result<String> {
    let Some(timeout) = timeout else {
        return extract_text(path);
    };
    let (tx, rx) = mpsc::channel();
    let owned: PathBuf = path.to_path_buf();
    thread::spawn(move || {
        let _ = tx.send(extract_text(&owned));
    });
    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(_) => Err(Error::Extraction(format!(
            "extraction timed out after {}s",
            timeout.as_secs()
        ))),
    }
}
