use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Fatal misconfiguration. Aborts the run before any document is touched.
    #[error("configuration error: {0}")]
    Config(String),

    /// Per-document extraction failure. Recorded in the report, never fatal.
    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("report error: {0}")]
    Report(String),
}

pub type Result<T> = std::result::Result<T, Error>;
