use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScienceError {
    #[error("invalid DOI: {0}")]
    InvalidDoi(String),

    #[error("invalid PMID: {0}")]
    InvalidPmid(String),

    #[error("invalid PMCID: {0}")]
    InvalidPmcid(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Core(#[from] trialscope_core::TrialscopeError),
}

pub type Result<T> = std::result::Result<T, ScienceError>;
