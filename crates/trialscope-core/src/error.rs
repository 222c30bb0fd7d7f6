use thiserror::Error;

/// All errors that can occur in trialscope-core.
#[derive(Debug, Error)]
pub enum TrialscopeError {
    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Unknown specialty: {0}")]
    UnknownSpecialty(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Exit codes used by the CLI.
#[repr(i32)]
pub enum ExitCode {
    GeneralError = 1,
    NotFound = 2,
    InvalidArgs = 3,
    FileSystemError = 4,
}

pub type Result<T> = std::result::Result<T, TrialscopeError>;
