pub mod config;
pub mod error;
pub mod models;

pub use config::{
    AppConfig, ClassificationConfig, ClassificationWeights, DedupConfig, OutputConfig,
    PipelineConfig,
};
pub use error::{ExitCode, Result, TrialscopeError};
pub use models::*;
