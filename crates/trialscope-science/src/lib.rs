//! Trialscope Science: RCT detection, identity resolution, merging,
//! deduplication, specialty classification.

pub mod error;
pub mod identifiers;
pub mod text;
pub mod dates;
pub mod detection;
pub mod merge;
pub mod dedup;
pub mod classification;
pub mod sources;
pub mod formats;
pub mod pipeline;

pub use error::{Result, ScienceError};
pub use classification::SpecialtyClassifier;
pub use dedup::{DedupReport, Deduplicator, IdentityResolver, deduplicate_records};
pub use detection::{assess_candidate, detect_rct_from_text};
pub use merge::MergeRecord;
pub use pipeline::{RunOutput, RunPipeline, RunSummary};
pub use sources::{CandidateSource, JsonFileSource};
